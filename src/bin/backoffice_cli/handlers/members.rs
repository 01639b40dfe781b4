#![deny(clippy::all, clippy::pedantic)]

use backoffice::domain::filters::FilterSet;
use backoffice::domain::resources::ResourceKind;

use crate::args::MembersCmd;
use crate::client::{CliError, Ctx};
use crate::handlers::resource;

/// Account collections sharing the same screen layout.
#[derive(Clone, Copy, Debug)]
pub enum Audience {
    Users,
    Admins,
}

impl Audience {
    fn kind(self) -> ResourceKind {
        match self {
            Self::Users => ResourceKind::Users,
            Self::Admins => ResourceKind::Admins,
        }
    }
}

pub async fn handle(ctx: &Ctx, audience: Audience, cmd: MembersCmd) -> Result<(), CliError> {
    let kind = audience.kind();
    match cmd {
        MembersCmd::List {
            status,
            role,
            search,
            page,
        } => {
            let filters = FilterSet::new()
                .with("status", status.as_deref())
                .with("role", role.as_deref())
                .with("search", search.as_deref());
            resource::list(ctx, kind, filters, page).await
        }
        MembersCmd::Show { id } => resource::show(ctx, kind, id).await,
        MembersCmd::Delete { id, yes } => resource::delete(ctx, kind, id, yes).await,
    }
}
