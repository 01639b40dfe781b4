#![deny(clippy::all, clippy::pedantic)]

use backoffice::application::controller::Mutation;
use backoffice::application::validation::encode_flag;
use backoffice::domain::filters::FilterSet;
use backoffice::domain::resources::ResourceKind;

use crate::args::TestimonialsCmd;
use crate::client::{CliError, Ctx};
use crate::handlers::resource;

const KIND: ResourceKind = ResourceKind::Testimonials;

pub async fn handle(ctx: &Ctx, cmd: TestimonialsCmd) -> Result<(), CliError> {
    match cmd {
        TestimonialsCmd::List {
            status,
            featured,
            rating,
            search,
            page,
        } => {
            let rating = rating.map(|rating| rating.to_string());
            let filters = FilterSet::new()
                .with("status", status.map(|status| status.as_str()))
                .with("featured", featured.map(encode_flag))
                .with("rating", rating.as_deref())
                .with("search", search.as_deref());
            resource::list(ctx, KIND, filters, page).await
        }
        TestimonialsCmd::Show { id } => resource::show(ctx, KIND, id).await,
        TestimonialsCmd::Approve { id } => resource::mutate(ctx, KIND, id, Mutation::Approve).await,
        TestimonialsCmd::Reject { id } => resource::mutate(ctx, KIND, id, Mutation::Reject).await,
        TestimonialsCmd::Feature { id } => resource::mutate(ctx, KIND, id, Mutation::Feature).await,
        TestimonialsCmd::Unfeature { id } => {
            resource::mutate(ctx, KIND, id, Mutation::Unfeature).await
        }
        TestimonialsCmd::Delete { id, yes } => resource::delete(ctx, KIND, id, yes).await,
    }
}
