#![deny(clippy::all, clippy::pedantic)]

//! Operations shared by every collection screen.

use backoffice::application::controller::Mutation;
use backoffice::application::notify::{Notifier, Toast};
use backoffice::application::repos::ResourceApi;
use backoffice::domain::filters::FilterSet;
use backoffice::domain::records::RecordId;
use backoffice::domain::resources::ResourceKind;

use crate::client::{CliError, Ctx};
use crate::io::confirm_stdin;
use crate::print::{ListView, print_json};

pub async fn list(
    ctx: &Ctx,
    kind: ResourceKind,
    filters: FilterSet,
    page: u32,
) -> Result<(), CliError> {
    let mut controller = ctx.controller(kind);
    controller.load_with(filters, page).await?;
    print_json(&ListView::of(&controller))
}

pub async fn show(ctx: &Ctx, kind: ResourceKind, id: String) -> Result<(), CliError> {
    let id = RecordId::new(id);
    match ctx.api.fetch(&kind.collection(), &id).await {
        Ok(record) => print_json(&record),
        Err(err) => {
            ctx.notifier.notify(Toast::error(err.user_message()));
            Err(err.into())
        }
    }
}

/// Apply `mutation` and print the page reloaded afterwards.
pub async fn mutate(
    ctx: &Ctx,
    kind: ResourceKind,
    id: String,
    mutation: Mutation,
) -> Result<(), CliError> {
    let mut controller = ctx.controller(kind);
    controller.mutate(&RecordId::new(id), mutation).await?;
    print_json(&ListView::of(&controller))
}

pub async fn delete(ctx: &Ctx, kind: ResourceKind, id: String, yes: bool) -> Result<(), CliError> {
    let prompt = format!("Delete {} {id}?", kind.label().to_lowercase());
    let confirmation = confirm_stdin(&prompt, yes)?;
    mutate(ctx, kind, id, Mutation::Delete(confirmation)).await
}
