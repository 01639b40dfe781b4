#![deny(clippy::all, clippy::pedantic)]

use backoffice::application::access::resolve_tab_view;

use crate::client::{CliError, Ctx};
use crate::print::print_json;

pub async fn handle(ctx: &Ctx) -> Result<(), CliError> {
    let view = resolve_tab_view(ctx.api.as_ref(), ctx.notifier.as_ref()).await;
    print_json(&view)
}
