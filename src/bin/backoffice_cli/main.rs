//! backoffice-cli: command-line front end for the admin screens.
//! Every subcommand drives the same controller and pack editor a UI would.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod handlers;
mod io;
mod print;


use backoffice::infra::telemetry;
use clap::Parser;

use args::{Cli, Commands};
use client::{CliError, build_ctx_from_cli};
use handlers::{members, packs, tabs, testimonials};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = build_ctx_from_cli(&cli)?;
    telemetry::init(&ctx.settings.logging)?;

    match cli.command {
        Commands::Testimonials(cmd) => testimonials::handle(&ctx, cmd.action).await?,
        Commands::Packs(cmd) => packs::handle(&ctx, cmd.action).await?,
        Commands::Users(cmd) => members::handle(&ctx, members::Audience::Users, cmd.action).await?,
        Commands::Admins(cmd) => {
            members::handle(&ctx, members::Audience::Admins, cmd.action).await?;
        }
        Commands::Tabs => tabs::handle(&ctx).await?,
    }

    Ok(())
}
