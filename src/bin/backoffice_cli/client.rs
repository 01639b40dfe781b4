#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::sync::Arc;

use backoffice::application::controller::AdminResourceController;
use backoffice::application::error::{FetchError, MutationError};
use backoffice::application::pack_editor::SaveError;
use backoffice::config::{self, LoadError, Settings};
use backoffice::domain::resources::ResourceKind;
use backoffice::infra::error::InfraError;
use backoffice::infra::http::HttpResourceApi;
use thiserror::Error;

use crate::args::Cli;
use crate::print::StderrNotifier;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] LoadError),
    #[error("failed to read token file: {0}")]
    TokenFile(std::io::Error),
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("load failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("request failed: {0}")]
    Mutation(#[from] MutationError),
    #[error("save failed: {0}")]
    Save(#[from] SaveError),
    #[error("cancelled: {0}")]
    Cancelled(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to render output: {0}")]
    Output(String),
}

#[derive(Debug)]
pub struct Ctx {
    pub api: Arc<HttpResourceApi>,
    pub notifier: Arc<StderrNotifier>,
    pub settings: Settings,
}

impl Ctx {
    pub fn new(settings: Settings) -> Result<Self, CliError> {
        let api = HttpResourceApi::new(&settings.api)?;
        Ok(Self {
            api: Arc::new(api),
            notifier: Arc::new(StderrNotifier),
            settings,
        })
    }

    /// Fresh list screen for `kind`.
    #[must_use]
    pub fn controller(&self, kind: ResourceKind) -> AdminResourceController {
        AdminResourceController::new(self.api.clone(), self.notifier.clone(), kind.collection())
    }
}

/// Resolve settings and the API token. A token file wins over the
/// environment, which wins over the configured `api.token`.
pub fn build_ctx_from_cli(cli: &Cli) -> Result<Ctx, CliError> {
    let mut settings = config::load(&cli.config)?;
    let token = if let Some(path) = &cli.token_file {
        Some(
            fs::read_to_string(path)
                .map_err(CliError::TokenFile)?
                .trim()
                .to_string(),
        )
    } else {
        cli.api_token_env
            .as_deref()
            .map(str::trim)
            .map(str::to_string)
    };
    if let Some(token) = token.filter(|token| !token.is_empty()) {
        settings.api.token = Some(token);
    }

    Ctx::new(settings)
}
