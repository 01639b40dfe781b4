//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{num::NonZeroU32, path::PathBuf, str::FromStr, time::Duration};

use clap::{Args, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "backoffice";
const ENV_PREFIX: &str = "BACKOFFICE";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: u32 = 15;
const DEFAULT_PERMISSIONS_PATH: &str = "user/permissions";
const DEFAULT_PACK_CATEGORIES: [&str; 3] = ["basic", "standard", "premium"];

/// Overrides accepted on the command line; they win over files and environment.
#[derive(Debug, Args, Default, Clone)]
pub struct ConfigOverrides {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "BACKOFFICE_CONFIG_FILE", value_name = "PATH", global = true)]
    pub config_file: Option<PathBuf>,

    /// Base URL of the admin API, e.g. <https://example.com/api/admin>
    #[arg(long = "api-url", env = "BACKOFFICE_API_URL", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long = "timeout-seconds", value_name = "SECONDS", global = true)]
    pub timeout_seconds: Option<u64>,

    /// Page size assumed when the server does not report one.
    #[arg(long = "page-size", value_name = "N", global = true)]
    pub page_size: Option<u32>,

    /// Permissions endpoint; relative to the base URL, or to the host when it starts with `/`.
    #[arg(long = "permissions-path", value_name = "PATH", global = true)]
    pub permissions_path: Option<String>,

    /// Override the log level (error, warn, info, debug, trace).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON.
    #[arg(long = "log-json", value_name = "BOOL", value_parser = BoolishValueParser::new(), global = true)]
    pub log_json: Option<bool>,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub packs: PackSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    pub token: Option<String>,
    pub timeout: Duration,
    pub page_size: NonZeroU32,
    pub permissions_path: String,
}

#[derive(Debug, Clone)]
pub struct PackSettings {
    pub categories: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(overrides: &ConfigOverrides) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = overrides.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__"),
    );

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(overrides);

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    packs: RawPackSettings,
    logging: RawLoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
    token: Option<String>,
    timeout_seconds: Option<u64>,
    page_size: Option<u32>,
    permissions_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPackSettings {
    categories: Option<RawList>,
}

/// A list given either natively or as one comma-separated string (environment).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawList {
    Items(Vec<String>),
    Joined(String),
}

impl RawList {
    fn into_items(self) -> Vec<String> {
        let items = match self {
            RawList::Items(items) => items,
            RawList::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        };
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = overrides.api_url.as_ref() {
            self.api.base_url = Some(url.clone());
        }
        if let Some(seconds) = overrides.timeout_seconds {
            self.api.timeout_seconds = Some(seconds);
        }
        if let Some(size) = overrides.page_size {
            self.api.page_size = Some(size);
        }
        if let Some(path) = overrides.permissions_path.as_ref() {
            self.api.permissions_path = Some(path.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            packs,
            logging,
        } = raw;

        Ok(Self {
            api: build_api_settings(api)?,
            packs: build_pack_settings(packs)?,
            logging: build_logging_settings(logging)?,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let raw_url = api
        .base_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| LoadError::invalid("api.base_url", "a base URL is required"))?;
    let base_url = parse_base_url(&raw_url)
        .map_err(|reason| LoadError::invalid("api.base_url", reason))?;

    let token = api.token.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    });

    let timeout_secs = api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(LoadError::invalid(
            "api.timeout_seconds",
            "must be greater than zero",
        ));
    }

    let page_size = NonZeroU32::new(api.page_size.unwrap_or(DEFAULT_PAGE_SIZE))
        .ok_or_else(|| LoadError::invalid("api.page_size", "must be greater than zero"))?;

    let permissions_path = match api.permissions_path {
        None => DEFAULT_PERMISSIONS_PATH.to_string(),
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.trim_matches('/').is_empty() || trimmed.contains("://") {
                return Err(LoadError::invalid(
                    "api.permissions_path",
                    "must be a path such as `user/permissions` or `/user/permissions`",
                ));
            }
            trimmed.to_string()
        }
    };

    Ok(ApiSettings {
        base_url,
        token,
        timeout: Duration::from_secs(timeout_secs),
        page_size,
        permissions_path,
    })
}

fn build_pack_settings(packs: RawPackSettings) -> Result<PackSettings, LoadError> {
    let categories = match packs.categories {
        Some(list) => list.into_items(),
        None => DEFAULT_PACK_CATEGORIES
            .iter()
            .map(|category| (*category).to_string())
            .collect(),
    };
    if categories.is_empty() {
        return Err(LoadError::invalid(
            "packs.categories",
            "at least one category is required",
        ));
    }
    Ok(PackSettings { categories })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

/// Parse the API root. Relative endpoint paths are joined onto it, so the
/// path always ends with a slash.
fn parse_base_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw).map_err(|err| err.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme `{}`", url.scheme()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
