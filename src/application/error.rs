use std::fmt;

use thiserror::Error;

use crate::domain::resources::ActionKind;

/// Failure reading a collection or a single record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("page must be at least 1")]
    InvalidPage,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Rejected(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn transport(err: impl fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn decode(err: impl fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    /// Text shown in the error toast.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            Self::Status { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Client-side rejection of a draft before anything is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Failure of a write against the server.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MutationError {
    /// The server rejected a field; only its first message is kept.
    #[error("{message}")]
    Validation { field: String, message: String },
    #[error("{0}")]
    Rejected(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("`{action}` is not available for {collection}")]
    Unsupported {
        action: ActionKind,
        collection: String,
    },
}

impl MutationError {
    pub const GENERIC_MESSAGE: &'static str = "Something went wrong, please try again";

    pub fn transport(err: impl fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
