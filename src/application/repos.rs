//! Port describing the remote admin API the screens talk to.

use async_trait::async_trait;
use serde::Serialize;

use crate::application::error::{FetchError, MutationError};
use crate::application::validation::NormalizedPayload;
use crate::domain::filters::ListQuery;
use crate::domain::permissions::AuthContext;
use crate::domain::records::{Page, RecordId, ResourceRecord};
use crate::domain::resources::{Collection, RecordAction};

/// Successful write acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ack {
    pub message: Option<String>,
}

impl Ack {
    pub fn new(message: Option<String>) -> Self {
        Self {
            message: message.filter(|text| !text.trim().is_empty()),
        }
    }

    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }
}

#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn list(
        &self,
        collection: &Collection,
        query: &ListQuery,
    ) -> Result<Page<ResourceRecord>, FetchError>;

    async fn fetch(
        &self,
        collection: &Collection,
        id: &RecordId,
    ) -> Result<ResourceRecord, FetchError>;

    async fn perform(
        &self,
        collection: &Collection,
        id: &RecordId,
        action: RecordAction,
    ) -> Result<Ack, MutationError>;

    async fn update(
        &self,
        collection: &Collection,
        id: &RecordId,
        payload: &NormalizedPayload,
    ) -> Result<Ack, MutationError>;

    async fn delete(&self, collection: &Collection, id: &RecordId) -> Result<Ack, MutationError>;

    async fn permissions(&self) -> Result<AuthContext, FetchError>;
}
