//! Scripted in-memory [`ResourceApi`] shared by the application tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::application::error::{FetchError, MutationError};
use crate::application::repos::{Ack, ResourceApi};
use crate::application::validation::NormalizedPayload;
use crate::domain::filters::ListQuery;
use crate::domain::permissions::AuthContext;
use crate::domain::records::{Page, RecordId, ResourceRecord};
use crate::domain::resources::{Collection, RecordAction};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    List {
        collection: String,
        query: Vec<(String, String)>,
    },
    Fetch {
        id: String,
    },
    Perform {
        id: String,
        action: &'static str,
    },
    Update {
        id: String,
        fields: Vec<(&'static str, String)>,
    },
    Delete {
        id: String,
    },
    Permissions,
}

#[derive(Default)]
pub(crate) struct FakeApi {
    calls: Mutex<Vec<Call>>,
    pages: Mutex<VecDeque<Result<Page<ResourceRecord>, FetchError>>>,
    record: Mutex<Option<Result<ResourceRecord, FetchError>>>,
    mutation: Mutex<Option<Result<Ack, MutationError>>>,
    auth: Mutex<Option<Result<AuthContext, FetchError>>>,
}

impl FakeApi {
    /// List responses are served in order; once exhausted an empty page is returned.
    pub(crate) fn with_pages(pages: Vec<Result<Page<ResourceRecord>, FetchError>>) -> Self {
        let api = Self::default();
        *api.pages.lock().unwrap() = pages.into();
        api
    }

    pub(crate) fn set_record(&self, record: Result<ResourceRecord, FetchError>) {
        *self.record.lock().unwrap() = Some(record);
    }

    pub(crate) fn set_mutation(&self, result: Result<Ack, MutationError>) {
        *self.mutation.lock().unwrap() = Some(result);
    }

    pub(crate) fn set_auth(&self, result: Result<AuthContext, FetchError>) {
        *self.auth.lock().unwrap() = Some(result);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn list_queries(&self) -> Vec<Vec<(String, String)>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::List { query, .. } => Some(query),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn list_collections(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::List { collection, .. } => Some(collection),
                _ => None,
            })
            .collect()
    }

    fn record_call(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn mutation_result(&self) -> Result<Ack, MutationError> {
        self.mutation
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Ack::default()))
    }
}

#[async_trait]
impl ResourceApi for FakeApi {
    async fn list(
        &self,
        collection: &Collection,
        query: &ListQuery,
    ) -> Result<Page<ResourceRecord>, FetchError> {
        self.record_call(Call::List {
            collection: collection.path().to_string(),
            query: query
                .pairs()
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        });
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Page::new(Vec::new(), 0, 10, 10)))
    }

    async fn fetch(
        &self,
        _collection: &Collection,
        id: &RecordId,
    ) -> Result<ResourceRecord, FetchError> {
        self.record_call(Call::Fetch { id: id.to_string() });
        self.record
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(FetchError::Status {
                status: 404,
                message: "Not found".into(),
            }))
    }

    async fn perform(
        &self,
        _collection: &Collection,
        id: &RecordId,
        action: RecordAction,
    ) -> Result<Ack, MutationError> {
        self.record_call(Call::Perform {
            id: id.to_string(),
            action: action.path_segment(),
        });
        self.mutation_result()
    }

    async fn update(
        &self,
        _collection: &Collection,
        id: &RecordId,
        payload: &NormalizedPayload,
    ) -> Result<Ack, MutationError> {
        self.record_call(Call::Update {
            id: id.to_string(),
            fields: payload.fields().to_vec(),
        });
        self.mutation_result()
    }

    async fn delete(&self, _collection: &Collection, id: &RecordId) -> Result<Ack, MutationError> {
        self.record_call(Call::Delete { id: id.to_string() });
        self.mutation_result()
    }

    async fn permissions(&self) -> Result<AuthContext, FetchError> {
        self.record_call(Call::Permissions);
        self.auth
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(AuthContext::default()))
    }
}

pub(crate) fn record(id: u64, status: &str) -> ResourceRecord {
    ResourceRecord::from_value(json!({"id": id, "status": status, "name": format!("record {id}")}))
        .expect("fixture record")
}

/// Page of pending records with ids `ids`, ten per page.
pub(crate) fn page_of(ids: &[u64], total: u64) -> Page<ResourceRecord> {
    Page::new(
        ids.iter().map(|id| record(*id, "pending")).collect(),
        total,
        10,
        10,
    )
}
