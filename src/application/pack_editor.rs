//! Pack edit screen: load by id, edit a local draft, validate, submit.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::application::error::{FetchError, MutationError, ValidationError};
use crate::application::notify::{Notifier, Toast};
use crate::application::repos::{Ack, ResourceApi};
use crate::application::validation::{NormalizedPayload, Rule, pack_rules, validate_draft};
use crate::domain::draft::PackDraft;
use crate::domain::records::RecordId;
use crate::domain::resources::{ActionKind, Collection, ResourceKind};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Mutation(#[from] MutationError),
}

/// Result of opening the editor. A record that cannot be fetched sends the
/// user back to the list instead of showing an empty form.
pub enum EditorOpen {
    Ready(Box<PackEditor>),
    Redirect { to: String, error: FetchError },
}

pub struct PackEditor {
    api: Arc<dyn ResourceApi>,
    notifier: Arc<dyn Notifier>,
    collection: Collection,
    id: RecordId,
    rules: Vec<Rule>,
    draft: PackDraft,
}

impl PackEditor {
    #[instrument(skip(api, notifier, categories))]
    pub async fn open(
        api: Arc<dyn ResourceApi>,
        notifier: Arc<dyn Notifier>,
        id: RecordId,
        categories: &[String],
    ) -> EditorOpen {
        let collection = ResourceKind::Packs.collection();
        match api.fetch(&collection, &id).await {
            Ok(record) => {
                let draft = PackDraft::from_record(&record);
                EditorOpen::Ready(Box::new(Self {
                    api,
                    notifier,
                    rules: pack_rules(categories),
                    collection,
                    id,
                    draft,
                }))
            }
            Err(error) => {
                warn!(pack = %id, error = %error, "pack could not be loaded, leaving editor");
                notifier.notify(Toast::error(error.user_message()));
                EditorOpen::Redirect {
                    to: collection.path().to_string(),
                    error,
                }
            }
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn draft(&self) -> &PackDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut PackDraft {
        &mut self.draft
    }

    pub fn validate(&self) -> Result<NormalizedPayload, ValidationError> {
        validate_draft(&self.draft, &self.rules)
    }

    /// Validate and submit the whole draft. Only the first failing rule is
    /// reported; nothing is sent in that case.
    #[instrument(skip(self), fields(pack = %self.id))]
    pub async fn save(&self) -> Result<Ack, SaveError> {
        let payload = match self.validate() {
            Ok(payload) => payload,
            Err(err) => {
                self.notifier.notify(Toast::error(err.message.clone()));
                return Err(err.into());
            }
        };

        match self.api.update(&self.collection, &self.id, &payload).await {
            Ok(ack) => {
                info!("pack updated");
                self.notifier.notify(Toast::success(
                    ack.message_or(ActionKind::Update.success_message()),
                ));
                Ok(ack)
            }
            Err(err) => {
                warn!(error = %err, "pack update rejected");
                self.notifier.notify(Toast::error(err.user_message()));
                Err(err.into())
            }
        }
    }
}
