//! Fetch, filter, paginate, mutate and refresh cycle of one admin screen.
//!
//! The controller never patches records locally: every successful write is
//! followed by a reload of the page that was on screen, so the view always
//! reflects what the server holds.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::application::error::{FetchError, MutationError};
use crate::application::notify::{Notifier, Toast};
use crate::application::repos::{Ack, ResourceApi};
use crate::application::validation::NormalizedPayload;
use crate::domain::filters::{FilterSet, ListQuery};
use crate::domain::pagination::{PageMarker, PageState};
use crate::domain::records::{Page, RecordId, ResourceRecord};
use crate::domain::resources::{ActionKind, Collection, RecordAction};

#[cfg(test)]
mod tests;

/// Proof that the user explicitly agreed to a destructive action.
#[derive(Debug)]
pub struct Confirmation(());

impl Confirmation {
    /// Accepts `y` / `yes` in any case; anything else is a refusal.
    pub fn from_answer(answer: &str) -> Option<Self> {
        let answer = answer.trim();
        (answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
            .then_some(Self(()))
    }

    /// Confirmation obtained out of band, such as a `--yes` flag.
    pub fn assumed() -> Self {
        Self(())
    }
}

/// Write issued from a screen.
#[derive(Debug)]
pub enum Mutation {
    Approve,
    Reject,
    Feature,
    Unfeature,
    Delete(Confirmation),
    Update(NormalizedPayload),
}

impl Mutation {
    pub fn kind(&self) -> ActionKind {
        match self {
            Mutation::Approve => ActionKind::Approve,
            Mutation::Reject => ActionKind::Reject,
            Mutation::Feature => ActionKind::Feature,
            Mutation::Unfeature => ActionKind::Unfeature,
            Mutation::Delete(_) => ActionKind::Delete,
            Mutation::Update(_) => ActionKind::Update,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenState {
    Idle,
    Loading,
    Loaded,
    LoadFailed,
    Mutating,
}

/// Handle of an issued load; only the most recently issued one is applied.
#[derive(Debug)]
pub struct LoadTicket {
    token: u64,
    filters: FilterSet,
    page: u32,
    query: ListQuery,
}

impl LoadTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response became the visible page. `clamped` is set when the
    /// requested page was past the end and the current page moved back.
    Applied { clamped: bool },
    /// A newer load was issued meanwhile; the response was dropped.
    Superseded,
}

pub struct AdminResourceController {
    api: Arc<dyn ResourceApi>,
    notifier: Arc<dyn Notifier>,
    collection: Collection,
    filters: FilterSet,
    pages: PageState,
    page: Page<ResourceRecord>,
    selection: Option<RecordId>,
    state: ScreenState,
    loading: bool,
    latest_token: u64,
}

impl AdminResourceController {
    pub fn new(
        api: Arc<dyn ResourceApi>,
        notifier: Arc<dyn Notifier>,
        collection: Collection,
    ) -> Self {
        Self {
            api,
            notifier,
            collection,
            filters: FilterSet::default(),
            pages: PageState::default(),
            page: Page::empty(),
            selection: None,
            state: ScreenState::Idle,
            loading: false,
            latest_token: 0,
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn page_state(&self) -> PageState {
        self.pages
    }

    pub fn page(&self) -> &Page<ResourceRecord> {
        &self.page
    }

    pub fn records(&self) -> &[ResourceRecord] {
        &self.page.records
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    /// Triggers should be disabled while this is set.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn page_window(&self) -> Vec<PageMarker> {
        self.pages.window()
    }

    /// Update one filter. A change sends the screen back to page 1; the caller
    /// reloads when this returns `true`.
    pub fn set_filter(&mut self, key: impl Into<String>, value: Option<&str>) -> bool {
        let changed = self.filters.set(key, value);
        if changed {
            self.pages.reset();
        }
        changed
    }

    /// Move to `target`. Out-of-range targets change nothing and return
    /// `false`; on `true` the caller reloads.
    pub fn change_page(&mut self, target: u32) -> bool {
        self.pages.go_to(target)
    }

    /// Select a record of the current page for detail viewing.
    pub fn select(&mut self, id: &RecordId) -> bool {
        if self.page.records.iter().any(|record| record.id() == id) {
            self.selection = Some(id.clone());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selected(&self) -> Option<&ResourceRecord> {
        let id = self.selection.as_ref()?;
        self.page.records.iter().find(|record| record.id() == id)
    }

    /// Issue a load of `page` under `filters`. Pair with
    /// [`AdminResourceController::complete_load`] once the response arrives.
    pub fn begin_load(&mut self, filters: FilterSet, page: u32) -> Result<LoadTicket, FetchError> {
        if page < 1 {
            let err = FetchError::InvalidPage;
            self.notifier.notify(Toast::error(err.user_message()));
            return Err(err);
        }

        self.latest_token += 1;
        self.loading = true;
        self.state = ScreenState::Loading;

        let query = ListQuery::new(&filters, page);
        debug!(
            collection = self.collection.path(),
            token = self.latest_token,
            page,
            "issuing collection load"
        );
        Ok(LoadTicket {
            token: self.latest_token,
            filters,
            page,
            query,
        })
    }

    /// Apply the response of `ticket` unless a newer load has been issued.
    /// Failures leave filters, pagination and records as they were.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Page<ResourceRecord>, FetchError>,
    ) -> Result<LoadOutcome, FetchError> {
        if ticket.token != self.latest_token {
            debug!(
                token = ticket.token,
                latest = self.latest_token,
                "discarding superseded collection response"
            );
            return Ok(LoadOutcome::Superseded);
        }

        self.loading = false;
        match result {
            Ok(page) => {
                let clamped = self.pages.settle(ticket.page, page.total_pages);
                self.filters = ticket.filters;
                self.page = page;
                self.state = ScreenState::Loaded;
                let selection_left_page = self.selection.as_ref().is_some_and(|id| {
                    !self.page.records.iter().any(|record| record.id() == id)
                });
                if selection_left_page {
                    self.selection = None;
                }
                Ok(LoadOutcome::Applied { clamped })
            }
            Err(err) => {
                warn!(
                    collection = self.collection.path(),
                    error = %err,
                    "collection load failed"
                );
                self.state = ScreenState::LoadFailed;
                self.notifier.notify(Toast::error(err.user_message()));
                Err(err)
            }
        }
    }

    /// Load `page` under `filters` and make it the visible page.
    #[instrument(skip(self, filters), fields(collection = self.collection.path()))]
    pub async fn load_with(
        &mut self,
        filters: FilterSet,
        page: u32,
    ) -> Result<&Page<ResourceRecord>, FetchError> {
        if let LoadOutcome::Applied { clamped: true } = self.fetch_and_apply(filters, page).await? {
            let filters = self.filters.clone();
            let last = self.pages.current_page();
            debug!(requested = page, last, "requested page is past the end, reloading");
            self.fetch_and_apply(filters, last).await?;
        }
        Ok(&self.page)
    }

    /// Reload the current filters and page.
    pub async fn load(&mut self) -> Result<&Page<ResourceRecord>, FetchError> {
        let filters = self.filters.clone();
        let page = self.pages.current_page();
        self.load_with(filters, page).await
    }

    async fn fetch_and_apply(
        &mut self,
        filters: FilterSet,
        page: u32,
    ) -> Result<LoadOutcome, FetchError> {
        let ticket = self.begin_load(filters, page)?;
        let result = self.api.list(&self.collection, ticket.query()).await;
        self.complete_load(ticket, result)
    }

    /// Issue `mutation` against record `id`, then reload the page that was on
    /// screen. Failures leave every piece of local state untouched.
    #[instrument(skip(self, mutation), fields(collection = self.collection.path(), action = %mutation.kind()))]
    pub async fn mutate(&mut self, id: &RecordId, mutation: Mutation) -> Result<Ack, MutationError> {
        let kind = mutation.kind();
        if !self.collection.supports(kind) {
            let err = MutationError::Unsupported {
                action: kind,
                collection: self.collection.path().to_string(),
            };
            self.notifier.notify(Toast::error(err.user_message()));
            return Err(err);
        }

        let filters = self.filters.clone();
        let page = self.pages.current_page();
        let previous = self.state;
        self.state = ScreenState::Mutating;

        let result = match mutation {
            Mutation::Approve => self.perform(id, RecordAction::Approve).await,
            Mutation::Reject => self.perform(id, RecordAction::Reject).await,
            Mutation::Feature => self.perform(id, RecordAction::Feature).await,
            Mutation::Unfeature => self.perform(id, RecordAction::Unfeature).await,
            Mutation::Delete(_confirmed) => self.api.delete(&self.collection, id).await,
            Mutation::Update(payload) => self.api.update(&self.collection, id, &payload).await,
        };
        self.state = previous;

        let ack = match result {
            Ok(ack) => ack,
            Err(err) => {
                warn!(record = %id, error = %err, "mutation failed");
                self.notifier.notify(Toast::error(err.user_message()));
                return Err(err);
            }
        };

        if self.selection.as_ref() == Some(id) {
            self.selection = None;
        }
        self.notifier
            .notify(Toast::success(ack.message_or(kind.success_message())));

        if let Err(err) = self.load_with(filters, page).await {
            debug!(error = %err, "refresh after mutation failed");
        }
        Ok(ack)
    }

    async fn perform(&self, id: &RecordId, action: RecordAction) -> Result<Ack, MutationError> {
        self.api.perform(&self.collection, id, action).await
    }
}
