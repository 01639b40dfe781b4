//! Resolves which management tabs the signed-in account may open.

use tracing::warn;

use crate::application::notify::{Notifier, Toast};
use crate::application::repos::ResourceApi;
use crate::domain::permissions::{AuthContext, TabView};

/// Fetch the account's permissions. A failed fetch is reported and treated as
/// an empty permission set.
pub async fn load_auth_context(api: &dyn ResourceApi, notifier: &dyn Notifier) -> AuthContext {
    match api.permissions().await {
        Ok(auth) => auth,
        Err(err) => {
            warn!(error = %err, "permissions could not be loaded");
            notifier.notify(Toast::error(err.user_message()));
            AuthContext::default()
        }
    }
}

pub async fn resolve_tab_view(api: &dyn ResourceApi, notifier: &dyn Notifier) -> TabView {
    let auth = load_auth_context(api, notifier).await;
    TabView::resolve(&auth)
}
