//! Capability checks and the tab table they gate.

use std::collections::BTreeSet;

use backoffice_api_types::PermissionsResponse;
use serde::Serialize;

/// Capability slugs granted to the signed-in account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PermissionSet(BTreeSet<String>);

impl PermissionSet {
    pub fn new<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(slugs.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.0.contains(slug)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Read-only authorization context handed to screens at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthContext {
    pub permissions: PermissionSet,
    pub is_super_admin: bool,
}

impl AuthContext {
    pub fn new(permissions: PermissionSet, is_super_admin: bool) -> Self {
        Self {
            permissions,
            is_super_admin,
        }
    }

    /// `true` when the account holds any of `slugs`, or is a super admin.
    pub fn allows_any(&self, slugs: &[&str]) -> bool {
        self.is_super_admin || slugs.iter().any(|slug| self.permissions.contains(slug))
    }
}

impl From<PermissionsResponse> for AuthContext {
    fn from(response: PermissionsResponse) -> Self {
        Self {
            permissions: PermissionSet::new(
                response
                    .permissions
                    .into_iter()
                    .map(|entry| entry.slug)
                    .filter(|slug| !slug.trim().is_empty()),
            ),
            is_super_admin: response.is_super_admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TabId {
    Users,
    Admins,
    Testimonials,
    Packs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabDescriptor {
    pub id: TabId,
    pub label: &'static str,
    /// Any one of these grants the tab.
    #[serde(skip)]
    pub requires: &'static [&'static str],
}

/// Tabs of the management screen, in display order.
pub const TABS: &[TabDescriptor] = &[
    TabDescriptor {
        id: TabId::Users,
        label: "Users",
        requires: &["users.view", "users.manage"],
    },
    TabDescriptor {
        id: TabId::Admins,
        label: "Admins",
        requires: &["admins.view", "admins.manage"],
    },
    TabDescriptor {
        id: TabId::Testimonials,
        label: "Testimonials",
        requires: &["testimonials.moderate"],
    },
    TabDescriptor {
        id: TabId::Packs,
        label: "Packs",
        requires: &["packs.manage"],
    },
];

pub fn available_tabs(auth: &AuthContext) -> Vec<TabDescriptor> {
    TABS.iter()
        .filter(|tab| auth.allows_any(tab.requires))
        .copied()
        .collect()
}

/// What the management screen shows once permissions are known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum TabView {
    Tabs { tabs: Vec<TabDescriptor>, active: TabId },
    Unauthorized,
}

impl TabView {
    pub fn resolve(auth: &AuthContext) -> Self {
        let tabs = available_tabs(auth);
        match tabs.first() {
            Some(first) => Self::Tabs {
                active: first.id,
                tabs,
            },
            None => Self::Unauthorized,
        }
    }
}
