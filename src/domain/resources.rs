//! Catalogue of administrable collections and the writes each one accepts.

use std::fmt;

use serde::Serialize;

/// Kind of write a screen can issue against a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Approve,
    Reject,
    Feature,
    Unfeature,
    Delete,
    Update,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Feature => "feature",
            Self::Unfeature => "unfeature",
            Self::Delete => "delete",
            Self::Update => "update",
        }
    }

    /// Toast text used when the server acknowledges without a message.
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Approve => "Approved successfully",
            Self::Reject => "Rejected successfully",
            Self::Feature => "Marked as featured",
            Self::Unfeature => "Removed from featured",
            Self::Delete => "Deleted successfully",
            Self::Update => "Updated successfully",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderation actions addressed as `POST <collection>/<id>/<action>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAction {
    Approve,
    Reject,
    Feature,
    Unfeature,
}

impl RecordAction {
    pub fn path_segment(self) -> &'static str {
        self.kind().as_str()
    }

    pub fn kind(self) -> ActionKind {
        match self {
            Self::Approve => ActionKind::Approve,
            Self::Reject => ActionKind::Reject,
            Self::Feature => ActionKind::Feature,
            Self::Unfeature => ActionKind::Unfeature,
        }
    }
}

/// Remote collection a controller browses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    path: String,
    key: String,
    actions: &'static [ActionKind],
}

impl Collection {
    /// Collection at `path`; the list envelope key is its last path segment.
    pub fn new(path: impl Into<String>, actions: &'static [ActionKind]) -> Self {
        let path = path.into().trim_matches('/').to_string();
        let key = path.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            path,
            key,
            actions,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn supports(&self, action: ActionKind) -> bool {
        self.actions.contains(&action)
    }
}

const TESTIMONIAL_ACTIONS: &[ActionKind] = &[
    ActionKind::Approve,
    ActionKind::Reject,
    ActionKind::Feature,
    ActionKind::Unfeature,
    ActionKind::Delete,
];
const PACK_ACTIONS: &[ActionKind] = &[ActionKind::Update, ActionKind::Delete];
const MEMBER_ACTIONS: &[ActionKind] = &[ActionKind::Update, ActionKind::Delete];

/// Collections known to the admin screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Testimonials,
    Packs,
    Users,
    Admins,
}

impl ResourceKind {
    pub fn path(self) -> &'static str {
        match self {
            Self::Testimonials => "testimonials",
            Self::Packs => "packs",
            Self::Users => "users",
            Self::Admins => "admins",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Testimonials => "Testimonials",
            Self::Packs => "Packs",
            Self::Users => "Users",
            Self::Admins => "Admins",
        }
    }

    pub fn collection(self) -> Collection {
        match self {
            Self::Testimonials => Collection::new(self.path(), TESTIMONIAL_ACTIONS),
            Self::Packs => Collection::new(self.path(), PACK_ACTIONS),
            Self::Users | Self::Admins => Collection::new(self.path(), MEMBER_ACTIONS),
        }
    }
}
