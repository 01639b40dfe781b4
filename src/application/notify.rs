//! User-facing notifications raised by screen operations.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(6000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub text: String,
    #[serde(skip)]
    pub ttl: Duration,
}

impl Toast {
    pub fn success(text: impl Into<String>) -> Self {
        Self::with_ttl(ToastKind::Success, text, DEFAULT_TOAST_TTL)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::with_ttl(ToastKind::Error, text, DEFAULT_TOAST_TTL)
    }

    pub fn with_ttl(kind: ToastKind, text: impl Into<String>, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            text: text.into(),
            ttl,
        }
    }
}

/// Sink for toasts; rendering is up to the front end.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Keeps every toast until drained.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastQueue {
    pub fn drain(&self) -> Vec<Toast> {
        let mut guard = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *guard)
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}
