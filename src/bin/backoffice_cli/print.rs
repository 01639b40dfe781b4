#![deny(clippy::all, clippy::pedantic)]

use std::collections::BTreeMap;
use std::fmt::Write;

use backoffice::application::controller::AdminResourceController;
use backoffice::application::notify::{Notifier, Toast};
use backoffice::domain::pagination::PageMarker;
use backoffice::domain::records::ResourceRecord;
use serde::Serialize;

use crate::client::CliError;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Output(format!("failed to render output: {e}")))?;
    println!("{out}");
    Ok(())
}

/// Writes toasts to stderr as they are raised so stdout stays JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, toast: Toast) {
        eprintln!("{}: {}", toast.kind.as_str(), toast.text);
    }
}

/// `1 … 4 [5] 6 … 10`
#[must_use]
pub fn render_window(markers: &[PageMarker]) -> String {
    let mut out = String::new();
    for marker in markers {
        if !out.is_empty() {
            out.push(' ');
        }
        match marker {
            PageMarker::Page {
                number,
                current: true,
            } => {
                let _ = write!(out, "[{number}]");
            }
            PageMarker::Page { number, .. } => {
                let _ = write!(out, "{number}");
            }
            PageMarker::Ellipsis => out.push('…'),
        }
    }
    out
}

#[derive(Debug, Serialize)]
pub struct ListView<'a> {
    pub collection: &'a str,
    pub filters: BTreeMap<&'a str, &'a str>,
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
    pub per_page: u32,
    pub pages: String,
    pub records: &'a [ResourceRecord],
}

impl<'a> ListView<'a> {
    #[must_use]
    pub fn of(controller: &'a AdminResourceController) -> Self {
        let page = controller.page();
        Self {
            collection: controller.collection().path(),
            filters: controller.filters().active().collect(),
            page: controller.page_state().current_page(),
            total_pages: page.total_pages,
            total: page.total,
            per_page: page.per_page,
            pages: render_window(&controller.page_window()),
            records: &page.records,
        }
    }
}
