//! Numbered pagination state and the page-button window shown under tables.

use serde::Serialize;

/// Number of pages needed for `total` records, never less than one.
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    let pages = total.div_ceil(per_page).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Current position within a paginated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    current_page: u32,
    total_pages: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
        }
    }
}

impl PageState {
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Move to `target` when it lies in `1..=total_pages`; otherwise leave the
    /// state untouched and report `false`.
    pub fn go_to(&mut self, target: u32) -> bool {
        if target < 1 || target > self.total_pages {
            return false;
        }
        self.current_page = target;
        true
    }

    /// Adopt a freshly loaded page. Returns `true` when `loaded_page` was past
    /// the end and the current page had to be clamped.
    pub(crate) fn settle(&mut self, loaded_page: u32, total_pages: u32) -> bool {
        self.total_pages = total_pages.max(1);
        self.current_page = loaded_page.clamp(1, self.total_pages);
        self.current_page != loaded_page
    }

    pub fn window(&self) -> Vec<PageMarker> {
        page_window(self.current_page, self.total_pages)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageMarker {
    Page { number: u32, current: bool },
    Ellipsis,
}

/// Page buttons for `current` out of `total`: the first and last page, the
/// neighbours of the current page, and one ellipsis per skipped run.
pub fn page_window(current: u32, total: u32) -> Vec<PageMarker> {
    let total = total.max(1);
    let current = current.clamp(1, total);
    let mut markers = Vec::new();
    let mut previous = 0;

    for number in 1..=total {
        let visible = number == 1 || number == total || number.abs_diff(current) <= 1;
        if !visible {
            continue;
        }
        if number > previous + 1 {
            markers.push(PageMarker::Ellipsis);
        }
        markers.push(PageMarker::Page {
            number,
            current: number == current,
        });
        previous = number;
    }

    markers
}
