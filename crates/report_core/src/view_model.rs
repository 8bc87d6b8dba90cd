use crate::{Column, ErrorBanner, Notice, SortDirection, Theme, UserRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusView {
    Ready,
    Loading,
    Error(ErrorBanner),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub column: Column,
    pub label: &'static str,
    /// Set only on the active sort column.
    pub sort: Option<SortDirection>,
}

impl HeaderView {
    pub fn indicator(&self) -> &'static str {
        match self.sort {
            None => "↕",
            Some(SortDirection::Ascending) => "↑",
            Some(SortDirection::Descending) => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnToggleView {
    pub column: Column,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerView {
    pub current: usize,
    pub total: usize,
    pub can_prev: bool,
    pub can_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub title: String,
    pub search_text: String,
    pub url_input: String,
    pub source_url: String,
    pub status: StatusView,
    pub show_table: bool,
    pub headers: Vec<HeaderView>,
    /// Records of the current page.
    pub rows: Vec<UserRecord>,
    /// Records matching the search, across all pages.
    pub total_count: usize,
    pub pager: PagerView,
    pub column_toggles: Vec<ColumnToggleView>,
    pub exporting: bool,
    pub notice: Option<Notice>,
    pub theme: Theme,
    pub dirty: bool,
}
