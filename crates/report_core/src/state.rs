use crate::pipeline::{derive_page, sorted_view, total_pages, DEFAULT_PAGE_SIZE};
use crate::view_model::{AppViewModel, ColumnToggleView, HeaderView, PagerView, StatusView};
use crate::{Column, SortDirection, Theme, UserRecord};

pub type RequestId = u64;

pub const DEFAULT_SOURCE_URL: &str = "https://jsonplaceholder.typicode.com/users";
pub const DEFAULT_TITLE: &str = "Отчёт по пользователям";

const LOAD_FAILED_TEXT: &str = "Не удалось загрузить данные по указанному API.";

/// UI-chosen parameters controlling which slice of the records is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search_text: String,
    pub sort_key: Column,
    pub sort_direction: SortDirection,
    /// Export columns, in the order they were selected.
    pub selected_columns: Vec<Column>,
    /// 1-based.
    pub current_page: usize,
    /// Endpoint of the active record set (not the pending input).
    pub source_url: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            sort_key: Column::Name,
            sort_direction: SortDirection::Ascending,
            selected_columns: Column::ALL.to_vec(),
            current_page: 1,
            source_url: DEFAULT_SOURCE_URL.to_string(),
        }
    }
}

/// Startup settings for [`AppState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    /// Heading shown above the table; also the PDF report title.
    pub title: String,
    pub source_url: String,
    pub page_size: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub message: String,
    pub detail: String,
}

/// Outcome of the last export, shown until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ExportWritten(String),
    ExportFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    title: String,
    records: Vec<UserRecord>,
    view: ViewState,
    url_input: String,
    page_size: usize,
    loading: bool,
    error: Option<ErrorBanner>,
    active_request: Option<RequestId>,
    next_request_id: RequestId,
    exporting: bool,
    notice: Option<Notice>,
    theme: Theme,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(ViewSettings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ViewSettings) -> Self {
        let view = ViewState {
            source_url: settings.source_url.clone(),
            ..ViewState::default()
        };
        Self {
            title: settings.title,
            records: Vec::new(),
            view,
            url_input: settings.source_url,
            page_size: settings.page_size.max(1),
            loading: false,
            error: None,
            active_request: None,
            next_request_id: 1,
            exporting: false,
            notice: None,
            theme: Theme::default(),
            dirty: false,
        }
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ErrorBanner> {
        self.error.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn view(&self) -> AppViewModel {
        let page = derive_page(&self.records, &self.view, self.page_size);
        let status = if self.loading {
            StatusView::Loading
        } else if let Some(error) = &self.error {
            StatusView::Error(error.clone())
        } else {
            StatusView::Ready
        };
        let headers = Column::ALL
            .iter()
            .map(|&column| HeaderView {
                column,
                label: column.label(),
                sort: (column == self.view.sort_key).then_some(self.view.sort_direction),
            })
            .collect();
        let column_toggles = Column::ALL
            .iter()
            .map(|&column| ColumnToggleView {
                column,
                label: column.label(),
                selected: self.view.selected_columns.contains(&column),
            })
            .collect();
        let current = self.view.current_page;

        AppViewModel {
            title: self.title.clone(),
            search_text: self.view.search_text.clone(),
            url_input: self.url_input.clone(),
            source_url: self.view.source_url.clone(),
            // The table stays hidden while loading or while the error banner is up.
            show_table: matches!(status, StatusView::Ready),
            status,
            headers,
            rows: page.records,
            total_count: page.total_count,
            pager: PagerView {
                current,
                total: page.total_pages,
                can_prev: current > 1,
                can_next: current < page.total_pages,
            },
            column_toggles,
            exporting: self.exporting,
            notice: self.notice.clone(),
            theme: self.theme,
            dirty: self.dirty,
        }
    }

    /// Returns and clears the dirty flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn total_pages(&self) -> usize {
        let count = sorted_view(&self.records, &self.view).len();
        total_pages(count, self.page_size)
    }

    pub(crate) fn set_search_text(&mut self, text: String) -> bool {
        if self.view.search_text == text {
            return false;
        }
        self.view.search_text = text;
        self.view.current_page = 1;
        true
    }

    pub(crate) fn set_url_input(&mut self, text: String) -> bool {
        if self.url_input == text {
            return false;
        }
        self.url_input = text;
        true
    }

    /// Makes the trimmed URL input the active source. Returns the URL to fetch.
    pub(crate) fn activate_url_input(&mut self) -> Option<String> {
        let url = self.url_input.trim().to_string();
        if url.is_empty() {
            return None;
        }
        self.url_input = url.clone();
        self.view.source_url = url.clone();
        Some(url)
    }

    pub(crate) fn begin_fetch(&mut self) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.active_request = Some(request_id);
        self.loading = true;
        self.error = None;
        request_id
    }

    /// Applies a fetch result. Returns false when the result is stale.
    pub(crate) fn apply_loaded(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<UserRecord>, crate::LoadFailure>,
    ) -> bool {
        if self.active_request != Some(request_id) {
            return false;
        }
        match result {
            Ok(records) => {
                self.records = records;
                self.view.current_page = 1;
                self.error = None;
            }
            Err(crate::LoadFailure::Cancelled) => {}
            Err(crate::LoadFailure::Failed(detail)) => {
                self.error = Some(ErrorBanner {
                    message: LOAD_FAILED_TEXT.to_string(),
                    detail,
                });
            }
        }
        self.active_request = None;
        self.loading = false;
        true
    }

    pub(crate) fn toggle_sort(&mut self, column: Column) {
        if self.view.sort_key == column {
            self.view.sort_direction = self.view.sort_direction.flipped();
        } else {
            self.view.sort_key = column;
            self.view.sort_direction = SortDirection::Ascending;
        }
        self.view.current_page = 1;
    }

    /// Moves to `page` clamped to the valid range. Returns true when the page changed.
    pub(crate) fn go_to_page(&mut self, page: usize) -> bool {
        let clamped = page.clamp(1, self.total_pages());
        if clamped == self.view.current_page {
            return false;
        }
        self.view.current_page = clamped;
        true
    }

    pub(crate) fn toggle_column(&mut self, column: Column) {
        let columns = &mut self.view.selected_columns;
        if let Some(pos) = columns.iter().position(|c| *c == column) {
            columns.remove(pos);
        } else {
            columns.push(column);
        }
    }

    pub(crate) fn is_exporting(&self) -> bool {
        self.exporting
    }

    pub(crate) fn begin_export(&mut self) -> (Vec<UserRecord>, Vec<Column>) {
        self.exporting = true;
        self.notice = None;
        (
            sorted_view(&self.records, &self.view),
            self.view.selected_columns.clone(),
        )
    }

    pub(crate) fn finish_export(&mut self, result: Result<String, String>) {
        self.exporting = false;
        self.notice = Some(match result {
            Ok(filename) => Notice::ExportWritten(filename),
            Err(reason) => Notice::ExportFailed(reason),
        });
    }

    pub(crate) fn dismiss_notice(&mut self) -> bool {
        let had_notice = self.notice.take().is_some();
        let had_error = self.error.take().is_some();
        had_notice || had_error
    }

    pub(crate) fn set_theme(&mut self, theme: Theme) -> bool {
        if self.theme == theme {
            return false;
        }
        self.theme = theme;
        true
    }
}
