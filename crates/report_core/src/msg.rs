use crate::{Column, RequestId, Theme, UserRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application finished starting up; loads the initial source.
    AppStarted,
    /// User edited the search box.
    SearchChanged(String),
    /// User edited the URL input box. Does not fetch.
    UrlInputChanged(String),
    /// User submitted the URL input.
    UrlSubmitted,
    /// User asked to reload the active source.
    RefreshRequested,
    /// User clicked a column header.
    SortToggled(Column),
    /// Jump to a page (clamped to the valid range).
    PageChanged(usize),
    NextPage,
    PrevPage,
    /// User toggled a column checkbox of the export selection.
    ColumnToggled(Column),
    /// User clicked the export button.
    ExportClicked,
    ThemeToggled,
    /// Theme read from persisted state at startup.
    ThemeRestored(Theme),
    /// Engine finished a fetch.
    RecordsLoaded {
        request_id: RequestId,
        result: Result<Vec<UserRecord>, LoadFailure>,
    },
    /// Engine finished an export: written filename, or a failure description.
    ExportFinished(Result<String, String>),
    /// User dismissed the error banner or export notice.
    DismissNotice,
}

/// Why a fetch produced no records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    /// Superseded by a newer fetch. Never shown to the user.
    Cancelled,
    /// Any other failure, with a short reason for the banner.
    Failed(String),
}
