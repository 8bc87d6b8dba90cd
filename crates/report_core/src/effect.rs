use crate::{Column, RequestId, Theme, UserRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the record set; any fetch still in flight must be cancelled first.
    FetchRecords { request_id: RequestId, url: String },
    /// Compose and write a PDF of `records` projected onto `columns`.
    ExportPdf {
        records: Vec<UserRecord>,
        columns: Vec<Column>,
    },
    /// Write the theme flag to the state file.
    PersistTheme(Theme),
}
