//! Report core: pure state machine, record pipeline and view-model helpers.
mod effect;
mod msg;
mod pipeline;
mod record;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{LoadFailure, Msg};
pub use pipeline::{derive_page, sorted_view, PageSlice, DEFAULT_PAGE_SIZE};
pub use record::{Column, SortDirection, Theme, UserRecord, PLACEHOLDER};
pub use state::{
    AppState, ErrorBanner, Notice, RequestId, ViewSettings, ViewState, DEFAULT_SOURCE_URL,
    DEFAULT_TITLE,
};
pub use update::update;
pub use view_model::{AppViewModel, ColumnToggleView, HeaderView, PagerView, StatusView};
