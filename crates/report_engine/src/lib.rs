//! Report engine: record fetching, asset loading and PDF export.
mod assets;
mod engine;
mod export;
mod fetch;
mod filename;
mod normalize;
mod persist;
mod types;

pub use assets::{AssetBase, AssetError, AssetLoader};
pub use engine::{EngineHandle, FetchSlot};
pub use export::{
    compose_report, export_report, load_assets, ExportError, ExportSettings, FontFallback,
    ReportAssets, ReportFont, ReportOptions, DEFAULT_FONT_PATH, DEFAULT_LOGO_PATH,
    DEFAULT_REPORT_TITLE,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::report_filename;
pub use normalize::{normalize_payload, normalize_value, NormalizeError};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{EngineEvent, ExportSummary, FailureKind, FetchError};
