//! Logger setup for the report viewer binary.
//!
//! Writes to `./report_viewer.log` by default: the terminal belongs to the UI.

use report_logging::report_info;

use super::config::AppConfig;

pub fn initialize(config: &AppConfig) {
    report_logging::initialize(config.log_destination(), config.log_level(), &config.log_file);
    report_info!(
        "report_viewer {} starting, source={}",
        env!("CARGO_PKG_VERSION"),
        config.source_url
    );
}
