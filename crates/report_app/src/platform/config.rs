//! Application configuration, read from a RON file.
//!
//! Every field has a default, so the file may list only what it overrides:
//!
//! ```ron
//! (
//!     source_url: "https://dummyjson.com/users",
//!     asset_base: "https://reports.example.com/static",
//!     font_fallback: Builtin,
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use log::LevelFilter;
use report_core::{ViewSettings, DEFAULT_PAGE_SIZE, DEFAULT_SOURCE_URL};
use report_engine::{
    ExportSettings, FetchSettings, FontFallback, DEFAULT_FONT_PATH, DEFAULT_LOGO_PATH,
    DEFAULT_REPORT_TITLE,
};
use report_logging::{report_info, LogDestination};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "report_viewer.ron";
pub const CONFIG_ENV_VAR: &str = "REPORT_VIEWER_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FontFallbackSetting {
    #[default]
    Fail,
    Builtin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogDestinationSetting {
    #[default]
    File,
    Terminal,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevelSetting {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source_url: String,
    pub page_size: usize,
    /// Directory path or `http(s)://` URL the font and logo are loaded from.
    /// Relative paths resolve against the working directory; the default
    /// `assets` is the directory at the workspace root that ships
    /// `fonts/DejaVuSans.ttf`.
    pub asset_base: String,
    pub font_path: String,
    pub logo_path: Option<String>,
    pub font_fallback: FontFallbackSetting,
    pub report_title: String,
    pub output_dir: PathBuf,
    pub state_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub log_destination: LogDestinationSetting,
    pub log_file: PathBuf,
    pub log_level: LogLevelSetting,
    pub event_poll_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            asset_base: "assets".to_string(),
            font_path: DEFAULT_FONT_PATH.to_string(),
            logo_path: Some(DEFAULT_LOGO_PATH.to_string()),
            font_fallback: FontFallbackSetting::Fail,
            report_title: DEFAULT_REPORT_TITLE.to_string(),
            output_dir: PathBuf::from("output"),
            state_dir: PathBuf::from("."),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_response_bytes: fetch.max_bytes,
            log_destination: LogDestinationSetting::File,
            log_file: PathBuf::from("report_viewer.log"),
            log_level: LogLevelSetting::Info,
            event_poll_ms: 100,
        }
    }
}

impl AppConfig {
    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            title: self.report_title.clone(),
            source_url: self.source_url.clone(),
            page_size: self.page_size.max(1),
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
            ..FetchSettings::default()
        }
    }

    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            title: self.report_title.clone(),
            font_path: self.font_path.clone(),
            logo_path: self.logo_path.clone(),
            font_fallback: match self.font_fallback {
                FontFallbackSetting::Fail => FontFallback::Fail,
                FontFallbackSetting::Builtin => FontFallback::Builtin,
            },
            output_dir: self.output_dir.clone(),
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        match self.log_destination {
            LogDestinationSetting::File => LogDestination::File,
            LogDestinationSetting::Terminal => LogDestination::Terminal,
            LogDestinationSetting::Both => LogDestination::Both,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.log_level {
            LogLevelSetting::Off => LevelFilter::Off,
            LogLevelSetting::Error => LevelFilter::Error,
            LogLevelSetting::Warn => LevelFilter::Warn,
            LogLevelSetting::Info => LevelFilter::Info,
            LogLevelSetting::Debug => LevelFilter::Debug,
            LogLevelSetting::Trace => LevelFilter::Trace,
        }
    }
}

/// `$REPORT_VIEWER_CONFIG` if set, else `./report_viewer.ron`.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
}

/// Loads the configuration; a missing file means defaults.
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading config {}", path.display()));
        }
    };
    let config: AppConfig =
        ron::from_str(&content).with_context(|| format!("parsing config {}", path.display()))?;
    report_info!("Loaded config from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = load_config(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn partial_file_overrides_only_listed_fields() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(source_url: "https://dummyjson.com/users", page_size: 10, font_fallback: Builtin)"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.source_url, "https://dummyjson.com/users");
        assert_eq!(config.view_settings().page_size, 10);
        assert_eq!(config.export_settings().font_fallback, FontFallback::Builtin);
        assert_eq!(config.asset_base, "assets");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(page_size: \"many\")").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let config = AppConfig {
            page_size: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.view_settings().page_size, 1);
    }

    #[test]
    fn default_font_resolves_inside_shipped_assets() {
        let config = AppConfig::default();
        let workspace = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
        let font = workspace.join(&config.asset_base).join(&config.font_path);
        assert!(font.is_file(), "missing {}", font.display());
    }

    #[test]
    fn report_title_reaches_screen_and_pdf() {
        let config = AppConfig {
            report_title: "Сотрудники".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.view_settings().title, "Сотрудники");
        assert_eq!(config.export_settings().title, "Сотрудники");
        let state = report_core::AppState::with_settings(config.view_settings());
        assert_eq!(state.view().title, "Сотрудники");
    }
}
