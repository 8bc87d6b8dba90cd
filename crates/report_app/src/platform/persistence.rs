use std::fs;
use std::path::{Path, PathBuf};

use report_core::Theme;
use report_engine::AtomicFileWriter;
use report_logging::{report_error, report_info, report_warn};
use serde::{Deserialize, Serialize};

const STATE_FILENAME: &str = ".report_viewer_state.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
enum PersistedTheme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedState {
    #[serde(default)]
    theme: PersistedTheme,
}

/// Reads the theme flag; anything unreadable falls back to the light theme.
pub(crate) fn load_theme(state_dir: &Path) -> Theme {
    let path = state_dir.join(STATE_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Theme::default();
        }
        Err(err) => {
            report_warn!("Failed to read persisted state from {:?}: {}", path, err);
            return Theme::default();
        }
    };

    let state: PersistedState = match ron::from_str(&content) {
        Ok(state) => state,
        Err(err) => {
            report_warn!("Failed to parse persisted state from {:?}: {}", path, err);
            return Theme::default();
        }
    };

    report_info!("Loaded persisted theme {:?} from {:?}", state.theme, path);
    match state.theme {
        PersistedTheme::Light => Theme::Light,
        PersistedTheme::Dark => Theme::Dark,
    }
}

pub(crate) fn save_theme(state_dir: &Path, theme: Theme) {
    let state = PersistedState {
        theme: match theme {
            Theme::Light => PersistedTheme::Light,
            Theme::Dark => PersistedTheme::Dark,
        },
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&state, pretty) {
        Ok(text) => text,
        Err(err) => {
            report_error!("Failed to serialize persisted state: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(PathBuf::from(state_dir));
    if let Err(err) = writer.write(STATE_FILENAME, &content) {
        report_error!("Failed to write persisted state to {:?}: {}", state_dir, err);
    }
}
