//! services/client/src/adapters/theme_file.rs
//!
//! A `ThemeStore` backed by a small JSON file, the terminal's stand-in for the
//! browser's local storage.

use cinesphere_core::domain::Theme;
use cinesphere_core::ports::{PortError, PortResult, ThemeStore};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Serialize, Deserialize)]
struct ThemeFile {
    theme: String,
}

pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> PortResult<Option<Theme>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PortError::Unexpected(e.to_string())),
        };
        let file: ThemeFile = serde_json::from_str(&raw)
            .map_err(|e| PortError::Unexpected(format!("Corrupt theme file: {}", e)))?;
        // Unknown values are treated as "nothing stored".
        Ok(Theme::parse(&file.theme))
    }

    fn save(&self, theme: Theme) -> PortResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PortError::Unexpected(e.to_string()))?;
        }
        let body = serde_json::to_string(&ThemeFile { theme: theme.as_str().to_string() })
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        std::fs::write(&self.path, body).map_err(|e| PortError::Unexpected(e.to_string()))
    }
}
