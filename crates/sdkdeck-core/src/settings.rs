use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_true")]
    pub confirm_actions: bool,

    #[serde(default = "default_true")]
    pub confirm_exit: bool,

    #[serde(default)]
    pub keep_downloads_available: bool,

    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,
}

fn default_true() -> bool {
    true
}

fn default_max_log_size_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            confirm_actions: true,
            confirm_exit: true,
            keep_downloads_available: false,
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        match settings_file() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Missing or unreadable files fall back to defaults; a present file
    /// that fails to parse does too, rather than refusing to start.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                log::warn!("settings file unreadable, using defaults: {err}");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// # Errors
    ///
    /// When the config directory cannot be resolved or written.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let path = settings_file()
            .ok_or_else(|| std::io::Error::other("config directory unavailable"))?;
        self.save_to(&path)
    }

    /// # Errors
    ///
    /// When the file or its parent directory cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn settings_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sdkdeck").join("settings.json"))
}
