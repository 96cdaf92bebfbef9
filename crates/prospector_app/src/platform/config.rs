//! App configuration, read from `prospector.ron` in the working directory.
//!
//! A missing file means defaults; a file that fails to parse logs a warning
//! and falls back to defaults rather than refusing to start.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use panel_logging::panel_warn;
use serde::Deserialize;

pub const CONFIG_FILENAME: &str = "prospector.ron";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base address of the scrape backend.
    pub api_base_url: String,
    /// Upper bound on URLs per submission.
    pub max_urls: usize,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Directory CSV exports are written into.
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            max_urls: 500,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            output_dir: PathBuf::from("output"),
        }
    }
}

impl AppConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn load(path: &Path) -> AppConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppConfig::default();
        }
        Err(err) => {
            panel_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => config,
        Err(err) => {
            panel_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load(&dir.path().join(CONFIG_FILENAME));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_unset_fields_at_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "(api_base_url: \"http://10.0.0.5:3000\", max_urls: 100)")
            .expect("write config");
        let config = load(&path);
        assert_eq!(config.api_base_url, "http://10.0.0.5:3000");
        assert_eq!(config.max_urls, 100);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn unparseable_file_falls_back_to_defaults() {
        panel_logging::initialize_for_tests();
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "not ron at all").expect("write config");
        assert_eq!(load(&path), AppConfig::default());
    }
}
