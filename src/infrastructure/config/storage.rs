//! TOML configuration file on disk.

use super::app_config::AppConfig;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration directory for this platform")]
    NoConfigDir,
    #[error("config file io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config encoding: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Location of the configuration file.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    /// Uses `path` when given, otherwise the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` when no path is given and the
    /// platform has no config directory.
    pub fn locate(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => AppConfig::default_config_path().ok_or(ConfigError::NoConfigDir)?,
        };
        Ok(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration.
    ///
    /// A missing file is written with the defaults. A file that does not
    /// parse is kept as is and the defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the defaults cannot be written.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "Writing default config");
            let config = AppConfig::default();
            self.write(&config)?;
            return Ok(config);
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Config does not parse, using defaults");
            AppConfig::default()
        }))
    }

    fn write(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config)?;
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut staged = tempfile::NamedTempFile::new_in(dir)?;
        staged.write_all(content.as_bytes())?;
        staged.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_written_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let file = ConfigFile::locate(Some(&path)).unwrap();

        let config = file.load().unwrap();

        assert_eq!(config.api.timeout_secs, 30);
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("base_url"));
    }

    #[test]
    fn test_malformed_file_is_left_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "invalid_toml = [").unwrap();

        let config = ConfigFile::locate(Some(&path)).unwrap().load().unwrap();

        assert_eq!(config.api.base_url, AppConfig::default().api.base_url);
        assert_eq!(fs::read_to_string(&path).unwrap(), "invalid_toml = [");
    }

    #[test]
    fn test_reads_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[theme]\naccent_color = \"Green\"\n").unwrap();

        let file = ConfigFile::locate(Some(&path)).unwrap();
        let config = file.load().unwrap();

        assert_eq!(file.path(), path.as_path());
        assert_eq!(config.theme.accent_color, "Green");
        assert_eq!(config.api.timeout_secs, 30);
    }
}
