//! Configuration file loading and parsing

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

use super::types::{HotpushConfigFile, ReplicationSettings};

/// Configuration file names to search for
pub const CONFIG_FILE_NAMES: &[&str] = &["hotpush.yaml", "hotpush.yml"];

/// Loaded and validated hotpush configuration
#[derive(Debug, Clone, Default)]
pub struct HotpushConfig {
    /// The parsed configuration
    pub config: HotpushConfigFile,

    /// Path the configuration was read from; `None` when running on defaults
    pub config_path: Option<Utf8PathBuf>,
}

impl HotpushConfig {
    /// Load configuration from the specified path, or search for it from the
    /// current directory upwards.
    ///
    /// An explicit path must exist. Without one, a missing file means defaults.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_file(p),
            None => {
                let cwd = std::env::current_dir()?;
                let cwd = Utf8PathBuf::try_from(cwd).map_err(|_| {
                    Error::invalid_config("Current directory path is not valid UTF-8")
                })?;
                Self::discover(&cwd)
            }
        }
    }

    /// Search `start` and its parents for a configuration file
    pub fn discover(start: &Utf8Path) -> Result<Self> {
        match Self::find_config(start) {
            Some(path) => Self::load_file(&path),
            None => {
                tracing::debug!("No hotpush.yaml found from {}, using defaults", start);
                Ok(Self::default())
            }
        }
    }

    /// Load and validate a specific file
    pub fn load_file(path: &Utf8Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config_not_found(path.as_str())
            } else {
                Error::Io(e)
            }
        })?;

        let config: HotpushConfigFile = if content.trim().is_empty() {
            HotpushConfigFile::default()
        } else {
            serde_yaml_ng::from_str(&content)?
        };
        validate(&config)?;

        tracing::debug!("Loaded configuration from {}", path);
        Ok(Self {
            config,
            config_path: Some(path.to_owned()),
        })
    }

    fn find_config(start: &Utf8Path) -> Option<Utf8PathBuf> {
        let mut current = Some(start);

        while let Some(dir) = current {
            for name in CONFIG_FILE_NAMES {
                let path = dir.join(name);
                if path.is_file() {
                    return Some(path);
                }
            }
            current = dir.parent();
        }

        None
    }

    /// Get the inner configuration file
    pub fn inner(&self) -> &HotpushConfigFile {
        &self.config
    }

    pub fn replication(&self) -> &ReplicationSettings {
        &self.config.replication
    }

    pub fn app_version(&self) -> Option<&str> {
        self.config.app_version.as_deref()
    }

    pub fn prerelease_id(&self) -> &str {
        &self.config.prerelease_id
    }
}

fn validate(config: &HotpushConfigFile) -> Result<()> {
    if config.replication.update_interval_ms == 0 {
        return Err(Error::invalid_config(
            "replication.updateIntervalMs must be greater than zero",
        ));
    }

    if config.prerelease_id.trim().is_empty() {
        return Err(Error::invalid_config("prereleaseId must not be empty"));
    }

    if let Some(version) = &config.app_version {
        crate::versioning::parse_version(version)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_discover_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = HotpushConfig::discover(&utf8(&dir)).unwrap();
        assert!(config.config_path.is_none());
        assert_eq!(config.inner(), &HotpushConfigFile::default());
    }

    #[test]
    fn test_discover_searches_parents() {
        let dir = TempDir::new().unwrap();
        let root = utf8(&dir);
        fs::write(root.join("hotpush.yml"), "appVersion: 2.3.4\n").unwrap();
        let nested = root.join("app").join("ios");
        fs::create_dir_all(&nested).unwrap();

        let config = HotpushConfig::discover(&nested).unwrap();
        assert_eq!(config.app_version(), Some("2.3.4"));
        assert_eq!(config.config_path, Some(root.join("hotpush.yml")));
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = utf8(&dir).join("nope.yaml");
        let err = HotpushConfig::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let dir = TempDir::new().unwrap();
        let path = utf8(&dir).join("hotpush.yaml");
        fs::write(&path, "").unwrap();

        let config = HotpushConfig::load_file(&path).unwrap();
        assert_eq!(config.prerelease_id(), "beta");
    }

    #[test]
    fn test_zero_interval_rejected() {
        let dir = TempDir::new().unwrap();
        let path = utf8(&dir).join("hotpush.yaml");
        fs::write(&path, "replication:\n  updateIntervalMs: 0\n").unwrap();

        let err = HotpushConfig::load_file(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn test_invalid_app_version_rejected() {
        let dir = TempDir::new().unwrap();
        let path = utf8(&dir).join("hotpush.yaml");
        fs::write(&path, "appVersion: one-point-oh\n").unwrap();

        let err = HotpushConfig::load_file(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidVersion { .. }));
    }

    #[test]
    fn test_malformed_yaml() {
        let dir = TempDir::new().unwrap();
        let path = utf8(&dir).join("hotpush.yaml");
        fs::write(&path, "replication: [unterminated\n").unwrap();

        let err = HotpushConfig::load_file(&path).unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }
}
