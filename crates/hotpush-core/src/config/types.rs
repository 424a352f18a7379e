//! Configuration types for hotpush.yaml

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::replication::{
    ReplicationOptions, DEFAULT_CANCELLED_MESSAGE, DEFAULT_COMPLETE_MESSAGE, DEFAULT_TITLE,
    DEFAULT_TOTAL, DEFAULT_UPDATE_INTERVAL,
};
use crate::versioning::DEFAULT_PREID;

/// Root hotpush.yaml configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotpushConfigFile {
    /// Current app version, used as the default for `hotpush bump`
    #[serde(default)]
    pub app_version: Option<String>,

    /// Identifier for prerelease bumps
    #[serde(default = "default_prerelease_id")]
    pub prerelease_id: String,

    /// Replication progress display
    #[serde(default)]
    pub replication: ReplicationSettings,
}

impl Default for HotpushConfigFile {
    fn default() -> Self {
        Self {
            app_version: None,
            prerelease_id: default_prerelease_id(),
            replication: ReplicationSettings::default(),
        }
    }
}

/// Replication progress settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationSettings {
    /// Simulated duration in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,

    /// Re-render cadence in milliseconds
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_complete_message")]
    pub complete_message: String,

    #[serde(default = "default_cancelled_message")]
    pub cancelled_message: String,

    /// IANA time zone used instead of the host's when ordering regions
    #[serde(default)]
    pub timezone: Option<String>,

    /// Force the animation on or off instead of detecting a terminal
    #[serde(default)]
    pub interactive: Option<bool>,
}

impl Default for ReplicationSettings {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            update_interval_ms: default_update_interval_ms(),
            title: default_title(),
            complete_message: default_complete_message(),
            cancelled_message: default_cancelled_message(),
            timezone: None,
            interactive: None,
        }
    }
}

impl ReplicationSettings {
    /// Convert to simulator options
    pub fn to_options(&self) -> ReplicationOptions {
        ReplicationOptions {
            interactive: self.interactive,
            total: Duration::from_millis(self.duration_ms),
            update_interval: Duration::from_millis(self.update_interval_ms),
            title: self.title.clone(),
            complete_message: self.complete_message.clone(),
            cancelled_message: self.cancelled_message.clone(),
        }
    }
}

fn default_prerelease_id() -> String {
    DEFAULT_PREID.to_string()
}

fn default_duration_ms() -> u64 {
    DEFAULT_TOTAL.as_millis() as u64
}

fn default_update_interval_ms() -> u64 {
    DEFAULT_UPDATE_INTERVAL.as_millis() as u64
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_complete_message() -> String {
    DEFAULT_COMPLETE_MESSAGE.to_string()
}

fn default_cancelled_message() -> String {
    DEFAULT_CANCELLED_MESSAGE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: HotpushConfigFile = serde_yaml_ng::from_str("{}").unwrap();
        assert_eq!(config, HotpushConfigFile::default());
        assert_eq!(config.replication.to_options(), ReplicationOptions::default());
    }

    #[test]
    fn test_partial_replication_section() {
        let yaml = "replication:\n  durationMs: 15000\n  timezone: Asia/Tokyo\n";
        let config: HotpushConfigFile = serde_yaml_ng::from_str(yaml).unwrap();

        let options = config.replication.to_options();
        assert_eq!(options.total, Duration::from_secs(15));
        assert_eq!(options.update_interval, DEFAULT_UPDATE_INTERVAL);
        assert_eq!(config.replication.timezone.as_deref(), Some("Asia/Tokyo"));
    }
}
