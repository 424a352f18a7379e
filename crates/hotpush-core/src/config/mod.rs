//! Configuration management (hotpush.yaml)

mod loader;
mod types;

pub use loader::{HotpushConfig, CONFIG_FILE_NAMES};
pub use types::{HotpushConfigFile, ReplicationSettings};
