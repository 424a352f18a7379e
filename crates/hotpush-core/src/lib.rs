//! # hotpush-core
//!
//! Core library for the hotpush CLI providing:
//! - The deployment region catalog and time-zone based ordering
//! - The replication progress simulator shown after a bundle upload
//! - Semver bump helpers for app versions
//! - Configuration file parsing (hotpush.yaml)

pub mod config;
pub mod error;
pub mod regions;
pub mod replication;
pub mod versioning;

pub use config::{HotpushConfig, ReplicationSettings};
pub use error::{Error, Result};
pub use regions::{
    get_ordered_regions, ordered_regions, DeploymentRegion, FixedTimeZone, SystemTimeZone,
    TimeZoneSource, REGION_CATALOG,
};
pub use replication::{
    show_replication_progress, ProgressSink, ProgressState, ReplicationOptions,
    ReplicationProgress, TerminalCaps,
};
pub use versioning::{bump_candidates, next_version, parse_version, BumpKind};
