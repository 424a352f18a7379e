//! CLI command implementations

pub mod bump;
pub mod completions;
pub mod regions;
pub mod replicate;
pub mod version;
