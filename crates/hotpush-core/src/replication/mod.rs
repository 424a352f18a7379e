//! Replication progress simulator
//!
//! After a bundle upload the CLI shows a timed animation of the bundle being
//! replicated region by region. Nothing here talks to a backend: every frame
//! is derived from wall-clock time elapsed against a fixed total duration.
//!
//! # Example
//!
//! ```rust,no_run
//! use hotpush_core::replication::{RecordingSink, ReplicationOptions, ReplicationProgress, TerminalCaps};
//! use std::time::Duration;
//!
//! async fn example() -> hotpush_core::Result<()> {
//!     let options = ReplicationOptions::default().with_total(Duration::from_secs(10));
//!     let mut sink = RecordingSink::default();
//!
//!     ReplicationProgress::new(options, TerminalCaps::detect())
//!         .run(&mut sink)
//!         .await?;
//!     Ok(())
//! }
//! ```

mod host;
mod options;
mod runner;
mod sink;
mod state;

pub use host::{Clock, TerminalCaps, TokioClock};
pub use options::{
    ReplicationOptions, DEFAULT_CANCELLED_MESSAGE, DEFAULT_COMPLETE_MESSAGE, DEFAULT_TITLE,
    DEFAULT_TOTAL, DEFAULT_UPDATE_INTERVAL,
};
pub use runner::{show_replication_progress, ReplicationProgress, RunOutcome, RunPhase};
pub use sink::{ProgressSink, RecordingSink, SinkEvent};
pub use state::{render_bar, ProgressState, BAR_WIDTH, EMPTY_GLYPH, FILLED_GLYPH};
