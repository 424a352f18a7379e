//! Simulator configuration

use std::time::Duration;

/// Default simulated duration
pub const DEFAULT_TOTAL: Duration = Duration::from_secs(60);

/// Default re-render cadence
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_millis(1000);

/// Default title, printed once and used as the initial spinner label
pub const DEFAULT_TITLE: &str = "Replicating bundle to edge regions...";

/// Default message shown when the simulated duration elapses
pub const DEFAULT_COMPLETE_MESSAGE: &str = "Bundle replicated to all regions";

/// Default message shown when the caller cancels a run
pub const DEFAULT_CANCELLED_MESSAGE: &str = "Replication progress interrupted";

/// Options for one replication progress run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicationOptions {
    /// Force interactive rendering on or off.
    ///
    /// `None` detects it: interactive only when stdout and stderr are both terminals.
    pub interactive: Option<bool>,

    /// Total simulated duration. Zero skips the animation.
    pub total: Duration,

    /// Tick cadence for re-rendering the status line
    pub update_interval: Duration,

    /// Title line
    pub title: String,

    /// Final spinner message
    pub complete_message: String,

    /// Spinner message left behind when the run is cancelled
    pub cancelled_message: String,
}

impl Default for ReplicationOptions {
    fn default() -> Self {
        Self {
            interactive: None,
            total: DEFAULT_TOTAL,
            update_interval: DEFAULT_UPDATE_INTERVAL,
            title: DEFAULT_TITLE.to_string(),
            complete_message: DEFAULT_COMPLETE_MESSAGE.to_string(),
            cancelled_message: DEFAULT_CANCELLED_MESSAGE.to_string(),
        }
    }
}

impl ReplicationOptions {
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = Some(interactive);
        self
    }

    pub fn with_total(mut self, total: Duration) -> Self {
        self.total = total;
        self
    }

    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_complete_message(mut self, message: impl Into<String>) -> Self {
        self.complete_message = message.into();
        self
    }

    pub fn with_cancelled_message(mut self, message: impl Into<String>) -> Self {
        self.cancelled_message = message.into();
        self
    }
}
