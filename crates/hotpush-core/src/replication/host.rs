//! Ambient host state injected into the simulator: time and terminal attachment

use console::Term;
use tokio::time::Instant;

/// Source of the current time.
///
/// Based on `tokio::time::Instant` so tests running with paused time see a
/// deterministic clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The tokio runtime clock
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Whether the standard streams are attached to a terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCaps {
    pub stdout_is_tty: bool,
    pub stderr_is_tty: bool,
}

impl TerminalCaps {
    /// Probe the current process' stdout and stderr
    pub fn detect() -> Self {
        Self {
            stdout_is_tty: Term::stdout().is_term(),
            stderr_is_tty: Term::stderr().is_term(),
        }
    }

    /// Both streams attached, as in a developer's shell
    pub fn attended() -> Self {
        Self {
            stdout_is_tty: true,
            stderr_is_tty: true,
        }
    }

    /// Neither stream attached, as in CI or a pipe
    pub fn unattended() -> Self {
        Self {
            stdout_is_tty: false,
            stderr_is_tty: false,
        }
    }

    /// True only if both stdout and stderr are terminals
    pub fn is_interactive(&self) -> bool {
        self.stdout_is_tty && self.stderr_is_tty
    }
}
