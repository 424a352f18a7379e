//! Timer-driven simulator loop
//!
//! A run moves through `Idle -> Running -> Done`. While running it owns two
//! timers: a repeating tick that re-renders the status line and a single-shot
//! deadline at the configured total duration. Leaving `Running` drops both
//! handles together, so no tick can fire after the run has resolved.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, Sleep};

use crate::error::Result;
use crate::regions::{get_ordered_regions, DeploymentRegion, SystemTimeZone, TimeZoneSource};

use super::host::{Clock, TerminalCaps, TokioClock};
use super::options::ReplicationOptions;
use super::sink::ProgressSink;
use super::state::ProgressState;

const REGION_SEPARATOR: &str = " → ";

/// Smallest tick cadence; a zero interval would spin.
const MIN_UPDATE_INTERVAL: Duration = Duration::from_millis(1);

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Non-interactive session, zero duration or empty catalog: nothing rendered
    Skipped,
    /// The full duration elapsed
    Completed,
    /// The caller's cancellation signal fired first
    Cancelled,
}

/// Observable phase of a `ReplicationProgress`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
    Done,
}

enum RunState {
    Idle,
    Running(Timers),
    Done,
}

enum TimerEvent {
    Tick,
    Deadline,
    Cancelled,
}

struct Timers {
    tick: Interval,
    deadline: Pin<Box<Sleep>>,
}

impl Timers {
    fn start(update_interval: Duration, total: Duration) -> Self {
        let period = update_interval.max(MIN_UPDATE_INTERVAL);
        // The first frame is rendered synchronously, so the first tick is one period out.
        let mut tick = tokio::time::interval_at(Instant::now() + period, period);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            tick,
            deadline: Box::pin(tokio::time::sleep(total)),
        }
    }

    async fn next<F>(&mut self, cancel: Pin<&mut F>) -> TimerEvent
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = &mut self.deadline => TimerEvent::Deadline,
            _ = cancel => TimerEvent::Cancelled,
            _ = self.tick.tick() => TimerEvent::Tick,
        }
    }
}

/// One replication progress animation.
pub struct ReplicationProgress {
    options: ReplicationOptions,
    caps: TerminalCaps,
    time_zone: Arc<dyn TimeZoneSource>,
    clock: Arc<dyn Clock>,
    state: RunState,
}

impl ReplicationProgress {
    /// Create a run using the host time zone and the tokio clock
    pub fn new(options: ReplicationOptions, caps: TerminalCaps) -> Self {
        Self {
            options,
            caps,
            time_zone: Arc::new(SystemTimeZone),
            clock: Arc::new(TokioClock),
            state: RunState::Idle,
        }
    }

    pub fn with_time_zone(mut self, time_zone: Arc<dyn TimeZoneSource>) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn options(&self) -> &ReplicationOptions {
        &self.options
    }

    pub fn phase(&self) -> RunPhase {
        match self.state {
            RunState::Idle => RunPhase::Idle,
            RunState::Running(_) => RunPhase::Running,
            RunState::Done => RunPhase::Done,
        }
    }

    /// Whether this run will render anything at all
    pub fn is_enabled(&self) -> bool {
        let interactive = self
            .options
            .interactive
            .unwrap_or_else(|| self.caps.is_interactive());
        interactive && !self.options.total.is_zero()
    }

    /// Run for the full configured duration.
    pub async fn run(&mut self, sink: &mut dyn ProgressSink) -> Result<RunOutcome> {
        self.run_until(sink, std::future::pending::<()>()).await
    }

    /// Run until the configured duration elapses or `cancel` completes,
    /// whichever happens first.
    ///
    /// A completed run finishes the spinner with the completion message; a
    /// cancelled one abandons it with the cancellation message.
    pub async fn run_until<F>(
        &mut self,
        sink: &mut dyn ProgressSink,
        cancel: F,
    ) -> Result<RunOutcome>
    where
        F: Future<Output = ()>,
    {
        if !matches!(self.state, RunState::Idle) {
            tracing::debug!("Replication progress already ran");
            return Ok(RunOutcome::Skipped);
        }

        if !self.is_enabled() {
            tracing::debug!(
                interactive = ?self.options.interactive,
                total_ms = self.options.total.as_millis() as u64,
                "Skipping replication progress"
            );
            self.state = RunState::Done;
            return Ok(RunOutcome::Skipped);
        }

        let regions = get_ordered_regions(self.time_zone.as_ref());
        if regions.is_empty() {
            self.state = RunState::Done;
            return Ok(RunOutcome::Skipped);
        }

        sink.print_line(&self.options.title)?;
        let labels: Vec<&str> = regions.iter().map(|r| r.label).collect();
        sink.print_line(&labels.join(REGION_SEPARATOR))?;
        sink.start(&self.options.title)?;

        tracing::debug!(
            regions = regions.len(),
            total_ms = self.options.total.as_millis() as u64,
            interval_ms = self.options.update_interval.as_millis() as u64,
            "Starting replication progress"
        );

        let started_at = self.clock.now();
        self.state = RunState::Running(Timers::start(
            self.options.update_interval,
            self.options.total,
        ));

        let result = self.drive(sink, cancel, started_at, &regions).await;
        self.state = RunState::Done;
        let outcome = result?;

        match outcome {
            RunOutcome::Cancelled => sink.abandon(&self.options.cancelled_message)?,
            _ => sink.finish(&self.options.complete_message)?,
        }
        tracing::debug!(?outcome, "Replication progress finished");
        Ok(outcome)
    }

    async fn drive<F>(
        &mut self,
        sink: &mut dyn ProgressSink,
        cancel: F,
        started_at: Instant,
        regions: &[DeploymentRegion],
    ) -> Result<RunOutcome>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(cancel);

        self.render(sink, started_at, regions)?;

        loop {
            match self.next_event(cancel.as_mut()).await {
                TimerEvent::Tick => self.render(sink, started_at, regions)?,
                TimerEvent::Deadline => return Ok(RunOutcome::Completed),
                TimerEvent::Cancelled => return Ok(RunOutcome::Cancelled),
            }
        }
    }

    async fn next_event<F>(&mut self, cancel: Pin<&mut F>) -> TimerEvent
    where
        F: Future<Output = ()>,
    {
        match &mut self.state {
            RunState::Running(timers) => timers.next(cancel).await,
            RunState::Idle | RunState::Done => TimerEvent::Deadline,
        }
    }

    fn render(
        &self,
        sink: &mut dyn ProgressSink,
        started_at: Instant,
        regions: &[DeploymentRegion],
    ) -> Result<()> {
        let elapsed = self.clock.now().saturating_duration_since(started_at);
        let state = ProgressState::at(elapsed, self.options.total, regions, false);
        tracing::trace!(
            completed = state.completed,
            percent = state.percent,
            "Replication tick"
        );
        sink.update(&state.status_line())?;
        Ok(())
    }
}

/// Show the replication progress animation for the full configured duration.
///
/// Resolves immediately, without output, when the session is not interactive
/// or the duration is zero.
pub async fn show_replication_progress(
    options: ReplicationOptions,
    caps: TerminalCaps,
    time_zone: Arc<dyn TimeZoneSource>,
    sink: &mut dyn ProgressSink,
) -> Result<()> {
    ReplicationProgress::new(options, caps)
        .with_time_zone(time_zone)
        .run(sink)
        .await
        .map(|_| ())
}
