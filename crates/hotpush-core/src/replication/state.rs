//! Per-tick display state, derived purely from elapsed time

use std::time::Duration;

use crate::regions::DeploymentRegion;

/// Width of the progress bar in glyphs
pub const BAR_WIDTH: usize = 20;

pub const FILLED_GLYPH: char = '█';
pub const EMPTY_GLYPH: char = '░';

const FINALIZING: &str = "Finalizing";
const COMPLETE: &str = "Complete";

/// Snapshot of the simulated rollout at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    /// Regions reported as updated
    pub completed: usize,

    /// Size of the region ordering
    pub total_regions: usize,

    /// 0..=100
    pub percent: u8,

    /// Rendered bar, always `BAR_WIDTH` glyphs
    pub bar: String,

    /// Whole seconds left, rounded up
    pub remaining_secs: u64,

    /// Label of the next region, or "Finalizing"/"Complete" past the last one
    pub next_region_label: String,
}

impl ProgressState {
    /// Compute the display state for `elapsed` out of `total`.
    ///
    /// `finished` selects the label shown once every region is counted:
    /// "Complete" after the run resolved, "Finalizing" while it is still going.
    pub fn at(
        elapsed: Duration,
        total: Duration,
        regions: &[DeploymentRegion],
        finished: bool,
    ) -> Self {
        let total_regions = regions.len();
        let total_ms = total.as_millis() as f64;
        let elapsed_ms = elapsed.as_millis() as f64;

        let (completed, percent) = if total_ms > 0.0 {
            let clamped = elapsed_ms.min(total_ms);
            let completed = ((clamped / total_ms) * total_regions as f64).floor() as usize;
            let percent = ((elapsed_ms / total_ms) * 100.0).round().clamp(0.0, 100.0) as u8;
            (completed.min(total_regions), percent)
        } else {
            (total_regions, 100)
        };

        let remaining = total.saturating_sub(elapsed);
        let remaining_secs = remaining.as_millis().div_ceil(1000) as u64;

        let next_region_label = match regions.get(completed) {
            Some(region) => region.label.to_string(),
            None if finished => COMPLETE.to_string(),
            None => FINALIZING.to_string(),
        };

        Self {
            completed,
            total_regions,
            percent,
            bar: render_bar(percent),
            remaining_secs,
            next_region_label,
        }
    }

    /// True once every region has been counted
    pub fn is_complete(&self) -> bool {
        self.completed >= self.total_regions
    }

    /// The single status line shown next to the spinner
    pub fn status_line(&self) -> String {
        format!(
            "{}/{} regions updated • {}s left • {} • Next: {}",
            self.completed,
            self.total_regions,
            self.remaining_secs,
            self.bar,
            self.next_region_label
        )
    }
}

/// Render a `BAR_WIDTH` glyph bar for `percent` (values above 100 are capped).
pub fn render_bar(percent: u8) -> String {
    let percent = percent.min(100);
    let filled = ((f64::from(percent) / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);

    let mut bar = String::with_capacity(BAR_WIDTH * FILLED_GLYPH.len_utf8());
    bar.extend(std::iter::repeat_n(FILLED_GLYPH, filled));
    bar.extend(std::iter::repeat_n(EMPTY_GLYPH, BAR_WIDTH - filled));
    bar
}
