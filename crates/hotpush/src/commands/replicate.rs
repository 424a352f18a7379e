//! Replicate command

use std::time::Duration;

use anyhow::Result;
use camino::Utf8Path;
use hotpush_core::replication::RunOutcome;
use hotpush_core::{
    HotpushConfig, ProgressSink, ReplicationOptions, ReplicationProgress, TerminalCaps,
};

use crate::cli::ReplicateArgs;
use crate::commands::regions::time_zone_source;
use crate::output::{self, JsonSink, TerminalSink};

pub async fn run(args: ReplicateArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = HotpushConfig::load(config_path)?;
    let settings = config.replication();
    let options = apply_overrides(settings.to_options(), &args);

    let override_tz = args
        .timezone
        .as_deref()
        .or(settings.timezone.as_deref());

    let mut progress = ReplicationProgress::new(options, TerminalCaps::detect())
        .with_time_zone(time_zone_source(override_tz));

    let mut sink: Box<dyn ProgressSink> = if output::is_json() {
        Box::new(JsonSink::new(std::io::stdout()))
    } else {
        Box::new(TerminalSink::new())
    };

    let outcome = progress.run_until(sink.as_mut(), interrupted()).await?;

    match outcome {
        RunOutcome::Skipped => {
            tracing::info!("Replication progress skipped (non-interactive session or zero duration)")
        }
        RunOutcome::Completed => tracing::debug!("Replication progress completed"),
        RunOutcome::Cancelled => tracing::debug!("Replication progress cancelled"),
    }

    Ok(())
}

/// Command-line flags win over hotpush.yaml
fn apply_overrides(mut options: ReplicationOptions, args: &ReplicateArgs) -> ReplicationOptions {
    if let Some(secs) = args.duration {
        options.total = Duration::from_secs(secs);
    }
    if let Some(ms) = args.interval {
        options.update_interval = Duration::from_millis(ms);
    }
    if let Some(title) = &args.title {
        options.title = title.clone();
    }
    if args.force_interactive {
        options.interactive = Some(true);
    }
    options
}

/// Resolves on Ctrl-C. If the handler cannot be installed it never resolves.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::debug!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
