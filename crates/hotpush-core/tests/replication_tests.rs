//! Integration tests for the replication simulator through the public API

use std::sync::Arc;
use std::time::Duration;

use hotpush_core::replication::{RecordingSink, RunOutcome, SinkEvent};
use hotpush_core::{
    get_ordered_regions, show_replication_progress, FixedTimeZone, HotpushConfig,
    ReplicationOptions, ReplicationProgress, TerminalCaps, REGION_CATALOG,
};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_end_to_end_short_run() {
    let options = ReplicationOptions::default()
        .with_interactive(true)
        .with_total(Duration::from_millis(100))
        .with_update_interval(Duration::from_millis(10));
    let mut sink = RecordingSink::default();

    let started = Instant::now();
    show_replication_progress(
        options,
        TerminalCaps::unattended(),
        Arc::new(FixedTimeZone::new("America/Denver")),
        &mut sink,
    )
    .await
    .unwrap();

    assert!(Instant::now() - started < Duration::from_millis(150));
    assert!(sink.lines()[1].ends_with("North America (Virginia)"));
    assert!(matches!(sink.events.last(), Some(SinkEvent::Finish(_))));
}

#[tokio::test(start_paused = true)]
async fn test_unattended_terminal_skips_by_default() {
    let mut sink = RecordingSink::default();
    let outcome = ReplicationProgress::new(ReplicationOptions::default(), TerminalCaps::unattended())
        .run(&mut sink)
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Skipped);
    assert!(sink.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_config_settings_drive_the_run() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = camino::Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
    std::fs::write(
        root.join("hotpush.yaml"),
        "replication:\n  durationMs: 3000\n  updateIntervalMs: 500\n  completeMessage: All done\n  interactive: true\n",
    )
    .unwrap();

    let config = HotpushConfig::discover(&root).unwrap();
    let mut sink = RecordingSink::default();
    let outcome = ReplicationProgress::new(config.replication().to_options(), TerminalCaps::unattended())
        .with_time_zone(Arc::new(FixedTimeZone::none()))
        .run(&mut sink)
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(sink.updates().len(), 6);
    assert_eq!(
        sink.events.last(),
        Some(&SinkEvent::Finish("All done".to_string()))
    );
}

#[test]
fn test_ordering_is_always_a_permutation() {
    let zones = [
        "Europe/London",
        "Asia/Kathmandu",
        "Asia/Manila",
        "Asia/Taipei",
        "Asia/Tehran",
        "Pacific/Honolulu",
        "Africa/Cairo",
        "UTC",
    ];

    for zone in zones {
        let mut ordered: Vec<_> = get_ordered_regions(&FixedTimeZone::new(zone))
            .iter()
            .map(|r| r.code)
            .collect();
        let mut catalog: Vec<_> = REGION_CATALOG.iter().map(|r| r.code).collect();
        ordered.sort_unstable();
        catalog.sort_unstable();
        assert_eq!(ordered, catalog, "zone {zone}");
    }
}
