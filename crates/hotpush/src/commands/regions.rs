//! Regions command

use std::sync::Arc;

use anyhow::Result;
use camino::Utf8Path;
use hotpush_core::regions::closest_region_code;
use hotpush_core::{
    get_ordered_regions, DeploymentRegion, FixedTimeZone, HotpushConfig, SystemTimeZone,
    TimeZoneSource,
};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::RegionsArgs;
use crate::output;

#[derive(Tabled, Serialize)]
struct RegionRow {
    #[tabled(rename = "#")]
    order: usize,
    code: &'static str,
    label: &'static str,
    local: String,
}

pub fn run(args: RegionsArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = HotpushConfig::load(config_path)?;
    let override_tz = args
        .timezone
        .as_deref()
        .or(config.replication().timezone.as_deref());

    let source = time_zone_source(override_tz);
    let time_zone = source.time_zone();
    let regions = get_ordered_regions(source.as_ref());
    let rows = region_rows(&regions, time_zone.as_deref());

    if output::is_json() {
        return output::json(&rows);
    }

    match &time_zone {
        Some(tz) => output::kv("Time zone", tz),
        None => output::warning("Could not determine time zone; using default region order"),
    }

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
    output::info("Bundles replicate top to bottom; the local region is updated last");

    Ok(())
}

/// An explicit zone wins over the host's
pub(crate) fn time_zone_source(override_tz: Option<&str>) -> Arc<dyn TimeZoneSource> {
    match override_tz {
        Some(tz) => Arc::new(FixedTimeZone::new(tz)),
        None => Arc::new(SystemTimeZone),
    }
}

fn region_rows(regions: &[DeploymentRegion], time_zone: Option<&str>) -> Vec<RegionRow> {
    let local = time_zone.and_then(closest_region_code);

    regions
        .iter()
        .enumerate()
        .map(|(i, region)| RegionRow {
            order: i + 1,
            code: region.code,
            label: region.label,
            local: if Some(region.code) == local {
                "yes".to_string()
            } else {
                String::new()
            },
        })
        .collect()
}
