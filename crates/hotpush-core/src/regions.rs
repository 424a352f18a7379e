//! Deployment region catalog and time-zone based ordering
//!
//! The replication simulator narrates regions being updated one after the
//! other. The region closest to the operator (guessed from the host time
//! zone) is moved to the end of the list so it is the last one reported.

use serde::Serialize;

/// A static, named deployment location shown during a simulated rollout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DeploymentRegion {
    /// Provider-qualified region code, e.g. `aws:eu-central-1`
    pub code: &'static str,

    /// Human readable label
    pub label: &'static str,
}

impl DeploymentRegion {
    const fn new(code: &'static str, label: &'static str) -> Self {
        Self { code, label }
    }
}

/// Fixed catalog of deployment regions, in declaration order.
pub const REGION_CATALOG: [DeploymentRegion; 9] = [
    DeploymentRegion::new(NORTH_AMERICA, "North America (Virginia)"),
    DeploymentRegion::new(EUROPE, "EU (Frankfurt)"),
    DeploymentRegion::new(TOKYO, "Asia Pacific (Tokyo)"),
    DeploymentRegion::new(MUMBAI, "Asia Pacific (Mumbai)"),
    DeploymentRegion::new(SINGAPORE, "Asia Pacific (Singapore)"),
    DeploymentRegion::new(HONG_KONG, "Asia Pacific (Hong Kong)"),
    DeploymentRegion::new(SYDNEY, "Oceania (Sydney)"),
    DeploymentRegion::new("aws:sa-east-1", "South America (São Paulo)"),
    DeploymentRegion::new(AFRICA, "Africa (South Africa)"),
];

const NORTH_AMERICA: &str = "aws:us-east-1";
const EUROPE: &str = "aws:eu-central-1";
const TOKYO: &str = "aws:ap-northeast-1";
const MUMBAI: &str = "aws:ap-south-1";
const SINGAPORE: &str = "aws:ap-southeast-1";
const HONG_KONG: &str = "aws:ap-east-1";
const SYDNEY: &str = "aws:ap-southeast-2";
const AFRICA: &str = "aws:af-south-1";

const JAPAN_CITIES: &[&str] = &["Tokyo", "Seoul", "Pyongyang"];

const INDIA_CITIES: &[&str] = &[
    "Kolkata",
    "Calcutta",
    "Colombo",
    "Kathmandu",
    "Katmandu",
    "Dhaka",
    "Dacca",
    "Thimphu",
    "Karachi",
];

const SOUTHEAST_ASIA_CITIES: &[&str] = &[
    "Singapore",
    "Kuala_Lumpur",
    "Kuching",
    "Jakarta",
    "Pontianak",
    "Makassar",
    "Jayapura",
    "Bangkok",
    "Ho_Chi_Minh",
    "Saigon",
    "Phnom_Penh",
    "Vientiane",
    "Yangon",
    "Rangoon",
    "Manila",
    "Brunei",
    "Dili",
];

const HONG_KONG_CITIES: &[&str] = &["Hong_Kong", "Macau", "Shanghai", "Chongqing", "Taipei"];

/// Map an IANA time zone identifier to the code of the closest catalog region.
///
/// Returns `None` for zones outside the lookup table (`UTC`, `Etc/*`, ...).
pub fn closest_region_code(time_zone: &str) -> Option<&'static str> {
    let (area, city) = time_zone.split_once('/').unwrap_or((time_zone, ""));

    match area {
        "America" => Some(NORTH_AMERICA),
        "Europe" | "Atlantic" => Some(EUROPE),
        "Africa" => Some(AFRICA),
        "Pacific" | "Australia" => Some(SYDNEY),
        "Asia" => Some(asian_region_code(city)),
        _ => None,
    }
}

/// City lists checked in order; unmatched Asian cities fall back to Hong Kong.
const ASIA_GROUPS: &[(&[&str], &str)] = &[
    (JAPAN_CITIES, TOKYO),
    (INDIA_CITIES, MUMBAI),
    (SOUTHEAST_ASIA_CITIES, SINGAPORE),
    (HONG_KONG_CITIES, HONG_KONG),
];

fn asian_region_code(city: &str) -> &'static str {
    ASIA_GROUPS
        .iter()
        .find(|(cities, _)| cities.contains(&city))
        .map(|(_, code)| *code)
        .unwrap_or(HONG_KONG)
}

/// Order the catalog for the given time zone.
///
/// The closest region is moved to the end; every other region keeps its
/// declaration order. An absent or unrecognised zone yields the catalog as is.
pub fn ordered_regions(time_zone: Option<&str>) -> Vec<DeploymentRegion> {
    let mut regions = REGION_CATALOG.to_vec();

    let Some(code) = time_zone.and_then(closest_region_code) else {
        tracing::debug!(?time_zone, "No closest region for time zone");
        return regions;
    };

    if let Some(index) = regions.iter().position(|r| r.code == code) {
        let closest = regions.remove(index);
        tracing::debug!(?time_zone, region = closest.code, "Closest region placed last");
        regions.push(closest);
    }

    regions
}

/// Source of the host time zone identifier.
pub trait TimeZoneSource: Send + Sync {
    /// The IANA time zone identifier, if one can be determined
    fn time_zone(&self) -> Option<String>;
}

/// Reads the time zone from the running host.
///
/// An IANA name in `TZ` wins; otherwise the platform's configured zone is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeZone;

impl TimeZoneSource for SystemTimeZone {
    fn time_zone(&self) -> Option<String> {
        if let Ok(tz) = std::env::var("TZ") {
            if is_iana_name(&tz) {
                return Some(tz);
            }
        }

        match iana_time_zone::get_timezone() {
            Ok(tz) => Some(tz),
            Err(e) => {
                tracing::debug!("Could not detect host time zone: {}", e);
                None
            }
        }
    }
}

/// `TZ` may also hold a file path (`:/etc/localtime`) or a POSIX rule (`EST5EDT`).
///
/// Slash-less zone names (`UTC`, `Japan`) are accepted; POSIX rules always
/// carry an offset, so anything with digits or `<`/`,` outside an
/// `Area/Location` name is rejected.
fn is_iana_name(tz: &str) -> bool {
    if tz.is_empty() || tz.starts_with(':') || tz.starts_with('/') {
        return false;
    }

    tz.contains('/')
        || tz
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '_' || c == '-')
}

/// A fixed time zone, used for `--timezone` overrides and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedTimeZone(pub Option<String>);

impl FixedTimeZone {
    pub fn new(time_zone: impl Into<String>) -> Self {
        Self(Some(time_zone.into()))
    }

    /// A source that never reports a zone
    pub fn none() -> Self {
        Self(None)
    }
}

impl TimeZoneSource for FixedTimeZone {
    fn time_zone(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Order the catalog using the zone reported by `source`.
pub fn get_ordered_regions(source: &dyn TimeZoneSource) -> Vec<DeploymentRegion> {
    ordered_regions(source.time_zone().as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashSet;

    fn codes(regions: &[DeploymentRegion]) -> Vec<&'static str> {
        regions.iter().map(|r| r.code).collect()
    }

    fn assert_permutation(regions: &[DeploymentRegion]) {
        assert_eq!(regions.len(), REGION_CATALOG.len());
        let got: HashSet<_> = regions.iter().map(|r| r.code).collect();
        let want: HashSet<_> = REGION_CATALOG.iter().map(|r| r.code).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn test_catalog_codes_are_unique() {
        let unique: HashSet<_> = REGION_CATALOG.iter().map(|r| r.code).collect();
        assert_eq!(unique.len(), 9);
    }

    #[test]
    fn test_europe_paris_puts_frankfurt_last() {
        let regions = ordered_regions(Some("Europe/Paris"));
        assert_eq!(
            regions.last(),
            Some(&DeploymentRegion {
                code: "aws:eu-central-1",
                label: "EU (Frankfurt)",
            })
        );

        let expected: Vec<_> = REGION_CATALOG
            .iter()
            .filter(|r| r.code != "aws:eu-central-1")
            .map(|r| r.code)
            .collect();
        assert_eq!(codes(&regions[..8]), expected);
    }

    #[test]
    fn test_unknown_or_absent_zone_keeps_catalog_order() {
        assert_eq!(ordered_regions(None), REGION_CATALOG.to_vec());
        assert_eq!(ordered_regions(Some("UTC")), REGION_CATALOG.to_vec());
        assert_eq!(ordered_regions(Some("Etc/GMT+3")), REGION_CATALOG.to_vec());
        assert_eq!(ordered_regions(Some("")), REGION_CATALOG.to_vec());
    }

    #[test]
    fn test_area_lookup() {
        assert_eq!(closest_region_code("America/New_York"), Some(NORTH_AMERICA));
        assert_eq!(closest_region_code("America/Sao_Paulo"), Some(NORTH_AMERICA));
        assert_eq!(closest_region_code("Atlantic/Reykjavik"), Some(EUROPE));
        assert_eq!(closest_region_code("Africa/Lagos"), Some(AFRICA));
        assert_eq!(
            ordered_regions(Some("Africa/Johannesburg")).last(),
            Some(&DeploymentRegion {
                code: "aws:af-south-1",
                label: "Africa (South Africa)",
            })
        );
        assert_eq!(closest_region_code("Australia/Perth"), Some(SYDNEY));
        assert_eq!(closest_region_code("Pacific/Auckland"), Some(SYDNEY));
        assert_eq!(closest_region_code("Antarctica/Casey"), None);
    }

    #[test]
    fn test_asian_city_lists() {
        assert_eq!(closest_region_code("Asia/Tokyo"), Some(TOKYO));
        assert_eq!(closest_region_code("Asia/Seoul"), Some(TOKYO));
        assert_eq!(closest_region_code("Asia/Kolkata"), Some(MUMBAI));
        assert_eq!(closest_region_code("Asia/Singapore"), Some(SINGAPORE));
        assert_eq!(closest_region_code("Asia/Bangkok"), Some(SINGAPORE));
        assert_eq!(closest_region_code("Asia/Hong_Kong"), Some(HONG_KONG));
        assert_eq!(closest_region_code("Asia/Dubai"), Some(HONG_KONG));
        assert_eq!(closest_region_code("Asia"), Some(HONG_KONG));
    }

    #[test]
    fn test_every_match_is_a_permutation() {
        for tz in [
            "America/Chicago",
            "Europe/Berlin",
            "Asia/Tokyo",
            "Asia/Kolkata",
            "Asia/Jakarta",
            "Asia/Shanghai",
            "Australia/Sydney",
            "Africa/Johannesburg",
            "Mars/Olympus_Mons",
        ] {
            assert_permutation(&ordered_regions(Some(tz)));
        }
    }

    #[test]
    fn test_fixed_time_zone_source() {
        let regions = get_ordered_regions(&FixedTimeZone::new("Asia/Tokyo"));
        assert_eq!(regions.last().map(|r| r.code), Some(TOKYO));
        assert_eq!(
            get_ordered_regions(&FixedTimeZone::none()),
            REGION_CATALOG.to_vec()
        );
    }

    #[test]
    fn test_is_iana_name() {
        assert!(is_iana_name("Europe/Paris"));
        assert!(is_iana_name("Etc/GMT+3"));
        assert!(is_iana_name("UTC"));
        assert!(is_iana_name("Japan"));
        assert!(!is_iana_name(":/etc/localtime"));
        assert!(!is_iana_name("/usr/share/zoneinfo/UTC"));
        assert!(!is_iana_name("EST5EDT"));
        assert!(!is_iana_name("<+03>-3"));
        assert!(!is_iana_name(""));
    }

    #[test]
    #[serial]
    fn test_system_time_zone_prefers_tz_env() {
        let previous = std::env::var("TZ").ok();
        std::env::set_var("TZ", "Africa/Nairobi");

        assert_eq!(SystemTimeZone.time_zone().as_deref(), Some("Africa/Nairobi"));

        std::env::set_var("TZ", "UTC");
        assert_eq!(SystemTimeZone.time_zone().as_deref(), Some("UTC"));

        match previous {
            Some(tz) => std::env::set_var("TZ", tz),
            None => std::env::remove_var("TZ"),
        }
    }
}
