//! Semver helpers for choosing the next app version

use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Prerelease, Version};
use serde::Serialize;

use crate::error::{Error, Result};

/// Default prerelease identifier
pub const DEFAULT_PREID: &str = "beta";

/// Which part of the version to bump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpKind {
    Patch,
    Minor,
    Major,
    Prerelease,
}

impl BumpKind {
    pub const ALL: [BumpKind; 4] = [
        BumpKind::Patch,
        BumpKind::Minor,
        BumpKind::Major,
        BumpKind::Prerelease,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Patch => "patch",
            BumpKind::Minor => "minor",
            BumpKind::Major => "major",
            BumpKind::Prerelease => "prerelease",
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "patch" => Ok(BumpKind::Patch),
            "minor" => Ok(BumpKind::Minor),
            "major" => Ok(BumpKind::Major),
            "prerelease" | "pre" => Ok(BumpKind::Prerelease),
            _ => Err(Error::invalid_config(format!(
                "Unknown bump kind '{}'. Valid kinds: patch, minor, major, prerelease",
                s
            ))),
        }
    }
}

/// Parse a version string, accepting an optional leading `v`
pub fn parse_version(input: &str) -> Result<Version> {
    let trimmed = input.trim();
    let raw = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(raw).map_err(|_| Error::invalid_version(input))
}

/// Compute the version that follows `current` for the given bump.
///
/// Release bumps on a prerelease graduate it when the prerelease already
/// targets that release (`1.3.0-beta.2` + minor = `1.3.0`). Prerelease bumps
/// increment a trailing `<preid>.N` counter, or start one at `0`.
pub fn next_version(current: &Version, kind: BumpKind, preid: &str) -> Result<Version> {
    let mut next = current.clone();
    next.build = BuildMetadata::EMPTY;
    let is_pre = !current.pre.is_empty();

    match kind {
        BumpKind::Patch => {
            if !is_pre {
                next.patch += 1;
            }
        }
        BumpKind::Minor => {
            if !(is_pre && current.patch == 0) {
                next.minor += 1;
            }
            next.patch = 0;
        }
        BumpKind::Major => {
            if !(is_pre && current.minor == 0 && current.patch == 0) {
                next.major += 1;
            }
            next.minor = 0;
            next.patch = 0;
        }
        BumpKind::Prerelease => {
            let counter = match prerelease_counter(&current.pre, preid) {
                Some(n) => n + 1,
                None => {
                    if !is_pre {
                        next.patch += 1;
                    }
                    0
                }
            };
            let label = format!("{}.{}", preid, counter);
            next.pre = Prerelease::new(&label)
                .map_err(|_| Error::invalid_version(format!("{}-{}", current, label)))?;
            return Ok(next);
        }
    }

    next.pre = Prerelease::EMPTY;
    Ok(next)
}

/// The `N` of a `<preid>.N` prerelease
fn prerelease_counter(pre: &Prerelease, preid: &str) -> Option<u64> {
    let (id, counter) = pre.as_str().rsplit_once('.')?;
    if id != preid {
        return None;
    }
    counter.parse().ok()
}

/// Every bump kind paired with the version it would produce
pub fn bump_candidates(current: &Version, preid: &str) -> Result<Vec<(BumpKind, Version)>> {
    BumpKind::ALL
        .iter()
        .map(|kind| Ok((*kind, next_version(current, *kind, preid)?)))
        .collect()
}
