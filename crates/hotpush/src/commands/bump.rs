//! Bump command

use anyhow::{anyhow, Context, Result};
use camino::Utf8Path;
use console::Term;
use dialoguer::Select;
use hotpush_core::{bump_candidates, next_version, parse_version, BumpKind, HotpushConfig};
use semver::Version;
use serde::Serialize;

use crate::cli::BumpArgs;
use crate::output;

#[derive(Debug, Serialize)]
struct BumpResult {
    current: String,
    next: String,
    kind: BumpKind,
}

pub fn run(args: BumpArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = HotpushConfig::load(config_path)?;

    let raw = args
        .version
        .as_deref()
        .or(config.app_version())
        .ok_or_else(|| {
            anyhow!("No version given. Pass one (hotpush bump 1.2.3) or set appVersion in hotpush.yaml")
        })?;
    let current = parse_version(raw)?;
    let preid = args.preid.as_deref().unwrap_or(config.prerelease_id());

    let kind = match args.kind {
        Some(kind) => kind.into(),
        None if !output::is_json() && Term::stderr().is_term() => prompt_kind(&current, preid)?,
        None => {
            return Err(anyhow!(
                "--kind is required when not running in an interactive terminal"
            ))
        }
    };

    let next = next_version(&current, kind, preid)?;
    tracing::debug!(%current, %next, %kind, "Computed next version");

    if output::is_json() {
        return output::json(&BumpResult {
            current: current.to_string(),
            next: next.to_string(),
            kind,
        });
    }

    output::success(&format!("Next version: {}", next));
    output::kv("Current", &current.to_string());
    output::kv("Bump", kind.as_str());
    Ok(())
}

/// Ask which part to bump, showing the resulting version for each choice
fn prompt_kind(current: &Version, preid: &str) -> Result<BumpKind> {
    let candidates = bump_candidates(current, preid)?;
    let items = prompt_items(&candidates);

    output::header(&format!("Current version: {}", current));
    let selection = Select::new()
        .with_prompt("Select version bump")
        .items(&items)
        .default(0)
        .interact()
        .context("Version prompt failed")?;

    Ok(candidates[selection].0)
}

fn prompt_items(candidates: &[(BumpKind, Version)]) -> Vec<String> {
    candidates
        .iter()
        .map(|(kind, next)| format!("{:<10} → {}", kind.as_str(), next))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_items_show_resulting_versions() {
        let current = Version::parse("3.1.4").unwrap();
        let candidates = bump_candidates(&current, "beta").unwrap();
        let items = prompt_items(&candidates);

        assert_eq!(items.len(), 4);
        assert_eq!(items[0], "patch      → 3.1.5");
        assert_eq!(items[1], "minor      → 3.2.0");
        assert_eq!(items[2], "major      → 4.0.0");
        assert_eq!(items[3], "prerelease → 3.1.5-beta.0");
    }

    #[test]
    fn test_bump_result_json() {
        let result = BumpResult {
            current: "1.0.0".to_string(),
            next: "1.1.0".to_string(),
            kind: BumpKind::Minor,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["kind"], "minor");
        assert_eq!(value["next"], "1.1.0");
    }
}
