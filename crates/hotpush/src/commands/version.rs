//! Version command

use crate::cli::VersionArgs;
use crate::output;
use crate::version::VersionInfo;
use anyhow::Result;

pub fn run(_args: VersionArgs) -> Result<()> {
    let info = VersionInfo::current();

    if output::is_json() {
        return output::json(&info);
    }

    println!("{}", info.display());
    if let Some(commit) = &info.commit {
        output::kv("Commit", commit);
    }
    if let Some(date) = &info.build_date {
        output::kv("Build date", date);
    }
    if let Some(target) = &info.target {
        output::kv("Target", target);
    }

    Ok(())
}
