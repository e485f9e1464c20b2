//! Check command

use super::{load, Source};
use crate::output::{FailureRecord, OutputFormat};
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

fn summary(source: &Source) -> String {
    let stats = &source.stats;
    let status = if stats.failed == 0 {
        "ok".green().bold()
    } else {
        "FAILED".red().bold()
    };
    format!(
        "{}: {} ({} rules, {} disabled, {} comments, {} failed)",
        source.name, status, stats.parsed, stats.disabled, stats.comments, stats.failed
    )
}

/// Returns false when any input had a rule that failed to parse
pub fn handle(files: &[PathBuf], format: OutputFormat) -> Result<bool> {
    let sources = load(files)?;

    let failures: Vec<FailureRecord> = sources
        .iter()
        .flat_map(|s| s.failures.iter().map(move |f| FailureRecord::new(&s.name, f)))
        .collect();
    if !failures.is_empty() {
        println!("{}", format.render_failures(&failures)?);
    }

    for source in &sources {
        eprintln!("{}", summary(source));
    }

    Ok(failures.is_empty())
}
