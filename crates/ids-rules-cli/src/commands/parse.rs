//! Parse command

use super::load;
use crate::output::{FailureRecord, OutputFormat};
use anyhow::Result;
use ids_rules::Rule;
use std::path::PathBuf;

pub fn handle(
    files: &[PathBuf],
    show_errors: bool,
    include_disabled: bool,
    format: OutputFormat,
) -> Result<bool> {
    let sources = load(files)?;

    let rules: Vec<&Rule> = sources
        .iter()
        .flat_map(|s| s.rules.iter())
        .filter(|r| include_disabled || r.enabled)
        .collect();
    println!("{}", format.render_rules(&rules)?);

    if show_errors {
        let failures: Vec<FailureRecord> = sources
            .iter()
            .flat_map(|s| s.failures.iter().map(move |f| FailureRecord::new(&s.name, f)))
            .collect();
        if !failures.is_empty() {
            eprintln!("{}", format.render_failures(&failures)?);
        }
    }

    Ok(true)
}
