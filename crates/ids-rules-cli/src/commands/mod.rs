//! CLI Commands

pub mod check;
pub mod config;
pub mod parse;

use anyhow::{Context, Result};
use ids_rules::{ParseFailure, ParserStats, Rule, RuleParser};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Parse results for one input
pub struct Source {
    pub name: String,
    pub rules: Vec<Rule>,
    pub failures: Vec<ParseFailure>,
    pub stats: ParserStats,
}

impl Source {
    fn read<R: Read>(name: String, reader: R) -> Result<Self> {
        let mut parser = RuleParser::new();
        parser
            .parse_reader(reader)
            .with_context(|| format!("reading {}", name))?;

        let stats = parser.stats().clone();
        info!(source = %name, rules = stats.parsed, failed = stats.failed, "loaded rules");

        let (rules, failures) = parser.into_parts();
        Ok(Self { name, rules, failures, stats })
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Parse every input, stdin when none are given
pub fn load(files: &[PathBuf]) -> Result<Vec<Source>> {
    if files.is_empty() {
        return Ok(vec![Source::read("<stdin>".into(), std::io::stdin().lock())?]);
    }

    files
        .iter()
        .map(|path| {
            if is_stdin(path) {
                Source::read("<stdin>".into(), std::io::stdin().lock())
            } else {
                let file = File::open(path)
                    .with_context(|| format!("opening {}", path.display()))?;
                Source::read(path.display().to_string(), file)
            }
        })
        .collect()
}
