//! Output formatting

use anyhow::Result;
use clap::ValueEnum;
use ids_rules::{ParseFailure, Rule};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "GID:SID")]
    id: String,
    #[tabled(rename = "On")]
    enabled: &'static str,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Proto")]
    protocol: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Dir")]
    direction: String,
    #[tabled(rename = "Destination")]
    destination: String,
    #[tabled(rename = "Options")]
    options: usize,
    #[tabled(rename = "Message")]
    msg: String,
}

impl From<&Rule> for RuleRow {
    fn from(rule: &Rule) -> Self {
        Self {
            id: format!("{}:{}", rule.gid, rule.sid),
            enabled: if rule.enabled { "yes" } else { "no" },
            action: rule.action.clone(),
            protocol: rule.protocol.clone(),
            source: format!("{} {}", rule.source_addr, rule.source_port),
            direction: rule.direction.clone(),
            destination: format!("{} {}", rule.dest_addr, rule.dest_port),
            options: rule.options.len(),
            msg: rule.msg.clone(),
        }
    }
}

/// A failure flattened for display
#[derive(Debug, Serialize, Tabled)]
pub struct FailureRecord {
    #[tabled(rename = "Source")]
    pub source: String,
    #[tabled(rename = "Line")]
    pub line: usize,
    #[tabled(rename = "Error")]
    pub error: String,
    #[tabled(rename = "Rule")]
    pub text: String,
}

impl FailureRecord {
    pub fn new(source: &str, failure: &ParseFailure) -> Self {
        Self {
            source: source.to_string(),
            line: failure.line,
            error: failure.error.to_string(),
            text: failure.text.clone(),
        }
    }
}

impl OutputFormat {
    pub fn render_rules(&self, rules: &[&Rule]) -> Result<String> {
        Ok(match self {
            OutputFormat::Json => serde_json::to_string_pretty(rules)?,
            OutputFormat::Yaml => serde_yaml::to_string(rules)?,
            OutputFormat::Table => {
                let rows: Vec<RuleRow> = rules.iter().map(|r| RuleRow::from(*r)).collect();
                Table::new(rows).with(Style::rounded()).to_string()
            }
        })
    }

    pub fn render_failures(&self, failures: &[FailureRecord]) -> Result<String> {
        Ok(match self {
            OutputFormat::Json => serde_json::to_string_pretty(failures)?,
            OutputFormat::Yaml => serde_yaml::to_string(failures)?,
            OutputFormat::Table => Table::new(failures).with(Style::rounded()).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> Rule {
        ids_rules::parse(r#"alert tcp any any -> any 80 (msg:"test rule"; sid:1; gid:1;)"#).unwrap()
    }

    #[test]
    fn test_format_names() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("YAML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Table.to_string(), "table");
    }

    #[test]
    fn test_render_json() {
        let rule = rule();
        let rendered = OutputFormat::Json.render_rules(&[&rule]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value[0]["sid"], 1);
        assert_eq!(value[0]["destination_port"], "80");
        assert_eq!(value[0]["options"][0]["args"], "test rule");
    }

    #[test]
    fn test_render_table() {
        let rule = rule();
        let rendered = OutputFormat::Table.render_rules(&[&rule]).unwrap();

        assert!(rendered.contains("GID:SID"));
        assert!(rendered.contains("1:1"));
        assert!(rendered.contains("test rule"));
    }

    #[test]
    fn test_render_failures() {
        let err = ids_rules::parse("alert tcp any any -> any (msg:\"x\";)").unwrap_err();
        let failure = ParseFailure {
            line: 7,
            text: "alert tcp any any -> any (msg:\"x\";)".into(),
            error: err,
        };
        let records = vec![FailureRecord::new("local.rules", &failure)];

        let rendered = OutputFormat::Yaml.render_failures(&records).unwrap();
        assert!(rendered.contains("line: 7"));
        assert!(rendered.contains("incomplete rule"));
    }
}
