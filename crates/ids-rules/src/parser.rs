//! Rule Assembler
//!
//! Folds the header and option list into a [`Rule`] and drives the line
//! reassembler for multi-rule input.

use crate::header::parse_header;
use crate::options::parse_options;
use crate::reader::{LogicalLine, LogicalLines};
use crate::rule::{Rule, RuleOption};
use crate::{Result, RuleError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, trace};

/// Parse a single logical rule string.
pub fn parse(buf: &str) -> Result<Rule> {
    let (header, rest) = parse_header(buf)?;
    let (options, _) = parse_options(rest)?;

    let mut rule = Rule {
        raw: buf.trim().to_string(),
        enabled: header.enabled,
        action: header.action,
        protocol: header.protocol,
        source_addr: header.source_addr,
        source_port: header.source_port,
        direction: header.direction,
        dest_addr: header.dest_addr,
        dest_port: header.dest_port,
        options,
        ..Default::default()
    };
    promote_options(&mut rule)?;

    Ok(rule)
}

/// Parse every rule in a stream, dropping rules that fail to parse.
///
/// Only I/O errors are returned. Use [`RuleParser`] to keep the failures.
pub fn parse_reader<R: Read>(reader: R) -> Result<Vec<Rule>> {
    let mut parser = RuleParser::new();
    parser.parse_reader(reader)?;
    Ok(parser.into_rules())
}

/// Copy `msg`, `sid` and `gid` into their dedicated fields.
fn promote_options(rule: &mut Rule) -> Result<()> {
    for option in &rule.options {
        match option.name.as_str() {
            "msg" => rule.msg = option.argument.clone(),
            "sid" => rule.sid = parse_number(option)?,
            "gid" => rule.gid = parse_number(option)?,
            _ => {}
        }
    }
    Ok(())
}

/// Digits only: no sign, no surrounding whitespace.
fn parse_number(option: &RuleOption) -> Result<u64> {
    let arg = &option.argument;
    let invalid = || RuleError::InvalidNumber {
        option: option.name.clone(),
        value: arg.clone(),
    };

    if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    arg.parse().map_err(|_| invalid())
}

/// A logical rule that failed to parse
#[derive(Debug)]
pub struct ParseFailure {
    /// Line the rule started on
    pub line: usize,

    /// Logical rule text
    pub text: String,

    /// Why it failed
    pub error: RuleError,
}

/// Batch parsing counters
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParserStats {
    /// Logical rule strings seen
    pub logical_lines: usize,
    /// Rules parsed, enabled or not
    pub parsed: usize,
    /// Parsed rules carrying the `#` marker
    pub disabled: usize,
    /// `#` lines that are not rules
    pub comments: usize,
    /// Failures recorded
    pub failed: usize,
}

/// Batch rule parser that keeps per-rule failures
#[derive(Debug, Default)]
pub struct RuleParser {
    /// Parsed rules
    rules: Vec<Rule>,

    /// Parse failures
    failures: Vec<ParseFailure>,

    stats: ParserStats,
}

impl RuleParser {
    /// Create new parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse rules from a reader, returning the number of rules added
    pub fn parse_reader<R: Read>(&mut self, reader: R) -> Result<usize> {
        let before = self.rules.len();
        let failed_before = self.failures.len();

        for logical in LogicalLines::new(BufReader::new(reader)) {
            self.push(logical?);
        }

        let added = self.rules.len() - before;
        info!(
            rules = added,
            failures = self.failures.len() - failed_before,
            "parsed rule stream"
        );
        Ok(added)
    }

    /// Parse rules from string
    pub fn parse_content(&mut self, content: &str) -> Result<usize> {
        self.parse_reader(content.as_bytes())
    }

    /// Parse rules from file
    pub fn parse_file(&mut self, path: &Path) -> Result<usize> {
        debug!(path = %path.display(), "loading rule file");
        let file = File::open(path)?;
        self.parse_reader(file)
    }

    fn push(&mut self, logical: LogicalLine) {
        self.stats.logical_lines += 1;
        trace!(line = logical.line, text = %logical.text, "parsing rule");

        match parse(&logical.text) {
            Ok(rule) => {
                self.stats.parsed += 1;
                if !rule.enabled {
                    self.stats.disabled += 1;
                }
                self.rules.push(rule);
            }
            // Commented-out prose, not a disabled rule.
            Err(_) if logical.text.starts_with('#') => {
                self.stats.comments += 1;
            }
            Err(error) => {
                debug!(line = logical.line, %error, "skipping rule");
                self.stats.failed += 1;
                self.failures.push(ParseFailure {
                    line: logical.line,
                    text: logical.text,
                    error,
                });
            }
        }
    }

    /// Get parsed rules
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Get parse failures
    pub fn failures(&self) -> &[ParseFailure] {
        &self.failures
    }

    /// Get counters
    pub fn stats(&self) -> &ParserStats {
        &self.stats
    }

    /// Take parsed rules
    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    /// Take parsed rules and failures
    pub fn into_parts(self) -> (Vec<Rule>, Vec<ParseFailure>) {
        (self.rules, self.failures)
    }
}
