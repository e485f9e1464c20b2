//! IDS Signature Rule Parser
//!
//! Parses Snort/Suricata style text rules into structured [`Rule`] values.
//!
//! ## Pipeline
//!
//! ```text
//! raw text ──► LogicalLines ──► parse_header ──► parse_options ──► Rule
//!              (continuation     (7 positional    (name[:arg];
//!               joining)          fields + "(")    pairs until ")")
//! ```
//!
//! - **Line Reassembler** ([`LogicalLines`]): joins physical lines ending in `\`
//! - **Header Tokenizer** ([`parse_header`]): disable marker and positional fields
//! - **Option Tokenizer** ([`parse_options`]): quoting and `\;` escapes
//! - **Rule Assembler** ([`parse`], [`parse_reader`], [`RuleParser`])
//!
//! ## Example
//!
//! ```
//! let rule = ids_rules::parse(r#"alert tcp any any -> any 80 (msg:"test rule"; sid:1;)"#).unwrap();
//! assert_eq!(rule.dest_port, "80");
//! assert_eq!(rule.msg, "test rule");
//! assert_eq!(rule.sid, 1);
//! ```

#![warn(missing_docs)]

pub mod header;
pub mod options;
pub mod parser;
pub mod reader;
pub mod rule;

pub use header::{parse_header, Header};
pub use options::{parse_option, parse_options};
pub use parser::{parse, parse_reader, ParseFailure, ParserStats, RuleParser};
pub use reader::{LogicalLine, LogicalLines};
pub use rule::{is_valid_direction, Direction, Rule, RuleOption};

use thiserror::Error;

/// Rule parsing errors
#[derive(Error, Debug)]
pub enum RuleError {
    /// A header field or the closing `)` was never reached
    #[error("incomplete rule")]
    Incomplete,

    /// The header is not followed by `(`
    #[error("expected (, got {0}")]
    ExpectedParen(char),

    /// Direction token is not `->` or `<>`
    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    /// Option name has no `;` or `:` after it
    #[error("unterminated option")]
    UnterminatedOption,

    /// Option argument has no unescaped `;` after it
    #[error("unterminated option argument")]
    UnterminatedArgument,

    /// `name:` with nothing following the colon
    #[error("no argument for option: {0}")]
    NoArgument(String),

    /// `sid` or `gid` argument is not an unsigned integer
    #[error("failed to parse {option}: {value}")]
    InvalidNumber {
        /// Option name
        option: String,
        /// Offending argument
        value: String,
    },

    /// Stream read failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fieldless view of a [`RuleError`], for matching on the failure condition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`RuleError::Incomplete`]
    Incomplete,
    /// See [`RuleError::ExpectedParen`]
    MalformedHeader,
    /// See [`RuleError::InvalidDirection`]
    InvalidDirection,
    /// See [`RuleError::UnterminatedOption`]
    UnterminatedOption,
    /// See [`RuleError::UnterminatedArgument`]
    UnterminatedArgument,
    /// See [`RuleError::NoArgument`]
    MissingArgument,
    /// See [`RuleError::InvalidNumber`]
    MalformedNumber,
    /// See [`RuleError::Io`]
    Io,
}

impl RuleError {
    /// Failure condition without its payload
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Incomplete => ErrorKind::Incomplete,
            Self::ExpectedParen(_) => ErrorKind::MalformedHeader,
            Self::InvalidDirection(_) => ErrorKind::InvalidDirection,
            Self::UnterminatedOption => ErrorKind::UnterminatedOption,
            Self::UnterminatedArgument => ErrorKind::UnterminatedArgument,
            Self::NoArgument(_) => ErrorKind::MissingArgument,
            Self::InvalidNumber { .. } => ErrorKind::MalformedNumber,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

/// Result type for rule parsing
pub type Result<T> = std::result::Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(RuleError::Incomplete.to_string(), "incomplete rule");
        assert_eq!(RuleError::ExpectedParen('x').to_string(), "expected (, got x");
        assert_eq!(
            RuleError::InvalidNumber { option: "gid".into(), value: "abc".into() }.to_string(),
            "failed to parse gid: abc"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(RuleError::InvalidDirection("=>".into()).kind(), ErrorKind::InvalidDirection);
        assert_eq!(RuleError::NoArgument("msg".into()).kind(), ErrorKind::MissingArgument);

        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        assert_eq!(RuleError::from(io).kind(), ErrorKind::Io);
    }
}
