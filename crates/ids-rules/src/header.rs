//! Header Tokenizer
//!
//! Splits the fixed-position part of a rule:
//! `[#] action protocol src_addr src_port direction dst_addr dst_port (`

use crate::rule::is_valid_direction;
use crate::{Result, RuleError};

/// Positional rule header
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    /// False when prefixed with `#`
    pub enabled: bool,
    /// Rule action
    pub action: String,
    /// Protocol
    pub protocol: String,
    /// Source address
    pub source_addr: String,
    /// Source port
    pub source_port: String,
    /// Direction operator
    pub direction: String,
    /// Destination address
    pub dest_addr: String,
    /// Destination port
    pub dest_port: String,
}

/// Split off the leading whitespace-delimited field, trimming both parts.
fn split_field(buf: &str) -> (&str, &str) {
    match buf.find(char::is_whitespace) {
        Some(pos) => (buf[..pos].trim(), buf[pos..].trim()),
        None => (buf.trim(), ""),
    }
}

/// Like [`split_field`], but a field must be followed by more text.
fn next_field(buf: &str) -> Result<(&str, &str)> {
    let (field, rem) = split_field(buf);
    if rem.is_empty() {
        return Err(RuleError::Incomplete);
    }
    Ok((field, rem))
}

/// Parse a rule header.
///
/// Returns the header and the text following the opening `(` of the option
/// list.
pub fn parse_header(buf: &str) -> Result<(Header, &str)> {
    let buf = buf.trim_start();

    let (enabled, buf) = match buf.strip_prefix('#') {
        Some(rest) => (false, rest.trim_start()),
        None => (true, buf),
    };

    let (action, rem) = next_field(buf)?;
    let (protocol, rem) = next_field(rem)?;
    let (source_addr, rem) = next_field(rem)?;
    let (source_port, rem) = next_field(rem)?;

    let (direction, rem) = split_field(rem);
    if !is_valid_direction(direction) {
        return Err(RuleError::InvalidDirection(direction.to_string()));
    }
    if rem.is_empty() {
        return Err(RuleError::Incomplete);
    }

    let (dest_addr, rem) = next_field(rem)?;
    let (dest_port, rem) = split_field(rem);

    let mut chars = rem.chars();
    match chars.next() {
        Some('(') => {}
        Some(c) => return Err(RuleError::ExpectedParen(c)),
        None => return Err(RuleError::Incomplete),
    }

    let header = Header {
        enabled,
        action: action.to_string(),
        protocol: protocol.to_string(),
        source_addr: source_addr.to_string(),
        source_port: source_port.to_string(),
        direction: direction.to_string(),
        dest_addr: dest_addr.to_string(),
        dest_port: dest_port.to_string(),
    };

    Ok((header, chars.as_str()))
}
