//! Option Tokenizer
//!
//! Extracts `name;` and `name:argument;` pairs from the text following the
//! header's `(` until the closing `)`. Inside an argument a backslash escapes
//! the next character, so `\;` does not terminate it.

use crate::rule::RuleOption;
use crate::{Result, RuleError};
use std::borrow::Cow;

/// Remove one pair of surrounding double quotes.
fn trim_quotes(arg: &str) -> &str {
    if arg.len() >= 2 && arg.starts_with('"') && arg.ends_with('"') {
        &arg[1..arg.len() - 1]
    } else {
        arg
    }
}

/// Byte offset of the first unescaped `;`.
fn find_argument_end(buf: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in buf.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == ';' {
            return Some(i);
        }
    }
    None
}

/// Replace `\;` with `;`, leaving every other escape sequence intact.
fn unescape_delimiters(arg: &str) -> Cow<'_, str> {
    if !arg.contains("\\;") {
        return Cow::Borrowed(arg);
    }

    let mut out = String::with_capacity(arg.len());
    let mut chars = arg.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(';') => out.push(';'),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

/// Parse the next option.
///
/// Returns the option and the remainder of the buffer following its `;`.
pub fn parse_option(buf: &str) -> Result<(RuleOption, &str)> {
    let buf = buf.trim_start();

    // Names are never escaped; the first ':' or ';' ends them.
    let (name_end, has_arg) = buf
        .char_indices()
        .find_map(|(i, c)| match c {
            ';' => Some((i, false)),
            ':' => Some((i, true)),
            _ => None,
        })
        .ok_or(RuleError::UnterminatedOption)?;

    let name = &buf[..name_end];
    let rest = &buf[name_end + 1..];

    if !has_arg {
        return Ok((RuleOption::new(name, ""), rest));
    }

    if rest.is_empty() {
        return Err(RuleError::NoArgument(name.to_string()));
    }

    let arg_end = find_argument_end(rest).ok_or(RuleError::UnterminatedArgument)?;
    let argument = unescape_delimiters(trim_quotes(&rest[..arg_end]));

    Ok((RuleOption::new(name, argument), &rest[arg_end + 1..]))
}

/// Parse options up to the closing `)`.
///
/// Returns the options in order and whatever follows the `)`.
pub fn parse_options(buf: &str) -> Result<(Vec<RuleOption>, &str)> {
    let mut options = Vec::new();
    let mut buf = buf;

    loop {
        buf = buf.trim_start();

        if buf.is_empty() {
            return Err(RuleError::Incomplete);
        }

        if let Some(trailing) = buf.strip_prefix(')') {
            return Ok((options, trailing));
        }

        let (option, rest) = parse_option(buf)?;
        options.push(option);
        buf = rest;
    }
}
