//! Rule data model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Traffic direction operator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `->`
    ToDestination,
    /// `<>`
    Bidirectional,
}

impl Direction {
    /// Operator as written in a rule header
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToDestination => "->",
            Self::Bidirectional => "<>",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "->" => Ok(Self::ToDestination),
            "<>" => Ok(Self::Bidirectional),
            _ => Err(format!("unknown direction: {}", s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check a header direction token
pub fn is_valid_direction(token: &str) -> bool {
    token.parse::<Direction>().is_ok()
}

/// A single `name` or `name:argument` rule option
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOption {
    /// Option keyword
    #[serde(rename = "option")]
    pub name: String,

    /// Argument with outer quotes removed, empty for bare options
    #[serde(rename = "args")]
    pub argument: String,
}

impl RuleOption {
    /// Create option
    pub fn new(name: impl Into<String>, argument: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument: argument.into(),
        }
    }

    /// True when the option was written without an argument
    pub fn is_bare(&self) -> bool {
        self.argument.is_empty()
    }
}

/// Parsed IDS rule
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Logical rule text this rule was parsed from
    pub raw: String,

    /// False when the rule was commented out with `#`
    pub enabled: bool,

    /// Rule action (alert, drop, pass, ...)
    pub action: String,

    /// Protocol
    #[serde(rename = "proto")]
    pub protocol: String,

    /// Source address
    pub source_addr: String,

    /// Source port
    pub source_port: String,

    /// Direction (-> or <>)
    pub direction: String,

    /// Destination address
    #[serde(rename = "destination_addr")]
    pub dest_addr: String,

    /// Destination port
    #[serde(rename = "destination_port")]
    pub dest_port: String,

    /// Options in declaration order
    pub options: Vec<RuleOption>,

    /// Argument of the `msg` option
    pub msg: String,

    /// Argument of the `sid` option
    pub sid: u64,

    /// Argument of the `gid` option
    pub gid: u64,
}

impl Rule {
    /// Argument of the first option with this name
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.argument.as_str())
    }

    /// Arguments of every option with this name, in order
    pub fn options_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.options
            .iter()
            .filter(move |o| o.name == name)
            .map(|o| o.argument.as_str())
    }

    /// Check if an option is present
    pub fn has_option(&self, name: &str) -> bool {
        self.options.iter().any(|o| o.name == name)
    }

    /// Parsed direction operator
    pub fn parsed_direction(&self) -> Option<Direction> {
        self.direction.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Rule {
        Rule {
            action: "alert".into(),
            direction: "<>".into(),
            options: vec![
                RuleOption::new("msg", "hello"),
                RuleOption::new("content", "GET"),
                RuleOption::new("nocase", ""),
                RuleOption::new("content", "/admin"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_direction_tokens() {
        assert!(is_valid_direction("->"));
        assert!(is_valid_direction("<>"));
        assert!(!is_valid_direction("<-"));
        assert!(!is_valid_direction("=>"));
        assert!(!is_valid_direction(""));
        assert_eq!(Direction::Bidirectional.to_string(), "<>");
    }

    #[test]
    fn test_option_lookup() {
        let rule = sample();

        assert_eq!(rule.option("msg"), Some("hello"));
        assert_eq!(rule.option("content"), Some("GET"));
        assert_eq!(rule.option("sid"), None);
        assert_eq!(rule.options_named("content").collect::<Vec<_>>(), vec!["GET", "/admin"]);
        assert!(rule.has_option("nocase"));
        assert!(rule.options[2].is_bare());
        assert_eq!(rule.parsed_direction(), Some(Direction::Bidirectional));
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["action"], "alert");
        assert!(json.get("proto").is_some());
        assert!(json.get("destination_addr").is_some());
        assert!(json.get("destination_port").is_some());
        assert_eq!(json["options"][0]["option"], "msg");
        assert_eq!(json["options"][0]["args"], "hello");
    }
}
