//! CLI Configuration

use crate::output::OutputFormat;
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub default_format: Option<OutputFormat>,
    pub log_level: Option<String>,
    pub include_disabled: Option<bool>,
}

impl Config {
    pub const KEYS: [&'static str; 3] = ["default_format", "log_level", "include_disabled"];

    pub fn load(profile: Option<&str>) -> Result<Self> {
        Self::load_from(&Self::config_path(profile)?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn save(&self, profile: Option<&str>) -> Result<PathBuf> {
        let path = Self::config_path(profile)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(match key {
            "default_format" => self.default_format.map(|f| f.to_string()),
            "log_level" => self.log_level.clone(),
            "include_disabled" => self.include_disabled.map(|b| b.to_string()),
            _ => bail!("Unknown config key: {}", key),
        })
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default_format" => {
                self.default_format = Some(value.parse().map_err(|e: String| anyhow!(e))?)
            }
            "log_level" => self.log_level = Some(value.to_string()),
            "include_disabled" => {
                self.include_disabled = Some(
                    value
                        .parse()
                        .with_context(|| format!("include_disabled must be true or false, got {}", value))?,
                )
            }
            _ => bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    pub fn format(&self) -> OutputFormat {
        self.default_format.unwrap_or(OutputFormat::Table)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }

    pub fn include_disabled(&self) -> bool {
        self.include_disabled.unwrap_or(true)
    }

    fn config_path(profile: Option<&str>) -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot find home directory"))?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".idsrules").join(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.format(), OutputFormat::Table);
        assert_eq!(config.log_level(), "warn");
        assert!(config.include_disabled());
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        config.set("default_format", "json").unwrap();
        config.set("include_disabled", "false").unwrap();
        config.set("log_level", "debug").unwrap();

        assert_eq!(config.format(), OutputFormat::Json);
        assert!(!config.include_disabled());
        assert_eq!(config.get("log_level").unwrap().as_deref(), Some("debug"));
        assert_eq!(config.get("default_format").unwrap().as_deref(), Some("json"));

        assert!(config.set("include_disabled", "maybe").is_err());
        assert!(config.set("default_format", "xml").is_err());
        assert!(config.set("colour", "on").is_err());
        assert!(config.get("colour").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("idsrules-config-test-{}", std::process::id()))
            .join("config.toml");

        let mut config = Config::default();
        config.set("default_format", "yaml").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_is_default() {
        let loaded = Config::load_from(Path::new("/nonexistent/idsrules/config.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }
}
