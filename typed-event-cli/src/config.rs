//! Configuration loading and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Demo configuration (loaded from a TOML file, or built in)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_logins")]
    pub logins: Vec<LoginConfig>,
    #[serde(default)]
    pub listeners: ListenersConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logins: default_logins(),
            listeners: ListenersConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

fn default_logins() -> Vec<LoginConfig> {
    vec![LoginConfig {
        username: "Alice".to_string(),
        user_id: 1,
    }]
}

/// One login to dispatch
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoginConfig {
    pub username: String,
    pub user_id: u64,
}

/// Which listeners get subscribed to the login event
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenersConfig {
    #[serde(default = "default_true")]
    pub welcome: bool,
    #[serde(default = "default_true")]
    pub audit: bool,
    /// Usernames refused by the guard listener (guard is off when empty)
    #[serde(default)]
    pub reject_banned: Vec<String>,
}

impl Default for ListenersConfig {
    fn default() -> Self {
        Self {
            welcome: true,
            audit: true,
            reject_banned: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Txt,
    Json,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [[logins]]
            username = "Alice"
            user_id = 1

            [[logins]]
            username = "Mallory"
            user_id = 66

            [listeners]
            audit = false
            reject_banned = ["Mallory"]

            [output]
            format = "json"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.logins.len(), 2);
        assert_eq!(config.logins[1].user_id, 66);
        assert!(config.listeners.welcome);
        assert!(!config.listeners.audit);
        assert_eq!(config.listeners.reject_banned, vec!["Mallory"]);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.logins, default_logins());
        assert!(config.listeners.welcome);
        assert!(config.listeners.audit);
        assert!(config.listeners.reject_banned.is_empty());
        assert_eq!(config.output.format, OutputFormat::Txt);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[logins]]\nusername = \"Bob\"\nuser_id = 7").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(
            config.logins,
            vec![LoginConfig {
                username: "Bob".to_string(),
                user_id: 7,
            }]
        );
    }

    #[test]
    fn test_load_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("missing.toml")).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nformat = \"html\"").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }
}
