//! Configuration schema

use crate::rules::Rule;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Vault root directory (CLI --vault overrides)
    #[serde(default)]
    pub vault: Option<PathBuf>,

    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Templating settings
    #[serde(default)]
    pub templates: TemplateConfig,

    /// Filename matching rules, in priority order
    #[serde(default, rename = "rule")]
    pub rules: Vec<Rule>,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Path to log file
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Seconds to wait before processing a created note (debounce)
    #[serde(default = "default_debounce")]
    pub debounce_seconds: u64,

    /// Polling interval in seconds for the file watcher
    #[serde(default = "default_polling_interval")]
    pub polling_interval_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
            debounce_seconds: default_debounce(),
            polling_interval_secs: default_polling_interval(),
        }
    }
}

/// Templating behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Vault folder holding template notes
    #[serde(default = "default_template_folder")]
    pub folder: PathBuf,

    /// Apply templates on rename as well as create.
    /// Off by default so renaming existing notes never injects content
    /// the user didn't ask for.
    #[serde(default)]
    pub on_rename: bool,

    /// Compare match strings case-sensitively
    #[serde(default = "default_true")]
    pub case_sensitive: bool,

    /// Default pattern for {{date}} tokens
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Default pattern for {{time}} tokens
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            folder: default_template_folder(),
            on_rename: false,
            case_sensitive: true,
            date_format: default_date_format(),
            time_format: default_time_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_debounce() -> u64 {
    1
}

fn default_polling_interval() -> u64 {
    5
}

fn default_template_folder() -> PathBuf {
    PathBuf::from("Templates")
}

fn default_true() -> bool {
    true
}

fn default_date_format() -> String {
    "YYYY-MM-DD".to_string()
}

fn default_time_format() -> String {
    "HH:mm".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::MatchMethod;

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert!(config.rules.is_empty());
        assert!(!config.templates.on_rename);
        assert!(config.templates.case_sensitive);
        assert_eq!(config.templates.date_format, "YYYY-MM-DD");
        assert_eq!(config.templates.time_format, "HH:mm");
        assert_eq!(config.templates.folder, PathBuf::from("Templates"));
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            vault = "~/Notes"

            [general]
            log_level = "debug"
            debounce_seconds = 3

            [templates]
            folder = "System/Templates"
            on_rename = true
            case_sensitive = false
            date_format = "DD.MM.YYYY"

            [[rule]]
            match = "TODO"
            method = "prefix"
            template = "System/Templates/TODO.md"

            [[rule]]
            match = "meeting"
            method = "contains"
            template = "System/Templates/Meeting.md"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.general.debounce_seconds, 3);
        assert!(config.templates.on_rename);
        assert!(!config.templates.case_sensitive);
        assert_eq!(config.templates.date_format, "DD.MM.YYYY");
        // Persisted keys win, omitted keys keep their defaults
        assert_eq!(config.templates.time_format, "HH:mm");
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.rules[0].match_string, "TODO");
        assert_eq!(config.rules[0].method, MatchMethod::Prefix);
        assert_eq!(config.rules[1].method, MatchMethod::Contains);
    }

    #[test]
    fn test_round_trip() {
        let mut config = Config::default();
        config
            .rules
            .push(Rule::new("TODO", MatchMethod::Prefix, "Templates/TODO.md"));

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(parsed.rules[0].method, MatchMethod::Prefix);
    }
}
