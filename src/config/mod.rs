//! Configuration management

mod schema;

pub use schema::{Config, GeneralConfig, TemplateConfig};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

impl Config {
    /// Load configuration from a file or the default location.
    ///
    /// Missing file means defaults; present keys override defaults key by
    /// key (serde field defaults give the shallow merge).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(PathBuf::from)
            .or_else(Self::default_path)
            .context("Could not determine config path")?;

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

            let config: Config = toml::from_str(&content).with_context(|| {
                format!("Failed to parse config from {}", config_path.display())
            })?;

            config
        } else {
            Self::default()
        };

        for warning in config.validate() {
            warn!("Config: {}", warning);
        }

        Ok(config)
    }

    /// Save configuration to a file (with advisory file locking)
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = path
            .map(PathBuf::from)
            .or_else(Self::default_path)
            .context("Could not determine config path")?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        // Use a lockfile to prevent concurrent writes
        let lock_path = config_path.with_extension("toml.lock");
        let lock_file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

        use fs2::FileExt;
        lock_file
            .lock_exclusive()
            .with_context(|| "Failed to acquire config file lock")?;

        let result = std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config to {}", config_path.display()));

        let _ = lock_file.unlock();

        result
    }

    /// Check the configuration for rules that cannot do anything useful.
    ///
    /// These are warnings, not errors: an inert rule simply never matches.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (i, rule) in self.rules.iter().enumerate() {
            if rule.match_string.trim().is_empty() {
                warnings.push(format!(
                    "rule {} has an empty match string and will never match",
                    i + 1
                ));
            }
            if rule.template_path.as_os_str().is_empty() {
                warnings.push(format!("rule {} has an empty template path", i + 1));
            }
        }

        warnings
    }

    /// Template folder with trailing path separators stripped
    pub fn template_folder(&self) -> PathBuf {
        let s = self.templates.folder.to_string_lossy();
        PathBuf::from(s.trim_end_matches(['/', '\\']))
    }

    /// Get the default config file path
    /// Uses the platform config directory (via dirs::config_dir), falling back to ~/.config
    pub fn default_path() -> Option<PathBuf> {
        let config_base =
            dirs::config_dir().or_else(|| dirs::home_dir().map(|d| d.join(".config")))?;
        Some(config_base.join("stencil").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{MatchMethod, Rule};

    #[test]
    fn test_validate_flags_inert_rules() {
        let mut config = Config::default();
        config
            .rules
            .push(Rule::new("  ", MatchMethod::Prefix, "Templates/T.md"));
        config
            .rules
            .push(Rule::new("TODO", MatchMethod::Prefix, ""));

        let warnings = config.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("never match"));
    }

    #[test]
    fn test_validate_clean_config() {
        let mut config = Config::default();
        config
            .rules
            .push(Rule::new("TODO", MatchMethod::Prefix, "Templates/TODO.md"));

        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_template_folder_normalized() {
        let mut config = Config::default();
        config.templates.folder = PathBuf::from("Templates/");

        assert_eq!(config.template_folder(), PathBuf::from("Templates"));
    }

    #[test]
    fn test_load_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.templates.on_rename = true;
        config
            .rules
            .push(Rule::new("TODO", MatchMethod::Prefix, "Templates/TODO.md"));
        config.save(Some(&path)).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert!(loaded.templates.on_rename);
        assert_eq!(loaded.rules.len(), 1);
    }
}
