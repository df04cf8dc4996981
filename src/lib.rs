//! Stencil - filename-triggered note templating
//!
//! Watches a markdown vault and applies a template to a note whenever the
//! note's filename matches a user-defined rule, on create or rename.

pub mod config;
pub mod controller;
pub mod rules;
pub mod template;
pub mod vault;
pub mod watcher;

pub use config::Config;
pub use controller::TemplateController;
pub use rules::{MatchMethod, Rule, RuleEngine};
pub use vault::{FsVault, Vault};
pub use watcher::Watcher;

/// Current version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Expand ~ and environment variables ($VAR, ${VAR}) in a path
pub fn expand_path(path: &std::path::Path) -> std::path::PathBuf {
    let path_str = path.to_string_lossy();

    // First expand ~ prefix
    let expanded = if let Some(stripped) = path_str.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            home.join(stripped).to_string_lossy().to_string()
        } else {
            path_str.to_string()
        }
    } else if path_str == "~" {
        if let Some(home) = dirs::home_dir() {
            home.to_string_lossy().to_string()
        } else {
            path_str.to_string()
        }
    } else {
        path_str.to_string()
    };

    // Then expand $VAR and ${VAR} patterns
    use std::sync::LazyLock;
    static ENV_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
        regex::Regex::new(r"\$\{([^}]+)\}|\$([A-Za-z_][A-Za-z0-9_]*)").expect("invalid env regex")
    });

    let result = ENV_RE.replace_all(&expanded, |caps: &regex::Captures| {
        let var_name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or("");
        std::env::var(var_name).unwrap_or_else(|_| caps[0].to_string())
    });

    std::path::PathBuf::from(result.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_expand_path_tilde() {
        // This test depends on the home directory existing
        let expanded = expand_path(Path::new("~/Notes"));
        assert!(!expanded.to_string_lossy().contains('~'));
    }

    #[test]
    fn test_expand_path_env_var() {
        unsafe { std::env::set_var("STENCIL_TEST_VAULT", "/tmp/vault") };
        let expanded = expand_path(Path::new("$STENCIL_TEST_VAULT/Templates"));
        assert_eq!(expanded, Path::new("/tmp/vault/Templates"));
    }
}
