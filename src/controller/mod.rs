//! Event controller - applies templates on note create and rename
//!
//! Two stateless handlers. Configuration is passed into every call; the
//! controller keeps no history, and the rename idempotence guard is a pure
//! function of (old basename, new basename, rule).

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::rules::{Rule, RuleEngine};
use crate::template;
use crate::vault::{Vault, basename};

/// Applies templates to notes in a vault
pub struct TemplateController<V: Vault> {
    vault: V,
}

impl<V: Vault> TemplateController<V> {
    pub fn new(vault: V) -> Self {
        Self { vault }
    }

    pub fn vault(&self) -> &V {
        &self.vault
    }

    /// Handle a newly created note. Returns true if a template was applied.
    ///
    /// Never propagates an error: storage failures are logged and the event
    /// is dropped, so the host event loop stays unaffected.
    pub fn on_create(&self, config: &Config, path: &Path) -> bool {
        match self.apply_on_create(config, path, &Local::now()) {
            Ok(applied) => applied,
            Err(e) => {
                warn!("Templating failed for {}: {:#}", path.display(), e);
                false
            }
        }
    }

    /// Handle a renamed note. Returns true if a template was applied.
    pub fn on_rename(&self, config: &Config, path: &Path, old_path: &Path) -> bool {
        match self.apply_on_rename(config, path, old_path, &Local::now()) {
            Ok(applied) => applied,
            Err(e) => {
                warn!("Templating failed for {}: {:#}", path.display(), e);
                false
            }
        }
    }

    fn apply_on_create(
        &self,
        config: &Config,
        path: &Path,
        now: &DateTime<Local>,
    ) -> Result<bool> {
        let engine = RuleEngine::new(config.rules.clone());
        let Some(rule) = engine.find_match(basename(path), config.templates.case_sensitive) else {
            return Ok(false);
        };

        // A freshly created note is empty, so a plain overwrite is safe
        let content = self.render_template(config, rule, now);
        self.vault
            .overwrite_content(path, &content)
            .with_context(|| format!("Failed to write note {}", path.display()))?;

        info!(
            "Applied template {} to new note {}",
            rule.template_path.display(),
            path.display()
        );
        Ok(true)
    }

    fn apply_on_rename(
        &self,
        config: &Config,
        path: &Path,
        old_path: &Path,
        now: &DateTime<Local>,
    ) -> Result<bool> {
        let engine = RuleEngine::new(config.rules.clone());
        let Some(rule) = engine.find_match(basename(path), config.templates.case_sensitive) else {
            return Ok(false);
        };

        if !config.templates.on_rename {
            debug!("Templating on rename is disabled, skipping {}", path.display());
            return Ok(false);
        }

        // Idempotence guard: if the old name already satisfied this same
        // rule, the template is already in the note. Reapplying it would
        // duplicate content on every trivial rename.
        if rule.matches(basename(old_path), config.templates.case_sensitive) {
            debug!(
                "Old name '{}' already matched rule '{}', leaving {} unchanged",
                basename(old_path),
                rule.match_string,
                path.display()
            );
            return Ok(false);
        }

        let rendered = self.render_template(config, rule, now);

        // A renamed note may carry user content; prepend instead of overwrite
        let existing = self
            .vault
            .read_content(path)
            .with_context(|| format!("Failed to read note {}", path.display()))?;
        let merged = format!("{}\n\n{}", rendered, existing);
        self.vault
            .overwrite_content(path, &merged)
            .with_context(|| format!("Failed to write note {}", path.display()))?;

        info!(
            "Applied template {} to renamed note {}",
            rule.template_path.display(),
            path.display()
        );
        Ok(true)
    }

    /// Load and render a rule's template.
    /// A missing or unreadable template degrades to empty content.
    pub fn render_template(&self, config: &Config, rule: &Rule, now: &DateTime<Local>) -> String {
        let content = match template::load_content(&self.vault, &rule.template_path) {
            Ok(content) => content,
            Err(e) => {
                warn!("{:#}, applying empty content", e);
                String::new()
            }
        };

        template::render(
            &content,
            &config.templates.date_format,
            &config.templates.time_format,
            now,
        )
    }
}
