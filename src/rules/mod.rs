//! Matching rules - which notes get which template

mod engine;
mod matcher;

pub use engine::RuleEngine;
pub use matcher::MatchMethod;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A rule binding a filename pattern to a template note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Substring tested against a note's base filename.
    /// An empty or whitespace-only string matches nothing.
    #[serde(rename = "match")]
    pub match_string: String,

    /// How the match string is tested (prefix, suffix, contains)
    #[serde(default)]
    pub method: MatchMethod,

    /// Vault path of the note whose content is the template body
    #[serde(rename = "template")]
    pub template_path: PathBuf,
}

impl Rule {
    /// Create a new rule
    pub fn new(
        match_string: impl Into<String>,
        method: MatchMethod,
        template_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            match_string: match_string.into(),
            method,
            template_path: template_path.into(),
        }
    }
}
