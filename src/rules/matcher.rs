//! Filename matching - pure predicates over a note's base name

use serde::{Deserialize, Serialize, de};
use std::fmt;
use std::str::FromStr;

use super::Rule;

/// Strategy for testing a match string against a base filename.
///
/// A closed set: unknown values are rejected when the configuration is
/// parsed, not silently treated as a wildcard at match time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMethod {
    Prefix,
    Suffix,
    #[default]
    Contains,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Prefix => "prefix",
            MatchMethod::Suffix => "suffix",
            MatchMethod::Contains => "contains",
        }
    }

    fn test(&self, basename: &str, needle: &str) -> bool {
        match self {
            MatchMethod::Prefix => basename.starts_with(needle),
            MatchMethod::Suffix => basename.ends_with(needle),
            MatchMethod::Contains => basename.contains(needle),
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMethod {
    type Err = String;

    /// Values are trimmed and lowercased before dispatch
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prefix" => Ok(MatchMethod::Prefix),
            "suffix" => Ok(MatchMethod::Suffix),
            "contains" => Ok(MatchMethod::Contains),
            other => Err(format!(
                "unknown match method '{}' (expected prefix, suffix or contains)",
                other
            )),
        }
    }
}

impl Serialize for MatchMethod {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MatchMethod {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl Rule {
    /// Check if a note's base filename satisfies this rule.
    ///
    /// A rule with an empty (after trimming) match string never matches,
    /// so an unset rule cannot behave as a wildcard.
    pub fn matches(&self, basename: &str, case_sensitive: bool) -> bool {
        let needle = self.match_string.trim();
        if needle.is_empty() {
            return false;
        }

        if case_sensitive {
            self.method.test(basename, needle)
        } else {
            self.method
                .test(&basename.to_lowercase(), &needle.to_lowercase())
        }
    }
}
