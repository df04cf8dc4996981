//! Rule resolution - first listed match wins

use tracing::{debug, trace};

use super::Rule;

/// Ordered rule set resolved against note basenames
pub struct RuleEngine {
    rules: Vec<Rule>,
}

impl RuleEngine {
    /// Create a new engine with the given ordered rules
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Find the first rule matching a note's base filename.
    ///
    /// Rules are scanned in configuration order; when several rules would
    /// match, the first listed one always wins, so resolution is stable for
    /// a given rule list and basename.
    pub fn find_match(&self, basename: &str, case_sensitive: bool) -> Option<&Rule> {
        for rule in &self.rules {
            if rule.matches(basename, case_sensitive) {
                debug!(
                    "Rule '{}' ({}) matched: {}",
                    rule.match_string, rule.method, basename
                );
                return Some(rule);
            }
            trace!("Rule '{}' did not match: {}", rule.match_string, basename);
        }

        None
    }

    /// Get all rules
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Add a rule at the end of the list
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Remove a rule by index
    pub fn remove_rule(&mut self, index: usize) -> Option<Rule> {
        if index < self.rules.len() {
            Some(self.rules.remove(index))
        } else {
            None
        }
    }
}
