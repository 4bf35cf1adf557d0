//! Ordered, immutable rule sets and the builder that assembles them.
//!
//! A parser variant builds its rule set once, typically starting from the
//! built-ins, and shares it read-only with every parse:
//!
//! ```rust
//! use record_scanner::{Rule, RuleSet};
//!
//! let rules = RuleSet::builder("dotted")
//!     .with_defaults()
//!     .insert_before(
//!         "scan-keyvalue",
//!         Rule::keyvalue("scan-dotted", r"(.+?)\.{3,}(.*)\n").unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//! assert_eq!(rules.names().collect::<Vec<_>>(),
//!            ["skip-empty-line", "skip-newline", "scan-dotted", "scan-keyvalue"]);
//! ```
//!
//! Structural mistakes (a duplicate name, an anchor that does not exist) are
//! remembered by the builder and reported once by [`RuleSetBuilder::build`].

use std::collections::HashSet;
use std::sync::Arc;

use crate::diagnostics::ScanError;
use crate::rules::{default_rules, Rule};

pub const DEFAULT_RULE_SET: &str = "default";

#[derive(Debug, Clone)]
pub struct RuleSet {
    name: String,
    rules: Arc<[Rule]>,
}

impl RuleSet {
    pub fn builder(name: impl Into<String>) -> RuleSetBuilder {
        RuleSetBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(Rule::name)
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The built-in rules under the name `default`.
impl Default for RuleSet {
    fn default() -> Self {
        Self {
            name: DEFAULT_RULE_SET.to_string(),
            rules: default_rules().into(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[derive(Debug)]
pub struct RuleSetBuilder {
    name: String,
    rules: Vec<Rule>,
    error: Option<ScanError>,
}

impl RuleSetBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
            error: None,
        }
    }

    /// Appends the built-in rules.
    pub fn with_defaults(mut self) -> Self {
        self.rules.extend(default_rules());
        self
    }

    /// Starts from an existing rule set, keeping its order.
    pub fn extend_from(mut self, base: &RuleSet) -> Self {
        self.rules.extend(base.iter().cloned());
        self
    }

    pub fn append(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn prepend(mut self, rule: Rule) -> Self {
        self.rules.insert(0, rule);
        self
    }

    pub fn insert_before(mut self, anchor: &str, rule: Rule) -> Self {
        if let Some(i) = self.position_of(anchor) {
            self.rules.insert(i, rule);
        }
        self
    }

    pub fn insert_after(mut self, anchor: &str, rule: Rule) -> Self {
        if let Some(i) = self.position_of(anchor) {
            self.rules.insert(i + 1, rule);
        }
        self
    }

    /// Swaps the rule called `name` for `rule`, keeping its slot.
    pub fn replace(mut self, name: &str, rule: Rule) -> Self {
        if let Some(i) = self.position_of(name) {
            self.rules[i] = rule;
        }
        self
    }

    pub fn remove(mut self, name: &str) -> Self {
        if let Some(i) = self.position_of(name) {
            self.rules.remove(i);
        }
        self
    }

    pub fn build(self) -> Result<RuleSet, ScanError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.name()) {
                return Err(ScanError::DuplicateRule {
                    rule_set: self.name.clone(),
                    rule: rule.name().to_string(),
                });
            }
        }
        Ok(RuleSet {
            name: self.name,
            rules: self.rules.into(),
        })
    }

    /// Looks up `name`, recording an `UnknownRule` error when it is missing.
    fn position_of(&mut self, name: &str) -> Option<usize> {
        let found = self.rules.iter().position(|r| r.name() == name);
        if found.is_none() && self.error.is_none() {
            self.error = Some(ScanError::UnknownRule {
                rule_set: self.name.clone(),
                rule: name.to_string(),
            });
        }
        found
    }
}
