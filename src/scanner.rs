//! The dispatch loop.
//!
//! Each step tries the rule set in declared order and stops at the first rule
//! that consumed input; the next step starts again from the top. The scan ends
//! successfully when the cursor reaches the end of the text and fails as soon
//! as a step cannot advance.

use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::ast::Ast;
use crate::config::ScannerConfig;
use crate::context::ParseContext;
use crate::cursor::Cursor;
use crate::diagnostics::ScanError;
use crate::ruleset::RuleSet;

static DEFAULT_SCANNER: Lazy<Scanner> = Lazy::new(Scanner::default);

/// Parses `text` with the built-in rule set.
pub fn parse(text: &str) -> Result<Ast, ScanError> {
    DEFAULT_SCANNER.parse(text)
}

/// Binds a rule set to a configuration.
///
/// Cheap to clone and safe to share between threads; every call to
/// [`Scanner::parse`] gets its own cursor and context.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    rules: Arc<RuleSet>,
    config: ScannerConfig,
}

enum ScanState {
    Running,
    Success,
    Failed(ScanError),
}

impl Scanner {
    pub fn new(rules: RuleSet) -> Self {
        Self::from_shared(Arc::new(rules))
    }

    pub fn from_shared(rules: Arc<RuleSet>) -> Self {
        Self {
            rules,
            config: ScannerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ScannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rules
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn parse(&self, text: &str) -> Result<Ast, ScanError> {
        debug!(rule_set = self.rules.name(), len = text.len(), "scan started");
        let mut cursor = Cursor::new(text);
        let mut ctx = ParseContext::new();
        loop {
            match self.step(&mut cursor, &mut ctx) {
                ScanState::Running => continue,
                ScanState::Success => {
                    debug!(
                        rule_set = self.rules.name(),
                        keys = ctx.ast.len(),
                        "scan finished"
                    );
                    return Ok(ctx.into_ast());
                }
                ScanState::Failed(err) => {
                    debug!(
                        rule_set = self.rules.name(),
                        position = cursor.position(),
                        "scan failed"
                    );
                    return Err(err);
                }
            }
        }
    }

    fn step(&self, cursor: &mut Cursor<'_>, ctx: &mut ParseContext) -> ScanState {
        if cursor.at_end() {
            return ScanState::Success;
        }
        let start = cursor.position();
        for rule in self.rules.iter() {
            if !rule.apply(cursor, ctx) {
                continue;
            }
            let end = cursor.position();
            if end <= start {
                return ScanState::Failed(ScanError::stalled_rule(
                    self.rules.name(),
                    rule.name(),
                    cursor.text(),
                    start,
                ));
            }
            trace!(
                rule = rule.name(),
                offset = start,
                consumed = end - start,
                "rule applied"
            );
            return ScanState::Running;
        }
        ScanState::Failed(ScanError::unexpected_token(
            self.rules.name(),
            cursor.text(),
            start,
            self.config.snippet_limit,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Value;
    use crate::pattern::Pattern;
    use crate::rules::Rule;

    #[test]
    fn test_empty_input_yields_empty_ast() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_single_pair() {
        let ast = parse("Key: Value\n").unwrap();
        assert_eq!(ast.get("Key"), Some(&Value::from("Value")));
        assert_eq!(ast.len(), 1);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let pattern = Pattern::new(r"(.+?):(.*?)\n").unwrap();
        let rules = RuleSet::builder("shadowed")
            .with_defaults()
            .prepend(Rule::new("lowercase-keys", move |cursor, ctx| {
                let Some(caps) = cursor.try_match(&pattern) else {
                    return false;
                };
                let key = caps.trimmed(1).unwrap_or_default().to_lowercase();
                ctx.ast.insert(key, caps.trimmed(2).unwrap_or_default());
                true
            }))
            .build()
            .unwrap();
        let ast = Scanner::new(rules).parse("Key: a\n").unwrap();
        assert_eq!(ast.get("key"), Some(&Value::from("a")));
        assert!(!ast.contains_key("Key"));
    }

    #[test]
    fn test_stalled_rule_fails_fast() {
        let rules = RuleSet::builder("broken")
            .prepend(Rule::new("zero-width", |_cursor, _ctx| true))
            .with_defaults()
            .build()
            .unwrap();
        let err = Scanner::new(rules).parse("Key: v\n").unwrap_err();
        assert!(matches!(
            err,
            ScanError::StalledRule { ref rule, position: 0, .. } if rule == "zero-width"
        ));
    }

    #[test]
    fn test_rewinding_rule_fails_instead_of_looping() {
        let rules = RuleSet::builder("rewinding")
            .with_defaults()
            .prepend(Rule::new("rewind", |cursor, _ctx| {
                if cursor.position() == 0 {
                    return false;
                }
                *cursor = Cursor::new(cursor.text());
                true
            }))
            .build()
            .unwrap();
        let err = Scanner::new(rules).parse("A: 1\nB: 2\n").unwrap_err();
        assert!(matches!(
            err,
            ScanError::StalledRule { ref rule, position: 5, .. } if rule == "rewind"
        ));
    }

    #[test]
    fn test_snippet_limit_from_config() {
        let scanner = Scanner::default().with_config(ScannerConfig::default().with_snippet_limit(5));
        let err = scanner.parse("garbage line\n").unwrap_err();
        assert_eq!(err.snippet(), Some("garba"));
        assert_eq!(err.rule_set(), Some("default"));
    }

    #[test]
    fn test_failure_after_progress_reports_offset() {
        let err = parse("Key: v\nbroken\n").unwrap_err();
        assert_eq!(err.position(), Some(7));
        assert_eq!(err.snippet(), Some("broken\n"));
    }
}
