// # Rules
//
// A rule is a named unit of matching logic tried against the cursor. Rules are
// plain `(name, function)` pairs assembled into a `RuleSet`; nothing is
// registered at runtime.
//
// ## Module Structure
//
// - **`builtin`**: the default rules every rule set starts from
// - **`helpers`**: multi-line scanning building blocks for variant rules
//
// ## Contract
//
// A rule returns `true` only when it consumed input. Returning `true` without
// advancing the cursor is reported by the scanner as a stalled rule.

use std::fmt;
use std::sync::Arc;

use crate::context::ParseContext;
use crate::cursor::Cursor;
use crate::diagnostics::ScanError;
use crate::pattern::Pattern;

pub mod builtin;
pub mod helpers;

pub use builtin::{
    default_rules, scan_keyvalue, skip_empty_line, skip_newline, SCAN_KEYVALUE, SKIP_EMPTY_LINE,
    SKIP_NEWLINE,
};
pub use helpers::{scan_lines_to_mapping, scan_lines_to_sequence};

/// Signature shared by every rule body.
pub type RuleFn = dyn Fn(&mut Cursor<'_>, &mut ParseContext) -> bool + Send + Sync;

#[derive(Clone)]
pub struct Rule {
    name: String,
    apply: Arc<RuleFn>,
}

impl Rule {
    pub fn new<F>(name: impl Into<String>, apply: F) -> Self
    where
        F: Fn(&mut Cursor<'_>, &mut ParseContext) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            apply: Arc::new(apply),
        }
    }

    /// A rule that consumes `pattern` and leaves the AST alone.
    pub fn skip(name: impl Into<String>, pattern: &str) -> Result<Self, ScanError> {
        let pattern = Pattern::new(pattern)?;
        Ok(Self::new(name, move |cursor, _ctx| {
            cursor.skip(&pattern).is_some()
        }))
    }

    /// A rule storing `pattern`'s first two groups as a coalesced key/value pair.
    pub fn keyvalue(name: impl Into<String>, pattern: &str) -> Result<Self, ScanError> {
        let pattern = Pattern::new(pattern)?;
        Ok(Self::new(name, move |cursor, ctx| {
            let Some(caps) = cursor.try_match(&pattern) else {
                return false;
            };
            builtin::insert_pair(&caps, ctx);
            true
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, cursor: &mut Cursor<'_>, ctx: &mut ParseContext) -> bool {
        (self.apply)(cursor, ctx)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}
