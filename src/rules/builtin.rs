//! Built-in rules, in the order a default rule set tries them.

use once_cell::sync::Lazy;

use crate::context::ParseContext;
use crate::cursor::{Captures, Cursor};
use crate::pattern::Pattern;
use crate::rules::Rule;

pub const SKIP_EMPTY_LINE: &str = "skip-empty-line";
pub const SKIP_NEWLINE: &str = "skip-newline";
pub const SCAN_KEYVALUE: &str = "scan-keyvalue";

static EMPTY_LINE: Lazy<Pattern> = Lazy::new(|| Pattern::new(r"^\n").expect("valid pattern"));
static NEWLINE: Lazy<Pattern> = Lazy::new(|| Pattern::new(r"\n").expect("valid pattern"));
static KEY_VALUE: Lazy<Pattern> =
    Lazy::new(|| Pattern::new(r"(.+?):(.*?)\n").expect("valid pattern"));

/// Consumes a terminator that starts a line.
pub fn skip_empty_line(cursor: &mut Cursor<'_>, _ctx: &mut ParseContext) -> bool {
    cursor.skip(&EMPTY_LINE).is_some()
}

/// Consumes a bare terminator.
pub fn skip_newline(cursor: &mut Cursor<'_>, _ctx: &mut ParseContext) -> bool {
    cursor.skip(&NEWLINE).is_some()
}

/// `<key>:<value>\n`, key up to the first colon, both sides trimmed.
///
/// Repeated keys coalesce into a sequence in input order.
pub fn scan_keyvalue(cursor: &mut Cursor<'_>, ctx: &mut ParseContext) -> bool {
    let Some(caps) = cursor.try_match(&KEY_VALUE) else {
        return false;
    };
    insert_pair(&caps, ctx);
    true
}

/// Coalesces groups 1 and 2, trimmed, into the AST as key and value.
pub(crate) fn insert_pair(caps: &Captures<'_>, ctx: &mut ParseContext) {
    let key = caps.trimmed(1).unwrap_or_default();
    let value = caps.trimmed(2).unwrap_or_default();
    ctx.ast.insert(key, value);
}

pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(SKIP_EMPTY_LINE, skip_empty_line),
        Rule::new(SKIP_NEWLINE, skip_newline),
        Rule::new(SCAN_KEYVALUE, scan_keyvalue),
    ]
}
