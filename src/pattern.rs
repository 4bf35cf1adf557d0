//! Compiled, anchored, line-aware patterns used by rules.
//!
//! A [`Pattern`] is always matched *at* a position, never searched for. `^` and
//! `$` match at line boundaries and look at the text before the match offset, so
//! `^\n` only matches a terminator that starts a line. `.` never matches `\n`.

use std::fmt;

use regex_automata::{meta::Regex, util::syntax, Anchored, Input};

use crate::cursor::Span;
use crate::diagnostics::ScanError;

#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, ScanError> {
        let regex = Regex::builder()
            .syntax(syntax::Config::new().multi_line(true))
            .build(source)
            .map_err(|e| ScanError::InvalidPattern {
                pattern: source.to_string(),
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// A pattern matching `text` verbatim.
    pub fn literal(text: &str) -> Result<Self, ScanError> {
        Self::new(&regex::escape(text))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of explicit capture groups (group 0 excluded).
    pub fn group_count(&self) -> usize {
        self.regex.captures_len().saturating_sub(1)
    }

    /// Matches at exactly `start`, returning the span of every group.
    ///
    /// Index 0 is the whole match; unmatched optional groups are `None`.
    pub(crate) fn match_at(&self, haystack: &str, start: usize) -> Option<Vec<Option<Span>>> {
        let input = Input::new(haystack)
            .range(start..)
            .anchored(Anchored::Yes);
        let mut caps = self.regex.create_captures();
        self.regex.search_captures(&input, &mut caps);
        if !caps.is_match() {
            return None;
        }
        let groups = (0..caps.group_len())
            .map(|i| caps.get_group(i).map(|s| Span::new(s.start, s.end)))
            .collect();
        Some(groups)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}
