//! Scan position over the input text.
//!
//! A [`Cursor`] belongs to exactly one parse. Its position only moves forward
//! and always sits on a char boundary; a successful match commits the
//! consumption and nothing ever rewinds it.

use crate::diagnostics::take_chars;
use crate::pattern::Pattern;

/// Byte range inside the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Capture groups of a successful anchored match.
#[derive(Debug, Clone)]
pub struct Captures<'t> {
    text: &'t str,
    groups: Vec<Option<Span>>,
}

impl<'t> Captures<'t> {
    /// Text of group `index`, `None` if the group did not participate.
    pub fn get(&self, index: usize) -> Option<&'t str> {
        let span = self.span(index)?;
        Some(&self.text[span.start..span.end])
    }

    /// Text of group `index` with surrounding whitespace removed.
    pub fn trimmed(&self, index: usize) -> Option<&'t str> {
        self.get(index).map(str::trim)
    }

    pub fn span(&self, index: usize) -> Option<Span> {
        self.groups.get(index).copied().flatten()
    }

    /// The whole match.
    pub fn matched(&self) -> &'t str {
        self.get(0).unwrap_or_default()
    }

    /// Number of groups, including the whole match.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Cursor<'t> {
    text: &'t str,
    position: usize,
}

impl<'t> Cursor<'t> {
    pub fn new(text: &'t str) -> Self {
        Self { text, position: 0 }
    }

    pub fn text(&self) -> &'t str {
        self.text
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn at_end(&self) -> bool {
        self.position == self.text.len()
    }

    /// Everything not yet consumed.
    pub fn rest(&self) -> &'t str {
        &self.text[self.position..]
    }

    /// Up to `limit` characters from the current position.
    pub fn remaining(&self, limit: usize) -> &'t str {
        take_chars(self.rest(), limit)
    }

    /// Matches `pattern` exactly at the current position and advances past it.
    ///
    /// On failure the position is left untouched.
    pub fn try_match(&mut self, pattern: &Pattern) -> Option<Captures<'t>> {
        let groups = pattern.match_at(self.text, self.position)?;
        if let Some(Some(whole)) = groups.first() {
            self.position = whole.end;
        }
        Some(Captures {
            text: self.text,
            groups,
        })
    }

    /// Like [`Cursor::try_match`] but only reports how many bytes were consumed.
    pub fn skip(&mut self, pattern: &Pattern) -> Option<usize> {
        let start = self.position;
        self.try_match(pattern).map(|_| self.position - start)
    }

    /// Anchored lookahead; never moves the cursor.
    pub fn check(&self, pattern: &Pattern) -> Option<Captures<'t>> {
        let groups = pattern.match_at(self.text, self.position)?;
        Some(Captures {
            text: self.text,
            groups,
        })
    }
}
