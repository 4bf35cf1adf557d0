//! Unified, `miette`-based diagnostics for the scanning core.
//!
//! Every failure the crate can produce is a [`ScanError`]. Scanning failures
//! (`UnexpectedToken`, `StalledRule`) carry the input text and the failing
//! offset so a caller can render a labelled report; construction failures
//! (patterns, rule sets, configuration) carry only a message.
//!
//! Scanning errors abort the whole parse. There is no recovery inside the
//! core: the record-building layer decides whether to log, re-raise or give up.

use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::cursor::Span;

pub type SourceArc = Arc<NamedSource<String>>;

/// Coarse classification of a [`ScanError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// The dispatch loop could not advance over the input.
    Scan,
    /// A pattern or rule set could not be assembled.
    Construction,
    /// Scanner configuration was unreadable or out of range.
    Config,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Scan => "Scan",
            ErrorType::Construction => "Construction",
            ErrorType::Config => "Config",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Source, span and help text attached to scanning errors.
#[derive(Debug, Default)]
pub struct ErrorContext {
    pub source: Option<SourceArc>,
    pub span: Option<Span>,
    pub help: Option<String>,
}

impl ErrorContext {
    /// Context pointing at `span` inside `text`.
    pub fn with_source_and_span(text: &str, span: Span) -> Self {
        Self {
            source: Some(to_error_source(text)),
            span: Some(span),
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Unexpected token: {snippet}")]
    UnexpectedToken {
        rule_set: String,
        position: usize,
        snippet: String,
        ctx: ErrorContext,
    },
    #[error("Rule `{rule}` in rule set `{rule_set}` matched without consuming input at offset {position}")]
    StalledRule {
        rule_set: String,
        rule: String,
        position: usize,
        ctx: ErrorContext,
    },
    #[error("Invalid pattern `{pattern}`: {message}")]
    InvalidPattern {
        pattern: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    #[error("Duplicate rule `{rule}` in rule set `{rule_set}`")]
    DuplicateRule { rule_set: String, rule: String },
    #[error("Unknown rule `{rule}` in rule set `{rule_set}`")]
    UnknownRule { rule_set: String, rule: String },
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
}

impl ScanError {
    /// Builds the error raised when no rule in `rule_set` matches at `position`.
    ///
    /// The snippet holds at most `snippet_limit` characters (never fewer than one)
    /// of the unconsumed input.
    pub fn unexpected_token(
        rule_set: &str,
        text: &str,
        position: usize,
        snippet_limit: usize,
    ) -> Self {
        let snippet = take_chars(&text[position..], snippet_limit.max(1)).to_string();
        let line_len = snippet.find('\n').unwrap_or(snippet.len()).max(1);
        let span = Span::new(position, (position + line_len).min(text.len()));
        let ctx = ErrorContext::with_source_and_span(text, span).with_help(format!(
            "no rule in rule set `{}` matches the input at offset {}",
            rule_set, position
        ));
        ScanError::UnexpectedToken {
            rule_set: rule_set.to_string(),
            position,
            snippet,
            ctx,
        }
    }

    pub fn stalled_rule(rule_set: &str, rule: &str, text: &str, position: usize) -> Self {
        let width = text[position..].chars().next().map_or(0, char::len_utf8);
        let span = Span::new(position, position + width);
        let ctx = ErrorContext::with_source_and_span(text, span).with_help(
            "a rule that reports a match must advance the cursor by at least one character",
        );
        ScanError::StalledRule {
            rule_set: rule_set.to_string(),
            rule: rule.to_string(),
            position,
            ctx,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ScanError::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn error_type(&self) -> ErrorType {
        match self {
            ScanError::UnexpectedToken { .. } | ScanError::StalledRule { .. } => ErrorType::Scan,
            ScanError::InvalidPattern { .. }
            | ScanError::DuplicateRule { .. }
            | ScanError::UnknownRule { .. } => ErrorType::Construction,
            ScanError::Config { .. } => ErrorType::Config,
        }
    }

    /// Unconsumed text captured by an `UnexpectedToken` error.
    pub fn snippet(&self) -> Option<&str> {
        match self {
            ScanError::UnexpectedToken { snippet, .. } => Some(snippet),
            _ => None,
        }
    }

    /// Byte offset at which scanning stopped.
    pub fn position(&self) -> Option<usize> {
        match self {
            ScanError::UnexpectedToken { position, .. }
            | ScanError::StalledRule { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub fn rule_set(&self) -> Option<&str> {
        match self {
            ScanError::UnexpectedToken { rule_set, .. }
            | ScanError::StalledRule { rule_set, .. }
            | ScanError::DuplicateRule { rule_set, .. }
            | ScanError::UnknownRule { rule_set, .. } => Some(rule_set),
            _ => None,
        }
    }

    fn ctx(&self) -> Option<&ErrorContext> {
        match self {
            ScanError::UnexpectedToken { ctx, .. } | ScanError::StalledRule { ctx, .. } => Some(ctx),
            _ => None,
        }
    }
}

impl Diagnostic for ScanError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self {
            ScanError::UnexpectedToken { .. } => "scan::unexpected_token",
            ScanError::StalledRule { .. } => "scan::stalled_rule",
            ScanError::InvalidPattern { .. } => "rules::invalid_pattern",
            ScanError::DuplicateRule { .. } => "rules::duplicate_rule",
            ScanError::UnknownRule { .. } => "rules::unknown_rule",
            ScanError::Config { .. } => "config::invalid",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.ctx()?
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.ctx()?
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.ctx()?.span?;
        let label = match self {
            ScanError::StalledRule { rule, .. } => format!("`{}` stalled here", rule),
            _ => "no rule matches here".to_string(),
        };
        let len = if span.end > span.start {
            span.end - span.start
        } else {
            0
        };
        Some(Box::new(std::iter::once(LabeledSpan::new(
            Some(label),
            span.start,
            len,
        ))))
    }
}

/// Wraps scanned text for use in error contexts.
pub fn to_error_source<S: AsRef<str>>(source: S) -> SourceArc {
    Arc::new(NamedSource::new("input", source.as_ref().to_string()))
}

/// Returns the prefix of `text` holding at most `limit` characters.
pub(crate) fn take_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
