//! # record-scanner
//!
//! Rule-driven scanning core for free-text record responses. A [`Scanner`]
//! walks a [`Cursor`] over the input and applies the first matching [`Rule`]
//! of its [`RuleSet`] until the text is exhausted, producing a key/value
//! [`Ast`]. Parser variants extend the built-in rules through
//! [`RuleSet::builder`].
//!
//! ```rust
//! use record_scanner::{parse, Value};
//!
//! let ast = parse("Domain: example.test\nStatus: ok\nStatus: locked\n").unwrap();
//! assert_eq!(ast.get("Domain"), Some(&Value::from("example.test")));
//! assert_eq!(ast.get("Status"), Some(&Value::from(vec!["ok", "locked"])));
//! ```

pub use crate::ast::{Ast, Value};
pub use crate::config::ScannerConfig;
pub use crate::context::{ParseContext, Scratch};
pub use crate::cursor::{Captures, Cursor, Span};
pub use crate::diagnostics::{ErrorType, ScanError};
pub use crate::pattern::Pattern;
pub use crate::rules::{Rule, RuleFn};
pub use crate::ruleset::{RuleSet, RuleSetBuilder};
pub use crate::scanner::{parse, Scanner};

pub mod ast;
pub mod cli;
pub mod config;
pub mod context;
pub mod cursor;
pub mod diagnostics;
pub mod pattern;
pub mod rules;
pub mod ruleset;
pub mod scanner;
