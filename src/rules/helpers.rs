//! Multi-line scanning building blocks for variant rules.
//!
//! Both helpers stop at the first line that does not match, and at a match
//! that consumes nothing.
//!
//! The mapping helper keeps the *last* value of a repeated key. That differs
//! from the top-level `scan-keyvalue` rule, which coalesces repeats into a
//! sequence.

use std::collections::BTreeMap;

use crate::cursor::Cursor;
use crate::pattern::Pattern;

/// Collects the trimmed first group of each consecutive match of `pattern`.
pub fn scan_lines_to_sequence(cursor: &mut Cursor<'_>, pattern: &Pattern) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(caps) = cursor.try_match(pattern) {
        if caps.matched().is_empty() {
            break;
        }
        lines.push(caps.trimmed(1).unwrap_or_default().to_string());
    }
    lines
}

/// Collects `(key, value)` from the first two groups of each consecutive match.
pub fn scan_lines_to_mapping(cursor: &mut Cursor<'_>, pattern: &Pattern) -> BTreeMap<String, String> {
    let mut lines = BTreeMap::new();
    while let Some(caps) = cursor.try_match(pattern) {
        if caps.matched().is_empty() {
            break;
        }
        let key = caps.trimmed(1).unwrap_or_default().to_string();
        let value = caps.trimmed(2).unwrap_or_default().to_string();
        lines.insert(key, value);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_stops_at_first_non_match() {
        let pattern = Pattern::new(r"\s+(.+)\n").unwrap();
        let mut cursor = Cursor::new("  ns1.example.test \n  ns2.example.test\nStatus: ok\n");
        let lines = scan_lines_to_sequence(&mut cursor, &pattern);
        assert_eq!(lines, vec!["ns1.example.test", "ns2.example.test"]);
        assert_eq!(cursor.rest(), "Status: ok\n");
    }

    #[test]
    fn test_sequence_may_be_empty() {
        let pattern = Pattern::new(r"\s+(.+)\n").unwrap();
        let mut cursor = Cursor::new("Status: ok\n");
        assert!(scan_lines_to_sequence(&mut cursor, &pattern).is_empty());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_mapping_last_value_wins() {
        let pattern = Pattern::new(r"\s+(.+?):(.*)\n").unwrap();
        let mut cursor = Cursor::new("  Name: First\n  City: Rome\n  Name: Second\n");
        let map = scan_lines_to_mapping(&mut cursor, &pattern);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("Name").map(String::as_str), Some("Second"));
        assert_eq!(map.get("City").map(String::as_str), Some("Rome"));
        assert!(cursor.at_end());
    }

    #[test]
    fn test_zero_width_pattern_does_not_loop() {
        let pattern = Pattern::new(r"(x*)").unwrap();
        let mut cursor = Cursor::new("abc");
        assert!(scan_lines_to_sequence(&mut cursor, &pattern).is_empty());
        assert!(scan_lines_to_mapping(&mut cursor, &pattern).is_empty());
        assert_eq!(cursor.position(), 0);
    }
}
