//! Rendering of scan failures through `miette`.

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};
use record_scanner::{parse, Rule, RuleSet, ScanError, Scanner};

fn render(error: &ScanError) -> String {
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor()).with_width(200);
    let mut out = String::new();
    handler.render_report(&mut out, error).unwrap();
    out
}

#[test]
fn test_unexpected_token_report_points_at_line() {
    let err = parse("Domain: example.test\nno colon here\n").unwrap_err();
    let output = render(&err);

    assert!(output.contains("scan::unexpected_token"));
    assert!(output.contains("Unexpected token: no colon here"));
    assert!(output.contains("no rule matches here"));
    assert!(output.contains("Domain: example.test"));
    assert!(output.contains("rule set `default`"));
}

#[test]
fn test_unexpected_token_diagnostic_parts() {
    let err = parse("bad\n").unwrap_err();
    assert_eq!(err.code().unwrap().to_string(), "scan::unexpected_token");
    assert!(err.source_code().is_some());
    let label = err.labels().unwrap().next().unwrap();
    assert_eq!(label.offset(), 0);
    assert_eq!(label.len(), 3);
    assert!(err
        .help()
        .unwrap()
        .to_string()
        .contains("matches the input at offset 0"));
}

#[test]
fn test_stalled_rule_report_names_rule() {
    let rules = RuleSet::builder("stall")
        .append(Rule::new("never-advances", |_cursor, _ctx| true))
        .build()
        .unwrap();
    let err = Scanner::new(rules).parse("abc\n").unwrap_err();
    let output = render(&err);

    assert!(output.contains("scan::stalled_rule"));
    assert!(output.contains("`never-advances` stalled here"));
    assert!(output.contains("at least one character"));
}

#[test]
fn test_construction_errors_render_without_source() {
    let err = RuleSet::builder("dup")
        .with_defaults()
        .with_defaults()
        .build()
        .unwrap_err();
    let output = render(&err);
    assert!(output.contains("rules::duplicate_rule"));
    assert!(output.contains("Duplicate rule `skip-empty-line` in rule set `dup`"));
}

#[test]
fn test_long_lines_are_bounded_in_snippet() {
    let line = "x".repeat(500);
    let err = parse(&format!("{}\n", line)).unwrap_err();
    let snippet = err.snippet().unwrap();
    assert_eq!(snippet.len(), 120);
    assert!(!snippet.is_empty());
}
