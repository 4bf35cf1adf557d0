//! User-facing output for the CLI.
//!
//! Text rendering writes through `WriteColor` so tests can capture it in a
//! `termcolor::Buffer`.

use std::io;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::ast::Ast;
use crate::ruleset::RuleSet;

/// Writes one `key: value` line per value, repeated keys once per occurrence.
pub fn write_text<W: WriteColor>(out: &mut W, ast: &Ast) -> io::Result<()> {
    for (key, value) in ast.iter() {
        for item in value.values() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
            write!(out, "{}", key)?;
            out.reset()?;
            writeln!(out, ": {}", item)?;
        }
    }
    Ok(())
}

/// Writes the rule names of `rules`, numbered in dispatch order.
pub fn write_rules<W: WriteColor>(out: &mut W, rules: &RuleSet) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
    writeln!(out, "{}", rules.name())?;
    out.reset()?;
    for (i, name) in rules.names().enumerate() {
        writeln!(out, "  {}. {}", i + 1, name)?;
    }
    Ok(())
}

/// Colors only when stdout is a terminal; piped output stays plain.
pub fn color_choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn stdout() -> StandardStream {
    StandardStream::stdout(color_choice(atty::is(atty::Stream::Stdout)))
}

pub fn print_text(ast: &Ast) -> io::Result<()> {
    write_text(&mut stdout(), ast)
}

pub fn print_rules(rules: &RuleSet) -> io::Result<()> {
    write_rules(&mut stdout(), rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::Buffer;

    #[test]
    fn test_write_text_repeats_keys_of_sequences() {
        let mut ast = Ast::new();
        ast.insert("Domain", "example.test");
        ast.insert("Name Server", "ns1");
        ast.insert("Name Server", "ns2");
        let mut buf = Buffer::no_color();
        write_text(&mut buf, &ast).unwrap();
        assert_eq!(
            String::from_utf8(buf.into_inner()).unwrap(),
            "Domain: example.test\nName Server: ns1\nName Server: ns2\n"
        );
    }

    #[test]
    fn test_piped_output_never_colors() {
        assert_eq!(color_choice(false), ColorChoice::Never);
        assert_eq!(color_choice(true), ColorChoice::Auto);
    }

    #[test]
    fn test_write_rules_numbers_in_order() {
        let mut buf = Buffer::no_color();
        write_rules(&mut buf, &RuleSet::default()).unwrap();
        assert_eq!(
            String::from_utf8(buf.into_inner()).unwrap(),
            "default\n  1. skip-empty-line\n  2. skip-newline\n  3. scan-keyvalue\n"
        );
    }
}
