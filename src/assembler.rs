//! This module provides the TinyASM assembler, utilizing the `pest` crate for line structure.
//! It compiles `.tasm` sources into an ordered list of `Transition`s.
//!
//! ```text
//! # Flip bits until blank, then accept
//! state 0:
//!     on 0: write 1, move R, goto 0
//!     on 1: write 0, move R, goto 0
//!     on _: write _, move R, goto ACCEPT
//! ```
//!
//! Compilation is all-or-nothing: the first malformed line aborts with an
//! [`AssemblyError`] carrying its 1-based line number.

use crate::config::Config;
use crate::types::{AssemblyError, Direction, SyntaxError, Transition};
use pest::{error::LineColLocation, iterators::Pair, Parser as PestParser};
use pest_derive::Parser as PestParser;

/// Derives a `PestParser` for the TinyASM grammar defined in `tinyasm.pest`.
#[derive(PestParser)]
#[grammar = "tinyasm.pest"]
pub struct TinyAsmParser;

/// Compiles TinyASM source into transitions, in source order.
///
/// # Arguments
///
/// * `source` - The TinyASM program text.
/// * `config` - Supplies the accept label and the accept state it compiles to.
///
/// # Returns
///
/// * `Ok(Vec<Transition>)` with one transition per `on` line.
/// * `Err(AssemblyError)` for the first line that violates the grammar.
pub fn assemble(source: &str, config: &Config) -> Result<Vec<Transition>, AssemblyError> {
    let statements = TinyAsmParser::parse(Rule::program, source)
        .map_err(|e| grammar_error(&e))?
        .flat_map(|program| program.into_inner());

    let mut assembler = Assembler::new(config);
    let mut lines = LineCounter::new(source);
    for statement in statements {
        let line = lines.line_at(statement.as_span().start());
        assembler
            .statement(statement)
            .map_err(|kind| AssemblyError::new(line, kind))?;
    }

    log::debug!("assembled {} transitions", assembler.transitions.len());

    Ok(assembler.transitions)
}

/// Maps byte offsets to 1-based line numbers for offsets visited in increasing order,
/// scanning each part of the source once.
struct LineCounter<'s> {
    source: &'s str,
    offset: usize,
    line: usize,
}

impl<'s> LineCounter<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, offset: usize) -> usize {
        if offset > self.offset {
            let skipped = self.source.get(self.offset..offset).unwrap_or_default();
            self.line += skipped.matches('\n').count();
            self.offset = offset;
        }
        self.line
    }
}

/// The assembler state.
struct Assembler<'a> {
    config: &'a Config,
    /// The state opened by the most recent `state` header.
    current_state: Option<String>,
    transitions: Vec<Transition>,
}

impl<'a> Assembler<'a> {
    fn new(config: &'a Config) -> Self {
        Self {
            config,
            current_state: None,
            transitions: Vec::new(),
        }
    }

    fn statement(&mut self, pair: Pair<Rule>) -> Result<(), SyntaxError> {
        match pair.as_rule() {
            Rule::state_header => self.state_header(pair),
            Rule::on_line => self.on_line(pair),
            Rule::unknown if self.current_state.is_none() => Err(SyntaxError::UnboundOnLine),
            Rule::unknown => Err(SyntaxError::ExpectedOn(pair.as_str().trim().to_string())),
            _ => Ok(()), // Comments and EOI
        }
    }

    /// `state <name>:`
    fn state_header(&mut self, pair: Pair<Rule>) -> Result<(), SyntaxError> {
        let body = pair
            .into_inner()
            .next()
            .map(|body| body.as_str().trim_end())
            .unwrap_or_default();

        let name = body
            .strip_suffix(':')
            .ok_or(SyntaxError::MissingStateColon)?
            .trim();

        if name.is_empty() {
            return Err(SyntaxError::EmptyStateName);
        }

        self.current_state = Some(check_state_name(name)?.to_string());
        Ok(())
    }

    /// `on <symbol>: write <symbol>, move <L|R>, goto <target>`
    fn on_line(&mut self, pair: Pair<Rule>) -> Result<(), SyntaxError> {
        let state = self
            .current_state
            .clone()
            .ok_or(SyntaxError::UnboundOnLine)?;

        let mut head = "";
        let mut clauses = None;
        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::on_head => head = part.as_str(),
                Rule::on_clauses => clauses = Some(part.as_str()),
                _ => {}
            }
        }

        let clauses = clauses.ok_or(SyntaxError::MissingOnColon)?;
        let read = parse_on_symbol(head)?;
        let (write, direction, target) = parse_commands(clauses)?;

        let next_state = if target == self.config.accept_label {
            self.config.accept_state.clone()
        } else {
            check_state_name(target)?.to_string()
        };

        self.transitions.push(Transition {
            state,
            read,
            next_state,
            write,
            direction,
        });

        Ok(())
    }
}

/// The part between `on` and `:` must be exactly one single-character token.
fn parse_on_symbol(head: &str) -> Result<char, SyntaxError> {
    let tokens: Vec<&str> = head.split_whitespace().collect();
    let [symbol] = tokens[..] else {
        return Err(SyntaxError::ExpectedOnSymbol);
    };

    single_char(symbol).ok_or(SyntaxError::InputSymbolLength)
}

/// Splits `write X, move D, goto S` into its three values, in any order.
fn parse_commands(clauses: &str) -> Result<(char, Direction, &str), SyntaxError> {
    let commands: Vec<&str> = clauses.split(',').map(str::trim).collect();
    if commands.len() != 3 {
        return Err(SyntaxError::CommandCount(clauses.trim().to_string()));
    }

    let mut write = None;
    let mut direction = None;
    let mut target = None;

    for command in commands {
        if let Some(value) = command.strip_prefix("write ") {
            write = Some(single_char(value.trim()).ok_or(SyntaxError::OutputSymbolLength)?);
        } else if let Some(value) = command.strip_prefix("move ") {
            direction = Some(Direction::parse(value.trim()).ok_or(SyntaxError::InvalidDirection)?);
        } else if let Some(value) = command.strip_prefix("goto ") {
            let value = value.trim();
            if value.is_empty() {
                return Err(SyntaxError::EmptyGoto);
            }
            target = Some(value);
        } else {
            return Err(SyntaxError::UnknownCommand(command.to_string()));
        }
    }

    match (write, direction, target) {
        (Some(write), Some(direction), Some(target)) => Ok((write, direction, target)),
        _ => Err(SyntaxError::MissingCommand),
    }
}

/// State names end up as single tokens in raw table text, where `#` starts a comment.
fn check_state_name(name: &str) -> Result<&str, SyntaxError> {
    if name.starts_with('#') || name.chars().any(char::is_whitespace) {
        return Err(SyntaxError::InvalidStateName(name.to_string()));
    }
    Ok(name)
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Some(symbol),
        _ => None,
    }
}

/// Converts a grammar failure into a line-numbered error.
fn grammar_error(error: &pest::error::Error<Rule>) -> AssemblyError {
    let line = match error.line_col {
        LineColLocation::Pos((line, _)) | LineColLocation::Span((line, _), _) => line,
    };
    AssemblyError::new(line, SyntaxError::Grammar(error.variant.message().into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(source: &str) -> Result<Vec<Transition>, AssemblyError> {
        assemble(source, &Config::default())
    }

    fn error_at(source: &str) -> (usize, SyntaxError) {
        let error = compile(source).unwrap_err();
        (error.line, error.kind)
    }

    #[test]
    fn test_assemble_bit_flipper() {
        let source = r#"
# Flip bits until blank, then accept
state 0:
    on 0: write 1, move R, goto 0
    on 1: write 0, move R, goto 0
    on _: write _, move R, goto ACCEPT
"#;
        let transitions = compile(source).unwrap();

        assert_eq!(
            transitions,
            vec![
                Transition::new("0", '0', "0", '1', Direction::Right),
                Transition::new("0", '1', "0", '0', Direction::Right),
                Transition::new("0", '_', "A", '_', Direction::Right),
            ]
        );
    }

    #[test]
    fn test_assemble_multiple_states_in_source_order() {
        let source = "state b:\n  on x: write y, move l, goto a\nstate a:\n  on y: write x, move R, goto b\n";
        let transitions = compile(source).unwrap();

        assert_eq!(transitions.len(), 2);
        assert_eq!(transitions[0].state, "b");
        assert_eq!(transitions[0].direction, Direction::Left);
        assert_eq!(transitions[1].state, "a");
        assert_eq!(transitions[1].next_state, "b");
    }

    #[test]
    fn test_commands_in_any_order() {
        let transitions = compile("state s:\n on 1: goto ACCEPT, move r, write 0").unwrap();
        assert_eq!(
            transitions,
            vec![Transition::new("s", '1', "A", '0', Direction::Right)]
        );
    }

    #[test]
    fn test_custom_accept_label() {
        let config = Config {
            accept_label: "DONE".into(),
            accept_state: "yes".into(),
            ..Config::default()
        };
        let transitions = assemble("state 0:\n on 1: write 1, move R, goto DONE", &config).unwrap();
        assert_eq!(transitions[0].next_state, "yes");

        // The default label is an ordinary state name under this configuration.
        let transitions =
            assemble("state 0:\n on 1: write 1, move R, goto ACCEPT", &config).unwrap();
        assert_eq!(transitions[0].next_state, "ACCEPT");
    }

    #[test]
    fn test_empty_source() {
        assert!(compile("").unwrap().is_empty());
        assert!(compile("\n# nothing\n\n").unwrap().is_empty());
        assert!(compile("state 0:\n").unwrap().is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let transitions = compile("state 0:\r\n  on 1: write 0, move R, goto ACCEPT\r\n").unwrap();
        assert_eq!(transitions.len(), 1);
    }

    #[test]
    fn test_on_line_before_state() {
        let source = "# header\n\non 0: write 1, move R, goto 0\nstate 0:\n";
        assert_eq!(error_at(source), (3, SyntaxError::UnboundOnLine));
    }

    #[test]
    fn test_stray_line_before_state() {
        assert_eq!(error_at("hello"), (1, SyntaxError::UnboundOnLine));
    }

    #[test]
    fn test_state_header_errors() {
        assert_eq!(error_at("state 0"), (1, SyntaxError::MissingStateColon));
        assert_eq!(error_at("state  :"), (1, SyntaxError::EmptyStateName));
        assert_eq!(
            error_at("state a b:"),
            (1, SyntaxError::InvalidStateName("a b".into()))
        );
    }

    #[test]
    fn test_expected_on() {
        assert_eq!(
            error_at("state 0:\n  write 1"),
            (2, SyntaxError::ExpectedOn("write 1".into()))
        );
    }

    #[test]
    fn test_on_line_errors() {
        let cases = [
            ("on 0 write 1, move R, goto 0", SyntaxError::MissingOnColon),
            ("on 0 1: write 1, move R, goto 0", SyntaxError::ExpectedOnSymbol),
            ("on : write 1, move R, goto 0", SyntaxError::ExpectedOnSymbol),
            ("on 01: write 1, move R, goto 0", SyntaxError::InputSymbolLength),
            (
                "on 0: write 1, move R",
                SyntaxError::CommandCount("write 1, move R".into()),
            ),
            (
                "on 0: write 1, jump R, goto 0",
                SyntaxError::UnknownCommand("jump R".into()),
            ),
            ("on 0: write 10, move R, goto 0", SyntaxError::OutputSymbolLength),
            ("on 0: write 1, move X, goto 0", SyntaxError::InvalidDirection),
            ("on 0: write 1, write 1, goto 0", SyntaxError::MissingCommand),
            (
                "on 0: write 1, move R, goto",
                SyntaxError::UnknownCommand("goto".into()),
            ),
            (
                "on 0: write 1, move R, goto #x",
                SyntaxError::InvalidStateName("#x".into()),
            ),
        ];

        for (line, expected) in cases {
            let source = format!("state 0:\n  {line}\n");
            assert_eq!(error_at(&source), (2, expected), "source line: {line}");
        }
    }

    #[test]
    fn test_line_counting() {
        let mut lines = LineCounter::new("a\nb\r\n\nc");
        assert_eq!(lines.line_at(0), 1);
        assert_eq!(lines.line_at(2), 2);
        assert_eq!(lines.line_at(6), 4);
        assert_eq!(lines.line_at(6), 4);
    }

    #[test]
    fn test_large_program() {
        let rules = 20_000;
        let mut source = String::from("state 0:\n");
        for _ in 0..rules {
            source.push_str("    on 1: write 0, move R, goto 0\n");
        }

        assert_eq!(compile(&source).unwrap().len(), rules);

        // The line number of an error at the very end is still exact.
        source.push_str("    on 1: write 0, move R\n");
        let (line, _) = error_at(&source);
        assert_eq!(line, rules + 2);
    }

    #[test]
    fn test_whitespace_only_lines_are_blank() {
        let source = "state 0:\n\x0c\n\u{a0}\u{a0}\n \t\x0b\n  on 1: write 0, move R, goto ACCEPT\n";
        assert_eq!(
            compile(source).unwrap(),
            vec![Transition::new("0", '1', "A", '0', Direction::Right)]
        );
    }

    #[test]
    fn test_error_aborts_whole_compilation() {
        let source = "state 0:\n on 0: write 1, move R, goto 0\n on 1: write 2, move Q, goto 0\n";
        let error = compile(source).unwrap_err();
        assert_eq!(error.line, 3);
        assert_eq!(
            error.to_string(),
            "Syntax error at line 3: move direction must be 'L' or 'R'"
        );
    }
}
