//! Cross-cutting lexer tests: streaming behaviour, position laws,
//! and property-based tokenisation checks.

use proptest::prelude::*;

use crate::{FnSource, Lexer, LineSource, StrSource, Token, TokenKind};
use mica_util::Pos;

/// Drain a lexer, stopping at `Eof` or the first `Invalid`.
fn drain<S: LineSource>(lex: &mut Lexer<S>) -> Vec<Token> {
    let mut out = Vec::new();
    loop {
        let kind = lex.token();
        out.push(lex.tok().clone());
        if kind == TokenKind::Eof || kind == TokenKind::Invalid {
            return out;
        }
        lex.advance();
    }
}

fn tokens_of(src: &str) -> Vec<Token> {
    drain(&mut Lexer::new(StrSource::new(src)))
}

#[test]
fn test_statement_token_sequence() {
    let kinds: Vec<TokenKind> = tokens_of("var a = 1, b;").iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Var,
            TokenKind::Ident,
            TokenKind::Eq,
            TokenKind::Number,
            TokenKind::Comma,
            TokenKind::Ident,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_positions_are_exact() {
    let toks = tokens_of("a + b\n  c");
    let positions: Vec<(u32, u32)> = toks.iter().map(|t| (t.line, t.col)).collect();
    // Eof lands at the start of the line after the last one.
    assert_eq!(positions, vec![(1, 1), (1, 3), (1, 5), (2, 3), (3, 1)]);
}

#[test]
fn test_streaming_matches_in_memory() {
    let script = "def add(a, b) {\n  return a + b; // sum\n}\nadd(1, 2);\n";

    let whole = tokens_of(script);

    let mut lines: Vec<String> = script
        .split_inclusive('\n')
        .map(|l| l.to_string())
        .collect();
    lines.reverse();
    let streamed = drain(&mut Lexer::new(FnSource(move |buf: &mut String| {
        match lines.pop() {
            Some(line) => {
                buf.clear();
                buf.push_str(&line);
                true
            }
            None => false,
        }
    })));

    assert_eq!(whole, streamed);
}

#[test]
fn test_truncated_line_then_more() {
    // A statement split across three pulled lines.
    let mut parts = vec!["1;\n", "= \n", "var x \n"];
    let mut lex = Lexer::new(FnSource(move |buf: &mut String| match parts.pop() {
        Some(part) => {
            buf.clear();
            buf.push_str(part);
            true
        }
        None => false,
    }));
    let kinds: Vec<TokenKind> = drain(&mut lex).iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Var,
            TokenKind::Ident,
            TokenKind::Eq,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_invalid_byte_has_position() {
    let toks = tokens_of("ok\n  #");
    let last = toks.last().unwrap();
    assert_eq!(last.kind, TokenKind::Invalid);
    assert_eq!((last.line, last.col), (2, 3));
}

#[test]
fn test_eof_is_sticky() {
    let mut lex = Lexer::new(StrSource::new("x"));
    lex.advance();
    for _ in 0..3 {
        assert_eq!(lex.token(), TokenKind::Eof);
        lex.advance();
    }
}

proptest! {
    /// Total tokenisation: every input drains to Eof or stops at an
    /// Invalid token with a definite position.
    #[test]
    fn prop_tokenisation_terminates(src in "[ -~\n\t]{0,200}") {
        let toks = tokens_of(&src);
        let last = toks.last().unwrap();
        prop_assert!(last.kind == TokenKind::Eof || last.kind == TokenKind::Invalid);
    }

    /// Position monotonicity: token positions are non-decreasing in
    /// lexicographic order.
    #[test]
    fn prop_positions_monotonic(src in "[ -~\n\t]{0,200}") {
        let toks = tokens_of(&src);
        let positions: Vec<Pos> = toks.iter().map(|t| Pos::new(t.line, t.col)).collect();
        for pair in positions.windows(2) {
            prop_assert!(pair[0] <= pair[1], "{} then {}", pair[0], pair[1]);
        }
    }

    /// Determinism: scanning the same bytes twice yields the same
    /// token sequence.
    #[test]
    fn prop_tokenisation_deterministic(src in "[ -~\n\t]{0,200}") {
        prop_assert_eq!(tokens_of(&src), tokens_of(&src));
    }
}
