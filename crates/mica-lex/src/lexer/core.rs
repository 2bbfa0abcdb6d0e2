//! Core lexer implementation.
//!
//! The lexer pulls source one line at a time from a [`LineSource`],
//! keeps a two-byte character lookahead over the line buffer, and
//! exposes a one-token lookahead stream: [`Lexer::token`] peeks
//! without consuming, [`Lexer::match_token`] conditionally advances.

use mica_util::Pos;

use crate::source::LineSource;
use crate::token::{Token, TokenKind};

/// Line-buffered scanner with one-token lookahead.
///
/// Dropping the lexer releases its line buffer and token scratch;
/// tokens copied out beforehand are unaffected.
pub struct Lexer<S> {
    src: S,

    /// Current line's bytes; grows to fit the longest line seen.
    line_buf: String,
    /// Read position inside `line_buf`.
    line_pos: usize,
    /// Set once the source reports end of input.
    exhausted: bool,

    /// Character lookahead: the byte under the cursor and the one
    /// after it. `None` past end of input.
    pub(crate) curr_ch: Option<u8>,
    pub(crate) next_ch: Option<u8>,

    /// Position of `curr_ch` in the original stream (1-based).
    pub(crate) line: u32,
    pub(crate) col: u32,

    /// The peeked token; valid while `peeked` is set.
    pub(crate) tok: Token,
    peeked: bool,
}

impl<S: LineSource> Lexer<S> {
    /// Create a lexer and prime it with the first source line.
    pub fn new(src: S) -> Self {
        let mut lex = Self {
            src,
            line_buf: String::new(),
            line_pos: 0,
            exhausted: false,
            curr_ch: None,
            next_ch: None,
            line: 1,
            col: 1,
            tok: Token::empty(),
            peeked: false,
        };
        lex.curr_ch = lex.fetch_byte();
        lex.next_ch = lex.fetch_byte();
        lex
    }

    /// Peek the current token's kind without consuming it.
    ///
    /// Idempotent: repeated calls return the same token until an
    /// advance happens.
    pub fn token(&mut self) -> TokenKind {
        if !self.peeked {
            self.scan_token();
            self.peeked = true;
        }
        self.tok.kind
    }

    /// Peek the current token in full (kind, position, value, text).
    pub fn tok(&mut self) -> &Token {
        self.token();
        &self.tok
    }

    /// Consume the current token if it has the given kind.
    pub fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.token() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token. A no-op at end of input.
    pub fn advance(&mut self) {
        if self.token() != TokenKind::Eof {
            self.peeked = false;
        }
    }

    /// Position of the current, unconsumed token.
    pub fn position(&mut self) -> Pos {
        self.token();
        Pos::new(self.tok.line, self.tok.col)
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Scan the next token into `self.tok`.
    fn scan_token(&mut self) {
        self.skip_whitespace_and_comments();

        self.tok.line = self.line;
        self.tok.col = self.col;
        self.tok.num = 0.0;
        self.tok.text.clear();

        self.tok.kind = match self.curr_ch {
            None => TokenKind::Eof,
            Some(b) if b == b'_' || b.is_ascii_alphabetic() => self.scan_ident(),
            Some(b) if b.is_ascii_digit() => self.scan_number(),
            Some(b'"') => self.scan_string(),
            Some(b) => self.scan_operator(b),
        };
    }

    // =========================================================================
    // Character feed
    // =========================================================================

    /// Step the two-byte lookahead forward.
    pub(crate) fn shift(&mut self) {
        let prev = self.curr_ch;
        self.curr_ch = self.next_ch;
        self.next_ch = self.fetch_byte();
        match prev {
            Some(b'\n') => {
                self.line += 1;
                self.col = 1;
            }
            Some(_) => self.col += 1,
            None => {}
        }
    }

    /// Consume `b` if it is the current byte.
    pub(crate) fn accept(&mut self, b: u8) -> bool {
        if self.curr_ch == Some(b) {
            self.shift();
            true
        } else {
            false
        }
    }

    /// Append a byte to the token scratch, honouring the scratch
    /// bound. Returns false once the token is oversize.
    pub(crate) fn push_text(&mut self, b: u8) -> bool {
        if self.tok.text.len() >= crate::TOKEN_MAX_SIZE {
            return false;
        }
        self.tok.text.push(b as char);
        true
    }

    /// Pull the next byte, refilling the line buffer as needed.
    ///
    /// Lines arrive through the source callback; a line without a
    /// trailing newline gets one appended so line accounting stays
    /// uniform. Returns `None` at end of input.
    fn fetch_byte(&mut self) -> Option<u8> {
        loop {
            if self.line_pos < self.line_buf.len() {
                let b = self.line_buf.as_bytes()[self.line_pos];
                self.line_pos += 1;
                return Some(b);
            }
            if self.exhausted {
                return None;
            }
            self.line_buf.clear();
            if !self.src.next_line(&mut self.line_buf) {
                self.exhausted = true;
                return None;
            }
            if !self.line_buf.ends_with('\n') {
                self.line_buf.push('\n');
            }
            self.line_pos = 0;
        }
    }
}
