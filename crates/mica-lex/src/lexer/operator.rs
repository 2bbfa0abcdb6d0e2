//! Operator and punctuation scanning.

use crate::source::LineSource;
use crate::token::TokenKind;
use crate::Lexer;

impl<S: LineSource> Lexer<S> {
    /// Scan an operator or punctuation token starting at `b`.
    ///
    /// Two-character operators are resolved through the character
    /// lookahead; `<<=` and `>>=` take one more step. Unknown bytes
    /// classify as `Invalid` with the offending byte in the text.
    pub(crate) fn scan_operator(&mut self, b: u8) -> TokenKind {
        self.shift();
        match b {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b'.' => TokenKind::Dot,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b':' => TokenKind::Colon,
            b'?' => TokenKind::Question,

            b'+' => {
                if self.accept(b'=') {
                    TokenKind::PlusEq
                } else {
                    TokenKind::Plus
                }
            }
            b'-' => {
                if self.accept(b'=') {
                    TokenKind::MinusEq
                } else {
                    TokenKind::Minus
                }
            }
            b'*' => {
                if self.accept(b'=') {
                    TokenKind::StarEq
                } else {
                    TokenKind::Star
                }
            }
            b'/' => {
                // Comments were consumed before dispatch; this is
                // division.
                if self.accept(b'=') {
                    TokenKind::SlashEq
                } else {
                    TokenKind::Slash
                }
            }
            b'%' => {
                if self.accept(b'=') {
                    TokenKind::PercentEq
                } else {
                    TokenKind::Percent
                }
            }
            b'~' => {
                if self.accept(b'=') {
                    TokenKind::TildeEq
                } else {
                    TokenKind::Tilde
                }
            }
            b'^' => {
                if self.accept(b'=') {
                    TokenKind::CaretEq
                } else {
                    TokenKind::Caret
                }
            }
            b'=' => {
                if self.accept(b'=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                }
            }
            b'!' => {
                if self.accept(b'=') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            b'&' => {
                if self.accept(b'&') {
                    TokenKind::AndAnd
                } else if self.accept(b'=') {
                    TokenKind::AmpEq
                } else {
                    TokenKind::Ampersand
                }
            }
            b'|' => {
                if self.accept(b'|') {
                    TokenKind::OrOr
                } else if self.accept(b'=') {
                    TokenKind::PipeEq
                } else {
                    TokenKind::Pipe
                }
            }
            b'<' => {
                if self.accept(b'=') {
                    TokenKind::LtEq
                } else if self.accept(b'<') {
                    if self.accept(b'=') {
                        TokenKind::ShlEq
                    } else {
                        TokenKind::Shl
                    }
                } else {
                    TokenKind::Lt
                }
            }
            b'>' => {
                if self.accept(b'=') {
                    TokenKind::GtEq
                } else if self.accept(b'>') {
                    if self.accept(b'=') {
                        TokenKind::ShrEq
                    } else {
                        TokenKind::Shr
                    }
                } else {
                    TokenKind::Gt
                }
            }

            _ => {
                self.push_text(b);
                TokenKind::Invalid
            }
        }
    }
}
