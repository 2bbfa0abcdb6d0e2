//! Numeric literal scanning.

use crate::source::LineSource;
use crate::token::TokenKind;
use crate::Lexer;

impl<S: LineSource> Lexer<S> {
    /// Scan a numeric literal: decimal integer or float, optional
    /// fractional part, optional signed exponent.
    ///
    /// The token text is the verbatim lexeme; the token `num` field
    /// carries the parsed value.
    pub(crate) fn scan_number(&mut self) -> TokenKind {
        if !self.scan_digits() {
            return TokenKind::Invalid;
        }

        // Fractional part only when a digit follows the dot, so a
        // trailing `.` stays a separate token.
        if self.curr_ch == Some(b'.') && self.next_ch.map_or(false, |b| b.is_ascii_digit()) {
            if !self.push_text(b'.') {
                return TokenKind::Invalid;
            }
            self.shift();
            if !self.scan_digits() {
                return TokenKind::Invalid;
            }
        }

        if self.curr_ch == Some(b'e') || self.curr_ch == Some(b'E') {
            let exponent_follows = match self.next_ch {
                Some(b) => b.is_ascii_digit() || b == b'+' || b == b'-',
                None => false,
            };
            if exponent_follows {
                let e = match self.curr_ch {
                    Some(e) => e,
                    None => return TokenKind::Invalid,
                };
                if !self.push_text(e) {
                    return TokenKind::Invalid;
                }
                self.shift();
                if let Some(sign @ (b'+' | b'-')) = self.curr_ch {
                    if !self.push_text(sign) {
                        return TokenKind::Invalid;
                    }
                    self.shift();
                }
                match self.curr_ch {
                    Some(b) if b.is_ascii_digit() => {
                        if !self.scan_digits() {
                            return TokenKind::Invalid;
                        }
                    }
                    // `1e+` with no digits
                    _ => return TokenKind::Invalid,
                }
            }
        }

        self.tok.num = self.tok.text.parse::<f64>().unwrap_or(0.0);
        TokenKind::Number
    }

    /// Consume a run of decimal digits into the scratch.
    fn scan_digits(&mut self) -> bool {
        while let Some(b) = self.curr_ch {
            if !b.is_ascii_digit() {
                break;
            }
            if !self.push_text(b) {
                return false;
            }
            self.shift();
        }
        true
    }
}
