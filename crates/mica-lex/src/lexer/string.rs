//! String literal scanning.

use crate::source::LineSource;
use crate::token::TokenKind;
use crate::Lexer;

impl<S: LineSource> Lexer<S> {
    /// Scan a double-quoted string literal.
    ///
    /// Escapes: `\n`, `\t`, `\r`, `\\`, `\"`, `\xHH`. The decoded
    /// bytes land in the token text. A literal may not span a line;
    /// hitting end of line or end of input before the closing quote
    /// classifies the token as `Invalid`.
    pub(crate) fn scan_string(&mut self) -> TokenKind {
        self.shift(); // opening quote

        loop {
            let b = match self.curr_ch {
                None => return TokenKind::Invalid,
                Some(b) => b,
            };

            match b {
                b'"' => {
                    self.shift();
                    break;
                }
                b'\n' => return TokenKind::Invalid,
                b'\\' => {
                    self.shift();
                    let decoded = match self.scan_escape() {
                        Some(c) => c,
                        None => return TokenKind::Invalid,
                    };
                    if !self.push_text(decoded) {
                        return TokenKind::Invalid;
                    }
                }
                _ => {
                    if !self.push_text(b) {
                        return TokenKind::Invalid;
                    }
                    self.shift();
                }
            }
        }

        self.tok.num = self.tok.text.len() as f64;
        TokenKind::Str
    }

    /// Decode one escape sequence after the backslash.
    fn scan_escape(&mut self) -> Option<u8> {
        let b = self.curr_ch?;
        self.shift();
        match b {
            b'n' => Some(b'\n'),
            b't' => Some(b'\t'),
            b'r' => Some(b'\r'),
            b'\\' => Some(b'\\'),
            b'"' => Some(b'"'),
            b'x' => {
                let hi = self.scan_hex_digit()?;
                let lo = self.scan_hex_digit()?;
                Some(hi << 4 | lo)
            }
            _ => None,
        }
    }

    fn scan_hex_digit(&mut self) -> Option<u8> {
        let b = self.curr_ch?;
        let digit = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => return None,
        };
        self.shift();
        Some(digit)
    }
}
