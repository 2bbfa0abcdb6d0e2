//! Identifier and keyword scanning.

use crate::source::LineSource;
use crate::token::{keyword_from_ident, TokenKind};
use crate::Lexer;

fn is_ident_continue(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphanumeric()
}

impl<S: LineSource> Lexer<S> {
    /// Scan an identifier or keyword: `[A-Za-z_][A-Za-z_0-9]*`.
    ///
    /// The lexeme is checked against the keyword table before an
    /// `Ident` is emitted. An identifier longer than the scratch bound
    /// classifies as `Invalid` at the truncation point.
    pub(crate) fn scan_ident(&mut self) -> TokenKind {
        while let Some(b) = self.curr_ch {
            if !is_ident_continue(b) {
                break;
            }
            if !self.push_text(b) {
                return TokenKind::Invalid;
            }
            self.shift();
        }

        self.tok.num = self.tok.text.len() as f64;
        keyword_from_ident(&self.tok.text).unwrap_or(TokenKind::Ident)
    }
}
