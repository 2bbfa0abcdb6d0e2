//! Whitespace and comment skipping.

use crate::source::LineSource;
use crate::Lexer;

impl<S: LineSource> Lexer<S> {
    /// Consume whitespace, `//` line comments and `/* */` block
    /// comments. Block comments may span lines and do not nest; an
    /// unterminated block comment runs to end of input.
    pub(crate) fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.curr_ch {
                Some(b' ' | b'\t' | b'\r' | b'\n') => self.shift(),
                Some(b'/') if self.next_ch == Some(b'/') => {
                    while let Some(b) = self.curr_ch {
                        if b == b'\n' {
                            break;
                        }
                        self.shift();
                    }
                }
                Some(b'/') if self.next_ch == Some(b'*') => {
                    self.shift();
                    self.shift();
                    loop {
                        match self.curr_ch {
                            None => return,
                            Some(b'*') if self.next_ch == Some(b'/') => {
                                self.shift();
                                self.shift();
                                break;
                            }
                            Some(_) => self.shift(),
                        }
                    }
                }
                _ => return,
            }
        }
    }
}
