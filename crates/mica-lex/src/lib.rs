//! mica-lex - Streaming lexer for the mica language.
//!
//! The scanner is built for memory-constrained, streaming deployments:
//! source arrives one line at a time through a [`LineSource`], the
//! line buffer grows only as far as the longest line, and the token
//! scratch is bounded by [`TOKEN_MAX_SIZE`].
//!
//! # Token stream contract
//!
//! - [`Lexer::token`] peeks the current token without consuming it and
//!   is idempotent.
//! - [`Lexer::match_token`] consumes the token when the kind matches.
//! - [`Lexer::position`] reports the `(line, col)` of the current,
//!   unconsumed token.
//! - The stream ends with [`TokenKind::Eof`]; ill-formed lexemes
//!   classify as [`TokenKind::Invalid`] and their interpretation is
//!   the parser's responsibility. The lexer itself never reports
//!   events.
//!
//! # Example
//!
//! ```
//! use mica_lex::{Lexer, StrSource, TokenKind};
//!
//! let mut lex = Lexer::new(StrSource::new("var x = 1;"));
//! assert!(lex.match_token(TokenKind::Var));
//! assert_eq!(lex.token(), TokenKind::Ident);
//! assert_eq!(lex.tok().text, "x");
//! ```

mod lexer;
mod source;
mod token;

#[cfg(test)]
mod edge_cases;

pub use lexer::Lexer;
pub use source::{FnSource, LineSource, ReadSource, StrSource};
pub use token::{keyword_from_ident, Token, TokenKind};

/// Upper bound on identifier/string lexeme length, in bytes.
///
/// A compile-time knob for constrained targets: lexemes that would
/// exceed it classify as [`TokenKind::Invalid`] at the point the bound
/// is hit.
pub const TOKEN_MAX_SIZE: usize = 256;
