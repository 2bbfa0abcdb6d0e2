//! Parse-event sink contract.
//!
//! The parser notifies the embedder of failures and end-of-stream
//! through a caller-supplied callback. The sink is advisory; the
//! parser's return value is authoritative.

use mica_util::Pos;
use thiserror::Error;

/// Why a parse was aborted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A well-formed token that the grammar does not expect here
    /// (including end of input mid-expression)
    #[error("invalid syntax")]
    InvalidSyntax,

    /// A token whose content is wrong for this position (missing
    /// delimiter, ill-formed lexeme, keyword where a name is required)
    #[error("invalid token")]
    InvalidToken,

    /// An assignment whose left-hand side is not assignable
    #[error("invalid left value")]
    InvalidLeftValue,

    /// The session heap could not satisfy an allocation
    #[error("not enough memory")]
    NotEnoughMemory,
}

/// An event delivered to the sink during parsing.
///
/// At most one `Fail` is delivered per aborted parse; `Eof` is
/// delivered when a statement is requested from a cleanly exhausted
/// stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParseEvent {
    /// The parse was aborted at `pos`.
    Fail { code: ParseErrorKind, pos: Pos },
    /// The stream is exhausted.
    Eof,
}
