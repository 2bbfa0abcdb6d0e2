//! Source input: the line-pull interface feeding the lexer.
//!
//! The scanner is line-oriented so that an embedder can stream source
//! from anywhere a "give me the next line" operation exists: a serial
//! console, a flash file, an in-memory script. The lexer owns the line
//! buffer and never assumes a line remains valid past the next pull.

use std::io::BufRead;

/// Pull interface for source lines.
pub trait LineSource {
    /// Replace the contents of `buf` with the next source line.
    ///
    /// The trailing newline is optional; the lexer normalises it.
    /// Returns `false` at end of input, in which case `buf` is left
    /// untouched or empty.
    fn next_line(&mut self, buf: &mut String) -> bool;
}

/// A whole script held in memory, handed out line by line.
///
/// # Example
///
/// ```
/// use mica_lex::{LineSource, StrSource};
///
/// let mut src = StrSource::new("var a;\nvar b;");
/// let mut buf = String::new();
/// assert!(src.next_line(&mut buf));
/// assert_eq!(buf, "var a;\n");
/// assert!(src.next_line(&mut buf));
/// assert_eq!(buf, "var b;");
/// assert!(!src.next_line(&mut buf));
/// ```
pub struct StrSource<'a> {
    rest: &'a str,
}

impl<'a> StrSource<'a> {
    /// Create a source over the given script text.
    pub fn new(script: &'a str) -> Self {
        Self { rest: script }
    }
}

impl LineSource for StrSource<'_> {
    fn next_line(&mut self, buf: &mut String) -> bool {
        if self.rest.is_empty() {
            return false;
        }
        buf.clear();
        match self.rest.find('\n') {
            Some(i) => {
                buf.push_str(&self.rest[..=i]);
                self.rest = &self.rest[i + 1..];
            }
            None => {
                buf.push_str(self.rest);
                self.rest = "";
            }
        }
        true
    }
}

/// Adapter for buffered readers (files, sockets, stdin).
///
/// A read error is treated as end of input; the lexer then reports a
/// clean end of stream and the embedder can inspect the reader.
pub struct ReadSource<R> {
    inner: R,
}

impl<R: BufRead> ReadSource<R> {
    /// Create a source over a buffered reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Recover the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> LineSource for ReadSource<R> {
    fn next_line(&mut self, buf: &mut String) -> bool {
        buf.clear();
        matches!(self.inner.read_line(buf), Ok(n) if n > 0)
    }
}

/// Adapter for a bare callback, for embedders that drive the lexer
/// from a C-style "more" hook.
///
/// # Example
///
/// ```
/// use mica_lex::{FnSource, LineSource};
///
/// let mut lines = vec!["b".to_string(), "a".to_string()];
/// let mut src = FnSource(move |buf: &mut String| match lines.pop() {
///     Some(line) => {
///         buf.clear();
///         buf.push_str(&line);
///         true
///     }
///     None => false,
/// });
/// let mut buf = String::new();
/// assert!(src.next_line(&mut buf));
/// assert_eq!(buf, "a");
/// ```
pub struct FnSource<F>(pub F);

impl<F: FnMut(&mut String) -> bool> LineSource for FnSource<F> {
    fn next_line(&mut self, buf: &mut String) -> bool {
        (self.0)(buf)
    }
}
