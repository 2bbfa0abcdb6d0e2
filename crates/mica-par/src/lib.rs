//! mica-par - Recursive-descent parser for the mica language.
//!
//! The parser drives the one-token-lookahead stream from `mica-lex`,
//! materialises AST nodes in the caller's session [`Heap`], and
//! reports failures through a caller-supplied event sink. It never
//! reads ahead more than one token and never backtracks.
//!
//! # Grammar
//!
//! Expression tiers, loosest binding first (right-associative tiers
//! noted):
//!
//! | Tier              | Forms                                           |
//! |-------------------|-------------------------------------------------|
//! | comma (right)     | `assign (',' assign)*`                          |
//! | assign (right)    | `ternary ('=' assign)?` - LHS: name/attr/elem   |
//! | ternary           | `logic_or ('?' ternary ':' ternary)?`           |
//! | logic_or (right)  | `logic_and ('\|\|' logic_or)?`                  |
//! | logic_and (right) | `test ('&&' logic_and)?`                        |
//! | test (left)       | `> < == != >= <= in`                            |
//! | bitwise (left)    | `& \| ^`                                        |
//! | shift (left)      | `<< >>`                                         |
//! | additive (left)   | `+ -`                                           |
//! | multiplic. (left) | `* / %`                                         |
//! | unary (prefix)    | `! - ~`                                         |
//! | primary           | factor with `.name`, `[index]`, `(args)` chains |
//! | factor            | literals, `(...)`, `[...]`, `{...}`, `def ...`  |
//!
//! Suffix chains only hang off identifier heads, so `1(x)` or
//! `"s".len` never parse as calls or attribute reads.
//!
//! Compound assignments desugar: `x += e` builds the same tree as
//! `x = x + e`.
//!
//! # Failure semantics
//!
//! The first failure fires one [`ParseEvent::Fail`] with an error code
//! and the source position, then `None` propagates to the entry
//! point. There is no recovery. Partial subtrees live in the session
//! heap and are reclaimed with it, so error paths leak nothing.
//!
//! # Example
//!
//! ```
//! use mica_lex::{Lexer, StrSource};
//! use mica_par::{parse_stmt, StmtKind};
//! use mica_util::Heap;
//!
//! let heap = Heap::new();
//! let mut lex = Lexer::new(StrSource::new("var x = 1;"));
//! let stmt = parse_stmt(&mut lex, &heap, None).unwrap();
//! assert!(matches!(stmt.kind, StmtKind::Var(_)));
//! ```

mod ast;
mod event;
mod expr;
mod stmt;


pub use ast::{BinOp, Expr, Stmt, StmtIter, StmtKind, UnOp};
pub use event::{ParseErrorKind, ParseEvent};

use mica_lex::{Lexer, LineSource};
use mica_util::{Heap, Pos};

/// Upper bound on grammar recursion depth.
///
/// A compile-time knob: pathological nesting fails with
/// `InvalidSyntax` instead of exhausting the call stack.
pub const MAX_DEPTH: u32 = 200;

/// Parse one full expression (including top-level comma).
///
/// Returns the owned root, or `None` after firing a failure event.
pub fn parse_expr<'h, 'a, S: LineSource>(
    lex: &'a mut Lexer<S>,
    heap: &'h Heap,
    sink: Option<&'a mut dyn FnMut(ParseEvent)>,
) -> Option<&'h Expr<'h>> {
    Parser::new(lex, heap, sink).expr()
}

/// Parse one statement.
///
/// At a cleanly exhausted stream this fires [`ParseEvent::Eof`] and
/// returns `None`.
pub fn parse_stmt<'h, 'a, S: LineSource>(
    lex: &'a mut Lexer<S>,
    heap: &'h Heap,
    sink: Option<&'a mut dyn FnMut(ParseEvent)>,
) -> Option<&'h Stmt<'h>> {
    Parser::new(lex, heap, sink).stmt()
}

/// Parse statements until end of input or a closing `}`.
///
/// An empty input yields a single `Pass` statement.
pub fn parse_stmt_list<'h, 'a, S: LineSource>(
    lex: &'a mut Lexer<S>,
    heap: &'h Heap,
    sink: Option<&'a mut dyn FnMut(ParseEvent)>,
) -> Option<&'h Stmt<'h>> {
    Parser::new(lex, heap, sink).stmt_list()
}

/// Parser state for one entry-point call.
struct Parser<'h, 'a, S> {
    lex: &'a mut Lexer<S>,
    heap: &'h Heap,
    sink: Option<&'a mut dyn FnMut(ParseEvent)>,
    /// Set once a failure event has fired; later failures on the
    /// unwind path stay silent.
    reported: bool,
    depth: u32,
}

impl<'h, 'a, S: LineSource> Parser<'h, 'a, S> {
    fn new(
        lex: &'a mut Lexer<S>,
        heap: &'h Heap,
        sink: Option<&'a mut dyn FnMut(ParseEvent)>,
    ) -> Self {
        Self {
            lex,
            heap,
            sink,
            reported: false,
            depth: 0,
        }
    }

    /// Report a failure at the current token.
    fn fail(&mut self, code: ParseErrorKind) {
        let pos = self.lex.position();
        self.fail_at(code, pos);
    }

    /// Report a failure at an explicit position.
    fn fail_at(&mut self, code: ParseErrorKind, pos: Pos) {
        if self.reported {
            return;
        }
        self.reported = true;
        if let Some(sink) = self.sink.as_mut() {
            sink(ParseEvent::Fail { code, pos });
        }
    }

    /// Report clean end of stream.
    fn eof_event(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            sink(ParseEvent::Eof);
        }
    }

    /// Charge one level of grammar nesting.
    fn enter(&mut self) -> bool {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            self.fail(ParseErrorKind::InvalidSyntax);
            return false;
        }
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Run a recursive continuation one nesting level deeper.
    ///
    /// Right-recursive productions (comma chains, chained assignments,
    /// `&&`/`||` chains, nested ternaries, declaration and key/value
    /// lists) route their self-recursion through here so a long chain
    /// charges the budget once per element.
    fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        if !self.enter() {
            return None;
        }
        let result = f(self);
        self.leave();
        result
    }

    /// Materialise an expression node, mapping allocation failure to
    /// an out-of-memory event.
    fn alloc_expr(&mut self, expr: Expr<'h>) -> Option<&'h Expr<'h>> {
        match Expr::alloc(self.heap, expr) {
            Ok(e) => Some(e),
            Err(_) => {
                self.fail(ParseErrorKind::NotEnoughMemory);
                None
            }
        }
    }

    /// Materialise a statement node.
    fn alloc_stmt(&mut self, kind: StmtKind<'h>) -> Option<&'h Stmt<'h>> {
        match Stmt::alloc(self.heap, kind) {
            Ok(s) => Some(s),
            Err(_) => {
                self.fail(ParseErrorKind::NotEnoughMemory);
                None
            }
        }
    }

    /// Materialise an identifier leaf from the current token's text.
    fn alloc_ident(&mut self) -> Option<&'h Expr<'h>> {
        let heap = self.heap;
        match Expr::ident(heap, &self.lex.tok().text) {
            Ok(e) => Some(e),
            Err(_) => {
                self.fail(ParseErrorKind::NotEnoughMemory);
                None
            }
        }
    }

    /// Materialise a string leaf from the current token's text.
    fn alloc_string(&mut self) -> Option<&'h Expr<'h>> {
        let heap = self.heap;
        match Expr::string(heap, &self.lex.tok().text) {
            Ok(e) => Some(e),
            Err(_) => {
                self.fail(ParseErrorKind::NotEnoughMemory);
                None
            }
        }
    }

    /// Deep-copy a subtree, mapping allocation failure to an event.
    fn clone_expr(&mut self, expr: &'h Expr<'h>) -> Option<&'h Expr<'h>> {
        match expr.clone_in(self.heap) {
            Ok(e) => Some(e),
            Err(_) => {
                self.fail(ParseErrorKind::NotEnoughMemory);
                None
            }
        }
    }
}
