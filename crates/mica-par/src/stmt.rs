//! Statement parsing.

use mica_lex::{LineSource, TokenKind};

use crate::ast::{Stmt, StmtKind};
use crate::event::ParseErrorKind;
use crate::Parser;

impl<'h, 'a, S: LineSource> Parser<'h, 'a, S> {
    /// One statement. Fires the end-of-stream event and returns `None`
    /// at a cleanly exhausted stream. Charges the recursion budget.
    pub(crate) fn stmt(&mut self) -> Option<&'h Stmt<'h>> {
        if !self.enter() {
            return None;
        }
        let result = self.stmt_inner();
        self.leave();
        result
    }

    fn stmt_inner(&mut self) -> Option<&'h Stmt<'h>> {
        match self.lex.token() {
            TokenKind::Eof => {
                self.eof_event();
                None
            }
            TokenKind::If => self.stmt_if(),
            TokenKind::Var => self.stmt_var(),
            TokenKind::Return => self.stmt_return(),
            TokenKind::While => self.stmt_while(),
            TokenKind::Break => self.stmt_break(),
            TokenKind::Continue => self.stmt_continue(),
            _ => self.stmt_expr(),
        }
    }

    /// Zero or more statements until end of input or a closing `}`.
    ///
    /// Redundant semicolons at block scope are consumed silently; an
    /// empty list yields a single `Pass` node.
    pub(crate) fn stmt_list(&mut self) -> Option<&'h Stmt<'h>> {
        let mut head: Option<&'h Stmt<'h>> = None;
        let mut last: Option<&'h Stmt<'h>> = None;

        loop {
            while self.lex.match_token(TokenKind::Semicolon) {}

            let tok = self.lex.token();
            if tok == TokenKind::Eof || tok == TokenKind::RBrace {
                break;
            }

            let curr = self.stmt()?;
            match last {
                Some(prev) => prev.set_next(curr),
                None => head = Some(curr),
            }
            last = Some(curr);
        }

        match head {
            Some(head) => Some(head),
            None => self.alloc_stmt(StmtKind::Pass),
        }
    }

    /// `{ stmt* }`, or a single statement outside braces.
    pub(crate) fn stmt_block(&mut self) -> Option<&'h Stmt<'h>> {
        if self.lex.match_token(TokenKind::LBrace) {
            let list = self.stmt_list()?;
            if !self.lex.match_token(TokenKind::RBrace) {
                self.fail(ParseErrorKind::InvalidToken);
                return None;
            }
            Some(list)
        } else {
            self.stmt()
        }
    }

    /// `if cond block (else block)?` - `else if` nests in the else
    /// branch.
    fn stmt_if(&mut self) -> Option<&'h Stmt<'h>> {
        self.lex.advance();
        let cond = self.expr()?;
        let then = self.stmt_block()?;
        let otherwise = if self.lex.match_token(TokenKind::Else) {
            Some(self.stmt_block()?)
        } else {
            None
        };
        self.alloc_stmt(StmtKind::If {
            cond,
            then,
            otherwise,
        })
    }

    /// `var decls ;?`
    fn stmt_var(&mut self) -> Option<&'h Stmt<'h>> {
        self.lex.advance();
        let decls = self.expr_vardef_list()?;
        self.lex.match_token(TokenKind::Semicolon);
        self.alloc_stmt(StmtKind::Var(decls))
    }

    /// `return ;` or `return expr ;?`
    fn stmt_return(&mut self) -> Option<&'h Stmt<'h>> {
        self.lex.advance();
        if self.lex.match_token(TokenKind::Semicolon) {
            return self.alloc_stmt(StmtKind::Return(None));
        }
        let value = self.expr()?;
        self.lex.match_token(TokenKind::Semicolon);
        self.alloc_stmt(StmtKind::Return(Some(value)))
    }

    /// `while cond block`
    fn stmt_while(&mut self) -> Option<&'h Stmt<'h>> {
        self.lex.advance();
        let cond = self.expr()?;
        let body = self.stmt_block()?;
        self.alloc_stmt(StmtKind::While { cond, body })
    }

    fn stmt_break(&mut self) -> Option<&'h Stmt<'h>> {
        self.lex.advance();
        self.lex.match_token(TokenKind::Semicolon);
        self.alloc_stmt(StmtKind::Break)
    }

    fn stmt_continue(&mut self) -> Option<&'h Stmt<'h>> {
        self.lex.advance();
        self.lex.match_token(TokenKind::Semicolon);
        self.alloc_stmt(StmtKind::Continue)
    }

    /// Expression statement with an optional trailing semicolon.
    fn stmt_expr(&mut self) -> Option<&'h Stmt<'h>> {
        let expr = self.expr()?;
        self.lex.match_token(TokenKind::Semicolon);
        self.alloc_stmt(StmtKind::Expr(expr))
    }
}
