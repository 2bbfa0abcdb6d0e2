//! Expression parsing.
//!
//! One method per precedence tier, descending from the comma tier to
//! factors. Left-associative tiers iterate; right-associative tiers
//! recurse on their own production. The recursion budget is charged in
//! [`Parser::expr_unary`] (every operand spine and prefix chain passes
//! through it) and at each right-recursive continuation (comma,
//! assignment, logical, ternary, declaration and key/value chains), so
//! pathological nesting of any shape fails instead of exhausting the
//! native stack.

use mica_lex::{LineSource, TokenKind};

use crate::ast::{BinOp, Expr, UnOp};
use crate::event::ParseErrorKind;
use crate::Parser;

/// Map a compound-assignment token onto the operation it applies.
fn compound_assign_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::PlusEq => Some(BinOp::Add),
        TokenKind::MinusEq => Some(BinOp::Sub),
        TokenKind::StarEq => Some(BinOp::Mul),
        TokenKind::SlashEq => Some(BinOp::Div),
        TokenKind::PercentEq => Some(BinOp::Mod),
        TokenKind::AmpEq => Some(BinOp::BitAnd),
        TokenKind::PipeEq => Some(BinOp::BitOr),
        TokenKind::CaretEq => Some(BinOp::BitXor),
        TokenKind::ShlEq => Some(BinOp::Shl),
        TokenKind::ShrEq => Some(BinOp::Shr),
        _ => None,
    }
}

impl<'h, 'a, S: LineSource> Parser<'h, 'a, S> {
    /// Entry: a full expression, comma tier included.
    pub(crate) fn expr(&mut self) -> Option<&'h Expr<'h>> {
        self.expr_comma()
    }

    /// `assign (',' comma)?` - right-leaning chain.
    pub(crate) fn expr_comma(&mut self) -> Option<&'h Expr<'h>> {
        let first = self.expr_assign()?;
        if self.lex.match_token(TokenKind::Comma) {
            let rest = self.descend(|p| p.expr_comma())?;
            return self.alloc_expr(Expr::Comma(first, rest));
        }
        Some(first)
    }

    /// `ternary ('=' assign)?` plus the compound-assignment forms.
    fn expr_assign(&mut self) -> Option<&'h Expr<'h>> {
        let start = self.lex.position();
        let target = self.expr_ternary()?;
        let tok = self.lex.token();

        if tok == TokenKind::Eq {
            if !target.is_left_value() {
                self.fail_at(ParseErrorKind::InvalidLeftValue, start);
                return None;
            }
            self.lex.advance();
            let value = self.descend(|p| p.expr_assign())?;
            return self.alloc_expr(Expr::Assign(target, value));
        }

        if let Some(op) = compound_assign_op(tok) {
            if !target.is_left_value() {
                self.fail_at(ParseErrorKind::InvalidLeftValue, start);
                return None;
            }
            self.lex.advance();
            let rhs = self.descend(|p| p.expr_assign())?;
            // `x op= e` builds the same tree as `x = x op e`.
            let target_copy = self.clone_expr(target)?;
            let value = self.alloc_expr(Expr::Binary(op, target_copy, rhs))?;
            return self.alloc_expr(Expr::Assign(target, value));
        }

        Some(target)
    }

    /// `logic_or ('?' ternary ':' ternary)?`
    fn expr_ternary(&mut self) -> Option<&'h Expr<'h>> {
        let cond = self.expr_logic_or()?;
        if self.lex.match_token(TokenKind::Question) {
            let pair = self.descend(|p| p.expr_pair())?;
            return self.alloc_expr(Expr::Ternary(cond, pair));
        }
        Some(cond)
    }

    /// The `then : else` arm of a ternary.
    fn expr_pair(&mut self) -> Option<&'h Expr<'h>> {
        let then = self.expr_ternary()?;
        if !self.lex.match_token(TokenKind::Colon) {
            self.fail(ParseErrorKind::InvalidToken);
            return None;
        }
        let other = self.expr_ternary()?;
        self.alloc_expr(Expr::Pair(then, other))
    }

    /// `logic_and ('||' logic_or)?` - right-associative.
    fn expr_logic_or(&mut self) -> Option<&'h Expr<'h>> {
        let lhs = self.expr_logic_and()?;
        if self.lex.match_token(TokenKind::OrOr) {
            let rhs = self.descend(|p| p.expr_logic_or())?;
            return self.alloc_expr(Expr::Binary(BinOp::LogicOr, lhs, rhs));
        }
        Some(lhs)
    }

    /// `test ('&&' logic_and)?` - right-associative.
    fn expr_logic_and(&mut self) -> Option<&'h Expr<'h>> {
        let lhs = self.expr_test()?;
        if self.lex.match_token(TokenKind::AndAnd) {
            let rhs = self.descend(|p| p.expr_logic_and())?;
            return self.alloc_expr(Expr::Binary(BinOp::LogicAnd, lhs, rhs));
        }
        Some(lhs)
    }

    /// Relational tier: `> < == != >= <= in`, left-associative.
    fn expr_test(&mut self) -> Option<&'h Expr<'h>> {
        let mut expr = self.expr_aand()?;
        loop {
            let op = match self.lex.token() {
                TokenKind::Gt => BinOp::Gt,
                TokenKind::Lt => BinOp::Lt,
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::NotEq => BinOp::Ne,
                TokenKind::GtEq => BinOp::Ge,
                TokenKind::LtEq => BinOp::Le,
                TokenKind::In => BinOp::In,
                _ => break,
            };
            self.lex.advance();
            let rhs = self.expr_aand()?;
            expr = self.alloc_expr(Expr::Binary(op, expr, rhs))?;
        }
        Some(expr)
    }

    /// Bitwise tier: `& | ^`, left-associative.
    fn expr_aand(&mut self) -> Option<&'h Expr<'h>> {
        let mut expr = self.expr_shift()?;
        loop {
            let op = match self.lex.token() {
                TokenKind::Ampersand => BinOp::BitAnd,
                TokenKind::Pipe => BinOp::BitOr,
                TokenKind::Caret => BinOp::BitXor,
                _ => break,
            };
            self.lex.advance();
            let rhs = self.expr_shift()?;
            expr = self.alloc_expr(Expr::Binary(op, expr, rhs))?;
        }
        Some(expr)
    }

    /// Shift tier: `<< >>`, left-associative.
    fn expr_shift(&mut self) -> Option<&'h Expr<'h>> {
        let mut expr = self.expr_add()?;
        loop {
            let op = match self.lex.token() {
                TokenKind::Shl => BinOp::Shl,
                TokenKind::Shr => BinOp::Shr,
                _ => break,
            };
            self.lex.advance();
            let rhs = self.expr_add()?;
            expr = self.alloc_expr(Expr::Binary(op, expr, rhs))?;
        }
        Some(expr)
    }

    /// Additive tier: `+ -`, left-associative.
    fn expr_add(&mut self) -> Option<&'h Expr<'h>> {
        let mut expr = self.expr_mul()?;
        loop {
            let op = match self.lex.token() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.lex.advance();
            let rhs = self.expr_mul()?;
            expr = self.alloc_expr(Expr::Binary(op, expr, rhs))?;
        }
        Some(expr)
    }

    /// Multiplicative tier: `* / %`, left-associative.
    fn expr_mul(&mut self) -> Option<&'h Expr<'h>> {
        let mut expr = self.expr_unary()?;
        loop {
            let op = match self.lex.token() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.lex.advance();
            let rhs = self.expr_unary()?;
            expr = self.alloc_expr(Expr::Binary(op, expr, rhs))?;
        }
        Some(expr)
    }

    /// Prefix tier: `! - ~`. Charges the recursion budget.
    fn expr_unary(&mut self) -> Option<&'h Expr<'h>> {
        if !self.enter() {
            return None;
        }
        let result = self.expr_unary_inner();
        self.leave();
        result
    }

    fn expr_unary_inner(&mut self) -> Option<&'h Expr<'h>> {
        let op = match self.lex.token() {
            TokenKind::Bang => UnOp::Not,
            TokenKind::Minus => UnOp::Neg,
            TokenKind::Tilde => UnOp::BitNot,
            _ => return self.expr_primary(),
        };
        self.lex.advance();
        let operand = self.expr_unary()?;
        self.alloc_expr(Expr::Unary(op, operand))
    }

    /// Factor with optional `.name`, `[index]`, `(args)` suffix chain.
    ///
    /// The chain only hangs off an identifier head; any other factor
    /// is returned unchanged and the suffix token is left for the
    /// caller.
    fn expr_primary(&mut self) -> Option<&'h Expr<'h>> {
        let mut expr = self.expr_factor()?;
        if !matches!(expr, Expr::Ident(_)) {
            return Some(expr);
        }
        loop {
            expr = match self.lex.token() {
                TokenKind::Dot => self.form_attr(expr)?,
                TokenKind::LBracket => self.form_elem(expr)?,
                TokenKind::LParen => self.form_call(expr)?,
                _ => break,
            };
        }
        Some(expr)
    }

    /// Leaf or bracketed form.
    fn expr_factor(&mut self) -> Option<&'h Expr<'h>> {
        match self.lex.token() {
            TokenKind::Eof => {
                self.fail(ParseErrorKind::InvalidSyntax);
                None
            }
            TokenKind::LParen => self.form_parenth(),
            TokenKind::LBracket => self.form_array(),
            TokenKind::LBrace => self.form_dict(),
            TokenKind::Def => self.expr_funcdef(),
            TokenKind::Ident => {
                let expr = self.alloc_ident()?;
                self.lex.advance();
                Some(expr)
            }
            TokenKind::Number => {
                let value = self.lex.tok().num;
                let expr = self.alloc_expr(Expr::Number(value))?;
                self.lex.advance();
                Some(expr)
            }
            TokenKind::Str => {
                let expr = self.alloc_string()?;
                self.lex.advance();
                Some(expr)
            }
            TokenKind::Undefined => self.leaf(Expr::Undefined),
            TokenKind::Nan => self.leaf(Expr::Nan),
            TokenKind::Null => self.leaf(Expr::Null),
            TokenKind::True => self.leaf(Expr::True),
            TokenKind::False => self.leaf(Expr::False),
            _ => {
                self.fail(ParseErrorKind::InvalidToken);
                None
            }
        }
    }

    fn leaf(&mut self, expr: Expr<'h>) -> Option<&'h Expr<'h>> {
        let expr = self.alloc_expr(expr)?;
        self.lex.advance();
        Some(expr)
    }

    /// `def name? ( params? ) block`
    fn expr_funcdef(&mut self) -> Option<&'h Expr<'h>> {
        self.lex.advance(); // def

        let name = if self.lex.token() == TokenKind::Ident {
            Some(self.expr_factor()?)
        } else {
            None
        };

        if !self.lex.match_token(TokenKind::LParen) {
            self.fail(ParseErrorKind::InvalidToken);
            return None;
        }

        let params = if self.lex.match_token(TokenKind::RParen) {
            None
        } else {
            let list = self.expr_vardef_list()?;
            if !self.lex.match_token(TokenKind::RParen) {
                self.fail(ParseErrorKind::InvalidToken);
                return None;
            }
            Some(list)
        };

        let block = self.stmt_block()?;

        let head = if name.is_some() || params.is_some() {
            Some(self.alloc_expr(Expr::FuncHead(name, params))?)
        } else {
            None
        };
        let body = self.alloc_expr(Expr::Proc(block))?;
        self.alloc_expr(Expr::FuncDef(head, body))
    }

    /// Declaration list: `vardef (',' vardef)*`, right-leaning.
    pub(crate) fn expr_vardef_list(&mut self) -> Option<&'h Expr<'h>> {
        let first = self.expr_vardef()?;
        if self.lex.match_token(TokenKind::Comma) {
            let rest = self.descend(|p| p.expr_vardef_list())?;
            return self.alloc_expr(Expr::Comma(first, rest));
        }
        Some(first)
    }

    /// One declaration: a name with an optional initialiser.
    fn expr_vardef(&mut self) -> Option<&'h Expr<'h>> {
        if self.lex.token() != TokenKind::Ident {
            self.fail(ParseErrorKind::InvalidToken);
            return None;
        }
        let name = self.expr_factor()?;
        if self.lex.match_token(TokenKind::Eq) {
            let init = self.expr_assign()?;
            return self.alloc_expr(Expr::Assign(name, init));
        }
        Some(name)
    }

    /// `obj.name`
    fn form_attr(&mut self, lhs: &'h Expr<'h>) -> Option<&'h Expr<'h>> {
        self.lex.advance(); // .
        if self.lex.token() != TokenKind::Ident {
            self.fail(ParseErrorKind::InvalidToken);
            return None;
        }
        let attr = self.expr_factor()?;
        self.alloc_expr(Expr::Attr(lhs, attr))
    }

    /// `obj[index]` - the subscript is a ternary, not a comma list.
    fn form_elem(&mut self, lhs: &'h Expr<'h>) -> Option<&'h Expr<'h>> {
        self.lex.advance(); // [
        let index = self.expr_ternary()?;
        let expr = self.alloc_expr(Expr::Elem(lhs, index))?;
        if !self.lex.match_token(TokenKind::RBracket) {
            self.fail(ParseErrorKind::InvalidToken);
            return None;
        }
        Some(expr)
    }

    /// `callee(args?)`
    fn form_call(&mut self, callee: &'h Expr<'h>) -> Option<&'h Expr<'h>> {
        self.lex.advance(); // (
        if self.lex.match_token(TokenKind::RParen) {
            return self.alloc_expr(Expr::Call(callee, None));
        }
        let args = self.expr_comma()?;
        if !self.lex.match_token(TokenKind::RParen) {
            self.fail(ParseErrorKind::InvalidToken);
            return None;
        }
        self.alloc_expr(Expr::Call(callee, Some(args)))
    }

    /// `( comma )` - parenthesised expressions are never empty.
    fn form_parenth(&mut self) -> Option<&'h Expr<'h>> {
        self.lex.advance(); // (
        let inner = self.expr_comma()?;
        if !self.lex.match_token(TokenKind::RParen) {
            self.fail(ParseErrorKind::InvalidToken);
            return None;
        }
        Some(inner)
    }

    /// `[ comma? ]`
    fn form_array(&mut self) -> Option<&'h Expr<'h>> {
        self.lex.advance(); // [
        if self.lex.match_token(TokenKind::RBracket) {
            return self.alloc_expr(Expr::Array(None));
        }
        let elems = self.expr_comma()?;
        if !self.lex.match_token(TokenKind::RBracket) {
            self.fail(ParseErrorKind::InvalidToken);
            return None;
        }
        self.alloc_expr(Expr::Array(Some(elems)))
    }

    /// `{ kvlist? }`
    fn form_dict(&mut self) -> Option<&'h Expr<'h>> {
        self.lex.advance(); // {
        if self.lex.match_token(TokenKind::RBrace) {
            return self.alloc_expr(Expr::Dict(None));
        }
        let entries = self.expr_kvlist()?;
        if !self.lex.match_token(TokenKind::RBrace) {
            self.fail(ParseErrorKind::InvalidToken);
            return None;
        }
        self.alloc_expr(Expr::Dict(Some(entries)))
    }

    /// `kv (',' kvlist)?`, right-leaning.
    fn expr_kvlist(&mut self) -> Option<&'h Expr<'h>> {
        let first = self.expr_kv()?;
        if self.lex.match_token(TokenKind::Comma) {
            let rest = self.descend(|p| p.expr_kvlist())?;
            return self.alloc_expr(Expr::Comma(first, rest));
        }
        Some(first)
    }

    /// `key : value` - the key is a name or a string literal, the
    /// value a full assign-expression.
    fn expr_kv(&mut self) -> Option<&'h Expr<'h>> {
        let tok = self.lex.token();
        if tok != TokenKind::Ident && tok != TokenKind::Str {
            self.fail(ParseErrorKind::InvalidToken);
            return None;
        }
        let key = self.expr_factor()?;
        if !self.lex.match_token(TokenKind::Colon) {
            self.fail(ParseErrorKind::InvalidToken);
            return None;
        }
        let value = self.expr_assign()?;
        self.alloc_expr(Expr::Pair(key, value))
    }
}
