//! Statement parsing for function bodies.
//!
//! Covers blocks, declarations, labeled statements, the simple statements
//! (expressions, sends, increments, assignments, short variable
//! declarations) and the control statements `if`, `for`, `switch`,
//! `select`, `go`, `defer`, `return`, `break`, `continue`, `goto` and
//! `fallthrough`.

use crate::error::SyntaxError;
use crate::expr::Operand;
use crate::parser::GoParser;
use crate::span::Span;
use crate::token::GoToken;

/// The shape of a simple statement, as far as the enclosing statement cares.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Simple {
    /// A bare expression.
    Expr,
    /// A `range` clause.
    Range,
    /// An assignment, definition, send or increment.
    Other,
}

fn is_assign_op(kind: GoToken) -> bool {
    use GoToken::*;
    matches!(
        kind,
        Assign
            | Define
            | AddAssign
            | SubAssign
            | MulAssign
            | QuoAssign
            | RemAssign
            | AndAssign
            | OrAssign
            | XorAssign
            | ShlAssign
            | ShrAssign
            | AndNotAssign
    )
}

impl GoParser<'_> {
    // ========================================================================
    // Blocks
    // ========================================================================

    /// `Block = "{" StatementList "}" .` Returns the span of the braces.
    pub(crate) fn parse_block(&mut self) -> Result<Span, SyntaxError> {
        let start = self.expect(GoToken::LBrace, "'{'")?.start;
        self.nested(|p| p.parse_stmt_list())?;
        let end = self.expect(GoToken::RBrace, "'}'")?.end;
        Ok(Span::new(start, end))
    }

    /// Statements up to the closing `}` of a block or the next clause of a
    /// `switch` or `select`.
    fn parse_stmt_list(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.current() {
                GoToken::RBrace | GoToken::Case | GoToken::Default | GoToken::Eof => {
                    return Ok(())
                }
                GoToken::Semicolon => self.advance(),
                _ => {
                    self.parse_stmt()?;
                    if !self.eat(GoToken::Semicolon) && !self.at(GoToken::RBrace) {
                        return Err(self.expected("';'"));
                    }
                }
            }
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_stmt(&mut self) -> Result<(), SyntaxError> {
        match self.current() {
            GoToken::Const | GoToken::Var | GoToken::Type => self.parse_gen_decl().map(drop),
            GoToken::Ident if self.peek(1) == GoToken::Colon => self.parse_labeled_stmt(),
            GoToken::LBrace => self.parse_block().map(drop),
            GoToken::If => self.parse_if_stmt(),
            GoToken::For => self.parse_for_stmt(),
            GoToken::Switch => self.parse_switch_stmt(),
            GoToken::Select => self.parse_select_stmt(),
            GoToken::Go | GoToken::Defer => self.parse_go_or_defer_stmt(),
            GoToken::Return => {
                self.advance();
                if !matches!(self.current(), GoToken::Semicolon | GoToken::RBrace) {
                    self.parse_expr_list()?;
                }
                Ok(())
            }
            GoToken::Break | GoToken::Continue => {
                self.advance();
                self.eat(GoToken::Ident);
                Ok(())
            }
            GoToken::Goto => {
                self.advance();
                self.expect_ident().map(drop)
            }
            GoToken::Fallthrough => {
                self.advance();
                Ok(())
            }
            _ => self.parse_simple_stmt(false).map(drop),
        }
    }

    /// `Label ":" Statement`, where the statement may be empty.
    fn parse_labeled_stmt(&mut self) -> Result<(), SyntaxError> {
        self.advance();
        self.advance();
        if matches!(self.current(), GoToken::RBrace | GoToken::Semicolon) {
            return Ok(());
        }
        self.parse_stmt()
    }

    /// Parses a simple statement. With `range_ok`, a `range` clause as in a
    /// `for` header is accepted too.
    fn parse_simple_stmt(&mut self, range_ok: bool) -> Result<Simple, SyntaxError> {
        if range_ok && self.eat(GoToken::Range) {
            self.parse_expr()?;
            return Ok(Simple::Range);
        }

        let start = self.current_span().start;
        let lhs = self.parse_expr_list()?;
        let kind = self.current();
        if is_assign_op(kind) {
            if kind == GoToken::Define && !matches!(lhs, Operand::Name | Operand::Value) {
                return Err(self.error_at(start, "non-name on left side of :="));
            }
            self.advance();
            if range_ok && matches!(kind, GoToken::Assign | GoToken::Define) && self.eat(GoToken::Range)
            {
                self.parse_expr()?;
                return Ok(Simple::Range);
            }
            self.parse_expr_list()?;
            return Ok(Simple::Other);
        }
        match kind {
            GoToken::Inc | GoToken::Dec => {
                self.advance();
                Ok(Simple::Other)
            }
            GoToken::Arrow => {
                self.advance();
                self.parse_expr()?;
                Ok(Simple::Other)
            }
            _ => Ok(Simple::Expr),
        }
    }

    /// Parses a statement header with composite literals of named types
    /// disabled.
    fn header<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        let saved = std::mem::replace(&mut self.no_lit, true);
        let result = rule(self);
        self.no_lit = saved;
        result
    }

    /// `"if" [ SimpleStmt ";" ] Expression Block [ "else" ( IfStmt | Block ) ]`
    fn parse_if_stmt(&mut self) -> Result<(), SyntaxError> {
        let start = self.expect(GoToken::If, "'if'")?.start;
        self.header(|p| {
            if p.at(GoToken::LBrace) {
                return Err(p.error_at(start, "missing condition in if statement"));
            }
            let mut cond = Simple::Other;
            if !p.at(GoToken::Semicolon) {
                cond = p.parse_simple_stmt(false)?;
            }
            if p.eat(GoToken::Semicolon) {
                if p.at(GoToken::LBrace) {
                    return Err(p.error_at(start, "missing condition in if statement"));
                }
                cond = p.parse_simple_stmt(false)?;
            }
            if cond != Simple::Expr {
                return Err(p.error_at(start, "expected boolean expression in if statement"));
            }
            Ok(())
        })?;
        self.parse_block()?;

        if self.eat(GoToken::Else) {
            match self.current() {
                GoToken::If => self.parse_if_stmt()?,
                GoToken::LBrace => {
                    self.parse_block()?;
                }
                _ => return Err(self.expected("'if' or '{'")),
            }
        }
        Ok(())
    }

    /// `"for" [ Condition | ForClause | RangeClause ] Block`
    fn parse_for_stmt(&mut self) -> Result<(), SyntaxError> {
        self.expect(GoToken::For, "'for'")?;
        self.header(|p| {
            if p.at(GoToken::LBrace) {
                return Ok(());
            }
            let mut init = Simple::Other;
            if !p.at(GoToken::Semicolon) {
                init = p.parse_simple_stmt(true)?;
                if init == Simple::Range || p.at(GoToken::LBrace) {
                    return Ok(());
                }
            }
            p.expect(GoToken::Semicolon, "'{'")?;
            if !p.at(GoToken::Semicolon) {
                p.parse_expr()?;
            }
            p.expect(GoToken::Semicolon, "';'")?;
            if !p.at(GoToken::LBrace) {
                p.parse_simple_stmt(false)?;
            }
            Ok(())
        })?;
        self.parse_block().map(drop)
    }

    /// Expression and type switches:
    /// `"switch" [ SimpleStmt ";" ] [ Expression | TypeSwitchGuard ] "{" ... "}"`
    fn parse_switch_stmt(&mut self) -> Result<(), SyntaxError> {
        self.expect(GoToken::Switch, "'switch'")?;
        self.header(|p| {
            if !matches!(p.current(), GoToken::LBrace | GoToken::Semicolon) {
                p.parse_simple_stmt(false)?;
            }
            if p.eat(GoToken::Semicolon) && !p.at(GoToken::LBrace) {
                p.parse_simple_stmt(false)?;
            }
            Ok(())
        })?;
        self.parse_clauses(|p| p.parse_expr_list().map(drop))
    }

    /// `"select" "{" { CommClause } "}"`
    fn parse_select_stmt(&mut self) -> Result<(), SyntaxError> {
        self.expect(GoToken::Select, "'select'")?;
        self.parse_clauses(|p| p.parse_simple_stmt(false).map(drop))
    }

    /// The braced `case`/`default` clauses of a `switch` or `select`.
    fn parse_clauses(
        &mut self,
        mut case: impl FnMut(&mut Self) -> Result<(), SyntaxError>,
    ) -> Result<(), SyntaxError> {
        self.expect(GoToken::LBrace, "'{'")?;
        self.nested(|p| {
            while !p.at(GoToken::RBrace) {
                match p.current() {
                    GoToken::Case => {
                        p.advance();
                        case(p)?;
                    }
                    GoToken::Default => p.advance(),
                    _ => return Err(p.expected("'case' or 'default'")),
                }
                p.expect(GoToken::Colon, "':'")?;
                p.parse_stmt_list()?;
            }
            Ok(())
        })?;
        self.expect(GoToken::RBrace, "'}'")?;
        Ok(())
    }

    /// `go` and `defer` take a function call.
    fn parse_go_or_defer_stmt(&mut self) -> Result<(), SyntaxError> {
        let keyword = if self.at(GoToken::Go) { "go" } else { "defer" };
        self.advance();
        let start = self.current_span().start;
        if self.parse_expr()? != Operand::Call {
            return Err(self.error_at(
                start,
                format!("expression in {keyword} must be function call"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_source;

    fn body(stmts: &str) -> String {
        format!("package p\n\nfunc f() {{\n{stmts}\n}}\n")
    }

    fn accepts(stmts: &str) {
        if let Err(e) = parse_source("s.go", body(stmts)) {
            panic!("rejected {stmts:?}: {e}");
        }
    }

    fn rejects(stmts: &str) -> String {
        parse_source("s.go", body(stmts)).unwrap_err().message
    }

    #[test]
    fn simple_statements() {
        accepts("x := 1\ny, z = z, y\nn += 2\ni++\nch <- v\nf()\n<-done");
        accepts("var a, b int\nconst c = 1\ntype t struct{}");
        accepts("m[k], ok = v.(T)");
    }

    #[test]
    fn if_statements() {
        accepts("if x {\n}");
        accepts("if err := f(); err != nil {\n\treturn\n} else if x {\n} else {\n}");
        accepts("if cur, ok := parent.Deadline(); ok && cur.Before(d) {\n\treturn WithCancel(parent)\n}");
        accepts("if v := (T{}); v.ok {\n}");
        accepts("if x == []int{1}[0] {\n}");
    }

    #[test]
    fn for_statements() {
        accepts("for {\n\tbreak\n}");
        accepts("for i := 0; i < n; i++ {\n\tcontinue\n}");
        accepts("for ; ; {\n}");
        accepts("for x < 10 {\n}");
        accepts("for k, v := range m {\n}");
        accepts("for range ch {\n}");
        accepts("for i = range 10 {\n}");
    }

    #[test]
    fn switch_and_select() {
        accepts("switch {\ncase x > 1, x < 0:\n\tfallthrough\ndefault:\n}");
        accepts("switch x := v.(type) {\ncase nil, *T:\ncase []int, map[string]int:\n\tf(x)\n}");
        accepts("switch n := f(); n {\ncase 1:\n}");
        accepts("select {\ncase v := <-ch:\n\t_ = v\ncase out <- 1:\ncase <-done:\n\treturn\ndefault:\n}");
    }

    #[test]
    fn other_statements() {
        accepts("go func() {\n\tc.cancel(true, DeadlineExceeded, cause)\n}()");
        accepts("defer mu.Unlock()");
        accepts("outer:\n\tfor {\n\t\tbreak outer\n\t}");
        accepts("goto end\nend:");
        accepts("{\n\tx := 1\n\t_ = x\n}");
        accepts("return");
        accepts(";");
    }

    #[test]
    fn malformed_statements() {
        assert_eq!(rejects("x := := 1"), "expected expression, found operator");
        assert_eq!(rejects("return return"), "expected expression, found keyword");
        assert_eq!(rejects("f() g()"), "expected ';', found identifier");
        assert_eq!(rejects("if {\n}"), "missing condition in if statement");
        assert_eq!(rejects("if x := 1 {\n}"), "expected boolean expression in if statement");
        assert_eq!(rejects("defer mu.Unlock"), "expression in defer must be function call");
        assert_eq!(rejects("f() := 1"), "non-name on left side of :=");
        assert_eq!(rejects("switch x {\n\tf()\n}"), "expected 'case' or 'default', found identifier");
        assert_eq!(rejects("for i := 0; i < n {\n}"), "expected ';', found '{'");
        assert_eq!(rejects("goto"), "expected identifier, found '}'");
    }
}
