//! Expression parser for Go.
//!
//! Binary operators use precedence climbing with Go's five levels (lowest to
//! highest):
//!
//! 1. `||`
//! 2. `&&`
//! 3. `== != < <= > >=`
//! 4. `+ - | ^`
//! 5. `* / % << >> & &^`
//!
//! Types are accepted wherever an operand is, as in conversions, composite
//! literals and the arguments of `make` and `new`.

use crate::error::SyntaxError;
use crate::parser::GoParser;
use crate::token::GoToken;

/// What a parsed expression can be followed by.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Operand {
    /// An identifier, selector or instantiation that may name a type.
    Name,
    /// An explicit array, slice, map or struct type.
    LiteralType,
    /// A function call.
    Call,
    /// Any other expression.
    Value,
}

fn binary_precedence(kind: GoToken) -> Option<u8> {
    use GoToken::*;
    let prec = match kind {
        LOr => 1,
        LAnd => 2,
        Eql | Neq | Lss | Leq | Gtr | Geq => 3,
        Add | Sub | Or | Xor => 4,
        Mul | Quo | Rem | Shl | Shr | And | AndNot => 5,
        _ => return None,
    };
    Some(prec)
}

fn is_unary(kind: GoToken) -> bool {
    use GoToken::*;
    matches!(kind, Add | Sub | Not | Xor | Mul | And | Arrow)
}

impl GoParser<'_> {
    /// Parses an expression.
    pub(crate) fn parse_expr(&mut self) -> Result<Operand, SyntaxError> {
        self.parse_binary_expr(1)
    }

    /// `ExpressionList = Expression { "," Expression } .`
    pub(crate) fn parse_expr_list(&mut self) -> Result<Operand, SyntaxError> {
        let first = self.parse_expr()?;
        if !self.at(GoToken::Comma) {
            return Ok(first);
        }
        while self.eat(GoToken::Comma) {
            self.parse_expr()?;
        }
        Ok(Operand::Value)
    }

    fn parse_binary_expr(&mut self, min_prec: u8) -> Result<Operand, SyntaxError> {
        let mut lhs = self.parse_unary_expr()?;
        while let Some(prec) = binary_precedence(self.current()) {
            if prec < min_prec {
                break;
            }
            self.advance();
            self.parse_binary_expr(prec + 1)?;
            lhs = Operand::Value;
        }
        Ok(lhs)
    }

    fn parse_unary_expr(&mut self) -> Result<Operand, SyntaxError> {
        let kind = self.current();
        if kind == GoToken::Arrow && self.peek(1) == GoToken::Chan {
            self.parse_type()?;
            return self.parse_primary_suffixes(Operand::Value);
        }
        if is_unary(kind) {
            self.advance();
            self.parse_unary_expr()?;
            return Ok(Operand::Value);
        }
        let operand = self.parse_operand()?;
        self.parse_primary_suffixes(operand)
    }

    fn parse_operand(&mut self) -> Result<Operand, SyntaxError> {
        match self.current() {
            GoToken::Ident => {
                self.advance();
                Ok(Operand::Name)
            }
            GoToken::Int
            | GoToken::Float
            | GoToken::Imag
            | GoToken::Char
            | GoToken::String
            | GoToken::RawString => {
                self.advance();
                Ok(Operand::Value)
            }
            GoToken::LParen => {
                self.advance();
                self.nested(|p| p.parse_expr())?;
                self.expect(GoToken::RParen, "')'")?;
                Ok(Operand::Value)
            }
            GoToken::Func => {
                self.advance();
                self.parse_signature()?;
                if self.at(GoToken::LBrace) {
                    self.parse_block()?;
                }
                Ok(Operand::Value)
            }
            GoToken::LBrack | GoToken::Map | GoToken::Struct => {
                self.parse_type()?;
                Ok(Operand::LiteralType)
            }
            GoToken::Chan | GoToken::Interface => {
                self.parse_type()?;
                Ok(Operand::Value)
            }
            _ => Err(self.expected("expression")),
        }
    }

    /// Selectors, type assertions, index and slice expressions, calls and
    /// composite literals following an operand.
    fn parse_primary_suffixes(&mut self, mut x: Operand) -> Result<Operand, SyntaxError> {
        loop {
            x = match self.current() {
                GoToken::Period => {
                    self.advance();
                    if self.eat(GoToken::LParen) {
                        if !self.eat(GoToken::Type) {
                            self.nested(|p| p.parse_type())?;
                        }
                        self.expect(GoToken::RParen, "')'")?;
                        Operand::Value
                    } else {
                        self.expect_ident()?;
                        if x == Operand::Name {
                            Operand::Name
                        } else {
                            Operand::Value
                        }
                    }
                }
                GoToken::LBrack => {
                    self.parse_index_or_slice()?;
                    if x == Operand::Name {
                        Operand::Name
                    } else {
                        Operand::Value
                    }
                }
                GoToken::LParen => {
                    self.parse_call_args()?;
                    Operand::Call
                }
                GoToken::LBrace if self.composite_literal_allowed(x) => {
                    self.parse_literal_value()?;
                    Operand::Value
                }
                _ => return Ok(x),
            };
        }
    }

    /// A `{` after a type name is a composite literal, except inside a
    /// statement header where it opens the block.
    fn composite_literal_allowed(&self, x: Operand) -> bool {
        match x {
            Operand::LiteralType => true,
            Operand::Name => !self.no_lit,
            Operand::Call | Operand::Value => false,
        }
    }

    /// `a[i]`, `f[T1, T2]`, `a[lo:hi]` or `a[lo:hi:max]`.
    fn parse_index_or_slice(&mut self) -> Result<(), SyntaxError> {
        self.expect(GoToken::LBrack, "'['")?;
        self.nested(|p| {
            if !p.at(GoToken::Colon) {
                p.parse_expr()?;
                if p.at(GoToken::Comma) {
                    while p.eat(GoToken::Comma) && !p.at(GoToken::RBrack) {
                        p.parse_expr()?;
                    }
                    return Ok(());
                }
            }
            let mut colons = 0;
            while p.at(GoToken::Colon) {
                if colons == 2 {
                    return Err(p.expected("']'"));
                }
                p.advance();
                colons += 1;
                if !matches!(p.current(), GoToken::Colon | GoToken::RBrack) {
                    p.parse_expr()?;
                }
            }
            Ok(())
        })?;
        self.expect(GoToken::RBrack, "']'")?;
        Ok(())
    }

    /// `"(" [ ExpressionList [ "..." ] [ "," ] ] ")"`
    fn parse_call_args(&mut self) -> Result<(), SyntaxError> {
        self.parse_list(GoToken::LParen, GoToken::Comma, GoToken::RParen, |p| {
            p.parse_expr()?;
            p.eat(GoToken::Ellipsis);
            Ok(())
        })?;
        Ok(())
    }

    /// `"{" [ Element { "," Element } [ "," ] ] "}"` where an element is
    /// `[ Key ":" ] Value` and a key or value may itself be a braced literal.
    fn parse_literal_value(&mut self) -> Result<(), SyntaxError> {
        self.parse_list(GoToken::LBrace, GoToken::Comma, GoToken::RBrace, |p| {
            p.parse_element()?;
            if p.eat(GoToken::Colon) {
                p.parse_element()?;
            }
            Ok(())
        })?;
        Ok(())
    }

    fn parse_element(&mut self) -> Result<(), SyntaxError> {
        if self.at(GoToken::LBrace) {
            self.parse_literal_value()
        } else {
            self.parse_expr().map(drop)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_source;

    fn accepts(expr: &str) {
        let src = format!("package p\n\nvar x = {expr}\n");
        if let Err(e) = parse_source("e.go", src) {
            panic!("rejected {expr:?}: {e}");
        }
    }

    fn rejects(expr: &str) -> String {
        let src = format!("package p\n\nvar x = {expr}\n");
        parse_source("e.go", src).unwrap_err().message
    }

    #[test]
    fn operators_and_operands() {
        accepts("a + b*c - d<<2 &^ mask");
        accepts("!ok && (n >= 0 || -n < limit)");
        accepts("<-ch");
        accepts("*p + &v");
        accepts("1.5e3 + 2i + 'x'");
        accepts("`raw` + \"str\"");
    }

    #[test]
    fn primary_expressions() {
        accepts("time.Now().Add(24 * time.Hour)");
        accepts("buf[1:n]");
        accepts("buf[:]");
        accepts("buf[lo:hi:max]");
        accepts("v.(interface{ Done() <-chan struct{} })");
        accepts("f(args...)");
        accepts("Map[int, string](xs, f)");
        accepts("make(chan error, 1)");
        accepts("make(<-chan int)");
        accepts("new(struct{ n int })");
        accepts("[]byte(s)");
        accepts("(*T)(nil)");
    }

    #[test]
    fn composite_literals() {
        accepts("T{}");
        accepts("&timerCtx{deadline: d}");
        accepts("[]int{1, 2, 3}");
        accepts("[...]string{\"a\", \"b\"}");
        accepts("map[string][]int{\"a\": {1}, \"b\": {2, 3}}");
        accepts("[]struct{ a int }{{1}, {a: 2}}");
        accepts("pkg.Pair[int, string]{k: 1}");
        accepts("T{\n\ta: 1,\n\tb: 2,\n}");
    }

    #[test]
    fn function_literals() {
        accepts("func() {}");
        accepts("func(x int) (int, error) {\n\treturn x, nil\n}(1)");
    }

    #[test]
    fn malformed_expressions() {
        assert_eq!(rejects("a +"), "expected expression, found EOF");
        assert_eq!(rejects("f(a b)"), "expected ')', found identifier");
        assert_eq!(rejects("buf[1:2:3:4]"), "expected ']', found ':'");
        assert_eq!(rejects("T{\n\ta: 1\n}"), "expected '}', found newline");
        assert_eq!(rejects("x.(type"), "expected ')', found EOF");
        assert_eq!(rejects("a ! b"), "expected ';', found operator");
    }
}
