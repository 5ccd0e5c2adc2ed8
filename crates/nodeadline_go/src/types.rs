//! Type grammar: named and composite types, signatures, parameter lists and
//! type parameters.

use crate::error::SyntaxError;
use crate::parser::GoParser;
use crate::span::Span;
use crate::token::GoToken;

/// Returns `true` if `kind` can begin a type.
pub(crate) fn starts_type(kind: GoToken) -> bool {
    matches!(
        kind,
        GoToken::Ident
            | GoToken::LParen
            | GoToken::Mul
            | GoToken::LBrack
            | GoToken::Map
            | GoToken::Chan
            | GoToken::Func
            | GoToken::Struct
            | GoToken::Interface
            | GoToken::Arrow
    )
}

impl GoParser<'_> {
    /// Parses a type.
    pub(crate) fn parse_type(&mut self) -> Result<(), SyntaxError> {
        match self.current() {
            GoToken::Ident => self.parse_type_name(),
            GoToken::LParen => {
                self.advance();
                self.nested(|p| p.parse_type())?;
                self.expect(GoToken::RParen, "')'")?;
                Ok(())
            }
            GoToken::Mul => {
                self.advance();
                self.parse_type()
            }
            GoToken::LBrack => self.parse_array_or_slice_type(),
            GoToken::Map => self.parse_map_type(),
            GoToken::Chan => {
                self.advance();
                self.eat(GoToken::Arrow);
                self.parse_type()
            }
            GoToken::Arrow => {
                self.advance();
                self.expect(GoToken::Chan, "'chan'")?;
                self.parse_type()
            }
            GoToken::Func => {
                self.advance();
                self.parse_signature()
            }
            GoToken::Struct => self.parse_struct_type(),
            GoToken::Interface => self.parse_interface_type(),
            _ => Err(self.expected("type")),
        }
    }

    /// `TypeName [ TypeArgs ]` where `TypeName = identifier [ "." identifier ]`.
    fn parse_type_name(&mut self) -> Result<(), SyntaxError> {
        self.expect_ident()?;
        if self.eat(GoToken::Period) {
            self.expect_ident()?;
        }
        if self.at(GoToken::LBrack) && self.peek(1) != GoToken::RBrack {
            self.parse_type_args()?;
        }
        Ok(())
    }

    /// `[ T1, T2 ]` after a generic type or function name.
    pub(crate) fn parse_type_args(&mut self) -> Result<(), SyntaxError> {
        self.parse_list(GoToken::LBrack, GoToken::Comma, GoToken::RBrack, |p| {
            p.parse_expr().map(drop)
        })?;
        Ok(())
    }

    /// `"[" "]" Type`, `"[" "..." "]" Type` or `"[" Length "]" Type`.
    pub(crate) fn parse_array_or_slice_type(&mut self) -> Result<(), SyntaxError> {
        self.expect(GoToken::LBrack, "'['")?;
        if !self.eat(GoToken::RBrack) {
            if !self.eat(GoToken::Ellipsis) {
                self.nested(|p| p.parse_expr())?;
            }
            self.expect(GoToken::RBrack, "']'")?;
        }
        self.parse_type()
    }

    /// `"map" "[" KeyType "]" ElementType`
    fn parse_map_type(&mut self) -> Result<(), SyntaxError> {
        self.expect(GoToken::Map, "'map'")?;
        self.expect(GoToken::LBrack, "'['")?;
        self.nested(|p| p.parse_type())?;
        self.expect(GoToken::RBrack, "']'")?;
        self.parse_type()
    }

    /// `Signature = Parameters [ Result ] .`
    pub(crate) fn parse_signature(&mut self) -> Result<(), SyntaxError> {
        self.parse_params()?;
        self.parse_result()?;
        Ok(())
    }

    /// Parses a parenthesized parameter list and returns its span.
    ///
    /// Each entry is a type, optionally preceded by a name. Grouped names
    /// such as `(a, b int)` read as a list of one-word entries followed by a
    /// named one, which is enough to check the syntax.
    pub(crate) fn parse_params(&mut self) -> Result<Span, SyntaxError> {
        self.parse_list(GoToken::LParen, GoToken::Comma, GoToken::RParen, |p| {
            if p.eat(GoToken::Ellipsis) {
                return p.parse_type();
            }
            p.parse_type()?;
            if p.eat(GoToken::Ellipsis) || starts_type(p.current()) {
                p.parse_type()?;
            }
            Ok(())
        })
    }

    /// Parses an optional result: a parameter list or a single type.
    pub(crate) fn parse_result(&mut self) -> Result<Option<Span>, SyntaxError> {
        let start = self.current_span().start;
        match self.current() {
            GoToken::LParen => {
                self.parse_params()?;
            }
            kind if starts_type(kind) => self.parse_type()?,
            _ => return Ok(None),
        }
        Ok(Some(Span::new(start, self.prev_end())))
    }

    /// `"[" TypeParamDecl { "," TypeParamDecl } [ "," ] "]"` where each
    /// declaration is an identifier list followed by a constraint.
    pub(crate) fn parse_type_params(&mut self) -> Result<Span, SyntaxError> {
        self.parse_list(GoToken::LBrack, GoToken::Comma, GoToken::RBrack, |p| {
            p.expect_ident()?;
            if p.at(GoToken::Comma) && p.peek(1) == GoToken::Ident {
                // More names sharing the next constraint.
                return Ok(());
            }
            p.parse_type_union()
        })
    }

    /// `[ "~" ] Type { "|" [ "~" ] Type }`
    fn parse_type_union(&mut self) -> Result<(), SyntaxError> {
        loop {
            self.eat(GoToken::Tilde);
            self.parse_type()?;
            if !self.eat(GoToken::Or) {
                return Ok(());
            }
        }
    }

    /// `"struct" "{" { FieldDecl ";" } "}"`
    fn parse_struct_type(&mut self) -> Result<(), SyntaxError> {
        self.expect(GoToken::Struct, "'struct'")?;
        self.parse_list(GoToken::LBrace, GoToken::Semicolon, GoToken::RBrace, |p| {
            p.parse_field_decl()
        })?;
        Ok(())
    }

    /// `(IdentifierList Type | EmbeddedField) [ Tag ]`
    fn parse_field_decl(&mut self) -> Result<(), SyntaxError> {
        if self.eat(GoToken::Mul) {
            self.parse_type_name()?;
        } else {
            self.expect_ident()?;
            match self.current() {
                GoToken::Comma => {
                    while self.eat(GoToken::Comma) {
                        self.expect_ident()?;
                    }
                    self.parse_type()?;
                }
                GoToken::Period => {
                    self.advance();
                    self.expect_ident()?;
                    if self.at(GoToken::LBrack) {
                        self.parse_type_args()?;
                    }
                }
                GoToken::LBrack if self.peek(1) != GoToken::RBrack => {
                    // `a [N]T` declares an array field, `T[int]` embeds a
                    // generic type.
                    self.parse_type_args()?;
                    if starts_type(self.current()) {
                        self.parse_type()?;
                    }
                }
                kind if starts_type(kind) => self.parse_type()?,
                _ => {}
            }
        }
        if matches!(self.current(), GoToken::String | GoToken::RawString) {
            self.advance();
        }
        Ok(())
    }

    /// `"interface" "{" { ( MethodSpec | TypeElem ) ";" } "}"`
    fn parse_interface_type(&mut self) -> Result<(), SyntaxError> {
        self.expect(GoToken::Interface, "'interface'")?;
        self.parse_list(GoToken::LBrace, GoToken::Semicolon, GoToken::RBrace, |p| {
            if p.at(GoToken::Ident) && p.peek(1) == GoToken::LParen {
                p.advance();
                p.parse_signature()
            } else {
                p.parse_type_union()
            }
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_source;

    fn accepts(decl: &str) {
        let src = format!("package p\n\n{decl}\n");
        if let Err(e) = parse_source("t.go", src) {
            panic!("rejected {decl:?}: {e}");
        }
    }

    fn rejects(decl: &str) -> String {
        let src = format!("package p\n\n{decl}\n");
        parse_source("t.go", src).unwrap_err().message
    }

    #[test]
    fn named_and_composite_types() {
        accepts("var a *time.Timer");
        accepts("var b [4]byte");
        accepts("var c [N * 2]byte");
        accepts("var d map[string][]chan<- error");
        accepts("var e <-chan struct{}");
        accepts("var f func(context.Context, ...any) (int, error)");
        accepts("var g List[int]");
        accepts("type Buf [64]byte");
    }

    #[test]
    fn struct_types() {
        accepts("type T struct {\n\tmu sync.Mutex\n\ta, b int `json:\"a\"`\n\t*Embedded\n\tio.Reader\n\tbuf [8]byte\n\tGeneric[int]\n}");
        accepts("type E struct{}");
    }

    #[test]
    fn interface_types() {
        accepts("type I interface {\n\tDeadline() (deadline time.Time, ok bool)\n\tDone() <-chan struct{}\n\tfmt.Stringer\n}");
        accepts("type Number interface {\n\t~int | ~int64 | float64\n}");
    }

    #[test]
    fn generic_declarations() {
        accepts("type List[T any] struct {\n\tnext *List[T]\n\tval  T\n}");
        accepts("type Pair[K comparable, V any] struct{ k K; v V }");
        accepts("func Keys[M ~map[K]V, K comparable, V any](m M) []K {\n\treturn nil\n}");
        accepts("func (l *List[T]) Push(v T) {}");
    }

    #[test]
    fn malformed_types() {
        assert_eq!(rejects("var x chan"), "expected type, found EOF");
        assert_eq!(rejects("var x <-int"), "expected 'chan', found identifier");
        assert_eq!(rejects("type I interface { M( }"), "expected type, found '}'");
        assert_eq!(rejects("func f(a int,, b int) {}"), "expected type, found ','");
        assert_eq!(rejects("var m map[string int"), "expected ']', found identifier");
    }
}
