//! Recursive descent parser for Go source files.
//!
//! The [`GoParser`] consumes the significant token stream (trivia removed,
//! semicolons inserted) and recognizes:
//!
//! ```text
//! SourceFile = "package" ident ";" { ImportDecl ";" } { TopLevelDecl ";" } .
//! ```
//!
//! Top-level declarations are recorded with the spans of their parts.
//! Types, expressions and statements are parsed by the rules in
//! [`types`](crate::types), [`expr`](crate::expr) and [`stmt`](crate::stmt),
//! which check the full grammar without building a tree. The first error is
//! returned.

use crate::ast::{Decl, FuncDecl, GenDecl, GenKeyword, Ident};
use crate::error::SyntaxError;
use crate::source::SourceFile;
use crate::span::Span;
use crate::token::{GoToken, Token};

/// The declarations recognized in one file.
pub struct FileSyntax {
    /// The package clause name.
    pub package: Ident,
    /// Import declarations.
    pub imports: Vec<GenDecl>,
    /// Other top-level declarations.
    pub decls: Vec<Decl>,
}

/// A recursive descent parser over significant Go tokens.
pub struct GoParser<'src> {
    file: &'src SourceFile,
    tokens: Vec<Token>,
    pos: usize,
    /// End offset of the last consumed token.
    prev_end: u32,
    /// Set inside `if`, `for` and `switch` headers, where `T {` opens the
    /// block rather than a composite literal.
    pub(crate) no_lit: bool,
}

impl<'src> GoParser<'src> {
    /// Creates a parser. `tokens` must end with [`GoToken::Eof`].
    pub fn new(file: &'src SourceFile, tokens: Vec<Token>) -> Self {
        Self {
            file,
            tokens,
            pos: 0,
            prev_end: 0,
            no_lit: false,
        }
    }

    // ========================================================================
    // Primitive operations
    // ========================================================================

    pub(crate) fn current(&self) -> GoToken {
        self.tokens[self.pos].kind
    }

    fn current_token(&self) -> Token {
        self.tokens[self.pos]
    }

    pub(crate) fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    /// The kind of the token `n` positions ahead.
    pub(crate) fn peek(&self, n: usize) -> GoToken {
        self.tokens
            .get(self.pos + n)
            .map_or(GoToken::Eof, |t| t.kind)
    }

    pub(crate) fn at(&self, kind: GoToken) -> bool {
        self.current() == kind
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.at(GoToken::Eof)
    }

    pub(crate) fn advance(&mut self) {
        if !self.at_eof() {
            self.prev_end = self.tokens[self.pos].span.end;
            self.pos += 1;
        }
    }

    /// Consumes the current token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: GoToken) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// End offset of the last consumed token.
    pub(crate) fn prev_end(&self) -> u32 {
        self.prev_end
    }

    pub(crate) fn error_at(&self, offset: u32, msg: impl Into<String>) -> SyntaxError {
        self.file.error_at(offset, msg)
    }

    pub(crate) fn expected(&self, what: &str) -> SyntaxError {
        let tok = self.current_token();
        let found = if tok.is_implicit() {
            "newline"
        } else {
            tok.kind.describe()
        };
        self.error_at(tok.span.start, format!("expected {what}, found {found}"))
    }

    pub(crate) fn expect(&mut self, kind: GoToken, what: &str) -> Result<Span, SyntaxError> {
        if self.at(kind) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.expected(what))
        }
    }

    pub(crate) fn expect_ident(&mut self) -> Result<Ident, SyntaxError> {
        let span = self.expect(GoToken::Ident, "identifier")?;
        Ok(Ident {
            name: self.file.snippet(span).to_string(),
            span,
        })
    }

    /// A declaration ends with `;`, which may be implicit at end of file.
    fn expect_semi(&mut self) -> Result<(), SyntaxError> {
        match self.current() {
            GoToken::Semicolon => {
                self.advance();
                Ok(())
            }
            GoToken::Eof => Ok(()),
            _ => Err(self.expected("';'")),
        }
    }

    /// Runs `rule` with composite literals allowed again, as they are inside
    /// any bracketed construct.
    pub(crate) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        let saved = std::mem::replace(&mut self.no_lit, false);
        let result = rule(self);
        self.no_lit = saved;
        result
    }

    /// Parses `open { item sep } close`, allowing a trailing separator.
    pub(crate) fn parse_list(
        &mut self,
        open: GoToken,
        sep: GoToken,
        close: GoToken,
        mut item: impl FnMut(&mut Self) -> Result<(), SyntaxError>,
    ) -> Result<Span, SyntaxError> {
        let start = self.expect(open, open.describe())?.start;
        self.nested(|p| {
            while !p.at(close) {
                item(p)?;
                if !p.eat(sep) {
                    break;
                }
            }
            Ok(())
        })?;
        let end = self.expect(close, close.describe())?.end;
        Ok(Span::new(start, end))
    }

    // ========================================================================
    // Top-level rules
    // ========================================================================

    /// Parses a complete source file.
    pub fn parse_source_file(&mut self) -> Result<FileSyntax, SyntaxError> {
        self.expect(GoToken::Package, "'package'")?;
        let package = self.expect_ident()?;
        self.expect_semi()?;

        let mut imports = Vec::new();
        while self.at(GoToken::Import) {
            imports.push(self.parse_gen_decl()?);
            self.expect_semi()?;
        }

        let mut decls = Vec::new();
        while !self.at_eof() {
            let decl = match self.current() {
                GoToken::Func => Decl::Func(self.parse_func_decl()?),
                GoToken::Const | GoToken::Var | GoToken::Type => Decl::Gen(self.parse_gen_decl()?),
                GoToken::Import => {
                    return Err(self.error_at(
                        self.current_span().start,
                        "imports must appear before other declarations",
                    ))
                }
                _ => return Err(self.expected("declaration")),
            };
            self.expect_semi()?;
            decls.push(decl);
        }

        Ok(FileSyntax {
            package,
            imports,
            decls,
        })
    }

    /// Parses an `import`, `const`, `var` or `type` declaration, single or
    /// grouped, up to but excluding its terminating `;`.
    pub(crate) fn parse_gen_decl(&mut self) -> Result<GenDecl, SyntaxError> {
        let keyword = match self.current() {
            GoToken::Import => GenKeyword::Import,
            GoToken::Const => GenKeyword::Const,
            GoToken::Var => GenKeyword::Var,
            GoToken::Type => GenKeyword::Type,
            _ => return Err(self.expected("declaration")),
        };
        let start = self.current_span().start;
        self.advance();

        if self.at(GoToken::LParen) {
            self.parse_list(GoToken::LParen, GoToken::Semicolon, GoToken::RParen, |p| {
                p.parse_spec(keyword)
            })?;
        } else {
            self.parse_spec(keyword)?;
        }

        Ok(GenDecl {
            keyword,
            span: Span::new(start, self.prev_end),
        })
    }

    fn parse_spec(&mut self, keyword: GenKeyword) -> Result<(), SyntaxError> {
        match keyword {
            GenKeyword::Import => self.parse_import_spec(),
            GenKeyword::Const => self.parse_value_spec(false),
            GenKeyword::Var => self.parse_value_spec(true),
            GenKeyword::Type => self.parse_type_spec(),
        }
    }

    /// `ImportSpec = [ "." | PackageName ] ImportPath .`
    fn parse_import_spec(&mut self) -> Result<(), SyntaxError> {
        if !self.eat(GoToken::Period) {
            self.eat(GoToken::Ident);
        }
        self.expect(GoToken::String, "import path")?;
        Ok(())
    }

    /// `IdentifierList [ Type ] [ "=" ExpressionList ]`
    ///
    /// A variable needs a type or initializer. A constant inside a group may
    /// have neither, repeating the previous line of the group.
    fn parse_value_spec(&mut self, is_var: bool) -> Result<(), SyntaxError> {
        self.parse_ident_list()?;
        let typed = !matches!(
            self.current(),
            GoToken::Assign | GoToken::Semicolon | GoToken::RParen | GoToken::Eof
        );
        if typed {
            self.parse_type()?;
        }
        if self.eat(GoToken::Assign) {
            self.parse_expr_list()?;
        } else if is_var && !typed {
            return Err(self.expected("type"));
        }
        Ok(())
    }

    /// `TypeSpec = identifier [ TypeParameters ] [ "=" ] Type .`
    fn parse_type_spec(&mut self) -> Result<(), SyntaxError> {
        self.expect_ident()?;
        if self.at(GoToken::LBrack) && self.starts_type_params() {
            self.parse_type_params()?;
        }
        self.eat(GoToken::Assign);
        self.parse_type()
    }

    /// After a type name, decides whether `[` opens type parameters rather
    /// than an array length: `type List[T any]` against `type Buf [N]byte`.
    fn starts_type_params(&self) -> bool {
        self.peek(1) == GoToken::Ident
            && matches!(
                self.peek(2),
                GoToken::Ident
                    | GoToken::Comma
                    | GoToken::Tilde
                    | GoToken::LBrack
                    | GoToken::Interface
                    | GoToken::Func
                    | GoToken::Map
                    | GoToken::Chan
                    | GoToken::Struct
                    | GoToken::Arrow
            )
    }

    /// `IdentifierList = identifier { "," identifier } .`
    pub(crate) fn parse_ident_list(&mut self) -> Result<(), SyntaxError> {
        self.expect_ident()?;
        while self.eat(GoToken::Comma) {
            self.expect_ident()?;
        }
        Ok(())
    }

    /// Parses a `func` declaration.
    fn parse_func_decl(&mut self) -> Result<FuncDecl, SyntaxError> {
        let start = self.current_span();
        self.advance();

        let receiver = if self.at(GoToken::LParen) {
            Some(self.parse_params()?)
        } else {
            None
        };
        let name = self.expect_ident()?;
        let type_params = if self.at(GoToken::LBrack) {
            Some(self.parse_type_params()?)
        } else {
            None
        };
        if !self.at(GoToken::LParen) {
            return Err(self.expected("'('"));
        }
        let params = self.parse_params()?;
        let result = self.parse_result()?;
        let body = if self.at(GoToken::LBrace) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(FuncDecl {
            receiver,
            name,
            type_params,
            params,
            result,
            body,
            span: Span::new(start.start, self.prev_end),
        })
    }
}
