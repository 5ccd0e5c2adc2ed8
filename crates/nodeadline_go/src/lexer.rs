//! Lossless lexical analyzer for Go source text.
//!
//! Every byte of the input belongs to exactly one [`Token`]: whitespace and
//! comments are kept as trivia so a file can be printed back byte-for-byte.
//! The returned vector always ends with a [`GoToken::Eof`] token. The first
//! lexical error aborts the scan.

use crate::error::SyntaxError;
use crate::source::SourceFile;
use crate::span::Span;
use crate::token::{lookup_keyword, GoToken, Token, OPERATORS};

/// Lexes a source file into a lossless token vector.
pub fn lex(file: &SourceFile) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = Lexer {
        file,
        source: file.content.as_bytes(),
        pos: 0,
    };
    lexer.lex_all()
}

/// Returns the significant tokens of a lossless stream, with semicolons
/// inserted at line ends the way the Go grammar requires.
///
/// Trivia is dropped. An inserted semicolon has an empty span at the
/// position of the newline (or end of file) that produced it.
pub fn significant_tokens(tokens: &[Token], source: &str) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut needs_semi = false;
    for tok in tokens {
        match tok.kind {
            GoToken::Whitespace | GoToken::BlockComment | GoToken::LineComment => {
                if !needs_semi {
                    continue;
                }
                let text = &source[tok.span.range()];
                if let Some(nl) = text.find('\n') {
                    out.push(Token {
                        kind: GoToken::Semicolon,
                        span: Span::empty(tok.span.start + nl as u32),
                    });
                    needs_semi = false;
                }
            }
            GoToken::Eof => {
                if needs_semi {
                    out.push(Token {
                        kind: GoToken::Semicolon,
                        span: Span::empty(tok.span.start),
                    });
                }
                out.push(*tok);
            }
            kind => {
                needs_semi = kind.ends_statement();
                out.push(*tok);
            }
        }
    }
    out
}

struct Lexer<'a> {
    file: &'a SourceFile,
    source: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn lex_all(&mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();
        while self.pos < self.source.len() {
            tokens.push(self.next_token()?);
        }
        tokens.push(Token {
            kind: GoToken::Eof,
            span: Span::empty(self.pos as u32),
        });
        Ok(tokens)
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.source.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn current_char(&self) -> Option<char> {
        self.file.content[self.pos..].chars().next()
    }

    /// Moves past the character at the current position.
    fn bump_char(&mut self) {
        self.pos += 1;
        while self.pos < self.source.len() && !self.file.content.is_char_boundary(self.pos) {
            self.pos += 1;
        }
    }

    fn token(&self, kind: GoToken, start: usize) -> Token {
        Token {
            kind,
            span: Span::new(start as u32, self.pos as u32),
        }
    }

    fn error(&self, offset: usize, msg: &str) -> SyntaxError {
        self.file.error_at(offset as u32, msg)
    }

    fn next_token(&mut self) -> Result<Token, SyntaxError> {
        let start = self.pos;
        let b = self.peek();

        if matches!(b, b' ' | b'\t' | b'\r' | b'\n') || self.at_bom() {
            self.skip_whitespace();
            return Ok(self.token(GoToken::Whitespace, start));
        }
        if b == b'/' && self.peek_at(1) == b'/' {
            while !self.at_end() && self.peek() != b'\n' {
                self.pos += 1;
            }
            return Ok(self.token(GoToken::LineComment, start));
        }
        if b == b'/' && self.peek_at(1) == b'*' {
            return self.lex_block_comment(start);
        }
        if b.is_ascii_digit() || (b == b'.' && self.peek_at(1).is_ascii_digit()) {
            return Ok(self.lex_number(start));
        }
        match b {
            b'"' => return self.lex_string(start),
            b'`' => return self.lex_raw_string(start),
            b'\'' => return self.lex_rune(start),
            _ => {}
        }
        if let Some(ch) = self.current_char() {
            if is_ident_start(ch) {
                return Ok(self.lex_identifier_or_keyword(start));
            }
        }
        self.lex_operator(start)
    }

    fn at_bom(&self) -> bool {
        self.pos == 0 && self.source.starts_with("\u{feff}".as_bytes())
    }

    fn skip_whitespace(&mut self) {
        if self.at_bom() {
            self.pos += "\u{feff}".len();
        }
        while matches!(self.peek(), b' ' | b'\t' | b'\r' | b'\n') && !self.at_end() {
            self.pos += 1;
        }
    }

    fn lex_block_comment(&mut self, start: usize) -> Result<Token, SyntaxError> {
        self.pos += 2;
        loop {
            if self.at_end() {
                return Err(self.error(start, "comment not terminated"));
            }
            if self.peek() == b'*' && self.peek_at(1) == b'/' {
                self.pos += 2;
                return Ok(self.token(GoToken::BlockComment, start));
            }
            self.pos += 1;
        }
    }

    fn lex_identifier_or_keyword(&mut self, start: usize) -> Token {
        while let Some(ch) = self.current_char() {
            if is_ident_char(ch) {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
        let text = &self.file.content[start..self.pos];
        let kind = lookup_keyword(text).unwrap_or(GoToken::Ident);
        self.token(kind, start)
    }

    fn lex_number(&mut self, start: usize) -> Token {
        let hex = self.peek() == b'0' && matches!(self.peek_at(1), b'x' | b'X');
        let exponent: &[u8] = if hex { b"pP" } else { b"eE" };
        let mut is_float = false;
        loop {
            let ch = self.peek();
            if ch.is_ascii_alphanumeric() || ch == b'_' {
                self.pos += 1;
                if exponent.contains(&ch) {
                    is_float = true;
                    if matches!(self.peek(), b'+' | b'-') {
                        self.pos += 1;
                    }
                }
            } else if ch == b'.' {
                is_float = true;
                self.pos += 1;
            } else {
                break;
            }
        }
        let kind = if self.source[self.pos - 1] == b'i' {
            GoToken::Imag
        } else if is_float {
            GoToken::Float
        } else {
            GoToken::Int
        };
        self.token(kind, start)
    }

    fn lex_string(&mut self, start: usize) -> Result<Token, SyntaxError> {
        self.pos += 1;
        loop {
            match self.peek() {
                _ if self.at_end() => {
                    return Err(self.error(start, "string literal not terminated"))
                }
                b'\n' => return Err(self.error(start, "newline in string")),
                b'\\' => {
                    self.pos += 1;
                    self.bump_char();
                }
                b'"' => {
                    self.pos += 1;
                    return Ok(self.token(GoToken::String, start));
                }
                _ => self.bump_char(),
            }
        }
    }

    fn lex_raw_string(&mut self, start: usize) -> Result<Token, SyntaxError> {
        self.pos += 1;
        while !self.at_end() {
            if self.peek() == b'`' {
                self.pos += 1;
                return Ok(self.token(GoToken::RawString, start));
            }
            self.pos += 1;
        }
        Err(self.error(start, "raw string literal not terminated"))
    }

    fn lex_rune(&mut self, start: usize) -> Result<Token, SyntaxError> {
        self.pos += 1;
        let mut chars = 0usize;
        loop {
            match self.peek() {
                _ if self.at_end() => return Err(self.error(start, "rune literal not terminated")),
                b'\n' => return Err(self.error(start, "newline in rune literal")),
                b'\\' => {
                    self.pos += 1;
                    self.bump_char();
                    chars += 1;
                }
                b'\'' => {
                    self.pos += 1;
                    if chars == 0 {
                        return Err(self.error(start, "empty rune literal or unescaped ' in rune literal"));
                    }
                    return Ok(self.token(GoToken::Char, start));
                }
                _ => {
                    self.bump_char();
                    chars += 1;
                }
            }
        }
    }

    fn lex_operator(&mut self, start: usize) -> Result<Token, SyntaxError> {
        let rest = &self.source[self.pos..];
        for (text, kind) in OPERATORS {
            if rest.starts_with(text.as_bytes()) {
                self.pos += text.len();
                return Ok(self.token(*kind, start));
            }
        }
        let ch = self.current_char().unwrap_or('\u{fffd}');
        Err(self.error(start, &format!("invalid character U+{:04X}", ch as u32)))
    }
}

fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_ident_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<GoToken> {
        let file = SourceFile::new("test.go", source.to_string());
        lex(&file)
            .unwrap()
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect()
    }

    fn lex_err(source: &str) -> SyntaxError {
        let file = SourceFile::new("test.go", source.to_string());
        lex(&file).unwrap_err()
    }

    #[test]
    fn lossless_concatenation() {
        let src = "package p // hi\n\n/* block */\nfunc f() { x := `raw\n` }\n";
        let file = SourceFile::new("test.go", src.to_string());
        let tokens = lex(&file).unwrap();
        let rebuilt: String = tokens.iter().map(|t| file.snippet(t.span)).collect();
        assert_eq!(rebuilt, src);
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("func WithDeadlineCause"),
            vec![GoToken::Func, GoToken::Ident, GoToken::Eof]
        );
    }

    #[test]
    fn unicode_identifier() {
        assert_eq!(kinds("héllo"), vec![GoToken::Ident, GoToken::Eof]);
    }

    #[test]
    fn number_forms() {
        assert_eq!(kinds("42"), vec![GoToken::Int, GoToken::Eof]);
        assert_eq!(kinds("0x1F"), vec![GoToken::Int, GoToken::Eof]);
        assert_eq!(kinds("1_000_000"), vec![GoToken::Int, GoToken::Eof]);
        assert_eq!(kinds("3.14"), vec![GoToken::Float, GoToken::Eof]);
        assert_eq!(kinds(".5"), vec![GoToken::Float, GoToken::Eof]);
        assert_eq!(kinds("1e-9"), vec![GoToken::Float, GoToken::Eof]);
        assert_eq!(kinds("0x1p+4"), vec![GoToken::Float, GoToken::Eof]);
        assert_eq!(kinds("2i"), vec![GoToken::Imag, GoToken::Eof]);
    }

    #[test]
    fn hex_e_is_not_an_exponent() {
        assert_eq!(
            kinds("0x1e+3"),
            vec![GoToken::Int, GoToken::Add, GoToken::Int, GoToken::Eof]
        );
    }

    #[test]
    fn maximal_munch_operators() {
        assert_eq!(
            kinds("a &^= b <<= c <- d ..."),
            vec![
                GoToken::Ident,
                GoToken::AndNotAssign,
                GoToken::Ident,
                GoToken::ShlAssign,
                GoToken::Ident,
                GoToken::Arrow,
                GoToken::Ident,
                GoToken::Ellipsis,
                GoToken::Eof
            ]
        );
    }

    #[test]
    fn string_with_escaped_quote() {
        assert_eq!(
            kinds(r#""a\"b" 'x' '\n'"#),
            vec![GoToken::String, GoToken::Char, GoToken::Char, GoToken::Eof]
        );
    }

    #[test]
    fn comment_markers_inside_strings_are_not_comments() {
        assert_eq!(
            kinds(r#""// not a comment" `/* nor this */`"#),
            vec![GoToken::String, GoToken::RawString, GoToken::Eof]
        );
    }

    #[test]
    fn unterminated_string() {
        let err = lex_err("x := \"abc");
        assert!(err.message.contains("not terminated"));
        assert_eq!((err.line, err.col), (1, 6));
    }

    #[test]
    fn newline_in_string() {
        let err = lex_err("x := \"abc\ndef\"");
        assert_eq!(err.message, "newline in string");
    }

    #[test]
    fn unterminated_block_comment() {
        let err = lex_err("package p\n/* never closed");
        assert_eq!(err.message, "comment not terminated");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn unterminated_raw_string() {
        let err = lex_err("x := `abc");
        assert_eq!(err.message, "raw string literal not terminated");
    }

    #[test]
    fn empty_rune() {
        let err = lex_err("x := ''");
        assert!(err.message.starts_with("empty rune literal"));
    }

    #[test]
    fn invalid_character() {
        let err = lex_err("x := 1 @ 2");
        assert_eq!(err.message, "invalid character U+0040");
        assert_eq!(err.col, 8);
    }

    #[test]
    fn semicolon_insertion_after_line_end() {
        let src = "package p\nfunc f() {\n\treturn\n}\n";
        let file = SourceFile::new("test.go", src.to_string());
        let tokens = lex(&file).unwrap();
        let sig: Vec<GoToken> = significant_tokens(&tokens, src)
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            sig,
            vec![
                GoToken::Package,
                GoToken::Ident,
                GoToken::Semicolon,
                GoToken::Func,
                GoToken::Ident,
                GoToken::LParen,
                GoToken::RParen,
                GoToken::LBrace,
                GoToken::Return,
                GoToken::Semicolon,
                GoToken::RBrace,
                GoToken::Semicolon,
                GoToken::Eof,
            ]
        );
    }

    #[test]
    fn no_semicolon_after_operator_at_line_end() {
        let src = "x := a +\n\tb";
        let file = SourceFile::new("test.go", src.to_string());
        let tokens = lex(&file).unwrap();
        let sig = significant_tokens(&tokens, src);
        let semis: Vec<&Token> = sig.iter().filter(|t| t.kind == GoToken::Semicolon).collect();
        assert_eq!(semis.len(), 1, "only the EOF semicolon is expected");
        assert!(semis[0].is_implicit());
    }

    #[test]
    fn line_comment_does_not_swallow_semicolon() {
        let src = "package p // the package\nvar x int";
        let file = SourceFile::new("test.go", src.to_string());
        let tokens = lex(&file).unwrap();
        let sig: Vec<GoToken> = significant_tokens(&tokens, src)
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(sig[2], GoToken::Semicolon);
        assert_eq!(sig[3], GoToken::Var);
    }
}
