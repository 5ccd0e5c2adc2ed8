//! Token types for the Go lexer.
//!
//! Defines the [`GoToken`] enum covering Go keywords, operators, punctuation,
//! literals and trivia, plus the [`Token`] struct pairing a kind with its
//! source [`Span`]. Literal values are not stored in the token; they are read
//! back from the source text through the span.

use crate::span::Span;
use serde::{Deserialize, Serialize};

/// A Go token kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum GoToken {
    // === Trivia ===
    /// Spaces, tabs, carriage returns and newlines.
    Whitespace,
    /// `// ...` up to (not including) the newline.
    LineComment,
    /// `/* ... */`
    BlockComment,

    // === Literals ===
    /// An identifier.
    Ident,
    /// An integer literal.
    Int,
    /// A floating-point literal.
    Float,
    /// An imaginary literal.
    Imag,
    /// A rune literal (`'a'`).
    Char,
    /// An interpreted string literal (`"..."`).
    String,
    /// A raw string literal (`` `...` ``).
    RawString,

    // === Keywords ===
    /// `break`
    Break,
    /// `case`
    Case,
    /// `chan`
    Chan,
    /// `const`
    Const,
    /// `continue`
    Continue,
    /// `default`
    Default,
    /// `defer`
    Defer,
    /// `else`
    Else,
    /// `fallthrough`
    Fallthrough,
    /// `for`
    For,
    /// `func`
    Func,
    /// `go`
    Go,
    /// `goto`
    Goto,
    /// `if`
    If,
    /// `import`
    Import,
    /// `interface`
    Interface,
    /// `map`
    Map,
    /// `package`
    Package,
    /// `range`
    Range,
    /// `return`
    Return,
    /// `select`
    Select,
    /// `struct`
    Struct,
    /// `switch`
    Switch,
    /// `type`
    Type,
    /// `var`
    Var,

    // === Operators ===
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Quo,
    /// `%`
    Rem,
    /// `&`
    And,
    /// `|`
    Or,
    /// `^`
    Xor,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `&^`
    AndNot,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    QuoAssign,
    /// `%=`
    RemAssign,
    /// `&=`
    AndAssign,
    /// `|=`
    OrAssign,
    /// `^=`
    XorAssign,
    /// `<<=`
    ShlAssign,
    /// `>>=`
    ShrAssign,
    /// `&^=`
    AndNotAssign,
    /// `&&`
    LAnd,
    /// `||`
    LOr,
    /// `<-`
    Arrow,
    /// `++`
    Inc,
    /// `--`
    Dec,
    /// `==`
    Eql,
    /// `<`
    Lss,
    /// `>`
    Gtr,
    /// `=`
    Assign,
    /// `!`
    Not,
    /// `~`
    Tilde,
    /// `!=`
    Neq,
    /// `<=`
    Leq,
    /// `>=`
    Geq,
    /// `:=`
    Define,
    /// `...`
    Ellipsis,

    // === Punctuation ===
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBrack,
    /// `]`
    RBrack,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `.`
    Period,
    /// `;` (explicit, or inserted at a newline)
    Semicolon,
    /// `:`
    Colon,

    /// End of input.
    Eof,
}

impl GoToken {
    /// Returns `true` for whitespace and comments.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            GoToken::Whitespace | GoToken::LineComment | GoToken::BlockComment
        )
    }

    /// Returns `true` for reserved words.
    pub fn is_keyword(self) -> bool {
        use GoToken::*;
        matches!(
            self,
            Break
                | Case
                | Chan
                | Const
                | Continue
                | Default
                | Defer
                | Else
                | Fallthrough
                | For
                | Func
                | Go
                | Goto
                | If
                | Import
                | Interface
                | Map
                | Package
                | Range
                | Return
                | Select
                | Struct
                | Switch
                | Type
                | Var
        )
    }

    /// Returns `true` if a newline after this token ends the statement.
    pub fn ends_statement(self) -> bool {
        use GoToken::*;
        matches!(
            self,
            Ident
                | Int
                | Float
                | Imag
                | Char
                | String
                | RawString
                | Break
                | Continue
                | Fallthrough
                | Return
                | Inc
                | Dec
                | RParen
                | RBrack
                | RBrace
        )
    }

    /// A short human-readable description used in error messages.
    pub fn describe(self) -> &'static str {
        use GoToken::*;
        match self {
            Whitespace => "whitespace",
            LineComment | BlockComment => "comment",
            Ident => "identifier",
            Int | Float | Imag | Char | String | RawString => "literal",
            LParen => "'('",
            RParen => "')'",
            LBrack => "'['",
            RBrack => "']'",
            LBrace => "'{'",
            RBrace => "'}'",
            Comma => "','",
            Period => "'.'",
            Semicolon => "';'",
            Colon => "':'",
            Eof => "EOF",
            kind if kind.is_keyword() => "keyword",
            _ => "operator",
        }
    }
}

/// Operators and punctuation, longest spellings first so a prefix scan
/// picks the maximal munch.
pub(crate) const OPERATORS: &[(&str, GoToken)] = &[
    ("...", GoToken::Ellipsis),
    ("<<=", GoToken::ShlAssign),
    (">>=", GoToken::ShrAssign),
    ("&^=", GoToken::AndNotAssign),
    ("&^", GoToken::AndNot),
    ("&&", GoToken::LAnd),
    ("||", GoToken::LOr),
    ("<-", GoToken::Arrow),
    ("++", GoToken::Inc),
    ("--", GoToken::Dec),
    ("==", GoToken::Eql),
    ("!=", GoToken::Neq),
    ("<=", GoToken::Leq),
    (">=", GoToken::Geq),
    (":=", GoToken::Define),
    ("<<", GoToken::Shl),
    (">>", GoToken::Shr),
    ("+=", GoToken::AddAssign),
    ("-=", GoToken::SubAssign),
    ("*=", GoToken::MulAssign),
    ("/=", GoToken::QuoAssign),
    ("%=", GoToken::RemAssign),
    ("&=", GoToken::AndAssign),
    ("|=", GoToken::OrAssign),
    ("^=", GoToken::XorAssign),
    ("+", GoToken::Add),
    ("-", GoToken::Sub),
    ("*", GoToken::Mul),
    ("/", GoToken::Quo),
    ("%", GoToken::Rem),
    ("&", GoToken::And),
    ("|", GoToken::Or),
    ("^", GoToken::Xor),
    ("<", GoToken::Lss),
    (">", GoToken::Gtr),
    ("=", GoToken::Assign),
    ("!", GoToken::Not),
    ("~", GoToken::Tilde),
    ("(", GoToken::LParen),
    (")", GoToken::RParen),
    ("[", GoToken::LBrack),
    ("]", GoToken::RBrack),
    ("{", GoToken::LBrace),
    ("}", GoToken::RBrace),
    (",", GoToken::Comma),
    (".", GoToken::Period),
    (";", GoToken::Semicolon),
    (":", GoToken::Colon),
];

/// Looks up a keyword by its spelling.
pub fn lookup_keyword(text: &str) -> Option<GoToken> {
    use GoToken::*;
    let kw = match text {
        "break" => Break,
        "case" => Case,
        "chan" => Chan,
        "const" => Const,
        "continue" => Continue,
        "default" => Default,
        "defer" => Defer,
        "else" => Else,
        "fallthrough" => Fallthrough,
        "for" => For,
        "func" => Func,
        "go" => Go,
        "goto" => Goto,
        "if" => If,
        "import" => Import,
        "interface" => Interface,
        "map" => Map,
        "package" => Package,
        "range" => Range,
        "return" => Return,
        "select" => Select,
        "struct" => Struct,
        "switch" => Switch,
        "type" => Type,
        "var" => Var,
        _ => return None,
    };
    Some(kw)
}

/// A token with its kind and source location.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Token {
    /// The kind of token.
    pub kind: GoToken,
    /// The source span of this token.
    pub span: Span,
}

impl Token {
    /// Returns `true` if this is a semicolon inserted at a newline rather
    /// than written in the source.
    pub fn is_implicit(&self) -> bool {
        self.kind == GoToken::Semicolon && self.span.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup() {
        assert_eq!(lookup_keyword("func"), Some(GoToken::Func));
        assert_eq!(lookup_keyword("package"), Some(GoToken::Package));
        assert_eq!(lookup_keyword("Func"), None);
        assert_eq!(lookup_keyword("context"), None);
    }

    #[test]
    fn every_keyword_is_keyword() {
        for kw in [
            "break", "case", "chan", "const", "continue", "default", "defer", "else",
            "fallthrough", "for", "func", "go", "goto", "if", "import", "interface", "map",
            "package", "range", "return", "select", "struct", "switch", "type", "var",
        ] {
            let kind = lookup_keyword(kw).unwrap();
            assert!(kind.is_keyword(), "{kw} should be a keyword");
        }
    }

    #[test]
    fn operators_are_longest_first() {
        for (i, (text, _)) in OPERATORS.iter().enumerate() {
            for (earlier, _) in &OPERATORS[..i] {
                assert!(
                    !(text.len() > earlier.len() && text.starts_with(*earlier)),
                    "{text} is shadowed by {earlier}"
                );
            }
        }
    }

    #[test]
    fn statement_enders() {
        assert!(GoToken::Ident.ends_statement());
        assert!(GoToken::RBrace.ends_statement());
        assert!(GoToken::Return.ends_statement());
        assert!(!GoToken::LBrace.ends_statement());
        assert!(!GoToken::Comma.ends_statement());
        assert!(!GoToken::Func.ends_statement());
    }

    #[test]
    fn descriptions() {
        assert_eq!(GoToken::RParen.describe(), "')'");
        assert_eq!(GoToken::Return.describe(), "keyword");
        assert_eq!(GoToken::Define.describe(), "operator");
        assert_eq!(GoToken::Eof.describe(), "EOF");
    }
}
