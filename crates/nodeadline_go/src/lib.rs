//! Hand-rolled lexer, parser and printer for Go source files.
//!
//! This crate checks Go syntax and records enough structure to locate,
//! rename and re-emit top-level declarations without disturbing anything
//! else in the file. The main entry
//! point is [`parse_file`], which returns a [`GoFile`].
//!
//! # Architecture
//!
//! - **Lexer** ([`lexer`]): Converts source text to a lossless token stream
//!   with trivia, and derives the significant stream with Go's automatic
//!   semicolon insertion.
//! - **Parser** ([`parser`]): Recursive descent over the package clause,
//!   imports and top-level declarations, with the type, expression and
//!   statement rules in `types`, `expr` and `stmt`. Only top-level
//!   declarations are kept in the tree.
//! - **Printer** ([`printer`]): Splices renamed identifiers back into the
//!   original text, and a whitespace-normalizing formatter.

#![warn(missing_docs)]

pub mod ast;
pub mod error;
mod expr;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod source;
pub mod span;
mod stmt;
pub mod token;
mod types;

pub use ast::{Decl, FuncDecl, GenDecl, GenKeyword, GoFile, Ident};
pub use error::SyntaxError;
pub use printer::{format_source, print_file};
pub use source::SourceFile;
pub use span::Span;
pub use token::{GoToken, Token};

use std::path::PathBuf;

/// Parses a Go source file.
///
/// Lexes the whole file, then parses it. The first lexical or syntax error
/// aborts the parse.
pub fn parse_file(file: SourceFile) -> Result<GoFile, SyntaxError> {
    let tokens = lexer::lex(&file)?;
    let significant = lexer::significant_tokens(&tokens, &file.content);
    let syntax = parser::GoParser::new(&file, significant).parse_source_file()?;
    Ok(GoFile {
        source: file,
        tokens,
        package: syntax.package,
        imports: syntax.imports,
        decls: syntax.decls,
    })
}

/// Parses in-memory Go source under a synthetic path.
pub fn parse_source(path: impl Into<PathBuf>, content: String) -> Result<GoFile, SyntaxError> {
    parse_file(SourceFile::new(path, content))
}
