//! Top-level syntax tree for a Go source file.
//!
//! Only the declaration structure is modelled: the package clause, import
//! declarations, and each top-level declaration with the spans of its parts.
//! Expression and statement bodies are kept as spans over the original text,
//! which is enough to locate, rename and re-emit declarations losslessly.

use crate::source::SourceFile;
use crate::span::Span;
use crate::token::Token;
use serde::Serialize;
use std::path::Path;

/// An identifier and where it was written.
///
/// `name` may diverge from the source text after a rename; `span` always
/// points at the original spelling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Ident {
    /// The current name.
    pub name: String,
    /// Location of the identifier in the source.
    pub span: Span,
}

/// The keyword introducing a generic declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GenKeyword {
    /// `import`
    Import,
    /// `const`
    Const,
    /// `var`
    Var,
    /// `type`
    Type,
}

/// An `import`, `const`, `var` or `type` declaration (single or grouped).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenDecl {
    /// Which kind of declaration this is.
    pub keyword: GenKeyword,
    /// Span from the keyword to the last token before the terminating `;`.
    pub span: Span,
}

/// A function or method declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FuncDecl {
    /// The parenthesized receiver, for methods.
    pub receiver: Option<Span>,
    /// The function name.
    pub name: Ident,
    /// The bracketed type parameter list, for generic functions.
    pub type_params: Option<Span>,
    /// The parenthesized parameter list.
    pub params: Span,
    /// The result list or type, if any.
    pub result: Option<Span>,
    /// The braced body. Absent for functions implemented outside Go.
    pub body: Option<Span>,
    /// Span from `func` to the end of the declaration.
    pub span: Span,
}

impl FuncDecl {
    /// Returns `true` for declarations with a receiver.
    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }

    /// Renames the declaration in place.
    pub fn rename(&mut self, new_name: impl Into<String>) {
        self.name.name = new_name.into();
    }
}

/// A top-level declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Decl {
    /// A `const`, `var` or `type` declaration.
    Gen(GenDecl),
    /// A `func` declaration.
    Func(FuncDecl),
}

/// A parsed Go source file.
///
/// Owns the source text and the lossless token stream alongside the
/// declaration tree, so it can be printed back after mutation.
#[derive(Clone, Debug)]
pub struct GoFile {
    /// The source the tree was parsed from.
    pub source: SourceFile,
    /// Every token of the file, trivia included.
    pub tokens: Vec<Token>,
    /// The package clause name.
    pub package: Ident,
    /// Import declarations, in order.
    pub imports: Vec<GenDecl>,
    /// Remaining top-level declarations, in order.
    pub decls: Vec<Decl>,
}

impl GoFile {
    /// The path the file was loaded from.
    pub fn path(&self) -> &Path {
        &self.source.path
    }

    /// Returns the original text covered by `span`.
    pub fn text(&self, span: Span) -> &str {
        self.source.snippet(span)
    }

    /// Iterates over all function and method declarations.
    pub fn functions(&self) -> impl Iterator<Item = &FuncDecl> {
        self.decls.iter().filter_map(|d| match d {
            Decl::Func(f) => Some(f),
            Decl::Gen(_) => None,
        })
    }

    /// Iterates mutably over all function and method declarations.
    pub fn functions_mut(&mut self) -> impl Iterator<Item = &mut FuncDecl> {
        self.decls.iter_mut().filter_map(|d| match d {
            Decl::Func(f) => Some(f),
            Decl::Gen(_) => None,
        })
    }

    /// Finds the first top-level function (not method) with the given name.
    pub fn find_function(&self, name: &str) -> Option<&FuncDecl> {
        self.functions()
            .find(|f| !f.is_method() && f.name.name == name)
    }
}
