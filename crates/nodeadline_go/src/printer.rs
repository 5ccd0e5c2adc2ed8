//! Printing parsed files back to text, and the built-in source formatter.

use crate::ast::GoFile;
use crate::error::SyntaxError;
use crate::lexer;
use crate::parser::GoParser;
use crate::source::SourceFile;
use crate::span::Span;
use crate::token::GoToken;
use std::path::Path;

/// Prints a file back to source text.
///
/// The output is the original text with every renamed function identifier
/// replaced by its new name. An unmodified file prints byte-for-byte
/// identical to its input.
pub fn print_file(file: &GoFile) -> String {
    let mut edits: Vec<(Span, &str)> = file
        .functions()
        .filter(|f| file.text(f.name.span) != f.name.name)
        .map(|f| (f.name.span, f.name.name.as_str()))
        .collect();
    edits.sort_by_key(|(span, _)| span.start);

    let content = &file.source.content;
    let mut out = String::with_capacity(content.len() + 16);
    let mut cursor = 0usize;
    for (span, name) in edits {
        let range = span.range();
        out.push_str(&content[cursor..range.start]);
        out.push_str(name);
        cursor = range.end;
    }
    out.push_str(&content[cursor..]);
    out
}

/// Formats Go source text.
///
/// The text is parsed first, so malformed input is rejected with a
/// [`SyntaxError`]. Only whitespace between tokens is normalized:
///
/// - `\r\n` line endings become `\n`
/// - trailing whitespace on each line is removed
/// - runs of blank lines collapse to a single blank line
/// - leading blank lines are removed
/// - the output ends with exactly one newline
///
/// Tokens, comments and indentation are otherwise kept as written.
/// Formatting formatted text returns it unchanged.
pub fn format_source(path: &Path, text: &str) -> Result<String, SyntaxError> {
    let file = SourceFile::new(path, text.replace("\r\n", "\n"));
    let tokens = lexer::lex(&file)?;
    let significant = lexer::significant_tokens(&tokens, &file.content);
    GoParser::new(&file, significant).parse_source_file()?;

    let mut out = String::with_capacity(file.content.len());
    for tok in &tokens {
        let text = file.snippet(tok.span);
        match tok.kind {
            GoToken::Whitespace => {
                let newlines = text.matches('\n').count();
                if out.is_empty() {
                    continue;
                }
                if newlines == 0 {
                    out.push_str(text);
                } else {
                    for _ in 0..newlines.min(2) {
                        out.push('\n');
                    }
                    let indent = text.rsplit('\n').next().unwrap_or_default();
                    out.push_str(indent);
                }
            }
            GoToken::LineComment => out.push_str(text.trim_end()),
            GoToken::Eof => {}
            _ => out.push_str(text),
        }
    }

    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out.push('\n');
    Ok(out)
}
