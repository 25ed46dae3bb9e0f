//! The single parse-failure type shared by the lexer and the parser.
//!
//! There is no error recovery anywhere in this workspace: the first failure
//! encountered, lexical or syntactic, is returned to the caller and the parse
//! stops. `ErrorKind` exists only to group messages for callers that want to
//! react differently to "the source is lexically broken" versus "the source
//! is syntactically invalid" versus "this is a well-formed but disallowed
//! construct" — it carries no behavior of its own.

use ecma_span::Position;
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Broad category of a [`ParseError`], matching the taxonomy a conforming
/// ECMA-262 implementation reports against: malformed tokens, malformed
/// grammar, and well-formed-but-disallowed ("early error") constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unterminated string/template/comment/regex, invalid escape, invalid
    /// numeric literal, stray character.
    Lex,
    /// Unexpected token, expected-X-got-Y, missing semicolon where ASI
    /// cannot apply.
    Syntax,
    /// A grammatically valid construct that ECMA-262 forbids given context:
    /// strict-mode violations, duplicate bindings, `new.target` outside a
    /// function, undeclared private names, and so on.
    Early,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::Lex => "lexical error",
            ErrorKind::Syntax => "syntax error",
            ErrorKind::Early => "invalid syntax",
        };
        f.write_str(s)
    }
}

/// A single parse failure: a message plus the exact position it occurred at.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind}: {message} ({line}:{column})", line = position.line, column = position.column)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    /// Byte offset into the source where the error was detected.
    pub offset: u32,
    pub position: Position,
    /// A human-readable description of what would have been accepted here,
    /// when the parser can name one (e.g. `"expected one of: ',', ']'"`).
    pub expected: Option<String>,
}

impl ParseError {
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        offset: u32,
        position: Position,
    ) -> Self {
        Self { kind, message: message.into(), offset, position, expected: None }
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn lex(message: impl Into<String>, offset: u32, position: Position) -> Self {
        Self::new(ErrorKind::Lex, message, offset, position)
    }

    pub fn syntax(message: impl Into<String>, offset: u32, position: Position) -> Self {
        Self::new(ErrorKind::Syntax, message, offset, position)
    }

    pub fn early(message: impl Into<String>, offset: u32, position: Position) -> Self {
        Self::new(ErrorKind::Early, message, offset, position)
    }

    /// A parse aborted because it exceeded the configured recursion budget
    /// (see `ParserOptions::max_depth` in `ecma-parser-core`). Folded into
    /// `Syntax` since, from the caller's point of view, it is simply another
    /// reason the parse could not continue.
    pub fn recursion_limit(offset: u32, position: Position) -> Self {
        Self::syntax("maximum expression/statement nesting depth exceeded", offset, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_position() {
        let err = ParseError::syntax("unexpected token", 5, Position { line: 1, column: 5 });
        assert_eq!(err.to_string(), "syntax error: unexpected token (1:5)");
    }
}
