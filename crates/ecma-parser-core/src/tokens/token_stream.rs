use ecma_diagnostics::ParseResult;
use ecma_lexer::{Goal, Lexer};
use ecma_span::Position;
use ecma_token::Token;

/// A snapshot a caller can [`TokenStream::restore`] to, for the handful of
/// constructs (arrow-function parameter lists, `async` disambiguation,
/// `let [` as a declaration versus `let` the identifier) that this parser
/// resolves by speculatively parsing ahead and backtracking rather than by
/// a zero-backtrack cover grammar.
#[derive(Clone)]
pub struct Checkpoint<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

/// A one-token-lookahead cursor over the lexer. `current()` is always the
/// next token to be consumed; advancing requires the caller to name the
/// [`Goal`] the *following* token should be read against, since only the
/// parser's grammar position — never the lexer alone — can tell `/` apart
/// from regex and division.
pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> TokenStream<'a> {
    pub fn new(source: &'a str) -> ParseResult<(Self, Option<Box<str>>)> {
        let mut lexer = Lexer::new(source);
        let shebang = lexer.skip_shebang();
        let current = lexer.next_token(Goal::Default)?;
        Ok((Self { lexer, current }, shebang))
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Replaces `current` with the next token read under `goal`, returning
    /// the token that was just consumed. `goal` is where a `/` is
    /// disambiguated between division and a `RegularExpressionLiteral` —
    /// traced at `Regex` so a misparse's decision trail can be replayed
    /// under `RUST_LOG=ecma_parser_core=trace` (spec §4.2, SPEC_FULL §4.8).
    pub fn advance(&mut self, goal: Goal) -> ParseResult<Token> {
        if goal == Goal::Regex {
            tracing::trace!(offset = self.current.span.end, "lexer goal: regex allowed");
        }
        let next = self.lexer.next_token(goal)?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Re-enters template scanning at the `current` token (which must be a
    /// `}` punctuator the parser has determined closes a template
    /// substitution), producing the next `TemplateMiddle`/`TemplateTail`.
    pub fn advance_template_part(&mut self) -> ParseResult<Token> {
        tracing::trace!(offset = self.current.span.start, "lexer mode: re-entering template");
        let next = self.lexer.next_template_part()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub fn position(&self, offset: u32) -> Position {
        self.lexer.position(offset)
    }

    pub fn checkpoint(&self) -> Checkpoint<'a> {
        Checkpoint { lexer: self.lexer.clone(), current: self.current.clone() }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint<'a>) {
        self.lexer = checkpoint.lexer;
        self.current = checkpoint.current;
    }
}
