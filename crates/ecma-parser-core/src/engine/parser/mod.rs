//! [`Parser`]: the recursive-descent/Pratt engine itself, split by grammar
//! area the way a hand-written parser's source usually is — one module per
//! production family, all as `impl<'a> Parser<'a>` blocks over the single
//! struct defined here.

mod arrow;
mod class;
mod decl;
mod expr_lhs;
mod expr_ops;
mod expr_primary;
mod helpers;
mod literal;
mod module;
mod pattern;
mod stmt;

use crate::engine::ParserState;
use crate::tokens::TokenStream;
use ecma_ast::{Program, ProgramItem, SourceType};
use ecma_diagnostics::ParseResult;
use ecma_span::Span;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Knobs a parse needs beyond the source text and the module/script goal.
/// Constructed via [`ParserOptions::default`]; `max_depth` is the only
/// field today, reserved fields are for future Annex-B toggles.
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Maximum recursive-descent nesting depth before a parse fails with a
    /// [`ecma_diagnostics::ParseError::recursion_limit`] instead of
    /// exhausting the call stack. Generous enough (512) that it never fires
    /// on realistic source.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}

/// One class body's declared private names, shared (via `Rc`) with every
/// pending private-name *use* recorded while parsing that class's members,
/// so the use can be checked once the class (and any of its nested classes)
/// has finished parsing and the declared set is final. See
/// [`Parser::check_private_names`].
pub(crate) type PrivateScope = Rc<RefCell<HashSet<Box<str>>>>;

pub(crate) struct PendingPrivateUse {
    pub name: Box<str>,
    pub offset: u32,
    /// The chain of enclosing class scopes active at the point of use,
    /// innermost first — a use is valid if any of them declares the name.
    pub scopes: Vec<PrivateScope>,
}

/// The parser: a one-token-lookahead cursor over the lexer
/// ([`TokenStream`]), the mode-flag stack ([`ParserState`]), and the
/// bookkeeping the rest of this module needs (recursion depth, private-name
/// scopes). Holds no parsed-so-far tree state — every production builds and
/// returns its own node.
pub struct Parser<'a> {
    pub(crate) source: &'a str,
    pub(crate) tokens: TokenStream<'a>,
    pub(crate) state: ParserState,
    pub(crate) options: ParserOptions,
    pub(crate) depth: usize,
    pub(crate) class_scopes: Vec<PrivateScope>,
    pub(crate) pending_private_uses: RefCell<Vec<PendingPrivateUse>>,
    shebang: Shebang,
}

/// Not-yet-consumed shebang, threaded from construction through to the
/// finished [`Program`].
struct Shebang(Option<Box<str>>);

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, is_module: bool) -> ParseResult<Self> {
        Self::with_options(source, is_module, ParserOptions::default())
    }

    pub fn with_options(source: &'a str, is_module: bool, options: ParserOptions) -> ParseResult<Self> {
        let (tokens, shebang) = TokenStream::new(source)?;
        Ok(Self {
            source,
            tokens,
            state: ParserState::new(is_module),
            options,
            depth: 0,
            class_scopes: Vec::new(),
            pending_private_uses: RefCell::new(Vec::new()),
            shebang: Shebang(shebang),
        })
    }

    /// Parses a complete `Program`. This is the only production allowed to
    /// see `Eof` as a success condition rather than "unexpected token".
    #[tracing::instrument(level = "debug", skip(self), fields(source_len = self.source.len()))]
    pub fn parse(mut self) -> ParseResult<Program> {
        tracing::debug!(module = self.state.module, "entering parse_program");
        let start = self.tokens.current().span.start;
        let shebang = self.shebang.0.take();
        let is_module = self.state.module;
        let body = self.parse_program_body()?;
        let end = self.last_end();
        self.check_private_names()?;
        let source_type = if is_module { SourceType::Module } else { SourceType::Script };
        tracing::debug!(item_count = body.len(), "leaving parse_program");
        Ok(Program { span: Span::new(start, end), source_type, shebang, body })
    }

    /// Convenience combining [`Parser::with_options`] and [`Parser::parse`].
    pub fn parse_program(source: &'a str, is_module: bool) -> ParseResult<Program> {
        Self::new(source, is_module)?.parse()
    }

    pub fn parse_program_with_options(
        source: &'a str,
        is_module: bool,
        options: ParserOptions,
    ) -> ParseResult<Program> {
        Self::with_options(source, is_module, options)?.parse()
    }

    fn parse_program_body(&mut self) -> ParseResult<Vec<ProgramItem>> {
        let mut body = Vec::new();
        self.skip_directive_prologue(&mut body)?;
        while !self.tokens.current().is_eof() {
            body.push(self.parse_program_item()?);
        }
        Ok(body)
    }

    fn parse_program_item(&mut self) -> ParseResult<ProgramItem> {
        let offset = self.tokens.current().span.start;
        tracing::trace!(offset, "parsing top-level program item");
        if self.is_module_declaration_start()? {
            return Ok(ProgramItem::Module(self.parse_module_declaration()?));
        }
        Ok(ProgramItem::Stmt(self.parse_statement_list_item()?))
    }

    fn last_end(&self) -> u32 {
        self.tokens.current().span.start
    }
}
