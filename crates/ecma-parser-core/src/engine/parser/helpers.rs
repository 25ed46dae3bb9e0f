use super::{PendingPrivateUse, Parser, PrivateScope};
use ecma_diagnostics::{ParseError, ParseResult};
use ecma_lexer::Goal;
use ecma_span::{Position, Span};
use ecma_token::{Keyword, Punct, Token, TokenKind};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// RAII guard for [`Parser::enter`]; decrements the recursion counter when a
/// recursive production returns, success or failure, via `Drop` rather than
/// requiring every call site to remember to pop.
pub(crate) struct DepthGuard<'p, 'a> {
    parser: &'p mut Parser<'a>,
}

impl Drop for DepthGuard<'_, '_> {
    fn drop(&mut self) {
        self.parser.depth -= 1;
    }
}

impl<'a> Parser<'a> {
    /// Entered at the top of every recursive expression/statement
    /// production; see spec §4.6. Turns unbounded input nesting into a
    /// catchable `ParseError` instead of a stack overflow.
    pub(crate) fn enter(&mut self) -> ParseResult<DepthGuard<'_, 'a>> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            let offset = self.tokens.current().span.start;
            return Err(ParseError::recursion_limit(offset, self.position(offset)));
        }
        Ok(DepthGuard { parser: self })
    }

    pub(crate) fn position(&self, offset: u32) -> Position {
        self.tokens.position(offset)
    }

    pub(crate) fn cur(&self) -> &Token {
        self.tokens.current()
    }

    pub(crate) fn cur_start(&self) -> u32 {
        self.cur().span.start
    }

    pub(crate) fn preceding_line_terminator(&self) -> bool {
        self.cur().preceding_line_terminator
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.cur().is_eof()
    }

    pub(crate) fn is_punct(&self, p: Punct) -> bool {
        matches!(self.cur().kind, TokenKind::Punct(k) if k == p)
    }

    pub(crate) fn is_keyword(&self, k: Keyword) -> bool {
        matches!(self.cur().kind, TokenKind::Keyword(kw) if kw == k)
    }

    pub(crate) fn is_identifier(&self) -> bool {
        matches!(self.cur().kind, TokenKind::Identifier(_))
    }

    /// True when the current token is an (unescaped) identifier spelled
    /// exactly `name` — the mechanism every contextual keyword (`let`,
    /// `async`, `of`, `from`, `as`, `get`, `set`, `static`, `yield`,
    /// `await`) is promoted through.
    pub(crate) fn is_identifier_named(&self, name: &str) -> bool {
        matches!(&self.cur().kind, TokenKind::Identifier(id) if &*id.name == name)
    }

    pub(crate) fn identifier_name(&self) -> Option<&str> {
        match &self.cur().kind {
            TokenKind::Identifier(id) => Some(&id.name),
            _ => None,
        }
    }

    pub(crate) fn current_contains_escapes(&self) -> bool {
        matches!(&self.cur().kind, TokenKind::Identifier(id) if id.contained_escapes)
    }

    /// Advances past the current token, reading the *next* one under
    /// `goal`. Returns the token that was just consumed (its span is what
    /// callers usually want, for building the node they just finished).
    pub(crate) fn advance(&mut self, goal: Goal) -> ParseResult<Token> {
        self.tokens.advance(goal)
    }

    pub(crate) fn advance_default(&mut self) -> ParseResult<Token> {
        self.advance(Goal::Default)
    }

    /// Consumes the current token if it is punctuator `p`, returning
    /// whether it matched.
    pub(crate) fn eat_punct(&mut self, p: Punct) -> ParseResult<bool> {
        if self.is_punct(p) {
            self.advance_default()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Like [`Parser::eat_punct`], but reads the following token under
    /// `Goal::Regex` — for punctuators (`:`, `=`, `...`) immediately
    /// followed by the start of a new expression, where a `/` must be free
    /// to begin a `RegularExpressionLiteral`.
    pub(crate) fn eat_punct_regex(&mut self, p: Punct) -> ParseResult<bool> {
        if self.is_punct(p) {
            self.advance(Goal::Regex)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn expect_punct(&mut self, p: Punct) -> ParseResult<Span> {
        if !self.is_punct(p) {
            return Err(self.unexpected(Some(p.as_str())));
        }
        Ok(self.advance_default()?.span)
    }

    /// Like [`Parser::expect_punct`], but reads the following token under
    /// `Goal::Regex` — see [`Parser::eat_punct_regex`].
    pub(crate) fn expect_punct_regex(&mut self, p: Punct) -> ParseResult<Span> {
        if !self.is_punct(p) {
            return Err(self.unexpected(Some(p.as_str())));
        }
        Ok(self.advance(Goal::Regex)?.span)
    }

    /// `/` and `}` (template re-entry) need a caller-chosen goal, so the
    /// generic `expect_punct` always reads under `Goal::Default` — callers
    /// expecting those use `advance` directly.
    pub(crate) fn expect_keyword(&mut self, k: Keyword) -> ParseResult<Span> {
        if !self.is_keyword(k) {
            return Err(self.unexpected(Some(k.as_str())));
        }
        Ok(self.advance_default()?.span)
    }

    /// Like [`Parser::expect_keyword`], but reads the following token under
    /// `Goal::Regex` — for keywords (`return`, `case`, ...) immediately
    /// followed by the start of an expression.
    pub(crate) fn expect_keyword_regex(&mut self, k: Keyword) -> ParseResult<Span> {
        if !self.is_keyword(k) {
            return Err(self.unexpected(Some(k.as_str())));
        }
        Ok(self.advance(Goal::Regex)?.span)
    }

    /// Like [`Parser::eat_keyword`], but reads the following token under
    /// `Goal::Regex` — see [`Parser::expect_keyword_regex`].
    pub(crate) fn eat_keyword_regex(&mut self, k: Keyword) -> ParseResult<bool> {
        if self.is_keyword(k) {
            self.advance(Goal::Regex)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn unexpected(&self, expected: impl Into<Option<&'static str>>) -> ParseError {
        let offset = self.cur_start();
        let err = ParseError::syntax(format!("unexpected token {}", self.cur().kind), offset, self.position(offset));
        match expected.into() {
            Some(e) => err.with_expected(e),
            None => err,
        }
    }

    pub(crate) fn error_at(&self, offset: u32, message: impl Into<String>) -> ParseError {
        ParseError::syntax(message, offset, self.position(offset))
    }

    pub(crate) fn early_error_at(&self, offset: u32, message: impl Into<String>) -> ParseError {
        ParseError::early(message, offset, self.position(offset))
    }

    pub(crate) fn early_error_here(&self, message: impl Into<String>) -> ParseError {
        self.early_error_at(self.cur_start(), message)
    }

    /// Automatic semicolon insertion (spec §4.4 "Automatic semicolon
    /// insertion"). Consumes a `;` if present; otherwise succeeds silently
    /// when the next token is `}`, EOF, or was preceded by a line
    /// terminator — and fails otherwise.
    pub(crate) fn consume_semicolon(&mut self) -> ParseResult<()> {
        if self.eat_punct_regex(Punct::Semi)? {
            return Ok(());
        }
        if self.is_eof() || self.is_punct(Punct::RBrace) || self.preceding_line_terminator() {
            return Ok(());
        }
        Err(self.unexpected(";"))
    }

    pub(crate) fn is_keyword_import(&self) -> bool {
        self.is_keyword(Keyword::Import)
    }

    pub(crate) fn is_keyword_export(&self) -> bool {
        self.is_keyword(Keyword::Export)
    }

    /// A module-goal top-level `import`/`export` heads a module
    /// declaration, *unless* the `import` is actually `import(...)` (dynamic
    /// import expression) or `import.meta`, both of which are ordinary
    /// expressions legal in any goal.
    pub(crate) fn is_module_declaration_start(&mut self) -> ParseResult<bool> {
        if !self.state.module {
            return Ok(false);
        }
        if self.is_keyword_export() {
            return Ok(true);
        }
        if !self.is_keyword_import() {
            return Ok(false);
        }
        let checkpoint = self.tokens.checkpoint();
        self.advance_default()?;
        let is_call_or_meta = self.is_punct(Punct::LParen) || self.is_punct(Punct::Dot);
        self.tokens.restore(checkpoint);
        Ok(!is_call_or_meta)
    }

    /// Consumes leading string-literal expression statements that form the
    /// directive prologue, raising `strict` the moment `"use strict"` is
    /// seen among them. Each directive is pushed onto `body` like any other
    /// statement; the prologue ends at the first statement that is not a
    /// bare string-literal `ExpressionStatement`.
    pub(crate) fn skip_directive_prologue(
        &mut self,
        body: &mut Vec<ecma_ast::ProgramItem>,
    ) -> ParseResult<()> {
        loop {
            if self.is_module_declaration_start()? || self.is_eof() {
                return Ok(());
            }
            let Some(stmt) = self.try_parse_directive()? else { return Ok(()) };
            body.push(ecma_ast::ProgramItem::Stmt(stmt));
        }
    }

    /// True if the current token is the identifier `async` and the
    /// following token, with no line terminator between them, is `keyword`
    /// — the lookahead `async function` needs to tell itself apart from an
    /// ordinary identifier named `async`.
    pub(crate) fn is_async_keyword_sequence(&mut self, keyword: Keyword) -> ParseResult<bool> {
        if !self.is_identifier_named("async") {
            return Ok(false);
        }
        let checkpoint = self.tokens.checkpoint();
        self.advance_default()?;
        let matched = self.is_keyword(keyword) && !self.preceding_line_terminator();
        self.tokens.restore(checkpoint);
        Ok(matched)
    }

    /// True if the current token is `async` immediately followed (no line
    /// terminator) by either `(` or a binding identifier — the two shapes an
    /// async arrow function can start with.
    pub(crate) fn is_async_arrow_start(&mut self) -> ParseResult<bool> {
        if !self.is_identifier_named("async") {
            return Ok(false);
        }
        let checkpoint = self.tokens.checkpoint();
        self.advance_default()?;
        let matched = !self.preceding_line_terminator()
            && (self.is_punct(Punct::LParen) || self.is_identifier());
        self.tokens.restore(checkpoint);
        Ok(matched)
    }

    // --- private-name bookkeeping -----------------------------------------

    pub(crate) fn push_class_scope(&mut self) -> PrivateScope {
        let scope: PrivateScope = Rc::new(RefCell::new(HashSet::new()));
        self.class_scopes.push(scope.clone());
        scope
    }

    pub(crate) fn pop_class_scope(&mut self) {
        self.class_scopes.pop();
    }

    pub(crate) fn declare_private_name(&mut self, name: &str, offset: u32) -> ParseResult<()> {
        let Some(scope) = self.class_scopes.last() else {
            return Err(self.early_error_at(offset, "private field declared outside class body"));
        };
        scope.borrow_mut().insert(name.into());
        Ok(())
    }

    /// Records a `#name` reference for later verification (see
    /// [`Parser::check_private_names`]) rather than checking immediately,
    /// since the declaring member may appear later in the same class body.
    pub(crate) fn record_private_use(&self, name: &str, offset: u32) {
        self.pending_private_uses.borrow_mut().push(PendingPrivateUse {
            name: name.into(),
            offset,
            scopes: self.class_scopes.clone(),
        });
    }

    /// Verifies every recorded private-name use against the final declared
    /// set of its enclosing class scopes. Called once, after the whole
    /// program has parsed, so forward references within a class body (a
    /// method using `#x` declared later in the same class) are accepted.
    pub(crate) fn check_private_names(&self) -> ParseResult<()> {
        for use_ in self.pending_private_uses.borrow().iter() {
            let declared = use_.scopes.iter().any(|scope| scope.borrow().contains(&use_.name));
            if !declared {
                return Err(self.early_error_at(
                    use_.offset,
                    format!("private name #{} is not declared in an enclosing class body", use_.name),
                ));
            }
        }
        Ok(())
    }
}
