use super::Parser;
use ecma_ast::{
    BlockStatement, FunctionDeclaration, GetSpan, Pat, RestElement, Stmt, VariableDeclaration,
    VariableDeclarationKind, VariableDeclarator,
};
use ecma_diagnostics::ParseResult;
use ecma_span::Span;
use ecma_token::{Keyword, Punct};

impl<'a> Parser<'a> {
    /// `VariableDeclarationList`, shared by the `var`/`let`/`const`
    /// statement, a `for` head, and `export`. Does not consume a trailing
    /// `;` — callers that need one (ordinary statement position) call
    /// [`Parser::consume_semicolon`] themselves.
    pub(crate) fn parse_variable_declaration(&mut self) -> ParseResult<VariableDeclaration> {
        let _guard = self.enter()?;
        let start = self.cur_start();
        let kind = if self.eat_keyword(Keyword::Var)? {
            VariableDeclarationKind::Var
        } else if self.eat_keyword(Keyword::Const)? {
            VariableDeclarationKind::Const
        } else if self.is_identifier_named("let") {
            self.advance_default()?;
            VariableDeclarationKind::Let
        } else {
            return Err(self.unexpected("'var', 'let', or 'const'"));
        };

        let mut declarations = Vec::new();
        loop {
            let decl_start = self.cur_start();
            let id = self.parse_binding_target()?;
            let init = if self.eat_punct(Punct::Eq)? { Some(self.parse_assignment_expression()?) } else { None };
            if init.is_none() {
                if kind == VariableDeclarationKind::Const {
                    return Err(self.early_error_at(decl_start, "missing initializer in 'const' declaration"));
                }
                if !matches!(id, Pat::Identifier(_)) {
                    return Err(self.early_error_at(decl_start, "destructuring declaration requires an initializer"));
                }
            }
            let end = init.as_ref().map(|e| e.span().end).unwrap_or_else(|| id.span().end);
            declarations.push(VariableDeclarator { span: Span::new(decl_start, end), id, init });
            if !self.eat_punct(Punct::Comma)? {
                break;
            }
        }
        let end = declarations.last().expect("at least one declarator").span.end;
        Ok(VariableDeclaration { span: Span::new(start, end), kind, declarations })
    }

    pub(crate) fn eat_keyword(&mut self, k: Keyword) -> ParseResult<bool> {
        if self.is_keyword(k) {
            self.advance_default()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// `FunctionDeclaration`. `require_id` is `false` only for
    /// `export default function () {}`, the one spot ECMA-262 allows an
    /// anonymous function declaration.
    pub(crate) fn parse_function_declaration(&mut self, is_async: bool, require_id: bool) -> ParseResult<FunctionDeclaration> {
        let _guard = self.enter()?;
        let start = self.cur_start();
        self.expect_keyword(Keyword::Function)?;
        let generator = self.eat_punct(Punct::Star)?;
        let saved = std::mem::replace(&mut self.state, self.state.enter_function(generator, is_async));
        let result = (|| -> ParseResult<FunctionDeclaration> {
            let id = if self.is_identifier() {
                Some(self.parse_binding_identifier()?)
            } else if require_id {
                return Err(self.unexpected("function name"));
            } else {
                None
            };
            let params = self.parse_formal_parameters()?;
            let body = self.parse_function_body()?;
            let span = Span::new(start, body.span.end);
            Ok(FunctionDeclaration { span, id, params, body: Box::new(body), generator, is_async })
        })();
        self.state = saved;
        result
    }

    /// `FormalParameters`: a comma-separated `BindingElement` list, the last
    /// of which may be a `BindingRestElement`.
    pub(crate) fn parse_formal_parameters(&mut self) -> ParseResult<Vec<Pat>> {
        let _guard = self.enter()?;
        self.expect_punct(Punct::LParen)?;
        let mut params = Vec::new();
        while !self.is_punct(Punct::RParen) {
            if self.is_punct(Punct::Ellipsis) {
                let rest_start = self.advance_default()?.span.start;
                let target = self.parse_binding_target()?;
                let span = Span::new(rest_start, target.span().end);
                params.push(Pat::Rest(Box::new(RestElement { span, argument: target })));
                break;
            }
            params.push(self.parse_binding_element()?);
            if !self.is_punct(Punct::RParen) {
                self.expect_punct(Punct::Comma)?;
            }
        }
        self.expect_punct(Punct::RParen)?;
        Ok(params)
    }

    /// `FunctionBody`: a brace-delimited statement list with its own
    /// directive prologue, distinct from [`Parser::skip_directive_prologue`]
    /// only in that a function body can never contain a module declaration.
    pub(crate) fn parse_function_body(&mut self) -> ParseResult<BlockStatement> {
        let _guard = self.enter()?;
        let start = self.expect_punct(Punct::LBrace)?.start;
        let mut body = Vec::new();
        self.skip_function_directive_prologue(&mut body)?;
        while !self.is_punct(Punct::RBrace) {
            body.push(self.parse_statement_list_item()?);
        }
        let end = self.expect_punct(Punct::RBrace)?.end;
        Ok(BlockStatement { span: Span::new(start, end), body })
    }

    fn skip_function_directive_prologue(&mut self, body: &mut Vec<Stmt>) -> ParseResult<()> {
        loop {
            if self.is_punct(Punct::RBrace) || self.is_eof() {
                return Ok(());
            }
            let Some(stmt) = self.try_parse_directive()? else { return Ok(()) };
            body.push(stmt);
        }
    }
}
