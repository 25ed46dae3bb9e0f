use super::Parser;
use ecma_ast::{
    ArrowFunctionBody, ArrowFunctionExpression, Expr, GetSpan, Pat, RestElement, SequenceExpression,
};
use ecma_diagnostics::ParseResult;
use ecma_span::Span;
use ecma_token::Punct;

impl<'a> Parser<'a> {
    /// `CoverParenthesizedExpressionAndArrowParameterList`: parses the `(`
    /// that could turn out to be a parenthesized expression or the parameter
    /// list of an arrow function, deciding which once `)` is reached and the
    /// following token is inspected for `=>`. Each element is parsed as a
    /// full `AssignmentExpression` (the more permissive of the two grammars)
    /// and reinterpreted as a binding pattern via [`Parser::expr_to_pattern`]
    /// only if an arrow does follow.
    pub(crate) fn parse_cover_parenthesized(&mut self) -> ParseResult<Expr> {
        let _guard = self.enter()?;
        let start = self.expect_punct(Punct::LParen)?.start;

        if self.is_punct(Punct::RParen) {
            let end = self.advance_default()?.span.end;
            if !self.is_punct(Punct::Arrow) || self.preceding_line_terminator() {
                return Err(self.unexpected("'=>'"));
            }
            let _ = end;
            return self.finish_arrow_function(start, Vec::new(), false);
        }

        let saved_allow_in = self.state.allow_in;
        self.state.allow_in = true;
        let mut elements = Vec::new();
        let mut rest = None;
        let mut trailing_comma = false;
        loop {
            if self.is_punct(Punct::Ellipsis) {
                let rest_start = self.advance_default()?.span.start;
                let target = self.parse_binding_target()?;
                let span = Span::new(rest_start, target.span().end);
                rest = Some(Pat::Rest(Box::new(RestElement { span, argument: target })));
                break;
            }
            elements.push(self.parse_assignment_expression()?);
            if !self.eat_punct(Punct::Comma)? {
                break;
            }
            if self.is_punct(Punct::RParen) {
                trailing_comma = true;
                break;
            }
        }
        self.state.allow_in = saved_allow_in;
        self.expect_punct(Punct::RParen)?;

        if self.is_punct(Punct::Arrow) && !self.preceding_line_terminator() {
            let mut params = Vec::with_capacity(elements.len() + rest.is_some() as usize);
            for el in elements {
                params.push(self.expr_to_pattern(el)?);
            }
            if let Some(rest) = rest {
                params.push(rest);
            }
            return self.finish_arrow_function(start, params, false);
        }

        if let Some(rest) = rest {
            return Err(self.early_error_at(rest.span().start, "rest element is only valid in an arrow function's parameter list"));
        }
        if trailing_comma {
            return Err(self.early_error_at(self.cur_start(), "unexpected trailing comma in parenthesized expression"));
        }

        let grouped = if elements.len() == 1 {
            elements.pop().unwrap()
        } else {
            let span = Span::new(elements[0].span().start, elements.last().unwrap().span().end);
            Expr::Sequence(Box::new(SequenceExpression { span, expressions: elements }))
        };
        let end = self.last_end();
        Ok(grouped.with_span(Span::new(start, end)))
    }

    /// `async` arrow functions: `async x => x` and `async (x, y) => x + y`.
    /// Reached from [`Parser::parse_primary_expression`] once
    /// [`Parser::is_async_arrow_start`] has confirmed the shape.
    pub(crate) fn parse_async_arrow_function(&mut self) -> ParseResult<Expr> {
        let start = self.cur_start();
        self.advance_default()?; // `async`
        let params = if self.is_punct(Punct::LParen) {
            self.parse_arrow_parameter_list()?
        } else {
            vec![Pat::Identifier(self.parse_binding_identifier()?)]
        };
        self.finish_arrow_function(start, params, true)
    }

    /// A parenthesized parameter list known in advance to be one (the
    /// `async (` case), so every element is parsed directly as a binding
    /// rather than as an `AssignmentExpression` needing reinterpretation.
    fn parse_arrow_parameter_list(&mut self) -> ParseResult<Vec<Pat>> {
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

    /// Consumes the `=>` and parses the arrow's body, entering a fresh arrow
    /// scope (see [`ecma_parser_core::engine::ParserState::enter_arrow`])
    /// around it. Shared by the bare-identifier, parenthesized, and `async`
    /// arrow forms.
    pub(crate) fn finish_arrow_function(
        &mut self,
        start: u32,
        params: Vec<Pat>,
        is_async: bool,
    ) -> ParseResult<Expr> {
        self.expect_punct(Punct::Arrow)?;
        let saved = std::mem::replace(&mut self.state, self.state.enter_arrow(is_async));
        let result = (|| -> ParseResult<(ArrowFunctionBody, bool)> {
            if self.is_punct(Punct::LBrace) {
                Ok((ArrowFunctionBody::Block(Box::new(self.parse_function_body()?)), false))
            } else {
                Ok((ArrowFunctionBody::Expr(Box::new(self.parse_assignment_expression()?)), true))
            }
        })();
        self.state = saved;
        let (body, expression) = result?;
        let end = match &body {
            ArrowFunctionBody::Block(b) => b.span.end,
            ArrowFunctionBody::Expr(e) => e.span().end,
        };
        Ok(Expr::Arrow(Box::new(ArrowFunctionExpression {
            span: Span::new(start, end),
            params,
            body,
            is_async,
            expression,
        })))
    }
}
