use super::Parser;
use ecma_ast::{
    ArrayExpression, ArrayExpressionElement, Argument, Expr, FunctionExpression, GetSpan,
    Identifier, Literal, MetaProperty, ObjectExpression, ObjectExpressionProperty, Property,
    PropertyKey, PropertyKind, SpreadElement, TemplateLiteral, ThisExpression,
};
use ecma_diagnostics::ParseResult;
use ecma_lexer::Goal;
use ecma_span::Span;
use ecma_token::{Keyword, Punct, TokenKind};

impl<'a> Parser<'a> {
    /// `PrimaryExpression`: the leaves of the expression grammar before any
    /// postfix member/call/update/binary operator is applied. Arrow-function
    /// and parenthesized-expression disambiguation both start from the `(`
    /// arm — see [`Parser::parse_cover_parenthesized`] in `arrow.rs`.
    pub(crate) fn parse_primary_expression(&mut self) -> ParseResult<Expr> {
        let _guard = self.enter()?;
        let start = self.cur_start();

        if self.is_async_arrow_start()? {
            return self.parse_async_arrow_function();
        }

        match self.cur().kind.clone() {
            TokenKind::Keyword(Keyword::This) => {
                let span = self.advance_default()?.span;
                Ok(Expr::This(Box::new(ThisExpression { span })))
            }
            TokenKind::Keyword(Keyword::Null) => {
                let span = self.advance_default()?.span;
                Ok(Expr::Literal(Box::new(Literal::null(span, "null"))))
            }
            TokenKind::Keyword(Keyword::True) => {
                let span = self.advance_default()?.span;
                Ok(Expr::Literal(Box::new(Literal::bool(span, true, "true"))))
            }
            TokenKind::Keyword(Keyword::False) => {
                let span = self.advance_default()?.span;
                Ok(Expr::Literal(Box::new(Literal::bool(span, false, "false"))))
            }
            TokenKind::Keyword(Keyword::Function) => self.parse_function_expression(false),
            TokenKind::Keyword(Keyword::Class) => self.parse_class_expression(),
            TokenKind::Keyword(Keyword::New) => self.parse_new_expression(),
            TokenKind::Keyword(Keyword::Import) => self.parse_import_expression(),
            TokenKind::Keyword(Keyword::Super) => Err(self.unexpected("'super' can only be used as a call/member target")),
            TokenKind::NumericLiteral(tok) => {
                let span = self.cur().span;
                self.check_legacy_numeric_literal(&tok.raw, start)?;
                let lit = self.build_numeric_literal(span, &tok);
                self.advance_default()?;
                Ok(Expr::Literal(Box::new(lit)))
            }
            TokenKind::StringLiteral(tok) => {
                let span = self.cur().span;
                let lit = self.build_string_literal(span, &tok);
                self.advance_default()?;
                Ok(Expr::Literal(Box::new(lit)))
            }
            TokenKind::RegExpLiteral(tok) => {
                let span = self.cur().span;
                let raw = format!("/{}/{}", tok.pattern, tok.flags);
                let lit = Literal::regex(span, tok.pattern.as_ref(), tok.flags.as_ref(), raw);
                self.advance_default()?;
                Ok(Expr::Literal(Box::new(lit)))
            }
            TokenKind::NoSubstitutionTemplate(_)
            | TokenKind::TemplateHead(_) => self.parse_template_literal().map(|t| Expr::Template(Box::new(t))),
            TokenKind::Punct(Punct::LBracket) => self.parse_array_expression(),
            TokenKind::Punct(Punct::LBrace) => self.parse_object_expression(),
            TokenKind::Punct(Punct::LParen) => self.parse_cover_parenthesized(),
            TokenKind::Identifier(id) if id.name.as_ref() == "async" => {
                if self.is_async_keyword_sequence(Keyword::Function)? {
                    self.advance_default()?;
                    self.parse_function_expression(true)
                } else {
                    self.parse_identifier_reference().map(|id| Expr::Identifier(Box::new(*id)))
                }
            }
            TokenKind::Identifier(_) => {
                self.parse_identifier_reference().map(|id| Expr::Identifier(Box::new(*id)))
            }
            _ => {
                let _ = start;
                Err(self.unexpected("expression"))
            }
        }
    }

    /// `IdentifierReference`: unlike [`Parser::parse_binding_identifier`],
    /// this is a *use*, so `eval`/`arguments` are always fine — only the
    /// strict-reserved set, and `yield`/`await` in their respective
    /// contexts, are excluded.
    pub(crate) fn parse_identifier_reference(&mut self) -> ParseResult<Box<Identifier>> {
        let offset = self.cur_start();
        let Some(name) = self.identifier_name().map(String::from) else {
            return Err(self.unexpected("identifier"));
        };
        if self.state.strict && ecma_token::STRICT_RESERVED_WORDS.contains(name.as_str()) {
            return Err(self.early_error_at(offset, format!("'{name}' is a reserved word in strict mode")));
        }
        if name == "yield" && (self.state.strict || self.state.in_generator) {
            return Err(self.early_error_at(offset, "'yield' cannot be used as an identifier here"));
        }
        if name == "await" && (self.state.module || self.state.in_async) {
            return Err(self.early_error_at(offset, "'await' cannot be used as an identifier here"));
        }
        let span = self.cur().span;
        self.advance_default()?;
        Ok(Box::new(Identifier { span, name: name.into_boxed_str() }))
    }

    fn parse_array_expression(&mut self) -> ParseResult<Expr> {
        let _guard = self.enter()?;
        let start = self.expect_punct(Punct::LBracket)?.start;
        let mut elements = Vec::new();
        while !self.is_punct(Punct::RBracket) {
            if self.eat_punct_regex(Punct::Comma)? {
                elements.push(None);
                continue;
            }
            if self.is_punct(Punct::Ellipsis) {
                let spread_start = self.advance(Goal::Regex)?.span.start;
                let argument = self.parse_assignment_expression()?;
                let span = Span::new(spread_start, argument.span().end);
                elements.push(Some(ArrayExpressionElement::Spread(Box::new(SpreadElement { span, argument }))));
            } else {
                elements.push(Some(ArrayExpressionElement::Expr(self.parse_assignment_expression()?)));
            }
            if !self.is_punct(Punct::RBracket) {
                self.expect_punct_regex(Punct::Comma)?;
            }
        }
        let end = self.expect_punct(Punct::RBracket)?.end;
        Ok(Expr::Array(Box::new(ArrayExpression { span: Span::new(start, end), elements })))
    }

    fn parse_object_expression(&mut self) -> ParseResult<Expr> {
        let _guard = self.enter()?;
        let start = self.expect_punct(Punct::LBrace)?.start;
        let mut properties = Vec::new();
        while !self.is_punct(Punct::RBrace) {
            properties.push(self.parse_object_property()?);
            if !self.is_punct(Punct::RBrace) {
                self.expect_punct(Punct::Comma)?;
            }
        }
        let end = self.expect_punct(Punct::RBrace)?.end;
        Ok(Expr::Object(Box::new(ObjectExpression { span: Span::new(start, end), properties })))
    }

    fn parse_object_property(&mut self) -> ParseResult<ObjectExpressionProperty> {
        let start = self.cur_start();
        if self.is_punct(Punct::Ellipsis) {
            self.advance(Goal::Regex)?;
            let argument = self.parse_assignment_expression()?;
            let span = Span::new(start, argument.span().end);
            return Ok(ObjectExpressionProperty::Spread(Box::new(SpreadElement { span, argument })));
        }

        let is_generator_or_async_method = self.is_punct(Punct::Star)
            || self.is_async_keyword_sequence_method()?;
        if is_generator_or_async_method {
            return self.parse_object_method(start);
        }

        if (self.is_identifier_named("get") || self.is_identifier_named("set")) && self.next_starts_property_key()? {
            let is_getter = self.is_identifier_named("get");
            self.advance_default()?;
            let (key, computed) = self.parse_property_key()?;
            let value = self.parse_method_function(false, false)?;
            let span = Span::new(start, value.span().end);
            let kind = if is_getter { PropertyKind::Get } else { PropertyKind::Set };
            return Ok(ObjectExpressionProperty::Property(Box::new(Property {
                span,
                key,
                value: Expr::Function(Box::new(value)),
                kind,
                method: false,
                shorthand: false,
                computed,
            })));
        }

        let (key, computed) = self.parse_property_key()?;
        if self.is_punct(Punct::LParen) {
            let value = self.parse_method_function(false, false)?;
            let span = Span::new(start, value.span().end);
            return Ok(ObjectExpressionProperty::Property(Box::new(Property {
                span,
                key,
                value: Expr::Function(Box::new(value)),
                kind: PropertyKind::Init,
                method: true,
                shorthand: false,
                computed,
            })));
        }
        if self.eat_punct_regex(Punct::Colon)? {
            let value = self.parse_assignment_expression()?;
            let span = Span::new(start, value.span().end);
            return Ok(ObjectExpressionProperty::Property(Box::new(Property {
                span,
                key,
                value,
                kind: PropertyKind::Init,
                method: false,
                shorthand: false,
                computed,
            })));
        }

        // Shorthand `{ a }` or `{ a = default }` (the latter is a
        // `CoverInitializedName`, legal only when this object literal is
        // later reinterpreted as a pattern — see `expr_to_pattern`).
        let PropertyKey::Identifier(id) = &key else {
            return Err(self.unexpected("':'"));
        };
        let ident_expr = Expr::Identifier(id.clone());
        let value = if self.eat_punct_regex(Punct::Eq)? {
            let default = self.parse_assignment_expression()?;
            let span = Span::new(id.span.start, default.span().end);
            Expr::Assignment(Box::new(ecma_ast::AssignmentExpression {
                span,
                operator: ecma_ast::AssignmentOperator::Assign,
                left: ecma_ast::Pat::Identifier(id.clone()),
                right: default,
            }))
        } else {
            ident_expr
        };
        let span = Span::new(start, value.span().end);
        Ok(ObjectExpressionProperty::Property(Box::new(Property {
            span,
            key,
            value,
            kind: PropertyKind::Init,
            method: false,
            shorthand: true,
            computed: false,
        })))
    }

    fn is_async_keyword_sequence_method(&mut self) -> ParseResult<bool> {
        if !self.is_identifier_named("async") {
            return Ok(false);
        }
        let checkpoint = self.tokens.checkpoint();
        self.advance_default()?;
        let matched = !self.preceding_line_terminator() && !self.is_punct(Punct::LParen) && !self.is_punct(Punct::Colon);
        self.tokens.restore(checkpoint);
        Ok(matched)
    }

    /// True when the token after the current one can start a property key —
    /// used to tell `get`/`set` used as an accessor modifier apart from
    /// `get`/`set` used as an ordinary property name.
    fn next_starts_property_key(&mut self) -> ParseResult<bool> {
        let checkpoint = self.tokens.checkpoint();
        self.advance_default()?;
        let starts = !self.is_punct(Punct::Colon)
            && !self.is_punct(Punct::LParen)
            && !self.is_punct(Punct::Comma)
            && !self.is_punct(Punct::RBrace)
            && !self.is_punct(Punct::Eq);
        self.tokens.restore(checkpoint);
        Ok(starts)
    }

    fn parse_object_method(&mut self, start: u32) -> ParseResult<ObjectExpressionProperty> {
        let is_async = self.is_identifier_named("async");
        if is_async {
            self.advance_default()?;
        }
        let is_generator = self.eat_punct(Punct::Star)?;
        let (key, computed) = self.parse_property_key()?;
        let value = self.parse_method_function(is_generator, is_async)?;
        let span = Span::new(start, value.span().end);
        Ok(ObjectExpressionProperty::Property(Box::new(Property {
            span,
            key,
            value: Expr::Function(Box::new(value)),
            kind: PropertyKind::Init,
            method: true,
            shorthand: false,
            computed,
        })))
    }

    /// Parses a method's parameter list and body (no name, no `function`
    /// keyword — those belong to the caller's own syntax), entering a fresh
    /// function scope per spec §4.3.
    pub(crate) fn parse_method_function(&mut self, generator: bool, is_async: bool) -> ParseResult<FunctionExpression> {
        let start = self.cur_start();
        let saved = std::mem::replace(&mut self.state, self.state.enter_function(generator, is_async));
        let params = self.parse_formal_parameters()?;
        let body = self.parse_function_body()?;
        self.state = saved;
        let span = Span::new(start, body.span.end);
        Ok(FunctionExpression { span, id: None, params, body: Box::new(body), generator, is_async })
    }

    fn parse_function_expression(&mut self, is_async: bool) -> ParseResult<Expr> {
        let start = if is_async { self.cur_start() } else { self.cur_start() };
        self.expect_keyword(Keyword::Function)?;
        let generator = self.eat_punct(Punct::Star)?;
        let saved = std::mem::replace(&mut self.state, self.state.enter_function(generator, is_async));
        let id = if self.is_identifier() {
            Some(self.parse_binding_identifier()?)
        } else {
            None
        };
        let params = self.parse_formal_parameters()?;
        let body = self.parse_function_body()?;
        self.state = saved;
        let span = Span::new(start, body.span.end);
        Ok(Expr::Function(Box::new(FunctionExpression {
            span,
            id,
            params,
            body: Box::new(body),
            generator,
            is_async,
        })))
    }

    fn parse_new_expression(&mut self) -> ParseResult<Expr> {
        let start = self.expect_keyword(Keyword::New)?.start;
        if self.is_punct(Punct::Dot) {
            self.advance_default()?;
            if !self.is_identifier_named("target") {
                return Err(self.unexpected("'target'"));
            }
            let end = self.advance_default()?.span.end;
            if !self.state.in_function {
                return Err(self.early_error_at(start, "'new.target' is only valid inside a function"));
            }
            return Ok(Expr::MetaProperty(Box::new(MetaProperty {
                span: Span::new(start, end),
                meta: Box::new(Identifier { span: Span::new(start, start), name: "new".into() }),
                property: Box::new(Identifier { span: Span::new(end, end), name: "target".into() }),
            })));
        }
        // `MemberExpression` without call syntax, then an optional argument list.
        let callee = self.parse_new_callee()?;
        let (arguments, end) = if self.is_punct(Punct::LParen) {
            let (args, span) = self.parse_arguments()?;
            (args, span.end)
        } else {
            (Vec::new(), callee.span().end)
        };
        Ok(Expr::New(Box::new(ecma_ast::NewExpression { span: Span::new(start, end), callee, arguments })))
    }

    fn parse_import_expression(&mut self) -> ParseResult<Expr> {
        let start = self.expect_keyword(Keyword::Import)?.start;
        if self.eat_punct(Punct::Dot)? {
            if !self.is_identifier_named("meta") {
                return Err(self.unexpected("'meta'"));
            }
            let end = self.advance_default()?.span.end;
            return Ok(Expr::MetaProperty(Box::new(MetaProperty {
                span: Span::new(start, end),
                meta: Box::new(Identifier { span: Span::new(start, start), name: "import".into() }),
                property: Box::new(Identifier { span: Span::new(end, end), name: "meta".into() }),
            })));
        }
        self.expect_punct_regex(Punct::LParen)?;
        let source = self.parse_assignment_expression()?;
        let options = if self.eat_punct_regex(Punct::Comma)? && !self.is_punct(Punct::RParen) {
            Some(self.parse_assignment_expression()?)
        } else {
            None
        };
        self.eat_punct(Punct::Comma)?;
        let end = self.expect_punct(Punct::RParen)?.end;
        Ok(Expr::Import(Box::new(ecma_ast::ImportExpression { span: Span::new(start, end), source, options })))
    }

    /// Returns the parsed arguments along with the span of the whole
    /// `(...)` list, since callers (`new`, calls) need its end offset and
    /// have no other way to recover it.
    pub(crate) fn parse_arguments(&mut self) -> ParseResult<(Vec<Argument>, Span)> {
        let start = self.expect_punct_regex(Punct::LParen)?.start;
        let mut args = Vec::new();
        while !self.is_punct(Punct::RParen) {
            if self.is_punct(Punct::Ellipsis) {
                let spread_start = self.advance(Goal::Regex)?.span.start;
                let argument = self.parse_assignment_expression()?;
                let span = Span::new(spread_start, argument.span().end);
                args.push(Argument::Spread(Box::new(SpreadElement { span, argument })));
            } else {
                args.push(Argument::Expr(self.parse_assignment_expression()?));
            }
            if !self.is_punct(Punct::RParen) {
                self.expect_punct_regex(Punct::Comma)?;
            }
        }
        let end = self.expect_punct(Punct::RParen)?.end;
        Ok((args, Span::new(start, end)))
    }

    pub(crate) fn parse_template_literal(&mut self) -> ParseResult<TemplateLiteral> {
        let _guard = self.enter()?;
        let start = self.cur_start();
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();

        let first_span = self.cur().span;
        let part = Self::template_part_of(&self.cur().kind).clone();
        let tail = part.tail;
        quasis.push(self.build_template_element(first_span, &part));
        if tail {
            self.advance_default()?;
            let end = quasis.last().unwrap().span.end;
            return Ok(TemplateLiteral { span: Span::new(start, end), quasis, expressions });
        }
        self.advance(Goal::Regex)?;

        loop {
            expressions.push(self.parse_expression()?);
            if !self.is_punct(Punct::RBrace) {
                return Err(self.unexpected("'}'"));
            }
            self.advance_template_part_token()?;
            let quasi_span = self.cur().span;
            let part = Self::template_part_of(&self.cur().kind).clone();
            let tail = part.tail;
            quasis.push(self.build_template_element(quasi_span, &part));
            self.advance(Goal::Regex)?;
            if tail {
                break;
            }
        }
        let end = quasis.last().unwrap().span.end;
        Ok(TemplateLiteral { span: Span::new(start, end), quasis, expressions })
    }

    /// Re-enters template scanning at the `}` the parser has determined
    /// closes a `${ ... }` substitution, rather than reading it as an
    /// ordinary punctuator.
    fn advance_template_part_token(&mut self) -> ParseResult<()> {
        self.tokens.advance_template_part()?;
        Ok(())
    }
}
