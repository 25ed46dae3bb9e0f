use super::Parser;
use ecma_ast::{
    ArrayExpressionElement, ArrayPattern, AssignmentPattern, AssignmentProperty, Expr, GetSpan,
    Identifier, ObjectExpressionProperty, ObjectPattern, ObjectPatternProperty, Pat, PropertyKey,
    PropertyKind, RestElement,
};
use ecma_diagnostics::ParseResult;
use ecma_span::Span;
use ecma_token::Punct;

impl<'a> Parser<'a> {
    /// Parses a `BindingIdentifier`, rejecting strict-reserved words and
    /// `yield`/`await` where the current mode forbids them as binding names.
    pub(crate) fn parse_binding_identifier(&mut self) -> ParseResult<Box<Identifier>> {
        let offset = self.cur_start();
        let Some(name) = self.identifier_name().map(String::from) else {
            return Err(self.unexpected("identifier"));
        };
        self.check_binding_name(&name, offset)?;
        let span = self.cur().span;
        self.advance_default()?;
        Ok(Box::new(Identifier { span, name: name.into_boxed_str() }))
    }

    /// Early-error checks shared by every binding position (spec §4.3):
    /// `arguments`/`eval` and the strict-reserved set are illegal binding
    /// names under `strict`; `yield` is illegal inside a generator;
    /// `await` is illegal inside an async function or module top level.
    pub(crate) fn check_binding_name(&self, name: &str, offset: u32) -> ParseResult<()> {
        if self.state.strict && (name == "eval" || name == "arguments") {
            return Err(self.early_error_at(offset, format!("'{name}' cannot be a binding name in strict mode")));
        }
        if self.state.strict && ecma_token::STRICT_RESERVED_WORDS.contains(name) {
            return Err(self.early_error_at(offset, format!("'{name}' is a reserved word in strict mode")));
        }
        if name == "yield" && (self.state.strict || self.state.in_generator) {
            return Err(self.early_error_at(offset, "'yield' cannot be a binding name here"));
        }
        if name == "await" && (self.state.module || self.state.in_async) {
            return Err(self.early_error_at(offset, "'await' cannot be a binding name here"));
        }
        Ok(())
    }

    /// `BindingElement`: a full binding pattern with an optional default.
    pub(crate) fn parse_binding_element(&mut self) -> ParseResult<Pat> {
        let target = self.parse_binding_target()?;
        self.parse_binding_default(target)
    }

    pub(crate) fn parse_binding_default(&mut self, target: Pat) -> ParseResult<Pat> {
        if self.eat_punct(Punct::Eq)? {
            let right = self.parse_assignment_expression()?;
            let span = Span::new(target.span().start, right.span().end);
            Ok(Pat::Assignment(Box::new(AssignmentPattern { span, left: target, right })))
        } else {
            Ok(target)
        }
    }

    /// `BindingIdentifier | ArrayBindingPattern | ObjectBindingPattern`,
    /// without the trailing default — see [`Parser::parse_binding_element`].
    pub(crate) fn parse_binding_target(&mut self) -> ParseResult<Pat> {
        if self.is_punct(Punct::LBracket) {
            self.parse_array_binding_pattern()
        } else if self.is_punct(Punct::LBrace) {
            self.parse_object_binding_pattern()
        } else {
            Ok(Pat::Identifier(self.parse_binding_identifier()?))
        }
    }

    fn parse_array_binding_pattern(&mut self) -> ParseResult<Pat> {
        let _guard = self.enter()?;
        let start = self.expect_punct(Punct::LBracket)?.start;
        let mut elements = Vec::new();
        while !self.is_punct(Punct::RBracket) {
            if self.eat_punct(Punct::Comma)? {
                elements.push(None);
                continue;
            }
            if self.is_punct(Punct::Ellipsis) {
                elements.push(Some(self.parse_rest_element()?));
                break;
            }
            elements.push(Some(self.parse_binding_element()?));
            if !self.is_punct(Punct::RBracket) {
                self.expect_punct(Punct::Comma)?;
            }
        }
        let end = self.expect_punct(Punct::RBracket)?.end;
        Ok(Pat::Array(Box::new(ArrayPattern { span: Span::new(start, end), elements })))
    }

    fn parse_rest_element(&mut self) -> ParseResult<Pat> {
        let start = self.expect_punct(Punct::Ellipsis)?.start;
        let argument = self.parse_binding_target()?;
        let span = Span::new(start, argument.span().end);
        Ok(Pat::Rest(Box::new(RestElement { span, argument })))
    }

    fn parse_object_binding_pattern(&mut self) -> ParseResult<Pat> {
        let _guard = self.enter()?;
        let start = self.expect_punct(Punct::LBrace)?.start;
        let mut properties = Vec::new();
        while !self.is_punct(Punct::RBrace) {
            if self.is_punct(Punct::Ellipsis) {
                let rest_start = self.advance_default()?.span.start;
                let argument = Pat::Identifier(self.parse_binding_identifier()?);
                let span = Span::new(rest_start, argument.span().end);
                properties.push(ObjectPatternProperty::Rest(Box::new(RestElement { span, argument })));
            } else {
                let prop_start = self.cur_start();
                let (key, computed) = self.parse_property_key()?;
                let shorthand = !self.is_punct(Punct::Colon);
                let value = if shorthand {
                    let id = match &key {
                        PropertyKey::Identifier(id) => id.clone(),
                        _ => return Err(self.unexpected("identifier")),
                    };
                    self.check_binding_name(&id.name, prop_start)?;
                    let target = Pat::Identifier(id);
                    self.parse_binding_default(target)?
                } else {
                    self.expect_punct(Punct::Colon)?;
                    self.parse_binding_element()?
                };
                let span = Span::new(prop_start, value.span().end);
                properties.push(ObjectPatternProperty::Property(Box::new(AssignmentProperty {
                    span,
                    key,
                    value,
                    computed,
                    shorthand,
                })));
            }
            if !self.is_punct(Punct::RBrace) {
                self.expect_punct(Punct::Comma)?;
            }
        }
        let end = self.expect_punct(Punct::RBrace)?.end;
        Ok(Pat::Object(Box::new(ObjectPattern { span: Span::new(start, end), properties })))
    }

    /// Parses a property/element key shared by object literals, object
    /// patterns, and class members: an identifier, string, number, or a
    /// computed `[expr]` key. Returns whether the key was computed.
    pub(crate) fn parse_property_key(&mut self) -> ParseResult<(PropertyKey, bool)> {
        if self.eat_punct(Punct::LBracket)? {
            let expr = self.parse_assignment_expression()?;
            self.expect_punct(Punct::RBracket)?;
            return Ok((PropertyKey::Expr(Box::new(expr)), true));
        }
        if let Some(name) = self.identifier_name().map(String::from) {
            let span = self.cur().span;
            self.advance_default()?;
            return Ok((PropertyKey::Identifier(Box::new(Identifier { span, name: name.into_boxed_str() })), false));
        }
        if let Some(kw) = self.current_keyword() {
            let span = self.cur().span;
            self.advance_default()?;
            return Ok((
                PropertyKey::Identifier(Box::new(Identifier { span, name: kw.as_str().into() })),
                false,
            ));
        }
        match self.cur().kind.clone() {
            ecma_token::TokenKind::StringLiteral(tok) => {
                let span = self.cur().span;
                let lit = self.build_string_literal(span, &tok);
                self.advance_default()?;
                Ok((PropertyKey::Literal(Box::new(lit)), false))
            }
            ecma_token::TokenKind::NumericLiteral(tok) => {
                let span = self.cur().span;
                let lit = self.build_numeric_literal(span, &tok);
                self.advance_default()?;
                Ok((PropertyKey::Literal(Box::new(lit)), false))
            }
            _ => Err(self.unexpected("property name")),
        }
    }

    fn current_keyword(&self) -> Option<ecma_token::Keyword> {
        match &self.cur().kind {
            ecma_token::TokenKind::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    /// Reinterprets an already-parsed expression as an assignment target,
    /// the mechanism this parser uses instead of a dedicated cover grammar:
    /// array/object literals become array/object patterns, a plain member
    /// expression is left as `Pat::Expr`, and anything else is an early
    /// error (spec §4.2's "AssignmentTargetType" check).
    pub(crate) fn expr_to_pattern(&self, expr: Expr) -> ParseResult<Pat> {
        match expr {
            Expr::Identifier(id) => {
                self.check_binding_name(&id.name, id.span.start)?;
                Ok(Pat::Identifier(id))
            }
            Expr::Member(_) => Ok(Pat::Expr(Box::new(expr))),
            Expr::Array(arr) => {
                let span = arr.span;
                let mut elements = Vec::with_capacity(arr.elements.len());
                for el in arr.elements {
                    elements.push(match el {
                        None => None,
                        Some(ArrayExpressionElement::Spread(s)) => {
                            let argument = self.expr_to_pattern(s.argument)?;
                            let span = Span::new(s.span.start, argument.span().end);
                            Some(Pat::Rest(Box::new(RestElement { span, argument })))
                        }
                        Some(ArrayExpressionElement::Expr(e)) => Some(self.expr_to_assignable_element(e)?),
                    });
                }
                Ok(Pat::Array(Box::new(ArrayPattern { span, elements })))
            }
            Expr::Object(obj) => {
                let span = obj.span;
                let mut properties = Vec::with_capacity(obj.properties.len());
                for prop in obj.properties {
                    match prop {
                        ObjectExpressionProperty::Spread(s) => {
                            let argument = self.expr_to_pattern(s.argument)?;
                            let span = Span::new(s.span.start, argument.span().end);
                            properties.push(ObjectPatternProperty::Rest(Box::new(RestElement { span, argument })));
                        }
                        ObjectExpressionProperty::Property(p) => {
                            if p.kind != PropertyKind::Init || p.method {
                                return Err(self.early_error_at(p.span.start, "invalid destructuring target"));
                            }
                            let value = self.expr_to_assignable_element(p.value)?;
                            properties.push(ObjectPatternProperty::Property(Box::new(AssignmentProperty {
                                span: p.span,
                                key: p.key,
                                value,
                                computed: p.computed,
                                shorthand: p.shorthand,
                            })));
                        }
                    }
                }
                Ok(Pat::Object(Box::new(ObjectPattern { span, properties })))
            }
            Expr::Assignment(assign) if assign.operator == ecma_ast::AssignmentOperator::Assign => {
                Ok(Pat::Assignment(Box::new(AssignmentPattern {
                    span: assign.span,
                    left: assign.left,
                    right: assign.right,
                })))
            }
            other => Err(self.early_error_at(other.span().start, "invalid assignment target")),
        }
    }

    /// An array/object literal element, reinterpreted as a pattern — either
    /// a bare assignable expression or one already carrying a `= default`
    /// (parsed originally as an `AssignmentExpression`).
    fn expr_to_assignable_element(&self, expr: Expr) -> ParseResult<Pat> {
        self.expr_to_pattern(expr)
    }
}
