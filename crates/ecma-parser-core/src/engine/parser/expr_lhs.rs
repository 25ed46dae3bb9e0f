use super::Parser;
use ecma_ast::{
    Callee, CallExpression, ChainExpression, Expr, GetSpan, Identifier, MemberExpression,
    MemberObject, MemberProperty, PrivateIdentifier, Super, TaggedTemplateExpression,
};
use ecma_diagnostics::ParseResult;
use ecma_span::Span;
use ecma_token::{Keyword, Punct, TokenKind};

impl<'a> Parser<'a> {
    /// `LeftHandSideExpression`: `NewExpression`/`PrimaryExpression` (or a
    /// bare `super` reference) followed by any chain of member accesses,
    /// calls, and tagged templates. Optional-chaining links (`?.`) anywhere
    /// in the chain cause the whole chain to be wrapped in a single
    /// [`ChainExpression`] once it ends, matching Acorn's convention of
    /// wrapping only the outermost node.
    pub(crate) fn parse_lhs_expression(&mut self) -> ParseResult<Expr> {
        let _guard = self.enter()?;
        let start = self.cur_start();
        let mut has_optional = false;

        let mut expr = if self.is_keyword(Keyword::Super) {
            let super_span = self.advance_default()?.span;
            let sup = Super { span: super_span };
            if self.is_punct(Punct::LParen) {
                let (arguments, args_span) = self.parse_arguments()?;
                Expr::Call(Box::new(CallExpression {
                    span: Span::new(start, args_span.end),
                    callee: Callee::Super(Box::new(sup)),
                    arguments,
                    optional: false,
                }))
            } else if self.is_punct(Punct::Dot) || self.is_punct(Punct::LBracket) {
                self.parse_member_tail_from_super(start, sup)?
            } else {
                return Err(self.unexpected("'.', '[', or '('"));
            }
        } else if self.is_keyword(Keyword::New) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };

        loop {
            if self.is_punct(Punct::Dot) {
                self.advance_default()?;
                expr = self.build_member_dot(start, expr, false)?;
            } else if self.is_punct(Punct::QuestionDot) {
                has_optional = true;
                self.advance_default()?;
                if self.is_punct(Punct::LParen) {
                    let (arguments, span) = self.parse_arguments()?;
                    expr = Expr::Call(Box::new(CallExpression {
                        span: Span::new(start, span.end),
                        callee: Callee::Expr(Box::new(expr)),
                        arguments,
                        optional: true,
                    }));
                } else if self.is_punct(Punct::LBracket) {
                    self.advance_default()?;
                    let property = self.parse_expression()?;
                    let end = self.expect_punct(Punct::RBracket)?.end;
                    expr = Expr::Member(Box::new(MemberExpression {
                        span: Span::new(start, end),
                        object: MemberObject::Expr(Box::new(expr)),
                        property: MemberProperty::Expr(Box::new(property)),
                        computed: true,
                        optional: true,
                    }));
                } else {
                    expr = self.build_member_dot(start, expr, true)?;
                }
            } else if self.is_punct(Punct::LBracket) {
                self.advance_default()?;
                let property = self.parse_expression()?;
                let end = self.expect_punct(Punct::RBracket)?.end;
                expr = Expr::Member(Box::new(MemberExpression {
                    span: Span::new(start, end),
                    object: MemberObject::Expr(Box::new(expr)),
                    property: MemberProperty::Expr(Box::new(property)),
                    computed: true,
                    optional: false,
                }));
            } else if self.is_punct(Punct::LParen) {
                let (arguments, span) = self.parse_arguments()?;
                expr = Expr::Call(Box::new(CallExpression {
                    span: Span::new(start, span.end),
                    callee: Callee::Expr(Box::new(expr)),
                    arguments,
                    optional: false,
                }));
            } else if matches!(
                self.cur().kind,
                TokenKind::NoSubstitutionTemplate(_) | TokenKind::TemplateHead(_)
            ) {
                if has_optional {
                    return Err(self.early_error_at(self.cur_start(), "tagged templates cannot appear in an optional chain"));
                }
                let quasi = self.parse_template_literal()?;
                let span = Span::new(start, quasi.span.end);
                expr = Expr::TaggedTemplate(Box::new(TaggedTemplateExpression { span, tag: expr, quasi: Box::new(quasi) }));
            } else {
                break;
            }
        }

        if has_optional {
            let span = expr.span();
            expr = Expr::Chain(Box::new(ChainExpression { span, expression: expr }));
        }
        Ok(expr)
    }

    fn parse_member_tail_from_super(&mut self, start: u32, sup: Super) -> ParseResult<Expr> {
        if self.eat_punct(Punct::Dot)? {
            let property = self.parse_identifier_name_any()?;
            let end = property.span.end;
            Ok(Expr::Member(Box::new(MemberExpression {
                span: Span::new(start, end),
                object: MemberObject::Super(Box::new(sup)),
                property: MemberProperty::Identifier(Box::new(property)),
                computed: false,
                optional: false,
            })))
        } else {
            self.expect_punct(Punct::LBracket)?;
            let property = self.parse_expression()?;
            let end = self.expect_punct(Punct::RBracket)?.end;
            Ok(Expr::Member(Box::new(MemberExpression {
                span: Span::new(start, end),
                object: MemberObject::Super(Box::new(sup)),
                property: MemberProperty::Expr(Box::new(property)),
                computed: true,
                optional: false,
            })))
        }
    }

    /// Builds a dot-access (or `?.` dot-access) member expression; the `.`
    /// or `?.` itself has already been consumed by the caller, and the
    /// current token is the property name — an ordinary `IdentifierName`
    /// (any identifier or keyword spelling) or a `#private` name.
    fn build_member_dot(&mut self, start: u32, object: Expr, optional: bool) -> ParseResult<Expr> {
        if let TokenKind::PrivateIdentifier(name) = self.cur().kind.clone() {
            let span = self.cur().span;
            self.advance_default()?;
            self.record_private_use(&name, span.start);
            return Ok(Expr::Member(Box::new(MemberExpression {
                span: Span::new(start, span.end),
                object: MemberObject::Expr(Box::new(object)),
                property: MemberProperty::PrivateIdentifier(Box::new(PrivateIdentifier { span, name: name.as_ref().into() })),
                computed: false,
                optional,
            })));
        }
        let property = self.parse_identifier_name_any()?;
        let end = property.span.end;
        Ok(Expr::Member(Box::new(MemberExpression {
            span: Span::new(start, end),
            object: MemberObject::Expr(Box::new(object)),
            property: MemberProperty::Identifier(Box::new(property)),
            computed: false,
            optional,
        })))
    }

    /// `IdentifierName`: unlike a binding or reference identifier, any
    /// reserved word is a legal spelling here (`obj.class`, `obj.new`) since
    /// property names are never resolved as bindings.
    fn parse_identifier_name_any(&mut self) -> ParseResult<Identifier> {
        let span = self.cur().span;
        if let Some(name) = self.identifier_name() {
            let name = name.to_string();
            self.advance_default()?;
            return Ok(Identifier { span, name: name.into_boxed_str() });
        }
        if let TokenKind::Keyword(kw) = self.cur().kind {
            self.advance_default()?;
            return Ok(Identifier { span, name: kw.as_str().into() });
        }
        Err(self.unexpected("identifier"))
    }

    /// The `MemberExpression` a `new` keyword applies to: the same
    /// dot/bracket chain as [`Parser::parse_lhs_expression`], but never
    /// consumes a call's `(...)` — those belong to `new`'s own argument list
    /// — and never an optional-chaining link, which `NewExpression` forbids
    /// as a direct child.
    pub(crate) fn parse_new_callee(&mut self) -> ParseResult<Expr> {
        let _guard = self.enter()?;
        let start = self.cur_start();
        let mut expr = if self.is_keyword(Keyword::New) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        loop {
            if self.is_punct(Punct::Dot) {
                self.advance_default()?;
                expr = self.build_member_dot(start, expr, false)?;
            } else if self.is_punct(Punct::LBracket) {
                self.advance_default()?;
                let property = self.parse_expression()?;
                let end = self.expect_punct(Punct::RBracket)?.end;
                expr = Expr::Member(Box::new(MemberExpression {
                    span: Span::new(start, end),
                    object: MemberObject::Expr(Box::new(expr)),
                    property: MemberProperty::Expr(Box::new(property)),
                    computed: true,
                    optional: false,
                }));
            } else {
                break;
            }
        }
        Ok(expr)
    }
}
