use super::Parser;
use ecma_ast::{
    ClassBody, ClassDeclaration, ClassExpression, ClassMember, Expr, GetSpan, MethodDefinition,
    MethodKind, PrivateIdentifier,
};
use ecma_diagnostics::ParseResult;
use ecma_span::Span;
use ecma_token::{Keyword, Punct, TokenKind};

impl<'a> Parser<'a> {
    pub(crate) fn parse_class_declaration(&mut self, require_id: bool) -> ParseResult<ClassDeclaration> {
        let _guard = self.enter()?;
        let start = self.expect_keyword(Keyword::Class)?.start;
        let saved_strict = self.state.strict;
        self.state.strict = true;
        let result = (|| -> ParseResult<ClassDeclaration> {
            let id = if self.is_identifier() {
                Some(self.parse_binding_identifier()?)
            } else if require_id {
                return Err(self.unexpected("class name"));
            } else {
                None
            };
            let super_class = self.parse_class_heritage()?;
            let body = self.parse_class_body()?;
            let span = Span::new(start, body.span.end);
            Ok(ClassDeclaration { span, id, super_class, body: Box::new(body) })
        })();
        self.state.strict = saved_strict;
        result
    }

    pub(crate) fn parse_class_expression(&mut self) -> ParseResult<Expr> {
        let _guard = self.enter()?;
        let start = self.expect_keyword(Keyword::Class)?.start;
        let saved_strict = self.state.strict;
        self.state.strict = true;
        let result = (|| -> ParseResult<Expr> {
            let id = if self.is_identifier() { Some(self.parse_binding_identifier()?) } else { None };
            let super_class = self.parse_class_heritage()?;
            let body = self.parse_class_body()?;
            let span = Span::new(start, body.span.end);
            Ok(Expr::Class(Box::new(ClassExpression { span, id, super_class, body: Box::new(body) })))
        })();
        self.state.strict = saved_strict;
        result
    }

    fn parse_class_heritage(&mut self) -> ParseResult<Option<Expr>> {
        if self.eat_keyword(Keyword::Extends)? {
            Ok(Some(self.parse_lhs_expression()?))
        } else {
            Ok(None)
        }
    }

    fn parse_class_body(&mut self) -> ParseResult<ClassBody> {
        let _guard = self.enter()?;
        let start = self.expect_punct(Punct::LBrace)?.start;
        self.push_class_scope();
        let mut body = Vec::new();
        let mut has_constructor = false;
        let result = (|| -> ParseResult<()> {
            while !self.is_punct(Punct::RBrace) {
                if self.eat_punct(Punct::Semi)? {
                    continue;
                }
                body.push(self.parse_class_member(&mut has_constructor)?);
            }
            Ok(())
        })();
        self.pop_class_scope();
        result?;
        let end = self.expect_punct(Punct::RBrace)?.end;
        Ok(ClassBody { span: Span::new(start, end), body })
    }

    /// True when a leading `static` is the `static` modifier rather than a
    /// member literally named `static` (`static() {}`, `static = 1`).
    fn static_is_modifier(&mut self) -> ParseResult<bool> {
        if !self.is_identifier_named("static") {
            return Ok(false);
        }
        let checkpoint = self.tokens.checkpoint();
        self.advance_default()?;
        let is_modifier = !self.is_punct(Punct::LParen)
            && !self.is_punct(Punct::Eq)
            && !self.is_punct(Punct::Semi)
            && !self.is_punct(Punct::RBrace);
        self.tokens.restore(checkpoint);
        Ok(is_modifier)
    }

    fn class_member_async_modifier(&mut self) -> ParseResult<bool> {
        if !self.is_identifier_named("async") {
            return Ok(false);
        }
        let checkpoint = self.tokens.checkpoint();
        self.advance_default()?;
        let matched = !self.preceding_line_terminator()
            && !self.is_punct(Punct::LParen)
            && !self.is_punct(Punct::Eq)
            && !self.is_punct(Punct::Semi)
            && !self.is_punct(Punct::RBrace);
        self.tokens.restore(checkpoint);
        Ok(matched)
    }

    fn class_member_accessor_modifier(&mut self) -> ParseResult<Option<bool>> {
        if !(self.is_identifier_named("get") || self.is_identifier_named("set")) {
            return Ok(None);
        }
        let is_getter = self.is_identifier_named("get");
        let checkpoint = self.tokens.checkpoint();
        self.advance_default()?;
        let is_accessor = !self.is_punct(Punct::LParen)
            && !self.is_punct(Punct::Eq)
            && !self.is_punct(Punct::Semi)
            && !self.is_punct(Punct::RBrace);
        self.tokens.restore(checkpoint);
        Ok(is_accessor.then_some(is_getter))
    }

    fn parse_class_member(&mut self, has_constructor: &mut bool) -> ParseResult<ClassMember> {
        let _guard = self.enter()?;
        let start = self.cur_start();

        let is_static = self.static_is_modifier()?;
        if is_static {
            self.advance_default()?;
            if self.is_punct(Punct::LBrace) {
                return self.parse_static_block(start);
            }
        }

        let is_async = self.class_member_async_modifier()?;
        if is_async {
            self.advance_default()?;
        }
        let is_generator = self.eat_punct(Punct::Star)?;

        let accessor = if !is_async && !is_generator { self.class_member_accessor_modifier()? } else { None };
        if let Some(is_getter) = accessor {
            self.advance_default()?; // `get` / `set`
            let (key, computed) = self.parse_class_member_key()?;
            let value = self.parse_method_function(false, false)?;
            let span = Span::new(start, value.span().end);
            let kind = if is_getter { MethodKind::Get } else { MethodKind::Set };
            return Ok(ClassMember::Method(Box::new(MethodDefinition {
                span,
                key,
                value: Box::new(value),
                kind,
                computed,
                is_static,
            })));
        }

        let (key, computed) = self.parse_class_member_key()?;

        if self.is_punct(Punct::LParen) {
            let is_constructor_name = !computed
                && !is_static
                && !is_async
                && !is_generator
                && matches!(&key, ecma_ast::PropertyKey::Identifier(id) if id.name.as_ref() == "constructor");
            if is_constructor_name {
                if *has_constructor {
                    return Err(self.early_error_at(start, "a class may only have one constructor"));
                }
                *has_constructor = true;
            }
            let value = self.parse_method_function(is_generator, is_async)?;
            let span = Span::new(start, value.span().end);
            let kind = if is_constructor_name { MethodKind::Constructor } else { MethodKind::Method };
            return Ok(ClassMember::Method(Box::new(MethodDefinition {
                span,
                key,
                value: Box::new(value),
                kind,
                computed,
                is_static,
            })));
        }

        if is_async || is_generator {
            return Err(self.unexpected("'('"));
        }

        if !computed {
            if is_static && matches!(&key, ecma_ast::PropertyKey::Identifier(id) if id.name.as_ref() == "prototype") {
                return Err(self.early_error_at(start, "classes may not have a static property named 'prototype'"));
            }
            if !is_static && matches!(&key, ecma_ast::PropertyKey::Identifier(id) if id.name.as_ref() == "constructor") {
                return Err(self.early_error_at(start, "classes may not have a field named 'constructor'"));
            }
        }

        let value = if self.eat_punct(Punct::Eq)? { Some(self.parse_assignment_expression()?) } else { None };
        let end = value.as_ref().map(|v| v.span().end).unwrap_or_else(|| self.cur_start());
        self.consume_semicolon()?;
        Ok(ClassMember::Property(Box::new(ecma_ast::PropertyDefinition {
            span: Span::new(start, end),
            key,
            value,
            computed,
            is_static,
        })))
    }

    fn parse_static_block(&mut self, start: u32) -> ParseResult<ClassMember> {
        let mut next_state = self.state.enter_function(false, false);
        // A static block is its own scope for `await`/arguments purposes but
        // is not itself a function body: `return` is illegal inside one.
        next_state.in_function = false;
        let saved = std::mem::replace(&mut self.state, next_state);
        let body = self.parse_block_statement();
        self.state = saved;
        let body = body?;
        Ok(ClassMember::StaticBlock(Box::new(ecma_ast::StaticBlock {
            span: Span::new(start, body.span.end),
            body: body.body,
        })))
    }

    /// A class member key, extending [`Parser::parse_property_key`] with
    /// `#privateName`, which is illegal everywhere else a property key
    /// appears.
    fn parse_class_member_key(&mut self) -> ParseResult<(ecma_ast::PropertyKey, bool)> {
        if let TokenKind::PrivateIdentifier(name) = self.cur().kind.clone() {
            let span = self.cur().span;
            self.advance_default()?;
            self.declare_private_name(&name, span.start)?;
            return Ok((
                ecma_ast::PropertyKey::PrivateIdentifier(Box::new(PrivateIdentifier { span, name: name.as_ref().into() })),
                false,
            ));
        }
        self.parse_property_key()
    }
}
