use super::Parser;
use ecma_ast::{
    AssignmentExpression, AssignmentOperator, AwaitExpression, BinaryExpression, BinaryLeft,
    BinaryOperator, ConditionalExpression, Expr, GetSpan, LogicalExpression, LogicalOperator, Pat,
    SequenceExpression, UnaryExpression, UnaryOperator, UpdateExpression, UpdateOperator,
    YieldExpression,
};
use ecma_diagnostics::ParseResult;
use ecma_lexer::Goal;
use ecma_span::Span;
use ecma_token::{Keyword, Punct, TokenKind};

/// A binary-precedence-table entry, distinguishing the two expression node
/// kinds ECMA-262 splits `&&`/`||`/`??` (`LogicalExpression`) away from every
/// other binary operator (`BinaryExpression`) even though they share one
/// precedence-climbing implementation here.
enum BinOp {
    Binary(BinaryOperator),
    Logical(LogicalOperator),
}

impl<'a> Parser<'a> {
    /// `Expression`: one `AssignmentExpression`, or several joined by `,`
    /// into a `SequenceExpression`.
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expr> {
        let _guard = self.enter()?;
        let start = self.cur_start();
        let first = self.parse_assignment_expression()?;
        if !self.is_punct(Punct::Comma) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat_punct_regex(Punct::Comma)? {
            expressions.push(self.parse_assignment_expression()?);
        }
        let end = expressions.last().expect("just pushed").span().end;
        Ok(Expr::Sequence(Box::new(SequenceExpression { span: Span::new(start, end), expressions })))
    }

    /// `AssignmentExpression`: arrow functions (identifier or cover-grammar
    /// forms), `yield`, plain assignment, or (falling through)
    /// `ConditionalExpression`.
    pub(crate) fn parse_assignment_expression(&mut self) -> ParseResult<Expr> {
        let _guard = self.enter()?;

        if self.state.in_generator && self.is_identifier_named("yield") {
            return self.parse_yield_expression();
        }
        if self.is_identifier_arrow_start()? {
            return self.parse_identifier_arrow();
        }

        let start = self.cur_start();
        let left = self.parse_conditional_expression()?;

        let Some(operator) = self.current_assignment_operator() else {
            return Ok(left);
        };
        self.advance(Goal::Regex)?;
        let target = if operator == AssignmentOperator::Assign {
            self.expr_to_pattern(left)?
        } else {
            self.check_simple_assignment_target(left, start)?
        };
        let right = self.parse_assignment_expression()?;
        let span = Span::new(start, right.span().end);
        Ok(Expr::Assignment(Box::new(AssignmentExpression { span, operator, left: target, right })))
    }

    fn current_assignment_operator(&self) -> Option<AssignmentOperator> {
        use AssignmentOperator::*;
        let TokenKind::Punct(p) = self.cur().kind else { return None };
        Some(match p {
            Punct::Eq => Assign,
            Punct::PlusEq => PlusAssign,
            Punct::MinusEq => MinusAssign,
            Punct::StarEq => TimesAssign,
            Punct::SlashEq => DivAssign,
            Punct::PercentEq => ModAssign,
            Punct::StarStarEq => ExponentAssign,
            Punct::LtLtEq => ShiftLeftAssign,
            Punct::GtGtEq => ShiftRightAssign,
            Punct::GtGtGtEq => UnsignedShiftRightAssign,
            Punct::AmpEq => BitAndAssign,
            Punct::PipeEq => BitOrAssign,
            Punct::CaretEq => BitXorAssign,
            Punct::AmpAmpEq => AndAssign,
            Punct::PipePipeEq => OrAssign,
            Punct::QuestionQuestionEq => CoalesceAssign,
            _ => return None,
        })
    }

    /// A compound assignment (`+=`, `&&=`, ...) only ever targets a plain
    /// identifier or member expression, never a destructuring pattern — `=`
    /// is the only operator [`Parser::expr_to_pattern`] needs to handle.
    fn check_simple_assignment_target(&self, expr: Expr, offset: u32) -> ParseResult<Pat> {
        match expr {
            Expr::Identifier(id) => {
                self.check_binding_name(&id.name, offset)?;
                Ok(Pat::Identifier(id))
            }
            Expr::Member(_) => Ok(Pat::Expr(Box::new(expr))),
            _ => Err(self.early_error_at(offset, "invalid assignment target")),
        }
    }

    fn is_identifier_arrow_start(&mut self) -> ParseResult<bool> {
        if !self.is_identifier() {
            return Ok(false);
        }
        let checkpoint = self.tokens.checkpoint();
        self.advance_default()?;
        let matched = self.is_punct(Punct::Arrow) && !self.preceding_line_terminator();
        self.tokens.restore(checkpoint);
        Ok(matched)
    }

    fn parse_identifier_arrow(&mut self) -> ParseResult<Expr> {
        let start = self.cur_start();
        let id = self.parse_binding_identifier()?;
        self.finish_arrow_function(start, vec![Pat::Identifier(id)], false)
    }

    /// `ConditionalExpression`: a `ShortCircuitExpression` (the binary/
    /// logical precedence climb) optionally followed by `? ... : ...`.
    pub(crate) fn parse_conditional_expression(&mut self) -> ParseResult<Expr> {
        let _guard = self.enter()?;
        let start = self.cur_start();
        let test = self.parse_binary_expression(1)?;
        self.check_no_nullish_mixing(&test)?;
        if !self.is_punct(Punct::Question) {
            return Ok(test);
        }
        self.advance(Goal::Regex)?;
        let saved_allow_in = self.state.allow_in;
        self.state.allow_in = true;
        let consequent = self.parse_assignment_expression()?;
        self.state.allow_in = saved_allow_in;
        if !self.is_punct(Punct::Colon) {
            return Err(self.unexpected(Some(":")));
        }
        self.advance(Goal::Regex)?;
        let alternate = self.parse_assignment_expression()?;
        let span = Span::new(start, alternate.span().end);
        Ok(Expr::Conditional(Box::new(ConditionalExpression { span, test, consequent, alternate })))
    }

    /// ECMA-262 forbids `??` from appearing directly adjacent to `&&`/`||`
    /// without parentheses disambiguating which binds first. Since
    /// parenthesization is invisible once a tree is built, this is checked
    /// right after parsing, against the immediate parent/child operator
    /// pairs the climb in [`Parser::parse_binary_expression`] can produce —
    /// any case that is actually parenthesized starts a fresh
    /// `PrimaryExpression` and never reaches this check as an immediate
    /// child.
    fn check_no_nullish_mixing(&self, expr: &Expr) -> ParseResult<()> {
        let Expr::Logical(logical) = expr else { return Ok(()) };
        let conflicts = |child: &Expr| {
            matches!(child, Expr::Logical(c) if (logical.operator == LogicalOperator::Coalesce) != (c.operator == LogicalOperator::Coalesce))
        };
        if conflicts(&logical.left) || conflicts(&logical.right) {
            return Err(self.early_error_at(logical.span.start, "'??' cannot be mixed with '&&' or '||' without parentheses"));
        }
        self.check_no_nullish_mixing(&logical.left)?;
        self.check_no_nullish_mixing(&logical.right)
    }

    /// Precedence-climbing core for every binary and logical operator except
    /// `**`, which is right-associative and forbids a bare unary expression
    /// as its left operand — both handled in [`Parser::parse_exponentiation`]
    /// below this in the climb.
    fn parse_binary_expression(&mut self, min_prec: u8) -> ParseResult<Expr> {
        let _guard = self.enter()?;
        let mut left = if let TokenKind::PrivateIdentifier(_) = self.cur().kind {
            self.parse_private_in_expression()?
        } else {
            self.parse_exponentiation()?
        };
        loop {
            let Some((op, prec)) = self.peek_binary_operator() else { break };
            if prec < min_prec {
                break;
            }
            self.advance(Goal::Regex)?;
            let right = self.parse_binary_expression(prec + 1)?;
            let span = Span::new(left.span().start, right.span().end);
            left = match op {
                BinOp::Binary(operator) => Expr::Binary(Box::new(BinaryExpression {
                    span,
                    operator,
                    left: BinaryLeft::Expr(Box::new(left)),
                    right,
                })),
                BinOp::Logical(operator) => {
                    Expr::Logical(Box::new(LogicalExpression { span, operator, left, right }))
                }
            };
        }
        Ok(left)
    }

    /// `PrivateIdentifier in ShiftExpression` — the ergonomic brand check
    /// (`#x in obj`). A `#private` name is only ever legal here or as a
    /// member-access property (`this.#x`, handled in `expr_lhs.rs`); both
    /// paths defer the declared-name check to `check_private_names` since
    /// the declaration may not have been seen yet.
    fn parse_private_in_expression(&mut self) -> ParseResult<Expr> {
        let TokenKind::PrivateIdentifier(name) = self.cur().kind.clone() else {
            unreachable!("caller checked for PrivateIdentifier");
        };
        let span = self.cur().span;
        self.advance_default()?;
        self.record_private_use(&name, span.start);
        if !self.is_keyword(Keyword::In) || !self.state.allow_in {
            return Err(self.unexpected("'in'"));
        }
        self.advance(Goal::Regex)?;
        let right = self.parse_binary_expression(9)?;
        let full_span = Span::new(span.start, right.span().end);
        Ok(Expr::Binary(Box::new(BinaryExpression {
            span: full_span,
            operator: BinaryOperator::In,
            left: BinaryLeft::PrivateIdentifier(Box::new(ecma_ast::PrivateIdentifier {
                span,
                name: name.as_ref().into(),
            })),
            right,
        })))
    }

    fn peek_binary_operator(&self) -> Option<(BinOp, u8)> {
        use BinaryOperator::*;
        match &self.cur().kind {
            TokenKind::Punct(p) => Some(match p {
                Punct::QuestionQuestion => (BinOp::Logical(LogicalOperator::Coalesce), 1),
                Punct::PipePipe => (BinOp::Logical(LogicalOperator::Or), 2),
                Punct::AmpAmp => (BinOp::Logical(LogicalOperator::And), 3),
                Punct::Pipe => (BinOp::Binary(BitOr), 4),
                Punct::Caret => (BinOp::Binary(BitXor), 5),
                Punct::Amp => (BinOp::Binary(BitAnd), 6),
                Punct::EqEq => (BinOp::Binary(Eq), 7),
                Punct::NotEq => (BinOp::Binary(NotEq), 7),
                Punct::EqEqEq => (BinOp::Binary(EqEq), 7),
                Punct::NotEqEq => (BinOp::Binary(NotEqEq), 7),
                Punct::Lt => (BinOp::Binary(Lt), 8),
                Punct::LtEq => (BinOp::Binary(LtEq), 8),
                Punct::Gt => (BinOp::Binary(Gt), 8),
                Punct::GtEq => (BinOp::Binary(GtEq), 8),
                Punct::LtLt => (BinOp::Binary(ShiftLeft), 9),
                Punct::GtGt => (BinOp::Binary(ShiftRight), 9),
                Punct::GtGtGt => (BinOp::Binary(UnsignedShiftRight), 9),
                Punct::Plus => (BinOp::Binary(Plus), 10),
                Punct::Minus => (BinOp::Binary(Minus), 10),
                Punct::Star => (BinOp::Binary(Times), 11),
                Punct::Slash => (BinOp::Binary(Div), 11),
                Punct::Percent => (BinOp::Binary(Mod), 11),
                _ => return None,
            }),
            TokenKind::Keyword(Keyword::Instanceof) => Some((BinOp::Binary(Instanceof), 8)),
            TokenKind::Keyword(Keyword::In) if self.state.allow_in => Some((BinOp::Binary(In), 8)),
            _ => None,
        }
    }

    /// `ExponentiationExpression`: right-associative `**`, with the early
    /// error that a bare `UnaryExpression` (`-x ** y`) may not be its left
    /// operand without parentheses.
    fn parse_exponentiation(&mut self) -> ParseResult<Expr> {
        let _guard = self.enter()?;
        let start = self.cur_start();
        let left = self.parse_unary_expression()?;
        if !self.is_punct(Punct::StarStar) {
            return Ok(left);
        }
        if matches!(left, Expr::Unary(_)) {
            return Err(self.early_error_at(start, "unary expression cannot be the left-hand side of '**' without parentheses"));
        }
        self.advance(Goal::Regex)?;
        let right = self.parse_exponentiation()?;
        let span = Span::new(left.span().start, right.span().end);
        Ok(Expr::Binary(Box::new(BinaryExpression {
            span,
            operator: BinaryOperator::Exponent,
            left: BinaryLeft::Expr(Box::new(left)),
            right,
        })))
    }

    /// `UnaryExpression`: the seven prefix operators, `await` (only inside
    /// an async boundary), or (falling through) `UpdateExpression`.
    fn parse_unary_expression(&mut self) -> ParseResult<Expr> {
        let _guard = self.enter()?;
        let start = self.cur_start();
        let operator = match &self.cur().kind {
            TokenKind::Punct(Punct::Plus) => Some(UnaryOperator::Plus),
            TokenKind::Punct(Punct::Minus) => Some(UnaryOperator::Minus),
            TokenKind::Punct(Punct::Bang) => Some(UnaryOperator::Not),
            TokenKind::Punct(Punct::Tilde) => Some(UnaryOperator::BitNot),
            TokenKind::Keyword(Keyword::Typeof) => Some(UnaryOperator::Typeof),
            TokenKind::Keyword(Keyword::Void) => Some(UnaryOperator::Void),
            TokenKind::Keyword(Keyword::Delete) => Some(UnaryOperator::Delete),
            _ => None,
        };
        if let Some(operator) = operator {
            self.advance(Goal::Regex)?;
            let argument = self.parse_unary_expression()?;
            if operator == UnaryOperator::Delete {
                self.check_delete_target(&argument, start)?;
            }
            let span = Span::new(start, argument.span().end);
            return Ok(Expr::Unary(Box::new(UnaryExpression { span, operator, argument, prefix: true })));
        }
        if self.is_identifier_named("await") && self.state.in_async {
            self.advance(Goal::Regex)?;
            let argument = self.parse_unary_expression()?;
            let span = Span::new(start, argument.span().end);
            return Ok(Expr::Await(Box::new(AwaitExpression { span, argument })));
        }
        self.parse_update_expression()
    }

    fn check_delete_target(&self, argument: &Expr, offset: u32) -> ParseResult<()> {
        if let Expr::Member(member) = argument {
            if matches!(member.property, ecma_ast::MemberProperty::PrivateIdentifier(_)) {
                return Err(self.early_error_at(offset, "private class fields cannot be deleted"));
            }
        }
        if self.state.strict && matches!(argument, Expr::Identifier(_)) {
            return Err(self.early_error_at(offset, "'delete' of an unqualified identifier is not allowed in strict mode"));
        }
        Ok(())
    }

    /// `UpdateExpression`: prefix `++`/`--`, or a `LeftHandSideExpression`
    /// optionally followed by postfix `++`/`--` (only when no line
    /// terminator separates them, per spec §4.4's restricted productions).
    fn parse_update_expression(&mut self) -> ParseResult<Expr> {
        let _guard = self.enter()?;
        let start = self.cur_start();
        if self.is_punct(Punct::PlusPlus) || self.is_punct(Punct::MinusMinus) {
            let operator = if self.is_punct(Punct::PlusPlus) { UpdateOperator::Increment } else { UpdateOperator::Decrement };
            self.advance_default()?;
            let argument = self.parse_unary_expression()?;
            self.check_update_target(&argument, start)?;
            let span = Span::new(start, argument.span().end);
            return Ok(Expr::Update(Box::new(UpdateExpression { span, operator, argument, prefix: true })));
        }

        let expr = self.parse_lhs_expression()?;
        if !self.preceding_line_terminator() && (self.is_punct(Punct::PlusPlus) || self.is_punct(Punct::MinusMinus)) {
            self.check_update_target(&expr, start)?;
            let operator = if self.is_punct(Punct::PlusPlus) { UpdateOperator::Increment } else { UpdateOperator::Decrement };
            let end = self.advance_default()?.span.end;
            let span = Span::new(expr.span().start, end);
            return Ok(Expr::Update(Box::new(UpdateExpression { span, operator, argument: expr, prefix: false })));
        }
        Ok(expr)
    }

    fn check_update_target(&self, expr: &Expr, offset: u32) -> ParseResult<()> {
        match expr {
            Expr::Identifier(id) => {
                if self.state.strict && (id.name.as_ref() == "eval" || id.name.as_ref() == "arguments") {
                    Err(self.early_error_at(offset, "invalid update expression target in strict mode"))
                } else {
                    Ok(())
                }
            }
            Expr::Member(_) => Ok(()),
            _ => Err(self.early_error_at(offset, "invalid update expression target")),
        }
    }

    /// `YieldExpression`, valid only inside a generator body. `yield*`
    /// delegates to an iterable; a bare `yield` takes no argument when the
    /// following token cannot start an expression or is separated by a line
    /// terminator.
    fn parse_yield_expression(&mut self) -> ParseResult<Expr> {
        let _guard = self.enter()?;
        let yield_span = self.advance(Goal::Regex)?.span;
        let mut end = yield_span.end;
        let delegate = self.is_punct(Punct::Star);
        if delegate {
            end = self.advance(Goal::Regex)?.span.end;
        }
        let has_argument = delegate || (!self.preceding_line_terminator() && self.can_start_yield_argument());
        let argument = if has_argument {
            let argument = self.parse_assignment_expression()?;
            end = argument.span().end;
            Some(argument)
        } else {
            None
        };
        Ok(Expr::Yield(Box::new(YieldExpression { span: Span::new(yield_span.start, end), argument, delegate })))
    }

    fn can_start_yield_argument(&self) -> bool {
        !self.is_eof()
            && !self.is_punct(Punct::Semi)
            && !self.is_punct(Punct::RParen)
            && !self.is_punct(Punct::RBracket)
            && !self.is_punct(Punct::RBrace)
            && !self.is_punct(Punct::Comma)
            && !self.is_punct(Punct::Colon)
    }
}
