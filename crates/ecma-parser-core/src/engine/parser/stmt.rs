use super::Parser;
use ecma_ast::{
    BlockStatement, BreakStatement, CatchClause, ContinueStatement, DebuggerStatement,
    DoWhileStatement, EmptyStatement, Expr, ExpressionStatement, ForHead, ForInStatement, ForInit,
    ForOfStatement, ForStatement, Identifier, IfStatement, LabeledStatement, LiteralValue, Pat,
    ReturnStatement, SequenceExpression, Stmt, SwitchCase, SwitchStatement, ThrowStatement,
    TryStatement, VariableDeclaration, VariableDeclarationKind, VariableDeclarator, WhileStatement,
    WithStatement,
};
use ecma_diagnostics::ParseResult;
use ecma_lexer::Goal;
use ecma_span::Span;
use ecma_token::{Keyword, Punct, TokenKind};

impl<'a> Parser<'a> {
    /// `StatementListItem`: a `Statement`, or one of the two declaration
    /// forms (`function`/`class`, `let`/`const`) only legal at this position
    /// and not as the body of an `if`/`while`/labeled statement.
    pub(crate) fn parse_statement_list_item(&mut self) -> ParseResult<Stmt> {
        self.parse_statement()
    }

    pub(crate) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        let _guard = self.enter()?;
        match self.cur().kind.clone() {
            TokenKind::Punct(Punct::LBrace) => self.parse_block_statement().map(|b| Stmt::Block(Box::new(b))),
            TokenKind::Punct(Punct::Semi) => {
                let span = self.advance(Goal::Regex)?.span;
                Ok(Stmt::Empty(Box::new(EmptyStatement { span })))
            }
            TokenKind::Keyword(Keyword::Var) | TokenKind::Keyword(Keyword::Const) => {
                let decl = self.parse_variable_declaration()?;
                self.consume_semicolon()?;
                Ok(Stmt::Var(Box::new(decl)))
            }
            TokenKind::Keyword(Keyword::Function) => {
                Ok(Stmt::Function(Box::new(self.parse_function_declaration(false, true)?)))
            }
            TokenKind::Keyword(Keyword::Class) => Ok(Stmt::Class(Box::new(self.parse_class_declaration(true)?))),
            TokenKind::Keyword(Keyword::If) => self.parse_if_statement(),
            TokenKind::Keyword(Keyword::For) => self.parse_for_statement(),
            TokenKind::Keyword(Keyword::While) => self.parse_while_statement(),
            TokenKind::Keyword(Keyword::Do) => self.parse_do_while_statement(),
            TokenKind::Keyword(Keyword::Switch) => self.parse_switch_statement(),
            TokenKind::Keyword(Keyword::Try) => self.parse_try_statement(),
            TokenKind::Keyword(Keyword::With) => self.parse_with_statement(),
            TokenKind::Keyword(Keyword::Return) => self.parse_return_statement(),
            TokenKind::Keyword(Keyword::Throw) => self.parse_throw_statement(),
            TokenKind::Keyword(Keyword::Break) => self.parse_break_statement(),
            TokenKind::Keyword(Keyword::Continue) => self.parse_continue_statement(),
            TokenKind::Keyword(Keyword::Debugger) => {
                let span = self.advance_default()?.span;
                self.consume_semicolon()?;
                Ok(Stmt::Debugger(Box::new(DebuggerStatement { span })))
            }
            TokenKind::Identifier(id) if id.name.as_ref() == "let" => {
                if let Some(stmt) = self.try_lexical_let_declaration()? {
                    return Ok(stmt);
                }
                self.parse_expression_or_labeled_statement()
            }
            TokenKind::Identifier(id) if id.name.as_ref() == "async" => {
                if self.is_async_keyword_sequence(Keyword::Function)? {
                    self.advance_default()?;
                    return Ok(Stmt::Function(Box::new(self.parse_function_declaration(true, true)?)));
                }
                self.parse_expression_or_labeled_statement()
            }
            _ => self.parse_expression_or_labeled_statement(),
        }
    }

    /// Consumes a leading string-literal expression statement if, and only
    /// if, it is a *bare* literal (not parenthesized, not part of a larger
    /// expression) — the shape ECMA-262 recognizes as a directive prologue
    /// entry. Anything else restores the checkpoint and returns `None`, so
    /// the caller's own statement loop parses it normally.
    pub(crate) fn try_parse_directive(&mut self) -> ParseResult<Option<Stmt>> {
        if !matches!(self.cur().kind, TokenKind::StringLiteral(_)) {
            return Ok(None);
        }
        let checkpoint = self.tokens.checkpoint();
        let token_span = self.cur().span;
        let stmt = self.parse_statement()?;
        let Stmt::Expression(expr_stmt) = stmt else {
            self.tokens.restore(checkpoint);
            return Ok(None);
        };
        let Expr::Literal(lit) = &expr_stmt.expression else {
            self.tokens.restore(checkpoint);
            return Ok(None);
        };
        if lit.span != token_span {
            self.tokens.restore(checkpoint);
            return Ok(None);
        }
        let Some(LiteralValue::String(value)) = lit.value.clone() else {
            self.tokens.restore(checkpoint);
            return Ok(None);
        };
        if value.as_ref() == "use strict" {
            self.state.strict = true;
        }
        let mut expr_stmt = expr_stmt;
        expr_stmt.directive = Some(value);
        Ok(Some(Stmt::Expression(expr_stmt)))
    }

    pub(crate) fn parse_block_statement(&mut self) -> ParseResult<BlockStatement> {
        let _guard = self.enter()?;
        let start = self.expect_punct_regex(Punct::LBrace)?.start;
        let mut body = Vec::new();
        while !self.is_punct(Punct::RBrace) {
            body.push(self.parse_statement_list_item()?);
        }
        let end = self.expect_punct(Punct::RBrace)?.end;
        Ok(BlockStatement { span: Span::new(start, end), body })
    }

    fn parse_expression_or_labeled_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.cur_start();
        if self.is_identifier() {
            let checkpoint = self.tokens.checkpoint();
            let name = self.identifier_name().expect("checked is_identifier").to_string();
            let id_span = self.cur().span;
            self.advance_default()?;
            if self.is_punct(Punct::Colon) {
                self.advance_default()?;
                return self.parse_labeled_statement(start, name.into_boxed_str(), id_span);
            }
            self.tokens.restore(checkpoint);
        }
        let expr = self.parse_expression()?;
        let end = expr.span().end;
        self.consume_semicolon()?;
        Ok(Stmt::Expression(Box::new(ExpressionStatement { span: Span::new(start, end), expression: expr, directive: None })))
    }

    fn parse_labeled_statement(&mut self, start: u32, name: Box<str>, label_span: Span) -> ParseResult<Stmt> {
        if self.state.labels.iter().any(|(n, _)| n.as_ref() == name.as_ref()) {
            return Err(self.early_error_at(label_span.start, format!("label '{name}' has already been declared")));
        }
        let is_iteration = self.peek_labels_iteration()?;
        self.state.labels.push((name.clone(), is_iteration));
        let body = self.parse_statement();
        self.state.labels.pop();
        let body = body?;
        let end = body.span().end;
        Ok(Stmt::Labeled(Box::new(LabeledStatement {
            span: Span::new(start, end),
            label: Box::new(Identifier { span: label_span, name }),
            body,
        })))
    }

    /// Looks past any chain of further `label:` prefixes to see whether the
    /// statement a label (or chain of labels) ultimately attaches to is an
    /// iteration statement — the condition `continue label;` requires.
    fn peek_labels_iteration(&mut self) -> ParseResult<bool> {
        let checkpoint = self.tokens.checkpoint();
        let mut result = false;
        loop {
            if self.is_keyword(Keyword::For) || self.is_keyword(Keyword::While) || self.is_keyword(Keyword::Do) {
                result = true;
                break;
            }
            if self.is_identifier() {
                let inner = self.tokens.checkpoint();
                self.advance_default()?;
                if self.is_punct(Punct::Colon) {
                    self.advance_default()?;
                    continue;
                }
                self.tokens.restore(inner);
                break;
            }
            break;
        }
        self.tokens.restore(checkpoint);
        Ok(result)
    }

    fn parse_optional_label(&mut self) -> ParseResult<Option<Box<Identifier>>> {
        if self.is_identifier() && !self.preceding_line_terminator() {
            Ok(Some(self.parse_identifier_reference()?))
        } else {
            Ok(None)
        }
    }

    fn parse_if_statement(&mut self) -> ParseResult<Stmt> {
        let _guard = self.enter()?;
        let kw_span = self.expect_keyword(Keyword::If)?;
        self.expect_punct(Punct::LParen)?;
        let test = self.parse_expression()?;
        self.expect_punct(Punct::RParen)?;
        let consequent = self.parse_statement()?;
        let alternate = if self.eat_keyword(Keyword::Else)? { Some(self.parse_statement()?) } else { None };
        let end = alternate.as_ref().map(|a| a.span().end).unwrap_or_else(|| consequent.span().end);
        Ok(Stmt::If(Box::new(IfStatement { span: Span::new(kw_span.start, end), test, consequent, alternate })))
    }

    fn parse_with_statement(&mut self) -> ParseResult<Stmt> {
        let kw_span = self.expect_keyword(Keyword::With)?;
        if self.state.strict {
            return Err(self.early_error_at(kw_span.start, "'with' statements are not allowed in strict mode"));
        }
        self.expect_punct(Punct::LParen)?;
        let object = self.parse_expression()?;
        self.expect_punct(Punct::RParen)?;
        let body = self.parse_statement()?;
        let end = body.span().end;
        Ok(Stmt::With(Box::new(WithStatement { span: Span::new(kw_span.start, end), object, body })))
    }

    fn parse_return_statement(&mut self) -> ParseResult<Stmt> {
        let kw_span = self.expect_keyword(Keyword::Return)?;
        if !self.state.in_function {
            return Err(self.early_error_at(kw_span.start, "'return' outside of a function body"));
        }
        let argument = if self.can_start_statement_argument() { Some(self.parse_expression()?) } else { None };
        let end = argument.as_ref().map(|e| e.span().end).unwrap_or(kw_span.end);
        self.consume_semicolon()?;
        Ok(Stmt::Return(Box::new(ReturnStatement { span: Span::new(kw_span.start, end), argument })))
    }

    fn can_start_statement_argument(&self) -> bool {
        !self.preceding_line_terminator()
            && !self.is_eof()
            && !self.is_punct(Punct::Semi)
            && !self.is_punct(Punct::RBrace)
    }

    fn parse_throw_statement(&mut self) -> ParseResult<Stmt> {
        let kw_span = self.expect_keyword(Keyword::Throw)?;
        if self.preceding_line_terminator() {
            return Err(self.early_error_at(kw_span.end, "illegal newline after 'throw'"));
        }
        let argument = self.parse_expression()?;
        let end = argument.span().end;
        self.consume_semicolon()?;
        Ok(Stmt::Throw(Box::new(ThrowStatement { span: Span::new(kw_span.start, end), argument })))
    }

    fn parse_break_statement(&mut self) -> ParseResult<Stmt> {
        let kw_span = self.expect_keyword(Keyword::Break)?;
        let label = self.parse_optional_label()?;
        match &label {
            Some(l) => {
                if !self.state.labels.iter().any(|(n, _)| n.as_ref() == l.name.as_ref()) {
                    return Err(self.early_error_at(l.span.start, format!("undefined label '{}'", l.name)));
                }
            }
            None => {
                if !self.state.in_iteration && !self.state.in_switch {
                    return Err(self.early_error_at(kw_span.start, "illegal break statement"));
                }
            }
        }
        let end = label.as_ref().map(|l| l.span.end).unwrap_or(kw_span.end);
        self.consume_semicolon()?;
        Ok(Stmt::Break(Box::new(BreakStatement { span: Span::new(kw_span.start, end), label })))
    }

    fn parse_continue_statement(&mut self) -> ParseResult<Stmt> {
        let kw_span = self.expect_keyword(Keyword::Continue)?;
        let label = self.parse_optional_label()?;
        match &label {
            Some(l) => match self.state.labels.iter().find(|(n, _)| n.as_ref() == l.name.as_ref()) {
                Some((_, true)) => {}
                Some((_, false)) => {
                    return Err(self.early_error_at(
                        l.span.start,
                        format!("'continue' label '{}' does not label an enclosing iteration statement", l.name),
                    ));
                }
                None => return Err(self.early_error_at(l.span.start, format!("undefined label '{}'", l.name))),
            },
            None => {
                if !self.state.in_iteration {
                    return Err(self.early_error_at(kw_span.start, "illegal continue statement"));
                }
            }
        }
        let end = label.as_ref().map(|l| l.span.end).unwrap_or(kw_span.end);
        self.consume_semicolon()?;
        Ok(Stmt::Continue(Box::new(ContinueStatement { span: Span::new(kw_span.start, end), label })))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<Stmt> {
        let _guard = self.enter()?;
        let kw_span = self.expect_keyword(Keyword::Switch)?;
        self.expect_punct(Punct::LParen)?;
        let discriminant = self.parse_expression()?;
        self.expect_punct(Punct::RParen)?;
        self.expect_punct(Punct::LBrace)?;
        let saved_switch = self.state.in_switch;
        self.state.in_switch = true;
        let mut cases = Vec::new();
        let mut seen_default = false;
        let result = (|| -> ParseResult<()> {
            while !self.is_punct(Punct::RBrace) {
                let case_start = self.cur_start();
                let test = if self.eat_keyword(Keyword::Case)? {
                    Some(self.parse_expression()?)
                } else {
                    self.expect_keyword(Keyword::Default)?;
                    if seen_default {
                        return Err(self.early_error_at(case_start, "multiple default clauses in switch statement"));
                    }
                    seen_default = true;
                    None
                };
                self.expect_punct(Punct::Colon)?;
                let mut consequent = Vec::new();
                while !self.is_punct(Punct::RBrace) && !self.is_keyword(Keyword::Case) && !self.is_keyword(Keyword::Default) {
                    consequent.push(self.parse_statement_list_item()?);
                }
                let end = consequent.last().map(|s| s.span().end).unwrap_or_else(|| self.cur_start());
                cases.push(SwitchCase { span: Span::new(case_start, end), test, consequent });
            }
            Ok(())
        })();
        self.state.in_switch = saved_switch;
        result?;
        let end = self.expect_punct(Punct::RBrace)?.end;
        Ok(Stmt::Switch(Box::new(SwitchStatement { span: Span::new(kw_span.start, end), discriminant, cases })))
    }

    fn parse_try_statement(&mut self) -> ParseResult<Stmt> {
        let _guard = self.enter()?;
        let kw_span = self.expect_keyword(Keyword::Try)?;
        let block = self.parse_block_statement()?;
        let handler = if self.is_keyword(Keyword::Catch) { Some(Box::new(self.parse_catch_clause()?)) } else { None };
        let finalizer = if self.eat_keyword(Keyword::Finally)? { Some(Box::new(self.parse_block_statement()?)) } else { None };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.unexpected("'catch' or 'finally'"));
        }
        let end = finalizer
            .as_ref()
            .map(|f| f.span.end)
            .or_else(|| handler.as_ref().map(|h| h.span.end))
            .unwrap_or(block.span.end);
        Ok(Stmt::Try(Box::new(TryStatement { span: Span::new(kw_span.start, end), block: Box::new(block), handler, finalizer })))
    }

    fn parse_catch_clause(&mut self) -> ParseResult<CatchClause> {
        let kw_span = self.expect_keyword(Keyword::Catch)?;
        let param = if self.eat_punct(Punct::LParen)? {
            let p = self.parse_binding_target()?;
            self.expect_punct(Punct::RParen)?;
            Some(p)
        } else {
            None
        };
        let body = self.parse_block_statement()?;
        Ok(CatchClause { span: Span::new(kw_span.start, body.span.end), param, body: Box::new(body) })
    }

    fn parse_while_statement(&mut self) -> ParseResult<Stmt> {
        let _guard = self.enter()?;
        let kw_span = self.expect_keyword(Keyword::While)?;
        self.expect_punct(Punct::LParen)?;
        let test = self.parse_expression()?;
        self.expect_punct(Punct::RParen)?;
        let saved = self.state.in_iteration;
        self.state.in_iteration = true;
        let body = self.parse_statement();
        self.state.in_iteration = saved;
        let body = body?;
        let end = body.span().end;
        Ok(Stmt::While(Box::new(WhileStatement { span: Span::new(kw_span.start, end), test, body })))
    }

    fn parse_do_while_statement(&mut self) -> ParseResult<Stmt> {
        let _guard = self.enter()?;
        let kw_span = self.expect_keyword(Keyword::Do)?;
        let saved = self.state.in_iteration;
        self.state.in_iteration = true;
        let body = self.parse_statement();
        self.state.in_iteration = saved;
        let body = body?;
        self.expect_keyword(Keyword::While)?;
        self.expect_punct(Punct::LParen)?;
        let test = self.parse_expression()?;
        let close_paren_end = self.expect_punct(Punct::RParen)?.end;
        // A `do...while`'s trailing `;` is always optional, even with no
        // preceding line terminator — the one ASI exception the grammar
        // calls out by name rather than deriving from the general rule.
        self.eat_punct(Punct::Semi)?;
        Ok(Stmt::DoWhile(Box::new(DoWhileStatement { span: Span::new(kw_span.start, close_paren_end), body, test })))
    }

    fn peek_is_let_declaration_start(&mut self) -> ParseResult<bool> {
        if !self.is_identifier_named("let") {
            return Ok(false);
        }
        let checkpoint = self.tokens.checkpoint();
        self.advance_default()?;
        let matched = self.is_identifier() || self.is_punct(Punct::LBracket) || self.is_punct(Punct::LBrace);
        self.tokens.restore(checkpoint);
        Ok(matched)
    }

    /// `let` at statement position is ambiguous with a plain identifier
    /// reference (`let[0] = 1;` vs `let[0];` as a member expression). Tries
    /// the lexical declaration first and falls back to treating `let` as an
    /// ordinary identifier if the attempt does not parse as one.
    fn try_lexical_let_declaration(&mut self) -> ParseResult<Option<Stmt>> {
        if !self.peek_is_let_declaration_start()? {
            return Ok(None);
        }
        let checkpoint = self.tokens.checkpoint();
        match self.parse_variable_declaration() {
            Ok(decl) => {
                self.consume_semicolon()?;
                Ok(Some(Stmt::Var(Box::new(decl))))
            }
            Err(_) => {
                self.tokens.restore(checkpoint);
                Ok(None)
            }
        }
    }

    fn parse_for_statement(&mut self) -> ParseResult<Stmt> {
        let _guard = self.enter()?;
        let kw_start = self.expect_keyword(Keyword::For)?.start;
        let is_await = if self.is_identifier_named("await") {
            self.advance_default()?;
            true
        } else {
            false
        };
        if is_await && !(self.state.in_async || self.state.module) {
            return Err(self.early_error_at(kw_start, "'for await' is only valid in an async function or module"));
        }
        self.expect_punct(Punct::LParen)?;

        if self.is_keyword(Keyword::Var) || self.is_keyword(Keyword::Const) || self.peek_is_let_declaration_start()? {
            return self.parse_for_with_declaration(kw_start, is_await);
        }

        if is_await {
            return Err(self.early_error_at(kw_start, "'for await' requires a 'for...of' loop"));
        }

        if self.is_punct(Punct::Semi) {
            return self.finish_for_classic(kw_start, None);
        }

        let saved_allow_in = self.state.allow_in;
        self.state.allow_in = false;
        let first = self.parse_assignment_expression()?;
        if self.is_keyword(Keyword::In) || self.is_identifier_named("of") {
            let is_of = self.is_identifier_named("of");
            self.state.allow_in = saved_allow_in;
            self.advance_default()?;
            let pat = self.expr_to_pattern(first)?;
            return self.finish_for_in_of(kw_start, ForHead::Pat(Box::new(pat)), is_of, is_await);
        }
        let mut exprs = vec![first];
        while self.eat_punct(Punct::Comma)? {
            exprs.push(self.parse_assignment_expression()?);
        }
        self.state.allow_in = saved_allow_in;
        let init_expr = if exprs.len() == 1 {
            exprs.pop().expect("just checked len")
        } else {
            let span = Span::new(exprs[0].span().start, exprs.last().expect("non-empty").span().end);
            Expr::Sequence(Box::new(SequenceExpression { span, expressions: exprs }))
        };
        self.finish_for_classic(kw_start, Some(ForInit::Expr(Box::new(init_expr))))
    }

    fn parse_for_with_declaration(&mut self, kw_start: u32, is_await: bool) -> ParseResult<Stmt> {
        let decl_start = self.cur_start();
        let kind = if self.eat_keyword(Keyword::Var)? {
            VariableDeclarationKind::Var
        } else if self.eat_keyword(Keyword::Const)? {
            VariableDeclarationKind::Const
        } else {
            self.advance_default()?; // `let`
            VariableDeclarationKind::Let
        };
        let saved_allow_in = self.state.allow_in;
        self.state.allow_in = false;
        let first_target = self.parse_binding_target()?;

        if self.is_keyword(Keyword::In) || self.is_identifier_named("of") {
            let is_of = self.is_identifier_named("of");
            self.state.allow_in = saved_allow_in;
            self.advance_default()?;
            let target_span = first_target.span();
            let declarator = VariableDeclarator { span: target_span, id: first_target, init: None };
            let var_decl =
                VariableDeclaration { span: Span::new(decl_start, target_span.end), kind, declarations: vec![declarator] };
            return self.finish_for_in_of(kw_start, ForHead::VarDecl(Box::new(var_decl)), is_of, is_await);
        }
        if is_await {
            return Err(self.early_error_at(kw_start, "'for await' requires a 'for...of' loop"));
        }

        // Annex B.3.4: `for (var x = init in obj)` — a single, non-strict,
        // identifier-bound `var` declarator may carry an initializer in a
        // `for-in` head. Acorn accepts this at every configured version, so
        // it is in scope despite being a pre-ES6 extension (spec.md's
        // Non-goals exclude only Annex-B *beyond* what Acorn accepts).
        // Every other shape (strict mode, `let`/`const`, destructuring,
        // `for-of`) keeps the ordinary early error.
        if self.is_punct(Punct::Eq) && matches!(first_target, Pat::Identifier(_)) && kind == VariableDeclarationKind::Var
            && !self.state.strict
        {
            let checkpoint = self.tokens.checkpoint();
            self.advance(Goal::Regex)?;
            let init_expr = self.parse_assignment_expression();
            if let Ok(init_expr) = init_expr {
                if self.is_keyword(Keyword::In) {
                    self.state.allow_in = saved_allow_in;
                    self.advance_default()?;
                    let target_span = first_target.span();
                    let decl_span = Span::new(target_span.start, init_expr.span().end);
                    let declarator =
                        VariableDeclarator { span: decl_span, id: first_target, init: Some(init_expr) };
                    let var_decl =
                        VariableDeclaration { span: Span::new(decl_start, decl_span.end), kind, declarations: vec![declarator] };
                    return self.finish_for_in_of(kw_start, ForHead::VarDecl(Box::new(var_decl)), false, false);
                }
            }
            self.tokens.restore(checkpoint);
        }

        let init = if self.eat_punct(Punct::Eq)? { Some(self.parse_assignment_expression()?) } else { None };
        if init.is_none() && kind == VariableDeclarationKind::Const {
            return Err(self.early_error_at(decl_start, "missing initializer in 'const' declaration"));
        }
        let first_end = init.as_ref().map(|e| e.span().end).unwrap_or_else(|| first_target.span().end);
        let mut declarations = vec![VariableDeclarator { span: Span::new(decl_start, first_end), id: first_target, init }];
        while self.eat_punct(Punct::Comma)? {
            let d_start = self.cur_start();
            let target = self.parse_binding_target()?;
            let init = if self.eat_punct(Punct::Eq)? { Some(self.parse_assignment_expression()?) } else { None };
            if init.is_none() && kind == VariableDeclarationKind::Const {
                return Err(self.early_error_at(d_start, "missing initializer in 'const' declaration"));
            }
            let end = init.as_ref().map(|e| e.span().end).unwrap_or_else(|| target.span().end);
            declarations.push(VariableDeclarator { span: Span::new(d_start, end), id: target, init });
        }
        self.state.allow_in = saved_allow_in;
        let last_end = declarations.last().expect("at least one declarator").span.end;
        let var_decl = VariableDeclaration { span: Span::new(decl_start, last_end), kind, declarations };
        self.finish_for_classic(kw_start, Some(ForInit::VarDecl(Box::new(var_decl))))
    }

    /// Finishes a classic `for (init; test; update) body`, consuming the
    /// `;` after `init` (the current token when every caller reaches here).
    fn finish_for_classic(&mut self, kw_start: u32, init: Option<ForInit>) -> ParseResult<Stmt> {
        self.expect_punct(Punct::Semi)?;
        let test = if self.is_punct(Punct::Semi) { None } else { Some(self.parse_expression()?) };
        self.expect_punct(Punct::Semi)?;
        let update = if self.is_punct(Punct::RParen) { None } else { Some(self.parse_expression()?) };
        self.expect_punct(Punct::RParen)?;
        let saved = self.state.in_iteration;
        self.state.in_iteration = true;
        let body = self.parse_statement();
        self.state.in_iteration = saved;
        let body = body?;
        let end = body.span().end;
        Ok(Stmt::For(Box::new(ForStatement { span: Span::new(kw_start, end), init, test, update, body })))
    }

    fn finish_for_in_of(&mut self, kw_start: u32, left: ForHead, is_of: bool, is_await: bool) -> ParseResult<Stmt> {
        if !is_of && is_await {
            return Err(self.early_error_at(kw_start, "'for await' requires a 'for...of' loop"));
        }
        let right = if is_of { self.parse_assignment_expression()? } else { self.parse_expression()? };
        self.expect_punct(Punct::RParen)?;
        let saved_iter = self.state.in_iteration;
        self.state.in_iteration = true;
        let body = self.parse_statement();
        self.state.in_iteration = saved_iter;
        let body = body?;
        let end = body.span().end;
        if is_of {
            Ok(Stmt::ForOf(Box::new(ForOfStatement { span: Span::new(kw_start, end), left, right, body, is_await })))
        } else {
            Ok(Stmt::ForIn(Box::new(ForInStatement { span: Span::new(kw_start, end), left, right, body })))
        }
    }
}
