use super::Parser;
use ecma_ast::{
    Declaration, ExportAllDeclaration, ExportDefaultDeclaration, ExportDefaultDeclarationKind,
    ExportNamedDeclaration, ExportSpecifier, GetSpan, Identifier, ImportAttribute, ImportDeclaration,
    ImportDeclarationSpecifier, ImportDefaultSpecifier, ImportNamespaceSpecifier, ImportSpecifier,
    Literal, ModuleDeclaration, ModuleExportName,
};
use ecma_diagnostics::ParseResult;
use ecma_span::Span;
use ecma_token::{Keyword, Punct, TokenKind};

impl<'a> Parser<'a> {
    pub(crate) fn parse_module_declaration(&mut self) -> ParseResult<ModuleDeclaration> {
        let _guard = self.enter()?;
        if self.is_keyword_import() {
            Ok(ModuleDeclaration::Import(Box::new(self.parse_import_declaration()?)))
        } else {
            self.parse_export_declaration()
        }
    }

    /// `ModuleExportName`: an ordinary identifier-name (any keyword spelling
    /// is legal here, since it never resolves as a binding by itself) or,
    /// since ES2022, an arbitrary string literal.
    fn parse_module_export_name(&mut self) -> ParseResult<ModuleExportName> {
        if matches!(self.cur().kind, TokenKind::StringLiteral(_)) {
            return Ok(ModuleExportName::StringLiteral(Box::new(self.parse_string_literal_node()?)));
        }
        let span = self.cur().span;
        if let Some(name) = self.identifier_name() {
            let name = name.to_string();
            self.advance_default()?;
            return Ok(ModuleExportName::Identifier(Box::new(Identifier { span, name: name.into_boxed_str() })));
        }
        if let TokenKind::Keyword(kw) = self.cur().kind {
            self.advance_default()?;
            return Ok(ModuleExportName::Identifier(Box::new(Identifier { span, name: kw.as_str().into() })));
        }
        Err(self.unexpected("identifier or string literal"))
    }

    fn parse_string_literal_node(&mut self) -> ParseResult<Literal> {
        let TokenKind::StringLiteral(tok) = self.cur().kind.clone() else {
            return Err(self.unexpected("string literal"));
        };
        let span = self.cur().span;
        let lit = self.build_string_literal(span, &tok);
        self.advance_default()?;
        Ok(lit)
    }

    /// `with { type: "json" }` (the legacy `assert { ... }` spelling is
    /// accepted too, matching what engines shipped before `with` replaced
    /// it).
    fn parse_import_attributes_clause(&mut self) -> ParseResult<Vec<ImportAttribute>> {
        if !(self.is_identifier_named("with") || self.is_identifier_named("assert")) {
            return Ok(Vec::new());
        }
        self.advance_default()?;
        self.expect_punct(Punct::LBrace)?;
        let mut attributes = Vec::new();
        while !self.is_punct(Punct::RBrace) {
            let start = self.cur_start();
            let key = self.parse_module_export_name()?;
            self.expect_punct(Punct::Colon)?;
            let value = self.parse_string_literal_node()?;
            let end = value.span.end;
            attributes.push(ImportAttribute { span: Span::new(start, end), key, value: Box::new(value) });
            if !self.is_punct(Punct::RBrace) {
                self.expect_punct(Punct::Comma)?;
            }
        }
        self.expect_punct(Punct::RBrace)?;
        Ok(attributes)
    }

    fn parse_import_declaration(&mut self) -> ParseResult<ImportDeclaration> {
        let start = self.expect_keyword(Keyword::Import)?.start;
        let mut specifiers = Vec::new();

        if self.is_identifier() {
            let local = self.parse_binding_identifier()?;
            let span = local.span;
            specifiers.push(ImportDeclarationSpecifier::Default(Box::new(ImportDefaultSpecifier { span, local })));
            if self.eat_punct(Punct::Comma)? {
                self.parse_named_or_namespace_import(&mut specifiers)?;
            }
        } else if self.is_punct(Punct::Star) {
            self.parse_namespace_import(&mut specifiers)?;
        } else if self.is_punct(Punct::LBrace) {
            self.parse_named_imports(&mut specifiers)?;
        }

        let source = if specifiers.is_empty() && matches!(self.cur().kind, TokenKind::StringLiteral(_)) {
            self.parse_string_literal_node()?
        } else {
            if !self.is_identifier_named("from") {
                return Err(self.unexpected("'from'"));
            }
            self.advance_default()?;
            self.parse_string_literal_node()?
        };

        let attributes = self.parse_import_attributes_clause()?;
        let end = attributes.last().map(|a| a.span.end).unwrap_or(source.span.end);
        self.consume_semicolon()?;
        Ok(ImportDeclaration { span: Span::new(start, end), specifiers, source: Box::new(source), attributes })
    }

    fn parse_named_or_namespace_import(&mut self, specifiers: &mut Vec<ImportDeclarationSpecifier>) -> ParseResult<()> {
        if self.is_punct(Punct::Star) {
            self.parse_namespace_import(specifiers)
        } else {
            self.parse_named_imports(specifiers)
        }
    }

    fn parse_namespace_import(&mut self, specifiers: &mut Vec<ImportDeclarationSpecifier>) -> ParseResult<()> {
        let start = self.expect_punct(Punct::Star)?.start;
        if !self.is_identifier_named("as") {
            return Err(self.unexpected("'as'"));
        }
        self.advance_default()?;
        let local = self.parse_binding_identifier()?;
        let end = local.span.end;
        specifiers.push(ImportDeclarationSpecifier::Namespace(Box::new(ImportNamespaceSpecifier {
            span: Span::new(start, end),
            local,
        })));
        Ok(())
    }

    fn parse_named_imports(&mut self, specifiers: &mut Vec<ImportDeclarationSpecifier>) -> ParseResult<()> {
        self.expect_punct(Punct::LBrace)?;
        while !self.is_punct(Punct::RBrace) {
            let start = self.cur_start();
            let imported = self.parse_module_export_name()?;
            let local = if self.is_identifier_named("as") {
                self.advance_default()?;
                self.parse_binding_identifier()?
            } else {
                match &imported {
                    ModuleExportName::Identifier(id) => {
                        self.check_binding_name(&id.name, id.span.start)?;
                        id.clone()
                    }
                    ModuleExportName::StringLiteral(_) => return Err(self.unexpected("'as'")),
                }
            };
            let end = local.span.end;
            specifiers.push(ImportDeclarationSpecifier::Named(Box::new(ImportSpecifier {
                span: Span::new(start, end),
                imported,
                local,
            })));
            if !self.is_punct(Punct::RBrace) {
                self.expect_punct(Punct::Comma)?;
            }
        }
        self.expect_punct(Punct::RBrace)?;
        Ok(())
    }

    fn parse_export_declaration(&mut self) -> ParseResult<ModuleDeclaration> {
        let start = self.expect_keyword(Keyword::Export)?.start;

        if self.eat_keyword(Keyword::Default)? {
            return self.parse_export_default(start);
        }
        if self.is_punct(Punct::Star) {
            return self.parse_export_all(start);
        }
        if self.is_punct(Punct::LBrace) {
            return self.parse_export_named_specifiers(start);
        }

        let decl = self.parse_export_declaration_body()?;
        let end = decl.span().end;
        Ok(ModuleDeclaration::ExportNamed(Box::new(ExportNamedDeclaration {
            span: Span::new(start, end),
            declaration: Some(Box::new(decl)),
            specifiers: Vec::new(),
            source: None,
            attributes: Vec::new(),
        })))
    }

    /// The declaration forms legal directly after `export` (not
    /// `export default`): `var`/`let`/`const`, `function`, `class`, and their
    /// `async function`/ `function*` variants. Each always carries a name —
    /// the anonymous forms are only reachable via `export default`.
    fn parse_export_declaration_body(&mut self) -> ParseResult<Declaration> {
        if self.is_keyword(Keyword::Var) || self.is_keyword(Keyword::Const) || self.is_identifier_named("let") {
            let decl = self.parse_variable_declaration()?;
            self.consume_semicolon()?;
            return Ok(Declaration::Var(Box::new(decl)));
        }
        if self.is_keyword(Keyword::Function) {
            return Ok(Declaration::Function(Box::new(self.parse_function_declaration(false, true)?)));
        }
        if self.is_keyword(Keyword::Class) {
            return Ok(Declaration::Class(Box::new(self.parse_class_declaration(true)?)));
        }
        if self.is_async_keyword_sequence(Keyword::Function)? {
            self.advance_default()?;
            return Ok(Declaration::Function(Box::new(self.parse_function_declaration(true, true)?)));
        }
        Err(self.unexpected("a declaration"))
    }

    fn parse_export_default(&mut self, start: u32) -> ParseResult<ModuleDeclaration> {
        let declaration = if self.is_keyword(Keyword::Function) {
            ExportDefaultDeclarationKind::Declaration(Box::new(Declaration::Function(Box::new(
                self.parse_function_declaration(false, false)?,
            ))))
        } else if self.is_async_keyword_sequence(Keyword::Function)? {
            self.advance_default()?;
            ExportDefaultDeclarationKind::Declaration(Box::new(Declaration::Function(Box::new(
                self.parse_function_declaration(true, false)?,
            ))))
        } else if self.is_keyword(Keyword::Class) {
            ExportDefaultDeclarationKind::Declaration(Box::new(Declaration::Class(Box::new(
                self.parse_class_declaration(false)?,
            ))))
        } else {
            let expr = self.parse_assignment_expression()?;
            self.consume_semicolon()?;
            ExportDefaultDeclarationKind::Expr(Box::new(expr))
        };
        let end = match &declaration {
            ExportDefaultDeclarationKind::Declaration(d) => d.span().end,
            ExportDefaultDeclarationKind::Expr(e) => e.span().end,
        };
        Ok(ModuleDeclaration::ExportDefault(Box::new(ExportDefaultDeclaration {
            span: Span::new(start, end),
            declaration,
        })))
    }

    fn parse_export_all(&mut self, start: u32) -> ParseResult<ModuleDeclaration> {
        self.expect_punct(Punct::Star)?;
        let exported = if self.is_identifier_named("as") {
            self.advance_default()?;
            Some(self.parse_module_export_name()?)
        } else {
            None
        };
        if !self.is_identifier_named("from") {
            return Err(self.unexpected("'from'"));
        }
        self.advance_default()?;
        let source = self.parse_string_literal_node()?;
        let attributes = self.parse_import_attributes_clause()?;
        let end = attributes.last().map(|a| a.span.end).unwrap_or(source.span.end);
        self.consume_semicolon()?;
        Ok(ModuleDeclaration::ExportAll(Box::new(ExportAllDeclaration {
            span: Span::new(start, end),
            exported,
            source: Box::new(source),
            attributes,
        })))
    }

    fn parse_export_named_specifiers(&mut self, start: u32) -> ParseResult<ModuleDeclaration> {
        self.expect_punct(Punct::LBrace)?;
        let mut specifiers = Vec::new();
        while !self.is_punct(Punct::RBrace) {
            let spec_start = self.cur_start();
            let local = self.parse_module_export_name()?;
            let exported = if self.is_identifier_named("as") {
                self.advance_default()?;
                self.parse_module_export_name()?
            } else {
                local.clone()
            };
            let end = exported.span().end;
            specifiers.push(ExportSpecifier { span: Span::new(spec_start, end), local, exported });
            if !self.is_punct(Punct::RBrace) {
                self.expect_punct(Punct::Comma)?;
            }
        }
        self.expect_punct(Punct::RBrace)?;

        let source = if self.is_identifier_named("from") {
            self.advance_default()?;
            Some(self.parse_string_literal_node()?)
        } else {
            None
        };
        let attributes = if source.is_some() { self.parse_import_attributes_clause()? } else { Vec::new() };
        let end = attributes
            .last()
            .map(|a| a.span.end)
            .or_else(|| source.as_ref().map(|s| s.span.end))
            .unwrap_or_else(|| self.last_end());
        self.consume_semicolon()?;
        Ok(ModuleDeclaration::ExportNamed(Box::new(ExportNamedDeclaration {
            span: Span::new(start, end),
            declaration: None,
            specifiers,
            source: source.map(Box::new),
            attributes,
        })))
    }
}
