use crate::{impl_get_span, Declaration, Expr, GetSpan, Identifier, Literal};
use ecma_span::Span;
use serde::Serialize;

/// An import/export binding name, which since ES2022 may be an arbitrary
/// string (`export { x as "a b" }`) instead of an identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModuleExportName {
    Identifier(Box<Identifier>),
    StringLiteral(Box<Literal>),
}

impl GetSpan for ModuleExportName {
    fn span(&self) -> Span {
        match self {
            ModuleExportName::Identifier(n) => n.span(),
            ModuleExportName::StringLiteral(n) => n.span(),
        }
    }
}

/// A single `key: "value"` entry of an import attributes clause
/// (`with { type: "json" }`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportAttribute {
    pub span: Span,
    pub key: ModuleExportName,
    pub value: Box<Literal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSpecifier {
    pub span: Span,
    pub imported: ModuleExportName,
    pub local: Box<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportDefaultSpecifier {
    pub span: Span,
    pub local: Box<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportNamespaceSpecifier {
    pub span: Span,
    pub local: Box<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ImportDeclarationSpecifier {
    Named(Box<ImportSpecifier>),
    Default(Box<ImportDefaultSpecifier>),
    Namespace(Box<ImportNamespaceSpecifier>),
}

impl GetSpan for ImportDeclarationSpecifier {
    fn span(&self) -> Span {
        match self {
            ImportDeclarationSpecifier::Named(n) => n.span,
            ImportDeclarationSpecifier::Default(n) => n.span,
            ImportDeclarationSpecifier::Namespace(n) => n.span,
        }
    }
}

/// `import defaultExport, { a, b as c } from "mod" with { type: "json" };`
/// `specifiers` is empty for a bare `import "mod";`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportDeclaration {
    pub span: Span,
    pub specifiers: Vec<ImportDeclarationSpecifier>,
    pub source: Box<Literal>,
    pub attributes: Vec<ImportAttribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSpecifier {
    pub span: Span,
    pub local: ModuleExportName,
    pub exported: ModuleExportName,
}

/// Covers both re-exports (`export { a } from "mod"`, `source: Some`) and
/// local exports (`export { a }`, `export const x = 1`, `source: None`).
/// Only one of `declaration` / `specifiers` is ever populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportNamedDeclaration {
    pub span: Span,
    pub declaration: Option<Box<Declaration>>,
    pub specifiers: Vec<ExportSpecifier>,
    pub source: Option<Box<Literal>>,
    pub attributes: Vec<ImportAttribute>,
}

/// `export default` accepts a named or anonymous function/class declaration,
/// or any expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportDefaultDeclarationKind {
    Declaration(Box<Declaration>),
    Expr(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDefaultDeclaration {
    pub span: Span,
    pub declaration: ExportDefaultDeclarationKind,
}

/// `export * from "mod";` (`exported: None`) or
/// `export * as ns from "mod";` (`exported: Some`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportAllDeclaration {
    pub span: Span,
    pub exported: Option<ModuleExportName>,
    pub source: Box<Literal>,
    pub attributes: Vec<ImportAttribute>,
}

/// A top-level module form. Only ever appears in a `Program` whose
/// `source_type` is `Module`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModuleDeclaration {
    Import(Box<ImportDeclaration>),
    ExportNamed(Box<ExportNamedDeclaration>),
    ExportDefault(Box<ExportDefaultDeclaration>),
    ExportAll(Box<ExportAllDeclaration>),
}

impl GetSpan for ModuleDeclaration {
    fn span(&self) -> Span {
        match self {
            ModuleDeclaration::Import(n) => n.span,
            ModuleDeclaration::ExportNamed(n) => n.span,
            ModuleDeclaration::ExportDefault(n) => n.span,
            ModuleDeclaration::ExportAll(n) => n.span,
        }
    }
}

impl_get_span!(
    ImportAttribute,
    ImportSpecifier,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    ImportDeclaration,
    ExportSpecifier,
    ExportNamedDeclaration,
    ExportDefaultDeclaration,
    ExportAllDeclaration,
);
