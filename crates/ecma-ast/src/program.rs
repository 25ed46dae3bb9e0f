use crate::{impl_get_span, GetSpan, ModuleDeclaration, Stmt};
use ecma_span::Span;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Script,
    Module,
}

/// A top-level item: an ordinary statement, or (only when `source_type` is
/// `Module`) an import/export declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProgramItem {
    Stmt(Stmt),
    Module(ModuleDeclaration),
}

impl GetSpan for ProgramItem {
    fn span(&self) -> Span {
        match self {
            ProgramItem::Stmt(s) => s.span(),
            ProgramItem::Module(m) => m.span(),
        }
    }
}

/// The root node. `shebang` carries a leading `#!...` line's text (without
/// the newline), present only when the source began with one — it is never
/// part of `body`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub span: Span,
    pub source_type: SourceType,
    pub shebang: Option<Box<str>>,
    pub body: Vec<ProgramItem>,
}

impl_get_span!(Program);
