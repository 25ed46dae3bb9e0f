use crate::{impl_get_span, BlockStatement, ClassBody, Expr, Identifier, Pat};
use ecma_span::Span;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableDeclarationKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclarator {
    pub span: Span,
    pub id: Pat,
    /// `None` is only valid for `var`/`let`; `const` requires an initializer.
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclaration {
    pub span: Span,
    pub kind: VariableDeclarationKind,
    pub declarations: Vec<VariableDeclarator>,
}

/// `id` is `None` only for the `export default function () {}` form; every
/// other function declaration requires a name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDeclaration {
    pub span: Span,
    pub id: Option<Box<Identifier>>,
    pub params: Vec<Pat>,
    pub body: Box<BlockStatement>,
    pub generator: bool,
    pub is_async: bool,
}

/// `id` is `None` only for the `export default class {}` form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDeclaration {
    pub span: Span,
    pub id: Option<Box<Identifier>>,
    pub super_class: Option<Expr>,
    pub body: Box<ClassBody>,
}

impl_get_span!(VariableDeclarator, VariableDeclaration, FunctionDeclaration, ClassDeclaration);

/// The three declaration forms that can appear wherever ESTree allows a
/// `Declaration` — as a plain statement, or inside `export` (named or
/// default). Kept distinct from [`crate::Stmt`]'s own `Var`/`Function`/
/// `Class` variants so `export` nodes don't need to carry a whole `Stmt`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Declaration {
    Var(Box<VariableDeclaration>),
    Function(Box<FunctionDeclaration>),
    Class(Box<ClassDeclaration>),
}

impl Declaration {
    pub fn span(&self) -> Span {
        match self {
            Declaration::Var(n) => n.span,
            Declaration::Function(n) => n.span,
            Declaration::Class(n) => n.span,
        }
    }
}

impl crate::GetSpan for Declaration {
    fn span(&self) -> Span {
        Declaration::span(self)
    }
}
