use crate::{impl_get_span, Expr, FunctionExpression, GetSpan, Identifier, PropertyKey, Stmt};
use ecma_span::Span;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

/// A method, getter, or setter inside a class body, including private
/// (`#name`) members via `key: PropertyKey::PrivateIdentifier`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDefinition {
    pub span: Span,
    pub key: PropertyKey,
    pub value: Box<FunctionExpression>,
    pub kind: MethodKind,
    pub computed: bool,
    pub is_static: bool,
}

/// An instance or static class field, with or without an initializer
/// (`x;` vs `x = 1;`), public or private.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDefinition {
    pub span: Span,
    pub key: PropertyKey,
    pub value: Option<Expr>,
    pub computed: bool,
    pub is_static: bool,
}

/// `static { ... }` — runs once, in declaration order among other static
/// members, with access to private names declared earlier in the same class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticBlock {
    pub span: Span,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClassMember {
    Method(Box<MethodDefinition>),
    Property(Box<PropertyDefinition>),
    StaticBlock(Box<StaticBlock>),
}

impl GetSpan for ClassMember {
    fn span(&self) -> Span {
        match self {
            ClassMember::Method(n) => n.span(),
            ClassMember::Property(n) => n.span(),
            ClassMember::StaticBlock(n) => n.span(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassBody {
    pub span: Span,
    pub body: Vec<ClassMember>,
}

/// Named or anonymous — class expressions may omit `id` entirely (the
/// binding, if any, comes from the surrounding assignment/declaration).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassExpression {
    pub span: Span,
    pub id: Option<Box<Identifier>>,
    pub super_class: Option<Expr>,
    pub body: Box<ClassBody>,
}

impl_get_span!(MethodDefinition, PropertyDefinition, StaticBlock, ClassBody, ClassExpression);
