use crate::impl_get_span;
use ecma_span::Span;
use serde::Serialize;

/// `Identifier` — a binding or reference name. Keywords and contextual
/// keywords that the parser promoted to ordinary identifiers (e.g. `of` used
/// as a variable name outside a `for...of` head) appear here too.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    pub span: Span,
    pub name: Box<str>,
}

/// `PrivateIdentifier` — a class-scoped `#name`, valid only inside the class
/// body that declared it (as a field/method key) or as the left-hand side of
/// `#x in obj` / `this.#x`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrivateIdentifier {
    pub span: Span,
    pub name: Box<str>,
}

impl_get_span!(Identifier, PrivateIdentifier);
