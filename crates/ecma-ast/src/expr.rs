use crate::{impl_get_span, BlockStatement, ClassExpression, GetSpan, Identifier, Literal, Pat, PrivateIdentifier};
use ecma_span::Span;
use serde::Serialize;

/// Any ECMAScript expression. Grouped as a single enum (rather than one
/// struct per arm wrapped ad hoc) so callers can match exhaustively the way
/// they would switch on ESTree's `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expr {
    This(Box<ThisExpression>),
    Identifier(Box<Identifier>),
    Literal(Box<Literal>),
    Array(Box<ArrayExpression>),
    Object(Box<ObjectExpression>),
    Function(Box<FunctionExpression>),
    Arrow(Box<ArrowFunctionExpression>),
    Class(Box<ClassExpression>),
    Template(Box<TemplateLiteral>),
    TaggedTemplate(Box<TaggedTemplateExpression>),
    Member(Box<MemberExpression>),
    Call(Box<CallExpression>),
    New(Box<NewExpression>),
    Update(Box<UpdateExpression>),
    Await(Box<AwaitExpression>),
    Yield(Box<YieldExpression>),
    Unary(Box<UnaryExpression>),
    Binary(Box<BinaryExpression>),
    Logical(Box<LogicalExpression>),
    Assignment(Box<AssignmentExpression>),
    Conditional(Box<ConditionalExpression>),
    Sequence(Box<SequenceExpression>),
    Chain(Box<ChainExpression>),
    Import(Box<ImportExpression>),
    MetaProperty(Box<MetaProperty>),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::This(n) => n.span,
            Expr::Identifier(n) => n.span(),
            Expr::Literal(n) => n.span(),
            Expr::Array(n) => n.span,
            Expr::Object(n) => n.span,
            Expr::Function(n) => n.span,
            Expr::Arrow(n) => n.span,
            Expr::Class(n) => n.span(),
            Expr::Template(n) => n.span,
            Expr::TaggedTemplate(n) => n.span,
            Expr::Member(n) => n.span,
            Expr::Call(n) => n.span,
            Expr::New(n) => n.span,
            Expr::Update(n) => n.span,
            Expr::Await(n) => n.span,
            Expr::Yield(n) => n.span,
            Expr::Unary(n) => n.span,
            Expr::Binary(n) => n.span,
            Expr::Logical(n) => n.span,
            Expr::Assignment(n) => n.span,
            Expr::Conditional(n) => n.span,
            Expr::Sequence(n) => n.span,
            Expr::Chain(n) => n.span,
            Expr::Import(n) => n.span,
            Expr::MetaProperty(n) => n.span,
        }
    }
}

impl GetSpan for Expr {
    fn span(&self) -> Span {
        Expr::span(self)
    }
}

impl Expr {
    /// Rewrites this expression's own span, leaving every descendant's span
    /// untouched. Used to extend a parenthesized expression's span to cover
    /// the enclosing `(` `)` pair, matching Acorn's convention that the
    /// parens are not represented as their own node.
    pub fn with_span(mut self, span: Span) -> Expr {
        macro_rules! set {
            ($n:expr) => {{
                $n.span = span;
            }};
        }
        match &mut self {
            Expr::This(n) => set!(n),
            Expr::Identifier(n) => set!(n),
            Expr::Literal(n) => set!(n),
            Expr::Array(n) => set!(n),
            Expr::Object(n) => set!(n),
            Expr::Function(n) => set!(n),
            Expr::Arrow(n) => set!(n),
            Expr::Class(n) => set!(n),
            Expr::Template(n) => set!(n),
            Expr::TaggedTemplate(n) => set!(n),
            Expr::Member(n) => set!(n),
            Expr::Call(n) => set!(n),
            Expr::New(n) => set!(n),
            Expr::Update(n) => set!(n),
            Expr::Await(n) => set!(n),
            Expr::Yield(n) => set!(n),
            Expr::Unary(n) => set!(n),
            Expr::Binary(n) => set!(n),
            Expr::Logical(n) => set!(n),
            Expr::Assignment(n) => set!(n),
            Expr::Conditional(n) => set!(n),
            Expr::Sequence(n) => set!(n),
            Expr::Chain(n) => set!(n),
            Expr::Import(n) => set!(n),
            Expr::MetaProperty(n) => set!(n),
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThisExpression {
    pub span: Span,
}

/// `super` used bare, only ever found as `MemberExpression::object` (`super.x`)
/// or `CallExpression::callee` (`super(...)`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Super {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadElement {
    pub span: Span,
    pub argument: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrayExpressionElement {
    Expr(Expr),
    Spread(Box<SpreadElement>),
}

/// `[a, , ...b]` — `elements` holds `None` for elisions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayExpression {
    pub span: Span,
    pub elements: Vec<Option<ArrayExpressionElement>>,
}

/// A property key, shared between object-expression properties, object
/// patterns, and class members. `Expr` covers computed keys (`[x]: y`);
/// `PrivateIdentifier` only ever appears as a class member key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyKey {
    Identifier(Box<Identifier>),
    PrivateIdentifier(Box<PrivateIdentifier>),
    Literal(Box<Literal>),
    Expr(Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub span: Span,
    pub key: PropertyKey,
    pub value: Expr,
    pub kind: PropertyKind,
    pub method: bool,
    pub shorthand: bool,
    pub computed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ObjectExpressionProperty {
    Property(Box<Property>),
    Spread(Box<SpreadElement>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectExpression {
    pub span: Span,
    pub properties: Vec<ObjectExpressionProperty>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionExpression {
    pub span: Span,
    pub id: Option<Box<Identifier>>,
    pub params: Vec<Pat>,
    pub body: Box<BlockStatement>,
    pub generator: bool,
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrowFunctionBody {
    Block(Box<BlockStatement>),
    Expr(Box<Expr>),
}

/// Arrow functions never bind `this`, `arguments`, `super`, or `new.target`,
/// and are never generators — `generator` has no field here at all.
/// `expression` is `true` when `body` is the `Expr` variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrowFunctionExpression {
    pub span: Span,
    pub params: Vec<Pat>,
    pub body: ArrowFunctionBody,
    pub is_async: bool,
    pub expression: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateElementValue {
    pub cooked: Option<Box<str>>,
    pub raw: Box<str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateElement {
    pub span: Span,
    pub tail: bool,
    pub value: TemplateElementValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateLiteral {
    pub span: Span,
    pub quasis: Vec<TemplateElement>,
    pub expressions: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedTemplateExpression {
    pub span: Span,
    pub tag: Expr,
    pub quasi: Box<TemplateLiteral>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MemberObject {
    Expr(Box<Expr>),
    Super(Box<Super>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MemberProperty {
    Identifier(Box<Identifier>),
    PrivateIdentifier(Box<PrivateIdentifier>),
    Expr(Box<Expr>),
}

/// `object.property`, `object[property]`, `object?.property`, `obj.#x`.
/// `computed` distinguishes bracket access from dot access; `optional` marks
/// the `?.` form (only ever `true` at the head of an optional chain link —
/// see [`ChainExpression`] for how a whole chain is marked).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberExpression {
    pub span: Span,
    pub object: MemberObject,
    pub property: MemberProperty,
    pub computed: bool,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Argument {
    Expr(Expr),
    Spread(Box<SpreadElement>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Callee {
    Expr(Box<Expr>),
    Super(Box<Super>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpression {
    pub span: Span,
    pub callee: Callee,
    pub arguments: Vec<Argument>,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpression {
    pub span: Span,
    pub callee: Expr,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateOperator {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateExpression {
    pub span: Span,
    pub operator: UpdateOperator,
    pub argument: Expr,
    pub prefix: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwaitExpression {
    pub span: Span,
    pub argument: Expr,
}

/// `yield` / `yield expr` / `yield* expr`, valid only inside a generator
/// body. `argument` is `None` for a bare `yield`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldExpression {
    pub span: Span,
    pub argument: Option<Expr>,
    pub delegate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "~")]
    BitNot,
    #[serde(rename = "typeof")]
    Typeof,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
}

/// Always prefix in ECMAScript (`prefix` is carried anyway, matching ESTree,
/// and is always `true`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpression {
    pub span: Span,
    pub operator: UnaryOperator,
    pub argument: Expr,
    pub prefix: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "===")]
    EqEq,
    #[serde(rename = "!==")]
    NotEqEq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "<<")]
    ShiftLeft,
    #[serde(rename = ">>")]
    ShiftRight,
    #[serde(rename = ">>>")]
    UnsignedShiftRight,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "*")]
    Times,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "**")]
    Exponent,
    #[serde(rename = "|")]
    BitOr,
    #[serde(rename = "^")]
    BitXor,
    #[serde(rename = "&")]
    BitAnd,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "instanceof")]
    Instanceof,
}

/// `left` is a `PrivateIdentifier` only for the `#x in obj` ergonomic-brand
/// check; every other binary operator takes a plain expression on both sides.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BinaryLeft {
    Expr(Box<Expr>),
    PrivateIdentifier(Box<PrivateIdentifier>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpression {
    pub span: Span,
    pub operator: BinaryOperator,
    pub left: BinaryLeft,
    pub right: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOperator {
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "??")]
    Coalesce,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicalExpression {
    pub span: Span,
    pub operator: LogicalOperator,
    pub left: Expr,
    pub right: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignmentOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    PlusAssign,
    #[serde(rename = "-=")]
    MinusAssign,
    #[serde(rename = "*=")]
    TimesAssign,
    #[serde(rename = "/=")]
    DivAssign,
    #[serde(rename = "%=")]
    ModAssign,
    #[serde(rename = "**=")]
    ExponentAssign,
    #[serde(rename = "<<=")]
    ShiftLeftAssign,
    #[serde(rename = ">>=")]
    ShiftRightAssign,
    #[serde(rename = ">>>=")]
    UnsignedShiftRightAssign,
    #[serde(rename = "|=")]
    BitOrAssign,
    #[serde(rename = "^=")]
    BitXorAssign,
    #[serde(rename = "&=")]
    BitAndAssign,
    #[serde(rename = "&&=")]
    AndAssign,
    #[serde(rename = "||=")]
    OrAssign,
    #[serde(rename = "??=")]
    CoalesceAssign,
}

/// `left` is a [`Pat`] rather than a plain identifier so that destructuring
/// assignments (`[a, b] = x`) and member-expression targets (`obj.x = y`,
/// modeled via `Pat::Expr`) share this single node type, matching ESTree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentExpression {
    pub span: Span,
    pub operator: AssignmentOperator,
    pub left: Pat,
    pub right: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalExpression {
    pub span: Span,
    pub test: Expr,
    pub consequent: Expr,
    pub alternate: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceExpression {
    pub span: Span,
    pub expressions: Vec<Expr>,
}

/// Wraps the outermost link of an optional chain (`a?.b.c`, `a?.b()`) so a
/// consumer can tell where short-circuiting can occur without walking every
/// `MemberExpression`/`CallExpression` looking for `optional: true`. Only the
/// outermost node in a chain is wrapped, matching Acorn/ESTree's convention.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainExpression {
    pub span: Span,
    pub expression: Expr,
}

/// `import(specifier)` / `import(specifier, options)` dynamic import.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportExpression {
    pub span: Span,
    pub source: Expr,
    pub options: Option<Expr>,
}

/// `new.target` or `import.meta`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaProperty {
    pub span: Span,
    pub meta: Box<Identifier>,
    pub property: Box<Identifier>,
}

impl_get_span!(
    ThisExpression,
    Super,
    SpreadElement,
    ArrayExpression,
    Property,
    ObjectExpression,
    FunctionExpression,
    ArrowFunctionExpression,
    TemplateElement,
    TemplateLiteral,
    TaggedTemplateExpression,
    MemberExpression,
    CallExpression,
    NewExpression,
    UpdateExpression,
    AwaitExpression,
    YieldExpression,
    UnaryExpression,
    BinaryExpression,
    LogicalExpression,
    AssignmentExpression,
    ConditionalExpression,
    SequenceExpression,
    ChainExpression,
    ImportExpression,
    MetaProperty,
);

impl GetSpan for PropertyKey {
    fn span(&self) -> Span {
        match self {
            PropertyKey::Identifier(n) => n.span(),
            PropertyKey::PrivateIdentifier(n) => n.span(),
            PropertyKey::Literal(n) => n.span(),
            PropertyKey::Expr(n) => n.span(),
        }
    }
}

impl GetSpan for ArrayExpressionElement {
    fn span(&self) -> Span {
        match self {
            ArrayExpressionElement::Expr(e) => e.span(),
            ArrayExpressionElement::Spread(s) => s.span(),
        }
    }
}

impl GetSpan for Argument {
    fn span(&self) -> Span {
        match self {
            Argument::Expr(e) => e.span(),
            Argument::Spread(s) => s.span(),
        }
    }
}
