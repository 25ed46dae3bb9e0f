use crate::impl_get_span;
use ecma_span::Span;
use serde::Serialize;

/// The decoded value of a `Literal` node. `Regex` and `BigInt` literals carry
/// `None` here — their semantic payload lives in `Literal::regex` /
/// `Literal::bigint` instead, matching ESTree's convention that `value` is
/// `null` for those two literal forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Null,
    Bool(bool),
    Number(f64),
    String(Box<str>),
}

/// `regex: {pattern, flags}` payload of a `RegExpLiteral`-flavored `Literal`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegExpLiteralMeta {
    pub pattern: Box<str>,
    pub flags: Box<str>,
}

/// `Literal` — string, numeric, boolean, `null`, regular-expression, and
/// BigInt literals all share this node type, distinguished by which of
/// `value` / `regex` / `bigint` is populated:
///
/// - string/number/bool/null: `value` is `Some`, `regex` and `bigint` `None`.
/// - regex: `value` is `None` (unless the host constructs one — this crate
///   never does), `regex` is `Some`.
/// - BigInt: `value` is `None`, `bigint` is `Some` with the normalized
///   decimal digit string (no leading zeros except a bare `"0"`).
///
/// `raw` is always the exact source text, required for round-tripping
/// (e.g. distinguishing `0x10` from `16`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Literal {
    pub span: Span,
    pub value: Option<LiteralValue>,
    pub raw: Box<str>,
    pub regex: Option<RegExpLiteralMeta>,
    pub bigint: Option<Box<str>>,
}

impl Literal {
    pub fn string(span: Span, value: impl Into<Box<str>>, raw: impl Into<Box<str>>) -> Self {
        Self {
            span,
            value: Some(LiteralValue::String(value.into())),
            raw: raw.into(),
            regex: None,
            bigint: None,
        }
    }

    pub fn number(span: Span, value: f64, raw: impl Into<Box<str>>) -> Self {
        Self {
            span,
            value: Some(LiteralValue::Number(value)),
            raw: raw.into(),
            regex: None,
            bigint: None,
        }
    }

    pub fn bool(span: Span, value: bool, raw: impl Into<Box<str>>) -> Self {
        Self {
            span,
            value: Some(LiteralValue::Bool(value)),
            raw: raw.into(),
            regex: None,
            bigint: None,
        }
    }

    pub fn null(span: Span, raw: impl Into<Box<str>>) -> Self {
        Self { span, value: Some(LiteralValue::Null), raw: raw.into(), regex: None, bigint: None }
    }

    pub fn regex(
        span: Span,
        pattern: impl Into<Box<str>>,
        flags: impl Into<Box<str>>,
        raw: impl Into<Box<str>>,
    ) -> Self {
        Self {
            span,
            value: None,
            raw: raw.into(),
            regex: Some(RegExpLiteralMeta { pattern: pattern.into(), flags: flags.into() }),
            bigint: None,
        }
    }

    pub fn big_int(span: Span, digits: impl Into<Box<str>>, raw: impl Into<Box<str>>) -> Self {
        Self { span, value: None, raw: raw.into(), regex: None, bigint: Some(digits.into()) }
    }
}

impl_get_span!(Literal);
