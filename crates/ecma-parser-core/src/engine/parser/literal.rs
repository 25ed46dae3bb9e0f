use super::Parser;
use ecma_ast::{Literal, TemplateElement, TemplateElementValue};
use ecma_diagnostics::ParseResult;
use ecma_span::Span;
use ecma_token::{NumericLiteralToken, StringLiteralToken, TemplatePart, TokenKind};
use num_bigint::BigUint;
use num_traits::Num;

/// Strips the numeric separators (`_`) ECMA-262 allows between digits; they
/// carry no value and every radix-specific parser below rejects them.
fn strip_separators(s: &str) -> String {
    s.chars().filter(|c| *c != '_').collect()
}

/// Splits a numeric literal's raw text into `(radix, digits)`, consuming the
/// `0x`/`0o`/`0b` prefix (case-insensitively) if present. Legacy octal
/// (`0777`, no prefix) and legacy non-octal (`089`) are left as radix 10 —
/// callers distinguish those by leading-zero inspection when they need to.
fn radix_and_digits(digits: &str) -> (u32, &str) {
    if let Some(rest) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        (16, rest)
    } else if let Some(rest) = digits.strip_prefix("0o").or_else(|| digits.strip_prefix("0O")) {
        (8, rest)
    } else if let Some(rest) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
        (2, rest)
    } else {
        (10, digits)
    }
}

/// True for `0` followed immediately by one or more octal digits and no
/// radix prefix — the Annex B `LegacyOctalIntegerLiteral` production, banned
/// in strict mode and modules.
pub(crate) fn is_legacy_octal(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() > 1
        && bytes[0] == b'0'
        && bytes[1].is_ascii_digit()
        && bytes[1..].iter().all(|b| (b'0'..=b'7').contains(b))
}

/// True for `0` followed by at least one non-octal digit and no radix
/// prefix (`089`) — legal only as a non-strict `NonOctalDecimalIntegerLiteral`.
pub(crate) fn is_legacy_non_octal(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() > 1 && bytes[0] == b'0' && bytes[1].is_ascii_digit() && !is_legacy_octal(raw)
}

impl<'a> Parser<'a> {
    /// Converts a scanned [`NumericLiteralToken`] into the `f64` ESTree's
    /// `Literal.value` wants. BigInt-suffixed tokens never reach here — see
    /// [`Parser::parse_big_int_digits`].
    pub(crate) fn numeric_literal_value(&self, token: &NumericLiteralToken) -> f64 {
        let raw = strip_separators(&token.raw);
        if is_legacy_octal(&raw) {
            return i64::from_str_radix(&raw[1..], 8).map(|v| v as f64).unwrap_or(f64::NAN);
        }
        let (radix, digits) = radix_and_digits(&raw);
        if radix == 10 {
            return digits.parse::<f64>().unwrap_or(f64::NAN);
        }
        u128::from_str_radix(digits, radix).map(|v| v as f64).unwrap_or(f64::NAN)
    }

    /// Normalizes a BigInt literal's digits into ESTree's required form: a
    /// plain decimal digit string with no radix prefix, sign, separators, or
    /// leading zeros (except a bare `"0"`). `raw` still includes the
    /// trailing `n` suffix; this strips it.
    pub(crate) fn big_int_digits(&self, raw: &str) -> Box<str> {
        let without_suffix = raw.strip_suffix('n').unwrap_or(raw);
        let digits = strip_separators(without_suffix);
        let (radix, body) = radix_and_digits(&digits);
        let value = BigUint::from_str_radix(body, radix).unwrap_or_else(|_| BigUint::from(0u32));
        value.to_str_radix(10).into_boxed_str()
    }

    /// Early error (spec §4.2, §8): `LegacyOctalIntegerLiteral` and
    /// `NonOctalDecimalIntegerLiteral` (Annex B) are both banned once
    /// `strict` is raised, whether by a directive prologue, module goal, or
    /// class-body nesting.
    pub(crate) fn check_legacy_numeric_literal(&self, raw: &str, offset: u32) -> ParseResult<()> {
        if self.state.strict && (is_legacy_octal(raw) || is_legacy_non_octal(raw)) {
            return Err(self.early_error_at(offset, "octal literals are not allowed in strict mode"));
        }
        Ok(())
    }

    pub(crate) fn build_numeric_literal(&self, span: Span, token: &NumericLiteralToken) -> Literal {
        if token.is_big_int {
            Literal::big_int(span, self.big_int_digits(&token.raw), token.raw.as_ref())
        } else {
            Literal::number(span, self.numeric_literal_value(token), token.raw.as_ref())
        }
    }

    pub(crate) fn build_string_literal(&self, span: Span, token: &StringLiteralToken) -> Literal {
        Literal::string(span, token.cooked.as_ref(), token.raw.as_ref())
    }

    /// Builds a `TemplateElement` from a scanned quasi. `cooked` is `None`
    /// when the quasi held an invalid escape — legal only in a tagged
    /// template, which callers already enforce before reaching here.
    pub(crate) fn build_template_element(&self, span: Span, part: &TemplatePart) -> TemplateElement {
        TemplateElement {
            span,
            tail: part.tail,
            value: TemplateElementValue {
                cooked: part.cooked.as_ref().map(|s| Box::from(s.as_ref())),
                raw: Box::from(part.raw.as_ref()),
            },
        }
    }

    /// Extracts the scanned quasi payload from a template-flavored token
    /// kind, panicking on any other kind — callers only invoke this right
    /// after matching one of the four template `TokenKind` variants.
    pub(crate) fn template_part_of(kind: &TokenKind) -> &TemplatePart {
        match kind {
            TokenKind::TemplateHead(p)
            | TokenKind::TemplateMiddle(p)
            | TokenKind::TemplateTail(p)
            | TokenKind::NoSubstitutionTemplate(p) => p,
            _ => unreachable!("template_part_of called on a non-template token"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_octal_detection() {
        assert!(is_legacy_octal("0777"));
        assert!(!is_legacy_octal("0"));
        assert!(!is_legacy_octal("089"));
        assert!(is_legacy_non_octal("089"));
    }

    #[test]
    fn separators_are_stripped() {
        assert_eq!(strip_separators("1_000_000"), "1000000");
    }
}
