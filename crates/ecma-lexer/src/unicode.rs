//! Identifier character classification per ECMA-262 `IdentifierStart` /
//! `IdentifierPart`, layered on top of Unicode `XID_Start` / `XID_Continue`.

/// `$` and `_` are always valid identifier starts, in addition to
/// `XID_Start` (ECMA-262's `UnicodeIDStart`).
pub fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || unicode_ident::is_xid_start(c)
}

/// Identifier continuation also accepts U+200C ZWNJ and U+200D ZWJ, per
/// ECMA-262's `UnicodeIDContinue` carve-out for Arabic/Persian/Indic scripts.
pub fn is_identifier_continue(c: char) -> bool {
    c == '$' || c == '_' || c == '\u{200C}' || c == '\u{200D}' || unicode_ident::is_xid_continue(c)
}

/// U+2028 LINE SEPARATOR / U+2029 PARAGRAPH SEPARATOR count as line
/// terminators in ECMA-262, unlike in most other languages.
pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// `WhiteSpace` production: all categories Unicode classifies as whitespace
/// plus BOM and the non-breaking space variants not already in that set.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, '\u{FEFF}') || c.is_whitespace()
}
