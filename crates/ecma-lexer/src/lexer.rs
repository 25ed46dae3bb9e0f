use crate::unicode::{is_identifier_continue, is_identifier_start, is_line_terminator, is_whitespace};
use ecma_diagnostics::{ParseError, ParseResult};
use ecma_span::{LineIndex, Position, Span};
use ecma_token::{
    IdentifierToken, Keyword, NumericLiteralToken, Punct, RegExpLiteralToken, StringLiteralToken,
    TemplatePart, Token, TokenKind,
};

/// Which grammar the lexer should disambiguate `/` (and, for the sake of
/// uniformity, `}`) against. The parser picks this per call based on the
/// grammar position it is in — a lone lexer can never know on its own
/// whether `/` starts a regex or divides two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    /// `/` divides; a value cannot start here.
    Default,
    /// `/` starts a `RegularExpressionLiteral`.
    Regex,
}

/// A byte-oriented scanner over UTF-8 source text, producing one [`Token`]
/// at a time. Carries no template-nesting state of its own — the parser
/// tracks brace depth and calls [`Lexer::next_template_part`] instead of
/// [`Lexer::next_token`] whenever a `}` it is about to scan closes a
/// `${ ... }` substitution rather than a block or object literal.
///
/// `Clone` is cheap enough (one `u32` plus a shared-shape line-starts table)
/// to snapshot for the parser's speculative-parse checkpoints.
#[derive(Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: u32,
    line_index: LineIndex,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, bytes: source.as_bytes(), pos: 0, line_index: LineIndex::new(source) }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn position(&self, offset: u32) -> Position {
        self.line_index.position(self.source, offset)
    }

    /// Consumes a leading `#!...` line, if present. Must be called at most
    /// once, before the first call to [`Lexer::next_token`].
    pub fn skip_shebang(&mut self) -> Option<Box<str>> {
        if self.bytes.starts_with(b"#!") {
            let start = self.pos + 2;
            let mut end = start;
            while let Some(c) = self.char_at(end) {
                if is_line_terminator(c) {
                    break;
                }
                end += c.len_utf8() as u32;
            }
            let text = self.source[start as usize..end as usize].into();
            self.pos = end;
            Some(text)
        } else {
            None
        }
    }

    fn char_at(&self, offset: u32) -> Option<char> {
        self.source.get(offset as usize..)?.chars().next()
    }

    fn peek(&self) -> Option<char> {
        self.char_at(self.pos)
    }

    fn peek_at(&self, ahead_chars: usize) -> Option<char> {
        self.source.get(self.pos as usize..)?.chars().nth(ahead_chars)
    }

    fn byte(&self, offset: u32) -> Option<u8> {
        self.bytes.get(offset as usize).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.source[self.pos as usize..].starts_with(s)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8() as u32;
        Some(c)
    }

    fn err(&self, offset: u32, message: impl Into<String>) -> ParseError {
        ParseError::lex(message, offset, self.position(offset))
    }

    /// Finds the next byte-level line terminator from `from` on: ASCII
    /// `\n`/`\r`, or the 3-byte encoding of U+2028/U+2029 (lead byte `0xE2`,
    /// verified rather than assumed, since `0xE2` also leads plenty of
    /// unrelated codepoints). Returns the end of input when none is found.
    /// Used to fast-skip comment bodies with `memchr` instead of decoding
    /// every character, the way `perl-lexer` fast-skips to the next `\n`.
    fn scan_to_line_terminator(&self, from: u32) -> u32 {
        let mut pos = from as usize;
        loop {
            let rest = &self.bytes[pos..];
            let Some(rel) = memchr::memchr3(b'\n', b'\r', 0xE2, rest) else {
                return self.bytes.len() as u32;
            };
            let at = pos + rel;
            if self.bytes[at] == 0xE2 {
                let is_separator = rest.get(rel + 1) == Some(&0x80) && matches!(rest.get(rel + 2), Some(0xA8 | 0xA9));
                if is_separator {
                    return at as u32;
                }
                pos = at + 1;
                continue;
            }
            return at as u32;
        }
    }

    /// Finds the byte offset just past the closing `*/` of a block comment
    /// started at `from` (the first byte of the comment body, after `/*`).
    /// `None` if the input ends first.
    fn scan_block_comment_end(&self, from: u32) -> Option<u32> {
        let mut pos = from as usize;
        loop {
            let rest = &self.bytes[pos..];
            let rel = memchr::memchr(b'*', rest)?;
            let at = pos + rel;
            if self.bytes.get(at + 1) == Some(&b'/') {
                return Some((at + 2) as u32);
            }
            pos = at + 1;
        }
    }

    /// Finds the next byte among `a`, `b`, `c`, or (if given) `d` from the
    /// current position, or the end of input — the fast-skip primitive
    /// `scan_string`/`scan_template` use to copy long runs of ordinary
    /// characters in one slice instead of one `char` at a time.
    fn find_any_byte(&self, a: u8, b: u8, c: u8, d: Option<u8>) -> u32 {
        let rest = &self.bytes[self.pos as usize..];
        let first = memchr::memchr3(a, b, c, rest);
        let fourth = d.and_then(|d| memchr::memchr(d, rest));
        let rel = match (first, fourth) {
            (Some(x), Some(y)) => x.min(y),
            (Some(x), None) | (None, Some(x)) => x,
            (None, None) => rest.len(),
        };
        self.pos + rel as u32
    }

    /// Skips whitespace and comments, reporting whether a line terminator
    /// (needed for ASI) was crossed.
    fn skip_trivia(&mut self) -> ParseResult<bool> {
        let mut saw_line_terminator = false;
        loop {
            match self.peek() {
                Some(c) if is_line_terminator(c) => {
                    saw_line_terminator = true;
                    self.bump();
                }
                Some(c) if is_whitespace(c) => {
                    self.bump();
                }
                Some('/') if self.peek_at(1) == Some('/') => {
                    self.pos += 2;
                    self.pos = self.scan_to_line_terminator(self.pos);
                }
                Some('/') if self.peek_at(1) == Some('*') => {
                    let start = self.pos;
                    let body_start = self.pos + 2;
                    let Some(after) = self.scan_block_comment_end(body_start) else {
                        return Err(self.err(start, "unterminated block comment"));
                    };
                    if memchr::memchr2(b'\n', b'\r', &self.bytes[body_start as usize..after as usize]).is_some()
                        || self.bytes[body_start as usize..after as usize].windows(3).any(|w| w == [0xE2, 0x80, 0xA8] || w == [0xE2, 0x80, 0xA9])
                    {
                        saw_line_terminator = true;
                    }
                    self.pos = after;
                }
                _ => break,
            }
        }
        Ok(saw_line_terminator)
    }

    pub fn next_token(&mut self, goal: Goal) -> ParseResult<Token> {
        let preceding_line_terminator = self.skip_trivia()?;
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, Span::new(start, start), preceding_line_terminator));
        };

        let kind = match c {
            '"' | '\'' => self.scan_string(c)?,
            '`' => self.scan_template(true)?,
            '#' => self.scan_private_identifier()?,
            c if c.is_ascii_digit() => self.scan_number()?,
            '.' if matches!(self.peek_at(1), Some(d) if d.is_ascii_digit()) => self.scan_number()?,
            '/' if goal == Goal::Regex => self.scan_regex()?,
            c if is_identifier_start(c) || c == '\\' => self.scan_identifier_or_keyword()?,
            _ => self.scan_punct()?,
        };

        let span = Span::new(start, self.pos);
        Ok(Token::new(kind, span, preceding_line_terminator))
    }

    /// Called by the parser in place of [`Lexer::next_token`] when it has
    /// determined that the `}` about to be consumed closes a template
    /// substitution (`${ ... }`) rather than a block statement or object
    /// literal — the only way to resolve that ambiguity is for the parser
    /// to track brace depth itself. Re-enters template-literal scanning
    /// starting at that `}`.
    pub fn next_template_part(&mut self) -> ParseResult<Token> {
        let start = self.pos;
        debug_assert_eq!(self.peek(), Some('}'));
        self.pos += 1;
        let kind = self.scan_template(false)?;
        Ok(Token::new(kind, Span::new(start, self.pos), false))
    }

    fn scan_private_identifier(&mut self) -> ParseResult<TokenKind> {
        let start = self.pos;
        self.bump(); // '#'
        let Some(c) = self.peek() else {
            return Err(self.err(start, "expected identifier after '#'"));
        };
        if !(is_identifier_start(c) || c == '\\') {
            return Err(self.err(start, "expected identifier after '#'"));
        }
        let name = self.scan_identifier_name()?;
        Ok(TokenKind::PrivateIdentifier(name.into()))
    }

    fn scan_identifier_or_keyword(&mut self) -> ParseResult<TokenKind> {
        let (name, contained_escapes) = self.scan_identifier_name_with_escape_flag()?;
        if !contained_escapes {
            if let Some(keyword) = Keyword::from_str(&name) {
                return Ok(TokenKind::Keyword(keyword));
            }
        }
        Ok(TokenKind::Identifier(IdentifierToken { name: name.into(), contained_escapes }))
    }

    fn scan_identifier_name(&mut self) -> ParseResult<String> {
        Ok(self.scan_identifier_name_with_escape_flag()?.0)
    }

    /// Decodes `\uXXXX` / `\u{X...}` escapes inline, per ECMA-262
    /// `IdentifierStart`/`IdentifierPart`'s `UnicodeEscapeSequence` alt.
    /// A keyword spelled with an escape (`if` for `if`) lexes as a
    /// plain identifier, never as that keyword — `contained_escapes` lets
    /// the caller enforce that.
    fn scan_identifier_name_with_escape_flag(&mut self) -> ParseResult<(String, bool)> {
        let start = self.pos;
        let mut out = String::new();
        let mut contained_escapes = false;
        let mut first = true;
        loop {
            match self.peek() {
                Some('\\') if self.peek_at(1) == Some('u') => {
                    contained_escapes = true;
                    let esc_start = self.pos;
                    self.pos += 2;
                    let c = self.scan_unicode_escape_value(esc_start)?;
                    let ok = if first { is_identifier_start(c) } else { is_identifier_continue(c) };
                    if !ok {
                        return Err(self.err(esc_start, "invalid identifier escape"));
                    }
                    out.push(c);
                }
                Some(c) if (first && is_identifier_start(c)) || (!first && is_identifier_continue(c)) => {
                    out.push(c);
                    self.bump();
                }
                _ => break,
            }
            first = false;
        }
        if out.is_empty() {
            return Err(self.err(start, "expected identifier"));
        }
        Ok((out, contained_escapes))
    }

    /// Scans the digits of a `\uXXXX` or `\u{X...}` escape, assuming `\u`
    /// has already been consumed, and returns the decoded character.
    fn scan_unicode_escape_value(&mut self, start: u32) -> ParseResult<char> {
        let code = if self.peek() == Some('{') {
            self.bump();
            let digits_start = self.pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
                self.bump();
            }
            let digits = &self.source[digits_start as usize..self.pos as usize];
            if self.peek() != Some('}') || digits.is_empty() {
                return Err(self.err(start, "malformed \\u{...} escape"));
            }
            self.bump();
            u32::from_str_radix(digits, 16)
                .map_err(|_| self.err(start, "malformed \\u{...} escape"))?
        } else {
            self.scan_fixed_hex_digits(start, 4)?
        };
        char::from_u32(code).ok_or_else(|| self.err(start, "escape does not encode a scalar value"))
    }

    fn scan_fixed_hex_digits(&mut self, start: u32, n: usize) -> ParseResult<u32> {
        let digits_start = self.pos;
        for _ in 0..n {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    self.bump();
                }
                _ => return Err(self.err(start, "malformed escape sequence")),
            }
        }
        let digits = &self.source[digits_start as usize..self.pos as usize];
        u32::from_str_radix(digits, 16).map_err(|_| self.err(start, "malformed escape sequence"))
    }

    fn scan_number(&mut self) -> ParseResult<TokenKind> {
        let start = self.pos;
        let mut is_big_int = false;

        if self.peek() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X')) {
            self.pos += 2;
            self.scan_digits(|c| c.is_ascii_hexdigit())?;
        } else if self.peek() == Some('0') && matches!(self.peek_at(1), Some('o' | 'O')) {
            self.pos += 2;
            self.scan_digits(|c| matches!(c, '0'..='7'))?;
        } else if self.peek() == Some('0') && matches!(self.peek_at(1), Some('b' | 'B')) {
            self.pos += 2;
            self.scan_digits(|c| matches!(c, '0' | '1'))?;
        } else if self.peek() == Some('0') && matches!(self.peek_at(1), Some('0'..='9')) {
            // Legacy octal / non-octal decimal with leading zero; the
            // grammar accepts the digits here, strict-mode rejection is an
            // early error the parser raises, not a lex error.
            while matches!(self.peek(), Some('0'..='9')) {
                self.bump();
            }
        } else {
            self.scan_digits(|c| c.is_ascii_digit())?;
            if self.peek() == Some('.') {
                self.bump();
                self.scan_digits(|c| c.is_ascii_digit())?;
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                let save = self.pos;
                self.pos += 1;
                if matches!(self.peek(), Some('+' | '-')) {
                    self.pos += 1;
                }
                if matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.scan_digits(|c| c.is_ascii_digit())?;
                } else {
                    self.pos = save;
                }
            }
        }

        if self.peek() == Some('n') {
            is_big_int = true;
            self.bump();
        }

        if matches!(self.peek(), Some(c) if is_identifier_start(c) || c.is_ascii_digit()) {
            return Err(self.err(self.pos, "identifier starts immediately after numeric literal"));
        }

        let raw = self.source[start as usize..self.pos as usize].into();
        Ok(TokenKind::NumericLiteral(NumericLiteralToken { raw, is_big_int }))
    }

    /// Scans a run of digits matched by `pred`, allowing `_` as a
    /// numeric separator between (never adjacent to, never leading/trailing)
    /// digits.
    fn scan_digits(&mut self, pred: impl Fn(char) -> bool) -> ParseResult<()> {
        let start = self.pos;
        let mut last_was_digit = false;
        let mut any = false;
        loop {
            match self.peek() {
                Some(c) if pred(c) => {
                    self.bump();
                    last_was_digit = true;
                    any = true;
                }
                Some('_') if last_was_digit => {
                    self.bump();
                    last_was_digit = false;
                }
                _ => break,
            }
        }
        if !last_was_digit && any {
            return Err(self.err(self.pos, "numeric separator cannot appear at the end of a digit run"));
        }
        if !any {
            return Err(self.err(start, "expected at least one digit"));
        }
        Ok(())
    }

    fn scan_string(&mut self, quote: char) -> ParseResult<TokenKind> {
        let start = self.pos;
        self.bump();
        let mut cooked = String::new();
        loop {
            match self.peek() {
                None => return Err(self.err(start, "unterminated string literal")),
                Some(c) if c == quote => {
                    self.bump();
                    break;
                }
                Some(c) if is_line_terminator(c) && c != '\u{2028}' && c != '\u{2029}' => {
                    return Err(self.err(start, "unterminated string literal"));
                }
                Some('\\') => {
                    self.bump();
                    if let Some(decoded) = self.scan_escape_sequence()? {
                        cooked.push(decoded);
                    }
                }
                Some(_) => {
                    let stop = self.find_any_byte(quote as u8, b'\\', b'\n', Some(b'\r'));
                    cooked.push_str(&self.source[self.pos as usize..stop as usize]);
                    self.pos = stop;
                }
            }
        }
        let raw = self.source[start as usize..self.pos as usize].into();
        Ok(TokenKind::StringLiteral(StringLiteralToken { cooked: cooked.into(), raw }))
    }

    /// Decodes the escape sequence following a `\` already consumed by the
    /// caller. Returns `None` for a line-continuation escape (`\` followed
    /// directly by a line terminator), which contributes nothing to the
    /// cooked value.
    fn scan_escape_sequence(&mut self) -> ParseResult<Option<char>> {
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Err(self.err(start, "unterminated escape sequence"));
        };
        let decoded = match c {
            'n' => {
                self.bump();
                Some('\n')
            }
            't' => {
                self.bump();
                Some('\t')
            }
            'r' => {
                self.bump();
                Some('\r')
            }
            'b' => {
                self.bump();
                Some('\u{8}')
            }
            'f' => {
                self.bump();
                Some('\u{C}')
            }
            'v' => {
                self.bump();
                Some('\u{B}')
            }
            '0' if !matches!(self.peek_at(1), Some('0'..='9')) => {
                self.bump();
                Some('\0')
            }
            'x' => {
                self.bump();
                let code = self.scan_fixed_hex_digits(start, 2)?;
                Some(char::from_u32(code).ok_or_else(|| self.err(start, "invalid \\x escape"))?)
            }
            'u' => {
                self.bump();
                Some(self.scan_unicode_escape_value(start)?)
            }
            c if is_line_terminator(c) => {
                // CRLF counts as a single line terminator for line continuation.
                self.bump();
                if c == '\r' && self.peek() == Some('\n') {
                    self.bump();
                }
                None
            }
            c => {
                self.bump();
                Some(c)
            }
        };
        Ok(decoded)
    }

    /// Scans a template literal. `at_backtick` distinguishes the opening
    /// backtick (produces `NoSubstitutionTemplate`/`TemplateHead`) from a
    /// re-entry after a `}` (produces `TemplateMiddle`/`TemplateTail`).
    fn scan_template(&mut self, at_backtick: bool) -> ParseResult<TokenKind> {
        let start = self.pos;
        if at_backtick {
            self.bump(); // '`'
        }
        let raw_start = self.pos;
        let mut cooked = String::new();
        let mut cooked_valid = true;
        loop {
            match self.peek() {
                None => return Err(self.err(start, "unterminated template literal")),
                Some('`') => {
                    let raw = self.source[raw_start as usize..self.pos as usize].into();
                    self.bump();
                    let part = TemplatePart { cooked: cooked_valid.then(|| cooked.into()), raw, tail: true };
                    return Ok(if at_backtick {
                        TokenKind::NoSubstitutionTemplate(part)
                    } else {
                        TokenKind::TemplateTail(part)
                    });
                }
                Some('$') if self.peek_at(1) == Some('{') => {
                    let raw = self.source[raw_start as usize..self.pos as usize].into();
                    self.pos += 2;
                    let part = TemplatePart { cooked: cooked_valid.then(|| cooked.into()), raw, tail: false };
                    return Ok(if at_backtick {
                        TokenKind::TemplateHead(part)
                    } else {
                        TokenKind::TemplateMiddle(part)
                    });
                }
                Some('\\') => {
                    self.bump();
                    match self.scan_escape_sequence() {
                        Ok(Some(decoded)) => cooked.push(decoded),
                        Ok(None) => {}
                        // An invalid escape only poisons `cooked` (tagged
                        // templates observe `undefined`); `raw` still needs
                        // the full literal, so scanning continues.
                        Err(_) => cooked_valid = false,
                    }
                }
                Some(_) => {
                    let stop = self.find_template_stop();
                    cooked.push_str(&self.source[self.pos as usize..stop as usize]);
                    self.pos = stop;
                }
            }
        }
    }

    /// Finds the next byte that could end a plain run inside a template
    /// body: backtick, backslash, or a `$` that is actually `${`. A lone
    /// `$` not followed by `{` is ordinary text and scanning continues past
    /// it — mirrors the one-at-a-time `'$' if peek_at(1) == Some('{')` check
    /// this replaces, just amortized over a `memchr3` scan instead of a
    /// per-char comparison.
    fn find_template_stop(&self) -> u32 {
        let mut pos = self.pos as usize;
        loop {
            let rest = &self.bytes[pos..];
            let Some(rel) = memchr::memchr3(b'`', b'\\', b'$', rest) else {
                return self.bytes.len() as u32;
            };
            let at = pos + rel;
            if self.bytes[at] == b'$' && self.bytes.get(at + 1) != Some(&b'{') {
                pos = at + 1;
                continue;
            }
            return at as u32;
        }
    }

    fn scan_regex(&mut self) -> ParseResult<TokenKind> {
        let start = self.pos;
        self.bump(); // '/'
        let pattern_start = self.pos;
        let mut in_class = false;
        loop {
            match self.peek() {
                None => return Err(self.err(start, "unterminated regular expression literal")),
                Some(c) if is_line_terminator(c) => {
                    return Err(self.err(start, "unterminated regular expression literal"));
                }
                Some('\\') => {
                    self.bump();
                    if self.peek().is_none() || is_line_terminator(self.peek().unwrap()) {
                        return Err(self.err(start, "unterminated regular expression literal"));
                    }
                    self.bump();
                }
                Some('[') => {
                    in_class = true;
                    self.bump();
                }
                Some(']') if in_class => {
                    in_class = false;
                    self.bump();
                }
                Some('/') if !in_class => {
                    break;
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
        let pattern = self.source[pattern_start as usize..self.pos as usize].into();
        self.bump(); // closing '/'
        let flags_start = self.pos;
        while matches!(self.peek(), Some(c) if is_identifier_continue(c)) {
            self.bump();
        }
        let flags = self.source[flags_start as usize..self.pos as usize].into();
        Ok(TokenKind::RegExpLiteral(RegExpLiteralToken { pattern, flags }))
    }

    fn scan_punct(&mut self) -> ParseResult<TokenKind> {
        let start = self.pos;
        macro_rules! take {
            ($len:expr, $punct:expr) => {{
                self.pos += $len;
                return Ok(TokenKind::Punct($punct));
            }};
        }
        if self.starts_with(">>>=") {
            take!(4, Punct::GtGtGtEq)
        }
        if self.starts_with("...") {
            take!(3, Punct::Ellipsis)
        }
        if self.starts_with("===") {
            take!(3, Punct::EqEqEq)
        }
        if self.starts_with("!==") {
            take!(3, Punct::NotEqEq)
        }
        if self.starts_with("**=") {
            take!(3, Punct::StarStarEq)
        }
        if self.starts_with("<<=") {
            take!(3, Punct::LtLtEq)
        }
        if self.starts_with(">>=") {
            take!(3, Punct::GtGtEq)
        }
        if self.starts_with(">>>") {
            take!(3, Punct::GtGtGt)
        }
        if self.starts_with("&&=") {
            take!(3, Punct::AmpAmpEq)
        }
        if self.starts_with("||=") {
            take!(3, Punct::PipePipeEq)
        }
        if self.starts_with("??=") {
            take!(3, Punct::QuestionQuestionEq)
        }
        if self.starts_with("?.") && !matches!(self.peek_at(2), Some(c) if c.is_ascii_digit()) {
            take!(2, Punct::QuestionDot)
        }
        if self.starts_with("??") {
            take!(2, Punct::QuestionQuestion)
        }
        if self.starts_with("==") {
            take!(2, Punct::EqEq)
        }
        if self.starts_with("!=") {
            take!(2, Punct::NotEq)
        }
        if self.starts_with("<=") {
            take!(2, Punct::LtEq)
        }
        if self.starts_with(">=") {
            take!(2, Punct::GtEq)
        }
        if self.starts_with("**") {
            take!(2, Punct::StarStar)
        }
        if self.starts_with("++") {
            take!(2, Punct::PlusPlus)
        }
        if self.starts_with("--") {
            take!(2, Punct::MinusMinus)
        }
        if self.starts_with("<<") {
            take!(2, Punct::LtLt)
        }
        if self.starts_with(">>") {
            take!(2, Punct::GtGt)
        }
        if self.starts_with("&&") {
            take!(2, Punct::AmpAmp)
        }
        if self.starts_with("||") {
            take!(2, Punct::PipePipe)
        }
        if self.starts_with("=>") {
            take!(2, Punct::Arrow)
        }
        if self.starts_with("+=") {
            take!(2, Punct::PlusEq)
        }
        if self.starts_with("-=") {
            take!(2, Punct::MinusEq)
        }
        if self.starts_with("*=") {
            take!(2, Punct::StarEq)
        }
        if self.starts_with("/=") {
            take!(2, Punct::SlashEq)
        }
        if self.starts_with("%=") {
            take!(2, Punct::PercentEq)
        }
        if self.starts_with("&=") {
            take!(2, Punct::AmpEq)
        }
        if self.starts_with("|=") {
            take!(2, Punct::PipeEq)
        }
        if self.starts_with("^=") {
            take!(2, Punct::CaretEq)
        }
        let punct = match self.peek() {
            Some('{') => Punct::LBrace,
            Some('}') => Punct::RBrace,
            Some('(') => Punct::LParen,
            Some(')') => Punct::RParen,
            Some('[') => Punct::LBracket,
            Some(']') => Punct::RBracket,
            Some('.') => Punct::Dot,
            Some(';') => Punct::Semi,
            Some(',') => Punct::Comma,
            Some('<') => Punct::Lt,
            Some('>') => Punct::Gt,
            Some('+') => Punct::Plus,
            Some('-') => Punct::Minus,
            Some('*') => Punct::Star,
            Some('/') => Punct::Slash,
            Some('%') => Punct::Percent,
            Some('&') => Punct::Amp,
            Some('|') => Punct::Pipe,
            Some('^') => Punct::Caret,
            Some('!') => Punct::Bang,
            Some('~') => Punct::Tilde,
            Some('?') => Punct::Question,
            Some(':') => Punct::Colon,
            Some('=') => Punct::Eq,
            Some('`') => Punct::Backtick,
            Some(c) => return Err(self.err(start, format!("unexpected character '{c}'"))),
            None => return Err(self.err(start, "unexpected end of input")),
        };
        self.pos += 1;
        Ok(TokenKind::Punct(punct))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex_all(src: &str, goal: Goal) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token(goal).expect("lex error");
            if tok.is_eof() {
                break;
            }
            out.push(tok.kind);
        }
        out
    }

    #[test]
    fn division_vs_regex_is_goal_driven() {
        let div = lex_all("a / b", Goal::Default);
        assert!(matches!(div[1], TokenKind::Punct(Punct::Slash)));

        let mut lexer = Lexer::new("/ab+c/g");
        let tok = lexer.next_token(Goal::Regex).unwrap();
        match tok.kind {
            TokenKind::RegExpLiteral(r) => {
                assert_eq!(&*r.pattern, "ab+c");
                assert_eq!(&*r.flags, "g");
            }
            other => panic!("expected regex literal, got {other:?}"),
        }
    }

    #[test]
    fn numeric_separators_and_bigint_suffix() {
        let toks = lex_all("1_000_000n", Goal::Default);
        match &toks[0] {
            TokenKind::NumericLiteral(n) => {
                assert_eq!(&*n.raw, "1_000_000n");
                assert!(n.is_big_int);
            }
            other => panic!("expected numeric literal, got {other:?}"),
        }
    }

    #[test]
    fn string_escape_decoding() {
        let toks = lex_all(r#""a\nbc""#, Goal::Default);
        match &toks[0] {
            TokenKind::StringLiteral(s) => assert_eq!(&*s.cooked, "a\nbc"),
            other => panic!("expected string literal, got {other:?}"),
        }
    }

    #[test]
    fn template_head_and_reentry() {
        let mut lexer = Lexer::new("`a${1}b`");
        let head = lexer.next_token(Goal::Default).unwrap();
        match head.kind {
            TokenKind::TemplateHead(p) => assert_eq!(&*p.raw, "a"),
            other => panic!("expected template head, got {other:?}"),
        }
        let num = lexer.next_token(Goal::Default).unwrap();
        assert!(matches!(num.kind, TokenKind::NumericLiteral(_)));
        let tail = lexer.next_template_part().unwrap();
        match tail.kind {
            TokenKind::TemplateTail(p) => assert_eq!(&*p.raw, "b"),
            other => panic!("expected template tail, got {other:?}"),
        }
    }

    #[test]
    fn contextual_keyword_lexes_as_identifier_when_escaped() {
        let toks = lex_all("\\u0069f", Goal::Default);
        match &toks[0] {
            TokenKind::Identifier(id) => {
                assert_eq!(&*id.name, "if");
                assert!(id.contained_escapes);
            }
            other => panic!("expected identifier, got {other:?}"),
        }
    }

    #[test]
    fn optional_chain_not_confused_with_ternary_numeric() {
        let toks = lex_all("a?.3:b", Goal::Default);
        assert!(matches!(toks[1], TokenKind::Punct(Punct::Question)));
    }

    #[test]
    fn preceding_line_terminator_is_tracked_for_asi() {
        let mut lexer = Lexer::new("a\nb");
        let a = lexer.next_token(Goal::Default).unwrap();
        assert!(!a.preceding_line_terminator);
        let b = lexer.next_token(Goal::Default).unwrap();
        assert!(b.preceding_line_terminator);
    }
}
