//! Public entry points for parsing ECMAScript source text into an
//! ESTree-compatible [`Program`].
//!
//! This crate is the stable surface every other collaborator (a JSON
//! serializer, a CLI driver, an oracle-comparison test harness) is built
//! against. It re-exports the AST ([`ecma_ast`]) and error ([`ecma_diagnostics`])
//! types so a caller never needs those crates as direct dependencies, and adds
//! nothing of its own beyond the four functions below and [`ParserOptions`]
//! for the one caller-adjustable knob (recursion depth).
//!
//! Script vs. module is a caller decision, not something this crate guesses by
//! default: [`parse`] takes it explicitly, [`parse_script`]/[`parse_module`]
//! pin it, and [`parse_auto_detect`] is offered as an opt-in convenience for
//! callers who would rather have it inferred from the presence of top-level
//! `import`/`export`/`await` (see spec open question (b): silently upgrading a
//! sloppy script to module goal is surprising, so the inferring path is never
//! the default).

pub use ecma_ast as ast;
pub use ecma_ast::Program;
pub use ecma_diagnostics::{ErrorKind, ParseError, ParseResult};
pub use ecma_parser_core::{Parser, ParserOptions};

/// Parses `source` as the given goal (`is_module` selects module vs. script).
#[tracing::instrument(level = "debug", skip(source))]
pub fn parse(source: &str, is_module: bool) -> ParseResult<Program> {
    Parser::parse_program(source, is_module)
}

/// Parses `source` with the script goal symbol, regardless of any
/// `import`/`export` it might contain (those are syntax errors in script
/// goal, matching §4.4's "module vs script goal symbol selection").
pub fn parse_script(source: &str) -> ParseResult<Program> {
    parse(source, false)
}

/// Parses `source` with the module goal symbol: top-level `import`/`export`
/// and top-level `await` are legal, and the program is implicitly strict.
pub fn parse_module(source: &str) -> ParseResult<Program> {
    parse(source, true)
}

/// Infers script vs. module from `source` itself: module goal is chosen when
/// a top-level `import` or `export` declaration is lexically recognizable at
/// the start of the source, script goal otherwise.
///
/// This is a convenience, not the default entry point — it is unable to tell
/// "a sloppy script that happens to start with a statement" apart from
/// "a module whose first statement merely isn't an import/export", so it only
/// inspects the single leading token. Callers that know their goal up front
/// should call [`parse_script`]/[`parse_module`] directly instead.
pub fn parse_auto_detect(source: &str) -> ParseResult<Program> {
    if looks_like_module(source) {
        return parse_module(source);
    }
    parse_script(source)
}

/// True when, ignoring a leading shebang and a directive prologue's string
/// literals, the source's first real token is `import` or `export`.
fn looks_like_module(source: &str) -> bool {
    let mut rest = source;
    if let Some(stripped) = rest.strip_prefix("#!") {
        rest = stripped.split_once('\n').map_or("", |(_, after)| after);
    }
    let trimmed = rest.trim_start();
    trimmed.starts_with("import") && !starts_with_import_call_or_meta(trimmed)
        || trimmed.starts_with("export")
}

/// `import(...)`/`import.meta` are ordinary expressions legal in script goal
/// too, so they must not flip auto-detection to module goal on their own.
fn starts_with_import_call_or_meta(trimmed: &str) -> bool {
    let after = trimmed["import".len()..].trim_start();
    after.starts_with('(') || after.starts_with('.')
}

/// Knobs a parse can be configured with beyond the source text and goal
/// symbol; re-exported from [`ecma_parser_core`] so callers needing the
/// recursion-depth budget adjusted don't need that crate as a direct
/// dependency either. See [`ParserOptions::default`] for the defaults.
pub fn parse_with_options(source: &str, is_module: bool, options: ParserOptions) -> ParseResult<Program> {
    Parser::parse_program_with_options(source, is_module, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_detect_picks_module_for_leading_import() {
        assert!(looks_like_module("import { foo } from \"./dep.js\";\n"));
    }

    #[test]
    fn auto_detect_does_not_upgrade_bare_import_call() {
        assert!(!looks_like_module("import(\"./dep.js\").then(doStuff);"));
    }

    #[test]
    fn auto_detect_does_not_upgrade_import_meta() {
        assert!(!looks_like_module("import.meta.url;"));
    }

    #[test]
    fn auto_detect_picks_module_for_leading_export() {
        assert!(looks_like_module("export const x = 1;"));
    }

    #[test]
    fn auto_detect_defaults_to_script() {
        assert!(!looks_like_module("const x = 1;"));
    }
}
