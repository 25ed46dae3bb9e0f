//! A context-aware ECMAScript lexer.
//!
//! ECMAScript's grammar cannot be tokenized in isolation: whether `/` starts
//! a regular expression or divides two values, and whether a `}` closes a
//! block or a template substitution, both depend on grammar context the
//! lexer alone does not have. This crate exposes that context explicitly
//! rather than guessing:
//!
//! - [`Goal`] lets the caller say which grammar `/` should be read against
//!   for this token.
//! - [`Lexer::next_template_part`] lets the caller re-enter template
//!   scanning at a `}` it has determined closes a substitution, rather than
//!   tokenizing it as an ordinary punctuator.
//!
//! Everything else — numeric literals (including separators and BigInt
//! suffixes), string and template escape decoding, Unicode identifier
//! escapes, and comment/whitespace skipping for ASI — is unconditional.

mod lexer;
mod unicode;

pub use lexer::{Goal, Lexer};
