//! The recursive-descent/Pratt parsing engine that drives [`ecma_lexer::Lexer`]
//! and builds [`ecma_ast`] nodes.
//!
//! This crate owns every grammar decision: statement and declaration
//! dispatch, expression precedence climbing, cover-grammar reinterpretation
//! (parenthesized expression vs. arrow parameter list, object literal vs.
//! object pattern), strict-mode and early-error enforcement, and automatic
//! semicolon insertion. The lexer never guesses at grammar; the parser
//! always tells it which [`ecma_lexer::Goal`] to read the next token
//! against, and re-enters template scanning explicitly at each `}` it
//! determines closes a substitution.
//!
//! [`Parser`] is the single entry point; [`ParserOptions`] carries the one
//! ambient knob (recursion budget) a caller can adjust.

mod engine;
mod tokens;

pub use engine::parser::{Parser, ParserOptions};
pub use engine::ParserState;
pub use tokens::{Checkpoint, TokenStream};
