//! Mica source code front end.
//!
//! Transforms source text into an expression AST:
//! - [`intern`]: identifier interning (text → identity-comparable handles)
//! - [`lexer`]: tokenization (source text → tokens, one at a time)
//! - [`ast`]: AST node definitions, builders, and the canonical printer
//! - [`parse`]: parser state, errors, and token-matching helpers
//! - `expressions`: the expression grammar itself
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with one iterative loop per binary
//! precedence level and a single token of lookahead held by the lexer.
//! No external parser generator dependencies.
//!
//! The front end deliberately stops at the first error: malformed literals
//! and unexpected tokens surface as `LexError`/`ParseError` results with a
//! line/column location, and nothing after the offending input is consumed.

pub mod ast;
mod expressions;
pub mod intern;
pub mod lexer;
pub mod parse;
