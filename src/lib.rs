//! # Introduction
//!
//! Mica is a small C-like systems language.  This crate is its front end:
//! a lexer, a string interner, and an expression parser, each usable on its
//! own or through the one-call [`syntax::parse::parse_expression_str`]
//! entry point.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → canonical printer
//! ```
//!
//! 1. [`syntax::lexer`] — tokenises the source one token at a time,
//!    interning names through [`syntax::intern::Interner`].
//! 2. [`syntax::parse`] — recursive-descent parser producing
//!    [`syntax::ast::Expr`] trees.
//! 3. [`syntax::ast`] — AST nodes plus [`syntax::ast::print_expr`], a
//!    fully parenthesised prefix printer that makes grouping and
//!    associativity explicit.
//!
//! The [`buf`] module provides [`buf::Buf`], the growable array used for
//! every variable-length sequence in the front end (string literal bytes,
//! call arguments, function type parameters).
//!
//! ## Example
//!
//! ```
//! use mica::syntax::ast::print_expr;
//! use mica::syntax::intern::Interner;
//! use mica::syntax::parse::parse_expression_str;
//!
//! let mut interner = Interner::new();
//! let expr = parse_expression_str("2*3+4*5", &mut interner).unwrap();
//! assert_eq!(print_expr(&expr, &interner), "(+ (* 2 3) (* 4 5))");
//! ```

pub mod buf;
pub mod syntax;
