//! Parser coordinator.
//!
//! Provides the [`Parser`] struct, its error type, and the token-matching
//! helpers shared by the grammar modules. The parser pulls tokens from a
//! [`Lexer`] one at a time; the lexer's current token is the single token
//! of lookahead.
//!
//! Grammar methods live in `expressions`; this module only carries the
//! shared state and infrastructure.

use std::fmt;

use crate::syntax::ast::Expr;
use crate::syntax::intern::Interner;
use crate::syntax::lexer::{LexError, Lexer, SourceLocation, Token, TokenKind};

/// Parser error type.
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Recursive descent parser for Mica expressions.
///
/// Holds its own lexer; create one parser per source buffer. The interner
/// is borrowed so handles in the resulting AST can be resolved by the
/// caller afterwards.
pub struct Parser<'src, 'int> {
    lexer: Lexer<'src, 'int>,
}

/// Parse a single expression covering all of `source`.
///
/// Trailing tokens after the expression are an error.
pub fn parse_expression_str(source: &str, interner: &mut Interner) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(source, interner)?;
    let expr = parser.parse_expression()?;
    parser.expect_eof()?;
    Ok(expr)
}

impl<'src, 'int> Parser<'src, 'int> {
    /// Create a parser over `source` with its first token scanned.
    pub fn new(source: &'src str, interner: &'int mut Interner) -> Result<Self, ParseError> {
        let lexer = Lexer::new(source, interner)?;
        Ok(Self { lexer })
    }

    // ===== Helper methods =====

    pub(crate) fn current(&self) -> &Token {
        self.lexer.token()
    }

    /// Clone of the current token's kind, used where the payload is moved
    /// into an AST node.
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.lexer.token().kind.clone()
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.lexer.location()
    }

    /// Advance past the current token, scanning the next one.
    pub(crate) fn advance(&mut self) -> Result<(), ParseError> {
        self.lexer.next_token()?;
        Ok(())
    }

    pub(crate) fn is_punct(&self, c: char) -> bool {
        self.current().kind.same_kind(&TokenKind::Punct(c))
    }

    /// Consume the current token iff it is the given punctuation.
    pub(crate) fn match_punct(&mut self, c: char) -> Result<bool, ParseError> {
        if self.is_punct(c) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consume the given punctuation or fail, naming both the expected and
    /// the actual token kind.
    pub(crate) fn expect_punct(&mut self, c: char) -> Result<(), ParseError> {
        if self.match_punct(c)? {
            Ok(())
        } else {
            Err(self.error(format!(
                "Expected '{}', found {}",
                c,
                self.current().kind
            )))
        }
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.current().kind.same_kind(&TokenKind::Eof)
    }

    pub(crate) fn expect_eof(&self) -> Result<(), ParseError> {
        if self.is_eof() {
            Ok(())
        } else {
            Err(self.error(format!(
                "Expected end of file, found {}",
                self.current().kind
            )))
        }
    }

    pub(crate) fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            location: self.current_location(),
        }
    }
}
