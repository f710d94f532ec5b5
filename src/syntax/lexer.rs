//! Lexer (tokenizer) for Mica source code.
//!
//! Pull-based: the lexer owns a read-only cursor into the source and exactly
//! one current [`Token`]; [`Lexer::next_token`] advances to the next one.
//! Identifiers are interned through a caller-supplied [`Interner`], so name
//! tokens carry cheap identity-comparable [`Name`] handles.
//!
//! Malformed literals (unterminated string/char, invalid escape, digit out
//! of range for its base, numeric overflow, missing exponent digit) produce
//! a [`LexError`]; there is no error-token representation and no recovery
//! beyond not re-reading consumed characters.

use std::fmt;

use crate::buf::Buf;
use crate::syntax::intern::{Interner, Name};

/// Source location information for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Notation an integer literal was written in.
///
/// Recorded so a downstream pretty-printer can reproduce the source form;
/// char literals scan to integer tokens tagged [`IntFormat::Char`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntFormat {
    Dec,
    Bin,
    Oct,
    Hex,
    Char,
}

/// All token kinds produced by the lexer.
///
/// Literal payloads live inside their variant, so a token's kind and its
/// payload cannot disagree. Single-character tokens are [`TokenKind::Punct`]
/// with the character itself as the kind; the remaining variants are the
/// multi-character operators, recognized by greedy longest match.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Eof,

    // Literals and names
    Int { value: u64, format: IntFormat },
    Float { value: f64 },
    Str { value: String },
    Name { name: Name },

    /// Any other single character as its own kind.
    Punct(char),

    // Multi-character operators
    Lshift,       // <<
    LshiftAssign, // <<=
    Rshift,       // >>
    RshiftAssign, // >>=
    EqEq,         // ==
    NotEq,        // !=
    LtEq,         // <=
    GtEq,         // >=
    AndAnd,       // &&
    OrOr,         // ||
    Inc,          // ++
    Dec,          // --
    ColonAssign,  // :=
    AddAssign,    // +=
    SubAssign,    // -=
    MulAssign,    // *=
    DivAssign,    // /=
    ModAssign,    // %=
    AndAssign,    // &=
    OrAssign,     // |=
    XorAssign,    // ^=
}

impl TokenKind {
    /// Whether two kinds are the same for matching purposes: literal
    /// payloads are ignored, punctuation characters are not.
    pub fn same_kind(&self, other: &TokenKind) -> bool {
        match (self, other) {
            (TokenKind::Punct(a), TokenKind::Punct(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }

    fn operator_str(&self) -> Option<&'static str> {
        let s = match self {
            TokenKind::Lshift => "<<",
            TokenKind::LshiftAssign => "<<=",
            TokenKind::Rshift => ">>",
            TokenKind::RshiftAssign => ">>=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Inc => "++",
            TokenKind::Dec => "--",
            TokenKind::ColonAssign => ":=",
            TokenKind::AddAssign => "+=",
            TokenKind::SubAssign => "-=",
            TokenKind::MulAssign => "*=",
            TokenKind::DivAssign => "/=",
            TokenKind::ModAssign => "%=",
            TokenKind::AndAssign => "&=",
            TokenKind::OrAssign => "|=",
            TokenKind::XorAssign => "^=",
            _ => return None,
        };
        Some(s)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Int { .. } => write!(f, "integer"),
            TokenKind::Float { .. } => write!(f, "float"),
            TokenKind::Str { .. } => write!(f, "string"),
            TokenKind::Name { .. } => write!(f, "name"),
            TokenKind::Punct(c) => write!(f, "'{}'", c),
            other => match other.operator_str() {
                Some(s) => write!(f, "'{}'", s),
                None => write!(f, "<unknown token>"),
            },
        }
    }
}

/// A single token with its kind and byte span into the source.
///
/// Valid only until the next [`Lexer::next_token`]; the lexer holds one
/// current token, not a buffer of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

/// Lexer error type.
#[derive(Debug)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lex error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

const NOT_A_DIGIT: u8 = 0xFF;

/// Fixed digit-value table: `0-9` map to 0-9, `a-f`/`A-F` to 10-15,
/// everything else to [`NOT_A_DIGIT`].
const CHAR_TO_DIGIT: [u8; 256] = build_digit_table();

const fn build_digit_table() -> [u8; 256] {
    let mut table = [NOT_A_DIGIT; 256];
    let mut i = 0;
    while i < 10 {
        table[b'0' as usize + i] = i as u8;
        i += 1;
    }
    let mut j = 0;
    while j < 6 {
        table[b'a' as usize + j] = 10 + j as u8;
        table[b'A' as usize + j] = 10 + j as u8;
        j += 1;
    }
    table
}

/// Decode one escape character (the byte after a backslash).
///
/// `\\`, `\'` and `\"` pass through literally; anything else unrecognized is
/// an invalid escape.
fn decode_escape(escape: u8) -> Option<u8> {
    match escape {
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        b'v' => Some(0x0B),
        b'b' => Some(0x08),
        b'a' => Some(0x07),
        b'0' => Some(0),
        b'\\' | b'\'' | b'"' => Some(escape),
        _ => None,
    }
}

/// Saved cursor state for the numeric int-vs-float lookahead.
#[derive(Clone, Copy)]
struct Mark {
    pos: usize,
    line: usize,
    column: usize,
}

/// Lexer for Mica source code.
///
/// Owns the scan position and the current token; each parse needs its own
/// instance. The interner is borrowed so a host can share one table across
/// many parses.
pub struct Lexer<'src, 'int> {
    src: &'src str,
    bytes: &'src [u8],
    pos: usize,
    line: usize,
    column: usize,
    interner: &'int mut Interner,
    token: Token,
    token_location: SourceLocation,
}

impl<'src, 'int> Lexer<'src, 'int> {
    /// Create a lexer over `source` and scan the first token.
    pub fn new(source: &'src str, interner: &'int mut Interner) -> Result<Self, LexError> {
        let mut lexer = Self {
            src: source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
            interner,
            token: Token {
                kind: TokenKind::Eof,
                start: 0,
                end: 0,
            },
            token_location: SourceLocation::new(1, 1),
        };
        lexer.next_token()?;
        Ok(lexer)
    }

    /// The current token.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Line/column of the current token's first character.
    pub fn location(&self) -> SourceLocation {
        self.token_location
    }

    /// Interner used for name tokens.
    pub fn interner(&self) -> &Interner {
        self.interner
    }

    /// Advance to the next token. Idempotent at end of input.
    pub fn next_token(&mut self) -> Result<(), LexError> {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.advance_byte();
        }

        let start = self.pos;
        self.token_location = SourceLocation::new(self.line, self.column);

        let kind = match self.peek() {
            None => TokenKind::Eof,
            Some(b'\'') => self.scan_char()?,
            Some(b'"') => self.scan_str()?,
            Some(b'.') => self.scan_float()?,
            Some(b) if b.is_ascii_digit() => {
                // Peek past the digit run to pick int vs. float, then rescan
                // from the token start with the right routine.
                let mark = self.mark();
                while matches!(self.peek(), Some(d) if d.is_ascii_digit()) {
                    self.advance_byte();
                }
                let after_digits = self.peek();
                self.rewind(mark);
                if matches!(after_digits, Some(b'.') | Some(b'e') | Some(b'E')) {
                    self.scan_float()?
                } else {
                    self.scan_int()?
                }
            }
            Some(b) if b == b'_' || b.is_ascii_alphabetic() => self.scan_name(),
            Some(b'<') => {
                self.advance_byte();
                if self.peek() == Some(b'<') {
                    self.advance_byte();
                    if self.peek() == Some(b'=') {
                        self.advance_byte();
                        TokenKind::LshiftAssign
                    } else {
                        TokenKind::Lshift
                    }
                } else if self.peek() == Some(b'=') {
                    self.advance_byte();
                    TokenKind::LtEq
                } else {
                    TokenKind::Punct('<')
                }
            }
            Some(b'>') => {
                self.advance_byte();
                if self.peek() == Some(b'>') {
                    self.advance_byte();
                    if self.peek() == Some(b'=') {
                        self.advance_byte();
                        TokenKind::RshiftAssign
                    } else {
                        TokenKind::Rshift
                    }
                } else if self.peek() == Some(b'=') {
                    self.advance_byte();
                    TokenKind::GtEq
                } else {
                    TokenKind::Punct('>')
                }
            }
            Some(b'=') => self.op1('=', b'=', TokenKind::EqEq),
            Some(b'!') => self.op1('!', b'=', TokenKind::NotEq),
            Some(b':') => self.op1(':', b'=', TokenKind::ColonAssign),
            Some(b'^') => self.op1('^', b'=', TokenKind::XorAssign),
            Some(b'/') => self.op1('/', b'=', TokenKind::DivAssign),
            Some(b'*') => self.op1('*', b'=', TokenKind::MulAssign),
            Some(b'%') => self.op1('%', b'=', TokenKind::ModAssign),
            Some(b'+') => self.op2('+', b'=', TokenKind::AddAssign, b'+', TokenKind::Inc),
            Some(b'-') => self.op2('-', b'=', TokenKind::SubAssign, b'-', TokenKind::Dec),
            Some(b'&') => self.op2('&', b'=', TokenKind::AndAssign, b'&', TokenKind::AndAnd),
            Some(b'|') => self.op2('|', b'=', TokenKind::OrAssign, b'|', TokenKind::OrOr),
            Some(b) if b.is_ascii() => {
                self.advance_byte();
                TokenKind::Punct(char::from(b))
            }
            Some(_) => {
                // Non-ASCII character: consume one whole char as its own kind.
                match self.src[self.pos..].chars().next() {
                    Some(c) => {
                        self.advance_char(c);
                        TokenKind::Punct(c)
                    }
                    None => TokenKind::Eof,
                }
            }
        };

        self.token = Token {
            kind,
            start,
            end: self.pos,
        };
        Ok(())
    }

    // ===== Scan routines =====

    /// Integer literal: base prefix, digit-table accumulation, pre-multiply
    /// overflow check.
    fn scan_int(&mut self) -> Result<TokenKind, LexError> {
        let mut base: u64 = 10;
        let mut format = IntFormat::Dec;

        if self.peek() == Some(b'0') {
            self.advance_byte();
            match self.peek() {
                Some(b'b') | Some(b'B') => {
                    self.advance_byte();
                    base = 2;
                    format = IntFormat::Bin;
                }
                Some(b) if b.is_ascii_digit() => {
                    base = 8;
                    format = IntFormat::Oct;
                }
                Some(b'x') | Some(b'X') => {
                    self.advance_byte();
                    base = 16;
                    format = IntFormat::Hex;
                }
                _ => {}
            }
        }

        let mut value: u64 = 0;
        while let Some(b) = self.peek() {
            let digit = CHAR_TO_DIGIT[b as usize];
            if digit == NOT_A_DIGIT {
                break;
            }
            let digit = u64::from(digit);

            if digit >= base {
                self.advance_byte();
                return Err(self.error(format!(
                    "Digit '{}' out of range for base {}",
                    char::from(b),
                    base
                )));
            }

            if value > (u64::MAX - digit) / base {
                // Resynchronize past the rest of the digit run.
                while matches!(self.peek(), Some(d) if d.is_ascii_digit()) {
                    self.advance_byte();
                }
                return Err(self.error("Integer literal overflow".to_string()));
            }

            value = value * base + digit;
            self.advance_byte();
        }

        Ok(TokenKind::Int { value, format })
    }

    /// Float literal: digits, optional fraction, optional exponent with a
    /// required digit; converted from the consumed slice.
    fn scan_float(&mut self) -> Result<TokenKind, LexError> {
        let start = self.pos;

        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.advance_byte();
        }
        if self.peek() == Some(b'.') {
            self.advance_byte();
        }
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.advance_byte();
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            self.advance_byte();
            if matches!(self.peek(), Some(b'-') | Some(b'+')) {
                self.advance_byte();
            }
            if !matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                let found = match self.peek() {
                    Some(b) if b.is_ascii() => format!("'{}'", char::from(b)),
                    Some(_) => "non-ASCII character".to_string(),
                    None => "end of file".to_string(),
                };
                return Err(self.error(format!(
                    "Expected digit after float literal exponent, found {}",
                    found
                )));
            }
            while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                self.advance_byte();
            }
        }

        let text = &self.src[start..self.pos];
        let value: f64 = text
            .parse()
            .map_err(|_| self.error(format!("Invalid float literal '{}'", text)))?;
        if value.is_infinite() {
            return Err(self.error("Float literal overflow".to_string()));
        }

        Ok(TokenKind::Float { value })
    }

    /// Char literal: one escape or one raw character between single quotes;
    /// produces an integer token tagged with the char format.
    fn scan_char(&mut self) -> Result<TokenKind, LexError> {
        self.advance_byte(); // opening quote

        let value = match self.peek() {
            None => {
                return Err(self.error("Unterminated char literal".to_string()));
            }
            Some(b'\'') => {
                return Err(self.error("Char literal cannot be empty".to_string()));
            }
            Some(b'\n') => {
                return Err(self.error("Char literal cannot contain newline".to_string()));
            }
            Some(b'\\') => {
                self.advance_byte();
                let escape = match self.peek() {
                    Some(b) => b,
                    None => {
                        return Err(self.error("Unterminated char literal".to_string()));
                    }
                };
                let decoded = decode_escape(escape).ok_or_else(|| {
                    self.error(format!(
                        "Invalid char literal escape '\\{}'",
                        char::from(escape)
                    ))
                })?;
                self.advance_byte();
                decoded
            }
            Some(b) => {
                self.advance_byte();
                b
            }
        };

        match self.peek() {
            Some(b'\'') => {
                self.advance_byte();
            }
            Some(b) => {
                return Err(self.error(format!(
                    "Expected closing char quote, found '{}'",
                    char::from(b)
                )));
            }
            None => {
                return Err(self.error("Unterminated char literal".to_string()));
            }
        }

        Ok(TokenKind::Int {
            value: u64::from(value),
            format: IntFormat::Char,
        })
    }

    /// String literal: decoded bytes accumulate in a fresh buffer until the
    /// unescaped closing quote.
    fn scan_str(&mut self) -> Result<TokenKind, LexError> {
        self.advance_byte(); // opening quote

        let mut decoded: Buf<u8> = Buf::new();
        loop {
            match self.peek() {
                None => {
                    return Err(
                        self.error("Unexpected end of file within string literal".to_string())
                    );
                }
                Some(b'"') => {
                    self.advance_byte();
                    break;
                }
                Some(b'\n') => {
                    return Err(self.error("String literal cannot contain newline".to_string()));
                }
                Some(b'\\') => {
                    self.advance_byte();
                    let escape = match self.peek() {
                        Some(b) => b,
                        None => {
                            return Err(self.error(
                                "Unexpected end of file within string literal".to_string(),
                            ));
                        }
                    };
                    let value = decode_escape(escape).ok_or_else(|| {
                        self.error(format!(
                            "Invalid string literal escape '\\{}'",
                            char::from(escape)
                        ))
                    })?;
                    decoded.push(value);
                    self.advance_byte();
                }
                Some(b) => {
                    decoded.push(b);
                    self.advance_byte();
                }
            }
        }

        let value = String::from_utf8(decoded.into_vec())
            .map_err(|_| self.error("String literal is not valid UTF-8".to_string()))?;
        Ok(TokenKind::Str { value })
    }

    /// Name: maximal alphanumeric/underscore run, interned.
    fn scan_name(&mut self) -> TokenKind {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b == b'_' || b.is_ascii_alphanumeric()) {
            self.advance_byte();
        }
        let name = self.interner.intern(&self.src[start..self.pos]);
        TokenKind::Name { name }
    }

    // ===== Cursor helpers =====

    /// Operator with one possible follower: consume `c`, then `compound` if
    /// the next byte is `next`, else `c` on its own.
    fn op1(&mut self, c: char, next: u8, compound: TokenKind) -> TokenKind {
        self.advance_byte();
        if self.peek() == Some(next) {
            self.advance_byte();
            compound
        } else {
            TokenKind::Punct(c)
        }
    }

    /// Operator with two possible followers, checked in order.
    fn op2(&mut self, c: char, a: u8, ka: TokenKind, b: u8, kb: TokenKind) -> TokenKind {
        self.advance_byte();
        if self.peek() == Some(a) {
            self.advance_byte();
            ka
        } else if self.peek() == Some(b) {
            self.advance_byte();
            kb
        } else {
            TokenKind::Punct(c)
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn advance_byte(&mut self) {
        if let Some(&b) = self.bytes.get(self.pos) {
            self.pos += 1;
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn advance_char(&mut self, c: char) {
        self.pos += c.len_utf8();
        self.column += 1;
    }

    fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    fn rewind(&mut self, mark: Mark) {
        self.pos = mark.pos;
        self.line = mark.line;
        self.column = mark.column;
    }

    fn error(&self, message: String) -> LexError {
        LexError {
            message,
            location: SourceLocation::new(self.line, self.column),
        }
    }
}
