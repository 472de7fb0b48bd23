//! One‑pass streaming lexer: `&[u8]` in, [`Token`]s out.
//!
//! [`Scanner`] is a `FusedIterator` over `Result<Token>`.  It skips whitespace
//! and `//` comments, and always finishes with exactly one `EOF` token.  A
//! lexical error is yielded in place of the offending lexeme and scanning
//! resumes right after it, so a single pass reports every bad character.
//!
//! Recognised lexemes:
//!
//! - punctuation `( ) { } , . - + ; * /`
//! - one‑or‑two character operators `! != = == < <= > >=` and `:=`
//!   (a `:` on its own is an error)
//! - string literals, which may span lines
//! - number literals, an integer part with an optional fraction
//! - identifiers and keywords (keywords via a compile‑time perfect hash)
//!
//! [`scan_all`] drains a scanner into the `(tokens, errors)` pair the parser
//! and the runner work with.

use std::iter::FusedIterator;

use log::{debug, info};
use memchr::memchr;
use phf::phf_map;

use crate::error::{LoxError, Result};
use crate::token::{Token, TokenType};

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"and"    => TokenType::AND,
    b"class"  => TokenType::CLASS,
    b"else"   => TokenType::ELSE,
    b"false"  => TokenType::FALSE,
    b"fun"    => TokenType::FUN,
    b"for"    => TokenType::FOR,
    b"if"     => TokenType::IF,
    b"nil"    => TokenType::NIL,
    b"or"     => TokenType::OR,
    b"print"  => TokenType::PRINT,
    b"return" => TokenType::RETURN,
    b"super"  => TokenType::SUPER,
    b"this"   => TokenType::THIS,
    b"true"   => TokenType::TRUE,
    b"var"    => TokenType::VAR,
    b"while"  => TokenType::WHILE,
};

pub struct Scanner<'a> {
    src: &'a [u8],
    /// First byte of the lexeme being scanned.
    start: usize,
    /// Next byte to examine.
    curr: usize,
    line: usize,
    /// Set once `EOF` has been yielded.
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            start: 0,
            curr: 0,
            line: 1,
            done: false,
        }
    }

    // ───────────────────────────── cursor ─────────────────────────────

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.src.len()
    }

    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.src[self.curr];
        self.curr += 1;
        b
    }

    /// Current byte, or `0` past the end.
    #[inline(always)]
    fn peek(&self) -> u8 {
        self.src.get(self.curr).copied().unwrap_or(0)
    }

    #[inline(always)]
    fn peek_next(&self) -> u8 {
        self.src.get(self.curr + 1).copied().unwrap_or(0)
    }

    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if self.peek() == expected && !self.is_at_end() {
            self.curr += 1;
            true
        } else {
            false
        }
    }

    /// `long` if the next byte is `second` (consuming it), `short` otherwise.
    #[inline(always)]
    fn either(&mut self, second: u8, long: TokenType, short: TokenType) -> TokenType {
        if self.match_byte(second) {
            long
        } else {
            short
        }
    }

    /// Lexemes always span whole characters, so the lossy conversion never
    /// alters well‑formed input.
    fn text(&self, from: usize, to: usize) -> String {
        String::from_utf8_lossy(&self.src[from..to]).into_owned()
    }

    // ───────────────────────────── lexing ─────────────────────────────

    /// Consumes one lexeme.  `Ok(None)` means whitespace or a comment.
    fn scan_token(&mut self) -> Result<Option<TokenType>> {
        let kind = match self.advance() {
            b'(' => TokenType::LEFT_PAREN,
            b')' => TokenType::RIGHT_PAREN,
            b'{' => TokenType::LEFT_BRACE,
            b'}' => TokenType::RIGHT_BRACE,
            b',' => TokenType::COMMA,
            b'.' => TokenType::DOT,
            b'-' => TokenType::MINUS,
            b'+' => TokenType::PLUS,
            b';' => TokenType::SEMICOLON,
            b'*' => TokenType::STAR,

            b'!' => self.either(b'=', TokenType::BANG_EQUAL, TokenType::BANG),
            b'=' => self.either(b'=', TokenType::EQUAL_EQUAL, TokenType::EQUAL),
            b'<' => self.either(b'=', TokenType::LESS_EQUAL, TokenType::LESS),
            b'>' => self.either(b'=', TokenType::GREATER_EQUAL, TokenType::GREATER),

            b':' if self.match_byte(b'=') => TokenType::COLON_EQUAL,

            b'/' if self.match_byte(b'/') => {
                // Stop on the newline so the arm below still counts it.
                self.curr = match memchr(b'\n', &self.src[self.curr..]) {
                    Some(pos) => self.curr + pos,
                    None => self.src.len(),
                };

                return Ok(None);
            }
            b'/' => TokenType::SLASH,

            b' ' | b'\r' | b'\t' => return Ok(None),

            b'\n' => {
                self.line += 1;

                return Ok(None);
            }

            b'"' => self.string()?,

            b'0'..=b'9' => self.number(),

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(),

            lead => {
                // Swallow the continuation bytes of a multi‑byte character.
                let width = match lead {
                    0xC0..=0xDF => 2,
                    0xE0..=0xEF => 3,
                    0xF0..=0xF7 => 4,
                    _ => 1,
                };
                self.curr = (self.start + width).min(self.src.len());

                return Err(LoxError::lex(
                    self.line,
                    format!(
                        "Unexpected character: {}",
                        self.text(self.start, self.curr)
                    ),
                ));
            }
        };

        Ok(Some(kind))
    }

    /// The opening quote is already consumed.
    fn string(&mut self) -> Result<TokenType> {
        while self.peek() != b'"' && !self.is_at_end() {
            if self.advance() == b'\n' {
                self.line += 1;
            }
        }

        if self.is_at_end() {
            return Err(LoxError::lex(self.line, "Unterminated string."));
        }

        self.curr += 1;

        Ok(TokenType::STRING(self.text(self.start + 1, self.curr - 1)))
    }

    fn number(&mut self) -> TokenType {
        while self.peek().is_ascii_digit() {
            self.curr += 1;
        }

        // A trailing '.' is left for the next token.
        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.curr += 1;

            while self.peek().is_ascii_digit() {
                self.curr += 1;
            }
        }

        let n: f64 = self
            .text(self.start, self.curr)
            .parse::<f64>()
            .unwrap_or(0.0);

        TokenType::NUMBER(n)
    }

    fn identifier(&mut self) -> TokenType {
        while self.peek().is_ascii_alphanumeric() || self.peek() == b'_' {
            self.curr += 1;
        }

        KEYWORDS
            .get(&self.src[self.start..self.curr])
            .cloned()
            .unwrap_or(TokenType::IDENTIFIER)
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while !self.is_at_end() {
            self.start = self.curr;

            match self.scan_token() {
                Ok(Some(kind)) => {
                    debug!("Scanned {} on line {}", kind.name(), self.line);

                    let lexeme = self.text(self.start, self.curr);

                    return Some(Ok(Token::new(kind, lexeme, self.line)));
                }
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }

        self.done = true;

        Some(Ok(Token::new(TokenType::EOF, "", self.line)))
    }
}

impl FusedIterator for Scanner<'_> {}

/// Scans all of `src`.  The token vector always ends with `EOF`.
pub fn scan_all(src: &[u8]) -> (Vec<Token>, Vec<LoxError>) {
    let mut tokens: Vec<Token> = Vec::new();
    let mut errors: Vec<LoxError> = Vec::new();

    for result in Scanner::new(src) {
        match result {
            Ok(token) => tokens.push(token),
            Err(e) => errors.push(e),
        }
    }

    info!(
        "Scanned {} tokens with {} error(s)",
        tokens.len(),
        errors.len()
    );

    (tokens, errors)
}
