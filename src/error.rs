//! Centralised error hierarchy for the **Lox interpreter**.
//!
//! All subsystems (scanner, parser, environment, runtime) convert their
//! failure modes into one of the variants defined here.  This enables a
//! uniform `Result<T>` alias throughout the crate and ergonomic inter‑operation
//! with `anyhow` in the binary, while still preserving rich diagnostic detail.
//!
//! The module **does not** print diagnostics itself.  Every variant renders
//! in the `[line N] Error<location>: <message>` shape.

use std::io;
use thiserror::Error;

use log::debug;

use crate::token::{Token, TokenType};

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.
    #[error("[line {line}] Error{location}: {message}")]
    Parse {
        message: String,
        line: usize,

        /// Empty, `" at end"` or `" at '<lexeme>'"`.
        location: String,
    },

    /// Runtime evaluation error, attributed to the offending token.
    #[error("[line {}] Error at '{}': {message}", .token.line, .token.lexeme)]
    Runtime { token: Token, message: String },

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        debug!("Creating Lex error: line={}, msg={}", line, message);

        LoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**.  The location is derived from
    /// the token the parser was looking at.
    pub fn parse<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        let location: String = match token.token_type {
            TokenType::EOF => " at end".to_string(),
            _ => format!(" at '{}'", token.lexeme),
        };

        debug!(
            "Creating Parse error: line={}, location={}, msg={}",
            token.line, location, message
        );

        LoxError::Parse {
            message,
            line: token.line,
            location,
        }
    }

    /// Helper constructor for **runtime** failures.
    pub fn runtime<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        debug!(
            "Creating Runtime error: line={}, token={}, msg={}",
            token.line, token.lexeme, message
        );

        LoxError::Runtime {
            token: token.clone(),
            message,
        }
    }

    /// Source line the error points at, if it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoxError::Lex { line, .. } | LoxError::Parse { line, .. } => Some(*line),
            LoxError::Runtime { token, .. } => Some(token.line),
            LoxError::Io(_) => None,
        }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;
