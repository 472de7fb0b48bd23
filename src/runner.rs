//! One "run": source text → tokens → statements → effects.
//!
//! A file is one run; in the REPL every line is its own run against the same
//! [`Interpreter`], so globals defined on one line are visible on the next.

use std::fmt;

use log::{debug, info};
use thiserror::Error;

use crate::error::LoxError;
use crate::interpreter::Interpreter;
use crate::parser::{Parsed, Parser};
use crate::scanner::scan_all;

/// Why a run failed.
#[derive(Debug, Error)]
pub enum RunError {
    /// Lexical and syntax errors, in source order.  Nothing was executed.
    #[error("{}", Diagnostics(.0))]
    Syntax(Vec<LoxError>),

    /// Execution stopped at this error.
    #[error(transparent)]
    Runtime(LoxError),
}

impl RunError {
    /// Conventional process exit status (sysexits `EX_DATAERR` / `EX_SOFTWARE`).
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Syntax(_) => 65,
            RunError::Runtime(_) => 70,
        }
    }
}

/// One diagnostic per line.
struct Diagnostics<'a>(&'a [LoxError]);

impl fmt::Display for Diagnostics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }

        Ok(())
    }
}

/// Scans and parses `source`, collecting every static error.
pub fn parse_source(source: &str) -> Parsed {
    let (tokens, mut errors) = scan_all(source.as_bytes());

    let mut parsed = Parser::new(&tokens).parse();

    errors.append(&mut parsed.errors);
    errors.sort_by_key(|e| e.line());

    parsed.errors = errors;
    parsed
}

/// Runs `source` on `interpreter`.  Static errors prevent execution entirely.
pub fn run(interpreter: &mut Interpreter, source: &str) -> Result<(), RunError> {
    info!("Running {} bytes of source", source.len());

    let parsed = parse_source(source);

    if parsed.has_errors() {
        debug!("{} static error(s), not executing", parsed.errors.len());

        return Err(RunError::Syntax(parsed.errors));
    }

    interpreter
        .interpret(&parsed.statements)
        .map_err(RunError::Runtime)
}
