use serde::Serialize;

use crate::token::Token;

/// A **literal constant** that appears directly in the source code.
///
/// The parser copies the value out of the token at parse‑time, so literal
/// nodes keep no reference to the token that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LiteralValue {
    /// Numeric literal, stored as IEEE‑754 `f64`.
    Number(f64),

    /// String literal without surrounding quotes.
    Str(String),

    True,

    False,

    Nil,
}

/// Expression nodes.  Every node exclusively owns its children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Literal(LiteralValue),

    /// Parenthesised sub‑expression.
    Grouping(Box<Expr>),

    /// `!x` or `-x`
    Unary { operator: Token, right: Box<Expr> },

    /// Arithmetic, comparison and equality operators.
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// Short‑circuiting `and` / `or`.
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    Variable(Token),

    /// `name = value`
    Assign { name: Token, value: Box<Expr> },

    Call {
        callee: Box<Expr>,
        /// The closing `)`, kept for error reporting.
        paren: Token,
        arguments: Vec<Expr>,
    },
}
