use std::rc::Rc;

use serde::Serialize;

use crate::expr::Expr;
use crate::token::Token;

/// A function declaration.  Shared between the AST and every function value
/// created from it, so evaluating a `fun` statement never copies the body.
#[derive(Debug, PartialEq, Serialize)]
pub struct FunctionDecl {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

/// Statement nodes.  A program is a `Vec<Stmt>`.
///
/// There is no `for` node: the parser lowers `for` loops into `Block`s and
/// `While`s.  Both `var x = e;` and `x := e;` produce `Var`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    Expression(Expr),

    Print(Expr),

    Var {
        name: Token,
        initializer: Option<Expr>,
    },

    Block(Vec<Stmt>),

    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    While {
        condition: Expr,
        body: Box<Stmt>,
    },

    Function(Rc<FunctionDecl>),

    Return {
        /// The `return` keyword.
        keyword: Token,
        /// Absent ⇒ `nil` is returned.
        value: Option<Expr>,
    },
}
