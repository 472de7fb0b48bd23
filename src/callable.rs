use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::environment::Environment;
use crate::error::{LoxError, Result};
use crate::interpreter::{Flow, Interpreter};
use crate::stmt::FunctionDecl;
use crate::token::Token;
use crate::value::Value;

/// Anything a call expression can invoke.
///
/// The interpreter checks the argument count against [`Callable::arity`]
/// before calling, so implementations may index `arguments` freely.
pub trait Callable: fmt::Debug {
    fn name(&self) -> &str;

    fn arity(&self) -> usize;

    /// `paren` is the call's closing parenthesis, used to locate errors.
    fn call(
        &self,
        interpreter: &mut Interpreter,
        paren: &Token,
        arguments: Vec<Value>,
    ) -> Result<Value>;
}

/// A user‑defined function together with the scope it was declared in.
pub struct LoxFunction {
    declaration: Rc<FunctionDecl>,
    closure: Rc<RefCell<Environment>>,
}

impl LoxFunction {
    pub fn new(declaration: Rc<FunctionDecl>, closure: Rc<RefCell<Environment>>) -> Self {
        Self {
            declaration,
            closure,
        }
    }
}

impl Callable for LoxFunction {
    fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    fn call(
        &self,
        interpreter: &mut Interpreter,
        _paren: &Token,
        arguments: Vec<Value>,
    ) -> Result<Value> {
        debug!("Calling user-defined function '{}'", self.name());

        // Parent is the closure, not the caller's scope.
        let environment = Environment::new_child(&self.closure);

        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.borrow_mut().define(&param.lexeme, argument);
        }

        match interpreter.execute_block(&self.declaration.body, environment)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }
}

// The closure may contain this very function, so it is left out.
impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoxFunction")
            .field("name", &self.declaration.name.lexeme)
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}

/// Signature of a host function.  An `Err` message becomes a runtime error at
/// the call site.
pub type NativeFn = fn(&[Value]) -> std::result::Result<Value, String>;

/// A function implemented in Rust.
#[derive(Debug, Clone)]
pub struct NativeFunction {
    name: &'static str,
    arity: usize,
    func: NativeFn,
}

impl NativeFunction {
    pub fn new(name: &'static str, arity: usize, func: NativeFn) -> Self {
        Self { name, arity, func }
    }
}

impl Callable for NativeFunction {
    fn name(&self) -> &str {
        self.name
    }

    fn arity(&self) -> usize {
        self.arity
    }

    fn call(
        &self,
        _interpreter: &mut Interpreter,
        paren: &Token,
        arguments: Vec<Value>,
    ) -> Result<Value> {
        debug!("Calling native function '{}'", self.name);

        (self.func)(&arguments).map_err(|message| LoxError::runtime(paren, message))
    }
}
