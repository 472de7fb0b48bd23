//! Tree‑walking evaluator.
//!
//! Statements execute to a [`Flow`]: `Normal`, or `Return(value)` while a
//! `return` is unwinding towards the nearest function call.  Every executor
//! that runs nested statements (blocks, loops, `if`) hands a `Return` straight
//! back to its caller.  Runtime errors travel separately, in the `Err` side of
//! [`Result`], up to [`Interpreter::interpret`].

use std::cell::RefCell;
use std::io::{self, Write};
use std::mem;
use std::rc::Rc;

use log::{debug, info};

use crate::callable::LoxFunction;
use crate::environment::Environment;
use crate::error::{LoxError, Result};
use crate::expr::{Expr, LiteralValue};
use crate::natives;
use crate::stmt::Stmt;
use crate::token::{Token, TokenType};
use crate::value::Value;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    Return(Value),
}

/// Evaluation context: the global scope, the scope currently in effect, and
/// where `print` writes to.
pub struct Interpreter {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    output: Box<dyn Write>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter printing to stdout, with the natives defined.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Creates an interpreter printing to `output`.
    pub fn with_output(output: Box<dyn Write>) -> Self {
        info!("Initializing Interpreter");

        let globals = Rc::new(RefCell::new(Environment::new()));

        natives::install(&globals);

        Self {
            environment: Rc::clone(&globals),
            globals,
            output,
        }
    }

    /// The process‑wide scope.  It survives across `interpret` calls, which
    /// is what lets a REPL session keep its bindings.
    pub fn globals(&self) -> &Rc<RefCell<Environment>> {
        &self.globals
    }

    /// Interprets a list of statements (a "program").  The first runtime
    /// error stops execution; effects of earlier statements remain.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        debug!("Interpreting {} statements", statements.len());

        let result = self.execute_all(statements);

        self.output.flush()?;

        match result? {
            Flow::Normal => info!("Interpretation completed successfully"),
            Flow::Return(value) => info!("Top-level return of {}, stopping", value),
        }

        Ok(())
    }

    /// Runs `statements` with `environment` as the current scope, restoring
    /// the previous scope afterwards whatever the outcome.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> Result<Flow> {
        let previous = mem::replace(&mut self.environment, environment);

        let result = self.execute_all(statements);

        self.environment = previous;

        result
    }

    fn execute_all(&mut self, statements: &[Stmt]) -> Result<Flow> {
        for stmt in statements {
            if let Flow::Return(value) = self.execute(stmt)? {
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal)
    }

    /// Executes a single statement.
    pub fn execute(&mut self, stmt: &Stmt) -> Result<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;

                Ok(Flow::Normal)
            }

            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;

                writeln!(self.output, "{}", value)?;

                Ok(Flow::Normal)
            }

            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                debug!("Defining variable '{}' = {}", name.lexeme, value);

                self.environment.borrow_mut().define(&name.lexeme, value);

                Ok(Flow::Normal)
            }

            Stmt::Block(statements) => {
                let scope = Environment::new_child(&self.environment);

                self.execute_block(statements, scope)
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }

                Ok(Flow::Normal)
            }

            Stmt::Function(declaration) => {
                debug!(
                    "Defining function '{}' with {} parameters",
                    declaration.name.lexeme,
                    declaration.params.len()
                );

                let function = LoxFunction::new(Rc::clone(declaration), Rc::clone(&self.environment));

                self.environment
                    .borrow_mut()
                    .define(&declaration.name.lexeme, Value::Callable(Rc::new(function)));

                Ok(Flow::Normal)
            }

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                debug!("Returning value: {}", value);

                Ok(Flow::Return(value))
            }
        }
    }

    /// Evaluates an expression and returns a Value.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::String(s.clone()),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => {
                let right = self.evaluate(right)?;

                self.evaluate_unary(operator, right)
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;

                self.evaluate_binary(operator, left, right)
            }

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;

                // The decisive operand itself is the result, not a bool.
                let decided = match operator.token_type {
                    TokenType::OR => left.is_truthy(),
                    _ => !left.is_truthy(),
                };

                if decided {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Variable(name) => self.environment.borrow().get(name),

            Expr::Assign { name, value } => {
                let value = self.evaluate(value)?;

                self.environment
                    .borrow_mut()
                    .assign(name, value.clone())?;

                debug!("Assigned {} to '{}'", value, name.lexeme);

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee = self.evaluate(callee)?;

                let mut values: Vec<Value> = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.evaluate(argument)?);
                }

                self.call(callee, paren, values)
            }
        }
    }

    fn call(&mut self, callee: Value, paren: &Token, arguments: Vec<Value>) -> Result<Value> {
        let Value::Callable(function) = callee else {
            return Err(LoxError::runtime(
                paren,
                "Can only call functions and classes.",
            ));
        };

        if arguments.len() != function.arity() {
            return Err(LoxError::runtime(
                paren,
                format!(
                    "Expected {} arguments but got {}.",
                    function.arity(),
                    arguments.len()
                ),
            ));
        }

        let result = function.call(self, paren, arguments)?;

        debug!("'{}' returned {}", function.name(), result);

        Ok(result)
    }

    fn evaluate_unary(&self, operator: &Token, right: Value) -> Result<Value> {
        match operator.token_type {
            TokenType::BANG => Ok(Value::Bool(!right.is_truthy())),

            _ => match right {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(LoxError::runtime(operator, "Operand must be a number.")),
            },
        }
    }

    fn evaluate_binary(&self, operator: &Token, left: Value, right: Value) -> Result<Value> {
        debug!(
            "Binary '{}' on {} and {}",
            operator.lexeme,
            left.type_name(),
            right.type_name()
        );

        match operator.token_type {
            TokenType::EQUAL_EQUAL => Ok(Value::Bool(left == right)),
            TokenType::BANG_EQUAL => Ok(Value::Bool(left != right)),

            TokenType::PLUS => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                _ => Err(LoxError::runtime(
                    operator,
                    "Operands must be two numbers or two strings.",
                )),
            },

            _ => {
                let (a, b) = number_operands(operator, &left, &right)?;

                Ok(match operator.token_type {
                    TokenType::MINUS => Value::Number(a - b),
                    TokenType::STAR => Value::Number(a * b),
                    TokenType::SLASH => Value::Number(a / b),
                    TokenType::GREATER => Value::Bool(a > b),
                    TokenType::GREATER_EQUAL => Value::Bool(a >= b),
                    TokenType::LESS => Value::Bool(a < b),
                    TokenType::LESS_EQUAL => Value::Bool(a <= b),
                    _ => {
                        return Err(LoxError::runtime(
                            operator,
                            "Invalid binary operator.",
                        ))
                    }
                })
            }
        }
    }
}

fn number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(LoxError::runtime(operator, "Operands must be numbers.")),
    }
}
