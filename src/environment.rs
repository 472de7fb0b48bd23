use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;

/// One lexical scope.  Scopes are shared through `Rc<RefCell<…>>`: by the
/// nested scopes that point at them and by every closure created inside them.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Convenience for the common `Rc::new(RefCell::new(..))` dance.
    pub fn new_child(enclosing: &Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(enclosing))))
    }

    /// Binds `name` in this scope, replacing any existing binding here.
    pub fn define(&mut self, name: &str, value: Value) {
        if self.contains_local(name) {
            debug!("redefine '{}' as {}", name, value.type_name());
        } else {
            debug!("define '{}' as {}", name, value.type_name());
        }

        self.values.insert(name.to_string(), value);
    }

    /// Looks `name` up from this scope outward.
    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    /// Overwrites the nearest existing binding of `name`.  Never creates one.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }

    /// Whether `name` is bound in this scope itself (enclosing scopes ignored).
    pub fn contains_local(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

fn undefined(name: &Token) -> LoxError {
    LoxError::runtime(name, format!("Undefined variable '{}'.", name.lexeme))
}
