// File: src/interpreter/environment.rs
//
// Lexical scoping environment for the Lark interpreter: a name-to-
// value map plus an optional link to the enclosing scope. Lookups walk
// the chain outward; the chain ends at the globals. Closures keep
// their defining environment alive by holding another reference to
// it, which is why environments are shared and interior-mutable.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::errors::RuntimeError;
use crate::interpreter::value::Value;
use crate::lexer::Token;

pub type SharedEnv = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<SharedEnv>,
}

impl Environment {
    /// The global scope: no enclosing environment.
    pub fn new() -> Self {
        Environment::default()
    }

    /// A nested scope inside `enclosing`.
    pub fn with_enclosing(enclosing: SharedEnv) -> Self {
        Environment { values: HashMap::new(), enclosing: Some(enclosing) }
    }

    /// Binds a name in this scope. Re-binding an existing name in the
    /// same scope silently overwrites it.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Looks a name up here, then outward through the chain.
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            return Ok(value.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(RuntimeError::new(
            name.clone(),
            format!("Undefined variable '{}'.", name.lexeme),
        ))
    }

    /// Overwrites the innermost existing binding for a name. Unlike
    /// `define`, assignment never creates a binding.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(RuntimeError::new(
            name.clone(),
            format!("Undefined variable '{}'.", name.lexeme),
        ))
    }
}
