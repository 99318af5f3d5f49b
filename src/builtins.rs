// File: src/builtins.rs
//
// Native functions for the Lark interpreter, implemented in Rust and
// installed into the global environment at startup. The only one so
// far is `clock`.

use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::interpreter::{Callable, NativeFunction, SharedEnv, Value};

/// Seeds the global environment with every native function.
pub fn install(globals: &SharedEnv) {
    define_native(globals, "clock", 0, clock);
}

fn define_native(
    globals: &SharedEnv,
    name: &'static str,
    arity: usize,
    func: fn(&[Value]) -> Result<Value, String>,
) {
    let native = NativeFunction { name, arity, func };
    globals
        .borrow_mut()
        .define(name, Value::Callable(Callable::Native(Rc::new(native))));
}

/// Current wall-clock time in seconds since the Unix epoch.
fn clock(_args: &[Value]) -> Result<Value, String> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| format!("Clock error: {}", e))?;
    Ok(Value::Number(now.as_secs_f64()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Environment;
    use crate::lexer::{Token, TokenKind};
    use std::cell::RefCell;

    #[test]
    fn install_defines_clock() {
        let globals: SharedEnv = Rc::new(RefCell::new(Environment::new()));
        install(&globals);

        let name = Token { kind: TokenKind::Identifier, lexeme: "clock".to_string(), line: 1 };
        let value = globals.borrow().get(&name).unwrap();
        let Value::Callable(callable) = value else {
            panic!("clock is not callable");
        };
        assert_eq!(callable.arity(), 0);
    }

    #[test]
    fn clock_yields_epoch_seconds() {
        let value = clock(&[]).unwrap();
        let Value::Number(seconds) = value else {
            panic!("clock did not return a number");
        };
        assert!(seconds > 0.0);
    }
}
