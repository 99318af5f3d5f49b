// File: src/interpreter/mod.rs
//
// Tree-walking interpreter for the Lark scripting language. Executes
// a program by traversing the AST: statements run for effect,
// expressions evaluate to values.
//
// The interpreter owns two environment handles: `globals`, where the
// native functions live and top-level declarations land, and
// `environment`, the scope currently in effect. Blocks swap in a
// fresh child scope and restore the previous one on every exit path;
// function calls swap in a child of the *closure* environment, which
// is what makes counters made by a factory function independent.

mod control_flow;
mod environment;
mod value;

pub use environment::{Environment, SharedEnv};
pub use value::{Callable, LarkFunction, NativeFunction, Value};

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use control_flow::ControlFlow;

use crate::ast::{Expr, Stmt};
use crate::builtins;
use crate::errors::{ErrorReporter, RuntimeError};
use crate::lexer::{Token, TokenKind};

pub struct Interpreter {
    pub globals: SharedEnv,
    environment: SharedEnv,
    output: Option<Rc<RefCell<Vec<u8>>>>,
}

impl Interpreter {
    /// Creates an interpreter with the native functions installed.
    /// One instance is meant to live for a whole session, so REPL
    /// lines share global bindings.
    pub fn new() -> Self {
        let globals: SharedEnv = Rc::new(RefCell::new(Environment::new()));
        builtins::install(&globals);

        Interpreter { environment: globals.clone(), globals, output: None }
    }

    /// Redirects `print` into a byte buffer instead of stdout. Used by
    /// the test suites to capture program output.
    pub fn set_output(&mut self, sink: Rc<RefCell<Vec<u8>>>) {
        self.output = Some(sink);
    }

    /// Runs a list of statements to completion. A runtime fault is
    /// reported and ends the pass; a `return` that reaches the top
    /// level ends the pass quietly.
    pub fn interpret(&mut self, statements: &[Stmt], reporter: &mut ErrorReporter) {
        debug!("interpreting {} statements", statements.len());
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {}
                Err(ControlFlow::Return(_)) => break,
                Err(ControlFlow::RuntimeError(error)) => {
                    debug!("runtime fault: {}", error.message);
                    reporter.runtime_error(&error);
                    return;
                }
            }
        }
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), ControlFlow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(())
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                self.print_value(&value);
                Ok(())
            }
            Stmt::Let { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                self.environment.borrow_mut().define(&name.lexeme, value);
                Ok(())
            }
            Stmt::Block(statements) => {
                let scope = Environment::with_enclosing(self.environment.clone());
                self.execute_block(statements, scope)
            }
            Stmt::If { condition, then_branch, else_branch } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    self.execute(body)?;
                }
                Ok(())
            }
            Stmt::Function(declaration) => {
                // The closure is the environment in effect right now,
                // at the declaration site.
                let function = LarkFunction {
                    declaration: declaration.clone(),
                    closure: self.environment.clone(),
                };
                let value = Value::Callable(Callable::Function(Rc::new(function)));
                self.environment.borrow_mut().define(&declaration.name.lexeme, value);
                Ok(())
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Err(ControlFlow::Return(value))
            }
        }
    }

    /// Runs statements inside `scope`, restoring the previous
    /// environment no matter how the block exits: normally, through a
    /// return signal, or through a runtime fault.
    fn execute_block(&mut self, statements: &[Stmt], scope: Environment) -> Result<(), ControlFlow> {
        let previous = std::mem::replace(&mut self.environment, Rc::new(RefCell::new(scope)));

        let mut result = Ok(());
        for statement in statements {
            result = self.execute(statement);
            if result.is_err() {
                break;
            }
        }

        self.environment = previous;
        result
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Value, ControlFlow> {
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal)),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Variable { name } => Ok(self.environment.borrow().get(name)?),
            Expr::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.environment.borrow_mut().assign(name, value.clone())?;
                Ok(value)
            }
            Expr::Unary { operator, operand } => {
                let value = self.evaluate(operand)?;
                match operator.kind {
                    TokenKind::Bang => Ok(Value::Bool(!value.is_truthy())),
                    TokenKind::Minus => match value {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        _ => Err(RuntimeError::new(
                            operator.clone(),
                            "Operand must be a number.",
                        )
                        .into()),
                    },
                    _ => Err(RuntimeError::new(operator.clone(), "Expect a unary operator.")
                        .into()),
                }
            }
            Expr::Binary { left, operator, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                Ok(binary_op(operator, left, right)?)
            }
            Expr::Logical { left, operator, right } => {
                let left = self.evaluate(left)?;

                // Short-circuit: the result is the raw operand value,
                // never a coerced boolean.
                let take_left = match operator.kind {
                    TokenKind::Or => left.is_truthy(),
                    _ => !left.is_truthy(),
                };
                if take_left {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }
            Expr::Call { callee, paren, arguments } => {
                let callee = self.evaluate(callee)?;

                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.evaluate(argument)?);
                }

                let Value::Callable(callable) = callee else {
                    return Err(RuntimeError::new(
                        paren.clone(),
                        "Can only call functions and classes.",
                    )
                    .into());
                };

                if args.len() != callable.arity() {
                    return Err(RuntimeError::new(
                        paren.clone(),
                        format!(
                            "Expected {} arguments but got {}.",
                            callable.arity(),
                            args.len()
                        ),
                    )
                    .into());
                }

                self.call(&callable, args, paren)
            }
        }
    }

    fn call(
        &mut self,
        callable: &Callable,
        args: Vec<Value>,
        paren: &Token,
    ) -> Result<Value, ControlFlow> {
        match callable {
            Callable::Native(native) => {
                debug!("calling native function '{}'", native.name);
                (native.func)(&args)
                    .map_err(|message| RuntimeError::new(paren.clone(), message).into())
            }
            Callable::Function(function) => {
                debug!("calling function '{}'", function.declaration.name.lexeme);

                // The call frame is a child of the closure, not of the
                // caller's environment.
                let mut frame = Environment::with_enclosing(function.closure.clone());
                for (param, arg) in function.declaration.params.iter().zip(args) {
                    frame.define(&param.lexeme, arg);
                }

                match self.execute_block(&function.declaration.body, frame) {
                    Ok(()) => Ok(Value::Nil),
                    Err(ControlFlow::Return(value)) => Ok(value),
                    Err(other) => Err(other),
                }
            }
        }
    }

    fn print_value(&mut self, value: &Value) {
        match &self.output {
            Some(sink) => {
                let mut sink = sink.borrow_mut();
                sink.extend_from_slice(value.to_string().as_bytes());
                sink.push(b'\n');
            }
            None => println!("{}", value),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn binary_op(operator: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match operator.kind {
        TokenKind::Plus => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
            // Strings concatenate with numbers; the number keeps the
            // integral formatting rule.
            (Value::Str(a), b @ Value::Number(_)) => Ok(Value::Str(format!("{}{}", a, b))),
            (a @ Value::Number(_), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
            _ => Err(RuntimeError::new(
                operator.clone(),
                "Operands must be two numbers or two strings.",
            )),
        },
        TokenKind::Minus => {
            let (a, b) = number_operands(operator, left, right)?;
            Ok(Value::Number(a - b))
        }
        TokenKind::Star => {
            let (a, b) = number_operands(operator, left, right)?;
            Ok(Value::Number(a * b))
        }
        TokenKind::Slash => {
            let (a, b) = number_operands(operator, left, right)?;
            if b == 0.0 {
                return Err(RuntimeError::new(operator.clone(), "Division by zero."));
            }
            Ok(Value::Number(a / b))
        }
        TokenKind::Greater => {
            let (a, b) = number_operands(operator, left, right)?;
            Ok(Value::Bool(a > b))
        }
        TokenKind::GreaterEqual => {
            let (a, b) = number_operands(operator, left, right)?;
            Ok(Value::Bool(a >= b))
        }
        TokenKind::Less => {
            let (a, b) = number_operands(operator, left, right)?;
            Ok(Value::Bool(a < b))
        }
        TokenKind::LessEqual => {
            let (a, b) = number_operands(operator, left, right)?;
            Ok(Value::Bool(a <= b))
        }
        TokenKind::EqualEqual => Ok(Value::Bool(left.equals(&right))),
        TokenKind::BangEqual => Ok(Value::Bool(!left.equals(&right))),
        _ => Err(RuntimeError::new(operator.clone(), "Expect a binary operator.")),
    }
}

fn number_operands(
    operator: &Token,
    left: Value,
    right: Value,
) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((a, b)),
        _ => Err(RuntimeError::new(operator.clone(), "Operands must be numbers.")),
    }
}
