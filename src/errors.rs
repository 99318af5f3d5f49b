// File: src/errors.rs
//
// Error reporting for the Lark interpreter. Scan and parse errors are
// printed as they are found and recorded in a pair of flags; runtime
// errors carry the token that triggered them so the report can name a
// line. The CLI turns the flags into exit codes.

use std::fmt;

use crate::lexer::{Token, TokenKind};

/// A fault raised during evaluation: a type mismatch, an undefined
/// variable, a bad call, or division by zero.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        RuntimeError { token, message: message.into() }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\n[line {}]", self.message, self.token.line)
    }
}

impl std::error::Error for RuntimeError {}

/// Shared diagnostic sink. `had_error` covers scan and parse errors,
/// `had_runtime_error` covers evaluation faults; the REPL clears both
/// between lines, a file run reads them once at exit.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    pub had_error: bool,
    pub had_runtime_error: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        ErrorReporter::default()
    }

    /// Reports a scan error against a bare line number.
    pub fn error(&mut self, line: usize, message: &str) {
        self.report(line, "", message);
    }

    /// Reports a parse error against a token. At end of input the
    /// location reads "at end", otherwise it quotes the lexeme.
    pub fn error_at(&mut self, token: &Token, message: &str) {
        if token.kind == TokenKind::Eof {
            self.report(token.line, " at end", message);
        } else {
            let location = format!(" at '{}'", token.lexeme);
            self.report(token.line, &location, message);
        }
    }

    /// Reports a runtime fault. The format is fixed: message, newline,
    /// bracketed line number.
    pub fn runtime_error(&mut self, error: &RuntimeError) {
        eprintln!("{}", error);
        self.had_runtime_error = true;
    }

    /// Clears both flags so a REPL session can keep going after a bad
    /// line.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }

    fn report(&mut self, line: usize, location: &str, message: &str) {
        eprintln!("[line {}] Error{}: {}", line, location, message);
        self.had_error = true;
    }
}
