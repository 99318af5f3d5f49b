// File: src/lib.rs
//
// Library interface for the Lark interpreter. Exposes the pipeline
// modules for integration testing and external use, plus the `run`
// entry point shared by the file runner and the REPL.

pub mod ast;
pub mod builtins;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod repl;

use log::debug;

use errors::ErrorReporter;
use interpreter::Interpreter;
use lexer::Scanner;
use parser::Parser;

/// Runs one source unit (a whole file or a single REPL line) through
/// the pipeline: scan, parse, and, unless a syntax error surfaced,
/// interpret.
pub fn run(source: &str, interpreter: &mut Interpreter, reporter: &mut ErrorReporter) {
    let tokens = Scanner::new(source, reporter).scan_tokens();
    let statements = Parser::new(tokens, reporter).parse();
    debug!("parsed {} statements", statements.len());

    // Don't execute code that is known to be broken.
    if reporter.had_error {
        return;
    }

    interpreter.interpret(&statements, reporter);
}
