// File: src/repl.rs
//
// Interactive REPL (Read-Eval-Print Loop) for the Lark scripting
// language. One interpreter serves the whole session, so globals and
// functions defined on earlier lines stay visible on later ones. Bad
// lines reset the error flags instead of ending the session.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::errors::ErrorReporter;
use crate::interpreter::Interpreter;

pub struct Repl {
    interpreter: Interpreter,
    reporter: ErrorReporter,
    editor: DefaultEditor,
}

impl Repl {
    pub fn new() -> Result<Self, ReadlineError> {
        let editor = DefaultEditor::new()?;
        Ok(Repl { interpreter: Interpreter::new(), reporter: ErrorReporter::new(), editor })
    }

    /// Reads lines until end of input, running each through the
    /// pipeline. Ctrl-C discards the current line; Ctrl-D exits.
    pub fn run(&mut self) -> Result<(), ReadlineError> {
        self.show_banner();

        loop {
            match self.editor.readline("> ") {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(line.as_str());
                    crate::run(&line, &mut self.interpreter, &mut self.reporter);
                    // A mistake on one line shouldn't poison the next.
                    self.reporter.reset();
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }

    fn show_banner(&self) {
        println!("{}", format!("Lark REPL v{}", env!("CARGO_PKG_VERSION")).bright_cyan());
        println!("{}", "Ctrl+D to exit.".dimmed());
    }
}
