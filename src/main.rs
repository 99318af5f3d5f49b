// File: src/main.rs
//
// Main entry point for the Lark interpreter. No arguments starts the
// REPL, one argument names a script to run, anything more is a usage
// error. Exit codes follow the sysexits convention: 64 for usage, 65
// for syntax errors, 70 for runtime errors, 74 for I/O failures.

use std::env;
use std::fs;
use std::process;

use log::debug;

use lark::errors::ErrorReporter;
use lark::interpreter::Interpreter;
use lark::repl::Repl;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        println!("Usage: lark [script]");
        process::exit(64);
    } else if args.len() == 2 {
        run_file(&args[1]);
    } else {
        run_prompt();
    }
}

fn run_file(path: &str) {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("Could not read {}: {}", path, err);
            process::exit(74);
        }
    };
    // Scripts are read as raw bytes; anything that isn't valid UTF-8
    // becomes a replacement character and fails in the scanner with a
    // normal diagnostic instead of aborting here.
    let source = String::from_utf8_lossy(&bytes);
    debug!("running {} ({} bytes)", path, bytes.len());

    let mut interpreter = Interpreter::new();
    let mut reporter = ErrorReporter::new();
    lark::run(&source, &mut interpreter, &mut reporter);

    if reporter.had_error {
        process::exit(65);
    }
    if reporter.had_runtime_error {
        process::exit(70);
    }
}

fn run_prompt() {
    let mut repl = match Repl::new() {
        Ok(repl) => repl,
        Err(err) => {
            eprintln!("Could not start the REPL: {}", err);
            process::exit(74);
        }
    };

    if let Err(err) = repl.run() {
        eprintln!("{}", err);
        process::exit(74);
    }
}
