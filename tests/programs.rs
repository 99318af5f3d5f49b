// File: tests/programs.rs
//
// End-to-end programs driven through the public pipeline, with print
// output captured in a buffer and compared against golden strings.

use std::cell::RefCell;
use std::rc::Rc;

use lark::errors::ErrorReporter;
use lark::interpreter::Interpreter;

fn run_program(source: &str) -> (String, ErrorReporter) {
    let mut interpreter = Interpreter::new();
    let mut reporter = ErrorReporter::new();
    let sink = Rc::new(RefCell::new(Vec::new()));
    interpreter.set_output(sink.clone());

    lark::run(source, &mut interpreter, &mut reporter);

    let output = String::from_utf8(sink.borrow().clone()).expect("print output is UTF-8");
    (output, reporter)
}

fn expect_output(source: &str, expected: &str) {
    let (output, reporter) = run_program(source);
    assert!(!reporter.had_error, "syntax error in {:?}", source);
    assert!(!reporter.had_runtime_error, "runtime error in {:?}", source);
    assert_eq!(output, expected);
}

#[test]
fn precedence_scenario() {
    expect_output("print 1 + 2 * 3;", "7\n");
}

#[test]
fn concatenation_scenario() {
    expect_output("let a = \"hi\"; print a + \" \" + \"there\";", "hi there\n");
}

#[test]
fn factorial_scenario() {
    expect_output(
        "function fact(n) { if (n <= 1) return 1; return n * fact(n - 1); }\nprint fact(5);",
        "120\n",
    );
}

#[test]
fn counter_scenario() {
    expect_output(
        "function mk() { let c = 0; function i() { c = c + 1; return c; } return i; }\n\
         let k = mk();\nprint k(); print k(); print k();",
        "1\n2\n3\n",
    );
}

#[test]
fn for_loop_scenario() {
    expect_output("for (let i = 0; i < 3; i = i + 1) print i;", "0\n1\n2\n");
}

#[test]
fn division_by_zero_scenario() {
    let (output, reporter) = run_program("print 1/0;");
    assert!(output.is_empty());
    assert!(reporter.had_runtime_error);
    // A runtime fault alone classifies as exit 70, not 65.
    assert!(!reporter.had_error);
}

#[test]
fn syntax_errors_skip_execution_entirely() {
    let (output, reporter) = run_program("print 1; print ;");
    assert!(output.is_empty(), "nothing may run once the parse failed");
    assert!(reporter.had_error);
    assert!(!reporter.had_runtime_error);
}

#[test]
fn scan_errors_also_skip_execution() {
    let (output, reporter) = run_program("print 1; let a = @;");
    assert!(output.is_empty());
    assert!(reporter.had_error);
}

#[test]
fn parser_recovers_but_execution_stays_skipped() {
    // Both statements around the bad one are well formed; the pass
    // still must not run because had_error is set.
    let (output, reporter) = run_program("print 1;\nlet = 2;\nprint 3;");
    assert!(output.is_empty());
    assert!(reporter.had_error);
}

#[test]
fn repl_style_session_keeps_state_and_resets_flags() {
    let mut interpreter = Interpreter::new();
    let mut reporter = ErrorReporter::new();
    let sink = Rc::new(RefCell::new(Vec::new()));
    interpreter.set_output(sink.clone());

    for line in [
        "function double(n) { return n * 2; }",
        "print ghost;", // faults, but the session continues
        "let x = double(21);",
        "print x;",
    ] {
        lark::run(line, &mut interpreter, &mut reporter);
        reporter.reset();
    }

    assert_eq!(String::from_utf8(sink.borrow().clone()).unwrap(), "42\n");
}

#[test]
fn shadowing_does_not_leak_out_of_blocks() {
    expect_output(
        "let x = \"outer\";\n{\n  let x = \"inner\";\n  print x;\n}\nprint x;",
        "inner\nouter\n",
    );
}

#[test]
fn higher_order_functions_compose() {
    expect_output(
        "function twice(f, v) { return f(f(v)); }\n\
         function inc(n) { return n + 1; }\n\
         print twice(inc, 40);",
        "42\n",
    );
}

#[test]
fn a_small_program_exercises_the_whole_pipeline() {
    let source = "\
// Sum the squares below a limit, skipping multiples of three.
function square(n) { return n * n; }

let total = 0;
for (let i = 1; i <= 6; i = i + 1) {
  if (i == 3 or i == 6) {
    total = total + 0;
  } else {
    total = total + square(i);
  }
}
print \"total=\" + total;
";
    // 1 + 4 + 16 + 25 = 46
    expect_output(source, "total=46\n");
}
