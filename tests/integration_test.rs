// ABOUTME: End-to-end scenarios run through lexing, parsing and interpretation together

use jp_lang::error::{ErrorVariant, Thrown};
use jp_lang::value::Value;
use jp_lang::{parser, run_pipeline};
use std::process::Command;

fn assert_clean_run(source: &str) {
    let (handler, outcome) = run_pipeline(source);
    assert!(!handler.has_errors(), "unexpected parse errors: {:?}", handler.errors());
    assert!(matches!(outcome, Some(Ok(()))), "expected a clean run for: {source}");
}

fn assert_thrown(source: &str) -> Thrown {
    let (handler, outcome) = run_pipeline(source);
    assert!(!handler.has_errors(), "unexpected parse errors: {:?}", handler.errors());
    match outcome {
        Some(Err(thrown)) => thrown,
        other => panic!("expected an uncaught error, got {other:?}"),
    }
}

#[test]
fn scenario_1_addition() {
    assert_clean_run("main(){ print(1+2); }");
}

#[test]
fn scenario_2_array_remove_at() {
    assert_clean_run("main(){ a=Array(3,2,1); a.removeAt(0); print(a); }");
}

#[test]
fn scenario_3_reference_argument_mutates_caller() {
    assert_clean_run(
        "test(x){ x+=1; } main(){ a=1; test(@a); if (a != 2) { throw ValueError(\"a should be 2\"); } }",
    );
}

#[test]
fn scenario_4_value_argument_leaves_caller_unchanged() {
    assert_clean_run(
        "test(x){ x+=1; } main(){ a=1; test(a); if (a != 1) { throw ValueError(\"a should still be 1\"); } }",
    );
}

#[test]
fn scenario_5_try_catch_exposes_message() {
    assert_clean_run(
        r#"main(){ try { throw Error("boom"); } catch (Error e) { if (e.message != "boom") { throw ValueError("wrong"); } } }"#,
    );
}

#[test]
fn scenario_6_division_by_zero_is_a_value_error() {
    let thrown = assert_thrown("main(){ print(1/0); }");
    assert!(matches!(thrown.0, Value::Error(e) if e.variant == ErrorVariant::ValueError));
}

#[test]
fn scenario_7_unbounded_recursion_overflows_once() {
    let thrown = assert_thrown("rec(){ rec(); } main(){ rec(); }");
    assert!(matches!(thrown.0, Value::Error(e) if e.variant == ErrorVariant::StackOverflowError));
}

#[test]
fn scenario_8_leading_zero_lexer_error() {
    let mut handler = jp_lang::error_handler::ErrorHandler::new();
    let tokens = jp_lang::lexer::Lexer::tokenize("01", &mut handler);
    assert!(handler.has_errors());
    assert_eq!(tokens[tokens.len() - 1].kind, jp_lang::token::TokenKind::Eof);
}

#[test]
fn optional_chaining_is_never_a_property_error() {
    assert_clean_run("main(){ a=null; if (a?.whatever != null) { throw ValueError(\"should be null\"); } }");
}

#[test]
fn is_is_reflexive_for_every_type_tag() {
    assert_clean_run(
        r#"main(){
            if (!(1 is Int)) { throw ValueError("int"); }
            if (!(1.5 is Float)) { throw ValueError("float"); }
            if (!("s" is String)) { throw ValueError("string"); }
            if (!(true is Boolean)) { throw ValueError("bool"); }
            if (!(null is Null)) { throw ValueError("null"); }
            if (!(Array() is Array)) { throw ValueError("array"); }
            if (!(Student() is Student)) { throw ValueError("student"); }
        }"#,
    );
}

#[test]
fn parsing_the_same_source_twice_yields_equal_programs() {
    let source = "main(){ a=1; if (a == 1) { print(a); } else { print(0); } }";
    let mut handler_a = jp_lang::error_handler::ErrorHandler::new();
    let mut handler_b = jp_lang::error_handler::ErrorHandler::new();
    let program_a = parser::parse(source, &mut handler_a);
    let program_b = parser::parse(source, &mut handler_b);
    assert_eq!(program_a, program_b);
}

#[test]
fn non_reference_arguments_are_deep_copied_not_aliased() {
    assert_clean_run(
        r#"mutate(arr){ arr.add(99); }
           main(){
               a=Array(1,2);
               mutate(a);
               if (a.size() != 2) { throw ValueError("caller array should be untouched"); }
           }"#,
    );
}

#[test]
fn token_stream_always_terminates_with_eof() {
    let mut handler = jp_lang::error_handler::ErrorHandler::new();
    let tokens = jp_lang::lexer::Lexer::tokenize("a = 1 + 2;", &mut handler);
    assert_eq!(tokens.last().unwrap().kind, jp_lang::token::TokenKind::Eof);
}

#[test]
fn token_positions_never_move_backwards() {
    let mut handler = jp_lang::error_handler::ErrorHandler::new();
    let tokens = jp_lang::lexer::Lexer::tokenize("a = 1;\nb = 2;\nc = 3;", &mut handler);
    let mut last = (0usize, 0usize);
    for token in &tokens {
        let here = (token.position.line, token.position.column);
        assert!(here >= last, "position went backwards: {here:?} after {last:?}");
        last = here;
    }
}

#[test]
fn missing_main_surfaces_as_a_runtime_error() {
    let thrown = assert_thrown("helper(){ print(1); }");
    assert!(matches!(thrown.0, Value::Error(e) if e.variant == ErrorVariant::RuntimeError));
}

#[test]
fn calling_an_undefined_function_is_still_a_function_error() {
    let thrown = assert_thrown("main(){ thisDoesNotExist(); }");
    assert!(matches!(thrown.0, Value::Error(e) if e.variant == ErrorVariant::FunctionError));
}

#[test]
fn no_script_argument_runs_the_demo_and_exits_cleanly() {
    let output = Command::new(env!("CARGO_BIN_EXE_interp"))
        .output()
        .expect("failed to run binary");
    assert!(output.status.success(), "demo run should exit 0: {output:?}");
}

#[test]
fn nonexistent_script_file_exits_with_failure() {
    let output = Command::new(env!("CARGO_BIN_EXE_interp"))
        .arg("/no/such/file/for/this/test.jp")
        .output()
        .expect("failed to run binary");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot read script file"));
}
