// ABOUTME: Library module exposing internal components for testing

pub mod ast;
pub mod builtins;
pub mod config;
pub mod env;
pub mod error;
pub mod error_handler;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod token;
pub mod value;

use error_handler::ErrorHandler;

/// Lexes, parses and interprets `source`, logging one stage transition at a
/// time. Returns the accumulated lexer/parser errors (empty on a clean
/// parse) and, if parsing succeeded, whatever the interpreter produced.
pub fn run_pipeline(source: &str) -> (ErrorHandler, Option<Result<(), error::Thrown>>) {
    let mut handler = ErrorHandler::new();
    log::debug!("lexing source ({} bytes)", source.len());
    let program = parser::parse(source, &mut handler);
    log::debug!("parsing complete ({} function(s))", program.functions.len());

    if handler.has_errors() {
        log::warn!("interpretation skipped: {} accumulated error(s)", handler.errors().len());
        return (handler, None);
    }

    log::debug!("interpretation starting");
    let outcome = eval::run(&program);
    (handler, Some(outcome))
}
