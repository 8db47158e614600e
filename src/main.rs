// ABOUTME: Thin process entry point: argument parsing, demo source, error reporting

use clap::Parser;
use jp_lang::config;
use std::path::PathBuf;
use std::process::ExitCode;

/// A tree-walking interpreter for a small curly-brace scripting language
#[derive(Parser, Debug)]
#[command(name = "interp")]
#[command(version = config::VERSION)]
#[command(about = "Runs a script written in the curly-brace scripting language")]
struct CliArgs {
    /// Script file to execute. Runs the built-in demo if omitted.
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    simple_logger::SimpleLogger::new().env().init().ok();
    let args = CliArgs::parse();

    let source = match &args.script {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("cannot read script file {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => config::DEMO_SOURCE.to_string(),
    };

    let (mut handler, outcome) = jp_lang::run_pipeline(&source);

    match outcome {
        // Lexer/parser errors piled up before interpretation could even
        // start -- the only case that exits non-zero.
        None => {
            handler.report();
            ExitCode::FAILURE
        }
        Some(Ok(())) => ExitCode::SUCCESS,
        Some(Err(thrown)) => {
            // An uncaught script error still counts as a handled, reported
            // run: it reached stdout/stderr rather than crashing the host.
            handler.add_critical_error(thrown.to_string());
            handler.report();
            ExitCode::SUCCESS
        }
    }
}
