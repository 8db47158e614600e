// ABOUTME: Compile-time configuration constants for the interpreter

pub const VERSION: &str = "0.1.0";

/// Identifiers longer than this are a `TOO_LONG_ID` lexer error.
pub const MAX_IDENTIFIER_LENGTH: usize = 64;

/// Digit runs longer than this are a `TOO_LONG_NUMBER` lexer error.
pub const MAX_NUM_LENGTH: usize = 20;

/// Call stack depth past which a call raises `StackOverflowError`.
pub const MAX_CALL_STACK_SIZE: usize = 100;

/// The tiny built-in demo run when `interp` is invoked with no file argument.
pub const DEMO_SOURCE: &str = r#"main() {
    print("Test string");
}
"#;
