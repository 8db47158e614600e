// ABOUTME: Error types for lexing, parsing and script-level failures

use crate::position::Position;
use crate::value::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("identifier longer than {max} characters")]
    IdentifierTooLong { max: usize },

    #[error("number longer than {max} characters")]
    NumberTooLong { max: usize },

    #[error("invalid float literal '{lexeme}'")]
    InvalidFloat { lexeme: String },

    #[error("number '{lexeme}' has leading zeros")]
    LeadingZeros { lexeme: String },

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("invalid end-of-line sequence")]
    InvalidEol,

    #[error("unexpected character '{ch}'")]
    UnknownCharacter { ch: char },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub struct LexerError {
    pub kind: LexError,
    pub position: Position,
}

impl std::fmt::Display for LexerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[LEXER ERROR]: {} at {}", self.kind, self.position)
    }
}

impl LexerError {
    pub fn new(kind: LexError, position: Position) -> Self {
        LexerError { kind, position }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("expected block start '{{'")]
    MissingBlockStart,
    #[error("expected block end '}}'")]
    MissingBlockEnd,
    #[error("expected opening bracket '('")]
    MissingOpeningBracket,
    #[error("expected closing bracket ')'")]
    MissingClosingBracket,
    #[error("expected a loop variable")]
    MissingForLoopVariable,
    #[error("expected an iterable expression")]
    MissingForLoopIterable,
    #[error("expected ':' in for loop header")]
    MissingForLoopColon,
    #[error("expected a conditional expression")]
    MissingConditionalExpression,
    #[error("expected a type name")]
    MissingTypeName,
    #[error("expected an argument")]
    MissingArgument,
    #[error("expected an expression")]
    MissingExpression,
    #[error("expected ';'")]
    MissingSemicolon,
    #[error("expected 'catch'")]
    MissingCatchKeyword,
    #[error("expected an error type name")]
    MissingErrorType,
    #[error("expected a caught-error variable name")]
    MissingErrorVariable,
    #[error("expected a parameter")]
    MissingParameter,
    #[error("invalid default parameter value")]
    InvalidParameterValue,
    #[error("function '{name}' already exists")]
    FunctionAlreadyExists { name: String },
    #[error("parameter '{name}' already exists")]
    ParameterAlreadyExists { name: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[PARSER ERROR]: {} at {}", self.kind, self.position)
    }
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: Position) -> Self {
        ParseError { kind, position }
    }
}

/// The ten built-in error names the language can construct and throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorVariant {
    Error,
    ArgumentError,
    TypeError,
    ExpressionError,
    VariableError,
    RuntimeError,
    PropertyError,
    FunctionError,
    StackOverflowError,
    ValueError,
}

impl ErrorVariant {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorVariant::Error => "Error",
            ErrorVariant::ArgumentError => "ArgumentError",
            ErrorVariant::TypeError => "TypeError",
            ErrorVariant::ExpressionError => "ExpressionError",
            ErrorVariant::VariableError => "VariableError",
            ErrorVariant::RuntimeError => "RuntimeError",
            ErrorVariant::PropertyError => "PropertyError",
            ErrorVariant::FunctionError => "FunctionError",
            ErrorVariant::StackOverflowError => "StackOverflowError",
            ErrorVariant::ValueError => "ValueError",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Error" => ErrorVariant::Error,
            "ArgumentError" => ErrorVariant::ArgumentError,
            "TypeError" => ErrorVariant::TypeError,
            "ExpressionError" => ErrorVariant::ExpressionError,
            "VariableError" => ErrorVariant::VariableError,
            "RuntimeError" => ErrorVariant::RuntimeError,
            "PropertyError" => ErrorVariant::PropertyError,
            "FunctionError" => ErrorVariant::FunctionError,
            "StackOverflowError" => ErrorVariant::StackOverflowError,
            "ValueError" => ErrorVariant::ValueError,
            _ => return None,
        })
    }

    /// Whether `self` would be caught by a `catch (name)` clause.
    pub fn matches(&self, name: &str) -> bool {
        if name == "Error" {
            return true;
        }
        self.name() == name
    }
}

/// A thrown script-level error, propagated with `?` until a `try/catch`
/// catches it or it escapes `main` and is reported.
#[derive(Debug, Clone)]
pub struct Thrown(pub Value);

impl std::fmt::Display for Thrown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for Thrown {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variant_matches_base_name() {
        assert!(ErrorVariant::TypeError.matches("Error"));
        assert!(ErrorVariant::TypeError.matches("TypeError"));
        assert!(!ErrorVariant::TypeError.matches("ValueError"));
    }

    #[test]
    fn round_trips_through_name() {
        for variant in [
            ErrorVariant::Error,
            ErrorVariant::ArgumentError,
            ErrorVariant::TypeError,
            ErrorVariant::ExpressionError,
            ErrorVariant::VariableError,
            ErrorVariant::RuntimeError,
            ErrorVariant::PropertyError,
            ErrorVariant::FunctionError,
            ErrorVariant::StackOverflowError,
            ErrorVariant::ValueError,
        ] {
            assert_eq!(ErrorVariant::from_name(variant.name()), Some(variant));
        }
    }
}
