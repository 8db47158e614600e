// ABOUTME: Accumulates lexer, parser and critical interpreter errors for one run

use crate::error::{LexerError, ParseError};
use std::fmt;

#[derive(Debug, Clone)]
pub enum ReportedError {
    Lexer(LexerError),
    Parser(ParseError),
    Critical(String),
}

impl fmt::Display for ReportedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportedError::Lexer(e) => write!(f, "{e}"),
            ReportedError::Parser(e) => write!(f, "{e}"),
            ReportedError::Critical(e) => write!(f, "{e}"),
        }
    }
}

/// Collects every error surfaced while lexing and parsing a source. The
/// interpreter does not report its own errors here while a script is
/// running -- it threads them as `Thrown` values -- but one that escapes
/// `main` unhandled is recorded as `Critical` before the run ends.
#[derive(Debug, Clone, Default)]
pub struct ErrorHandler {
    errors: Vec<ReportedError>,
}

impl ErrorHandler {
    pub fn new() -> Self {
        ErrorHandler::default()
    }

    pub fn add_lexer_error(&mut self, error: LexerError) {
        self.errors.push(ReportedError::Lexer(error));
    }

    pub fn add_parser_error(&mut self, error: ParseError) {
        self.errors.push(ReportedError::Parser(error));
    }

    pub fn add_critical_error(&mut self, message: impl Into<String>) {
        self.errors.push(ReportedError::Critical(message.into()));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ReportedError] {
        &self.errors
    }

    /// Writes every accumulated error, one per line, to stderr.
    pub fn report(&self) {
        for error in &self.errors {
            eprintln!("{error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LexError, LexerError};
    use crate::position::Position;

    #[test]
    fn starts_empty() {
        let handler = ErrorHandler::new();
        assert!(!handler.has_errors());
    }

    #[test]
    fn accumulates_across_stages() {
        let mut handler = ErrorHandler::new();
        handler.add_lexer_error(LexerError::new(
            LexError::LeadingZeros {
                lexeme: "0".to_string(),
            },
            Position::new(1, 1),
        ));
        assert!(handler.has_errors());
        assert_eq!(handler.errors().len(), 1);
    }
}
