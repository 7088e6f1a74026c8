//! Compile error types
//!
//! This module defines [`CompileError`], the single fatal-result type threaded
//! out of every lexing and parsing operation. There is no recovery: the first
//! error ends the compilation and no output is produced.

use crate::parser::lexer::{LexError, SourceLocation, TokenKind};
use std::fmt;

/// Errors that can occur while translating a program
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// Unrecognized character, malformed number or bad string literal
    Lex {
        message: String,
        location: SourceLocation,
    },

    /// A production required a specific token kind
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        text: String,
        location: SourceLocation,
    },

    /// A statement started with a token that heads no known statement
    InvalidStatement {
        found: TokenKind,
        text: String,
        location: SourceLocation,
    },

    /// A condition had no comparison operator
    ExpectedComparison {
        found: TokenKind,
        text: String,
        location: SourceLocation,
    },

    /// An operand position held something other than a number or variable
    UnexpectedPrimary {
        found: TokenKind,
        text: String,
        location: SourceLocation,
    },

    /// Variable read before any LET or INPUT assigned it
    UndeclaredVariable {
        name: String,
        location: SourceLocation,
    },

    /// LABEL declared twice
    DuplicateLabel {
        name: String,
        first: SourceLocation,
        location: SourceLocation,
    },

    /// GOTO to a label that is never declared
    UndeclaredLabel {
        name: String,
        location: SourceLocation,
    },
}

impl CompileError {
    pub fn location(&self) -> &SourceLocation {
        match self {
            CompileError::Lex { location, .. }
            | CompileError::UnexpectedToken { location, .. }
            | CompileError::InvalidStatement { location, .. }
            | CompileError::ExpectedComparison { location, .. }
            | CompileError::UnexpectedPrimary { location, .. }
            | CompileError::UndeclaredVariable { location, .. }
            | CompileError::DuplicateLabel { location, .. }
            | CompileError::UndeclaredLabel { location, .. } => location,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lex { message, location } => {
                write!(f, "Lexical error at {}: {}", location, message)
            }
            CompileError::UnexpectedToken {
                expected,
                found,
                text,
                location,
            } => {
                write!(
                    f,
                    "Syntax error at {}: expected {}, got {} {:?}",
                    location, expected, found, text
                )
            }
            CompileError::InvalidStatement {
                found,
                text,
                location,
            } => {
                write!(
                    f,
                    "Syntax error at {}: invalid statement starting with {} {:?}",
                    location, found, text
                )
            }
            CompileError::ExpectedComparison {
                found,
                text,
                location,
            } => {
                write!(
                    f,
                    "Syntax error at {}: expected comparison operator, got {} {:?}",
                    location, found, text
                )
            }
            CompileError::UnexpectedPrimary {
                found,
                text,
                location,
            } => {
                write!(
                    f,
                    "Syntax error at {}: expected number or variable, got {} {:?}",
                    location, found, text
                )
            }
            CompileError::UndeclaredVariable { name, location } => {
                write!(
                    f,
                    "Referencing variable '{}' before assignment at {}",
                    name, location
                )
            }
            CompileError::DuplicateLabel {
                name,
                first,
                location,
            } => {
                write!(
                    f,
                    "Label '{}' already declared at line {} (redeclared at {})",
                    name, first.line, location
                )
            }
            CompileError::UndeclaredLabel { name, location } => {
                write!(
                    f,
                    "GOTO to undeclared label '{}' at {}",
                    name, location
                )
            }
        }
    }
}

impl std::error::Error for CompileError {}

impl From<LexError> for CompileError {
    fn from(err: LexError) -> Self {
        CompileError::Lex {
            message: err.message,
            location: err.location,
        }
    }
}
