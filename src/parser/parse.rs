//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct: the two-token window over the
//! [`Lexer`], the analysis state (variables and labels), the helper methods
//! shared by every production, and the [`Parser::program`] entry point.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks:
//! - `statements`: statement dispatch and the statement forms
//! - `expressions`: comparison and arithmetic rules
//!
//! Label references are collected during the walk and validated only once the
//! whole program has been seen, since a GOTO may precede its LABEL.

use crate::emitter::Emitter;
use crate::errors::CompileError;
use crate::parser::lexer::{Lexer, SourceLocation, Token, TokenKind};
use rustc_hash::{FxHashMap, FxHashSet};

/// Recursive descent parser and translator for tiny BASIC
pub struct Parser<'e> {
    lexer: Lexer,
    pub(crate) emitter: &'e mut Emitter,
    pub(crate) current: Token,
    pub(crate) peek: Token,
    pub(crate) symbols: FxHashSet<String>,
    pub(crate) labels_declared: FxHashMap<String, SourceLocation>,
    pub(crate) labels_gotoed: FxHashMap<String, SourceLocation>,
}

impl<'e> Parser<'e> {
    /// Wire a parser to its token source and output sink. Reads two tokens
    /// eagerly to fill `current` and `peek`.
    pub fn new(mut lexer: Lexer, emitter: &'e mut Emitter) -> Result<Self, CompileError> {
        let current = lexer.next_token()?;
        let peek = lexer.next_token()?;
        Ok(Self {
            lexer,
            emitter,
            current,
            peek,
            symbols: FxHashSet::default(),
            labels_declared: FxHashMap::default(),
            labels_gotoed: FxHashMap::default(),
        })
    }

    /// Parse and translate the entire program
    pub fn program(&mut self) -> Result<(), CompileError> {
        self.emitter.header_line("#include <stdio.h>");
        self.emitter.header_line("int main(void){");

        // Leading blank lines are allowed
        while self.check(TokenKind::Newline) {
            self.advance()?;
        }

        while !self.check(TokenKind::Eof) {
            self.statement()?;
        }

        self.emitter.emit_line("return 0;");
        self.emitter.emit_line("}");

        self.check_labels()
    }

    /// Every GOTO target must be declared somewhere. Reports the earliest
    /// offending GOTO.
    fn check_labels(&self) -> Result<(), CompileError> {
        let dangling = self
            .labels_gotoed
            .iter()
            .filter(|(name, _)| !self.labels_declared.contains_key(*name))
            .min_by_key(|(_, location)| **location);

        match dangling {
            Some((name, location)) => Err(CompileError::UndeclaredLabel {
                name: name.clone(),
                location: *location,
            }),
            None => Ok(()),
        }
    }

    // ===== Analysis results =====

    pub fn symbols(&self) -> &FxHashSet<String> {
        &self.symbols
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.symbols.contains(name)
    }

    pub fn labels_declared(&self) -> &FxHashMap<String, SourceLocation> {
        &self.labels_declared
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Shift `peek` into `current` and pull a fresh token into `peek`.
    pub(crate) fn advance(&mut self) -> Result<(), CompileError> {
        let next = self.lexer.next_token()?;
        self.current = std::mem::replace(&mut self.peek, next);
        Ok(())
    }

    /// Consume the current token if it has the expected kind, returning it.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, CompileError> {
        if !self.check(kind) {
            return Err(CompileError::UnexpectedToken {
                expected: kind,
                found: self.current.kind,
                text: self.current.text.clone(),
                location: self.current.location,
            });
        }

        let token = self.current.clone();
        self.advance()?;
        Ok(token)
    }

    /// Record a variable on first assignment, declaring it in the header.
    pub(crate) fn declare(&mut self, name: &str) {
        if !self.symbols.contains(name) {
            self.symbols.insert(name.to_owned());
            self.emitter
                .header_line(&format!("double {};", c_variable(name)));
        }
    }
}

/// C spelling of a source variable. The prefix keeps source names clear of C
/// keywords and `<stdio.h>` identifiers.
pub(crate) fn c_variable(name: &str) -> String {
    format!("v_{}", name)
}

/// C spelling of a source label.
pub(crate) fn c_label(name: &str) -> String {
    format!("l_{}", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> (Result<(), CompileError>, FxHashSet<String>, String) {
        let mut emitter = Emitter::new();
        let mut parser = Parser::new(Lexer::new(source), &mut emitter).unwrap();
        let result = parser.program();
        let symbols = parser.symbols().clone();
        (result, symbols, emitter.finalize())
    }

    #[test]
    fn test_new_primes_current_and_peek() {
        let mut emitter = Emitter::new();
        let parser = Parser::new(Lexer::new("LET a = 1"), &mut emitter).unwrap();
        assert_eq!(parser.current.kind, TokenKind::Let);
        assert_eq!(parser.peek.kind, TokenKind::Ident);
    }

    #[test]
    fn test_c_names_are_prefixed() {
        assert_eq!(c_variable("int"), "v_int");
        assert_eq!(c_label("int"), "l_int");
        // a variable and a label may share a source name
        assert_ne!(c_variable("x"), c_label("x"));
    }

    #[test]
    fn test_new_reports_lex_error_in_first_tokens() {
        let mut emitter = Emitter::new();
        let result = Parser::new(Lexer::new("LET $"), &mut emitter);
        assert!(matches!(result, Err(CompileError::Lex { .. })));
    }

    #[test]
    fn test_empty_program() {
        let (result, symbols, out) = parse("");
        assert!(result.is_ok());
        assert!(symbols.is_empty());
        assert_eq!(out, "#include <stdio.h>\nint main(void){\nreturn 0;\n}\n");
    }

    #[test]
    fn test_leading_blank_lines_and_comments() {
        let (result, _, _) = parse("\n\n# header comment\n\nPRINT 1\n");
        assert!(result.is_ok());
    }

    #[test]
    fn test_symbols_grow_monotonically() {
        let (result, symbols, out) = parse("LET a = 1\nINPUT b\nLET a = a + b\n");
        assert!(result.is_ok());
        assert_eq!(symbols.len(), 2);
        assert!(symbols.contains("a") && symbols.contains("b"));
        // one declaration per variable, no matter how often it is assigned
        assert_eq!(out.matches("double v_a;").count(), 1);
        assert_eq!(out.matches("double v_b;").count(), 1);
    }

    #[test]
    fn test_expect_reports_expected_and_found() {
        let (result, _, _) = parse("LET a 5\n");
        match result {
            Err(CompileError::UnexpectedToken {
                expected,
                found,
                text,
                location,
            }) => {
                assert_eq!(expected, TokenKind::Eq);
                assert_eq!(found, TokenKind::Number);
                assert_eq!(text, "5");
                assert_eq!(location, SourceLocation::new(1, 7));
            }
            other => panic!("Expected UnexpectedToken, got {:?}", other),
        }
    }

    #[test]
    fn test_earliest_dangling_goto_is_reported() {
        let (result, _, _) = parse("GOTO b\nGOTO a\nGOTO b\nLABEL c\n");
        match result {
            Err(CompileError::UndeclaredLabel { name, location }) => {
                assert_eq!(name, "b");
                assert_eq!(location.line, 1);
            }
            other => panic!("Expected UndeclaredLabel, got {:?}", other),
        }
    }
}
