//! Expression parsing implementation
//!
//! Arithmetic and comparison rules, lowest precedence first:
//!
//! ```text
//! comparison ::= expression (cmp_op expression)+
//! expression ::= term (("+" | "-") term)*
//! term       ::= unary (("*" | "/") unary)*
//! unary      ::= ("+" | "-")? primary
//! primary    ::= number | ident
//! ```
//!
//! C has the same precedence for these operators, so tokens are emitted in
//! the order they are consumed. Binary operators are padded with spaces so a
//! following unary sign can never fuse into `--` or `++`. Number literals are
//! emitted as `double` constants, and a chain `a < b < c` becomes
//! `a < b && b < c`.

use crate::errors::CompileError;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{c_variable, Parser};

impl Parser<'_> {
    /// Parse a comparison; at least one comparison operator is required and
    /// chains such as `a < b < c` are accepted.
    pub(crate) fn comparison(&mut self) -> Result<(), CompileError> {
        let start = self.emitter.body_len();
        self.expression()?;
        let mut left = self.emitter.body_since(start).to_owned();

        if !self.current.kind.is_comparison() {
            return Err(CompileError::ExpectedComparison {
                found: self.current.kind,
                text: self.current.text.clone(),
                location: self.current.location,
            });
        }

        let mut chained = false;
        while self.current.kind.is_comparison() {
            // Each link repeats the shared operand: `a < b && b < c`
            if chained {
                self.emitter.emit(&format!(" && {}", left));
            }
            self.binary_operator()?;

            let start = self.emitter.body_len();
            self.expression()?;
            left = self.emitter.body_since(start).to_owned();
            chained = true;
        }

        Ok(())
    }

    pub(crate) fn expression(&mut self) -> Result<(), CompileError> {
        self.term()?;

        while self.check(TokenKind::Plus) || self.check(TokenKind::Minus) {
            self.binary_operator()?;
            self.term()?;
        }

        Ok(())
    }

    fn term(&mut self) -> Result<(), CompileError> {
        self.unary()?;

        while self.check(TokenKind::Star) || self.check(TokenKind::Slash) {
            self.binary_operator()?;
            self.unary()?;
        }

        Ok(())
    }

    fn unary(&mut self) -> Result<(), CompileError> {
        if self.check(TokenKind::Plus) || self.check(TokenKind::Minus) {
            self.emitter.emit(&self.current.text);
            self.advance()?;
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<(), CompileError> {
        let code = match self.current.kind {
            TokenKind::Number => double_literal(&self.current.text),
            TokenKind::Ident => {
                if !self.symbols.contains(&self.current.text) {
                    return Err(CompileError::UndeclaredVariable {
                        name: self.current.text.clone(),
                        location: self.current.location,
                    });
                }
                c_variable(&self.current.text)
            }
            found => {
                return Err(CompileError::UnexpectedPrimary {
                    found,
                    text: self.current.text.clone(),
                    location: self.current.location,
                });
            }
        };

        self.emitter.emit(&code);
        self.advance()
    }

    fn binary_operator(&mut self) -> Result<(), CompileError> {
        self.emitter.emit(&format!(" {} ", self.current.text));
        self.advance()
    }
}

/// Spell a number literal as a C `double` constant: no leading zeros (C would
/// read octal) and always a fractional part (C would do integer arithmetic).
fn double_literal(text: &str) -> String {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, "0"),
    };

    let whole = whole.trim_start_matches('0');
    let whole = if whole.is_empty() { "0" } else { whole };
    format!("{}.{}", whole, fraction)
}
