//! Tiny BASIC source code parser
//!
//! This module validates and translates source text in a single pass:
//! - [`lexer`]: Tokenization (source text → tokens, pulled on demand)
//! - [`parse`]: The [`parse::Parser`] struct, token window and `program` entry point
//! - `statements`: One handler per statement form
//! - `expressions`: Comparisons and arithmetic with C-compatible precedence
//!
//! # Language
//!
//! ```text
//! program     ::= newline* statement* EOF
//! statement   ::= ( "PRINT" ( string | expression )
//!                 | "IF" comparison "THEN" newline statement* "ENDIF"
//!                 | "WHILE" comparison "REPEAT" newline statement* "ENDWHILE"
//!                 | "LABEL" ident
//!                 | "GOTO" ident
//!                 | "LET" ident "=" expression
//!                 | "INPUT" ident ) newline
//! comparison  ::= expression ( ("==" | "!=" | "<" | "<=" | ">" | ">=") expression )+
//! expression  ::= term ( ( "+" | "-" ) term )*
//! term        ::= unary ( ( "*" | "/" ) unary )*
//! unary       ::= ( "+" | "-" )? primary
//! primary     ::= number | ident
//! newline     ::= NEWLINE+
//! ```
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with one method per nonterminal. No AST is
//! built: each rule writes its C translation to the [`crate::emitter::Emitter`]
//! as soon as it is recognized.

pub mod lexer;
pub mod parse;

mod expressions;
mod statements;
