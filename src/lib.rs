//! # Introduction
//!
//! `tbc` compiles a tiny BASIC-like language to C in a single pass. The
//! parser validates the program, tracks variables and labels, and streams the
//! translation into an output buffer as each grammar rule is recognized; no
//! syntax tree is kept.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser (validate + analyze) → Emitter → C source
//! ```
//!
//! 1. [`parser::lexer`] — scans tokens on demand.
//! 2. [`parser::parse`] — recursive descent over a two-token window; checks
//!    use-before-assignment and label integrity.
//! 3. [`emitter`] — header/body buffers joined once at the end.
//! 4. [`driver`] — file in, file out, used by the `tbc` binary.
//!
//! ## Language
//!
//! Statements: `PRINT`, `IF ... THEN ... ENDIF`, `WHILE ... REPEAT ... ENDWHILE`,
//! `LABEL`, `GOTO`, `LET`, `INPUT`, one per line. All values are `double`;
//! variables and labels are emitted with `v_` and `l_` prefixes.
//!
//! ```
//! let c = tbc::compile("LET a = 5\nPRINT a * 2\n").unwrap();
//! assert!(c.contains("double v_a;"));
//! assert!(c.contains("printf(\"%.2f\\n\", (double)(v_a * 2.0));"));
//! ```

pub mod driver;
pub mod emitter;
pub mod errors;
pub mod parser;

use emitter::Emitter;
use errors::CompileError;
use parser::lexer::Lexer;
use parser::parse::Parser;

/// Compile a whole program and return the generated C source.
pub fn compile(source: &str) -> Result<String, CompileError> {
    let mut emitter = Emitter::new();
    let mut parser = Parser::new(Lexer::new(source), &mut emitter)?;
    parser.program()?;
    Ok(emitter.finalize())
}
