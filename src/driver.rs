//! File-to-file compilation
//!
//! Reads one source file, translates it, and writes the C output. The output
//! file is only touched after the whole program compiled successfully.

use crate::emitter::Emitter;
use crate::errors::CompileError;
use crate::parser::lexer::Lexer;
use crate::parser::parse::Parser;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Summary of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub output: PathBuf,
    pub variables: usize,
    pub labels: usize,
}

#[derive(Debug)]
pub enum DriverError {
    Read { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
    Compile(CompileError),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Read { path, source } => {
                write!(f, "Cannot read '{}': {}", path.display(), source)
            }
            DriverError::Write { path, source } => {
                write!(f, "Cannot write '{}': {}", path.display(), source)
            }
            DriverError::Compile(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::Read { source, .. } | DriverError::Write { source, .. } => Some(source),
            DriverError::Compile(err) => Some(err),
        }
    }
}

impl From<CompileError> for DriverError {
    fn from(err: CompileError) -> Self {
        DriverError::Compile(err)
    }
}

/// Compile `source_path` into `output_path`, overwriting any existing file.
pub fn run(source_path: &Path, output_path: &Path) -> Result<Report, DriverError> {
    let source = fs::read_to_string(source_path).map_err(|source| DriverError::Read {
        path: source_path.to_path_buf(),
        source,
    })?;

    let mut emitter = Emitter::new();
    let mut parser = Parser::new(Lexer::new(&source), &mut emitter)?;
    parser.program()?;

    let variables = parser.symbols().len();
    let labels = parser.labels_declared().len();

    fs::write(output_path, emitter.finalize()).map_err(|source| DriverError::Write {
        path: output_path.to_path_buf(),
        source,
    })?;

    Ok(Report {
        output: output_path.to_path_buf(),
        variables,
        labels,
    })
}
