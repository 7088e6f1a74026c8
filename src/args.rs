use clap::Parser;
use std::path::PathBuf;

/// Compile a tiny BASIC program to C
#[derive(Parser, Debug)]
#[command(name = "tbc", version, about)]
pub struct Args {
    /// Source file to compile
    pub source: PathBuf,

    /// Where to write the generated C code
    #[arg(short, long, default_value = "out.c")]
    pub output: PathBuf,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}
