// tbc: tiny BASIC to C compiler

mod args;

use crossterm::style::Stylize;

use args::Args;
use tbc::driver::{self, DriverError};

fn main() {
    let args = {
        use clap::Parser;
        Args::parse()
    };

    if !args.quiet {
        eprintln!("Compiling {}...", args.source.display());
    }

    match driver::run(&args.source, &args.output) {
        Ok(report) => {
            if !args.quiet {
                eprintln!(
                    "Found {} variable{} and {} label{}.",
                    report.variables,
                    if report.variables == 1 { "" } else { "s" },
                    report.labels,
                    if report.labels == 1 { "" } else { "s" },
                );
                eprintln!("Compiling complete: wrote {}", report.output.display());
            }
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            if let DriverError::Compile(_) = e {
                eprintln!("No output written.");
            }
            std::process::exit(1);
        }
    }
}
