//! Request tracker entry point
//!
//! Parses arguments and hands off to the CLI module; errors go to stderr
//! with a non-zero exit code.

use request_tracker::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
