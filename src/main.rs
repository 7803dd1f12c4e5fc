//! tweetstore CLI entry point
//!
//! Parses arguments and dispatches via `cli::run`. Errors are already
//! reported as JSON on stdout; the exit code is non-zero on failure.

use tweetstore::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
