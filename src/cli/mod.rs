//! CLI module for tweetstore
//!
//! Commands:
//! - init: Create the data directory
//! - keygen: Write a new keypair file
//! - airdrop: Fund an identity
//! - send: Sign and submit a tweet
//! - fetch: Read one tweet
//! - list: Scan tweets, optionally filtered

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    airdrop, fetch, init, keygen, list, parse_memcmp, run, run_command, send,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
