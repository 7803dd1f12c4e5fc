//! CLI argument definitions using clap
//!
//! Commands:
//! - tweetstore init
//! - tweetstore keygen --out <path>
//! - tweetstore airdrop --to <identity> --lamports <n>
//! - tweetstore send --keypair <path> --topic <t> --content <c>
//! - tweetstore fetch --address <identity>
//! - tweetstore list [--author <identity>] [--topic <t>] [--memcmp OFFSET:HEX]...

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

/// tweetstore - signed tweets in fixed-layout slots
#[derive(Parser, Debug)]
#[command(name = "tweetstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a new data directory
    Init,

    /// Generate a keypair file
    Keygen {
        /// Where to write the keypair (must not exist)
        #[arg(long)]
        out: PathBuf,
    },

    /// Credit lamports to an identity
    Airdrop {
        /// Recipient identity (hex)
        #[arg(long)]
        to: String,

        #[arg(long)]
        lamports: u64,
    },

    /// Send a tweet signed by the given keypair
    Send {
        /// Author keypair file
        #[arg(long)]
        keypair: PathBuf,

        #[arg(long, default_value = "")]
        topic: String,

        #[arg(long)]
        content: String,
    },

    /// Fetch the tweet at an address
    Fetch {
        /// Tweet address (hex)
        #[arg(long)]
        address: String,
    },

    /// List tweets; all filters must match
    List {
        /// Only tweets by this identity (hex)
        #[arg(long)]
        author: Option<String>,

        /// Only tweets with exactly this topic
        #[arg(long)]
        topic: Option<String>,

        /// Raw byte filter, OFFSET:HEX
        #[arg(long)]
        memcmp: Vec<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
