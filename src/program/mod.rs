//! Tweet program
//!
//! Entry point for clients: decodes and authorizes `send_tweet` requests,
//! validates and stamps the tweet, allocates its slot, and serves reads.
//!
//! ```text
//! SignedRequest ─► unpack ─► authorize ─► validate ─► RecordStore::create
//!                                                     │
//! fetch_one / fetch_all / fetch_filtered ◄────────────┘
//! ```
//!
//! Errors from the validator, codec and store pass through unchanged as
//! [`ProgramError`].

mod errors;
mod instruction;
mod processor;

pub use errors::{ErrorKind, ProgramError, ProgramResult, Severity};
pub use instruction::{sighash, SendTweet, SendTweetAccounts, SignedRequest};
pub use processor::{KeyedTweet, TweetProgram};
