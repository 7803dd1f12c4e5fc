//! tweetstore - signed tweet records in fixed-size slots
//!
//! Records have a fixed binary layout, so queries filter slots by comparing
//! raw bytes at known offsets instead of decoding every record.

pub mod cli;
pub mod clock;
pub mod config;
pub mod identity;
pub mod observability;
pub mod program;
pub mod record;
pub mod store;
pub mod validator;
