//! Observable events

use std::fmt;

use super::logger::Severity;

/// Events emitted by the program, store and CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded
    ConfigLoaded,
    /// Store opened (slot log replayed)
    StoreOpened,
    /// Slot log failed verification
    StoreCorruption,
    /// Tweet written to a fresh slot
    TweetSent,
    /// Tweet request refused
    TweetRejected,
    /// Lamports credited to an identity
    Airdrop,
    /// Filtered scan finished
    ScanComplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",
            Event::StoreCorruption => "STORE_CORRUPTION",
            Event::TweetSent => "TWEET_SENT",
            Event::TweetRejected => "TWEET_REJECTED",
            Event::Airdrop => "AIRDROP",
            Event::ScanComplete => "SCAN_COMPLETE",
        }
    }

    /// Returns the severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::StoreCorruption => Severity::Fatal,
            Event::TweetRejected => Severity::Warn,
            Event::ScanComplete => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
