//! Observability for tweetstore
//!
//! - Structured logging (one JSON object per line, on stderr)
//! - Counters for requests, allocations and scans
//!
//! Observability is read-only: nothing here changes what an operation does.
//!
//! ```ignore
//! use tweetstore::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::TweetSent, &[("address", "ab12..")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_tweets_sent();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log an event at its default severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log an event with fields at its default severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
