//! Error types for configuration, tokenizer failures, and cursor assertions.

use thiserror::Error;

use crate::sax::{Event, EventType};

/// Errors surfaced by the collector and the pulley cursor.
///
/// None of these are retried internally; speculative retry is the caller's
/// job, typically via `checkin`/`checkout`.
#[derive(Debug, Clone, Error)]
pub enum PulleyError {
    /// An event type requested at setup is unknown or not subscribable.
    #[error("`{0}` isn't an allowed event type")]
    Configuration(String),

    /// The driving tokenizer reported malformed input. The event stream
    /// ends at the failure point; no further events will ever arrive.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// A `check`/`expect` assertion failed on the event's type.
    ///
    /// `found` is `None` at end of input. The buffer is left unchanged, so
    /// the caller may retry a different assertion.
    #[error("expected {expected}; got {}", found_description(.found.as_ref()))]
    TypeMismatch {
        /// The asserted event type.
        expected: EventType,
        /// The event actually at the cursor, or `None` at end of input.
        found: Option<Event>,
    },

    /// A `check_name`/`expect_name` assertion matched on type but not name.
    #[error("{} had name `{}` instead of `{expected}`", .found.event_type(), .found.name().unwrap_or_default())]
    NameMismatch {
        /// The asserted name.
        expected: String,
        /// The event actually at the cursor.
        found: Event,
    },

    /// `checkout` was invoked on a cursor that `checkin` didn't produce.
    #[error("can't check out a pulley that wasn't checked in")]
    InvalidCheckout,
}

fn found_description(found: Option<&Event>) -> String {
    match found {
        Some(event) => format!("{}: {}", event.event_type(), event),
        None => "end of input".to_owned(),
    }
}
