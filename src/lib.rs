//! xml-pulley - Pull-style cursor over push-based XML tokenizer events
//!
//! An external tokenizer pushes notifications (tags, text chunks, comments,
//! ...) into an [`EventCollector`] through the [`SaxHandler`] trait. The
//! collector coalesces text runs and buffers everything in arrival order;
//! [`EventCollector::finish`] then hands the buffer to a [`Pulley`], a
//! lookahead cursor that a recursive-descent-style consumer drives
//! imperatively: peek, expect, loop over a tag body, skip a subtree, or
//! speculate with `checkin`/`checkout`.
//!
//! ```
//! use xml_pulley::{EventCollector, EventType, PulleyOptions, SaxHandler};
//!
//! // The tokenizer pushes notifications in document order...
//! let mut collector = EventCollector::new(PulleyOptions::default())?;
//! collector.open_tag("greeting", &[]);
//! collector.text("hello");
//! collector.close_tag("greeting");
//!
//! // ...and the consumer pulls, with one-event lookahead.
//! let mut pulley = collector.finish()?;
//! let tag = pulley.expect(EventType::OpenTag)?;
//! assert_eq!(tag.name(), Some("greeting"));
//! assert_eq!(pulley.next_text().text(), Some("hello"));
//! pulley.expect_name("greeting", Some(EventType::CloseTag))?;
//! # Ok::<(), xml_pulley::PulleyError>(())
//! ```
//!
//! The tokenizer itself — tag recognition, entity decoding, namespace
//! resolution, well-formedness — is deliberately out of scope; anything
//! able to call [`SaxHandler`] methods in document order can drive this
//! crate.

pub mod error;
pub mod options;
pub mod pulley;
pub mod sax;

mod trace;

pub use error::PulleyError;
pub use options::PulleyOptions;
pub use pulley::{EventQueue, Pulley};
pub use sax::{Attribute, Event, EventCollector, EventType, SaxHandler};
