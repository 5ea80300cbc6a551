//! SAX (Simple API for XML) Side
//!
//! Everything that faces the external tokenizer: the notification trait it
//! drives, the event model, text-run accumulation, and the collector that
//! buffers it all for pull consumption.
//!
//! ## Architecture
//!
//! ```text
//! tokenizer ──SaxHandler──> EventCollector ──finish()──> Pulley
//!                                │
//!                          TextAccumulator
//!                          (coalesce, trim,
//!                           normalize, skip-ws)
//! ```

pub mod collector;
pub mod events;
pub mod handler;

mod text;

pub use collector::EventCollector;
pub use events::{Attribute, Event, EventType};
pub use handler::SaxHandler;
