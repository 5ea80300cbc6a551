//! Pull Side
//!
//! The event buffer and the lookahead cursor over it, including
//! speculative checkpointing.

pub mod cursor;
pub mod queue;

pub use cursor::Pulley;
pub use queue::EventQueue;
