//! Tracing shim.
//!
//! With the `tracing` feature enabled this re-exports `tracing::trace`;
//! without it the macro expands to nothing, so call sites need no cfg.

#[cfg(feature = "tracing")]
pub(crate) use tracing::trace;

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use trace;
