//! Pulley Configuration
//!
//! Options controlling which event kinds are surfaced, how text is
//! presented, and what the driving tokenizer is asked to do.

use std::str::FromStr;

use crate::error::PulleyError;
use crate::sax::EventType;

/// Configuration consumed by [`EventCollector::new`](crate::EventCollector::new).
///
/// Construct with struct-update syntax over the defaults:
///
/// ```
/// use xml_pulley::PulleyOptions;
///
/// let options = PulleyOptions {
///     trim: true,
///     normalize: true,
///     ..PulleyOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct PulleyOptions {
    /// Event kinds to surface. Defaults to open tags, close tags, and text.
    ///
    /// Notifications of other kinds are invisible: they are not buffered
    /// and do not interrupt text coalescing.
    pub types: Vec<EventType>,
    /// Strip leading/trailing whitespace from text and comment renderings.
    pub trim: bool,
    /// Collapse each whitespace run in text and comment renderings to a
    /// single space.
    pub normalize: bool,
    /// Suppress whitespace-only text runs from default iteration. They
    /// stay reachable through `next_text`/`peek_text`.
    pub skip_whitespace_only: bool,
    /// Ask the driving tokenizer to resolve namespaces and report
    /// `opennamespace`/`closenamespace`. Passthrough; unused by this crate.
    pub xmlns: bool,
    /// Ask the driving tokenizer to case-fold names. Passthrough.
    pub lowercase: bool,
}

impl Default for PulleyOptions {
    fn default() -> Self {
        PulleyOptions {
            types: vec![EventType::OpenTag, EventType::CloseTag, EventType::Text],
            trim: false,
            normalize: false,
            skip_whitespace_only: false,
            xmlns: false,
            lowercase: false,
        }
    }
}

impl PulleyOptions {
    /// Resolve event-type wire names for the `types` field.
    ///
    /// Fails with [`PulleyError::Configuration`] naming the first unknown
    /// kind.
    pub fn types_by_name(names: &[&str]) -> Result<Vec<EventType>, PulleyError> {
        names
            .iter()
            .map(|name| {
                EventType::from_str(name)
                    .map_err(|_| PulleyError::Configuration((*name).to_owned()))
            })
            .collect()
    }

    /// Reject kinds that cannot be subscribed to.
    ///
    /// `whitespace` events are synthesized internally by the accumulator
    /// and are never a tokenizer notification.
    pub(crate) fn validate(&self) -> Result<(), PulleyError> {
        match self.types.iter().find(|&&ty| ty == EventType::Whitespace) {
            Some(ty) => Err(PulleyError::Configuration(ty.to_string())),
            None => Ok(()),
        }
    }

    /// Whether events of the given kind are surfaced.
    #[inline]
    pub(crate) fn wants(&self, ty: EventType) -> bool {
        self.types.contains(&ty)
    }
}
