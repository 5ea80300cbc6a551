//! Pulley Cursor
//!
//! The pull side: a lookahead-capable cursor over the event buffer.
//!
//! `peek`/`next` are the primitives; typed assertions (`check`/`expect` and
//! the `_name` forms), text reads, and the iteration helpers are all built
//! on top of them and never touch the buffer directly. `checkin` produces
//! an independent snapshot cursor for speculative parsing; `checkout`
//! commits it back into its parent.

use std::cell::RefCell;
use std::rc::Rc;

use super::queue::EventQueue;
use crate::error::PulleyError;
use crate::sax::{Event, EventType};
use crate::trace::trace;

/// A pull cursor over buffered parse events.
///
/// Exclusive owner of its buffer: two live cursors never share one. The
/// only states are "has events remaining" and "exhausted"; nesting depth
/// during tag iteration is the caller's, held in recursion.
#[derive(Debug)]
pub struct Pulley {
    queue: Rc<RefCell<EventQueue>>,
    skip_ws: bool,
    /// Buffer of the cursor this one was checked in from, if any.
    parent: Option<Rc<RefCell<EventQueue>>>,
}

impl Pulley {
    /// Wrap a filled buffer. The collector is the production caller.
    pub(crate) fn new(queue: EventQueue, skip_whitespace_only: bool) -> Self {
        Pulley {
            queue: Rc::new(RefCell::new(queue)),
            skip_ws: skip_whitespace_only,
            parent: None,
        }
    }

    /// Build a cursor directly from an event sequence.
    ///
    /// Useful for consumers with their own event source and for tests; the
    /// usual path is [`EventCollector::finish`](crate::EventCollector::finish).
    pub fn from_events(
        events: impl IntoIterator<Item = Event>,
        skip_whitespace_only: bool,
    ) -> Self {
        Pulley::new(events.into_iter().collect(), skip_whitespace_only)
    }

    /// Read the front event without consuming it, or `None` at end of
    /// input. Idempotent; whitespace-only events are skipped (not
    /// consumed) when whitespace skipping is configured.
    pub fn peek(&self) -> Option<Event> {
        let queue = self.queue.borrow();
        queue
            .iter()
            .find(|event| !self.suppressed(event))
            .cloned()
    }

    /// Read the logical text run at the cursor without consuming anything.
    ///
    /// Same result as [`next_text`](Self::next_text) would return.
    pub fn peek_text(&self) -> Event {
        let queue = self.queue.borrow();
        let mut events = queue.iter();
        match events.next() {
            Some(Event::Text { text, raw }) => Event::Text {
                text: text.clone(),
                raw: raw.clone(),
            },
            Some(Event::Whitespace {
                text,
                raw,
                has_text_after,
            }) => {
                let mut text = text.clone();
                let mut raw = raw.clone();
                if *has_text_after {
                    if let Some(Event::Text {
                        text: rest,
                        raw: rest_raw,
                    }) = events.next()
                    {
                        text.push_str(rest);
                        raw.push_str(rest_raw);
                    }
                }
                Event::Text { text, raw }
            }
            _ => Event::empty_text(),
        }
    }

    /// Remove and return the logical text run at the cursor.
    ///
    /// A suppressed whitespace-only run is read regardless of the skip
    /// configuration, merged with the significant text it precedes. When
    /// there is no text at the cursor (including end of input), nothing is
    /// consumed and a synthetic empty text event is returned, so a caller
    /// can always obtain some text value after an opening tag.
    pub fn next_text(&mut self) -> Event {
        let mut queue = self.queue.borrow_mut();
        match queue.front() {
            Some(Event::Text { .. }) | Some(Event::Whitespace { .. }) => {}
            _ => return Event::empty_text(),
        }
        match queue.pop() {
            Some(Event::Text { text, raw }) => Event::Text { text, raw },
            Some(Event::Whitespace {
                mut text,
                mut raw,
                has_text_after,
            }) => {
                if has_text_after {
                    if let Some(Event::Text {
                        text: rest,
                        raw: rest_raw,
                    }) = queue.pop()
                    {
                        text.push_str(&rest);
                        raw.push_str(&rest_raw);
                    }
                }
                Event::Text { text, raw }
            }
            _ => Event::empty_text(),
        }
    }

    /// Assert the front event's type without consuming anything.
    ///
    /// Returns the event on success. On failure the buffer is untouched
    /// and the error carries the expected type plus the offending event
    /// (or end of input), so a different assertion may be retried.
    pub fn check(&self, expected: EventType) -> Result<Event, PulleyError> {
        match self.peek() {
            Some(event) if event.event_type() == expected => Ok(event),
            found => Err(PulleyError::TypeMismatch { expected, found }),
        }
    }

    /// Assert the front event's type and consume it on success.
    pub fn expect(&mut self, expected: EventType) -> Result<Event, PulleyError> {
        let event = self.check(expected)?;
        let _ = self.next();
        Ok(event)
    }

    /// Assert the front event's type and name without consuming anything.
    ///
    /// `expected` defaults to [`EventType::OpenTag`]. The error
    /// distinguishes a type mismatch from a name mismatch.
    pub fn check_name(
        &self,
        name: &str,
        expected: Option<EventType>,
    ) -> Result<Event, PulleyError> {
        let event = self.check(expected.unwrap_or(EventType::OpenTag))?;
        if event.name() != Some(name) {
            return Err(PulleyError::NameMismatch {
                expected: name.to_owned(),
                found: event,
            });
        }
        Ok(event)
    }

    /// Assert the front event's type and name, consuming it on success.
    pub fn expect_name(
        &mut self,
        name: &str,
        expected: Option<EventType>,
    ) -> Result<Event, PulleyError> {
        let event = self.check_name(name, expected)?;
        let _ = self.next();
        Ok(event)
    }

    /// Invoke `callback` repeatedly while the front event exists and is
    /// not of type `end`. The boundary event is left unconsumed, and
    /// reaching end of input first is not an error.
    ///
    /// The callback does all advancing; one that never consumes will loop
    /// forever. Returning `Ok(true)` aborts the loop early without any
    /// assertion about the current position.
    pub fn loop_until<F>(&mut self, end: EventType, mut callback: F) -> Result<(), PulleyError>
    where
        F: FnMut(&mut Pulley) -> Result<bool, PulleyError>,
    {
        while let Some(event) = self.peek() {
            if event.event_type() == end {
                break;
            }
            if callback(self)? {
                break;
            }
        }
        Ok(())
    }

    /// Consume an opening tag, invoke `callback` until the matching close
    /// tag is at the front, then consume the close tag after asserting its
    /// name. Returns the opening tag event.
    ///
    /// Fails if the cursor is not on an opening tag, if input ends before
    /// a close tag, or if the close tag's name doesn't match.
    pub fn loop_tag<F>(&mut self, callback: F) -> Result<Event, PulleyError>
    where
        F: FnMut(&mut Pulley, &Event) -> Result<(), PulleyError>,
    {
        self.loop_tag_impl(None, callback)
    }

    /// [`loop_tag`](Self::loop_tag), additionally asserting the opening
    /// tag's name.
    pub fn loop_tag_named<F>(&mut self, name: &str, callback: F) -> Result<Event, PulleyError>
    where
        F: FnMut(&mut Pulley, &Event) -> Result<(), PulleyError>,
    {
        self.loop_tag_impl(Some(name), callback)
    }

    fn loop_tag_impl<F>(
        &mut self,
        name: Option<&str>,
        mut callback: F,
    ) -> Result<Event, PulleyError>
    where
        F: FnMut(&mut Pulley, &Event) -> Result<(), PulleyError>,
    {
        let tag = match name {
            Some(name) => self.expect_name(name, None)?,
            None => self.expect(EventType::OpenTag)?,
        };
        while let Some(event) = self.peek() {
            if event.event_type() == EventType::CloseTag {
                break;
            }
            callback(self, &tag)?;
        }
        let tag_name = tag.name().unwrap_or_default().to_owned();
        self.expect_name(&tag_name, Some(EventType::CloseTag))?;
        Ok(tag)
    }

    /// Consume the entire subtree rooted at the current opening tag
    /// without interpreting it. Returns the opening tag event.
    pub fn skip_tag(&mut self) -> Result<Event, PulleyError> {
        self.skip_tag_impl(None)
    }

    /// [`skip_tag`](Self::skip_tag), additionally asserting the opening
    /// tag's name.
    pub fn skip_tag_named(&mut self, name: &str) -> Result<Event, PulleyError> {
        self.skip_tag_impl(Some(name))
    }

    fn skip_tag_impl(&mut self, name: Option<&str>) -> Result<Event, PulleyError> {
        self.loop_tag_impl(name, |pulley, _| {
            match pulley.peek() {
                Some(event) if event.event_type() == EventType::OpenTag => {
                    pulley.skip_tag()?;
                }
                _ => {
                    let _ = pulley.next();
                }
            }
            Ok(())
        })
    }

    /// Snapshot this cursor for speculative parsing.
    ///
    /// The child gets an independent copy of the remaining events and may
    /// be driven freely: dropping it discards the speculation, while
    /// [`checkout`](Self::checkout) commits its position back here.
    /// Consumption on either cursor is invisible to the other until then.
    pub fn checkin(&self) -> Pulley {
        let copy = self.queue.borrow().clone();
        trace!(events = copy.len(), "checked in");
        Pulley {
            queue: Rc::new(RefCell::new(copy)),
            skip_ws: self.skip_ws,
            parent: Some(Rc::clone(&self.queue)),
        }
    }

    /// Commit this cursor's position into its immediate parent.
    ///
    /// The parent's remaining buffer is replaced by this cursor's, and
    /// this cursor is left exhausted. Only merges one level; a grandchild
    /// must check out once per level to reach the root. Fails with
    /// [`PulleyError::InvalidCheckout`] on a cursor that `checkin` didn't
    /// produce.
    pub fn checkout(&mut self) -> Result<(), PulleyError> {
        let parent = self.parent.as_ref().ok_or(PulleyError::InvalidCheckout)?;
        let remaining = std::mem::take(&mut *self.queue.borrow_mut());
        trace!(events = remaining.len(), "checked out");
        *parent.borrow_mut() = remaining;
        Ok(())
    }

    /// True for events the configured skip hides from default iteration.
    #[inline]
    fn suppressed(&self, event: &Event) -> bool {
        self.skip_ws && matches!(event, Event::Whitespace { .. })
    }
}

/// Consuming iteration; equivalent to repeated visible-front removal.
///
/// Whitespace-only events are discarded on the way when whitespace
/// skipping is configured, and returned like any other event when not.
impl Iterator for Pulley {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        let mut queue = self.queue.borrow_mut();
        loop {
            let event = queue.pop()?;
            if self.suppressed(&event) {
                continue;
            }
            return Some(event);
        }
    }
}
