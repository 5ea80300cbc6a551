//! Event Collector
//!
//! Implements [`SaxHandler`] to buffer tokenizer notifications for pull
//! consumption. This is where the push-to-pull inversion happens: the
//! tokenizer drives the handler methods, the collector folds text runs and
//! filters by subscribed kinds, and `finish` hands the filled buffer to a
//! [`Pulley`] cursor.

use super::events::{Attribute, Event, EventType};
use super::handler::SaxHandler;
use super::text::TextAccumulator;
use crate::error::PulleyError;
use crate::options::PulleyOptions;
use crate::pulley::{EventQueue, Pulley};
use crate::trace::trace;

/// Collector that gathers tokenizer notifications into an event buffer.
///
/// Notifications of kinds the caller didn't subscribe to are invisible:
/// they are not buffered and do not interrupt text coalescing. After a
/// fatal tokenizer error every further notification is ignored.
#[derive(Debug)]
pub struct EventCollector {
    options: PulleyOptions,
    accumulator: TextAccumulator,
    queue: EventQueue,
    error: Option<String>,
}

impl EventCollector {
    /// Create a collector for the given options.
    ///
    /// Fails with [`PulleyError::Configuration`] when `options.types`
    /// requests a kind that can't be subscribed to.
    pub fn new(options: PulleyOptions) -> Result<Self, PulleyError> {
        Self::with_capacity(options, 0)
    }

    /// Create a collector with room for an estimated number of events.
    pub fn with_capacity(options: PulleyOptions, events: usize) -> Result<Self, PulleyError> {
        options.validate()?;
        let accumulator = TextAccumulator::new(
            options.trim,
            options.normalize,
            options.skip_whitespace_only,
        );
        Ok(EventCollector {
            options,
            accumulator,
            queue: EventQueue::with_capacity(events),
            error: None,
        })
    }

    /// The configuration this collector was built with, including the
    /// tokenizer passthrough flags (`xmlns`, `lowercase`).
    pub fn options(&self) -> &PulleyOptions {
        &self.options
    }

    /// Finalize the stream: flush any pending text and return the cursor.
    ///
    /// Fails with [`PulleyError::Tokenizer`] if the tokenizer reported
    /// malformed input at any point.
    pub fn finish(self) -> Result<Pulley, PulleyError> {
        let EventCollector {
            options,
            mut accumulator,
            mut queue,
            error,
        } = self;
        if let Some(message) = error {
            return Err(PulleyError::Tokenizer(message));
        }
        accumulator.flush(&mut queue);
        trace!(events = queue.len(), "pulley ready");
        Ok(Pulley::new(queue, options.skip_whitespace_only))
    }

    /// Flush pending text and enqueue an event of a subscribed kind.
    fn event(&mut self, ty: EventType, build: impl FnOnce() -> Event) {
        if self.error.is_some() || !self.options.wants(ty) {
            return;
        }
        self.accumulator.flush(&mut self.queue);
        self.queue.push(build());
    }
}

impl SaxHandler for EventCollector {
    fn open_tag_start(&mut self, name: &str, attributes: &[Attribute]) {
        self.event(EventType::OpenTagStart, || Event::OpenTagStart {
            name: name.to_owned(),
            attributes: attributes.to_vec(),
        });
    }

    fn attribute(&mut self, name: &str, value: &str) {
        self.event(EventType::Attribute, || Event::Attribute {
            name: name.to_owned(),
            value: value.to_owned(),
        });
    }

    fn open_tag(&mut self, name: &str, attributes: &[Attribute]) {
        self.event(EventType::OpenTag, || Event::OpenTag {
            name: name.to_owned(),
            attributes: attributes.to_vec(),
        });
    }

    fn close_tag(&mut self, name: &str) {
        self.event(EventType::CloseTag, || Event::CloseTag {
            name: name.to_owned(),
        });
    }

    fn text(&mut self, chunk: &str) {
        if self.error.is_some() || !self.options.wants(EventType::Text) {
            return;
        }
        self.accumulator.push_text(chunk);
    }

    fn cdata(&mut self, chunk: &str) {
        if self.error.is_some() || !self.options.wants(EventType::Text) {
            return;
        }
        self.accumulator.push_cdata(chunk);
    }

    fn comment(&mut self, text: &str) {
        let rendered = self.accumulator.render_comment(text);
        self.event(EventType::Comment, || Event::Comment {
            text: rendered,
            raw: text.to_owned(),
        });
    }

    fn doctype(&mut self, text: &str) {
        self.event(EventType::Doctype, || Event::Doctype {
            text: text.to_owned(),
        });
    }

    fn processing_instruction(&mut self, name: &str, body: &str) {
        self.event(EventType::ProcessingInstruction, || {
            Event::ProcessingInstruction {
                name: name.to_owned(),
                body: body.to_owned(),
            }
        });
    }

    fn open_cdata(&mut self) {
        self.event(EventType::OpenCdata, || Event::OpenCdata);
    }

    fn close_cdata(&mut self) {
        self.event(EventType::CloseCdata, || Event::CloseCdata);
    }

    fn open_namespace(&mut self, prefix: &str, uri: &str) {
        self.event(EventType::OpenNamespace, || Event::OpenNamespace {
            prefix: prefix.to_owned(),
            uri: uri.to_owned(),
        });
    }

    fn close_namespace(&mut self, prefix: &str, uri: &str) {
        self.event(EventType::CloseNamespace, || Event::CloseNamespace {
            prefix: prefix.to_owned(),
            uri: uri.to_owned(),
        });
    }

    fn fatal_error(&mut self, message: &str) {
        if self.error.is_none() {
            self.error = Some(message.to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collector(types: &[EventType]) -> EventCollector {
        let options = PulleyOptions {
            types: types.to_vec(),
            ..PulleyOptions::default()
        };
        EventCollector::new(options).unwrap()
    }

    #[test]
    fn test_simple_document() {
        let mut collector = EventCollector::new(PulleyOptions::default()).unwrap();
        collector.open_tag("greeting", &[Attribute::new("lang", "en")]);
        collector.text("hello");
        collector.close_tag("greeting");

        let mut pulley = collector.finish().unwrap();
        let tag = pulley.expect(EventType::OpenTag).unwrap();
        assert_eq!(tag.name(), Some("greeting"));
        assert_eq!(tag.attribute("lang"), Some("en"));
        assert_eq!(pulley.next_text().text(), Some("hello"));
        assert!(pulley
            .expect_name("greeting", Some(EventType::CloseTag))
            .is_ok());
        assert_eq!(pulley.next(), None);
    }

    #[test]
    fn test_text_and_cdata_coalesce_into_one_event() {
        // <mlp>Pinkie Pie<![CDATA[ > oth]]>er ponies</mlp> with the CDATA
        // markers unsubscribed.
        let mut collector = EventCollector::new(PulleyOptions::default()).unwrap();
        collector.open_tag("mlp", &[]);
        collector.text("Pinkie Pie");
        collector.open_cdata();
        collector.cdata(" > oth");
        collector.close_cdata();
        collector.text("er ponies");
        collector.close_tag("mlp");

        let mut pulley = collector.finish().unwrap();
        let _ = pulley.expect(EventType::OpenTag).unwrap();
        let run = pulley.expect(EventType::Text).unwrap();
        assert_eq!(run.text(), Some("Pinkie Pie > other ponies"));
        assert_eq!(run.raw_text(), Some("Pinkie Pie > other ponies"));
    }

    #[test]
    fn test_text_coalesces_across_unsubscribed_kinds() {
        // <dhsb><bad-horse>Bad Horse,</bad-horse> Bad Horse!</dhsb> with
        // only text subscribed: the tags are invisible and don't split the
        // run.
        let mut collector = collector(&[EventType::Text]);
        collector.open_tag("dhsb", &[]);
        collector.open_tag("bad-horse", &[]);
        collector.text("Bad Horse,");
        collector.close_tag("bad-horse");
        collector.text(" Bad Horse!");
        collector.close_tag("dhsb");

        let mut pulley = collector.finish().unwrap();
        assert_eq!(pulley.next_text().text(), Some("Bad Horse, Bad Horse!"));
        assert_eq!(pulley.next(), None);
    }

    #[test]
    fn test_subscribed_cdata_markers_split_the_run() {
        let mut collector = collector(&[
            EventType::OpenTag,
            EventType::CloseTag,
            EventType::Text,
            EventType::OpenCdata,
            EventType::CloseCdata,
        ]);
        collector.open_tag("mlp", &[]);
        collector.text("Pinkie Pie");
        collector.open_cdata();
        collector.cdata(" > oth");
        collector.close_cdata();
        collector.text("er ponies");
        collector.close_tag("mlp");

        let pulley = collector.finish().unwrap();
        let kinds: Vec<EventType> = pulley.map(|event| event.event_type()).collect();
        assert_eq!(
            kinds,
            vec![
                EventType::OpenTag,
                EventType::Text,
                EventType::OpenCdata,
                EventType::Text,
                EventType::CloseCdata,
                EventType::Text,
                EventType::CloseTag,
            ]
        );
    }

    #[test]
    fn test_raw_survives_trim_and_normalize() {
        // <r>\n  a   b\n</r>
        let options = PulleyOptions {
            trim: true,
            normalize: true,
            ..PulleyOptions::default()
        };
        let mut collector = EventCollector::new(options).unwrap();
        collector.open_tag("r", &[]);
        collector.text("\n  a   b\n");
        collector.close_tag("r");

        let mut pulley = collector.finish().unwrap();
        let _ = pulley.expect(EventType::OpenTag).unwrap();
        let run = pulley.expect(EventType::Text).unwrap();
        assert_eq!(run.text(), Some("a b"));
        assert_eq!(run.raw_text(), Some("\n  a   b\n"));
    }

    #[test]
    fn test_whitespace_only_run_is_skipped_but_not_lost() {
        // <r>\n</r>
        let options = PulleyOptions {
            skip_whitespace_only: true,
            ..PulleyOptions::default()
        };
        let mut collector = EventCollector::new(options).unwrap();
        collector.open_tag("r", &[]);
        collector.text("\n");
        collector.close_tag("r");

        let mut pulley = collector.finish().unwrap();
        let _ = pulley.expect(EventType::OpenTag).unwrap();
        // Default iteration skips straight to the close tag...
        assert!(pulley.check(EventType::CloseTag).is_ok());
        // ...but the run is still readable as text.
        assert_eq!(pulley.next_text().text(), Some("\n"));
        assert!(pulley.expect(EventType::CloseTag).is_ok());
    }

    #[test]
    fn test_comments_are_rendered_but_never_coalesced() {
        let options = PulleyOptions {
            types: vec![EventType::Text, EventType::Comment],
            trim: true,
            normalize: true,
            ..PulleyOptions::default()
        };
        let mut collector = EventCollector::new(options).unwrap();
        collector.text("a");
        collector.comment("  hi   there ");
        collector.text("b");

        let events: Vec<Event> = collector.finish().unwrap().collect();
        assert_eq!(
            events,
            vec![
                Event::Text {
                    text: "a".to_owned(),
                    raw: "a".to_owned()
                },
                Event::Comment {
                    text: "hi there".to_owned(),
                    raw: "  hi   there ".to_owned()
                },
                Event::Text {
                    text: "b".to_owned(),
                    raw: "b".to_owned()
                },
            ]
        );
    }

    #[test]
    fn test_structural_kinds_are_surfaced_in_arrival_order() {
        let mut collector = collector(&[
            EventType::OpenTagStart,
            EventType::Attribute,
            EventType::OpenTag,
            EventType::CloseTag,
            EventType::Doctype,
            EventType::ProcessingInstruction,
            EventType::OpenNamespace,
            EventType::CloseNamespace,
        ]);
        collector.doctype("note SYSTEM \"note.dtd\"");
        collector.processing_instruction("xml-stylesheet", "href=\"a.css\"");
        collector.open_tag_start("svg:rect", &[]);
        collector.attribute("id", "r1");
        collector.open_namespace("svg", "http://www.w3.org/2000/svg");
        collector.open_tag("svg:rect", &[Attribute::new("id", "r1")]);
        collector.close_tag("svg:rect");
        collector.close_namespace("svg", "http://www.w3.org/2000/svg");

        let kinds: Vec<EventType> = collector
            .finish()
            .unwrap()
            .map(|event| event.event_type())
            .collect();
        assert_eq!(
            kinds,
            vec![
                EventType::Doctype,
                EventType::ProcessingInstruction,
                EventType::OpenTagStart,
                EventType::Attribute,
                EventType::OpenNamespace,
                EventType::OpenTag,
                EventType::CloseTag,
                EventType::CloseNamespace,
            ]
        );
    }

    #[test]
    fn test_trailing_text_is_flushed_at_finish() {
        let mut collector = EventCollector::new(PulleyOptions::default()).unwrap();
        collector.text("Not actually valid XML");

        let mut pulley = collector.finish().unwrap();
        assert_eq!(pulley.next_text().text(), Some("Not actually valid XML"));
    }

    #[test]
    fn test_empty_input_yields_exhausted_pulley() {
        let collector = EventCollector::new(PulleyOptions::default()).unwrap();
        let mut pulley = collector.finish().unwrap();
        assert_eq!(pulley.peek(), None);
        assert_eq!(pulley.next(), None);
        assert_eq!(pulley.next_text(), Event::empty_text());
    }

    #[test]
    fn test_fatal_error_poisons_the_stream() {
        let mut collector = EventCollector::new(PulleyOptions::default()).unwrap();
        collector.open_tag("root", &[]);
        collector.fatal_error("unexpected close tag");
        // Notifications after the error are ignored.
        collector.text("never seen");
        collector.close_tag("root");

        let err = collector.finish().unwrap_err();
        assert!(matches!(
            err,
            PulleyError::Tokenizer(message) if message == "unexpected close tag"
        ));
    }

    #[test]
    fn test_whitespace_type_is_rejected_at_setup() {
        let options = PulleyOptions {
            types: vec![EventType::Text, EventType::Whitespace],
            ..PulleyOptions::default()
        };
        let err = EventCollector::new(options).unwrap_err();
        assert!(matches!(
            err,
            PulleyError::Configuration(name) if name == "whitespace"
        ));
    }
}
