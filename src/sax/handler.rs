//! Tokenizer-Facing Handler Interface
//!
//! The narrow push interface through which an external tokenizer feeds this
//! crate. The tokenizer calls one method per notification, in document
//! order; [`EventCollector`](super::EventCollector) implements the trait and
//! buffers the result for pull-style consumption.
//!
//! All content arrives as decoded text: entity resolution, attribute
//! parsing, and well-formedness checking are the tokenizer's job.

use super::events::Attribute;

/// Receiver for tokenizer notifications.
pub trait SaxHandler {
    /// Called when an open tag is seen, before its attributes are
    /// necessarily complete.
    ///
    /// # Arguments
    /// * `name` - Element name
    /// * `attributes` - Attributes reported so far (possibly none)
    fn open_tag_start(&mut self, name: &str, attributes: &[Attribute]);

    /// Called for a single attribute.
    fn attribute(&mut self, name: &str, value: &str);

    /// Called when an open tag is complete, with its full attribute list.
    fn open_tag(&mut self, name: &str, attributes: &[Attribute]);

    /// Called for a close tag.
    fn close_tag(&mut self, name: &str);

    /// Called for a chunk of text content. The tokenizer may split one
    /// logical run into arbitrarily small chunks.
    fn text(&mut self, chunk: &str);

    /// Called for a chunk of CDATA content.
    fn cdata(&mut self, chunk: &str);

    /// Called for a comment.
    fn comment(&mut self, text: &str);

    /// Called for a DOCTYPE declaration.
    fn doctype(&mut self, text: &str);

    /// Called for a processing instruction.
    ///
    /// # Arguments
    /// * `name` - PI target
    /// * `body` - PI body (possibly empty)
    fn processing_instruction(&mut self, name: &str, body: &str);

    /// Called at the start of a CDATA section.
    fn open_cdata(&mut self);

    /// Called at the end of a CDATA section.
    fn close_cdata(&mut self);

    /// Called when a namespace mapping comes into scope.
    fn open_namespace(&mut self, prefix: &str, uri: &str);

    /// Called when a namespace mapping goes out of scope.
    fn close_namespace(&mut self, prefix: &str, uri: &str);

    /// Called when the tokenizer hits malformed input. No further
    /// notifications will follow.
    fn fatal_error(&mut self, message: &str);
}
