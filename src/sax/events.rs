//! Event Types
//!
//! Defines the events buffered between the tokenizer and the pulley cursor.
//!
//! Events are a closed tagged union with one case per notification kind,
//! each carrying only the fields that kind needs. Text-like events carry
//! two renderings: `text` (with any configured trim/normalize applied) and
//! `raw`, which is always byte-identical to the source span.

use core::fmt;

use strum_macros::{Display, EnumString};

/// An attribute on an open tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name (may include a namespace prefix)
    pub name: String,
    /// Attribute value (entities already decoded by the tokenizer)
    pub value: String,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Namespace prefix (before the colon), if any.
    pub fn prefix(&self) -> Option<&str> {
        split_name(&self.name).0
    }

    /// Local name (after the colon, or the whole name when unprefixed).
    pub fn local_name(&self) -> &str {
        split_name(&self.name).1
    }
}

/// A buffered parse event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// An open tag whose attribute list may still be empty or partial.
    OpenTagStart {
        /// Element name
        name: String,
        /// Attributes reported so far
        attributes: Vec<Attribute>,
    },

    /// An open tag with its complete attribute list.
    OpenTag {
        /// Element name
        name: String,
        /// Attributes in document order
        attributes: Vec<Attribute>,
    },

    /// A close tag.
    CloseTag {
        /// Element name
        name: String,
    },

    /// One logical run of text and/or CDATA content.
    Text {
        /// Presentation rendering (trim/normalize applied if configured)
        text: String,
        /// Untransformed source content
        raw: String,
    },

    /// A whitespace-only run, present only when whitespace skipping is
    /// configured. Suppressed from default iteration; `next_text` and
    /// `peek_text` still see it.
    Whitespace {
        /// Presentation rendering
        text: String,
        /// Untransformed source content
        raw: String,
        /// True when a significant text event follows immediately, so a
        /// text read can merge across the boundary
        has_text_after: bool,
    },

    /// A comment. Never coalesces with surrounding text.
    Comment {
        /// Presentation rendering (trim/normalize applied if configured)
        text: String,
        /// Untransformed comment content
        raw: String,
    },

    /// A DOCTYPE declaration.
    Doctype {
        /// Declaration content
        text: String,
    },

    /// A processing instruction: `<?name body?>`
    ProcessingInstruction {
        /// PI target
        name: String,
        /// PI body
        body: String,
    },

    /// A single attribute notification.
    Attribute {
        /// Attribute name
        name: String,
        /// Attribute value
        value: String,
    },

    /// Start-of-CDATA marker. No payload; the content folds into the
    /// surrounding text run.
    OpenCdata,

    /// End-of-CDATA marker.
    CloseCdata,

    /// A namespace mapping coming into scope.
    OpenNamespace {
        /// Bound prefix (empty for the default namespace)
        prefix: String,
        /// Namespace URI
        uri: String,
    },

    /// A namespace mapping going out of scope.
    CloseNamespace {
        /// Bound prefix
        prefix: String,
        /// Namespace URI
        uri: String,
    },
}

/// The variant tag of an [`Event`], without payload.
///
/// Formats to (and parses from) the lowercase wire name: `opentag`,
/// `closetag`, `text`, `processinginstruction`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum EventType {
    /// Open tag, attributes possibly incomplete
    OpenTagStart,
    /// Open tag with complete attributes
    OpenTag,
    /// Close tag
    CloseTag,
    /// Text run
    Text,
    /// Whitespace-only run (internal; not subscribable)
    Whitespace,
    /// Comment
    Comment,
    /// DOCTYPE declaration
    Doctype,
    /// Processing instruction
    ProcessingInstruction,
    /// Single attribute
    Attribute,
    /// CDATA start marker
    OpenCdata,
    /// CDATA end marker
    CloseCdata,
    /// Namespace opening
    OpenNamespace,
    /// Namespace closing
    CloseNamespace,
}

impl Event {
    /// An empty text event, as returned by text reads at end of input.
    pub fn empty_text() -> Self {
        Event::Text {
            text: String::new(),
            raw: String::new(),
        }
    }

    /// The variant tag of this event.
    pub fn event_type(&self) -> EventType {
        match self {
            Event::OpenTagStart { .. } => EventType::OpenTagStart,
            Event::OpenTag { .. } => EventType::OpenTag,
            Event::CloseTag { .. } => EventType::CloseTag,
            Event::Text { .. } => EventType::Text,
            Event::Whitespace { .. } => EventType::Whitespace,
            Event::Comment { .. } => EventType::Comment,
            Event::Doctype { .. } => EventType::Doctype,
            Event::ProcessingInstruction { .. } => EventType::ProcessingInstruction,
            Event::Attribute { .. } => EventType::Attribute,
            Event::OpenCdata => EventType::OpenCdata,
            Event::CloseCdata => EventType::CloseCdata,
            Event::OpenNamespace { .. } => EventType::OpenNamespace,
            Event::CloseNamespace { .. } => EventType::CloseNamespace,
        }
    }

    /// The `name` field, for kinds that carry one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Event::OpenTagStart { name, .. }
            | Event::OpenTag { name, .. }
            | Event::CloseTag { name }
            | Event::ProcessingInstruction { name, .. }
            | Event::Attribute { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The presentation text, for text-like kinds.
    pub fn text(&self) -> Option<&str> {
        match self {
            Event::Text { text, .. }
            | Event::Whitespace { text, .. }
            | Event::Comment { text, .. }
            | Event::Doctype { text } => Some(text),
            _ => None,
        }
    }

    /// The untransformed source content, for kinds that keep it.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Event::Text { raw, .. }
            | Event::Whitespace { raw, .. }
            | Event::Comment { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Check if this is an open-tag event.
    #[inline]
    pub fn is_open_tag(&self) -> bool {
        matches!(self, Event::OpenTag { .. })
    }

    /// Check if this is a text event.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Event::Text { .. })
    }

    /// Namespace prefix of the tag name, if the name is prefixed.
    pub fn prefix(&self) -> Option<&str> {
        self.name().and_then(|name| split_name(name).0)
    }

    /// Local part of the tag name (the whole name when unprefixed).
    pub fn local_name(&self) -> Option<&str> {
        self.name().map(|name| split_name(name).1)
    }

    /// Look up an attribute value by name on an open-tag event.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Event::OpenTagStart { attributes, .. } | Event::OpenTag { attributes, .. } => {
                attributes
                    .iter()
                    .find(|attr| attr.name == name)
                    .map(|attr| attr.value.as_str())
            }
            _ => None,
        }
    }
}

/// Compact single-node rendering, used in mismatch error messages.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::OpenTagStart { name, .. } => write!(f, "<{name}"),
            Event::OpenTag { name, .. } => write!(f, "<{name}>"),
            Event::CloseTag { name } => write!(f, "</{name}>"),
            Event::Text { text, .. } | Event::Whitespace { text, .. } => write!(f, "\"{text}\""),
            Event::Comment { text, .. } => write!(f, "\"{text}\""),
            Event::Doctype { text } => write!(f, "<!{text}>"),
            Event::ProcessingInstruction { name, body } => write!(f, "<?{name} {body}?>"),
            Event::Attribute { name, value } => write!(f, "{name}=\"{value}\""),
            Event::OpenCdata => write!(f, "<![CDATA["),
            Event::CloseCdata => write!(f, "]]>"),
            Event::OpenNamespace { prefix, uri } | Event::CloseNamespace { prefix, uri } => {
                write!(f, "xmlns:{prefix}=\"{uri}\"")
            }
        }
    }
}

/// Split a qualified name into prefix and local name at the first colon.
fn split_name(name: &str) -> (Option<&str>, &str) {
    match memchr::memchr(b':', name.as_bytes()) {
        Some(pos) => (Some(&name[..pos]), &name[pos + 1..]),
        None => (None, name),
    }
}
