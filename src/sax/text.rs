//! Text Accumulation
//!
//! Folds the tokenizer's spray of text/CDATA chunks into one logical text
//! event per run, applying the configured presentation options.
//!
//! Trim and normalize are applied to each chunk as it arrives; CDATA chunks
//! are verbatim data and never transformed, but they coalesce into the same
//! run as adjoining text. The `raw` side of every emitted event is the
//! untransformed concatenation of the run's chunks.

use super::events::Event;
use crate::pulley::EventQueue;

/// Accumulates one logical text run between non-text events.
#[derive(Debug)]
pub(crate) struct TextAccumulator {
    trim: bool,
    normalize: bool,
    skip_ws: bool,
    /// Leading whitespace-only chunks of the run (whitespace-skip mode only)
    ws_text: String,
    ws_raw: String,
    /// The run from its first significant chunk onward
    text: String,
    raw: String,
}

impl TextAccumulator {
    /// Create an accumulator with the given presentation options.
    pub(crate) fn new(trim: bool, normalize: bool, skip_whitespace_only: bool) -> Self {
        TextAccumulator {
            trim,
            normalize,
            skip_ws: skip_whitespace_only,
            ws_text: String::new(),
            ws_raw: String::new(),
            text: String::new(),
            raw: String::new(),
        }
    }

    /// Add a text chunk to the pending run.
    pub(crate) fn push_text(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        let rendered = self.render(chunk);
        if self.skip_ws && self.raw.is_empty() && is_whitespace_only(chunk) {
            self.ws_text.push_str(&rendered);
            self.ws_raw.push_str(chunk);
        } else {
            self.text.push_str(&rendered);
            self.raw.push_str(chunk);
        }
    }

    /// Add a CDATA chunk to the pending run. Always verbatim, always
    /// significant, even when it contains only whitespace.
    pub(crate) fn push_cdata(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        self.text.push_str(chunk);
        self.raw.push_str(chunk);
    }

    /// Render a comment body with the same presentation options as text.
    pub(crate) fn render_comment(&self, body: &str) -> String {
        self.render(body)
    }

    /// Emit the pending run, if any, and reset.
    ///
    /// In whitespace-skip mode a run that starts with whitespace-only
    /// chunks yields a whitespace event for that prefix, flagged when the
    /// significant remainder follows it into the queue.
    pub(crate) fn flush(&mut self, queue: &mut EventQueue) {
        if self.skip_ws && !self.ws_raw.is_empty() {
            queue.push(Event::Whitespace {
                text: std::mem::take(&mut self.ws_text),
                raw: std::mem::take(&mut self.ws_raw),
                has_text_after: !self.raw.is_empty(),
            });
        }
        if !self.raw.is_empty() {
            queue.push(Event::Text {
                text: std::mem::take(&mut self.text),
                raw: std::mem::take(&mut self.raw),
            });
        }
    }

    /// Apply trim, then normalize, to one chunk.
    fn render(&self, chunk: &str) -> String {
        let trimmed = if self.trim { chunk.trim() } else { chunk };
        if self.normalize {
            collapse_whitespace(trimmed)
        } else {
            trimmed.to_owned()
        }
    }
}

/// True when the chunk contains no non-whitespace character.
#[inline]
fn is_whitespace_only(chunk: &str) -> bool {
    chunk.chars().all(char::is_whitespace)
}

/// Collapse every whitespace run to a single space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flush_all(acc: &mut TextAccumulator) -> Vec<Event> {
        let mut queue = EventQueue::new();
        acc.flush(&mut queue);
        let mut out = Vec::new();
        while let Some(event) = queue.pop() {
            out.push(event);
        }
        out
    }

    #[test]
    fn test_chunks_coalesce_into_one_event() {
        let mut acc = TextAccumulator::new(false, false, false);
        acc.push_text("Pinkie Pie");
        acc.push_cdata(" > oth");
        acc.push_text("er ponies");
        assert_eq!(
            flush_all(&mut acc),
            vec![Event::Text {
                text: "Pinkie Pie > other ponies".to_owned(),
                raw: "Pinkie Pie > other ponies".to_owned(),
            }]
        );
    }

    #[test]
    fn test_trim_and_normalize_leave_raw_untouched() {
        let mut acc = TextAccumulator::new(true, true, false);
        acc.push_text("\n  a   b\n");
        assert_eq!(
            flush_all(&mut acc),
            vec![Event::Text {
                text: "a b".to_owned(),
                raw: "\n  a   b\n".to_owned(),
            }]
        );
    }

    #[test]
    fn test_cdata_is_never_transformed() {
        let mut acc = TextAccumulator::new(true, true, false);
        acc.push_text("  x  ");
        acc.push_cdata("  keep   this  ");
        assert_eq!(
            flush_all(&mut acc),
            vec![Event::Text {
                text: "x  keep   this  ".to_owned(),
                raw: "  x    keep   this  ".to_owned(),
            }]
        );
    }

    #[test]
    fn test_whitespace_only_run_becomes_whitespace_event() {
        let mut acc = TextAccumulator::new(false, false, true);
        acc.push_text("\n");
        assert_eq!(
            flush_all(&mut acc),
            vec![Event::Whitespace {
                text: "\n".to_owned(),
                raw: "\n".to_owned(),
                has_text_after: false,
            }]
        );
    }

    #[test]
    fn test_whitespace_prefix_is_split_and_flagged() {
        let mut acc = TextAccumulator::new(false, false, true);
        acc.push_text("\n  ");
        acc.push_text("abc");
        assert_eq!(
            flush_all(&mut acc),
            vec![
                Event::Whitespace {
                    text: "\n  ".to_owned(),
                    raw: "\n  ".to_owned(),
                    has_text_after: true,
                },
                Event::Text {
                    text: "abc".to_owned(),
                    raw: "abc".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_whitespace_after_significant_text_stays_in_run() {
        let mut acc = TextAccumulator::new(false, false, true);
        acc.push_text("a");
        acc.push_text("\n");
        acc.push_text("b");
        assert_eq!(
            flush_all(&mut acc),
            vec![Event::Text {
                text: "a\nb".to_owned(),
                raw: "a\nb".to_owned(),
            }]
        );
    }

    #[test]
    fn test_whitespace_only_cdata_is_significant() {
        let mut acc = TextAccumulator::new(false, false, true);
        acc.push_text(" ");
        acc.push_cdata("  ");
        let events = flush_all(&mut acc);
        assert_eq!(
            events,
            vec![
                Event::Whitespace {
                    text: " ".to_owned(),
                    raw: " ".to_owned(),
                    has_text_after: true,
                },
                Event::Text {
                    text: "  ".to_owned(),
                    raw: "  ".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_empty_run_produces_no_event() {
        let mut acc = TextAccumulator::new(false, false, false);
        acc.push_text("");
        assert_eq!(flush_all(&mut acc), Vec::new());
    }

    #[test]
    fn test_flush_is_idempotent_once_drained() {
        let mut acc = TextAccumulator::new(false, false, false);
        acc.push_text("once");
        assert_eq!(flush_all(&mut acc).len(), 1);
        assert_eq!(flush_all(&mut acc), Vec::new());
    }
}
