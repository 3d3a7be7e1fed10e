use std::fmt;

use super::span::Span;
use super::time::{Delta, Time};
use crate::config::LineEnding;
use crate::error::Result;

/// One subtitle: sequence number, display span and text payload.
///
/// The payload keeps its lines joined by `\n`; the terminator is chosen when
/// formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    index: usize,
    span: Span,
    text: String,
}

impl Entry {
    pub fn new(index: usize, span: Span, text: impl Into<String>) -> Self {
        Self {
            index,
            span,
            text: text.into(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn shift(&self, by: Time) -> Entry {
        self.with_span(self.span.shift(by))
    }

    pub fn add<'a>(&self, delta: impl Into<Delta<'a>>) -> Result<Entry> {
        Ok(self.with_span(self.span.add(delta)?))
    }

    pub fn scale(&self, factor: f64) -> Entry {
        self.with_span(self.span.scale(factor))
    }

    fn with_span(&self, span: Span) -> Entry {
        Entry {
            index: self.index,
            span,
            text: self.text.clone(),
        }
    }

    /// Index line, span line and payload, each followed by `line_ending`.
    pub fn format(&self, line_ending: LineEnding) -> String {
        let eol = line_ending.as_str();
        let text = self.text.split('\n').collect::<Vec<_>>().join(eol);
        format!("{}{eol}{}{eol}{}{eol}", self.index, self.span, text)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(LineEnding::Crlf))
    }
}
