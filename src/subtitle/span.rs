use std::fmt;
use std::str::FromStr;

use super::time::{Delta, Time};
use crate::error::{Result, SrtfixError};

pub const SEPARATOR: &str = " --> ";

/// Display interval of one subtitle. `end` is allowed to precede `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    start: Time,
    end: Time,
}

impl Span {
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> Time {
        self.start
    }

    pub fn end(&self) -> Time {
        self.end
    }

    /// Parse `start --> end`. The separator must occur exactly once.
    pub fn parse(line: &str) -> Result<Self> {
        let mut sides = line.split(SEPARATOR);
        match (sides.next(), sides.next(), sides.next()) {
            (Some(start), Some(end), None) => Ok(Self {
                start: Time::parse(start.trim())?,
                end: Time::parse(end.trim())?,
            }),
            _ => Err(SrtfixError::SpanFormat(line.to_string())),
        }
    }

    pub fn shift(&self, by: Time) -> Span {
        Span::new(self.start.shift(by), self.end.shift(by))
    }

    pub fn add<'a>(&self, delta: impl Into<Delta<'a>>) -> Result<Span> {
        Ok(self.shift(delta.into().resolve()?))
    }

    pub fn scale(&self, factor: f64) -> Span {
        Span::new(self.start.scale(factor), self.end.scale(factor))
    }
}

impl FromStr for Span {
    type Err = SrtfixError;

    fn from_str(s: &str) -> Result<Self> {
        Span::parse(s)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.start, SEPARATOR, self.end)
    }
}
