use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SrtfixError};

pub const HOUR: i64 = 3_600_000;
pub const MINUTE: i64 = 60_000;
pub const SECOND: i64 = 1_000;
pub const MILLISECOND: i64 = 1;

/// `H:MM:SS,mmm` as found in SRT span lines. Unsigned.
static CLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2}):([0-9]{1,2}):([0-9]{1,2}),([0-9]+)$").expect("Invalid regex")
});

/// `1h2m3s4ms`-style offsets with an optional leading or trailing sign.
static COMPOUND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-)?((?:[0-9]+(?:ms|h|m|s)?)+)(-)?$").expect("Invalid regex")
});

// `ms` must come before `m` in the alternation.
static TERM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)(ms|h|m|s)?").expect("Invalid regex"));

/// A subtitle timestamp or offset, stored as signed milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(i64);

/// Clock components of a [`Time`]. Every component carries the sign of the
/// whole value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub millis: i64,
}

/// Operand accepted by [`Time::add`] and the other `add` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta<'a> {
    Time(Time),
    Text(&'a str),
    Millis(i64),
}

impl From<Time> for Delta<'_> {
    fn from(time: Time) -> Self {
        Delta::Time(time)
    }
}

impl<'a> From<&'a str> for Delta<'a> {
    fn from(text: &'a str) -> Self {
        Delta::Text(text)
    }
}

impl From<i64> for Delta<'_> {
    fn from(millis: i64) -> Self {
        Delta::Millis(millis)
    }
}

impl Delta<'_> {
    /// Resolve the operand to a concrete offset, parsing text if needed.
    pub fn resolve(self) -> Result<Time> {
        match self {
            Delta::Time(time) => Ok(time),
            Delta::Text(text) => Time::parse(text),
            Delta::Millis(ms) => Ok(Time(ms)),
        }
    }
}

impl Time {
    pub const ZERO: Time = Time(0);

    pub fn from_millis(ms: i64) -> Self {
        Time(ms)
    }

    pub fn millis(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Parse either the SRT clock format (`0:01:02,500`) or a compound
    /// offset (`1m2s500ms`, `-90`, `3s-`). Bare numbers are seconds.
    pub fn parse(text: &str) -> Result<Self> {
        if let Some(caps) = CLOCK_RE.captures(text) {
            let mut ms: i64 = 0;
            for (group, unit) in [(1usize, HOUR), (2, MINUTE), (3, SECOND), (4, MILLISECOND)] {
                let value = parse_digits(&caps[group], text)?;
                ms = value
                    .checked_mul(unit)
                    .and_then(|v| ms.checked_add(v))
                    .ok_or_else(|| SrtfixError::TimeParse(text.to_string()))?;
            }
            return Ok(Time(ms));
        }

        let caps = COMPOUND_RE
            .captures(text)
            .ok_or_else(|| SrtfixError::TimeParse(text.to_string()))?;

        let leading = caps.get(1).is_some();
        let trailing = caps.get(3).is_some();
        if leading && trailing {
            return Err(SrtfixError::TimeParse(text.to_string()));
        }

        let mut total: i64 = 0;
        for term in TERM_RE.captures_iter(&caps[2]) {
            let value = parse_digits(&term[1], text)?;
            let unit = match term.get(2).map(|m| m.as_str()) {
                Some("h") => HOUR,
                Some("m") => MINUTE,
                Some("ms") => MILLISECOND,
                _ => SECOND,
            };
            total = value
                .checked_mul(unit)
                .and_then(|v| total.checked_add(v))
                .ok_or_else(|| SrtfixError::TimeParse(text.to_string()))?;
        }

        Ok(Time(if leading || trailing { -total } else { total }))
    }

    /// Hours, minutes, seconds and milliseconds using truncating division.
    pub fn parts(self) -> TimeParts {
        let ms = self.0;
        TimeParts {
            hours: ms / HOUR,
            minutes: ms % HOUR / MINUTE,
            seconds: ms % MINUTE / SECOND,
            millis: ms % SECOND,
        }
    }

    pub fn shift(self, by: Time) -> Time {
        Time(self.0.saturating_add(by.0))
    }

    pub fn add<'a>(self, delta: impl Into<Delta<'a>>) -> Result<Time> {
        Ok(self.shift(delta.into().resolve()?))
    }

    /// Multiply by `factor`, rounding toward zero.
    pub fn scale(self, factor: f64) -> Time {
        Time((self.0 as f64 * factor).trunc() as i64)
    }
}

fn parse_digits(digits: &str, text: &str) -> Result<i64> {
    digits
        .parse::<i64>()
        .map_err(|_| SrtfixError::TimeParse(text.to_string()))
}

impl FromStr for Time {
    type Err = SrtfixError;

    fn from_str(s: &str) -> Result<Self> {
        Time::parse(s)
    }
}

/// Formats as `[-]HH:MM:SS,mmm`. Hours widen past two digits from 100h on;
/// such output is outside the clock grammar accepted by [`Time::parse`].
impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.unsigned_abs();
        let hours = magnitude / HOUR as u64;
        let minutes = magnitude % HOUR as u64 / MINUTE as u64;
        let seconds = magnitude % MINUTE as u64 / SECOND as u64;
        let millis = magnitude % SECOND as u64;
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "{}{:02}:{:02}:{:02},{:03}",
            sign, hours, minutes, seconds, millis
        )
    }
}
