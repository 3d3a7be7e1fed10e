use std::collections::HashMap;
use std::fmt;
use std::mem;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::entry::Entry;
use super::span::Span;
use super::time::{Delta, Time};
use crate::config::LineEnding;
use crate::error::{Result, SrtfixError};

static INDEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("Invalid regex"));

const BOM: char = '\u{feff}';

/// State of the line grouping scan.
#[derive(Debug)]
enum GroupState {
    /// No index line seen yet.
    SeekingIndex,
    /// Collecting the span line and payload of the entry opened by `index`.
    Accumulating { index: String, lines: Vec<String> },
}

/// Splits trimmed lines into `(index, lines)` groups. A line made only of
/// digits opens a new group; every other line belongs to the open group.
///
/// Groups without any lines are never yielded, so an index line at the very
/// end of the input (or directly followed by another index line) is dropped.
pub struct LineGroups<I> {
    lines: I,
    state: GroupState,
}

impl<I> LineGroups<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            state: GroupState::SeekingIndex,
        }
    }
}

impl<I> Iterator for LineGroups<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    /// The raw digits of the index line and the lines that followed it.
    type Item = (String, Vec<String>);

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            let line = line.as_ref().trim();

            if INDEX_RE.is_match(line) {
                let previous = mem::replace(
                    &mut self.state,
                    GroupState::Accumulating {
                        index: line.to_string(),
                        lines: Vec::new(),
                    },
                );
                if let GroupState::Accumulating { index, lines } = previous {
                    if !lines.is_empty() {
                        return Some((index, lines));
                    }
                    debug!("Dropping index {} with no span line", index);
                }
                continue;
            }

            match &mut self.state {
                GroupState::SeekingIndex => {
                    if !line.is_empty() {
                        warn!("Skipping line before first subtitle index: {:?}", line);
                    }
                }
                GroupState::Accumulating { lines, .. } => lines.push(line.to_string()),
            }
        }

        match mem::replace(&mut self.state, GroupState::SeekingIndex) {
            GroupState::Accumulating { index, lines } if !lines.is_empty() => Some((index, lines)),
            GroupState::Accumulating { index, .. } => {
                debug!("Dropping trailing index {} with no span line", index);
                None
            }
            GroupState::SeekingIndex => None,
        }
    }
}

/// A parsed SRT document.
///
/// Entries are kept in the order they were first seen. When an index occurs
/// more than once, the later entry replaces the earlier one in the earlier
/// one's position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryList {
    entries: Vec<Entry>,
    positions: HashMap<usize, usize>,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole SRT document. Any malformed entry fails the parse.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        let mut list = EntryList::new();

        for (index, lines) in LineGroups::new(text.lines()) {
            let index: usize = index
                .parse()
                .map_err(|_| SrtfixError::InvalidIndex(index.clone()))?;
            let span = Span::parse(&lines[0]).inspect_err(|e| {
                warn!("Entry {} has an invalid span line: {}", index, e);
            })?;
            list.insert(Entry::new(index, span, lines[1..].join("\n")));
        }

        debug!("Parsed {} subtitle entries", list.len());
        Ok(list)
    }

    pub fn insert(&mut self, entry: Entry) {
        match self.positions.get(&entry.index()) {
            Some(&position) => {
                debug!("Duplicate subtitle index {}, replacing", entry.index());
                self.entries[position] = entry;
            }
            None => {
                self.positions.insert(entry.index(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.positions.get(&index).map(|&position| &self.entries[position])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn shift(&self, by: Time) -> EntryList {
        self.map(|entry| entry.shift(by))
    }

    pub fn add<'a>(&self, delta: impl Into<Delta<'a>>) -> Result<EntryList> {
        Ok(self.shift(delta.into().resolve()?))
    }

    pub fn scale(&self, factor: f64) -> EntryList {
        self.map(|entry| entry.scale(factor))
    }

    fn map(&self, f: impl Fn(&Entry) -> Entry) -> EntryList {
        EntryList {
            entries: self.entries.iter().map(f).collect(),
            positions: self.positions.clone(),
        }
    }

    pub fn format(&self, line_ending: LineEnding) -> String {
        self.entries
            .iter()
            .map(|entry| entry.format(line_ending))
            .collect()
    }
}

impl FromStr for EntryList {
    type Err = SrtfixError;

    fn from_str(s: &str) -> Result<Self> {
        EntryList::parse(s)
    }
}

impl fmt::Display for EntryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(LineEnding::Crlf))
    }
}

impl<'a> IntoIterator for &'a EntryList {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
