//! Text selection ranges for applying a correction back into the editor text.

use std::fmt;
use std::str::FromStr;

/// A byte range `[start, end)` into the text being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whether the range selects a non-reversed, in-bounds slice of `text`
    /// that starts and ends on character boundaries.
    pub fn is_valid(&self, text: &str) -> bool {
        self.start <= self.end
            && self.end <= text.len()
            && text.is_char_boundary(self.start)
            && text.is_char_boundary(self.end)
    }

    /// The selected slice of `text`, or `None` if the range is invalid.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.is_valid(text).then(|| &text[self.start..self.end])
    }

    /// Replace the selected slice of `text` with `replacement`.
    ///
    /// An invalid range replaces the whole text.
    pub fn replace_in(&self, text: &str, replacement: &str) -> String {
        if !self.is_valid(text) {
            return replacement.to_string();
        }
        let capacity = text.len() - (self.end - self.start) + replacement.len();
        let mut out = String::with_capacity(capacity);
        out.push_str(&text[..self.start]);
        out.push_str(replacement);
        out.push_str(&text[self.end..]);
        out
    }
}

impl fmt::Display for SelectionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl FromStr for SelectionRange {
    type Err = String;

    /// Parse `START:END`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| format!("expected START:END, got '{s}'"))?;
        let start = start
            .trim()
            .parse()
            .map_err(|e| format!("invalid start '{start}': {e}"))?;
        let end = end
            .trim()
            .parse()
            .map_err(|e| format!("invalid end '{end}': {e}"))?;
        Ok(Self { start, end })
    }
}
