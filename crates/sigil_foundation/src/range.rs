//! Byte ranges into command input.
//!
//! `StringRange` tracks which part of the input a node, argument or
//! suggestion covers.

/// A half-open byte range `[start, end)` of the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StringRange {
    /// Byte offset where this range starts.
    pub start: usize,
    /// Byte offset where this range ends (exclusive).
    pub end: usize,
}

impl StringRange {
    /// Creates a range.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates an empty range at `pos`.
    #[must_use]
    pub const fn at(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Creates a range covering both arguments.
    #[must_use]
    pub fn encompassing(a: Self, b: Self) -> Self {
        Self {
            start: a.start.min(b.start),
            end: a.end.max(b.end),
        }
    }

    /// Returns the text this range covers, or `""` if it is out of bounds.
    #[must_use]
    pub fn get<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.start..self.end).unwrap_or("")
    }

    /// Returns true if the range is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the length of the range in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if `pos` lies within the range, ends included.
    #[must_use]
    pub const fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos <= self.end
    }
}
