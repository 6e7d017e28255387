//! Completion suggestions.
//!
//! A [`SuggestionsBuilder`] collects candidates for the token starting at a
//! given offset; [`Suggestions`] is the finished, sorted and deduplicated set.
//! Providers hand back a [`SuggestionFuture`] so that expensive lookups can
//! run asynchronously; the dispatcher joins all futures and merges them.

use futures::FutureExt;
use futures::future::{self, BoxFuture};
use sigil_foundation::StringRange;

/// Future resolving to a set of suggestions.
pub type SuggestionFuture = BoxFuture<'static, Suggestions>;

/// A single completion candidate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Suggestion {
    range: StringRange,
    text: String,
    tooltip: Option<String>,
}

impl Suggestion {
    /// Creates a suggestion replacing `range` with `text`.
    #[must_use]
    pub fn new(range: StringRange, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
            tooltip: None,
        }
    }

    /// Creates a suggestion with a tooltip.
    #[must_use]
    pub fn with_tooltip(
        range: StringRange,
        text: impl Into<String>,
        tooltip: impl Into<String>,
    ) -> Self {
        Self {
            range,
            text: text.into(),
            tooltip: Some(tooltip.into()),
        }
    }

    /// Returns the replaced range.
    #[must_use]
    pub fn range(&self) -> StringRange {
        self.range
    }

    /// Returns the replacement text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the tooltip, if any.
    #[must_use]
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Returns `input` with this suggestion applied.
    #[must_use]
    pub fn apply(&self, input: &str) -> String {
        if self.range.start == 0 && self.range.end == input.len() {
            return self.text.clone();
        }
        let mut result = String::with_capacity(input.len() + self.text.len());
        result.push_str(input.get(..self.range.start).unwrap_or(input));
        result.push_str(&self.text);
        if self.range.end < input.len() {
            result.push_str(input.get(self.range.end..).unwrap_or(""));
        }
        result
    }

    /// Widens this suggestion to `range`, copying the uncovered input around it.
    #[must_use]
    pub fn expand(&self, command: &str, range: StringRange) -> Self {
        if range == self.range {
            return self.clone();
        }
        let mut text = String::new();
        if range.start < self.range.start {
            text.push_str(command.get(range.start..self.range.start).unwrap_or(""));
        }
        text.push_str(&self.text);
        if range.end > self.range.end {
            text.push_str(command.get(self.range.end..range.end).unwrap_or(""));
        }
        Self {
            range,
            text,
            tooltip: self.tooltip.clone(),
        }
    }
}

/// A finished set of suggestions sharing one range.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Suggestions {
    range: StringRange,
    list: Vec<Suggestion>,
}

impl Suggestions {
    /// Returns an empty set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a ready future of an empty set.
    #[must_use]
    pub fn empty_future() -> SuggestionFuture {
        future::ready(Self::empty()).boxed()
    }

    /// Returns the range every suggestion replaces.
    #[must_use]
    pub fn range(&self) -> StringRange {
        self.range
    }

    /// Returns the suggestions in display order.
    #[must_use]
    pub fn list(&self) -> &[Suggestion] {
        &self.list
    }

    /// Returns the suggestion texts in display order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.list.iter().map(Suggestion::text).collect()
    }

    /// Returns true if there are no suggestions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Merges several sets computed against the same `command`.
    #[must_use]
    pub fn merge(command: &str, input: Vec<Suggestions>) -> Self {
        match input.len() {
            0 => Self::empty(),
            1 => input.into_iter().next().unwrap_or_default(),
            _ => Self::create(
                command,
                input.into_iter().flat_map(|suggestions| suggestions.list).collect(),
            ),
        }
    }

    /// Builds a set from raw suggestions, expanding them to a common range,
    /// removing duplicates and sorting case-insensitively.
    #[must_use]
    pub fn create(command: &str, suggestions: Vec<Suggestion>) -> Self {
        if suggestions.is_empty() {
            return Self::empty();
        }
        let start = suggestions.iter().map(|s| s.range.start).min().unwrap_or(0);
        let end = suggestions.iter().map(|s| s.range.end).max().unwrap_or(0);
        let range = StringRange::new(start, end);
        let mut list: Vec<Suggestion> = suggestions
            .iter()
            .map(|suggestion| suggestion.expand(command, range))
            .collect();
        list.sort_by(|a, b| {
            a.text
                .to_lowercase()
                .cmp(&b.text.to_lowercase())
                .then_with(|| a.text.cmp(&b.text))
                .then_with(|| a.tooltip.cmp(&b.tooltip))
        });
        list.dedup();
        Self { range, list }
    }
}

/// Collects suggestions for the token starting at `start`.
#[derive(Clone, Debug)]
pub struct SuggestionsBuilder {
    input: String,
    start: usize,
    remaining: String,
    remaining_lowercase: String,
    result: Vec<Suggestion>,
}

impl SuggestionsBuilder {
    /// Creates a builder for `input`, completing from byte offset `start`.
    #[must_use]
    pub fn new(input: &str, start: usize) -> Self {
        let mut start = start.min(input.len());
        while !input.is_char_boundary(start) {
            start -= 1;
        }
        let remaining = input[start..].to_string();
        Self {
            input: input.to_string(),
            start,
            remaining_lowercase: remaining.to_lowercase(),
            remaining,
            result: Vec::new(),
        }
    }

    /// Returns the full input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the offset being completed.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the partial token being completed.
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.remaining
    }

    /// Returns the partial token in lowercase.
    #[must_use]
    pub fn remaining_lowercase(&self) -> &str {
        &self.remaining_lowercase
    }

    /// Finishes the collected suggestions.
    #[must_use]
    pub fn build(&self) -> Suggestions {
        Suggestions::create(&self.input, self.result.clone())
    }

    /// Finishes the collected suggestions as a ready future.
    #[must_use]
    pub fn build_future(&self) -> SuggestionFuture {
        future::ready(self.build()).boxed()
    }

    /// Suggests `text`, unless it is exactly what was already typed.
    pub fn suggest(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        if text != self.remaining {
            self.result.push(Suggestion::new(
                StringRange::new(self.start, self.input.len()),
                text,
            ));
        }
        self
    }

    /// Suggests `text` with a tooltip.
    pub fn suggest_with_tooltip(
        &mut self,
        text: impl Into<String>,
        tooltip: impl Into<String>,
    ) -> &mut Self {
        let text = text.into();
        if text != self.remaining {
            self.result.push(Suggestion::with_tooltip(
                StringRange::new(self.start, self.input.len()),
                text,
                tooltip,
            ));
        }
        self
    }

    /// Suggests an integer.
    pub fn suggest_int(&mut self, value: i32) -> &mut Self {
        self.suggest(value.to_string())
    }

    /// Appends everything collected by another builder.
    pub fn add(&mut self, other: &SuggestionsBuilder) -> &mut Self {
        self.result.extend(other.result.iter().cloned());
        self
    }

    /// Returns an empty builder for the same input completing from `start`.
    #[must_use]
    pub fn create_offset(&self, start: usize) -> Self {
        Self::new(&self.input, start)
    }

    /// Returns an empty builder for the same input and offset.
    #[must_use]
    pub fn restart(&self) -> Self {
        self.create_offset(self.start)
    }
}
