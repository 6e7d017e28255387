//! Numeric ranges written as `5`, `1..5`, `..5` or `1..`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use sigil_foundation::builtin::{READER_INVALID_DOUBLE, READER_INVALID_FLOAT, READER_INVALID_INT};
use sigil_foundation::{CommandResult, CommandSyntaxError, SimpleErrorType, StringReader};

use crate::math::wrap_degrees;

/// Neither bound was given.
pub static RANGE_EMPTY: SimpleErrorType =
    SimpleErrorType::new("argument.range.empty", "Expected value or range of values");

/// A decimal was written where only whole numbers are accepted.
pub static RANGE_INTS_ONLY: SimpleErrorType =
    SimpleErrorType::new("argument.range.ints", "Only whole numbers allowed, not decimals");

/// The lower bound is above the upper bound.
pub static RANGE_SWAPPED: SimpleErrorType =
    SimpleErrorType::new("argument.range.swapped", "Min cannot be bigger than max");

/// An inclusive integer range; a missing side is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntBounds {
    /// Lower bound.
    pub min: Option<i32>,
    /// Upper bound.
    pub max: Option<i32>,
}

impl IntBounds {
    /// The unbounded range.
    pub const ANY: Self = Self {
        min: None,
        max: None,
    };

    /// A range matching exactly `value`.
    #[must_use]
    pub const fn exactly(value: i32) -> Self {
        Self {
            min: Some(value),
            max: Some(value),
        }
    }

    /// Returns true if neither side is bounded.
    #[must_use]
    pub const fn is_any(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Returns true if `value` lies within the range.
    #[must_use]
    pub fn matches(&self, value: i32) -> bool {
        self.min.is_none_or(|min| min <= value) && self.max.is_none_or(|max| value <= max)
    }

    /// Reads a range.
    ///
    /// # Errors
    ///
    /// Fails on an empty range, a malformed number or `min > max`; the error
    /// and the reader both point at the start of the range.
    pub fn read(reader: &mut StringReader) -> CommandResult<Self> {
        read_bounds(reader, |text, reader| {
            text.parse::<i32>()
                .map_err(|_| READER_INVALID_INT.create_with_context(reader, text))
        })
        .map(|(min, max)| Self { min, max })
    }
}

/// An inclusive floating-point range; a missing side is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DoubleBounds {
    /// Lower bound.
    pub min: Option<f64>,
    /// Upper bound.
    pub max: Option<f64>,
}

impl DoubleBounds {
    /// The unbounded range.
    pub const ANY: Self = Self {
        min: None,
        max: None,
    };

    /// Returns true if neither side is bounded.
    #[must_use]
    pub const fn is_any(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Returns true if `value` lies within the range.
    #[must_use]
    pub fn matches(&self, value: f64) -> bool {
        self.min.is_none_or(|min| min <= value) && self.max.is_none_or(|max| value <= max)
    }

    /// Returns true if the square root of `value_sqr` lies within the range.
    #[must_use]
    pub fn matches_sqr(&self, value_sqr: f64) -> bool {
        self.min.is_none_or(|min| min * min <= value_sqr)
            && self.max.is_none_or(|max| value_sqr <= max * max)
    }

    /// Reads a range.
    ///
    /// # Errors
    ///
    /// Fails on an empty range, a malformed number or `min > max`; the error
    /// and the reader both point at the start of the range.
    pub fn read(reader: &mut StringReader) -> CommandResult<Self> {
        read_bounds(reader, |text, reader| {
            text.parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| READER_INVALID_DOUBLE.create_with_context(reader, text))
        })
        .map(|(min, max)| Self { min, max })
    }
}

/// A range of angles in degrees. Both bounds are wrapped into
/// `[-180, 180)`, and a range whose minimum exceeds its maximum wraps
/// around: `170..-170` matches 175 and -175.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WrappedBounds {
    /// Lower bound.
    pub min: Option<f32>,
    /// Upper bound.
    pub max: Option<f32>,
}

impl WrappedBounds {
    /// The unbounded range.
    pub const ANY: Self = Self {
        min: None,
        max: None,
    };

    /// Returns true if neither side is bounded.
    #[must_use]
    pub const fn is_any(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Returns true if the angle, once wrapped, lies within the range.
    #[must_use]
    pub fn matches(&self, degrees: f32) -> bool {
        let min = wrap_degrees(self.min.unwrap_or(0.0));
        let max = wrap_degrees(self.max.unwrap_or(359.0));
        let value = wrap_degrees(degrees);
        if min > max {
            value >= min || value <= max
        } else {
            value >= min && value <= max
        }
    }

    /// Reads a range. Each bound is wrapped as it is read.
    ///
    /// # Errors
    ///
    /// Fails on an empty range, a malformed number, or a decimal when
    /// `allow_floats` is false. No ordering check is done.
    pub fn read(reader: &mut StringReader, allow_floats: bool) -> CommandResult<Self> {
        if !reader.can_read() {
            return Err(RANGE_EMPTY.create_with_context(reader));
        }
        let start = reader.cursor();
        let result = read_wrapped(reader, start, allow_floats);
        if result.is_err() {
            reader.set_cursor(start);
        }
        result
    }
}

#[allow(clippy::cast_precision_loss)]
fn read_wrapped(
    reader: &mut StringReader,
    start: usize,
    allow_floats: bool,
) -> CommandResult<WrappedBounds> {
    let parse = |text: &str, reader: &StringReader| -> CommandResult<f32> {
        if allow_floats {
            text.parse::<f32>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| READER_INVALID_FLOAT.create_with_context(reader, text))
        } else {
            text.parse::<i32>()
                .map(|value| value as f32)
                .map_err(|_| READER_INVALID_INT.create_with_context(reader, text))
        }
    };
    let min = read_number(reader, parse)?.map(wrap_degrees);
    let max = if at_range_separator(reader) {
        reader.skip();
        reader.skip();
        read_number(reader, parse)?.map(wrap_degrees)
    } else {
        if !allow_floats && reader.peek() == Some('.') {
            reader.set_cursor(start);
            return Err(RANGE_INTS_ONLY.create_with_context(reader));
        }
        min
    };
    if min.is_none() && max.is_none() {
        reader.set_cursor(start);
        return Err(RANGE_EMPTY.create_with_context(reader));
    }
    Ok(WrappedBounds { min, max })
}

/// Shared reader for the ordered ranges. On failure the cursor and the
/// error's position are both moved back to the start of the range.
fn read_bounds<T, F>(reader: &mut StringReader, parse: F) -> CommandResult<(Option<T>, Option<T>)>
where
    T: PartialOrd + Copy,
    F: Fn(&str, &StringReader) -> CommandResult<T>,
{
    if !reader.can_read() {
        return Err(RANGE_EMPTY.create_with_context(reader));
    }
    let start = reader.cursor();
    read_ordered(reader, &parse).map_err(|error: CommandSyntaxError| {
        reader.set_cursor(start);
        error.at_cursor(start)
    })
}

fn read_ordered<T, F>(reader: &mut StringReader, parse: &F) -> CommandResult<(Option<T>, Option<T>)>
where
    T: PartialOrd + Copy,
    F: Fn(&str, &StringReader) -> CommandResult<T>,
{
    let min = read_number(reader, parse)?;
    let max = if at_range_separator(reader) {
        reader.skip();
        reader.skip();
        read_number(reader, parse)?
    } else {
        min
    };
    match (min, max) {
        (None, None) => Err(RANGE_EMPTY.create_with_context(reader)),
        (Some(min), Some(max)) if min > max => Err(RANGE_SWAPPED.create_with_context(reader)),
        bounds => Ok(bounds),
    }
}

fn at_range_separator(reader: &StringReader) -> bool {
    reader.peek() == Some('.') && reader.peek_at(1) == Some('.')
}

/// Reads the characters of one bound. `.` only belongs to the number when
/// it does not start a `..` separator.
fn read_number<T, F>(reader: &mut StringReader, parse: F) -> CommandResult<Option<T>>
where
    F: Fn(&str, &StringReader) -> CommandResult<T>,
{
    let start = reader.cursor();
    loop {
        match reader.peek() {
            Some('0'..='9' | '-') => reader.skip(),
            Some('.') if reader.peek_at(1) != Some('.') => reader.skip(),
            _ => break,
        }
    }
    let text = reader.substring(start, reader.cursor()).to_string();
    if text.is_empty() {
        return Ok(None);
    }
    parse(&text, reader).map(Some)
}
