#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parsed value of a numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumericValue {
    /// Whole number, wide enough for any 64-bit counter
    Int(i128),

    /// Number with a decimal point
    Float(f64),
}

impl NumericValue {
    /// The value as a float, for mixed int/float arithmetic
    pub fn as_f64(self) -> f64 {
        match self {
            NumericValue::Int(v) => v as f64,
            NumericValue::Float(v) => v,
        }
    }
}

/// A numeric field together with the formatting metadata of its source text
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumericToken {
    /// The exact source span, kept for lossless reconstruction
    raw: String,

    /// The parsed value
    value: NumericValue,

    /// Whether the field starts right after non-whitespace text
    glued: bool,
}

impl NumericToken {
    /// Parse a span matching the numeric grammar: optional sign, digits,
    /// optional `.` and more digits. Infallible for such spans; integers too
    /// wide for i128 degrade to floats rather than failing.
    pub(crate) fn parse(raw: &str, glued: bool) -> Self {
        let value = if raw.contains('.') {
            NumericValue::Float(raw.parse().unwrap_or(0.0))
        } else {
            match raw.parse::<i128>() {
                Ok(v) => NumericValue::Int(v),
                Err(_) => NumericValue::Float(raw.parse().unwrap_or(0.0)),
            }
        };

        Self {
            raw: raw.to_string(),
            value,
            glued,
        }
    }

    /// The original text of the field
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed value
    pub fn value(&self) -> NumericValue {
        self.value
    }

    /// Character width of the original field
    pub fn width(&self) -> usize {
        self.raw.len()
    }

    /// Number of fractional digits, if the field had a decimal point
    pub fn precision(&self) -> Option<usize> {
        self.raw.split_once('.').map(|(_, frac)| frac.len())
    }

    /// Whether the whole part carries redundant leading zeros (e.g. `007`)
    pub fn zero_padded(&self) -> bool {
        let whole = self
            .raw
            .split('.')
            .next()
            .unwrap_or(&self.raw)
            .trim_start_matches(['+', '-']);
        whole.len() > 1 && whole.starts_with('0')
    }

    /// Whether the field starts right after non-whitespace text
    pub fn is_glued(&self) -> bool {
        self.glued
    }
}

/// Signed difference between two numeric fields at the same position
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Delta {
    /// Exact integer difference
    Int(i128),

    /// Float difference (either side had a decimal point)
    Float(f64),
}

impl Delta {
    /// Compute `cur - prev`. Integer pairs use exact arithmetic; anything
    /// else falls back to float subtraction.
    pub fn between(prev: NumericValue, cur: NumericValue) -> Self {
        match (prev, cur) {
            (NumericValue::Int(p), NumericValue::Int(c)) => match c.checked_sub(p) {
                Some(d) => Delta::Int(d),
                None => Delta::Float(c as f64 - p as f64),
            },
            (p, c) => Delta::Float(c.as_f64() - p.as_f64()),
        }
    }

    /// Whether the delta is exactly zero
    pub fn is_zero(&self) -> bool {
        match self {
            Delta::Int(v) => *v == 0,
            Delta::Float(v) => *v == 0.0,
        }
    }

    /// Whether the delta is strictly positive
    pub fn is_positive(&self) -> bool {
        match self {
            Delta::Int(v) => *v > 0,
            Delta::Float(v) => *v > 0.0,
        }
    }

    /// Whether the delta is strictly negative
    pub fn is_negative(&self) -> bool {
        match self {
            Delta::Int(v) => *v < 0,
            Delta::Float(v) => *v < 0.0,
        }
    }
}
