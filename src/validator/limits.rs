//! Length limits and how text length is measured

use serde::{Deserialize, Serialize};

use crate::record::{MAX_CONTENT_CHARS, MAX_TOPIC_CHARS};

/// Unit in which topic and content lengths are counted.
///
/// `Chars` counts Unicode scalar values, so "☕" is one unit. `Bytes` counts
/// encoded UTF-8 bytes, so "☕" is three. Both fit the slot capacity, which
/// reserves four bytes per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Chars,
    Bytes,
}

impl LengthUnit {
    /// Measures `text` in this unit
    pub fn measure(&self, text: &str) -> usize {
        match self {
            LengthUnit::Chars => text.chars().count(),
            LengthUnit::Bytes => text.len(),
        }
    }
}

/// Topic and content limits for the fixed tweet schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TweetLimits {
    pub unit: LengthUnit,
}

impl TweetLimits {
    /// Limits measured in the given unit
    pub fn new(unit: LengthUnit) -> Self {
        Self { unit }
    }

    /// Maximum topic length
    pub fn max_topic(&self) -> usize {
        MAX_TOPIC_CHARS
    }

    /// Maximum content length
    pub fn max_content(&self) -> usize {
        MAX_CONTENT_CHARS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_measure_differently_for_multibyte() {
        assert_eq!(LengthUnit::Chars.measure("☕☕"), 2);
        assert_eq!(LengthUnit::Bytes.measure("☕☕"), 6);
        assert_eq!(LengthUnit::Chars.measure(""), 0);
    }

    #[test]
    fn test_unit_serde_names() {
        assert_eq!(serde_json::to_string(&LengthUnit::Chars).unwrap(), "\"chars\"");
        let unit: LengthUnit = serde_json::from_str("\"bytes\"").unwrap();
        assert_eq!(unit, LengthUnit::Bytes);
    }
}
