//! Field value types used as comparison keys and format checks

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::OnceLock;

/// A comparison key derived from one field of an entity
///
/// Text keys are stored lowercased so that ordering is case-insensitive.
/// Durations are reduced to their leading integer and stored as numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
    Null,
}

impl FieldValue {
    /// Build a case-insensitive text key
    pub fn text(value: &str) -> Self {
        FieldValue::Text(value.to_lowercase())
    }

    /// Build a numeric key from a human duration such as "12 days"
    pub fn duration(value: &str) -> Self {
        FieldValue::Number(leading_number(value) as f64)
    }

    /// Build a numeric key
    pub fn number(value: impl Into<f64>) -> Self {
        FieldValue::Number(value.into())
    }

    /// Build a flag key (false sorts before true)
    pub fn flag(value: bool) -> Self {
        FieldValue::Flag(value)
    }

    /// Get the value as a string if possible
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a number if possible (flags map to 0/1)
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Flag(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Total order used by the sort stage
    ///
    /// Null sorts first. Values of different kinds compare by kind so that
    /// a mis-typed record never panics the sort.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Null, _) => Ordering::Less,
            (_, FieldValue::Null) => Ordering::Greater,
            (FieldValue::Text(_), _) => Ordering::Greater,
            (_, FieldValue::Text(_)) => Ordering::Less,
            (a, b) => {
                let a = a.as_number().unwrap_or(0.0);
                let b = b.as_number().unwrap_or(0.0);
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }
        }
    }
}

/// Extract the first run of digits from a string, 0 when there is none
///
/// `"12 days"` → 12, `"3-4 days"` → 3, `"Full day"` → 0. Runs too long
/// for an `i64` saturate to `i64::MAX`.
pub fn leading_number(value: &str) -> i64 {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let regex = DIGITS.get_or_init(|| Regex::new(r"\d+").unwrap());
    regex
        .find(value)
        .map(|m| m.as_str().parse().unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Field format validators
#[derive(Debug, Clone)]
pub enum FieldFormat {
    Email,
    Url,
}

impl FieldFormat {
    /// Validate a string against this format
    pub fn validate(&self, value: &str) -> bool {
        match self {
            FieldFormat::Email => Self::is_valid_email(value),
            FieldFormat::Url => Self::is_valid_url(value),
        }
    }

    fn is_valid_email(email: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
        });
        regex.is_match(email)
    }

    fn is_valid_url(url: &str) -> bool {
        static URL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = URL_REGEX.get_or_init(|| Regex::new(r"^(https?://|/)[^\s]*$").unwrap());
        regex.is_match(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_key_is_lowercased() {
        assert_eq!(FieldValue::text("Kailash"), FieldValue::Text("kailash".into()));
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("12 days"), 12);
        assert_eq!(leading_number("3 Days / 2 Nights"), 3);
        assert_eq!(leading_number("Full day"), 0);
        assert_eq!(leading_number(""), 0);
        assert_eq!(leading_number("99999999999999999999 days"), i64::MAX);
    }

    #[test]
    fn test_duration_orders_numerically() {
        let three = FieldValue::duration("3 days");
        let twelve = FieldValue::duration("12 days");
        assert_eq!(three.compare(&twelve), Ordering::Less);
        // Lexicographic comparison would say otherwise
        assert!("12 days" < "3 days");

        let huge = FieldValue::duration("99999999999999999999 days");
        assert_eq!(huge.compare(&twelve), Ordering::Greater);
    }

    #[test]
    fn test_flag_maps_to_zero_one() {
        assert_eq!(FieldValue::flag(true).as_number(), Some(1.0));
        assert_eq!(FieldValue::flag(false).as_number(), Some(0.0));
        assert_eq!(
            FieldValue::flag(false).compare(&FieldValue::flag(true)),
            Ordering::Less
        );
    }

    #[test]
    fn test_null_sorts_first() {
        assert_eq!(
            FieldValue::Null.compare(&FieldValue::number(1)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::text("a").compare(&FieldValue::Null),
            Ordering::Greater
        );
    }

    #[test]
    fn test_email_validation() {
        let format = FieldFormat::Email;
        assert!(format.validate("test@example.com"));
        assert!(format.validate("user.name+tag@example.co.uk"));
        assert!(!format.validate("invalid-email"));
        assert!(!format.validate("@example.com"));
    }

    #[test]
    fn test_url_validation() {
        let format = FieldFormat::Url;
        assert!(format.validate("https://example.com/img.jpg"));
        assert!(format.validate("/uploads/abc.png"));
        assert!(!format.validate("not a url"));
    }
}
