//! Reusable field validators
//!
//! Each validator receives the field name and its JSON value (`Null` when
//! the field is absent) and returns a message on failure.

use crate::core::field::FieldFormat;
use serde_json::Value;

/// Validator: field is present, not null and not a blank string
pub fn required() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null => Err(format!("'{}' is required", field)),
        Value::String(s) if s.trim().is_empty() => Err(format!("'{}' is required", field)),
        _ => Ok(()),
    }
}

/// Validator: string must be a well-formed email address (absent is fine)
pub fn email() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_str() {
        Some(s) if !s.is_empty() && !FieldFormat::Email.validate(s) => Err(format!(
            "'{}' must be a valid email address (got: {})",
            field, s
        )),
        _ => Ok(()),
    }
}

/// Validator: string must be an absolute http(s) URL or a site-relative path
pub fn url() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_str() {
        Some(s) if !s.is_empty() && !FieldFormat::Url.validate(s) => {
            Err(format!("'{}' must be a URL or a /path (got: {})", field, s))
        }
        _ => Ok(()),
    }
}

/// Validator: number must lie within `min..=max`
pub fn range(min: f64, max: f64) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(num) = value.as_f64() {
            if num < min || num > max {
                return Err(format!(
                    "'{}' must be between {} and {} (got: {})",
                    field, min, max, num
                ));
            }
        }
        Ok(())
    }
}

/// Validator: number must not be negative
pub fn non_negative() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_f64() {
        Some(num) if num < 0.0 => Err(format!("'{}' must not be negative (got: {})", field, num)),
        _ => Ok(()),
    }
}

/// Validator: string length must be within range
pub fn string_length(
    min: usize,
    max: usize,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            let len = s.chars().count();
            if len < min {
                return Err(format!(
                    "'{}' must be at least {} characters (got: {})",
                    field, min, len
                ));
            }
            if len > max {
                return Err(format!(
                    "'{}' must not exceed {} characters (got: {})",
                    field, max, len
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_null_value_returns_error() {
        let v = required();
        let result = v("name", &json!(null));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("required"));
    }

    #[test]
    fn test_required_blank_string_returns_error() {
        let v = required();
        assert!(v("name", &json!("   ")).is_err());
    }

    #[test]
    fn test_required_values_return_ok() {
        let v = required();
        assert!(v("name", &json!("hello")).is_ok());
        assert!(v("price", &json!(0)).is_ok());
        assert!(v("listed", &json!(false)).is_ok());
    }

    #[test]
    fn test_email() {
        let v = email();
        assert!(v("email", &json!("guest@example.com")).is_ok());
        assert!(v("email", &json!(null)).is_ok());
        assert!(v("email", &json!("guest-at-example")).is_err());
    }

    #[test]
    fn test_url() {
        let v = url();
        assert!(v("image", &json!("/uploads/a.jpg")).is_ok());
        assert!(v("image", &json!("https://cdn.example.com/a.jpg")).is_ok());
        assert!(v("image", &json!("")).is_ok());
        assert!(v("image", &json!("a b")).is_err());
    }

    #[test]
    fn test_range_rating() {
        let v = range(1.0, 5.0);
        assert!(v("rating", &json!(1)).is_ok());
        assert!(v("rating", &json!(5)).is_ok());
        assert!(v("rating", &json!(0)).is_err());
        assert!(v("rating", &json!(6)).is_err());
        assert!(v("rating", &json!(null)).is_ok());
    }

    #[test]
    fn test_non_negative() {
        let v = non_negative();
        assert!(v("price", &json!(0.0)).is_ok());
        assert!(v("price", &json!(-1.5)).is_err());
    }

    #[test]
    fn test_string_length() {
        let v = string_length(2, 5);
        assert!(v("code", &json!("ab")).is_ok());
        assert!(v("code", &json!("a")).is_err());
        assert!(v("code", &json!("abcdef")).is_err());
    }
}
