//! Per-entity validation configuration

use crate::core::error::FieldValidationError;
use serde_json::Value;
use std::sync::Arc;

type ValidatorFn = Arc<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;
type FilterFn = Arc<dyn Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync>;

/// Filters and validators for the fields of one entity type
///
/// Filters run first and rewrite the payload in place; validators then see
/// the filtered values. A field absent from the payload is seen as `Null`
/// by validators and left absent by filters.
///
/// # Example
///
/// ```rust,ignore
/// EntityValidationConfig::new()
///     .filter("title", filters::trim())
///     .filter("price", filters::numeric())
///     .validate("title", validators::required())
///     .validate("price", validators::non_negative())
/// ```
#[derive(Clone, Default)]
pub struct EntityValidationConfig {
    filters: Vec<(String, FilterFn)>,
    validators: Vec<(String, ValidatorFn)>,
}

impl EntityValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter for a field
    pub fn filter<F>(mut self, field: &str, filter: F) -> Self
    where
        F: Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.filters.push((field.to_string(), Arc::new(filter)));
        self
    }

    /// Add a validator for a field
    pub fn validate<V>(mut self, field: &str, validator: V) -> Self
    where
        V: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validators.push((field.to_string(), Arc::new(validator)));
        self
    }

    /// Apply every filter then every validator
    ///
    /// Returns the filtered payload, or every field error found.
    pub fn validate_and_filter(
        &self,
        mut payload: Value,
    ) -> Result<Value, Vec<FieldValidationError>> {
        let mut errors = Vec::new();

        if let Some(obj) = payload.as_object_mut() {
            for (field, filter) in &self.filters {
                let Some(current) = obj.remove(field) else {
                    continue;
                };
                match filter(field, current) {
                    Ok(filtered) => {
                        obj.insert(field.clone(), filtered);
                    }
                    Err(e) => errors.push(FieldValidationError {
                        field: field.clone(),
                        message: e.to_string(),
                    }),
                }
            }
        } else {
            errors.push(FieldValidationError {
                field: "body".to_string(),
                message: "expected a JSON object".to_string(),
            });
            return Err(errors);
        }

        for (field, validator) in &self.validators {
            let value = payload.get(field).unwrap_or(&Value::Null);
            if let Err(message) = validator(field, value) {
                errors.push(FieldValidationError {
                    field: field.clone(),
                    message,
                });
            }
        }

        if errors.is_empty() {
            Ok(payload)
        } else {
            Err(errors)
        }
    }
}

impl std::fmt::Debug for EntityValidationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityValidationConfig")
            .field(
                "filters",
                &self.filters.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            )
            .field(
                "validators",
                &self.validators.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{filters, validators};
    use serde_json::json;

    fn config() -> EntityValidationConfig {
        EntityValidationConfig::new()
            .filter("title", filters::trim())
            .filter("price", filters::numeric())
            .validate("title", validators::required())
            .validate("price", validators::non_negative())
    }

    #[test]
    fn test_filters_run_before_validators() {
        let out = config()
            .validate_and_filter(json!({"title": "  Kailash Kora ", "price": "2500"}))
            .expect("valid payload");
        assert_eq!(out["title"], "Kailash Kora");
        assert_eq!(out["price"], 2500);
    }

    #[test]
    fn test_missing_required_field_is_reported() {
        let errors = config()
            .validate_and_filter(json!({"price": 10}))
            .expect_err("title is missing");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn test_all_errors_are_collected() {
        let errors = config()
            .validate_and_filter(json!({"title": " ", "price": -5}))
            .expect_err("two errors");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_filter_failure_is_a_field_error() {
        let errors = config()
            .validate_and_filter(json!({"title": "x", "price": "free"}))
            .expect_err("price is not numeric");
        assert_eq!(errors[0].field, "price");
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        assert!(config().validate_and_filter(json!([1, 2])).is_err());
    }
}
