//! Tests for the typed error handling system
//!
//! These tests verify that errors map to the right HTTP status codes and
//! render the `{ "error", "code" }` body the admin client reads.

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::Value;
use wayfarer::core::error::{
    ConfigError, EntityError, FieldValidationError, RequestError, StorageError, ValidationError,
};
use wayfarer::prelude::*;

async fn body_of(err: WayfarerError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_entity_not_found_returns_404() {
        let err = WayfarerError::Entity(EntityError::NotFound {
            entity_type: "tour".to_string(),
            key: "everest".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
    }

    #[test]
    fn test_validation_error_returns_400() {
        let err = WayfarerError::Validation(ValidationError::FieldError {
            field: "email".to_string(),
            message: "must be a valid email address".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_missing_token_returns_401() {
        let err: WayfarerError = RequestError::MissingToken.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_wrong_token_returns_403() {
        let err: WayfarerError = RequestError::InvalidToken.into();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_bad_id_and_upload_return_400() {
        let err: WayfarerError = RequestError::InvalidId {
            id: "abc".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: WayfarerError = RequestError::InvalidUpload {
            message: "no file part in request".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_UPLOAD");
    }

    #[test]
    fn test_storage_and_config_errors_return_500() {
        let err: WayfarerError = StorageError::Corrupt {
            path: "data/tours.json".to_string(),
            message: "expected value at line 1".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: WayfarerError = ConfigError::InvalidValue {
            key: "server.bind".to_string(),
            message: "invalid socket address syntax".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Response Body Tests
// =============================================================================

mod response_tests {
    use super::*;

    #[tokio::test]
    async fn test_not_found_body_has_details() {
        let (status, body) = body_of(
            EntityError::NotFound {
                entity_type: "destination".to_string(),
                key: "lhasa".to_string(),
            }
            .into(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "ENTITY_NOT_FOUND");
        assert_eq!(body["error"], "destination with key 'lhasa' not found");
        assert_eq!(body["details"]["key"], "lhasa");
    }

    #[tokio::test]
    async fn test_field_errors_are_listed() {
        let (status, body) = body_of(
            ValidationError::FieldErrors(vec![
                FieldValidationError {
                    field: "name".to_string(),
                    message: "is required".to_string(),
                },
                FieldValidationError {
                    field: "rating".to_string(),
                    message: "must be between 1 and 5".to_string(),
                },
            ])
            .into(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let fields = body["details"]["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1]["field"], "rating");
    }

    #[tokio::test]
    async fn test_token_message_is_shown_verbatim() {
        let (status, body) = body_of(RequestError::MissingToken.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Access token required");
        assert!(body.get("details").is_none());
    }
}

// =============================================================================
// Conversion Tests
// =============================================================================

mod conversion_tests {
    use super::*;

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<Value>("{bad").unwrap_err();
        let err: WayfarerError = json_err.into();
        assert!(matches!(
            err,
            WayfarerError::Validation(ValidationError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_from_anyhow_error() {
        let err: WayfarerError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "Internal error: boom");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let err: WayfarerError = StorageError::LockPoisoned {
            resource: "tours".to_string(),
        }
        .into();
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Collection 'tours' is unavailable");
    }

    #[test]
    fn test_matching_specific_cases() {
        let result: WayfarerResult<()> = Err(EntityError::NotFound {
            entity_type: "tour".to_string(),
            key: "7".to_string(),
        }
        .into());

        match result {
            Err(WayfarerError::Entity(EntityError::NotFound { key, .. })) => {
                assert_eq!(key, "7")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
