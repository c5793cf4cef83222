//! Typed error handling for the content server
//!
//! Every failure a handler can produce is one of the categories below.
//! Each category knows its HTTP status and a stable error code, and the
//! top-level [`WayfarerError`] renders itself as the JSON body the admin
//! client reads:
//!
//! ```json
//! { "error": "tour with key '42' not found", "code": "ENTITY_NOT_FOUND" }
//! ```
//!
//! # Error Categories
//!
//! - [`EntityError`]: lookups and (de)serialization of records
//! - [`ValidationError`]: payload checks before a record is stored
//! - [`StorageError`]: reading and writing the JSON data files
//! - [`RequestError`]: malformed requests, missing or wrong tokens, uploads
//! - [`ConfigError`]: configuration loading

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for the content server
#[derive(Debug)]
pub enum WayfarerError {
    /// Entity-related errors (CRUD operations)
    Entity(EntityError),

    /// Validation errors
    Validation(ValidationError),

    /// JSON file storage errors
    Storage(StorageError),

    /// HTTP/Request errors
    Request(RequestError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for WayfarerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WayfarerError::Entity(e) => write!(f, "{}", e),
            WayfarerError::Validation(e) => write!(f, "{}", e),
            WayfarerError::Storage(e) => write!(f, "{}", e),
            WayfarerError::Request(e) => write!(f, "{}", e),
            WayfarerError::Config(e) => write!(f, "{}", e),
            WayfarerError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for WayfarerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WayfarerError::Entity(e) => Some(e),
            WayfarerError::Validation(e) => Some(e),
            WayfarerError::Storage(e) => Some(e),
            WayfarerError::Request(e) => Some(e),
            WayfarerError::Config(e) => Some(e),
            WayfarerError::Internal(_) => None,
        }
    }
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message, shown verbatim by the admin UI
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl WayfarerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            WayfarerError::Entity(e) => e.status_code(),
            WayfarerError::Validation(_) => StatusCode::BAD_REQUEST,
            WayfarerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WayfarerError::Request(e) => e.status_code(),
            WayfarerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WayfarerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            WayfarerError::Entity(e) => e.error_code(),
            WayfarerError::Validation(_) => "VALIDATION_ERROR",
            WayfarerError::Storage(_) => "STORAGE_ERROR",
            WayfarerError::Request(e) => e.error_code(),
            WayfarerError::Config(_) => "CONFIG_ERROR",
            WayfarerError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            WayfarerError::Entity(EntityError::NotFound { entity_type, key }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "key": key
                }))
            }
            WayfarerError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for WayfarerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity operations
#[derive(Debug)]
pub enum EntityError {
    /// No record matches the id or slug
    NotFound { entity_type: String, key: String },

    /// Failed to serialize/deserialize a record
    SerializationError {
        entity_type: String,
        message: String,
    },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, key } => {
                write!(f, "{} with key '{}' not found", entity_type, key)
            }
            EntityError::SerializationError {
                entity_type,
                message,
            } => {
                write!(f, "Invalid {} data: {}", entity_type, message)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::SerializationError { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::SerializationError { .. } => "ENTITY_SERIALIZATION_ERROR",
        }
    }
}

impl From<EntityError> for WayfarerError {
    fn from(err: EntityError) -> Self {
        WayfarerError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field validation failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// One field failed validation
    FieldError { field: String, message: String },

    /// Several fields failed validation
    FieldErrors(Vec<FieldValidationError>),

    /// The body is not valid JSON
    InvalidJson { message: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "{}: {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let joined: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation failed: {}", joined.join("; "))
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for WayfarerError {
    fn from(err: ValidationError) -> Self {
        WayfarerError::Validation(err)
    }
}

impl From<Vec<FieldValidationError>> for ValidationError {
    fn from(mut errors: Vec<FieldValidationError>) -> Self {
        if errors.len() == 1 {
            let e = errors.remove(0);
            ValidationError::FieldError {
                field: e.field,
                message: e.message,
            }
        } else {
            ValidationError::FieldErrors(errors)
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by the JSON file store
#[derive(Debug)]
pub enum StorageError {
    /// Reading or writing a data file failed
    Io { path: String, message: String },

    /// A data file exists but does not hold the expected JSON
    Corrupt { path: String, message: String },

    /// An in-memory collection lock was poisoned by a panicking writer
    LockPoisoned { resource: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io { path, message } => {
                write!(f, "Failed to access '{}': {}", path, message)
            }
            StorageError::Corrupt { path, message } => {
                write!(f, "Data file '{}' is not valid: {}", path, message)
            }
            StorageError::LockPoisoned { resource } => {
                write!(f, "Collection '{}' is unavailable", resource)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for WayfarerError {
    fn from(err: StorageError) -> Self {
        WayfarerError::Storage(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// Invalid request body
    InvalidBody { message: String },

    /// Path parameter could not be parsed
    InvalidId { id: String },

    /// No bearer token on an admin route
    MissingToken,

    /// Bearer token does not match a configured admin token
    InvalidToken,

    /// Multipart upload was malformed or empty
    InvalidUpload { message: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidBody { message } => {
                write!(f, "Invalid request body: {}", message)
            }
            RequestError::InvalidId { id } => write!(f, "Invalid id: '{}'", id),
            RequestError::MissingToken => write!(f, "Access token required"),
            RequestError::InvalidToken => write!(f, "Invalid or expired token"),
            RequestError::InvalidUpload { message } => {
                write!(f, "Upload failed: {}", message)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            RequestError::MissingToken => StatusCode::UNAUTHORIZED,
            RequestError::InvalidToken => StatusCode::FORBIDDEN,
            RequestError::InvalidUpload { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::InvalidId { .. } => "INVALID_ID",
            RequestError::MissingToken => "UNAUTHORIZED",
            RequestError::InvalidToken => "FORBIDDEN",
            RequestError::InvalidUpload { .. } => "INVALID_UPLOAD",
        }
    }
}

impl From<RequestError> for WayfarerError {
    fn from(err: RequestError) -> Self {
        WayfarerError::Request(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration loading
#[derive(Debug)]
pub enum ConfigError {
    /// Configuration file not found
    FileNotFound { path: String },

    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// A value (usually from the environment) is not usable
    InvalidValue { key: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::ParseError { file, message } => match file {
                Some(file) => write!(f, "Failed to parse {}: {}", file, message),
                None => write!(f, "Failed to parse configuration: {}", message),
            },
            ConfigError::InvalidValue { key, message } => {
                write!(f, "Invalid value for {}: {}", key, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for WayfarerError {
    fn from(err: ConfigError) -> Self {
        WayfarerError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for WayfarerError {
    fn from(err: serde_json::Error) -> Self {
        WayfarerError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for WayfarerError {
    fn from(err: serde_yaml::Error) -> Self {
        WayfarerError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<anyhow::Error> for WayfarerError {
    fn from(err: anyhow::Error) -> Self {
        WayfarerError::Internal(err.to_string())
    }
}

/// A specialized Result type for server operations
pub type WayfarerResult<T> = Result<T, WayfarerError>;
