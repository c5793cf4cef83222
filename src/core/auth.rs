//! Bearer token check for admin routes
//!
//! Admin endpoints require an `Authorization: Bearer <token>` header. When
//! admin tokens are configured the token must equal one of them; with no
//! tokens configured any non-empty token is accepted (development mode).

use crate::core::error::{RequestError, WayfarerError};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

/// Authorization context attached to admin requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Request carried an accepted admin token
    Admin,

    /// No authentication (public access)
    Anonymous,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        matches!(self, AuthContext::Admin)
    }
}

/// Token policy for admin routes
#[derive(Debug, Clone, Default)]
pub struct TokenPolicy {
    tokens: Arc<Vec<String>>,
}

impl TokenPolicy {
    /// Accept any non-empty bearer token
    pub fn presence_only() -> Self {
        Self::default()
    }

    /// Accept only the given tokens (empty entries are ignored)
    pub fn with_tokens(tokens: impl IntoIterator<Item = String>) -> Self {
        let tokens: Vec<String> = tokens.into_iter().filter(|t| !t.is_empty()).collect();
        Self {
            tokens: Arc::new(tokens),
        }
    }

    /// Whether only specific tokens are accepted
    pub fn is_restricted(&self) -> bool {
        !self.tokens.is_empty()
    }

    /// Resolve the auth context of a request
    pub fn check(&self, headers: &HeaderMap) -> Result<AuthContext, RequestError> {
        let token = bearer_token(headers).ok_or(RequestError::MissingToken)?;

        if self.is_restricted() && !self.tokens.iter().any(|t| t == token) {
            return Err(RequestError::InvalidToken);
        }

        Ok(AuthContext::Admin)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware guarding the admin router
pub async fn require_admin(
    State(policy): State<TokenPolicy>,
    mut req: Request,
    next: Next,
) -> Result<Response, WayfarerError> {
    let context = policy.check(req.headers()).inspect_err(|e| {
        tracing::warn!(path = %req.uri().path(), "admin request rejected: {}", e);
    })?;
    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer abc123")), Some("abc123"));
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Basic abc123")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_presence_only_accepts_any_token() {
        let policy = TokenPolicy::presence_only();
        assert!(!policy.is_restricted());
        assert_eq!(
            policy.check(&headers("Bearer whatever")).unwrap(),
            AuthContext::Admin
        );
    }

    #[test]
    fn test_missing_token_is_unauthorized() {
        let policy = TokenPolicy::presence_only();
        let err = policy.check(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, RequestError::MissingToken));
    }

    #[test]
    fn test_restricted_policy_rejects_unknown_token() {
        let policy = TokenPolicy::with_tokens(vec!["s3cret".to_string(), String::new()]);
        assert!(policy.is_restricted());
        assert!(policy.check(&headers("Bearer s3cret")).unwrap().is_admin());
        assert!(matches!(
            policy.check(&headers("Bearer guess")).unwrap_err(),
            RequestError::InvalidToken
        ));
    }
}
