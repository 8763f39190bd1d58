use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use tracing::debug;

use crate::config::SecurityConfig;
use crate::error::ApiError;

use super::{generate_jwt, validate_jwt, AuthError, Claims};

/// Resolves the current user from an incoming request
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Current user id, or `None` for anonymous requests
    async fn get_user_id(&self, headers: &HeaderMap) -> Option<String>;

    /// Current user id, failing with 401 for anonymous requests
    async fn require_user_id(&self, headers: &HeaderMap) -> Result<String, ApiError> {
        self.get_user_id(headers)
            .await
            .ok_or_else(|| ApiError::unauthorized("authentication required"))
    }
}

/// Session carried as a signed JWT, either in the session cookie or in an
/// `Authorization: Bearer` header. The cookie wins when both are present.
#[derive(Debug, Clone)]
pub struct JwtSessionService {
    secret: String,
    cookie_name: String,
    expiry_hours: u64,
}

impl JwtSessionService {
    pub fn new(secret: impl Into<String>, cookie_name: impl Into<String>, expiry_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            cookie_name: cookie_name.into(),
            expiry_hours,
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(
            security.jwt_secret.clone(),
            security.session_cookie_name.clone(),
            security.jwt_expiry_hours,
        )
    }

    /// Mint a session token for `user_id`
    pub fn issue_token(&self, user_id: &str) -> Result<String, AuthError> {
        generate_jwt(&Claims::new(user_id, self.expiry_hours), &self.secret)
    }

    fn extract_token(&self, headers: &HeaderMap) -> Option<String> {
        self.token_from_cookie(headers)
            .or_else(|| token_from_bearer(headers))
    }

    fn token_from_cookie(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, token)| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }
}

fn token_from_bearer(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[async_trait]
impl SessionService for JwtSessionService {
    async fn get_user_id(&self, headers: &HeaderMap) -> Option<String> {
        let token = self.extract_token(headers)?;
        match validate_jwt(&token, &self.secret) {
            Ok(claims) => Some(claims.sub),
            Err(e) => {
                // A bad or stale token is treated like no session at all
                debug!("Ignoring session token: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn service() -> JwtSessionService {
        JwtSessionService::new("test-secret", "RJ_session", 1)
    }

    #[tokio::test]
    async fn anonymous_without_token() {
        let sessions = service();
        assert_eq!(sessions.get_user_id(&HeaderMap::new()).await, None);
        assert_eq!(
            sessions.require_user_id(&HeaderMap::new()).await,
            Err(ApiError::unauthorized("authentication required"))
        );
    }

    #[tokio::test]
    async fn reads_session_cookie() {
        let sessions = service();
        let token = sessions.issue_token("u1").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; RJ_session={}", token)).unwrap(),
        );

        assert_eq!(sessions.get_user_id(&headers).await, Some("u1".to_string()));
    }

    #[tokio::test]
    async fn falls_back_to_bearer_header() {
        let sessions = service();
        let token = sessions.issue_token("u2").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );

        assert_eq!(sessions.require_user_id(&headers).await, Ok("u2".to_string()));
    }

    #[tokio::test]
    async fn forged_token_is_anonymous() {
        let forged = JwtSessionService::new("other-secret", "RJ_session", 1)
            .issue_token("u1")
            .unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("RJ_session={}", forged)).unwrap(),
        );

        assert_eq!(service().get_user_id(&headers).await, None);
    }
}
