//! # Token-Backed Session Provider
//!
//! Resolves sessions from a signed token carried either in the
//! [`SESSION_COOKIE`] cookie or in an `Authorization: Bearer <token>` header.
//! The cookie wins when both are present.
//!
//! A token that fails validation (bad signature, expired, malformed) resolves to
//! [`Session::Absent`]: a stale cookie is the same as being signed out.

use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};

use super::{Session, SessionError, SessionProvider, SessionUser};
use crate::token::decode_session_token;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "session-token";

/// Session provider that verifies HS256 session tokens.
#[derive(Clone)]
pub struct JwtSessionProvider {
    secret: String,
}

impl JwtSessionProvider {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    /// Find the raw session token in the request headers.
    fn extract_token(headers: &HeaderMap) -> Result<Option<String>, SessionError> {
        let jar = CookieJar::from_headers(headers);
        if let Some(cookie) = jar.get(SESSION_COOKIE) {
            return Ok(Some(cookie.value().to_string()));
        }

        let Some(auth_header) = headers.get(AUTHORIZATION) else {
            return Ok(None);
        };

        let auth_header = auth_header
            .to_str()
            .map_err(|e| SessionError::MalformedHeader(format!("Authorization: {}", e)))?;

        Ok(auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string))
    }
}

#[async_trait]
impl SessionProvider for JwtSessionProvider {
    async fn get_session(&self, headers: &HeaderMap) -> Result<Session, SessionError> {
        let Some(token) = Self::extract_token(headers)? else {
            debug!("[SESSION] No session token on request");
            return Ok(Session::Absent);
        };

        match decode_session_token(&token, &self.secret) {
            Ok(claims) => {
                debug!(
                    user_id = %claims.sub,
                    has_wallet = claims.address.is_some(),
                    "[SESSION] Session resolved"
                );
                Ok(Session::Present {
                    user: SessionUser {
                        id: claims.sub,
                        address: claims.address,
                    },
                })
            }
            Err(e) => {
                warn!("[SESSION] Ignoring invalid session token: {}", e);
                Ok(Session::Absent)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::encode_session_token;
    use axum::http::{header::COOKIE, HeaderValue};

    const SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";
    const ADDRESS: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

    fn token(address: Option<&str>, hours: i64) -> String {
        encode_session_token("1", address.map(str::to_string), SECRET, hours).unwrap()
    }

    #[tokio::test]
    async fn test_no_token_is_absent() {
        let provider = JwtSessionProvider::new(SECRET);
        let session = provider.get_session(&HeaderMap::new()).await.unwrap();
        assert_eq!(session, Session::Absent);
    }

    #[tokio::test]
    async fn test_cookie_token_resolves_wallet() {
        let provider = JwtSessionProvider::new(SECRET);
        let mut headers = HeaderMap::new();
        let cookie = format!("theme=dark; {}={}", SESSION_COOKIE, token(Some(ADDRESS), 1));
        headers.insert(COOKIE, HeaderValue::from_str(&cookie).unwrap());

        let session = provider.get_session(&headers).await.unwrap();
        assert_eq!(session.wallet_address(), Some(ADDRESS));
    }

    #[tokio::test]
    async fn test_bearer_token_resolves_user_without_wallet() {
        let provider = JwtSessionProvider::new(SECRET);
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", token(None, 1));
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&bearer).unwrap());

        let session = provider.get_session(&headers).await.unwrap();
        assert!(session.is_present());
        assert_eq!(session.wallet_address(), None);
    }

    #[tokio::test]
    async fn test_expired_token_is_absent() {
        let provider = JwtSessionProvider::new(SECRET);
        let mut headers = HeaderMap::new();
        let cookie = format!("{}={}", SESSION_COOKIE, token(Some(ADDRESS), -2));
        headers.insert(COOKIE, HeaderValue::from_str(&cookie).unwrap());

        let session = provider.get_session(&headers).await.unwrap();
        assert_eq!(session, Session::Absent);
    }

    #[tokio::test]
    async fn test_forged_token_is_absent() {
        let forged = encode_session_token(
            "1",
            Some(ADDRESS.to_string()),
            "attacker-secret-that-is-at-least-32-chars",
            1,
        )
        .unwrap();
        let provider = JwtSessionProvider::new(SECRET);
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", forged)).unwrap(),
        );

        let session = provider.get_session(&headers).await.unwrap();
        assert_eq!(session, Session::Absent);
    }

    #[tokio::test]
    async fn test_non_utf8_authorization_is_error() {
        let provider = JwtSessionProvider::new(SECRET);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap());

        let result = provider.get_session(&headers).await;
        assert!(matches!(result, Err(SessionError::MalformedHeader(_))));
    }
}
