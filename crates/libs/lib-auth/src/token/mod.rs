//! # Session Token Management
//!
//! Signed session tokens (HS256 JWT) carrying the user id and, once the user has
//! connected a wallet, the wallet address.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Session claims stored in the token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Connected wallet address, absent until a wallet is linked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Encode a session token for a user.
pub fn encode_session_token(
    user_id: &str,
    address: Option<String>,
    secret: &str,
    expiration_hours: i64,
) -> Result<String, String> {
    let now = Utc::now();
    let exp = now + Duration::hours(expiration_hours);

    let claims = SessionClaims {
        sub: user_id.to_string(),
        address,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("Failed to encode session token: {}", e))
}

/// Decode and validate a session token.
pub fn decode_session_token(token: &str, secret: &str) -> Result<SessionClaims, String> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| format!("Failed to decode session token: {}", e))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-must-be-at-least-32-chars-long!";

    #[test]
    fn test_token_keeps_wallet_address() {
        let address = "0x52908400098527886E0F7030069857D2E4169EE7".to_string();

        let token = encode_session_token("42", Some(address.clone()), SECRET, 24)
            .expect("token encoding should succeed");
        let claims = decode_session_token(&token, SECRET).expect("token decoding should succeed");

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.address, Some(address));
    }

    #[test]
    fn test_token_without_address() {
        let token = encode_session_token("7", None, SECRET, 1).unwrap();
        let claims = decode_session_token(&token, SECRET).unwrap();
        assert_eq!(claims.address, None);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = encode_session_token("7", None, SECRET, 1).unwrap();
        let result = decode_session_token(&token, "another-secret-that-is-also-32-chars-long");
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = encode_session_token("7", None, SECRET, -2).unwrap();
        assert!(decode_session_token(&token, SECRET).is_err());
    }
}
