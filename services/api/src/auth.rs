//! services/api/src/auth.rs
//!
//! Issues and verifies the bearer tokens that protect the API. Tokens are
//! HS256 JWTs whose subject is the user id, valid for a fixed 24 hours.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::error::ApiError;

/// How long an issued token stays valid.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// The claims carried by every issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,
    /// Issued-at, in seconds since the epoch.
    pub iat: i64,
    /// Expiry, in seconds since the epoch.
    pub exp: i64,
}

impl Claims {
    fn new(user_id: Uuid, expires_in: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }
}

/// Signs and verifies bearer tokens with a shared secret.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
        }
    }

    /// Issues a token for the given user, valid for [`TOKEN_TTL_HOURS`].
    pub fn issue(&self, user_id: Uuid) -> Result<String, ApiError> {
        let claims = Claims::new(user_id, Duration::hours(TOKEN_TTL_HOURS));
        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            error!("Failed to sign token: {}", e);
            ApiError::Internal("Failed to issue token".to_string())
        })
    }

    /// Verifies a token and returns the user id it was issued for.
    ///
    /// Every failure collapses into [`ApiError::Auth`]; the caller never
    /// learns whether the signature, the expiry or the subject was at fault.
    pub fn verify(&self, token: &str) -> Result<Uuid, ApiError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| ApiError::Auth)?;
        Uuid::parse_str(&data.claims.sub).map_err(|_| ApiError::Auth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_verify_back_to_the_user() {
        let issuer = TokenIssuer::new(b"test-secret");
        let user_id = Uuid::new_v4();
        let token = issuer.issue(user_id).unwrap();
        assert_eq!(issuer.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let issuer = TokenIssuer::new(b"test-secret");
        let other = TokenIssuer::new(b"another-secret");
        let token = other.issue(Uuid::new_v4()).unwrap();
        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let issuer = TokenIssuer::new(b"test-secret");
        assert!(issuer.verify("not-a-token").is_err());
        assert!(issuer.verify("").is_err());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let now = Utc::now();
        // Two hours past expiry, well beyond the default decode leeway.
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: (now - Duration::hours(3)).timestamp(),
            exp: (now - Duration::hours(2)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(TokenIssuer::new(b"test-secret").verify(&token).is_err());
    }

    #[test]
    fn tokens_with_a_non_uuid_subject_are_rejected() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(TokenIssuer::new(b"test-secret").verify(&token).is_err());
    }

    #[test]
    fn token_ttl_is_twenty_four_hours() {
        let claims = Claims::new(Uuid::new_v4(), Duration::hours(TOKEN_TTL_HOURS));
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }
}
