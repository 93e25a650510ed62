//! Signed, time-limited bearer tokens.

use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::AuthError;

/// Claims carried by every token issued by [`TokenCodec`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub email: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// An encoded token together with the claims it was built from.
#[derive(Debug, Clone)]
pub struct SignedToken {
    pub token: String,
    pub claims: Claims,
}

/// Signs and verifies HS256 tokens with a single server-held secret.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens are rejected the second `exp` passes.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    /// Issue a token for `email` valid from now until now + ttl.
    pub fn issue(&self, email: &str) -> Result<SignedToken, AuthError> {
        self.issue_at(email, OffsetDateTime::now_utc().unix_timestamp())
    }

    /// Issue a token as if the clock read `issued_at`.
    pub fn issue_at(&self, email: &str, issued_at: i64) -> Result<SignedToken, AuthError> {
        let claims = Claims {
            email: email.to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.ttl_secs),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(AuthError::Signing)?;

        Ok(SignedToken { token, claims })
    }

    /// Check the signature and expiry of `token` and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    const HOUR: Duration = Duration::from_secs(3600);

    fn now() -> i64 {
        OffsetDateTime::now_utc().unix_timestamp()
    }

    #[test]
    fn issued_token_carries_email_and_one_hour_expiry() {
        let codec = TokenCodec::new(b"secret", HOUR);
        let signed = codec.issue("rv@tai.com").unwrap();

        assert_eq!(signed.claims.email, "rv@tai.com");
        assert_eq!(signed.claims.exp - signed.claims.iat, 3600);

        let claims = codec.verify(&signed.token).unwrap();
        assert_eq!(claims, signed.claims);
    }

    #[test]
    fn token_near_end_of_lifetime_is_still_valid() {
        let codec = TokenCodec::new(b"secret", HOUR);
        let signed = codec.issue_at("rv@tai.com", now() - 3590).unwrap();
        assert!(codec.verify(&signed.token).is_ok());
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = TokenCodec::new(b"secret", HOUR);
        let signed = codec.issue_at("rv@tai.com", now() - 3601).unwrap();

        match codec.verify(&signed.token) {
            Err(AuthError::InvalidToken(err)) => {
                assert!(matches!(err.kind(), ErrorKind::ExpiredSignature))
            }
            other => panic!("expected expired token, got {other:?}"),
        }
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let ours = TokenCodec::new(b"secret", HOUR);
        let theirs = TokenCodec::new(b"other-secret", HOUR);
        let signed = theirs.issue("rv@tai.com").unwrap();

        assert!(matches!(
            ours.verify(&signed.token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn altered_payload_is_rejected() {
        let codec = TokenCodec::new(b"secret", HOUR);
        let genuine = codec.issue("rv@tai.com").unwrap().token;
        let other = codec.issue("mallory@example.com").unwrap().token;

        let genuine_parts: Vec<&str> = genuine.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!(
            "{}.{}.{}",
            genuine_parts[0], other_parts[1], genuine_parts[2]
        );

        assert!(matches!(
            codec.verify(&forged),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        let codec = TokenCodec::new(b"secret", HOUR);
        for token in ["", "not-a-token", "a.b.c"] {
            assert!(matches!(
                codec.verify(token),
                Err(AuthError::InvalidToken(_))
            ));
        }
    }
}
