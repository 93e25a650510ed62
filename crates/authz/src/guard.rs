use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::{error::AuthError, token::TokenCodec};

/// Identity of an admitted caller, inserted into request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
}

/// Admits requests carrying a valid `Authorization: Bearer <token>` header.
pub struct AccessGuard {
    codec: Arc<TokenCodec>,
}

impl AccessGuard {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    pub fn authorize(&self, headers: &HeaderMap) -> Result<Identity, AuthError> {
        let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;
        let claims = self.codec.verify(token)?;

        tracing::debug!(email = %claims.email, "bearer token accepted");

        Ok(Identity {
            email: claims.email,
        })
    }
}

/// Extract the token from a `Bearer <token>` authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::time::Duration;

    fn guard() -> (AccessGuard, Arc<TokenCodec>) {
        let codec = Arc::new(TokenCodec::new(b"secret", Duration::from_secs(3600)));
        (AccessGuard::new(codec.clone()), codec)
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn valid_bearer_token_yields_identity() {
        let (guard, codec) = guard();
        let token = codec.issue("rv@tai.com").unwrap().token;

        let identity = guard.authorize(&headers(&format!("Bearer {token}"))).unwrap();
        assert_eq!(identity.email, "rv@tai.com");
    }

    #[test]
    fn absent_or_malformed_header_is_missing_token() {
        let (guard, _) = guard();

        assert!(matches!(
            guard.authorize(&HeaderMap::new()),
            Err(AuthError::MissingToken)
        ));

        for value in ["Bearer", "Bearer ", "Basic abc", "Token abc", "abc"] {
            assert!(
                matches!(guard.authorize(&headers(value)), Err(AuthError::MissingToken)),
                "expected missing token for {value:?}"
            );
        }
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("BEARER  abc ")), Some("abc"));
    }

    #[test]
    fn unverifiable_token_is_invalid() {
        let (guard, _) = guard();
        let foreign = TokenCodec::new(b"other", Duration::from_secs(3600))
            .issue("rv@tai.com")
            .unwrap()
            .token;

        for value in ["Bearer not-a-jwt".to_string(), format!("Bearer {foreign}")] {
            assert!(matches!(
                guard.authorize(&headers(&value)),
                Err(AuthError::InvalidToken(_))
            ));
        }
    }
}
