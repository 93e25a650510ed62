use std::sync::Arc;

use crate::{
    error::AuthError,
    token::{SignedToken, TokenCodec},
};

/// The single email/password pair accepted by the login endpoint.
#[derive(Debug, Clone)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

/// Checks login attempts against the configured [`Credential`] and issues
/// tokens for the ones that match. Holds no session state.
pub struct CredentialVerifier {
    credential: Credential,
    codec: Arc<TokenCodec>,
}

impl CredentialVerifier {
    pub fn new(credential: Credential, codec: Arc<TokenCodec>) -> Self {
        Self { credential, codec }
    }

    /// Absent fields are treated as non-matching.
    pub fn login(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<SignedToken, AuthError> {
        match (email, password) {
            (Some(email), Some(password)) if self.credential.matches(email, password) => {
                self.codec.issue(email)
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn verifier() -> (CredentialVerifier, Arc<TokenCodec>) {
        let codec = Arc::new(TokenCodec::new(b"secret", Duration::from_secs(3600)));
        let verifier = CredentialVerifier::new(
            Credential::new("rv@tai.com", "learnwithrv"),
            codec.clone(),
        );
        (verifier, codec)
    }

    #[test]
    fn matching_credential_yields_verifiable_token() {
        let (verifier, codec) = verifier();
        let signed = verifier
            .login(Some("rv@tai.com"), Some("learnwithrv"))
            .unwrap();

        let claims = codec.verify(&signed.token).unwrap();
        assert_eq!(claims.email, "rv@tai.com");
    }

    #[test]
    fn wrong_password_is_rejected() {
        let (verifier, _) = verifier();
        assert!(matches!(
            verifier.login(Some("rv@tai.com"), Some("guess")),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn missing_fields_are_rejected() {
        let (verifier, _) = verifier();
        assert!(matches!(
            verifier.login(None, Some("learnwithrv")),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            verifier.login(Some("rv@tai.com"), None),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn email_match_is_exact() {
        let (verifier, _) = verifier();
        assert!(verifier
            .login(Some("RV@tai.com"), Some("learnwithrv"))
            .is_err());
        assert!(verifier
            .login(Some(" rv@tai.com"), Some("learnwithrv"))
            .is_err());
    }
}
