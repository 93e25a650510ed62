use thiserror::Error;

/// Failures raised while logging in or admitting a request.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No `Authorization` header, or one that is not `Bearer <token>`.
    #[error("bearer token required")]
    MissingToken,

    /// Bad signature, malformed token, or expired claims.
    #[error("invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}
