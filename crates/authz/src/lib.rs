//! Authentication for Folio: the fixed-credential login, HS256 bearer tokens,
//! and the guard that admits requests to protected routes.

pub mod credentials;
pub mod error;
pub mod guard;
pub mod token;

pub use credentials::{Credential, CredentialVerifier};
pub use error::AuthError;
pub use guard::{AccessGuard, Identity};
pub use token::{Claims, SignedToken, TokenCodec};
