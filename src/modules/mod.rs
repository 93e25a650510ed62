pub mod auth;
pub mod books;
pub mod private;

use std::sync::Arc;
use std::time::Duration;

use folio_authz::{AccessGuard, Credential, CredentialVerifier, TokenCodec};
use folio_kernel::{settings::Settings, ModuleRegistry};

use books::store::BookStore;

/// Register all project-specific modules with the registry.
///
/// The signing secret and the book collection are built once here and
/// shared by every module that needs them.
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) {
    let auth = &settings.auth;
    let codec = Arc::new(TokenCodec::new(
        auth.jwt_secret.as_bytes(),
        Duration::from_secs(auth.token_ttl_secs),
    ));
    let verifier = Arc::new(CredentialVerifier::new(
        Credential::new(auth.login_email.clone(), auth.login_password.clone()),
        codec.clone(),
    ));
    let guard = Arc::new(AccessGuard::new(codec));
    let store = Arc::new(BookStore::seeded());

    registry.register(auth::create_module(verifier));
    registry.register(books::create_module(store.clone()));
    registry.register(private::create_module(store, guard));
}
