use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use folio_authz::CredentialVerifier;
use folio_http::{
    error::{AppError, ErrorBody},
    extract::JsonOrDefault,
};
use folio_kernel::{InitCtx, Module};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Login request carrying the demo credential.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(value_type = String, required = true, example = "rv@tai.com")]
    pub email: Option<String>,
    #[schema(value_type = String, required = true, example = "learnwithrv")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Bearer token valid for one hour
    pub token: String,
}

/// Login to get JWT token (email rv@tai.com, password learnwithrv)
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token generated", body = TokenResponse),
        (status = 400, description = "Body is not valid JSON", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    )
)]
pub async fn login(
    State(verifier): State<Arc<CredentialVerifier>>,
    payload: Result<JsonOrDefault<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let request = match payload {
        Ok(JsonOrDefault(request)) => request,
        // Well-formed JSON of the wrong shape is just another failed login.
        Err(JsonRejection::JsonDataError(_)) => LoginRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };

    let signed = verifier.login(request.email.as_deref(), request.password.as_deref())?;
    tracing::debug!(email = %signed.claims.email, exp = signed.claims.exp, "token issued");

    Ok(Json(TokenResponse {
        token: signed.token,
    }))
}

#[derive(OpenApi)]
#[openapi(paths(login))]
struct AuthApi;

/// Login endpoint, mounted at `/auth`
pub struct AuthModule {
    verifier: Arc<CredentialVerifier>,
}

impl AuthModule {
    pub fn new(verifier: Arc<CredentialVerifier>) -> Self {
        Self { verifier }
    }
}

#[async_trait]
impl Module for AuthModule {
    fn name(&self) -> &'static str {
        "auth"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            token_ttl_secs = ctx.settings.auth.token_ttl_secs,
            "auth module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/login", post(login))
            .with_state(self.verifier.clone())
    }

    fn openapi(&self) -> Option<utoipa::openapi::OpenApi> {
        Some(AuthApi::openapi())
    }
}

/// Create a new instance of the auth module
pub fn create_module(verifier: Arc<CredentialVerifier>) -> Arc<dyn Module> {
    Arc::new(AuthModule::new(verifier))
}
