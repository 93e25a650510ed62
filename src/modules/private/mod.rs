use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::State, middleware, routing::get, Extension, Json, Router};
use folio_authz::{AccessGuard, Identity};
use folio_http::{auth::require_bearer, error::ErrorBody};
use folio_kernel::{InitCtx, Module};
use utoipa::OpenApi;

use crate::modules::books::{models::Book, store::BookStore};

/// Get all books (private, requires Bearer token)
#[utoipa::path(
    get,
    path = "/books",
    tag = "Books",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "List of books", body = [Book]),
        (status = 401, description = "Token required", body = ErrorBody),
        (status = 403, description = "Invalid token", body = ErrorBody)
    )
)]
pub async fn list_private_books(
    State(store): State<Arc<BookStore>>,
    Extension(identity): Extension<Identity>,
) -> Json<Vec<Book>> {
    tracing::debug!(email = %identity.email, "private book listing");
    Json(store.list())
}

#[derive(OpenApi)]
#[openapi(paths(list_private_books))]
struct PrivateApi;

/// Bearer-guarded routes, mounted at `/private`
pub struct PrivateModule {
    store: Arc<BookStore>,
    guard: Arc<AccessGuard>,
}

impl PrivateModule {
    pub fn new(store: Arc<BookStore>, guard: Arc<AccessGuard>) -> Self {
        Self { store, guard }
    }
}

#[async_trait]
impl Module for PrivateModule {
    fn name(&self) -> &'static str {
        "private"
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "private module initialized");
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/books", get(list_private_books))
            .route_layer(middleware::from_fn_with_state(
                self.guard.clone(),
                require_bearer,
            ))
            .with_state(self.store.clone())
    }

    fn openapi(&self) -> Option<utoipa::openapi::OpenApi> {
        Some(PrivateApi::openapi())
    }
}

/// Create a new instance of the private module
pub fn create_module(store: Arc<BookStore>, guard: Arc<AccessGuard>) -> Arc<dyn Module> {
    Arc::new(PrivateModule::new(store, guard))
}
