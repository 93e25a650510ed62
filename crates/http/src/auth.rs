//! Bearer-token gate for protected routers.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use folio_authz::AccessGuard;

use crate::error::AppError;

/// Middleware that admits a request only when [`AccessGuard::authorize`]
/// accepts its headers. The resulting [`folio_authz::Identity`] is inserted
/// into the request extensions for downstream handlers.
///
/// ```ignore
/// router.route_layer(axum::middleware::from_fn_with_state(guard, require_bearer))
/// ```
pub async fn require_bearer(
    State(guard): State<Arc<AccessGuard>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = guard.authorize(request.headers())?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header::AUTHORIZATION, StatusCode},
        middleware,
        routing::get,
        Extension, Router,
    };
    use folio_authz::{Identity, TokenCodec};
    use std::time::Duration;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<TokenCodec>) {
        let codec = Arc::new(TokenCodec::new(b"secret", Duration::from_secs(3600)));
        let guard = Arc::new(AccessGuard::new(codec.clone()));
        let router = Router::new()
            .route(
                "/whoami",
                get(|Extension(identity): Extension<Identity>| async move { identity.email }),
            )
            .route_layer(middleware::from_fn_with_state(guard, require_bearer));
        (router, codec)
    }

    #[tokio::test]
    async fn admitted_request_sees_identity() {
        let (app, codec) = app();
        let token = codec.issue("rv@tai.com").unwrap().token;

        let response = app
            .oneshot(
                axum::http::Request::get("/whoami")
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"rv@tai.com");
    }

    #[tokio::test]
    async fn rejected_request_never_reaches_handler() {
        let (app, _) = app();

        let missing = app
            .clone()
            .oneshot(axum::http::Request::get("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let invalid = app
            .oneshot(
                axum::http::Request::get("/whoami")
                    .header(AUTHORIZATION, "Bearer forged")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(invalid.status(), StatusCode::FORBIDDEN);
    }
}
