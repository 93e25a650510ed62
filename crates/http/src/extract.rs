//! Request extractors shared by module handlers.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::de::DeserializeOwned;

/// JSON body that reads as `T::default()` when the request carries none.
///
/// A missing or non-JSON `Content-Type` and an empty body both yield the
/// default. A body declared as JSON that does not deserialize is rejected
/// with the usual [`JsonRejection`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrDefault<T>(pub T);

impl<T, S> FromRequest<S> for JsonOrDefault<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !declares_json(req.headers()) {
            return Ok(Self(T::default()));
        }

        let bytes = Bytes::from_request(req, state).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(Self(value))
    }
}

fn declares_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|essence| {
            let essence = essence.trim();
            essence.eq_ignore_ascii_case("application/json") || essence.ends_with("+json")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, StatusCode},
        routing::post,
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Note {
        text: Option<String>,
    }

    fn app() -> Router {
        Router::new().route(
            "/notes",
            post(|JsonOrDefault(note): JsonOrDefault<Note>| async move {
                note.text.unwrap_or_else(|| "<none>".to_string())
            }),
        )
    }

    async fn post_note(content_type: Option<&str>, body: &'static str) -> (StatusCode, String) {
        let mut builder = axum::http::Request::post("/notes");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let response = app()
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn json_body_is_deserialized() {
        let (status, body) = post_note(
            Some("application/json; charset=utf-8"),
            r#"{"text":"hello"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn absent_body_reads_as_default() {
        assert_eq!(post_note(None, "").await, (StatusCode::OK, "<none>".into()));
        assert_eq!(
            post_note(Some("application/json"), "  ").await,
            (StatusCode::OK, "<none>".into())
        );
        assert_eq!(
            post_note(Some("text/plain"), "hello").await,
            (StatusCode::OK, "<none>".into())
        );
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let (status, _) = post_note(Some("application/json"), "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn content_type_detection() {
        let mut headers = HeaderMap::new();
        assert!(!declares_json(&headers));

        headers.insert(CONTENT_TYPE, "application/problem+json".parse().unwrap());
        assert!(declares_json(&headers));

        headers.insert(CONTENT_TYPE, "Application/JSON".parse().unwrap());
        assert!(declares_json(&headers));

        headers.insert(CONTENT_TYPE, "text/html".parse().unwrap());
        assert!(!declares_json(&headers));
    }
}
