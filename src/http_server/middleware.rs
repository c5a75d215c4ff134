//! Request middleware: request-id tagging and access logging.
//!
//! `request_id` runs outermost so every later log line, including the
//! access log, carries the id.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use crate::observability::RequestContext;

/// Header used to accept and echo the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tag the request with an id, honouring a well-formed one supplied by the
/// caller. The id is exposed to handlers through [`RequestContext`] in the
/// request extensions and echoed on the response.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    request
        .extensions_mut()
        .insert(RequestContext::with_request_id(request_id));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Log one structured line per handled request.
pub async fn access_log(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let ctx = request
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_default();

    let response = next.run(request).await;

    ctx.info(
        "request",
        &[
            ("method", &method),
            ("path", &path),
            ("status", &response.status().as_u16().to_string()),
        ],
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Extension;
    use axum::Router;
    use tower::ServiceExt;

    async fn echo_handler(Extension(ctx): Extension<RequestContext>) -> String {
        ctx.request_id.to_string()
    }

    fn test_router() -> Router {
        Router::new()
            .route("/echo", get(echo_handler))
            .layer(axum::middleware::from_fn(access_log))
            .layer(axum::middleware::from_fn(request_id))
    }

    #[tokio::test]
    async fn test_request_id_is_generated_and_echoed() {
        let response = test_router()
            .oneshot(Request::builder().uri("/echo").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let header = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap();
        assert!(Uuid::parse_str(&header).is_ok());

        // The handler saw the same id that was echoed on the response
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), header);
    }

    #[tokio::test]
    async fn test_supplied_request_id_is_preserved() {
        let id = Uuid::new_v4();
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/echo")
                    .header(REQUEST_ID_HEADER, id.to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let header = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert_eq!(header, id.to_string());
    }

    #[tokio::test]
    async fn test_malformed_request_id_is_replaced() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/echo")
                    .header(REQUEST_ID_HEADER, "not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let header = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert_ne!(header, "not-a-uuid");
        assert!(Uuid::parse_str(header).is_ok());
    }
}
