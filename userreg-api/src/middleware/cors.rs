//! Wildcard CORS headers middleware
//!
//! The registry is called directly from browser front-ends on arbitrary
//! origins, so every response (successes, handler errors, extractor
//! rejections alike) carries:
//!
//! - `Access-Control-Allow-Origin: *`
//! - `Access-Control-Allow-Headers: *`
//! - `Access-Control-Allow-Methods: *`
//!
//! `OPTIONS` preflight requests are answered here with `204 No Content` and
//! never reach the router, so a cross-origin `POST` with a JSON body is let
//! through by browsers.
//!
//! `tower_http::cors::CorsLayer` only emits the allow-headers and
//! allow-methods headers on preflight requests, hence this small layer.
//!
//! # Example
//!
//! ```no_run
//! use axum::Router;
//! use userreg_api::middleware::cors::CorsHeadersLayer;
//!
//! let app: Router = Router::new().layer(CorsHeadersLayer);
//! ```

use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// CORS headers middleware layer
#[derive(Debug, Clone, Copy, Default)]
pub struct CorsHeadersLayer;

impl<S> Layer<S> for CorsHeadersLayer {
    type Service = CorsHeadersMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsHeadersMiddleware { inner }
    }
}

/// CORS headers middleware service
#[derive(Debug, Clone)]
pub struct CorsHeadersMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for CorsHeadersMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        if request.method() == Method::OPTIONS {
            return Box::pin(async move {
                let mut response = StatusCode::NO_CONTENT.into_response();
                insert_wildcard_headers(response.headers_mut());
                Ok(response)
            });
        }

        let future = self.inner.call(request);

        Box::pin(async move {
            let mut response = future.await?;
            insert_wildcard_headers(response.headers_mut());
            Ok(response)
        })
    }
}

fn insert_wildcard_headers(headers: &mut HeaderMap) {
    let wildcard = HeaderValue::from_static("*");
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, wildcard.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, wildcard.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, wildcard);
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use tower::Service as _;

    fn assert_cors(response: &Response) {
        let headers = response.headers();
        assert_eq!(headers.get("Access-Control-Allow-Origin").unwrap(), "*");
        assert_eq!(headers.get("Access-Control-Allow-Headers").unwrap(), "*");
        assert_eq!(headers.get("Access-Control-Allow-Methods").unwrap(), "*");
    }

    #[tokio::test]
    async fn test_cors_headers_on_success() {
        async fn handler() -> impl IntoResponse {
            (StatusCode::OK, "test")
        }

        let mut app = Router::new()
            .route("/test", get(handler))
            .layer(CorsHeadersLayer);

        let response = app
            .call(axum::http::Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
    }

    #[tokio::test]
    async fn test_cors_headers_on_error() {
        async fn handler() -> impl IntoResponse {
            (StatusCode::INTERNAL_SERVER_ERROR, "boom")
        }

        let mut app = Router::new()
            .route("/test", get(handler))
            .layer(CorsHeadersLayer);

        let response = app
            .call(axum::http::Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);
    }

    #[tokio::test]
    async fn test_preflight_short_circuits() {
        async fn handler() -> impl IntoResponse {
            (StatusCode::OK, "test")
        }

        let mut app = Router::new()
            .route("/test", get(handler))
            .layer(CorsHeadersLayer);

        let response = app
            .call(
                axum::http::Request::builder()
                    .method("OPTIONS")
                    .uri("/test")
                    .header("access-control-request-method", "POST")
                    .header("access-control-request-headers", "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_cors(&response);
    }
}
