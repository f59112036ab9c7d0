//! Request identification.
//!
//! # Responsibilities
//! - Tag every request with a unique ID as early as possible
//! - Preserve an ID supplied by a fronting proxy
//! - Expose the ID to handlers for log correlation
//!
//! # Design Decisions
//! - UUID v4 in the `x-request-id` header; an existing header wins so a
//!   chain of services shares one correlation ID

use std::task::{Context, Poll};

use axum::http::{HeaderMap, HeaderValue, Request};
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying the correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Tower layer that stamps `x-request-id` onto incoming requests.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service produced by [`RequestIdLayer`].
#[derive(Clone, Debug)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for RequestIdService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        if !request.headers().contains_key(X_REQUEST_ID) {
            // UUIDs are plain ASCII; from_str cannot realistically fail
            if let Ok(value) = HeaderValue::from_str(&Uuid::new_v4().to_string()) {
                request.headers_mut().insert(X_REQUEST_ID, value);
            }
        }
        self.inner.call(request)
    }
}

/// Convenience accessor for the correlation ID.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl RequestIdExt for HeaderMap {
    fn request_id(&self) -> Option<&str> {
        self.get(X_REQUEST_ID).and_then(|v| v.to_str().ok())
    }
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.headers().request_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::future::{ready, Ready};

    /// Test service that echoes back the request ID it observed.
    struct Capture;

    impl Service<Request<()>> for Capture {
        type Response = Option<String>;
        type Error = Infallible;
        type Future = Ready<Result<Self::Response, Self::Error>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, request: Request<()>) -> Self::Future {
            ready(Ok(request.request_id().map(String::from)))
        }
    }

    #[tokio::test]
    async fn missing_id_is_generated() {
        let mut service = RequestIdLayer.layer(Capture);
        let request = Request::builder().body(()).unwrap();

        let seen = service.call(request).await.unwrap();
        let id = seen.expect("request id should be stamped");
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[tokio::test]
    async fn existing_id_is_preserved() {
        let mut service = RequestIdLayer.layer(Capture);
        let request = Request::builder()
            .header(X_REQUEST_ID, "upstream-id")
            .body(())
            .unwrap();

        let seen = service.call(request).await.unwrap();
        assert_eq!(seen.as_deref(), Some("upstream-id"));
    }
}
