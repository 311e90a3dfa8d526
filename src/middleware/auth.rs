//! Shared-secret access gate.

use std::sync::Arc;

use http::StatusCode;
use tracing::debug;

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::request::Request;
use crate::response::Response;

/// Decides whether a presented credential grants access.
pub trait CredentialCheck: Send + Sync + 'static {
    /// `presented` is `None` when the request carried no credential.
    fn verify(&self, presented: Option<&str>) -> bool;
}

/// A single fixed key.
///
/// The comparison is plain string equality, so it is not constant-time.
pub struct StaticApiKey {
    key: String,
}

impl StaticApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl CredentialCheck for StaticApiKey {
    fn verify(&self, presented: Option<&str>) -> bool {
        presented == Some(self.key.as_str())
    }
}

/// Rejects requests whose credential header fails the check with
/// `401 Unauthorized`; everything else passes through untouched.
pub struct ApiKeyGate {
    header: String,
    check: Arc<dyn CredentialCheck>,
}

impl ApiKeyGate {
    pub fn new(header: impl Into<String>, check: impl CredentialCheck) -> Self {
        Self { header: header.into(), check: Arc::new(check) }
    }
}

impl Middleware for ApiKeyGate {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        if self.check.verify(req.header(&self.header)) {
            return next.run(req);
        }
        debug!(
            method = %req.method(),
            path = %req.path(),
            peer = %req.remote_addr(),
            header = %self.header,
            "rejected request without valid credential"
        );
        Box::pin(async {
            Response::builder()
                .status(StatusCode::UNAUTHORIZED)
                .text("Unauthorized")
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use http::Method;

    use super::*;
    use crate::Router;

    fn counting_router(hits: Arc<AtomicUsize>) -> Router {
        Router::new()
            .layer(ApiKeyGate::new("X-API-Key", StaticApiKey::new("secret-key")))
            .on(Method::GET, "/books", move |_req: Request| {
                let hits = Arc::clone(&hits);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    StatusCode::OK
                }
            })
    }

    #[test]
    fn static_key_requires_exact_match() {
        let key = StaticApiKey::new("secret-key");
        assert!(key.verify(Some("secret-key")));
        assert!(!key.verify(Some("Secret-Key")));
        assert!(!key.verify(Some("")));
        assert!(!key.verify(None));
    }

    #[tokio::test]
    async fn missing_key_short_circuits() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = counting_router(Arc::clone(&hits));

        let res = app.handle(Request::new(Method::GET, "/books")).await;

        assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.body(), b"Unauthorized");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn wrong_key_short_circuits() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = counting_router(Arc::clone(&hits));

        let req = Request::new(Method::GET, "/books").with_header("X-API-Key", "nope");
        let res = app.handle(req).await;

        assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_key_forwards() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = counting_router(Arc::clone(&hits));

        let req = Request::new(Method::GET, "/books").with_header("x-api-key", "secret-key");
        let res = app.handle(req).await;

        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn gate_runs_before_method_check() {
        let app = counting_router(Arc::new(AtomicUsize::new(0)));

        let res = app.handle(Request::new(Method::PATCH, "/books")).await;
        assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);

        let req = Request::new(Method::PATCH, "/books").with_header("X-API-Key", "secret-key");
        let res = app.handle(req).await;
        assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
