//! Middleware layer.
//!
//! Middleware wraps every matched route and is where credential checks live.
//! It sees the request before method dispatch, so it also wraps the `405` a
//! route produces for an unsupported method. Unmatched paths (`404`) bypass
//! it. Request tracing sits outside the router, in the server's dispatch.
//!
//! Layers registered first run outermost:
//!
//! ```text
//! Router::new().layer(outer).layer(gate)
//!
//! request → outer → ApiKeyGate → handler
//! ```

mod auth;

use std::sync::Arc;

use crate::handler::{BoxFuture, BoxedHandler};
use crate::request::Request;

pub use auth::{ApiKeyGate, CredentialCheck, StaticApiKey};

/// A request interceptor.
///
/// Call `next.run(req)` to continue down the chain, or return a response of
/// your own to short-circuit it.
pub trait Middleware: Send + Sync + 'static {
    fn call(&self, req: Request, next: Next) -> BoxFuture;
}

/// The remainder of the middleware chain, ending at the route endpoint.
pub struct Next {
    chain: Arc<[Arc<dyn Middleware>]>,
    pos: usize,
    endpoint: BoxedHandler,
}

impl Next {
    pub(crate) fn new(chain: Arc<[Arc<dyn Middleware>]>, endpoint: BoxedHandler) -> Self {
        Self { chain, pos: 0, endpoint }
    }

    pub fn run(self, req: Request) -> BoxFuture {
        match self.chain.get(self.pos).cloned() {
            Some(layer) => {
                let next = Self { chain: self.chain, pos: self.pos + 1, endpoint: self.endpoint };
                layer.call(req, next)
            }
            None => self.endpoint.call(req),
        }
    }
}
