//! Radix-tree request router.
//!
//! Paths live in one `matchit` tree; each matched path owns a small method
//! table. That split is what lets the router tell "no such path" (`404`)
//! apart from "path exists, method does not" (`405`).
//!
//! Lookup is O(path length) and the method table is a short linear scan.
//! Once a path matches, the request runs through the middleware chain
//! (see [`crate::middleware`]) and then the handler, or the generated `405`
//! handler when the method has none. Unmatched paths answer `404` directly.

use std::collections::HashMap;
use std::sync::Arc;

use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::middleware::{Middleware, Next};
use crate::request::Request;
use crate::response::Response;

// ── Router ────────────────────────────────────────────────────────────────────

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Every builder method returns `self` so registrations chain.
pub struct Router {
    tree: MatchitRouter<usize>,
    routes: Vec<Route>,
    paths: HashMap<String, usize>,
    middleware: Arc<[Arc<dyn Middleware>]>,
}

// ── Route table ───────────────────────────────────────────────────────────────

/// Handlers registered for one path pattern.
#[derive(Default)]
struct Route {
    methods: Vec<(Method, BoxedHandler)>,
}

impl Route {
    fn find(&self, method: &Method) -> Option<&BoxedHandler> {
        self.methods.iter().find(|(m, _)| m == method).map(|(_, h)| h)
    }

    fn allow(&self) -> String {
        self.methods.iter()
            .map(|(m, _)| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            tree: MatchitRouter::new(),
            routes: Vec::new(),
            paths: HashMap::new(),
            middleware: Arc::from(Vec::new()),
        }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax and catch-alls `{*name}`;
    /// `req.param("name")` retrieves either. Registering the same pair twice
    /// replaces the earlier handler.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid `matchit` pattern or conflicts with an
    /// already registered one. Routes are fixed at startup, so this is a
    /// programming error rather than a runtime condition.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        let idx = match self.paths.get(path) {
            Some(&idx) => idx,
            None => {
                let idx = self.routes.len();
                self.tree
                    .insert(path, idx)
                    .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
                self.routes.push(Route::default());
                self.paths.insert(path.to_owned(), idx);
                idx
            }
        };

        let route = &mut self.routes[idx];
        let handler = handler.into_boxed_handler();
        match route.methods.iter_mut().find(|(m, _)| *m == method) {
            Some(slot) => slot.1 = handler,
            None => route.methods.push((method, handler)),
        }
        self
    }

    /// Wrap every route in `middleware`. Layers added first run outermost.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        let mut chain = self.middleware.to_vec();
        chain.push(Arc::new(middleware));
        self.middleware = chain.into();
        self
    }

    /// Route one request and produce its response.
    pub async fn handle(&self, mut req: Request) -> Response {
        let (idx, params) = match self.tree.at(&req.path) {
            Ok(matched) => {
                let params = matched.params.iter()
                    .map(|(k, v)| (k.to_owned(), v.to_owned()))
                    .collect::<HashMap<_, _>>();
                (*matched.value, params)
            }
            Err(_) => return Response::builder().status(StatusCode::NOT_FOUND).text("404 page not found"),
        };
        req.params = params;

        let route = &self.routes[idx];
        let endpoint = match route.find(&req.method) {
            Some(handler) => Arc::clone(handler),
            None => method_not_allowed(route.allow()),
        };

        Next::new(Arc::clone(&self.middleware), endpoint).run(req).await
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

// ── Fallbacks ─────────────────────────────────────────────────────────────────

fn method_not_allowed(allow: String) -> BoxedHandler {
    let handler = move |_req: Request| {
        let res = Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header("allow", &allow)
            .no_body();
        async move { res }
    };
    handler.into_boxed_handler()
}
