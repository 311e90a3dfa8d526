//! HTTP surface of the catalog.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/books` | 200, JSON array |
//! | POST | `/books` | 201, empty |
//! | GET | `/book/{id}` | 200, JSON record |
//! | PUT | `/book/{id}` | 200, JSON record |
//! | DELETE | `/book/{id}` | 204, empty |

mod book;
mod books;

use std::sync::Arc;

use http::{Method, StatusCode};

use crate::middleware::ApiKeyGate;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::store::SharedStore;

/// Builds the catalog router. Every route sits behind `gate`.
pub fn router(store: SharedStore, gate: ApiKeyGate) -> Router {
    Router::new()
        .layer(gate)
        .on(Method::GET, "/books", {
            let store = Arc::clone(&store);
            move |_req: Request| books::list(Arc::clone(&store))
        })
        .on(Method::POST, "/books", {
            let store = Arc::clone(&store);
            move |req: Request| books::create(Arc::clone(&store), req)
        })
        // `/book/` on its own carries the empty id; the catch-all needs at
        // least one character.
        .on(Method::GET, "/book/", {
            let store = Arc::clone(&store);
            move |req: Request| book::get(Arc::clone(&store), req)
        })
        .on(Method::GET, "/book/{*id}", {
            let store = Arc::clone(&store);
            move |req: Request| book::get(Arc::clone(&store), req)
        })
        .on(Method::PUT, "/book/", {
            let store = Arc::clone(&store);
            move |req: Request| book::put(Arc::clone(&store), req)
        })
        .on(Method::PUT, "/book/{*id}", {
            let store = Arc::clone(&store);
            move |req: Request| book::put(Arc::clone(&store), req)
        })
        .on(Method::DELETE, "/book/", {
            let store = Arc::clone(&store);
            move |req: Request| book::delete(Arc::clone(&store), req)
        })
        .on(Method::DELETE, "/book/{*id}", {
            let store = Arc::clone(&store);
            move |req: Request| book::delete(Arc::clone(&store), req)
        })
}

/// `400` carrying the decoder's message verbatim.
fn bad_request(e: serde_json::Error) -> Response {
    Response::builder()
        .status(StatusCode::BAD_REQUEST)
        .text(e.to_string())
}
