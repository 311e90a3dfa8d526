//! # bookshelf
//!
//! An in-memory book catalog served over HTTP behind a shared-secret
//! header.
//!
//! The crate is two layers:
//!
//! - A small HTTP layer on hyper: [`Router`] (radix-tree path matching via
//!   [`matchit`], per-path method tables, `404` vs `405`), [`middleware`],
//!   and [`Server`] with signal-driven graceful shutdown.
//! - The catalog itself: [`BookStore`] behind a reader/writer lock, and the
//!   [`api`] routes that expose it.
//!
//! ## Wiring
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use bookshelf::middleware::{ApiKeyGate, StaticApiKey};
//! use bookshelf::{MemoryStore, Server, SharedStore, api};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), bookshelf::Error> {
//!     let store: SharedStore = Arc::new(MemoryStore::seeded());
//!     let gate = ApiKeyGate::new("X-API-Key", StaticApiKey::new("secret-key"));
//!
//!     Server::bind("0.0.0.0:8080".parse()?)
//!         .await?
//!         .serve(api::router(store, gate))
//!         .await
//! }
//! ```

mod error;
mod handler;
mod model;
mod request;
mod response;
mod router;
mod server;
mod store;

pub mod api;
pub mod config;
pub mod middleware;
pub mod telemetry;

pub use error::Error;
pub use handler::{BoxFuture, Handler};
pub use model::{Book, seed};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::{DEFAULT_GRACE_PERIOD, Server};
pub use store::{BookStore, MemoryStore, SharedStore};
