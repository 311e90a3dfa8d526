//! bookshelf server binary.
//!
//! Run with:
//!   RUST_LOG=debug cargo run
//!
//! Try:
//!   curl -H 'X-API-Key: secret-key' http://localhost:8080/books
//!   curl -H 'X-API-Key: secret-key' -X POST http://localhost:8080/books \
//!        -d '{"id":"6","title":"Dune"}'
//!   curl -H 'X-API-Key: secret-key' -X DELETE http://localhost:8080/book/6

use std::sync::Arc;

use bookshelf::config::Settings;
use bookshelf::middleware::{ApiKeyGate, StaticApiKey};
use bookshelf::{BookStore, MemoryStore, Server, SharedStore, api, telemetry};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init(&settings.logging);

    info!("starting bookshelf v{}", env!("CARGO_PKG_VERSION"));

    let store: SharedStore = Arc::new(MemoryStore::seeded());
    info!(records = store.list().await.len(), "store seeded");

    let gate = ApiKeyGate::new(
        settings.auth.header.clone(),
        StaticApiKey::new(settings.auth.api_key.clone()),
    );
    let app = api::router(store, gate);

    let addr = settings.server.socket_addr()?;
    let server = match Server::bind(addr).await {
        Ok(server) => server,
        Err(e) => {
            error!(%addr, "failed to bind: {e}");
            return Err(e.into());
        }
    };

    if let Err(e) = server
        .grace_period(settings.server.grace_period())
        .serve(app)
        .await
    {
        error!("server forced to shut down: {e}");
        return Err(e.into());
    }

    Ok(())
}
