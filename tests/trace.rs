//! Every request the server answers is logged, routed or not.

use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};

use bookshelf::middleware::{ApiKeyGate, StaticApiKey};
use bookshelf::{MemoryStore, Server, SharedStore, api};
use reqwest::StatusCode;
use tokio::sync::oneshot;

/// Collects formatted log lines in memory.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

// Current-thread runtime: the thread-local subscriber also sees the
// connection tasks the server spawns.
#[tokio::test(flavor = "current_thread")]
async fn unmatched_and_rejected_requests_are_logged() {
    let logs = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer({
            let logs = logs.clone();
            move || logs.clone()
        })
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let store: SharedStore = Arc::new(MemoryStore::seeded());
    let gate = ApiKeyGate::new("X-API-Key", StaticApiKey::new("secret-key"));
    let server = Server::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0))).await.unwrap();
    let base = format!("http://{}", server.local_addr().unwrap());
    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve_with_shutdown(api::router(store, gate), async {
        let _ = stopped.await;
    }));

    let client = reqwest::Client::new();
    let res = client.get(format!("{base}/authors")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let res = client.get(format!("{base}/books")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let _ = stop.send(());
    handle.await.unwrap().unwrap();

    let text = logs.text();
    let completed: Vec<&str> = text.lines().filter(|l| l.contains("request completed")).collect();
    assert_eq!(completed.len(), 2, "{text}");
    assert!(completed[0].contains("path=/authors"), "{text}");
    assert!(completed[0].contains("status=404"), "{text}");
    assert!(completed[1].contains("path=/books"), "{text}");
    assert!(completed[1].contains("status=401"), "{text}");
}
