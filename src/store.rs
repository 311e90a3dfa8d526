//! The shared book store.
//!
//! Reads take the shared side of the lock, writes the exclusive side. Guards
//! never outlive the map access itself: values are cloned out, so callers
//! serialize them without holding the lock. No method calls another locking
//! method.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::{self, Book};

/// Store handle shared by every route.
pub type SharedStore = Arc<dyn BookStore>;

/// Keyed storage for [`Book`]s.
#[async_trait]
pub trait BookStore: Send + Sync + 'static {
    /// Snapshot of every stored book, in no particular order.
    async fn list(&self) -> Vec<Book>;

    async fn get(&self, id: &str) -> Option<Book>;

    /// Inserts or replaces unconditionally.
    async fn put(&self, id: String, book: Book);

    /// Removes `id` if present. Removing an absent id is a no-op.
    async fn delete(&self, id: &str);
}

/// In-memory [`BookStore`]. Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    books: RwLock<HashMap<String, Book>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the five startup records, keyed by their own ids.
    pub fn seeded() -> Self {
        let books = model::seed().into_iter().map(|b| (b.id.clone(), b)).collect();
        Self { books: RwLock::new(books) }
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn list(&self) -> Vec<Book> {
        let books = self.books.read().await;
        books.values().cloned().collect()
    }

    async fn get(&self, id: &str) -> Option<Book> {
        self.books.read().await.get(id).cloned()
    }

    async fn put(&self, id: String, book: Book) {
        self.books.write().await.insert(id, book);
    }

    async fn delete(&self, id: &str) {
        self.books.write().await.remove(id);
    }
}
