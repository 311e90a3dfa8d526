//! `/books`: the whole collection.

use http::StatusCode;

use super::bad_request;
use crate::model::Book;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::store::SharedStore;

/// `GET /books`
pub(super) async fn list(store: SharedStore) -> Response {
    let books = store.list().await;
    Json(books).into_response()
}

/// `POST /books`. No duplicate check: an existing id is overwritten.
pub(super) async fn create(store: SharedStore, req: Request) -> Response {
    let book: Book = match req.json() {
        Ok(book) => book,
        Err(e) => return bad_request(e),
    };
    store.put(book.id.clone(), book).await;
    Response::status(StatusCode::CREATED)
}
