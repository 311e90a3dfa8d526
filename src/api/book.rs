//! `/book/{id}`: a single record.
//!
//! The id is the percent-decoded path remainder after `/book/`, slashes
//! included, and may be empty. Nothing else is trimmed or normalized.

use http::StatusCode;

use super::bad_request;
use crate::model::Book;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::store::SharedStore;

/// Escapes that decode to invalid UTF-8 become U+FFFD.
fn id(req: &Request) -> String {
    let raw = req.param("id").unwrap_or_default();
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

/// `GET /book/{id}`
pub(super) async fn get(store: SharedStore, req: Request) -> Response {
    match store.get(&id(&req)).await {
        Some(book) => Json(book).into_response(),
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .text("404 page not found"),
    }
}

/// `PUT /book/{id}`: upsert under the path id. The stored value is the body
/// as sent, so its own `id` may differ from the key.
pub(super) async fn put(store: SharedStore, req: Request) -> Response {
    let book: Book = match req.json() {
        Ok(book) => book,
        Err(e) => return bad_request(e),
    };
    store.put(id(&req), book.clone()).await;
    Json(book).into_response()
}

/// `DELETE /book/{id}`: `204` whether or not the id existed.
pub(super) async fn delete(store: SharedStore, req: Request) -> Response {
    store.delete(&id(&req)).await;
    Response::status(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use http::Method;

    use super::*;
    use crate::store::MemoryStore;

    fn seeded() -> SharedStore {
        Arc::new(MemoryStore::seeded())
    }

    fn with_id(method: Method, id: &str) -> Request {
        let mut req = Request::new(method, format!("/book/{id}"));
        req.params.insert("id".into(), id.into());
        req
    }

    #[tokio::test]
    async fn get_missing_is_404() {
        let res = get(seeded(), with_id(Method::GET, "404")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn put_creates_absent_record() {
        let store = seeded();
        let req = with_id(Method::PUT, "99").with_body(r#"{"id":"99","title":"Solaris"}"#);

        let res = put(Arc::clone(&store), req).await;

        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), br#"{"id":"99","title":"Solaris"}"#);
        assert_eq!(store.get("99").await, Some(Book::new("99", "Solaris")));
    }

    #[tokio::test]
    async fn put_keeps_body_id_under_path_key() {
        let store = seeded();
        let req = with_id(Method::PUT, "2").with_body(r#"{"id":"20","title":"Island"}"#);

        let res = put(Arc::clone(&store), req).await;

        assert_eq!(res.body(), br#"{"id":"20","title":"Island"}"#);
        assert_eq!(store.get("2").await, Some(Book::new("20", "Island")));
        assert_eq!(store.get("20").await, None);
    }

    #[tokio::test]
    async fn malformed_put_is_400_and_no_write() {
        let store = seeded();
        let req = with_id(Method::PUT, "3").with_body("not json");

        let res = put(Arc::clone(&store), req).await;

        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(store.get("3").await, Some(Book::new("3", "To Kill a Mockingbird")));
    }

    #[tokio::test]
    async fn delete_twice_is_204_both_times() {
        let store = seeded();

        let res = delete(Arc::clone(&store), with_id(Method::DELETE, "1")).await;
        assert_eq!(res.status_code(), StatusCode::NO_CONTENT);
        assert_eq!(store.get("1").await, None);

        let res = delete(Arc::clone(&store), with_id(Method::DELETE, "1")).await;
        assert_eq!(res.status_code(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn id_is_percent_decoded() {
        let store = seeded();
        let req = with_id(Method::PUT, "a%20b").with_body(r#"{"id":"a b","title":"Spaced"}"#);
        put(Arc::clone(&store), req).await;

        assert_eq!(store.get("a b").await, Some(Book::new("a b", "Spaced")));
        assert_eq!(store.get("a%20b").await, None);

        let res = get(Arc::clone(&store), with_id(Method::GET, "a b")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        let res = delete(Arc::clone(&store), with_id(Method::DELETE, "a%20b")).await;
        assert_eq!(res.status_code(), StatusCode::NO_CONTENT);
        assert_eq!(store.get("a b").await, None);
    }

    #[tokio::test]
    async fn put_with_missing_title_stores_empty_title() {
        let store = seeded();
        let req = with_id(Method::PUT, "8").with_body(r#"{"id":"8"}"#);

        let res = put(Arc::clone(&store), req).await;

        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), br#"{"id":"8","title":""}"#);
        assert_eq!(store.get("8").await, Some(Book::new("8", "")));
    }

    #[tokio::test]
    async fn empty_id_is_a_valid_key() {
        let store = seeded();
        let req = Request::new(Method::PUT, "/book/").with_body(r#"{"id":"","title":"Untitled"}"#);
        put(Arc::clone(&store), req).await;

        let res = get(Arc::clone(&store), Request::new(Method::GET, "/book/")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(store.get("").await, Some(Book::new("", "Untitled")));
    }
}
