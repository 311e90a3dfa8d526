//! The book record.

use serde::{Deserialize, Serialize};

/// A catalog entry. `id` is caller-supplied and doubles as the store key,
/// though nothing forces the two to agree.
///
/// Fields absent from the JSON decode as empty strings; only malformed JSON
/// is rejected.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Book {
    pub id: String,
    pub title: String,
}

impl Book {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into() }
    }
}

/// The records every fresh process starts with.
pub fn seed() -> Vec<Book> {
    vec![
        Book::new("1", "1984"),
        Book::new("2", "Brave New World"),
        Book::new("3", "To Kill a Mockingbird"),
        Book::new("4", "The Great Gatsby"),
        Book::new("5", "Moby Dick"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape() {
        let book = Book::new("6", "Dune");
        assert_eq!(serde_json::to_string(&book).unwrap(), r#"{"id":"6","title":"Dune"}"#);

        let parsed: Book = serde_json::from_str(r#"{"title":"Dune","id":"6"}"#).unwrap();
        assert_eq!(parsed, book);
    }

    #[test]
    fn missing_fields_decode_as_empty() {
        let parsed: Book = serde_json::from_str(r#"{"id":"6"}"#).unwrap();
        assert_eq!(parsed, Book::new("6", ""));

        let parsed: Book = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, Book::default());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(serde_json::from_str::<Book>(r#"{"id":"6""#).is_err());
        assert!(serde_json::from_str::<Book>(r#"{"id":6}"#).is_err());
    }
}
