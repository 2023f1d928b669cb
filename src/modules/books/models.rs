use book_db::Entity;
use garde::Validate;
use serde::{Deserialize, Serialize};

/// A stored book.
///
/// Two books are equal only when both have an id and the ids match; unsaved
/// books are never equal, not even to themselves.
#[derive(Debug, Clone, Default)]
pub struct Book {
    /// Assigned by storage on first save
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub author: String,
}

impl Book {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

impl Entity for Book {
    fn table_name() -> &'static str {
        "book"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "title", "description", "author"]
    }
}

/// Wire representation of a [`Book`].
///
/// Every field is optional so the same shape serves create, full update and
/// merge-patch bodies; field rules are enforced by `garde` on create/update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BookDto {
    #[garde(skip)]
    pub id: Option<i64>,

    #[garde(required, length(chars, min = 5, max = 20))]
    pub title: Option<String>,

    #[garde(skip)]
    pub description: Option<String>,

    #[garde(required)]
    pub author: Option<String>,
}

impl PartialEq for BookDto {
    fn eq(&self, other: &Self) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(title: Option<&str>, author: Option<&str>) -> BookDto {
        BookDto {
            id: None,
            title: title.map(str::to_string),
            description: None,
            author: author.map(str::to_string),
        }
    }

    #[test]
    fn equality_is_by_id_only() {
        let a = Book {
            id: Some(1),
            title: "AAAAA".into(),
            ..Book::default()
        };
        let b = Book {
            id: Some(1),
            title: "BBBBB".into(),
            ..Book::default()
        };
        let c = Book {
            id: Some(2),
            ..a.clone()
        };

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn unsaved_books_are_never_equal() {
        let unsaved = Book::default();
        assert!(unsaved.is_new());
        assert_ne!(unsaved, unsaved.clone());
        assert_ne!(
            unsaved,
            Book {
                id: Some(1),
                ..Book::default()
            }
        );
    }

    #[test]
    fn dto_equality_matches_entity_rules() {
        let mut a = dto(Some("Title"), Some("Author"));
        let mut b = a.clone();
        assert_ne!(a, b);

        a.id = Some(3);
        b.id = Some(3);
        assert_eq!(a, b);
    }

    #[test]
    fn title_length_bounds() {
        assert!(dto(Some("12345"), Some("x")).validate().is_ok());
        assert!(dto(Some("12345678901234567890"), Some("x")).validate().is_ok());
        assert!(dto(Some("1234"), Some("x")).validate().is_err());
        assert!(dto(Some("123456789012345678901"), Some("x")).validate().is_err());
    }

    #[test]
    fn title_and_author_are_required() {
        assert!(dto(None, Some("Author")).validate().is_err());
        assert!(dto(Some("Title"), None).validate().is_err());
    }

    #[test]
    fn absent_fields_deserialize_as_none() {
        let parsed: BookDto = serde_json::from_str(r#"{"id": 4, "title": "Hello"}"#).unwrap();
        assert_eq!(parsed.id, Some(4));
        assert_eq!(parsed.title.as_deref(), Some("Hello"));
        assert!(parsed.description.is_none());
        assert!(parsed.author.is_none());
    }
}
