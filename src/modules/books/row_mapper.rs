use sqlx::sqlite::SqliteRow;

use book_db::{convert::from_row, TypeConversionError};

use super::models::Book;

/// Reads `{prefix}_id`, `{prefix}_title`, `{prefix}_description` and
/// `{prefix}_author` from a result row.
pub struct BookRowMapper;

impl BookRowMapper {
    pub fn apply(row: &SqliteRow, prefix: &str) -> Result<Book, TypeConversionError> {
        Ok(Book {
            id: from_row(row, &format!("{prefix}_id"))?,
            title: from_row(row, &format!("{prefix}_title"))?,
            description: from_row(row, &format!("{prefix}_description"))?,
            author: from_row(row, &format!("{prefix}_author"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use book_db::Database;
    use book_kernel::settings::DatabaseSettings;

    #[tokio::test]
    async fn maps_prefixed_columns() {
        let db = Database::connect(&DatabaseSettings::in_memory()).await.unwrap();
        let row = sqlx::query(
            "SELECT 3 AS b_id, 'Hyperion' AS b_title, NULL AS b_description, 'Simmons' AS b_author",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();

        let book = BookRowMapper::apply(&row, "b").unwrap();
        assert_eq!(book.id, Some(3));
        assert_eq!(book.title, "Hyperion");
        assert_eq!(book.description, None);
        assert_eq!(book.author, "Simmons");
    }

    #[tokio::test]
    async fn wrong_prefix_fails_conversion() {
        let db = Database::connect(&DatabaseSettings::in_memory()).await.unwrap();
        let row = sqlx::query("SELECT 3 AS b_id")
            .fetch_one(db.pool())
            .await
            .unwrap();

        let err = BookRowMapper::apply(&row, "e").unwrap_err();
        assert!(matches!(err, TypeConversionError::MissingColumn { ref column } if column == "e_id"));
    }
}
