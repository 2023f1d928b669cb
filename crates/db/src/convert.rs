//! Typed column reads with conversion errors that name the column.

use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{Decode, Row, Type};

use crate::error::TypeConversionError;

/// Read `column` from `row` as `T`.
pub fn from_row<'r, T>(row: &'r SqliteRow, column: &str) -> Result<T, TypeConversionError>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    row.try_get::<T, _>(column).map_err(|err| match err {
        sqlx::Error::ColumnNotFound(_) => TypeConversionError::MissingColumn {
            column: column.to_string(),
        },
        other => TypeConversionError::Decode {
            column: column.to_string(),
            source: other,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use book_kernel::settings::DatabaseSettings;

    #[tokio::test]
    async fn reads_typed_columns() {
        let db = Database::connect(&DatabaseSettings::in_memory()).await.unwrap();
        let row = sqlx::query("SELECT 7 AS e_id, 'Dune' AS e_title, NULL AS e_description")
            .fetch_one(db.pool())
            .await
            .unwrap();

        assert_eq!(from_row::<Option<i64>>(&row, "e_id").unwrap(), Some(7));
        assert_eq!(from_row::<String>(&row, "e_title").unwrap(), "Dune");
        assert_eq!(from_row::<Option<String>>(&row, "e_description").unwrap(), None);
    }

    #[tokio::test]
    async fn missing_column_is_reported_by_name() {
        let db = Database::connect(&DatabaseSettings::in_memory()).await.unwrap();
        let row = sqlx::query("SELECT 1 AS other")
            .fetch_one(db.pool())
            .await
            .unwrap();

        match from_row::<i64>(&row, "e_id") {
            Err(TypeConversionError::MissingColumn { column }) => assert_eq!(column, "e_id"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn mismatched_type_is_a_decode_error() {
        let db = Database::connect(&DatabaseSettings::in_memory()).await.unwrap();
        let row = sqlx::query("SELECT 'not-a-number' AS e_id")
            .fetch_one(db.pool())
            .await
            .unwrap();

        let err = from_row::<i64>(&row, "e_id").unwrap_err();
        assert!(matches!(err, TypeConversionError::Decode { ref column, .. } if column == "e_id"));
    }
}
