//! SQL access for the `book` table.

use futures_util::{Stream, TryStreamExt};
use sqlx::Row;

use book_db::select::{bind_all, Select, ENTITY_ALIAS};
use book_db::{Database, Entity, Pageable, RepositoryError, RepositoryResult};

use super::models::Book;
use super::row_mapper::BookRowMapper;

#[derive(Clone, Debug)]
pub struct BookRepository {
    database: Database,
}

impl BookRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Stream every book, optionally restricted to one page.
    ///
    /// An unknown sort property surfaces as the first (and only) item.
    pub fn find_all_by(
        &self,
        pageable: Option<&Pageable>,
    ) -> impl Stream<Item = RepositoryResult<Book>> + Send + 'static {
        let pool = self.database.pool().clone();
        let pageable = pageable.cloned();

        async_stream::stream! {
            let select = match &pageable {
                Some(pageable) => Select::entity::<Book>().paged(pageable, Book::columns()),
                None => Ok(Select::entity::<Book>()),
            };

            match select {
                Err(err) => {
                    yield Err::<Book, RepositoryError>(err);
                }
                Ok(select) => {
                    let (sql, binds) = select.build();
                    tracing::trace!(target: "books", %sql, "find_all_by");

                    let mut rows = bind_all(sqlx::query(&sql), &binds).fetch(&pool);
                    loop {
                        match rows.try_next().await {
                            Ok(Some(row)) => {
                                yield BookRowMapper::apply(&row, ENTITY_ALIAS)
                                    .map_err(RepositoryError::from);
                            }
                            Ok(None) => break,
                            Err(err) => {
                                yield Err(RepositoryError::from(err));
                                break;
                            }
                        }
                    }
                }
            }
        }
    }

    pub fn find_all(&self) -> impl Stream<Item = RepositoryResult<Book>> + Send + 'static {
        self.find_all_by(None)
    }

    pub async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Book>> {
        let (sql, binds) = Select::entity::<Book>()
            .where_eq(Book::id_column(), id)
            .build();
        let row = bind_all(sqlx::query(&sql), &binds)
            .fetch_optional(self.database.pool())
            .await?;

        row.map(|row| BookRowMapper::apply(&row, ENTITY_ALIAS).map_err(RepositoryError::from))
            .transpose()
    }

    /// Insert a book without an id, or update the row carrying its id.
    ///
    /// Updating an id that has no row is a constraint violation.
    pub async fn save(&self, book: Book) -> RepositoryResult<Book> {
        match book.id {
            None => {
                let result = sqlx::query(
                    "INSERT INTO book (title, description, author) VALUES (?, ?, ?)",
                )
                .bind(&book.title)
                .bind(&book.description)
                .bind(&book.author)
                .execute(self.database.pool())
                .await?;

                Ok(Book {
                    id: Some(result.last_insert_rowid()),
                    ..book
                })
            }
            Some(id) => {
                let result = sqlx::query(
                    "UPDATE book SET title = ?, description = ?, author = ? WHERE id = ?",
                )
                .bind(&book.title)
                .bind(&book.description)
                .bind(&book.author)
                .bind(id)
                .execute(self.database.pool())
                .await?;

                if result.rows_affected() == 0 {
                    return Err(RepositoryError::ConstraintViolation(format!(
                        "no book row with id {id}"
                    )));
                }
                Ok(book)
            }
        }
    }

    /// Deleting an id with no row is not an error.
    pub async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM book WHERE id = ?")
            .bind(id)
            .execute(self.database.pool())
            .await?;
        Ok(())
    }

    pub async fn count(&self) -> RepositoryResult<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM book")
            .fetch_one(self.database.pool())
            .await?;
        let total: i64 = row.try_get("total")?;
        Ok(total.max(0) as u64)
    }

    pub async fn exists_by_id(&self, id: i64) -> RepositoryResult<bool> {
        let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM book WHERE id = ?)")
            .bind(id)
            .fetch_one(self.database.pool())
            .await?;
        Ok(found != 0)
    }
}
