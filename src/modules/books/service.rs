use futures_util::{Stream, TryStreamExt};

use book_db::{Pageable, RepositoryResult};

use super::mapper;
use super::models::BookDto;
use super::repository::BookRepository;

/// Book use cases expressed in DTOs.
#[derive(Clone, Debug)]
pub struct BookService {
    repository: BookRepository,
}

impl BookService {
    pub fn new(repository: BookRepository) -> Self {
        Self { repository }
    }

    pub async fn save(&self, dto: BookDto) -> RepositoryResult<BookDto> {
        tracing::debug!(target: "books", ?dto, "Request to save Book");
        let saved = self.repository.save(mapper::to_entity(dto)).await?;
        Ok(mapper::to_dto(&saved))
    }

    pub async fn update(&self, dto: BookDto) -> RepositoryResult<BookDto> {
        tracing::debug!(target: "books", ?dto, "Request to update Book");
        let saved = self.repository.save(mapper::to_entity(dto)).await?;
        Ok(mapper::to_dto(&saved))
    }

    /// Merge the supplied fields into the stored book.
    ///
    /// Returns `None` when no book carries `dto.id`.
    pub async fn partial_update(&self, dto: BookDto) -> RepositoryResult<Option<BookDto>> {
        tracing::debug!(target: "books", ?dto, "Request to partially update Book");
        let Some(id) = dto.id else {
            return Ok(None);
        };
        let Some(existing) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        let saved = self
            .repository
            .save(mapper::partial_update(existing, &dto))
            .await?;
        Ok(Some(mapper::to_dto(&saved)))
    }

    pub fn find_all(
        &self,
        pageable: &Pageable,
    ) -> impl Stream<Item = RepositoryResult<BookDto>> + Send + 'static {
        tracing::debug!(target: "books", page = pageable.page, size = pageable.size, "Request to get all Books");
        self.repository
            .find_all_by(Some(pageable))
            .map_ok(|book| mapper::to_dto(&book))
    }

    pub async fn count_all(&self) -> RepositoryResult<u64> {
        self.repository.count().await
    }

    pub async fn find_one(&self, id: i64) -> RepositoryResult<Option<BookDto>> {
        tracing::debug!(target: "books", id, "Request to get Book");
        Ok(self
            .repository
            .find_by_id(id)
            .await?
            .map(|book| mapper::to_dto(&book)))
    }

    pub async fn delete(&self, id: i64) -> RepositoryResult<()> {
        tracing::debug!(target: "books", id, "Request to delete Book");
        self.repository.delete_by_id(id).await
    }

    pub async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        self.repository.exists_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::test_support::repository;

    async fn service() -> BookService {
        BookService::new(repository().await)
    }

    fn dto(title: &str, author: &str) -> BookDto {
        BookDto {
            id: None,
            title: Some(title.into()),
            description: None,
            author: Some(author.into()),
        }
    }

    #[tokio::test]
    async fn save_then_find_one() {
        let service = service().await;
        let saved = service.save(dto("Dune", "Herbert")).await.unwrap();
        let id = saved.id.unwrap();

        let found = service.find_one(id).await.unwrap().unwrap();
        assert_eq!(found.title.as_deref(), Some("Dune"));
        assert_eq!(found.author.as_deref(), Some("Herbert"));
        assert!(service.exists(id).await.unwrap());
    }

    #[tokio::test]
    async fn partial_update_merges_into_stored_row() {
        let service = service().await;
        let saved = service
            .save(BookDto {
                description: Some("original".into()),
                ..dto("Dune", "Herbert")
            })
            .await
            .unwrap();

        let patched = service
            .partial_update(BookDto {
                id: saved.id,
                title: Some("Dune Messiah".into()),
                ..BookDto::default()
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(patched.title.as_deref(), Some("Dune Messiah"));
        assert_eq!(patched.description.as_deref(), Some("original"));
        assert_eq!(patched.author.as_deref(), Some("Herbert"));
    }

    #[tokio::test]
    async fn partial_update_of_missing_book_is_none() {
        let service = service().await;
        let result = service
            .partial_update(BookDto {
                id: Some(77),
                title: Some("Nothing".into()),
                ..BookDto::default()
            })
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn find_all_pages_and_counts() {
        let service = service().await;
        for title in ["Alpha", "Beloved", "Carrie"] {
            service.save(dto(title, "Various")).await.unwrap();
        }

        let page: Vec<BookDto> = service
            .find_all(&Pageable::of_size(1, 2))
            .try_collect()
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(service.count_all().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn delete_removes_book() {
        let service = service().await;
        let id = service.save(dto("Dune", "Herbert")).await.unwrap().id.unwrap();

        service.delete(id).await.unwrap();
        assert!(service.find_one(id).await.unwrap().is_none());
    }
}
