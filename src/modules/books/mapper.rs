//! Conversions between [`Book`] and [`BookDto`].

use super::models::{Book, BookDto};

/// Build an entity from a validated DTO.
pub fn to_entity(dto: BookDto) -> Book {
    Book {
        id: dto.id,
        title: dto.title.unwrap_or_default(),
        description: dto.description,
        author: dto.author.unwrap_or_default(),
    }
}

pub fn to_dto(book: &Book) -> BookDto {
    BookDto {
        id: book.id,
        title: Some(book.title.clone()),
        description: book.description.clone(),
        author: Some(book.author.clone()),
    }
}

/// Merge-patch: every field present in `patch` overwrites the existing value.
///
/// Absent and explicit-null fields both leave the existing value untouched,
/// and the id is never changed.
pub fn partial_update(mut existing: Book, patch: &BookDto) -> Book {
    if let Some(title) = &patch.title {
        existing.title = title.clone();
    }
    if let Some(description) = &patch.description {
        existing.description = Some(description.clone());
    }
    if let Some(author) = &patch.author {
        existing.author = author.clone();
    }
    existing
}
