//! `/api/books` handlers.

use axum::{
    extract::{OriginalUri, State},
    http::{header::LOCATION, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use futures_util::TryStreamExt;

use book_http::{
    pagination_headers, AlertHeaders, AppError, PageRequest, PathParam, Payload, ValidJson,
};

use super::models::BookDto;
use super::service::BookService;

pub const ENTITY_NAME: &str = "book";

#[derive(Clone, Debug)]
pub struct BooksState {
    pub service: BookService,
    pub alerts: AlertHeaders,
}

pub fn router(state: BooksState) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route(
            "/{id}",
            get(get_book)
                .put(update_book)
                .patch(partial_update_book)
                .delete(delete_book),
        )
        .with_state(state)
}

async fn create_book(
    State(state): State<BooksState>,
    ValidJson(dto): ValidJson<BookDto>,
) -> Result<Response, AppError> {
    tracing::debug!(target: "books", ?dto, "REST request to save Book");
    if dto.id.is_some() {
        return Err(AppError::bad_request_alert(
            "A new book cannot already have an ID",
            ENTITY_NAME,
            "idexists",
        ));
    }

    let saved = state.service.save(dto).await?;
    let id = saved.id.map(|id| id.to_string()).unwrap_or_default();

    let mut headers = state.alerts.entity_creation(ENTITY_NAME, &id);
    let location = format!("/api/books/{id}");
    headers.insert(
        LOCATION,
        HeaderValue::from_str(&location).map_err(anyhow::Error::from)?,
    );

    Ok((StatusCode::CREATED, headers, Json(saved)).into_response())
}

async fn update_book(
    State(state): State<BooksState>,
    PathParam(id): PathParam<i64>,
    ValidJson(dto): ValidJson<BookDto>,
) -> Result<Response, AppError> {
    tracing::debug!(target: "books", id, ?dto, "REST request to update Book");
    check_target(&state.service, id, &dto).await?;

    let saved = state.service.update(dto).await?;
    let headers = state.alerts.entity_update(ENTITY_NAME, &id.to_string());
    Ok((headers, Json(saved)).into_response())
}

async fn partial_update_book(
    State(state): State<BooksState>,
    PathParam(id): PathParam<i64>,
    Payload(dto): Payload<BookDto>,
) -> Result<Response, AppError> {
    tracing::debug!(target: "books", id, ?dto, "REST request to partial update Book partially");
    check_target(&state.service, id, &dto).await?;

    match state.service.partial_update(dto).await? {
        Some(saved) => {
            let headers = state.alerts.entity_update(ENTITY_NAME, &id.to_string());
            Ok((headers, Json(saved)).into_response())
        }
        None => Err(AppError::not_found(format!("book {id} not found"))),
    }
}

async fn list_books(
    State(state): State<BooksState>,
    OriginalUri(uri): OriginalUri,
    PageRequest(pageable): PageRequest,
) -> Result<(HeaderMap, Json<Vec<BookDto>>), AppError> {
    tracing::debug!(target: "books", page = pageable.page, size = pageable.size, "REST request to get a page of Books");

    let (total, books) = tokio::try_join!(
        state.service.count_all(),
        state.service.find_all(&pageable).try_collect::<Vec<_>>(),
    )?;

    Ok((pagination_headers(&uri, &pageable, total), Json(books)))
}

async fn get_book(
    State(state): State<BooksState>,
    PathParam(id): PathParam<i64>,
) -> Result<Response, AppError> {
    tracing::debug!(target: "books", id, "REST request to get Book");
    Ok(match state.service.find_one(id).await? {
        Some(book) => Json(book).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

async fn delete_book(
    State(state): State<BooksState>,
    PathParam(id): PathParam<i64>,
) -> Result<Response, AppError> {
    tracing::debug!(target: "books", id, "REST request to delete Book");
    state.service.delete(id).await?;

    let headers = state.alerts.entity_deletion(ENTITY_NAME, &id.to_string());
    Ok((StatusCode::NO_CONTENT, headers).into_response())
}

/// Id gates shared by PUT and PATCH: present, equal to the path id, and stored.
async fn check_target(service: &BookService, id: i64, dto: &BookDto) -> Result<(), AppError> {
    let Some(body_id) = dto.id else {
        return Err(AppError::bad_request_alert("Invalid id", ENTITY_NAME, "idnull"));
    };
    if body_id != id {
        return Err(AppError::bad_request_alert("Invalid ID", ENTITY_NAME, "idinvalid"));
    }
    if !service.exists(id).await? {
        return Err(AppError::bad_request_alert(
            "Entity not found",
            ENTITY_NAME,
            "idnotfound",
        ));
    }
    Ok(())
}
