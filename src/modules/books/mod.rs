//! Book catalogue: entity, persistence, service and `/api/books` routes.

pub mod mapper;
pub mod models;
pub mod repository;
pub mod routes;
pub mod row_mapper;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;

use book_db::Database;
use book_http::AlertHeaders;
use book_kernel::{settings::Settings, InitCtx, Migration, Module};

use repository::BookRepository;
use routes::BooksState;
use service::BookService;

pub struct BooksModule {
    state: BooksState,
}

impl BooksModule {
    pub fn new(database: &Database, settings: &Settings) -> anyhow::Result<Self> {
        let repository = BookRepository::new(database.clone());
        Ok(Self {
            state: BooksState {
                service: BookService::new(repository),
                alerts: AlertHeaders::new(&settings.application.name)?,
            },
        })
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = json!({
            "description": "Error",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let book = json!({
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/Book" }
                }
            }
        });
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        }]);

        Some(json!({
            "paths": {
                "": {
                    "get": {
                        "summary": "List a page of books",
                        "tags": ["Books"],
                        "parameters": [
                            { "name": "page", "in": "query", "schema": { "type": "integer" } },
                            { "name": "size", "in": "query", "schema": { "type": "integer" } },
                            { "name": "sort", "in": "query", "schema": { "type": "string" } }
                        ],
                        "responses": {
                            "200": {
                                "description": "Books on the requested page",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "400": error
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": book,
                        "responses": {
                            "201": { "description": "Created", "content": book["content"] },
                            "400": error
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "responses": {
                            "200": { "description": "The book", "content": book["content"] },
                            "404": { "description": "No book with this id" }
                        }
                    },
                    "put": {
                        "summary": "Replace a book",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "requestBody": book,
                        "responses": {
                            "200": { "description": "Updated", "content": book["content"] },
                            "400": error
                        }
                    },
                    "patch": {
                        "summary": "Merge the supplied fields into a book",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "requestBody": {
                            "content": {
                                "application/merge-patch+json": {
                                    "schema": { "$ref": "#/components/schemas/Book" }
                                }
                            }
                        },
                        "responses": {
                            "200": { "description": "Updated", "content": book["content"] },
                            "400": error,
                            "404": error
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "responses": {
                            "204": { "description": "Deleted" }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "title": { "type": "string", "minLength": 5, "maxLength": 20 },
                            "description": { "type": "string" },
                            "author": { "type": "string" }
                        },
                        "required": ["title", "author"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE book (
                    id          INTEGER PRIMARY KEY AUTOINCREMENT,
                    title       VARCHAR(20)  NOT NULL CHECK (length(title) <= 20),
                    description VARCHAR(255),
                    author      VARCHAR(255) NOT NULL
                );
                "#,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

pub fn create_module(database: &Database, settings: &Settings) -> anyhow::Result<Arc<dyn Module>> {
    Ok(Arc::new(BooksModule::new(database, settings)?))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::test_support::repository;

    async fn module() -> BooksModule {
        let database = Database::connect(&book_kernel::settings::DatabaseSettings::in_memory())
            .await
            .unwrap();
        BooksModule::new(&database, &Settings::default()).unwrap()
    }

    #[tokio::test]
    async fn contributes_book_table_migration() {
        let migrations = module().await.migrations();
        assert_eq!(migrations.len(), 1);
        assert_eq!(migrations[0].id, "001_init");
        assert!(migrations[0].up.contains("CREATE TABLE book"));
    }

    #[tokio::test]
    async fn openapi_fragment_documents_both_paths() {
        let spec = module().await.openapi().unwrap();
        assert!(spec["paths"][""]["post"].is_object());
        assert!(spec["paths"]["/{id}"]["patch"].is_object());
        assert_eq!(spec["components"]["schemas"]["Book"]["properties"]["title"]["maxLength"], 20);
    }

    #[tokio::test]
    async fn migrated_schema_accepts_rows() {
        let repo = repository().await;
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn invalid_application_name_fails_construction() {
        let database = Database::connect(&book_kernel::settings::DatabaseSettings::in_memory())
            .await
            .unwrap();
        let mut settings = Settings::default();
        settings.application.name = "book app".into();
        assert!(BooksModule::new(&database, &settings).is_err());
    }
}
