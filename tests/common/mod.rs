#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use book_app::bootstrap;
use book_kernel::settings::{DatabaseSettings, Settings};

/// In-process client over the fully assembled router and a migrated in-memory database.
pub struct TestApp {
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn error_code(&self) -> &str {
        self.body["error"]["code"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let settings = Settings {
            database: DatabaseSettings::in_memory(),
            ..Settings::default()
        };
        let (database, registry) = bootstrap::assemble(&settings).await.unwrap();
        bootstrap::apply_migrations(&database, &registry).await.unwrap();

        Self {
            router: book_http::build_router(&registry, &settings),
        }
    }

    pub async fn send(&self, method: Method, path: &str, body: Option<(&str, Value)>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        let body = match body {
            Some((content_type, json)) => {
                builder = builder.header(CONTENT_TYPE, content_type);
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, json: Value) -> TestResponse {
        self.send(Method::POST, path, Some(("application/json", json))).await
    }

    pub async fn put(&self, path: &str, json: Value) -> TestResponse {
        self.send(Method::PUT, path, Some(("application/json", json))).await
    }

    pub async fn patch(&self, path: &str, json: Value) -> TestResponse {
        self.send(Method::PATCH, path, Some(("application/merge-patch+json", json)))
            .await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.send(Method::DELETE, path, None).await
    }

    /// Create a book and return its id.
    pub async fn create(&self, title: &str, author: &str) -> i64 {
        let response = self
            .post(
                "/api/books",
                serde_json::json!({"title": title, "description": "AAAAAAAAAA", "author": author}),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["id"].as_i64().unwrap()
    }
}
