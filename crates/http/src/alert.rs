//! Entity alert headers attached to successful create/update/delete responses.

use anyhow::Context;
use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Builds `X-{app}-alert` / `X-{app}-params` header pairs.
#[derive(Debug, Clone)]
pub struct AlertHeaders {
    application_name: String,
    alert: HeaderName,
    params: HeaderName,
}

impl AlertHeaders {
    pub fn new(application_name: &str) -> anyhow::Result<Self> {
        let header = |suffix: &str| {
            let name = format!("x-{}-{suffix}", application_name.to_ascii_lowercase());
            HeaderName::try_from(name.as_str())
                .with_context(|| format!("invalid alert header name '{name}'"))
        };

        Ok(Self {
            application_name: application_name.to_string(),
            alert: header("alert")?,
            params: header("params")?,
        })
    }

    pub fn alert(&self, message: &str, param: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        match (HeaderValue::from_str(message), HeaderValue::from_str(param)) {
            (Ok(message), Ok(param)) => {
                headers.insert(self.alert.clone(), message);
                headers.insert(self.params.clone(), param);
            }
            _ => tracing::warn!(alert = message, param, "skipping unrepresentable alert headers"),
        }
        headers
    }

    pub fn entity_creation(&self, entity_name: &str, param: &str) -> HeaderMap {
        self.entity_alert(entity_name, "created", param)
    }

    pub fn entity_update(&self, entity_name: &str, param: &str) -> HeaderMap {
        self.entity_alert(entity_name, "updated", param)
    }

    pub fn entity_deletion(&self, entity_name: &str, param: &str) -> HeaderMap {
        self.entity_alert(entity_name, "deleted", param)
    }

    fn entity_alert(&self, entity_name: &str, action: &str, param: &str) -> HeaderMap {
        let message = format!("{}.{entity_name}.{action}", self.application_name);
        self.alert(&message, param)
    }
}
