//! Page request extraction and pagination response headers.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{
        header::{HeaderName, LINK},
        request::Parts,
        HeaderMap, HeaderValue, Uri,
    },
};

use book_db::page::{Order, Pageable, DEFAULT_PAGE_SIZE};

pub const X_TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

/// `page`, `size` and repeated `sort` query parameters.
///
/// Unparsable numbers fall back to their defaults; sort properties are
/// checked later against the entity's columns.
#[derive(Debug, Clone)]
pub struct PageRequest(pub Pageable);

impl<S> FromRequestParts<S> for PageRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parse_pageable(parts.uri.query().unwrap_or_default())))
    }
}

/// Parse a query string into a [`Pageable`].
pub fn parse_pageable(query: &str) -> Pageable {
    let mut page = 0;
    let mut size = DEFAULT_PAGE_SIZE;
    let mut sort = Vec::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "page" => page = value.parse::<i64>().map(|p| p.max(0) as u64).unwrap_or(0),
            "size" => {
                size = value
                    .parse::<i64>()
                    .ok()
                    .filter(|s| *s > 0)
                    .map(|s| s as u64)
                    .unwrap_or(DEFAULT_PAGE_SIZE)
            }
            "sort" => sort.extend(Order::parse_all(&value)),
            _ => {}
        }
    }

    Pageable::new(page, size, sort)
}

/// `X-Total-Count` plus a `Link` header with next/prev/last/first relations.
pub fn pagination_headers(uri: &Uri, pageable: &Pageable, total: u64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(X_TOTAL_COUNT, HeaderValue::from(total));

    let page = pageable.page;
    let total_pages = pageable.total_pages(total);
    let last_page = total_pages.saturating_sub(1);

    let mut links = Vec::with_capacity(4);
    if page + 1 < total_pages {
        links.push(page_link(uri, page + 1, pageable.size, "next"));
    }
    if page > 0 {
        links.push(page_link(uri, page - 1, pageable.size, "prev"));
    }
    links.push(page_link(uri, last_page, pageable.size, "last"));
    links.push(page_link(uri, 0, pageable.size, "first"));

    match HeaderValue::from_str(&links.join(",")) {
        Ok(value) => {
            headers.insert(LINK, value);
        }
        Err(err) => tracing::warn!(%uri, %err, "skipping unrepresentable Link header"),
    }

    headers
}

fn page_link(uri: &Uri, page: u64, size: u64, rel: &str) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(existing) = uri.query() {
        for (key, value) in form_urlencoded::parse(existing.as_bytes()) {
            if key != "page" && key != "size" {
                query.append_pair(&key, &value);
            }
        }
    }
    query.append_pair("page", &page.to_string());
    query.append_pair("size", &size.to_string());

    format!("<{}?{}>; rel=\"{}\"", uri.path(), query.finish(), rel)
}
