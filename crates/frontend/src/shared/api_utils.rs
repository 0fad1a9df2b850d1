//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and fetching paged lists.

use contracts::shared::query::{PagedResult, Query};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/a001/article/list");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Query string for a list request.
///
/// `page`, `limit`, `phrase`, then one `sort=field:dir` per sort column in priority
/// order, then filters: scalars as `key=value`, arrays as a repeated key, objects as
/// JSON text. `null` filters are not sent.
pub fn query_string(query: &Query) -> String {
    let mut params = vec![
        format!("page={}", query.page),
        format!("limit={}", query.limit),
    ];
    if let Some(phrase) = &query.phrase {
        params.push(format!("phrase={}", urlencoding::encode(phrase)));
    }
    for sort in &query.sorts {
        params.push(format!(
            "sort={}",
            urlencoding::encode(&format!("{}:{}", sort.field, sort.direction.as_str()))
        ));
    }
    for (key, value) in &query.filters {
        let key = urlencoding::encode(key);
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items.iter().filter(|item| !item.is_null()) {
                    params.push(format!("{}={}", key, urlencoding::encode(&scalar_text(item))));
                }
            }
            other => params.push(format!("{}={}", key, urlencoding::encode(&scalar_text(other)))),
        }
    }
    params.join("&")
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Fetch one page of a list endpoint
pub async fn fetch_page<T: DeserializeOwned>(
    path: &str,
    query: &Query,
) -> Result<PagedResult<T>, String> {
    let url = format!("{}?{}", api_url(path), query_string(query));

    let response = Request::get(&url)
        .header("Cache-Control", "no-cache, no-store, must-revalidate")
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch {}: {}", path, response.status()));
    }

    response
        .json::<PagedResult<T>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::query::{Filters, QueryState, SelectOption, SortField};
    use serde_json::json;

    #[test]
    fn test_query_string() {
        let state = QueryState {
            page: 2,
            limit: 20,
            phrase: Some("кардио & co".to_string()),
            sorts: vec![SortField::desc("published_at"), SortField::asc("title")],
            filters: Some(
                Filters::new()
                    .with("category_id", SelectOption::new("Cat", 42))
                    .with(
                        "tag",
                        vec![SelectOption::new("A", "a"), SelectOption::new("B", "b")],
                    )
                    .with("archived_at", json!(null)),
            ),
        };

        assert_eq!(
            query_string(&state.query()),
            "page=2&limit=20&phrase=%D0%BA%D0%B0%D1%80%D0%B4%D0%B8%D0%BE%20%26%20co\
             &sort=published_at%3Adesc&sort=title%3Aasc&category_id=42&tag=a&tag=b"
        );
    }

    #[test]
    fn test_query_string_minimal() {
        let query = QueryState::default().query();
        assert_eq!(query_string(&query), "page=1&limit=10");
    }
}
