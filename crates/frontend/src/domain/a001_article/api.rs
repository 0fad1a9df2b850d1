use contracts::domain::a001_article::dto::{ArticleCategoryDto, ArticleListItemDto};
use contracts::shared::query::{PagedResult, Query};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, fetch_page};

/// Fetch one page of articles
pub async fn fetch_articles(query: &Query) -> Result<PagedResult<ArticleListItemDto>, String> {
    fetch_page("/api/a001/article/list", query).await
}

/// Fetch all article categories (filter source)
pub async fn fetch_categories() -> Result<Vec<ArticleCategoryDto>, String> {
    let response = Request::get(&api_url("/api/a001/article/categories"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch categories: {}", response.status()));
    }

    response
        .json::<Vec<ArticleCategoryDto>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
