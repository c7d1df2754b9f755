use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use std::sync::Arc;

use crate::AppState;
use crate::view::SearchView;

use super::models::SearchParams;

pub async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.template.render(None))
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, (StatusCode, String)> {
    let query = params.q.unwrap_or_default();
    let page = match params.page {
        Some(p) if !p.is_empty() => p,
        _ => "1".to_string(),
    };

    tracing::info!(query = %query, page = %page, "search request");

    let results = state
        .news
        .fetch_everything(&query, &page)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "news API call failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    // The page string went to the remote as-is; only the view math needs a
    // number, so an unparsable value falls back to 1.
    let current_page = page.parse().unwrap_or(1);
    let view = SearchView::new(query, current_page, state.news.page_size(), results);

    Ok(Html(state.template.render(Some(&view))))
}
