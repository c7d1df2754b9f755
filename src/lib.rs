pub mod api;
pub mod config;
pub mod news;
pub mod view;

use news::NewsClient;
use view::IndexTemplate;

/// Everything the request handlers share. Built once in the bootstrap and
/// read-only afterwards; handlers receive it behind an `Arc` via axum state.
pub struct AppState {
    pub news: NewsClient,
    pub template: IndexTemplate,
}
