use serde::Deserialize;

/// Query parameters for `/search`. Both are optional; defaults are applied
/// in the handler (`q` empty, `page` "1").
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<String>,
}
