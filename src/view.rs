use std::fmt::Write as _;
use std::path::Path;

use thiserror::Error;

use crate::news::SearchResults;

/// Marker in the template where rendered results are inserted.
pub const RESULTS_MARKER: &str = "<!--results-->";
/// Marker in the template for the current query text (search box value).
pub const QUERY_MARKER: &str = "{{query}}";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("template {path} is missing the {marker} marker")]
    MissingMarker { path: String, marker: &'static str },
}

/// The index page template, loaded and validated once at startup. An
/// invalid template must keep the process from starting at all.
#[derive(Debug, Clone)]
pub struct IndexTemplate {
    html: String,
}

impl IndexTemplate {
    pub fn load(path: impl AsRef<Path>) -> Result<IndexTemplate, TemplateError> {
        let path = path.as_ref();
        let html = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&path.display().to_string(), html)
    }

    pub fn parse(path: &str, html: String) -> Result<IndexTemplate, TemplateError> {
        for marker in [QUERY_MARKER, RESULTS_MARKER] {
            if !html.contains(marker) {
                return Err(TemplateError::MissingMarker {
                    path: path.to_string(),
                    marker,
                });
            }
        }
        Ok(IndexTemplate { html })
    }

    /// Renders the page. `None` yields the bare landing page; `Some` fills
    /// in the search box and the result list.
    pub fn render(&self, view: Option<&SearchView>) -> String {
        let query = view.map(|v| v.query.as_str()).unwrap_or_default();
        let results = view.map(render_results).unwrap_or_default();
        self.html
            .replace(QUERY_MARKER, &escape_html(query))
            .replace(RESULTS_MARKER, &results)
    }
}

/// View model for one answered search, built from the client's results.
#[derive(Debug)]
pub struct SearchView {
    pub query: String,
    pub current_page: u32,
    pub total_pages: u32,
    pub results: SearchResults,
}

impl SearchView {
    pub fn new(
        query: String,
        current_page: u32,
        page_size: u32,
        results: SearchResults,
    ) -> SearchView {
        let total_pages = if page_size == 0 {
            0
        } else {
            results.total_results.div_ceil(page_size)
        };
        SearchView {
            query,
            current_page,
            total_pages,
            results,
        }
    }

    pub fn next_page(&self) -> Option<u32> {
        (self.current_page < self.total_pages).then(|| self.current_page + 1)
    }
}

fn render_results(view: &SearchView) -> String {
    let mut out = String::new();

    if view.results.articles.is_empty() {
        let _ = write!(
            out,
            "<p class=\"result-count\">No results found for <em>{}</em>.</p>",
            escape_html(&view.query)
        );
        return out;
    }

    let _ = write!(
        out,
        "<p class=\"result-count\">{} results for <em>{}</em> \
         (page {} of {})</p>",
        view.results.total_results,
        escape_html(&view.query),
        view.current_page,
        view.total_pages
    );

    for article in &view.results.articles {
        let author = article.author.as_deref().unwrap_or("Unknown");
        let description = article.description.as_deref().unwrap_or_default();
        let _ = write!(
            out,
            "<article class=\"news-article\">\
             <h3><a href=\"{url}\" target=\"_blank\" rel=\"noreferrer\">{title}</a></h3>\
             <p class=\"article-meta\">{source} &middot; {author} &middot; {published}</p>\
             <p class=\"article-description\">{description}</p>\
             </article>",
            url = escape_html(&article.url),
            title = escape_html(&article.title),
            source = escape_html(&article.source.name),
            author = escape_html(author),
            published = article.published_at.format("%B %e, %Y"),
            description = escape_html(description),
        );
    }

    if let Some(next) = view.next_page() {
        let _ = write!(
            out,
            "<a class=\"next-page\" href=\"/search?q={}&page={}\">Next page &raquo;</a>",
            urlencoding::encode(&view.query),
            next
        );
    }

    out
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::{Article, ArticleSource};
    use chrono::TimeZone;

    fn template() -> IndexTemplate {
        IndexTemplate::parse(
            "test",
            format!(
                "<html><input value=\"{QUERY_MARKER}\"><main>{RESULTS_MARKER}</main></html>"
            ),
        )
        .unwrap()
    }

    fn article(title: &str) -> Article {
        Article {
            source: ArticleSource {
                id: None,
                name: "The Register".to_string(),
            },
            author: Some("Ada".to_string()),
            title: title.to_string(),
            description: Some("A short description".to_string()),
            url: "https://example.com/story".to_string(),
            url_to_image: None,
            published_at: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            content: None,
        }
    }

    fn results(total: u32, articles: Vec<Article>) -> SearchResults {
        SearchResults {
            status: "ok".to_string(),
            total_results: total,
            articles,
        }
    }

    #[test]
    fn template_without_markers_is_rejected() {
        let err = IndexTemplate::parse("bare", "<html></html>".to_string()).unwrap_err();
        assert!(matches!(err, TemplateError::MissingMarker { .. }));
    }

    #[test]
    fn landing_page_renders_without_a_view() {
        let page = template().render(None);
        assert!(page.contains("<main></main>"));
        assert!(page.contains("value=\"\""));
    }

    #[test]
    fn results_page_includes_article_fields() {
        let view = SearchView::new(
            "rust".to_string(),
            1,
            20,
            results(1, vec![article("Borrow checker news")]),
        );
        let page = template().render(Some(&view));
        assert!(page.contains("Borrow checker news"));
        assert!(page.contains("The Register"));
        assert!(page.contains("Ada"));
        assert!(page.contains("https://example.com/story"));
        assert!(page.contains("value=\"rust\""));
    }

    #[test]
    fn total_pages_rounds_up() {
        let view = SearchView::new("q".to_string(), 1, 20, results(45, vec![]));
        assert_eq!(view.total_pages, 3);
    }

    #[test]
    fn next_page_link_present_until_last_page() {
        let one_article = vec![article("a")];
        let view = SearchView::new("q".to_string(), 2, 20, results(45, one_article.clone()));
        let page = template().render(Some(&view));
        assert!(page.contains("/search?q=q&page=3"));

        let last = SearchView::new("q".to_string(), 3, 20, results(45, one_article));
        let page = template().render(Some(&last));
        assert!(!page.contains("Next page"));
    }

    #[test]
    fn next_page_link_encodes_the_query() {
        let view = SearchView::new(
            "rust & go".to_string(),
            1,
            20,
            results(45, vec![article("a")]),
        );
        let page = template().render(Some(&view));
        assert!(page.contains("/search?q=rust%20%26%20go&page=2"));
    }

    #[test]
    fn user_text_is_html_escaped() {
        let view = SearchView::new("<script>".to_string(), 1, 20, results(0, vec![]));
        let page = template().render(Some(&view));
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }
}
