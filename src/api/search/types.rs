use serde::Deserialize;

use docsearch_backend::search::SearchRequest;
use docsearch_backend::utils::parse_page_param;

/// `?q=<text>&page=<n>` / 搜索查询参数
///
/// `page` stays a string so malformed values fall back to page 1 instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

impl SearchParams {
    pub fn to_request(&self) -> SearchRequest {
        SearchRequest::new(
            self.q.as_deref().unwrap_or(""),
            parse_page_param(self.page.as_deref()),
        )
    }
}
