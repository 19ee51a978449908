use docsearch_backend::config::SiteConfig;
use docsearch_backend::search::SearchService;

/// Shared, read-only application state / 应用状态
pub struct AppState {
    pub search: SearchService,
    pub site: SiteConfig,
}
