//! Search request flow / 搜索请求流程
//!
//! parse input -> select strategy -> count -> paginate -> fetch page -> snippets

use serde::Serialize;
use std::sync::Arc;

use super::pagination::PageWindow;
use super::snippet::SnippetBuilder;
use super::store::{FullTextStore, PageRow, StoreError};
use super::strategy::{select_strategy, split_terms, Strategy, NO_QUERY_EXPLANATION};
use crate::config::{LinkConfig, SearchConfig};
use crate::utils::{build_source_url, build_viewer_url};

/// One search request / 搜索请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Trimmed raw query / 去除首尾空白的原始查询
    pub query: String,
    /// Requested page, at least 1 / 请求的页码
    pub page: u64,
}

impl SearchRequest {
    pub fn new(query: &str, page: u64) -> Self {
        Self {
            query: query.trim().to_string(),
            page: page.max(1),
        }
    }
}

/// Why a search could not be completed / 搜索失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchFailure {
    /// Store unreachable / 无法连接
    Connection,
    /// Counting matches failed / 统计失败
    Count,
    /// Fetching the result page failed / 获取结果失败
    Fetch,
}

impl SearchFailure {
    /// Generic message safe to show to users / 面向用户的通用提示
    pub fn user_message(&self) -> &'static str {
        match self {
            SearchFailure::Connection => {
                "Sorry, there was an error connecting to the search service."
            }
            SearchFailure::Count | SearchFailure::Fetch => {
                "Sorry, there was an error processing your request. Please try again later."
            }
        }
    }

    fn from_store(err: &StoreError, stage: SearchFailure) -> Self {
        if err.is_connection() {
            SearchFailure::Connection
        } else {
            stage
        }
    }
}

/// One rendered hit / 单条搜索结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultEntry {
    pub document_id: String,
    pub page_number: i64,
    pub viewer_url: String,
    pub source_url: String,
    pub relevance: f64,
    /// HTML-safe snippet with `<strong>` highlights / 已转义并高亮的摘要
    pub snippet: String,
}

/// Outcome of one search request / 搜索结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    /// `None` when no query was entered / 未输入查询时为空
    pub strategy: Option<Strategy>,
    pub explanation: String,
    pub window: Option<PageWindow>,
    pub results: Vec<SearchResultEntry>,
    pub error: Option<SearchFailure>,
}

impl SearchOutcome {
    fn not_searched(query: &str) -> Self {
        Self {
            query: query.to_string(),
            strategy: None,
            explanation: NO_QUERY_EXPLANATION.to_string(),
            window: None,
            results: Vec::new(),
            error: None,
        }
    }

    /// Whether a search was actually run / 是否执行了搜索
    pub fn searched(&self) -> bool {
        self.strategy.is_some()
    }

    pub fn total_count(&self) -> u64 {
        self.window.map(|w| w.total_count).unwrap_or(0)
    }
}

/// Runs searches against a full-text store / 搜索服务
#[derive(Clone)]
pub struct SearchService {
    store: Arc<dyn FullTextStore>,
    config: SearchConfig,
    links: LinkConfig,
}

impl SearchService {
    pub fn new(store: Arc<dyn FullTextStore>, config: SearchConfig, links: LinkConfig) -> Self {
        Self { store, config, links }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run one search / 执行一次搜索
    ///
    /// Never returns an error: store failures end the request with an empty
    /// result list and a [`SearchFailure`]. Nothing is retried.
    pub async fn search(&self, request: &SearchRequest) -> SearchOutcome {
        let Some(decision) = select_strategy(&request.query, self.config.min_word_len) else {
            return SearchOutcome::not_searched(&request.query);
        };

        let mut error = None;

        let total = match self.store.count(&decision).await {
            Ok(total) => total,
            Err(e) => {
                tracing::error!("Error counting results for {:?}: {}", request.query, e);
                error = Some(SearchFailure::from_store(&e, SearchFailure::Count));
                0
            }
        };

        let window = PageWindow::compute(total, request.page, self.config.page_size);
        tracing::debug!(
            "Search {:?}: {} matches, page {}/{}",
            request.query,
            total,
            window.current_page,
            window.total_pages
        );

        let mut results = Vec::new();
        if total > 0 && error.is_none() {
            match self
                .store
                .fetch_page(&decision, window.page_size, window.offset)
                .await
            {
                Ok(rows) => {
                    let snippets = SnippetBuilder::new(
                        &split_terms(&request.query),
                        self.config.snippet_length,
                        self.config.context_before,
                    );
                    results = rows
                        .into_iter()
                        .map(|row| self.to_entry(row, &snippets))
                        .collect();
                }
                Err(e) => {
                    tracing::error!("Error fetching results for {:?}: {}", request.query, e);
                    error = Some(SearchFailure::from_store(&e, SearchFailure::Fetch));
                }
            }
        }

        SearchOutcome {
            query: request.query.clone(),
            strategy: Some(decision.strategy),
            explanation: decision.explanation,
            window: Some(window),
            results,
            error,
        }
    }

    fn to_entry(&self, row: PageRow, snippets: &SnippetBuilder) -> SearchResultEntry {
        let snippet = snippets.build(row.text.as_deref().unwrap_or(""));
        SearchResultEntry {
            viewer_url: build_viewer_url(&self.links, &row.document_id, row.page_number),
            source_url: build_source_url(row.original_url.as_deref().unwrap_or(""), row.page_number),
            document_id: row.document_id,
            page_number: row.page_number,
            relevance: row.relevance,
            snippet,
        }
    }
}
