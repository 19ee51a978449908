use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use std::sync::Arc;

use docsearch_backend::search::SearchOutcome;

use super::render::render_search_page;
use super::types::SearchParams;
use crate::api::ApiResponse;
use crate::state::AppState;

/// GET /search - HTML result page / 搜索结果页面
pub async fn search_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let request = params.to_request();
    let outcome = state.search.search(&request).await;
    let range = state.search.config().page_link_range;
    Html(render_search_page(&state.site, &outcome, range))
}

/// GET /api/search - same outcome as JSON / 搜索接口
pub async fn search_api(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<ApiResponse<SearchOutcome>> {
    let request = params.to_request();
    let outcome = state.search.search(&request).await;
    let failure = outcome.error;
    match failure {
        Some(failure) => Json(ApiResponse::partial(outcome, 500, failure.user_message())),
        None => Json(ApiResponse::success(outcome)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use docsearch_backend::config::{LinkConfig, SearchConfig, SiteConfig};
    use docsearch_backend::search::{
        FullTextStore, PageRow, SearchService, StoreError, StrategyDecision,
    };

    struct CannedStore {
        total: u64,
        rows: Vec<PageRow>,
        fail: bool,
    }

    #[async_trait]
    impl FullTextStore for CannedStore {
        async fn count(&self, _decision: &StrategyDecision) -> Result<u64, StoreError> {
            if self.fail {
                return Err(StoreError::from(sqlx::Error::Protocol(
                    "You have an error in your SQL syntax".into(),
                )));
            }
            Ok(self.total)
        }

        async fn fetch_page(
            &self,
            _decision: &StrategyDecision,
            _limit: u32,
            _offset: u64,
        ) -> Result<Vec<PageRow>, StoreError> {
            Ok(self.rows.clone())
        }
    }

    fn app(total: u64, rows: Vec<PageRow>, fail: bool) -> axum::Router {
        let store = Arc::new(CannedStore { total, rows, fail });
        let state = Arc::new(AppState {
            search: SearchService::new(store, SearchConfig::default(), LinkConfig::default()),
            site: SiteConfig::default(),
        });
        crate::api::routes(state)
    }

    fn page(text: &str) -> PageRow {
        PageRow {
            document_id: "104-10004-10143".to_string(),
            original_url: Some("https://www.archives.gov/files/104-10004-10143.pdf".to_string()),
            page_number: 7,
            text: Some(text.to_string()),
            relevance: 3.0,
        }
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_search_page_renders_results() {
        let (status, body) = get(
            app(30, vec![page("Oswald & Ruby in Mexico City")], false),
            "/search?q=oswald&page=2",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Boolean Mode (all terms required)"));
        assert!(body.contains("Found 30 results"));
        assert!(body.contains("Showing page 2 of 2."));
        assert!(body.contains("<strong>Oswald</strong> &amp; Ruby in Mexico City"));
        assert!(body.contains("#page=7"));
        assert!(body.contains("?q=oswald&amp;page=1"));
    }

    #[tokio::test]
    async fn test_search_page_without_query() {
        let (status, body) = get(app(5, vec![], false), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Enter terms above to search"));
        assert!(!body.contains("Search mode:"));
    }

    #[tokio::test]
    async fn test_search_page_escapes_query() {
        let (_, body) = get(app(0, vec![], false), "/search?q=%3Cscript%3Ealert%3C%2Fscript%3E").await;
        assert!(!body.contains("<script>"));
        assert!(body.contains("&lt;script&gt;"));
        assert!(body.contains("No documents found matching"));
    }

    #[tokio::test]
    async fn test_search_page_hides_driver_errors() {
        let (status, body) = get(app(0, vec![], true), "/search?q=oswald").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Sorry, there was an error processing your request."));
        assert!(!body.contains("SQL syntax"));
    }

    #[tokio::test]
    async fn test_search_api_json() {
        let (status, body) = get(
            app(1, vec![page("The CIA file")], false),
            "/api/search?q=cia&page=abc",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["code"], 200);
        assert_eq!(json["data"]["strategy"], "boolean");
        assert_eq!(json["data"]["window"]["current_page"], 1);
        assert_eq!(json["data"]["results"][0]["snippet"], "The <strong>CIA</strong> file");
    }

    #[tokio::test]
    async fn test_search_api_failure_message_is_generic() {
        let (_, body) = get(app(0, vec![], true), "/api/search?q=oswald").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["code"], 500);
        assert_eq!(json["data"]["error"], "count");
        assert!(!body.contains("SQL syntax"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = get(app(0, vec![], false), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"ok\""));
    }
}
