//! Full-text store interface / 全文检索存储接口
//!
//! The store owns indexing, matching and ranking. This crate only decides
//! which mode to query it in and how to page through the results.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::strategy::StrategyDecision;

/// Store failure / 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store unreachable (pool, IO, TLS) / 无法连接
    #[error("store connection failed: {0}")]
    Connection(#[source] sqlx::Error),
    /// Query rejected or failed during execution / 查询失败
    #[error("store query failed: {0}")]
    Query(#[source] sqlx::Error),
}

impl StoreError {
    pub fn is_connection(&self) -> bool {
        matches!(self, StoreError::Connection(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Connection(e),
            other => StoreError::Query(other),
        }
    }
}

/// One matching page joined with its document / 匹配的页面行
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct PageRow {
    /// Public filename id of the document / 文档文件名ID
    pub document_id: String,
    pub original_url: Option<String>,
    pub page_number: i64,
    pub text: Option<String>,
    /// Natural language relevance, constant 1 for LIKE fallback / 相关度
    pub relevance: f64,
}

/// Full-text store / 全文检索存储
#[async_trait]
pub trait FullTextStore: Send + Sync {
    /// Count page rows matching the decision's filter / 统计匹配数
    async fn count(&self, decision: &StrategyDecision) -> Result<u64, StoreError>;

    /// Fetch one page of matches, ordered by relevance descending then page
    /// row id ascending / 获取一页结果
    async fn fetch_page(
        &self,
        decision: &StrategyDecision,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<PageRow>, StoreError>;
}
