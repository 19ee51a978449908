//! MySQL full-text store / MySQL 全文检索存储
//!
//! Queries the `pages` table (FULLTEXT index on `text`) joined with
//! `documents`. User input only ever reaches the database through bind
//! parameters; the only interpolated SQL fragment is the search mode keyword,
//! which comes from [`Strategy`].

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;

use super::store::{FullTextStore, PageRow, StoreError};
use super::strategy::{Strategy, StrategyDecision};
use crate::config::DatabaseConfig;

const SELECT_COLUMNS: &str = r#"
    COALESCE(d.document_id, '') AS document_id,
    d.original_url,
    CAST(COALESCE(p.page_number, 0) AS SIGNED) AS page_number,
    p.text"#;

const FROM_PAGES: &str = "FROM pages p JOIN documents d ON p.document_id = d.id";

/// `MATCH ... AGAINST` modifier for a full-text strategy / 全文检索模式
fn mode_clause(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Boolean => "IN BOOLEAN MODE",
        Strategy::NaturalLanguage | Strategy::Substring => "IN NATURAL LANGUAGE MODE",
    }
}

fn count_sql(strategy: Strategy) -> String {
    if strategy.uses_fulltext() {
        format!(
            "SELECT COUNT(*) {} WHERE MATCH(p.text) AGAINST(? {})",
            FROM_PAGES,
            mode_clause(strategy)
        )
    } else {
        format!("SELECT COUNT(*) {} WHERE p.text LIKE ?", FROM_PAGES)
    }
}

fn select_sql(strategy: Strategy) -> String {
    if strategy.uses_fulltext() {
        format!(
            "SELECT {}, MATCH(p.text) AGAINST(? IN NATURAL LANGUAGE MODE) AS relevance {} \
             WHERE MATCH(p.text) AGAINST(? {}) \
             ORDER BY relevance DESC, p.id ASC LIMIT ? OFFSET ?",
            SELECT_COLUMNS,
            FROM_PAGES,
            mode_clause(strategy)
        )
    } else {
        // LIKE has no relevance measure, every row scores 1
        format!(
            "SELECT {}, 1E0 AS relevance {} \
             WHERE p.text LIKE ? \
             ORDER BY relevance DESC, p.id ASC LIMIT ? OFFSET ?",
            SELECT_COLUMNS, FROM_PAGES
        )
    }
}

/// MySQL-backed store / MySQL 存储
#[derive(Clone)]
pub struct MySqlStore {
    db: MySqlPool,
}

impl MySqlStore {
    /// Use an existing pool / 使用现有连接池
    pub fn new(db: MySqlPool) -> Self {
        Self { db }
    }

    /// Create a lazily connecting pool / 创建懒连接的连接池
    ///
    /// No connection is opened here, so an unreachable database is reported
    /// per request rather than at startup.
    pub fn connect_lazy(config: &DatabaseConfig, url: &str) -> Result<Self, StoreError> {
        let db = MySqlPoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs.max(1)))
            .connect_lazy(url)?;
        Ok(Self { db })
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.db
    }

    /// Close the connection pool / 关闭连接池
    pub async fn close(&self) {
        self.db.close().await;
    }
}

#[async_trait]
impl FullTextStore for MySqlStore {
    async fn count(&self, decision: &StrategyDecision) -> Result<u64, StoreError> {
        let sql = count_sql(decision.strategy);
        let total: i64 = sqlx::query_scalar(&sql)
            .bind(decision.filter.as_str())
            .fetch_one(&self.db)
            .await?;
        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn fetch_page(
        &self,
        decision: &StrategyDecision,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<PageRow>, StoreError> {
        let sql = select_sql(decision.strategy);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let mut query = sqlx::query_as::<_, PageRow>(&sql);
        if decision.strategy.uses_fulltext() {
            query = query.bind(decision.relevance_query.as_str());
        }
        let rows = query
            .bind(decision.filter.as_str())
            .bind(i64::from(limit))
            .bind(offset)
            .fetch_all(&self.db)
            .await?;
        Ok(rows)
    }
}
