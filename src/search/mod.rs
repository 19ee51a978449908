//! Search module - decides how to query the full-text store and shapes results / 搜索模块
//!
//! Architecture principles / 架构原则：
//! - Indexing, matching and ranking belong to the database (MySQL FULLTEXT)
//! - This module chooses the query mode, pages through matches and builds snippets
//! - Call direction: API → SearchService → FullTextStore (unidirectional) / 调用方向
//!
//! Query modes / 查询模式：
//! - Boolean mode: every term at least `min_word_len` long is mandatory
//! - LIKE fallback: every term is too short for the full-text index
//! - Natural language mode: operator-only input, kept as a safety net

pub mod db_store;
pub mod pagination;
pub mod service;
pub mod snippet;
pub mod store;
pub mod strategy;

pub use db_store::MySqlStore;
pub use pagination::{PageLink, PageWindow};
pub use service::{SearchFailure, SearchOutcome, SearchRequest, SearchResultEntry, SearchService};
pub use snippet::SnippetBuilder;
pub use store::{FullTextStore, PageRow, StoreError};
pub use strategy::{select_strategy, Strategy, StrategyDecision};
