//! Query strategy selection / 查询策略选择
//!
//! Decides how raw user input is submitted to the full-text store:
//! - Boolean mode when at least one term reaches the index minimum word length
//! - LIKE fallback when every term is too short for the index
//! - Natural language mode when operator stripping leaves nothing usable

use serde::Serialize;

/// Characters with special meaning in boolean full-text mode / 布尔模式运算符
const BOOLEAN_OPERATORS: &[char] = &['+', '-', '>', '<', '(', ')', '~', '*', '"', '@'];

/// Explanation shown when no query was entered / 未输入查询时的说明
pub const NO_QUERY_EXPLANATION: &str = "No search query entered.";

/// Search strategy / 搜索策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// MATCH ... AGAINST (... IN BOOLEAN MODE), all terms mandatory
    Boolean,
    /// MATCH ... AGAINST (... IN NATURAL LANGUAGE MODE)
    NaturalLanguage,
    /// `text LIKE %query%`
    Substring,
}

impl Strategy {
    /// Whether the store's full-text index is used / 是否使用全文索引
    pub fn uses_fulltext(&self) -> bool {
        !matches!(self, Strategy::Substring)
    }
}

/// Chosen strategy with the strings to submit / 策略及提交的查询串
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyDecision {
    pub strategy: Strategy,
    /// Filter bound into the WHERE clause / WHERE 条件绑定值
    pub filter: String,
    /// Raw query used for natural language relevance scoring / 相关度打分查询
    pub relevance_query: String,
    pub explanation: String,
}

/// Split input on whitespace, dropping empty tokens / 按空白分词
pub fn split_terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_string).collect()
}

/// Remove boolean-mode operator characters from a term / 去除布尔运算符
pub fn strip_operators(term: &str) -> String {
    term.chars().filter(|c| !BOOLEAN_OPERATORS.contains(c)).collect()
}

/// Select the search strategy for a raw query / 为原始查询选择搜索策略
///
/// Returns `None` for empty input: no search is performed, which is distinct
/// from a search with zero results.
pub fn select_strategy(raw: &str, min_word_len: usize) -> Option<StrategyDecision> {
    let query = raw.trim();
    let terms = split_terms(query);
    if terms.is_empty() {
        return None;
    }

    let mut has_short_terms = false;
    let mut boolean_parts = Vec::new();

    for term in &terms {
        if term.chars().count() < min_word_len {
            has_short_terms = true;
            continue;
        }
        let sanitized = strip_operators(term);
        if !sanitized.is_empty() {
            boolean_parts.push(format!("+{}", sanitized));
        }
    }

    let decision = if !boolean_parts.is_empty() {
        let mut explanation = "Boolean Mode (all terms required)".to_string();
        if has_short_terms {
            explanation.push_str(&format!(
                " - Note: terms shorter than {} characters were ignored.",
                min_word_len
            ));
        }
        StrategyDecision {
            strategy: Strategy::Boolean,
            filter: boolean_parts.join(" "),
            relevance_query: query.to_string(),
            explanation,
        }
    } else if has_short_terms {
        StrategyDecision {
            strategy: Strategy::Substring,
            filter: format!("%{}%", query),
            relevance_query: query.to_string(),
            explanation: "LIKE Fallback (due to short terms)".to_string(),
        }
    } else {
        // Every term was made of operators only, e.g. "+++"
        StrategyDecision {
            strategy: Strategy::NaturalLanguage,
            filter: query.to_string(),
            relevance_query: query.to_string(),
            explanation: "Natural Language Search".to_string(),
        }
    };

    tracing::debug!(
        "Search strategy {:?} for {:?}: filter={:?}",
        decision.strategy,
        query,
        decision.filter
    );

    Some(decision)
}
