//! Snippet generation and term highlighting / 摘要生成与关键词高亮
//!
//! A snippet is a window of plain text starting shortly before the first
//! occurrence of any search term. Text is HTML-escaped segment by segment
//! before `<strong>` markup is inserted around matches, so markup coming from
//! the page text can never leak into the output and entities are never split.

use once_cell::sync::Lazy;
use regex::Regex;

/// Tag-like sequences and HTML comments / 标签与注释
static MARKUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z!?][^>]*>").unwrap());

const ELLIPSIS_PREFIX: &str = "... ";
const ELLIPSIS_SUFFIX: &str = " ...";

/// Remove embedded markup, keeping the text content / 去除嵌入的标记
pub fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, "").into_owned()
}

/// Escape text for HTML output / HTML 转义
pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// Byte offset of the `char_index`-th character / 字符下标转字节偏移
fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Build a case-insensitive matcher for any of the terms / 构建大小写不敏感的匹配器
///
/// Longer terms are tried first so overlapping terms highlight the longest match.
fn build_matcher(terms: &[String]) -> Option<Regex> {
    let mut parts: Vec<&str> = terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if parts.is_empty() {
        return None;
    }
    parts.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    parts.dedup();

    let pattern = format!(
        "(?i)(?:{})",
        parts
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|")
    );

    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!("Snippet highlighting disabled, term pattern rejected: {}", e);
            None
        }
    }
}

/// Builds highlighted snippets for one request's search terms / 摘要构建器
#[derive(Debug, Clone)]
pub struct SnippetBuilder {
    matcher: Option<Regex>,
    length: usize,
    context_before: usize,
}

impl SnippetBuilder {
    /// `terms` are the original whitespace-split query terms, before any
    /// operator stripping or length filtering.
    pub fn new(terms: &[String], length: usize, context_before: usize) -> Self {
        Self {
            matcher: build_matcher(terms),
            length,
            context_before,
        }
    }

    /// Character offset of the earliest term occurrence / 最早匹配位置（字符）
    fn first_match(&self, plain: &str) -> Option<usize> {
        let m = self.matcher.as_ref()?.find(plain)?;
        Some(plain[..m.start()].chars().count())
    }

    /// Character index the snippet window starts at / 窗口起点（字符）
    fn window_start(&self, plain: &str) -> usize {
        let Some(pos) = self.first_match(plain) else {
            return 0;
        };
        let start = pos.saturating_sub(self.context_before);
        if start == 0 {
            return 0;
        }
        // Begin on a word boundary: just after the last space before the clamp point
        let head = &plain[..byte_offset(plain, start)];
        match head.rfind(' ') {
            Some(space) => head[..space].chars().count() + 1,
            None => start,
        }
    }

    /// Build the HTML-safe snippet for a page's text / 生成页面摘要
    pub fn build(&self, text: &str) -> String {
        let plain = strip_markup(text);
        let start = self.window_start(&plain);

        let body_start = byte_offset(&plain, start);
        let rest = &plain[body_start..];
        let body_len = byte_offset(rest, self.length);
        let body = &rest[..body_len];
        let truncated = body_start + body_len < plain.len();

        let mut snippet = String::with_capacity(body.len() + 32);
        if start > 0 {
            snippet.push_str(ELLIPSIS_PREFIX);
        }
        snippet.push_str(&self.highlight(body));
        if truncated {
            snippet.push_str(ELLIPSIS_SUFFIX);
        }
        snippet
    }

    /// Escape `text` and wrap every term occurrence in `<strong>` / 转义并高亮
    ///
    /// Matched text keeps its original casing.
    pub fn highlight(&self, text: &str) -> String {
        let Some(re) = &self.matcher else {
            return escape_html(text);
        };

        let mut out = String::with_capacity(text.len() + 32);
        let mut last = 0;
        for m in re.find_iter(text) {
            out.push_str(&escape_html(&text[last..m.start()]));
            out.push_str("<strong>");
            out.push_str(&escape_html(m.as_str()));
            out.push_str("</strong>");
            last = m.end();
        }
        out.push_str(&escape_html(&text[last..]));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(query: &str) -> Vec<String> {
        query.split_whitespace().map(str::to_string).collect()
    }

    fn builder(query: &str) -> SnippetBuilder {
        SnippetBuilder::new(&terms(query), 240, 60)
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(strip_markup("a<!-- hidden\ncomment -->b"), "ab");
        // A bare comparison is not a tag
        assert_eq!(strip_markup("x < y and y > z"), "x < y and y > z");
    }

    #[test]
    fn test_highlight_preserves_case() {
        let b = builder("oswald");
        assert_eq!(
            b.highlight("Lee Harvey OSWALD and Oswald"),
            "Lee Harvey <strong>OSWALD</strong> and <strong>Oswald</strong>"
        );
    }

    #[test]
    fn test_escape_before_highlight() {
        let b = builder("<script> a&b");
        let out = b.highlight("x <script>alert(1)</script> and A&B");
        assert_eq!(
            out,
            "x <strong>&lt;script&gt;</strong>alert(1)&lt;/script&gt; and <strong>A&amp;B</strong>"
        );
        assert!(!out.contains("<script>"));
    }

    #[test]
    fn test_highlight_never_splits_entities() {
        // "amp" must not match inside the escaped "&amp;"
        let b = builder("amp");
        assert_eq!(b.highlight("R&D camp"), "R&amp;D c<strong>amp</strong>");
    }

    #[test]
    fn test_longest_term_wins() {
        let b = builder("ken kennedy");
        assert_eq!(b.highlight("Kennedy"), "<strong>Kennedy</strong>");
    }

    #[test]
    fn test_no_match_returns_head_unhighlighted() {
        let text = "word ".repeat(100);
        let snippet = builder("oswald").build(&text);
        assert!(!snippet.contains("<strong>"));
        assert!(!snippet.starts_with("..."));
        assert!(snippet.ends_with(" ..."));
        assert_eq!(snippet.trim_end_matches(" ...").chars().count(), 240);
    }

    #[test]
    fn test_short_text_has_no_ellipsis() {
        let snippet = builder("nothing").build("A short page.");
        assert_eq!(snippet, "A short page.");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(builder("oswald").build(""), "");
    }

    #[test]
    fn test_window_starts_on_word_boundary() {
        let text = format!("{}Oswald was here", "alpha beta gamma ".repeat(10));
        let snippet = builder("oswald").build(&text);
        assert!(snippet.starts_with("... "));
        let body = snippet.trim_start_matches("... ");
        // Starts at a whole word from the repeated prefix
        assert!(
            body.starts_with("alpha") || body.starts_with("beta") || body.starts_with("gamma"),
            "{}",
            body
        );
        assert!(body.contains("<strong>Oswald</strong>"));
    }

    #[test]
    fn test_match_near_start_keeps_position_zero() {
        let snippet = builder("report").build("The Warren report was published.");
        assert_eq!(snippet, "The Warren <strong>report</strong> was published.");
    }

    #[test]
    fn test_earliest_term_chooses_window() {
        let text = format!("{} dallas {} oswald", "x".repeat(10), "y ".repeat(200));
        let snippet = builder("oswald dallas").build(&text);
        assert!(!snippet.starts_with("..."));
        assert!(snippet.contains("<strong>dallas</strong>"));
    }

    #[test]
    fn test_multibyte_text() {
        let text = format!("{} Müller sagte", "é".repeat(300));
        let snippet = builder("müller").build(&text);
        assert!(snippet.contains("<strong>Müller</strong>"));
        assert!(snippet.starts_with("... "));
    }

    #[test]
    fn test_markup_in_page_text_is_stripped_then_escaped() {
        let snippet = builder("cia").build("<div>The CIA & FBI</div>");
        assert_eq!(snippet, "The <strong>CIA</strong> &amp; FBI");
    }
}
