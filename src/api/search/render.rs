//! HTML rendering of a search outcome / 搜索结果页面渲染

use std::fmt::Write;

use docsearch_backend::config::SiteConfig;
use docsearch_backend::search::snippet::escape_html;
use docsearch_backend::search::{PageLink, PageWindow, SearchOutcome, SearchResultEntry};
use docsearch_backend::utils::build_page_href;

/// Format a count with thousands separators: 12345 -> "12,345" / 千位分隔
fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Render the full search page / 渲染搜索页面
pub fn render_search_page(site: &SiteConfig, outcome: &SearchOutcome, link_range: u64) -> String {
    let title = escape_html(&site.title);
    let query = escape_html(&outcome.query);

    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    let _ = writeln!(html, "<title>{}</title>", title);
    html.push_str("</head>\n<body>\n<main>\n");
    let _ = writeln!(html, "<h1>{}</h1>", title);

    let _ = writeln!(
        html,
        "<form method=\"get\" action=\"/search\" class=\"search-form\" role=\"search\">\
         <label for=\"search-input\" class=\"sr-only\">Search Documents</label>\
         <input type=\"text\" id=\"search-input\" name=\"q\" placeholder=\"Enter search terms...\" value=\"{}\">\
         <input type=\"submit\" value=\"Search\"></form>",
        query
    );

    if outcome.searched() {
        let _ = writeln!(
            html,
            "<div class=\"query-explanation\">Search mode: {}</div>",
            escape_html(&outcome.explanation)
        );

        match (outcome.error, outcome.window) {
            (Some(failure), _) => {
                let _ = writeln!(html, "<p class=\"error-message\">{}</p>", failure.user_message());
            }
            (None, Some(window)) if window.total_count > 0 => {
                let _ = writeln!(
                    html,
                    "<p class=\"results-info\">Found {} results for \"<strong>{}</strong>\". \
                     Showing page {} of {}.</p>",
                    format_count(window.total_count),
                    query,
                    window.current_page,
                    window.total_pages
                );
                for entry in &outcome.results {
                    render_entry(&mut html, entry);
                }
                if window.has_multiple_pages() {
                    render_pagination(&mut html, &outcome.query, &window, link_range);
                }
            }
            _ => {
                let _ = writeln!(
                    html,
                    "<p class=\"no-results\">No documents found matching \"<strong>{}</strong>\". \
                     Try different keywords?</p>",
                    query
                );
            }
        }
    } else {
        html.push_str("<p>Enter terms above to search the document archive.</p>\n");
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_entry(html: &mut String, entry: &SearchResultEntry) {
    let _ = writeln!(
        html,
        "<div class=\"result\">\
         <div class=\"result-links\">\
         <div><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Document {} : Page {} (Mobile Viewer)</a></div>\
         <div><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">View Original Source</a></div>\
         </div>\
         <div class=\"snippet\">{}</div>\
         </div>",
        escape_html(&entry.viewer_url),
        escape_html(&entry.document_id),
        entry.page_number,
        escape_html(&entry.source_url),
        // Already escaped and highlighted
        entry.snippet
    );
}

fn render_pagination(html: &mut String, query: &str, window: &PageWindow, link_range: u64) {
    let href = |page: u64| escape_html(&build_page_href(query, page));

    html.push_str("<nav class=\"pagination\" aria-label=\"Search Results Pages\">\n");
    for link in window.links(link_range) {
        let _ = match link {
            PageLink::Previous(Some(page)) => {
                writeln!(html, "<a href=\"{}\">&laquo; Previous</a>", href(page))
            }
            PageLink::Previous(None) => {
                writeln!(html, "<span class=\"disabled\">&laquo; Previous</span>")
            }
            PageLink::Page(page) => writeln!(
                html,
                "<a href=\"{}\" aria-label=\"Page {}\">{}</a>",
                href(page),
                page,
                page
            ),
            PageLink::Current(page) => writeln!(
                html,
                "<span class=\"active\" aria-current=\"page\">{}</span>",
                page
            ),
            PageLink::Gap => writeln!(html, "<span class=\"disabled\">...</span>"),
            PageLink::Next(Some(page)) => {
                writeln!(html, "<a href=\"{}\">Next &raquo;</a>", href(page))
            }
            PageLink::Next(None) => writeln!(html, "<span class=\"disabled\">Next &raquo;</span>"),
        };
    }
    html.push_str("</nav>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsearch_backend::search::Strategy;

    fn outcome(query: &str, total: u64, page: u64) -> SearchOutcome {
        SearchOutcome {
            query: query.to_string(),
            strategy: Some(Strategy::Boolean),
            explanation: "Boolean Mode (all terms required)".to_string(),
            window: Some(PageWindow::compute(total, page, 25)),
            results: Vec::new(),
            error: None,
        }
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_pagination_preserves_query() {
        let html = render_search_page(&SiteConfig::default(), &outcome("warren report", 500, 10), 2);
        assert!(html.contains("<span class=\"active\" aria-current=\"page\">10</span>"));
        assert!(html.contains("href=\"?q=warren%20report&amp;page=9\""));
        assert!(html.contains("href=\"?q=warren%20report&amp;page=20\""));
        assert_eq!(html.matches("<span class=\"disabled\">...</span>").count(), 2);
    }

    #[test]
    fn test_single_page_has_no_pagination() {
        let html = render_search_page(&SiteConfig::default(), &outcome("oswald", 3, 1), 2);
        assert!(html.contains("Found 3 results"));
        assert!(!html.contains("class=\"pagination\""));
    }
}
