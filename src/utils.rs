//! Request and link helper functions / 请求与链接工具函数

use crate::config::LinkConfig;

/// Parse the `page` query parameter leniently / 宽松解析页码参数
///
/// Reads an optional sign followed by leading digits ("3abc" -> 3); anything
/// unparsable counts as 0. The result is clamped to at least 1.
pub fn parse_page_param(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 1;
    };
    let raw = raw.trim();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if negative || end == 0 {
        return 1;
    }
    // Overflowing values saturate at the top, later clamping handles them
    digits[..end].parse::<u64>().unwrap_or(u64::MAX).max(1)
}

/// Viewer link opening the document PDF at a page / PDF 查看器链接
///
/// `/pdfjs/web/viewer.html?file=%2Fdocs%2F<id>.pdf#page=<n>`
pub fn build_viewer_url(links: &LinkConfig, document_id: &str, page_number: i64) -> String {
    let file = format!("{}{}.pdf", links.documents_path, document_id);
    format!(
        "{}?file={}#page={}",
        links.viewer_path,
        urlencoding::encode(&file),
        page_number
    )
}

/// Original source link with a page anchor / 原始来源链接
pub fn build_source_url(original_url: &str, page_number: i64) -> String {
    format!("{}#page={}", original_url, page_number)
}

/// Query string for a result page that keeps `q` / 保留查询词的分页链接
pub fn build_page_href(query: &str, page: u64) -> String {
    format!("?q={}&page={}", urlencoding::encode(query), page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_param() {
        assert_eq!(parse_page_param(None), 1);
        assert_eq!(parse_page_param(Some("")), 1);
        assert_eq!(parse_page_param(Some("abc")), 1);
        assert_eq!(parse_page_param(Some("0")), 1);
        assert_eq!(parse_page_param(Some("-4")), 1);
        assert_eq!(parse_page_param(Some("7")), 7);
        assert_eq!(parse_page_param(Some("+7")), 7);
        assert_eq!(parse_page_param(Some(" 3abc")), 3);
        assert_eq!(parse_page_param(Some("99999999999999999999999")), u64::MAX);
    }

    #[test]
    fn test_build_viewer_url() {
        let links = LinkConfig::default();
        assert_eq!(
            build_viewer_url(&links, "104-10004-10143", 3),
            "/pdfjs/web/viewer.html?file=%2Fjfk_documents_original%2F104-10004-10143.pdf#page=3"
        );
    }

    #[test]
    fn test_build_source_url() {
        assert_eq!(
            build_source_url("https://www.archives.gov/files/doc.pdf", 12),
            "https://www.archives.gov/files/doc.pdf#page=12"
        );
    }

    #[test]
    fn test_build_page_href_encodes_query() {
        assert_eq!(build_page_href("lee & oswald", 2), "?q=lee%20%26%20oswald&page=2");
    }
}
