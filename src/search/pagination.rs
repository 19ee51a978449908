//! Pagination / 分页计算

use serde::Serialize;

/// Pagination window for one request / 单次请求的分页窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub total_count: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub page_size: u32,
    pub offset: u64,
}

/// One element of the page link bar / 页码栏元素
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    /// Previous page link, `None` when on the first page / 上一页
    Previous(Option<u64>),
    /// Link to another page / 其他页
    Page(u64),
    /// The current page, not a link / 当前页
    Current(u64),
    /// Skipped pages marker / 省略号
    Gap,
    /// Next page link, `None` when on the last page / 下一页
    Next(Option<u64>),
}

impl PageWindow {
    /// Compute total pages, clamp the requested page and derive the offset / 计算分页
    ///
    /// Total pages is never below 1 so an empty result still renders "page 1 of 1".
    pub fn compute(total_count: u64, requested_page: u64, page_size: u32) -> Self {
        let size = u64::from(page_size.max(1));
        let total_pages = total_count.div_ceil(size).max(1);
        let current_page = requested_page.clamp(1, total_pages);
        Self {
            total_count,
            total_pages,
            current_page,
            page_size: page_size.max(1),
            offset: (current_page - 1) * size,
        }
    }

    pub fn has_multiple_pages(&self) -> bool {
        self.total_pages > 1
    }

    /// Build the page link bar: `range` pages either side of the current one,
    /// plus first/last pages and gap markers when the window does not reach them.
    pub fn links(&self, range: u64) -> Vec<PageLink> {
        let page = self.current_page;
        let total = self.total_pages;
        let start = page.saturating_sub(range).max(1);
        let end = (page + range).min(total);

        let mut links = Vec::new();
        links.push(PageLink::Previous((page > 1).then(|| page - 1)));

        if start > 1 {
            links.push(PageLink::Page(1));
            if start > 2 {
                links.push(PageLink::Gap);
            }
        }

        for i in start..=end {
            if i == page {
                links.push(PageLink::Current(i));
            } else {
                links.push(PageLink::Page(i));
            }
        }

        if end < total {
            if end + 1 < total {
                links.push(PageLink::Gap);
            }
            links.push(PageLink::Page(total));
        }

        links.push(PageLink::Next((page < total).then(|| page + 1)));
        links
    }
}
