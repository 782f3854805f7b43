//! Pagination utilities for service layer
//!
//! Page numbers are 1-based. Raw query input is normalised leniently: a
//! missing, non-numeric or zero page number becomes page 1.

/// Upper bound on page size.
pub const MAX_PER_PAGE: u64 = configs::MAX_PAGE_SIZE;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub per_page: u64,
}

impl Pagination {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }.normalize()
    }

    /// Clamp to sane defaults
    pub fn normalize(self) -> Self {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        Self { page, per_page }
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        self.per_page.saturating_mul(self.page.saturating_sub(1))
    }

    /// Number of pages needed to show `count` rows.
    pub fn total_pages(&self, count: u64) -> u64 {
        count.div_ceil(self.per_page)
    }
}

/// Parse a raw `pageNo` query value, defaulting to 1.
pub fn parse_page_no(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1)
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: configs::DEFAULT_PAGE_SIZE } }
}
