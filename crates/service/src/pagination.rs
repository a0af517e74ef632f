//! Pagination utilities for service layer
//!
//! Coerces raw `page`/`per_page` request values and derives page metadata.

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub per_page: u64,
}

impl Pagination {
    /// Coerce raw query values. Missing, unparseable or non-positive input
    /// falls back to the default instead of failing the request.
    pub fn from_raw(page: Option<&str>, per_page: Option<&str>) -> Self {
        Self {
            page: positive_or(page, DEFAULT_PAGE),
            per_page: positive_or(per_page, DEFAULT_PER_PAGE),
        }
    }

    /// Clamp to sane defaults and return `(zero_based_page, per_page)`
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { DEFAULT_PAGE } else { self.page };
        let per_page = if self.per_page == 0 { DEFAULT_PER_PAGE } else { self.per_page };
        (page - 1, per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: DEFAULT_PAGE, per_page: DEFAULT_PER_PAGE } }
}

fn positive_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|v| *v >= 1)
        .map(|v| v as u64)
        .unwrap_or(default)
}

/// Position of one page inside a result set of `total_items`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageMeta {
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl PageMeta {
    pub fn new(pagination: Pagination, total_items: u64) -> Self {
        let (idx, per_page) = pagination.normalize();
        Self {
            page: idx + 1,
            per_page,
            total_items,
            total_pages: total_items.div_ceil(per_page),
        }
    }

    /// Next page number, only if that page exists.
    pub fn next_page(&self) -> Option<u64> {
        (self.page < self.total_pages).then_some(self.page + 1)
    }

    /// Previous page number, only if that page exists.
    pub fn previous_page(&self) -> Option<u64> {
        (self.page > 1 && self.page - 1 <= self.total_pages).then_some(self.page - 1)
    }
}
