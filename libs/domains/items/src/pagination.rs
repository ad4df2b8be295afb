//! Page arithmetic for item listings

use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const DEFAULT_MAX_PAGE_SIZE: u64 = 100;

/// Largest page, limit or offset handed to a backend; both drivers bind
/// these as signed 64-bit integers
pub const MAX_PAGING_VALUE: u64 = i64::MAX as u64;

/// Requested page, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Zero values fall back to the defaults; larger values are clamped to
    /// [`MAX_PAGING_VALUE`]
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page.min(MAX_PAGING_VALUE) },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit.min(MAX_PAGING_VALUE) },
        }
    }

    /// Coerce raw query-string values.
    ///
    /// Leading digits are taken (`"3abc"` is 3); anything that does not
    /// start with a positive integer uses the default.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(
            page.and_then(leading_integer).unwrap_or(0),
            limit.and_then(leading_integer).unwrap_or(0),
        )
    }

    pub fn capped(self, max_page_size: u64) -> Self {
        Self {
            page: self.page,
            limit: self.limit.min(max_page_size.max(1)),
        }
    }

    /// Number of items to skip, at most [`MAX_PAGING_VALUE`]
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .min(MAX_PAGING_VALUE)
    }
}

/// Parse the leading integer of `raw`, `None` unless it is positive
fn leading_integer(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 || negative {
        return None;
    }

    let value = digits[..end].bytes().fold(0u64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
    });
    (value > 0).then_some(value)
}

/// Pagination metadata returned alongside a page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Pagination {
    pub page: u64,
    /// Effective page size, after capping
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl Pagination {
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total,
            pages: total.div_ceil(request.limit),
        }
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}
