//! Page window and page metadata arithmetic for list endpoints.

use super::models::PaginationMeta;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 50;
/// Hard cap on page size regardless of what the client asks for
pub const MAX_LIMIT: i64 = 200;

/// Requested page plus its resolved store window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// As requested; not corrected when below 1
    pub page: i64,
    /// Always within 1..=MAX_LIMIT
    pub limit: i64,
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
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page,
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Records to skip; page numbers below 1 clamp to the first window.
    pub fn skip(&self) -> i64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .max(0)
    }

    pub fn meta(&self, total: i64) -> PaginationMeta {
        paginate(total, self.page, self.limit)
    }
}

/// Derive page metadata from a total count.
pub fn paginate(total: i64, page: i64, limit: i64) -> PaginationMeta {
    let total = total.max(0);
    let limit = limit.max(1);
    let total_pages = if total == 0 {
        0
    } else {
        (total + limit - 1) / limit
    };

    PaginationMeta {
        current_page: page,
        total_pages,
        total_transactions: total,
        has_next_page: page < total_pages,
        // An empty result has no neighbouring pages at all
        has_prev_page: total_pages > 0 && page > 1,
        limit,
    }
}
