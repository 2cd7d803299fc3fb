use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Rows shown per page on the HTML list views.
pub const PAGE_SIZE: u32 = 10;

/// `?page=` as sent by the browser. Anything unparsable falls back to the
/// first page, `last` and out-of-range numbers go to the last page.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PaginationParams {
    pub page: Option<String>,
}

impl PaginationParams {
    pub fn resolve(&self, total_items: i64) -> PaginationMeta {
        let total_pages = PaginationMeta::pages_for(total_items, PAGE_SIZE);
        let page = match self.page.as_deref().map(str::trim) {
            Some("last") => total_pages,
            Some(raw) => match raw.parse::<u32>() {
                Ok(0) | Err(_) => 1,
                Ok(n) => n.min(total_pages),
            },
            None => 1,
        };

        PaginationMeta {
            page,
            page_size: PAGE_SIZE,
            total_items,
            total_pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(page: u32, page_size: u32, total_items: i64) -> Self {
        Self {
            page,
            page_size,
            total_items,
            total_pages: Self::pages_for(total_items, page_size),
        }
    }

    /// An empty collection still renders one (empty) page.
    fn pages_for(total_items: i64, page_size: u32) -> u32 {
        let total = u32::try_from(total_items.max(0)).unwrap_or(u32::MAX);
        total.div_ceil(page_size).max(1)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
