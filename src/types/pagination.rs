//! Pagination and sorting types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Sort direction. Anything other than a case-insensitive `desc` sorts
/// ascending; unknown values are not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl From<String> for SortOrder {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// List query parameters, uniform across all list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default = "default_include_meta")]
    pub include_meta: bool,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_per_page() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn default_include_meta() -> bool {
    true
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PAGE_SIZE,
            sort_by: None,
            sort_order: SortOrder::Asc,
            include_meta: true,
        }
    }
}

impl ListQuery {
    /// Clamp the raw query values into validated list parameters:
    /// `page >= 1`, `1 <= per_page <= 100`.
    pub fn into_params(self) -> ListParams {
        ListParams {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, MAX_PAGE_SIZE),
            sort_by: self.sort_by,
            sort_order: self.sort_order,
            include_meta: self.include_meta,
        }
    }
}

/// Validated list parameters handed to the services.
#[derive(Debug, Clone)]
pub struct ListParams {
    pub page: u64,
    pub per_page: u64,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
    pub include_meta: bool,
}

impl Default for ListParams {
    fn default() -> Self {
        ListQuery::default().into_params()
    }
}

/// One page of results plus optional counting metadata.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: Option<PageMeta>,
}

/// Pagination metadata spliced into list response envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageMeta {
    pub total: u64,
    pub pages: u64,
    pub page: u64,
    pub per_page: u64,
}

impl PageMeta {
    pub fn new(total: u64, page: u64, per_page: u64) -> Self {
        Self {
            total,
            pages: total.div_ceil(per_page),
            page,
            per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_clamped_to_minimum_one() {
        let params = ListQuery {
            page: 0,
            ..ListQuery::default()
        }
        .into_params();
        assert_eq!(params.page, 1);
    }

    #[test]
    fn test_per_page_clamped_to_range() {
        let params = ListQuery {
            per_page: 0,
            ..ListQuery::default()
        }
        .into_params();
        assert_eq!(params.per_page, 1);

        let params = ListQuery {
            per_page: 500,
            ..ListQuery::default()
        }
        .into_params();
        assert_eq!(params.per_page, 100);
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!(SortOrder::from("desc".to_string()), SortOrder::Desc);
        assert_eq!(SortOrder::from("DESC".to_string()), SortOrder::Desc);
        assert_eq!(SortOrder::from("asc".to_string()), SortOrder::Asc);
        // Unknown values silently sort ascending
        assert_eq!(SortOrder::from("sideways".to_string()), SortOrder::Asc);
        assert_eq!(SortOrder::from(String::new()), SortOrder::Asc);
    }

    #[test]
    fn test_page_meta_counts() {
        let meta = PageMeta::new(25, 1, 10);
        assert_eq!(meta.total, 25);
        assert_eq!(meta.pages, 3);

        let meta = PageMeta::new(0, 1, 10);
        assert_eq!(meta.pages, 0);

        let meta = PageMeta::new(30, 2, 10);
        assert_eq!(meta.pages, 3);
    }
}
