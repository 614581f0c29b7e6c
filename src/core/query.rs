//! List query parameters and paginated responses

use super::error::DomainResult;
use super::options::{SearchPagination, SearchSorting};
use serde::{Deserialize, Serialize};

/// Query keys read by [`ListParams`]
pub const PAGING_KEYS: &[&str] = &["skip", "limit", "sort_by", "sort_order"];

/// Paging and sorting parameters shared by every list endpoint
///
/// Domain query structs embed these four fields next to their own filter
/// fields and hand them over through [`ListParams`].
///
/// # Example
/// ```text
/// GET /api/v1/card-statements?skip=20&limit=10&sort_by=close_date&sort_order=desc
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Number of records to skip
    pub skip: Option<i64>,

    /// Maximum number of records to return; `<= 0` means "use the default"
    pub limit: Option<i64>,

    /// Field to sort by
    pub sort_by: Option<String>,

    /// `asc` or `desc`
    pub sort_order: Option<String>,
}

/// Page size limits applied to every list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_limit: i64,
    pub max_limit: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: super::options::DEFAULT_PAGINATION_LIMIT,
            max_limit: 500,
        }
    }
}

impl ListParams {
    /// Resolve the skip/limit window
    pub fn pagination(&self, limits: PageLimits) -> SearchPagination {
        SearchPagination::with_default(
            self.skip.unwrap_or(0),
            self.limit.unwrap_or(limits.default_limit),
            limits.default_limit,
        )
        .capped(limits.max_limit)
    }

    /// Resolve the sort keys
    pub fn sorting(&self) -> DomainResult<SearchSorting> {
        SearchSorting::parse(self.sort_by.as_deref(), self.sort_order.as_deref())
    }
}

/// Paginated response: one page of records plus the total matching count
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// The records in this page
    pub data: Vec<T>,

    /// Number of records matching the filters, ignoring skip/limit
    pub count: usize,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, count: usize) -> Self {
        Self { data, count }
    }

    /// Convert every record, keeping the count
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            count: self.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_defaults() {
        let params = ListParams::default();
        let pagination = params.pagination(PageLimits::default());
        assert_eq!(pagination.skip(), 0);
        assert_eq!(pagination.limit(), 50);
        assert!(params.sorting().unwrap().is_empty());
    }

    #[test]
    fn test_negative_limit_behaves_like_omitted() {
        let limits = PageLimits::default();
        let negative = ListParams {
            limit: Some(-5),
            ..Default::default()
        };
        assert_eq!(
            negative.pagination(limits),
            ListParams::default().pagination(limits)
        );
    }

    #[test]
    fn test_limit_is_capped() {
        let params = ListParams {
            limit: Some(10_000),
            ..Default::default()
        };
        let limits = PageLimits {
            default_limit: 50,
            max_limit: 100,
        };
        assert_eq!(params.pagination(limits).limit(), 100);
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], 10).map(|n| n * 2);
        assert_eq!(page.data, vec![2, 4, 6]);
        assert_eq!(page.count, 10);
    }
}
