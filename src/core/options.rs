//! Search options: filters, pagination and sorting for list queries
//!
//! A [`SearchOptions`] value is assembled once through [`SearchOptionsBuilder`]
//! and is immutable afterwards, so the same options can be shared between a
//! list call and a count call without aliasing surprises.
//!
//! Field names are not checked here. The repository decides what to do with
//! names the record type does not expose.
//!
//! # Example
//! ```rust,ignore
//! let options = SearchOptions::builder()
//!     .filters(SearchFilters::new().equals("card_id", card_id).equals_opt("is_fully_paid", paid))
//!     .pagination(SearchPagination::new(0, 20))
//!     .sorting(SearchSorting::by("close_date", SortOrder::Desc))
//!     .build();
//! ```

use super::error::{DomainError, DomainResult};
use super::field::FieldValue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// System-wide default page size, used when a caller passes an invalid limit
pub const DEFAULT_PAGINATION_LIMIT: i64 = 50;

/// Comparison applied by a filter clause
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Field equals value
    Eq(FieldValue),
    /// Field is greater than or equal to value
    Gte(FieldValue),
    /// Field is less than or equal to value
    Lte(FieldValue),
    /// Field equals one of the values
    In(Vec<FieldValue>),
}

impl Predicate {
    /// Evaluate the predicate against a record value
    ///
    /// Values of incomparable kinds never match.
    pub fn matches(&self, actual: &FieldValue) -> bool {
        match self {
            Predicate::Eq(expected) => actual.compare(expected) == Some(Ordering::Equal),
            Predicate::Gte(bound) => {
                matches!(actual.compare(bound), Some(Ordering::Greater | Ordering::Equal))
            }
            Predicate::Lte(bound) => {
                matches!(actual.compare(bound), Some(Ordering::Less | Ordering::Equal))
            }
            Predicate::In(values) => values
                .iter()
                .any(|v| actual.compare(v) == Some(Ordering::Equal)),
        }
    }
}

/// One `field <predicate>` clause
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub field: String,
    pub predicate: Predicate,
}

/// Conjunction of filter clauses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    clauses: Vec<FilterClause>,
}

impl SearchFilters {
    /// Create an empty filter set (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, field: &str, predicate: Predicate) -> Self {
        self.clauses.push(FilterClause {
            field: field.to_string(),
            predicate,
        });
        self
    }

    /// Require `field == value`
    pub fn equals(self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.push(field, Predicate::Eq(value.into()))
    }

    /// Require `field >= value`
    pub fn at_least(self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.push(field, Predicate::Gte(value.into()))
    }

    /// Require `field <= value`
    pub fn at_most(self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.push(field, Predicate::Lte(value.into()))
    }

    /// Require `field` to equal one of `values`
    ///
    /// An empty `values` list matches nothing.
    pub fn any_of<V: Into<FieldValue>>(self, field: &str, values: impl IntoIterator<Item = V>) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.push(field, Predicate::In(values))
    }

    /// Require `field == value` only when a value is given
    pub fn equals_opt<V: Into<FieldValue>>(self, field: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.equals(field, v),
            None => self,
        }
    }

    /// Require `field >= value` only when a value is given
    pub fn at_least_opt<V: Into<FieldValue>>(self, field: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.at_least(field, v),
            None => self,
        }
    }

    /// Require `field <= value` only when a value is given
    pub fn at_most_opt<V: Into<FieldValue>>(self, field: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.at_most(field, v),
            None => self,
        }
    }

    /// Inclusive range on `field`; either bound may be absent
    pub fn between<V: Into<FieldValue>>(self, field: &str, from: Option<V>, to: Option<V>) -> Self {
        self.at_least_opt(field, from).at_most_opt(field, to)
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Skip/limit window over a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPagination {
    skip: usize,
    limit: usize,
}

impl SearchPagination {
    /// Build a window using the system default limit as fallback
    pub fn new(skip: i64, limit: i64) -> Self {
        Self::with_default(skip, limit, DEFAULT_PAGINATION_LIMIT)
    }

    /// Build a window, replacing a limit `<= 0` with `default_limit`
    ///
    /// A negative skip is clamped to zero.
    pub fn with_default(skip: i64, limit: i64, default_limit: i64) -> Self {
        let limit = if limit > 0 { limit } else { default_limit.max(1) };
        Self {
            skip: skip.max(0) as usize,
            limit: limit as usize,
        }
    }

    /// Clamp the limit to `max_limit`
    pub fn capped(self, max_limit: usize) -> Self {
        Self {
            skip: self.skip,
            limit: self.limit.min(max_limit.max(1)),
        }
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for SearchPagination {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGINATION_LIMIT)
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Apply the direction to an ascending ordering
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(DomainError::invalid(format!(
                "sort order must be 'asc' or 'desc', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// A single sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub order: SortOrder,
}

/// Ordered list of sort keys; later keys break ties of earlier ones
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSorting {
    keys: Vec<SortKey>,
}

impl SearchSorting {
    /// No sorting: results keep insertion order
    pub fn none() -> Self {
        Self::default()
    }

    /// Sort by one field
    pub fn by(field: &str, order: SortOrder) -> Self {
        Self::none().then(field, order)
    }

    /// Add a tie-breaker key
    pub fn then(mut self, field: &str, order: SortOrder) -> Self {
        self.keys.push(SortKey {
            field: field.to_string(),
            order,
        });
        self
    }

    /// Parse transport inputs (`sort_by`, `sort_order`)
    ///
    /// A missing `sort_by` yields no sorting; a missing order defaults to asc.
    pub fn parse(sort_by: Option<&str>, sort_order: Option<&str>) -> DomainResult<Self> {
        let order = sort_order
            .filter(|s| !s.is_empty())
            .map(SortOrder::from_str)
            .transpose()?
            .unwrap_or_default();

        Ok(match sort_by.filter(|s| !s.is_empty()) {
            Some(field) => Self::by(field, order),
            None => Self::none(),
        })
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Immutable composite of filters, pagination and sorting
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    filters: SearchFilters,
    pagination: SearchPagination,
    sorting: SearchSorting,
}

impl SearchOptions {
    /// Start building a new options value
    pub fn builder() -> SearchOptionsBuilder {
        SearchOptionsBuilder::default()
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn pagination(&self) -> &SearchPagination {
        &self.pagination
    }

    pub fn sorting(&self) -> &SearchSorting {
        &self.sorting
    }

    /// A copy of these options with extra filter clauses
    ///
    /// Used to scope a caller's query to the records they own.
    pub fn narrowed(&self, f: impl FnOnce(SearchFilters) -> SearchFilters) -> SearchOptions {
        SearchOptions {
            filters: f(self.filters.clone()),
            pagination: self.pagination,
            sorting: self.sorting.clone(),
        }
    }
}

/// Builder for [`SearchOptions`]
#[derive(Debug, Clone, Default)]
pub struct SearchOptionsBuilder {
    filters: SearchFilters,
    pagination: SearchPagination,
    sorting: SearchSorting,
}

impl SearchOptionsBuilder {
    pub fn filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn pagination(mut self, pagination: SearchPagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn sorting(mut self, sorting: SearchSorting) -> Self {
        self.sorting = sorting;
        self
    }

    pub fn build(self) -> SearchOptions {
        SearchOptions {
            filters: self.filters,
            pagination: self.pagination,
            sorting: self.sorting,
        }
    }
}
