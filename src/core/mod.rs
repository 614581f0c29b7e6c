//! Core types shared by every domain: records, repositories, query
//! options, errors and request extractors

pub mod auth;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod field;
pub mod options;
pub mod patch;
pub mod query;
pub mod repository;
pub mod validation;

pub use auth::CurrentUser;
pub use entity::Record;
pub use error::{DomainError, DomainResult};
pub use field::FieldValue;
pub use options::{SearchFilters, SearchOptions, SearchPagination, SearchSorting, SortOrder};
pub use query::{ListParams, Page, PageLimits};
pub use repository::Repository;
