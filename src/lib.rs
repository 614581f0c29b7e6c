//! # CreditScan
//!
//! HTTP/JSON backend for tracking credit cards, their monthly statements
//! and the transactions on them, with user-defined tags and tag rules that
//! label transactions automatically.
//!
//! Every domain is layered the same way:
//!
//! ```text
//! handler -> use case -> service -> Repository<T> -> Database
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use creditscan::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_config(AppConfig::default())
//!     .build()?;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! Callers identify themselves with the `x-user-id` header (and
//! `x-user-superuser: true` for administrators); see [`core::auth`].

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::config::{AppConfig, ConfigError};
    pub use crate::core::{
        CurrentUser, DomainError, DomainResult, FieldValue, Page, PageLimits, Record, Repository,
        SearchFilters, SearchOptions, SearchPagination, SearchSorting, SortOrder,
    };
    pub use crate::entities::Repositories;
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder};
    pub use crate::storage::{Database, InMemoryRepository, UnknownFieldPolicy};

    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
