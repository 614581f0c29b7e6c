//! Axum extractors that reject with [`DomainError`]
//!
//! axum's own extractors answer malformed input with plain-text bodies.
//! These wrappers run the same extraction and turn the rejection into an
//! `INVALID_DATA` error so every 400 shares the JSON error shape.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use validator::Validate;

use super::error::DomainError;
use super::options::SearchFilters;
use super::query::{ListParams, PAGING_KEYS};

impl From<QueryRejection> for DomainError {
    fn from(rejection: QueryRejection) -> Self {
        DomainError::invalid(format!("query string: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for DomainError {
    fn from(rejection: PathRejection) -> Self {
        DomainError::invalid(format!("path: {}", rejection.body_text()))
    }
}

impl From<JsonRejection> for DomainError {
    fn from(rejection: JsonRejection) -> Self {
        DomainError::invalid(format!("body: {}", rejection.body_text()))
    }
}

/// Query string deserialized into `T`
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Path parameters deserialized into `T` (a `Uuid` or a tuple of them)
#[derive(Debug, Clone)]
pub struct PathParams<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// JSON body deserialized into `T` without further checks
///
/// Used for update payloads, whose field rules are checked against the
/// merged record instead.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = DomainError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// JSON body deserialized into `T` and checked with [`Validate`]
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_card(
///     State(state): State<CardState>,
///     user: CurrentUser,
///     ValidatedJson(payload): ValidatedJson<CreditCardCreate>,
/// ) -> Result<impl IntoResponse, DomainError> {
///     // payload already passed its field rules
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = DomainError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Typed filter parameters of one list endpoint
pub trait FilterParams: DeserializeOwned + Send {
    /// Query keys consumed by this type
    const KEYS: &'static [&'static str];
}

/// Everything a list endpoint reads from the query string
///
/// Keys that are neither paging keys nor typed filters end up in `extra`
/// as equality filters, so the repository can accept or reject them by
/// its unknown-field policy.
#[derive(Debug, Clone)]
pub struct ListQuery<F> {
    pub params: ListParams,
    pub filters: F,
    pub extra: SearchFilters,
}

impl<S, F> FromRequestParts<S> for ListQuery<F>
where
    S: Send + Sync,
    F: FilterParams,
{
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<ListParams>::try_from_uri(&parts.uri)?;
        let Query(filters) = Query::<F>::try_from_uri(&parts.uri)?;
        let Query(raw) = Query::<BTreeMap<String, String>>::try_from_uri(&parts.uri)?;

        let extra = raw
            .into_iter()
            .filter(|(key, _)| !PAGING_KEYS.contains(&key.as_str()) && !F::KEYS.contains(&key.as_str()))
            .fold(SearchFilters::new(), |acc, (key, value)| acc.equals(&key, value));

        Ok(Self {
            params,
            filters,
            extra,
        })
    }
}
