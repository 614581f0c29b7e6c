//! Caller identity and ownership checks
//!
//! Authentication itself happens upstream. The gateway forwards the
//! resolved caller as two headers:
//!
//! - `x-user-id`: the caller's UUID (required)
//! - `x-user-superuser`: `true` when the caller may act on any record
//!
//! Handlers take a [`CurrentUser`] argument and hand it to the service,
//! which decides per record whether the caller may proceed.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use uuid::Uuid;

use super::error::{DomainError, DomainResult};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const SUPERUSER_HEADER: &str = "x-user-superuser";

/// The authenticated caller of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub is_superuser: bool,
}

impl CurrentUser {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            is_superuser: false,
        }
    }

    pub fn superuser(id: Uuid) -> Self {
        Self {
            id,
            is_superuser: true,
        }
    }

    /// Whether the caller may act on a record owned by `owner_id`
    pub fn can_access(&self, owner_id: Uuid) -> bool {
        self.is_superuser || self.id == owner_id
    }

    /// Fail with Forbidden unless the caller may act on a record owned by `owner_id`
    pub fn ensure_owner(&self, owner_id: Uuid) -> DomainResult<()> {
        if self.can_access(owner_id) {
            Ok(())
        } else {
            Err(DomainError::forbidden("not enough permissions"))
        }
    }

    /// The user a list query is scoped to, or `None` for superusers
    ///
    /// A superuser may narrow the scope with an explicit `requested` user.
    pub fn scope(&self, requested: Option<Uuid>) -> DomainResult<Option<Uuid>> {
        match requested {
            Some(user_id) => self.ensure_owner(user_id).map(|_| Some(user_id)),
            None if self.is_superuser => Ok(None),
            None => Ok(Some(self.id)),
        }
    }

    fn from_headers(headers: &HeaderMap) -> DomainResult<Self> {
        let id = headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| DomainError::unauthorized("missing x-user-id header"))?
            .to_str()
            .ok()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .ok_or_else(|| DomainError::unauthorized("x-user-id is not a valid UUID"))?;

        let is_superuser = headers
            .get(SUPERUSER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self { id, is_superuser })
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let err = CurrentUser::from_headers(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized { .. }));
    }

    #[test]
    fn test_malformed_header_is_unauthorized() {
        let err = CurrentUser::from_headers(&headers(&[(USER_ID_HEADER, "bob")])).unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized { .. }));
    }

    #[test]
    fn test_parses_superuser_flag() {
        let id = Uuid::new_v4();
        let user = CurrentUser::from_headers(&headers(&[
            (USER_ID_HEADER, &id.to_string()),
            (SUPERUSER_HEADER, "TRUE"),
        ]))
        .unwrap();
        assert_eq!(user, CurrentUser::superuser(id));
    }

    #[test]
    fn test_ownership() {
        let owner = Uuid::new_v4();
        let other = CurrentUser::new(Uuid::new_v4());

        assert!(CurrentUser::new(owner).ensure_owner(owner).is_ok());
        assert!(matches!(
            other.ensure_owner(owner),
            Err(DomainError::Forbidden { .. })
        ));
        assert!(CurrentUser::superuser(Uuid::new_v4()).ensure_owner(owner).is_ok());
    }

    #[test]
    fn test_scope() {
        let user = CurrentUser::new(Uuid::new_v4());
        assert_eq!(user.scope(None).unwrap(), Some(user.id));
        assert!(user.scope(Some(Uuid::new_v4())).is_err());

        let admin = CurrentUser::superuser(Uuid::new_v4());
        assert_eq!(admin.scope(None).unwrap(), None);
        let target = Uuid::new_v4();
        assert_eq!(admin.scope(Some(target)).unwrap(), Some(target));
    }
}
