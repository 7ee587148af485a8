use chrono::NaiveDate;

use crate::domain::auth::{AuthenticatedUser, Role};

pub mod auth;
pub mod dashboard;
pub mod documents;
pub mod errors;
pub mod orders;
pub mod products;
pub mod wizard;

pub use errors::{ServiceError, ServiceResult};

/// Default number of rows per catalog page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Returns `Unauthorized` unless the user holds one of `roles`.
pub fn ensure_role(user: &AuthenticatedUser, roles: &[Role]) -> ServiceResult<()> {
    if roles.iter().any(|role| user.has_role(*role)) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Normalizes an optional query-string value: trimmed, `None` when blank.
pub(crate) fn filled(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parses a `YYYY-MM-DD` filter value; anything else counts as unset.
pub(crate) fn filled_date(value: Option<&str>) -> Option<NaiveDate> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
}
