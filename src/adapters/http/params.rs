//! Path and query parameter parsing shared by the routers.

use std::str::FromStr;

use crate::domain::foundation::ValidationError;

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 200;

/// Clamps `limit` to `1..=MAX_PAGE_SIZE`.
pub fn page(limit: Option<u32>, offset: Option<u32>) -> (u32, u32) {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (limit, offset.unwrap_or(0))
}

/// Parses a UUID path segment into a typed id.
pub fn parse_id<T>(field: &str, raw: &str) -> Result<T, ValidationError>
where
    T: FromStr,
{
    raw.parse()
        .map_err(|_| ValidationError::invalid_format(field, "expected a UUID"))
}

/// Parses an optional query value, treating an empty string as absent.
pub fn parse_optional<T>(raw: Option<&str>) -> Result<Option<T>, ValidationError>
where
    T: FromStr<Err = ValidationError>,
{
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => value.parse().map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Role, UserId};

    #[test]
    fn page_clamps_limit() {
        assert_eq!(page(None, None), (DEFAULT_PAGE_SIZE, 0));
        assert_eq!(page(Some(0), Some(10)), (1, 10));
        assert_eq!(page(Some(10_000), None), (MAX_PAGE_SIZE, 0));
    }

    #[test]
    fn parse_id_rejects_non_uuid() {
        assert!(parse_id::<UserId>("id", "not-a-uuid").is_err());
        assert!(parse_id::<UserId>("id", "8f14e45f-ceea-467f-a8f4-2b3c1d0e9a77").is_ok());
    }

    #[test]
    fn parse_optional_skips_blank() {
        assert_eq!(parse_optional::<Role>(Some("  ")), Ok(None));
        assert_eq!(parse_optional::<Role>(Some("teacher")), Ok(Some(Role::Teacher)));
        assert!(parse_optional::<Role>(Some("owner")).is_err());
    }
}
