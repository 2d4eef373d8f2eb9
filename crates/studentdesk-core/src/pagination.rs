//! Page-based pagination for list endpoints.
//!
//! List endpoints accept `page` (1-indexed, default 1) and `limit`
//! (items per page, clamped to `[1, 100]`, default 10) and wrap their
//! results in a [`Paginated`] envelope:
//!
//! ```json
//! {
//!   "data": [...],
//!   "meta": { "total": 42, "limit": 10, "page": 2, "total_pages": 5, "has_more": true }
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;
/// Highest page number honoured; larger values are clamped so the offset
/// always fits in an i64.
pub const MAX_PAGE: i64 = i64::MAX / MAX_LIMIT;

/// Deserializes an optional string into an optional i64.
///
/// Query strings hand every value over as text, and an empty value
/// (`?page=`) is treated as absent.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Query parameters for page-based pagination.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).clamp(1, MAX_PAGE)
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }

    /// Builds the response metadata for a page out of `total` items.
    pub fn meta(&self, total: i64) -> PaginationMeta {
        let limit = self.limit();
        let page = self.page();
        let total_pages = if total == 0 {
            0
        } else {
            total.saturating_add(limit - 1) / limit
        };

        PaginationMeta {
            total,
            limit,
            page,
            total_pages,
            has_more: self.offset().saturating_add(limit) < total,
        }
    }
}

/// Metadata about a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of items across all pages
    pub total: i64,
    /// Items per page (the limit that was applied)
    pub limit: i64,
    /// Current page number
    pub page: i64,
    pub total_pages: i64,
    /// Whether there are more items after this page
    pub has_more: bool,
}

/// A page of results together with its metadata.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, params: &PaginationParams) -> Self {
        Self {
            data,
            meta: params.meta(total),
        }
    }

    pub fn empty(params: &PaginationParams) -> Self {
        Self::new(Vec::new(), 0, params)
    }
}
