//! Query parameters and pagination for the time-windowed inventory listing
//!
//! The listing answers `GET /inventory/created-after` by validating the raw
//! query string, clamping the page size, asking the store for one slice of
//! the records created after the cutoff, and deciding whether the requested
//! page exists.
//!
//! # Example
//! ```rust,ignore
//! // GET /inventory/created-after?created_after=2025-03-01T00:00:00Z&page=2&limit=2
//! let outcome = list_created_after(store.as_ref(), &params, &policy).await?;
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::json;
use std::num::IntErrorKind;

use crate::core::error::{ApiError, QueryError};
use crate::core::store::CreatedAfterScan;

/// Fixed ceiling for the page size
pub const DEFAULT_MAX_LIMIT: usize = 3;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Raw query parameters for the time-windowed listing
///
/// Every field is kept as the caller sent it; [`CreatedAfterParams::validate`]
/// decides what is an error and what silently falls back to a default.
#[derive(Debug, Clone, Default)]
pub struct CreatedAfterParams {
    /// ISO-8601 cutoff (required)
    pub created_after: Option<String>,

    /// 1-based page number
    pub page: Option<String>,

    /// Requested page size
    pub limit: Option<String>,
}

/// Page size policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePolicy {
    /// No page ever holds more records than this
    pub max_limit: usize,
}

impl Default for PagePolicy {
    fn default() -> Self {
        Self {
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

impl PagePolicy {
    pub fn new(max_limit: usize) -> Self {
        Self { max_limit }
    }

    /// Effective page size for a requested limit.
    ///
    /// Absent means the ceiling. Anything above the ceiling is truncated to
    /// it, anything below 1 is raised to 1.
    pub fn effective_limit(&self, requested: Option<i64>) -> usize {
        let ceiling = self.max_limit.max(1);
        match requested {
            None => ceiling,
            Some(n) if n < 1 => 1,
            Some(n) => usize::try_from(n).map_or(ceiling, |n| n.min(ceiling)),
        }
    }
}

/// A validated listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedAfterQuery {
    /// Only records created strictly after this instant are listed
    pub cutoff: DateTime<Utc>,

    /// Resolved page number; may be out of range
    pub page: i64,

    /// Effective page size, already clamped
    pub limit: usize,
}

impl CreatedAfterParams {
    /// Collect the parameters from raw query pairs.
    ///
    /// A repeated key keeps its last value; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        pairs
            .into_iter()
            .fold(Self::default(), |mut params, (key, value)| {
                match key.as_str() {
                    "created_after" => params.created_after = Some(value),
                    "page" => params.page = Some(value),
                    "limit" => params.limit = Some(value),
                    _ => {}
                }
                params
            })
    }

    /// Validate the raw parameters in order, stopping at the first failure
    pub fn validate(&self, policy: &PagePolicy) -> Result<CreatedAfterQuery, QueryError> {
        let raw_cutoff = self
            .created_after
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(QueryError::MissingCreatedAfter)?;

        let cutoff = parse_iso_timestamp(raw_cutoff).ok_or(QueryError::InvalidCreatedAfter)?;

        let requested_limit = match self.limit.as_deref() {
            Some(raw) => Some(parse_query_int(raw).ok_or(QueryError::InvalidLimit)?),
            None => None,
        };

        // A page that is not an integer is never an error
        let page = self.page.as_deref().and_then(parse_query_int).unwrap_or(1);

        Ok(CreatedAfterQuery {
            cutoff,
            page,
            limit: policy.effective_limit(requested_limit),
        })
    }
}

impl CreatedAfterQuery {
    /// Offset of the first record on the resolved page.
    ///
    /// `None` when the page number is below 1 or its offset does not fit in
    /// memory; both can only ever be out of range.
    pub fn offset(&self) -> Option<usize> {
        let index = usize::try_from(self.page.checked_sub(1)?).ok()?;
        index.checked_mul(self.limit)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: i64,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages; an empty result still has one (empty) page
    pub total_pages: usize,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: usize, total: usize) -> Self {
        // Ensure limit is at least 1 to avoid division by zero
        let limit = limit.max(1);

        Self {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit).max(1),
        }
    }

    /// Whether the page exists
    pub fn is_in_range(&self) -> bool {
        usize::try_from(self.page).is_ok_and(|page| page >= 1 && page <= self.total_pages)
    }
}

/// Result of a listing request
#[derive(Debug, Clone, PartialEq)]
pub enum ListingPage<T> {
    /// The records on the requested page, oldest first (possibly none when
    /// nothing matches at all)
    Records(Vec<T>),

    /// The requested page lies outside the result set
    Empty,
}

impl<T: Serialize> IntoResponse for ListingPage<T> {
    fn into_response(self) -> Response {
        match self {
            ListingPage::Records(records) => (StatusCode::OK, Json(records)).into_response(),
            ListingPage::Empty => (
                StatusCode::OK,
                Json(json!({ "data": [], "message": "Page is empty" })),
            )
                .into_response(),
        }
    }
}

/// Run the time-windowed listing against a store
///
/// Issues exactly one scan against `store` for every request that passes
/// validation and has a representable page offset.
pub async fn list_created_after<T, S>(
    store: &S,
    params: &CreatedAfterParams,
    policy: &PagePolicy,
) -> Result<ListingPage<T>, ApiError>
where
    S: CreatedAfterScan<T> + ?Sized,
{
    let query = params.validate(policy)?;

    let Some(offset) = query.offset() else {
        tracing::debug!(page = query.page, "page number cannot address any records");
        return Ok(ListingPage::Empty);
    };

    let scan = store
        .scan_created_after(query.cutoff, offset, query.limit)
        .await?;

    let meta = PaginationMeta::new(query.page, query.limit, scan.total);
    tracing::debug!(
        cutoff = %query.cutoff,
        page = meta.page,
        limit = meta.limit,
        total = meta.total,
        total_pages = meta.total_pages,
        "created-after scan"
    );

    if meta.is_in_range() {
        Ok(ListingPage::Records(scan.items))
    } else {
        Ok(ListingPage::Empty)
    }
}

/// Parse an ISO-8601 timestamp.
///
/// A trailing `Z` means UTC. Timestamps without an offset and bare dates are
/// read as UTC (a bare date is midnight). The time may stop at the hour
/// (`2025-03-01T10`, `2025-03-01T10+00:00`).
pub fn parse_iso_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let zoned = match raw.strip_suffix('Z') {
        Some(head) => format!("{head}+00:00"),
        None => raw.to_string(),
    };
    let normalized = expand_hour_only(&zoned).unwrap_or(zoned);

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(parsed.with_timezone(&Utc));
    }

    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&normalized, fmt).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
                .map(|naive| naive.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}

/// `2025-03-01T10` becomes `2025-03-01T10:00`, keeping any offset after
/// the hour. chrono always wants a minute.
fn expand_hour_only(raw: &str) -> Option<String> {
    let (head, rest) = (raw.get(..13)?, raw.get(13..)?);
    let bytes = head.as_bytes();

    let hour_only = matches!(bytes[10], b'T' | b' ')
        && bytes[11..13].iter().all(u8::is_ascii_digit)
        && (rest.is_empty() || rest.starts_with(['+', '-']));

    hour_only.then(|| format!("{head}:00{rest}"))
}

/// Parse an integer query parameter.
///
/// Surrounding whitespace, a leading sign and `_` between digits (`1_000`)
/// are accepted. Integers beyond the `i64` range are still integers and
/// saturate instead of failing.
pub fn parse_query_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let digits = trimmed.trim_start_matches(['+', '-']);
    let separators_ok = !digits.starts_with('_')
        && !digits.ends_with('_')
        && !digits.contains("__");
    if !separators_ok {
        return None;
    }

    match trimmed.replace('_', "").parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}
