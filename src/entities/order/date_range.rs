//! Date-window filter for `GET /orders/date-range`

use chrono::NaiveDate;

use super::model::Order;
use crate::core::QueryError;
use crate::core::query::parse_iso_timestamp;

/// Raw query parameters; empty strings count as absent
#[derive(Debug, Clone, Default)]
pub struct DateRangeParams {
    pub lookup_start_date: Option<String>,
    pub lookup_embargo_date: Option<String>,
}

/// Parsed date window. A missing bound does not filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderDateRange {
    /// Orders must start on or after this date
    pub start_on_or_after: Option<NaiveDate>,

    /// Orders must lift their embargo on or before this date
    pub embargo_on_or_before: Option<NaiveDate>,
}

impl DateRangeParams {
    /// Collect the lookups from raw query pairs; the last value of a
    /// repeated key wins
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "lookup_start_date" => params.lookup_start_date = Some(value),
                "lookup_embargo_date" => params.lookup_embargo_date = Some(value),
                _ => {}
            }
        }
        params
    }

    pub fn parse(&self) -> Result<OrderDateRange, QueryError> {
        Ok(OrderDateRange {
            start_on_or_after: parse_lookup(
                self.lookup_start_date.as_deref(),
                "lookup_start_date",
            )?,
            embargo_on_or_before: parse_lookup(
                self.lookup_embargo_date.as_deref(),
                "lookup_embargo_date",
            )?,
        })
    }
}

impl OrderDateRange {
    pub fn matches(&self, order: &Order) -> bool {
        self.start_on_or_after
            .is_none_or(|start| order.start_date >= start)
            && self
                .embargo_on_or_before
                .is_none_or(|embargo| order.embargo_date <= embargo)
    }
}

fn parse_lookup(raw: Option<&str>, param: &'static str) -> Result<Option<NaiveDate>, QueryError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_iso_timestamp(raw).map(|ts| ts.date_naive()))
        .map(Some)
        .ok_or(QueryError::InvalidDate { param })
}
