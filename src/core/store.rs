//! Store port for time-windowed scans

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// One slice of a filtered, ordered scan
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPage<T> {
    /// Records in the requested slice, oldest first
    pub items: Vec<T>,

    /// Number of records matching the filter, across all slices
    pub total: usize,
}

/// Trait for stores that can scan records created after a cutoff
///
/// The contract is that of an indexed range scan with offset/limit paging:
/// keep records whose creation timestamp is strictly greater than `cutoff`,
/// order them by creation timestamp ascending (ties broken by id), skip
/// `offset` of them and return at most `limit`.
#[async_trait]
pub trait CreatedAfterScan<T>: Send + Sync {
    async fn scan_created_after(
        &self,
        cutoff: DateTime<Utc>,
        offset: usize,
        limit: usize,
    ) -> Result<ScanPage<T>>;
}
