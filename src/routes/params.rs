use serde::Deserialize;
use utoipa::ToSchema;

pub const DEFAULT_LIMIT: u64 = 100;
pub const MAX_LIMIT: u64 = 100;
/// Largest offset the database driver accepts (`BIGINT`).
pub const MAX_SKIP: u64 = i64::MAX as u64;

/// Offset/limit window for list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct Pagination {
    /// Rows to skip, default 0.
    pub skip: Option<u64>,
    /// Maximum rows to return, default 100; 0 returns an empty page.
    pub limit: Option<u64>,
}

impl Pagination {
    pub fn new(skip: u64, limit: u64) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
        }
    }

    /// Returns `(offset, limit)` with defaults applied. The offset is capped at
    /// `MAX_SKIP` and the limit at `MAX_LIMIT`; `limit=0` yields an empty page.
    pub fn normalize(&self) -> (u64, u64) {
        let skip = self.skip.unwrap_or(0).min(MAX_SKIP);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        (skip, limit)
    }
}
