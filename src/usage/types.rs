//! Types for the local usage estimate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Daily query allowance of the Custom Search free tier.
pub const DAILY_QUOTA: u32 = 100;

/// The persisted record: one per storage location, for the last touched day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// UTC calendar day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub count: u32,
}

impl UsageRecord {
    /// The first search of `date`.
    pub fn first_of_day(date: NaiveDate) -> Self {
        Self { date, count: 1 }
    }
}

/// Used/remaining pair reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub used: u32,
    pub remaining: u32,
}

impl Usage {
    /// Builds the pair for a given count. `remaining` saturates at zero, the
    /// count itself keeps growing past the quota.
    pub fn from_count(count: u32) -> Self {
        Self {
            used: count,
            remaining: DAILY_QUOTA.saturating_sub(count),
        }
    }
}

impl Default for Usage {
    fn default() -> Self {
        Self::from_count(0)
    }
}

/// Failures on the usage storage path. Never surfaced past the tracker.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("usage storage unavailable: {0}")]
    Unavailable(String),

    #[error("failed to create usage directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read usage record {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse usage record {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize usage record: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write usage record {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
