//! Local estimate of daily search quota consumption.
//!
//! The Custom Search API allows 100 free queries per day. This module keeps a
//! best-effort count of the searches performed today so the agent host can
//! ask how much budget is left. It is advisory only:
//! - the count is never used to block a search
//! - storage failures are logged and replaced with a zero-usage default
//! - concurrent processes sharing the same directory may lose updates

pub mod store;
pub mod tracker;
pub mod types;

pub use store::{FileUsageStore, MemoryUsageStore, UsageStore};
pub use tracker::QuotaTracker;
pub use types::{StorageError, Usage, UsageRecord, DAILY_QUOTA};
