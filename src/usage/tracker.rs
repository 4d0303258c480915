//! Daily counter on top of a [`UsageStore`].

use super::store::UsageStore;
use super::types::{StorageError, Usage, UsageRecord};
use chrono::{NaiveDate, Utc};

/// Counts searches per UTC day.
///
/// Both public operations always return a value: storage failures are logged
/// and reported as zero usage so quota tracking can never take the search
/// path down with it.
pub struct QuotaTracker<S> {
    store: S,
}

impl<S: UsageStore> QuotaTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records one search for today and returns the updated usage.
    pub fn record_usage(&self) -> Usage {
        self.record_usage_on(today())
    }

    /// Records one search for `today`.
    pub fn record_usage_on(&self, today: NaiveDate) -> Usage {
        self.try_record_usage(today).unwrap_or_else(|e| {
            tracing::warn!("Usage tracking error: {}", e);
            Usage::default()
        })
    }

    /// Reports today's usage without modifying anything.
    pub fn get_usage(&self) -> Usage {
        self.get_usage_on(today())
    }

    /// Reports usage for `today` without modifying anything.
    pub fn get_usage_on(&self, today: NaiveDate) -> Usage {
        self.try_get_usage(today).unwrap_or_else(|e| {
            tracing::warn!("Usage tracking error: {}", e);
            Usage::default()
        })
    }

    fn try_record_usage(&self, today: NaiveDate) -> Result<Usage, StorageError> {
        self.store.ensure_ready()?;

        let record = match self.load_lenient() {
            Some(stored) if stored.date == today => UsageRecord {
                date: today,
                count: stored.count.saturating_add(1),
            },
            _ => UsageRecord::first_of_day(today),
        };

        self.store.save(&record)?;
        Ok(Usage::from_count(record.count))
    }

    fn try_get_usage(&self, today: NaiveDate) -> Result<Usage, StorageError> {
        self.store.ensure_ready()?;

        Ok(match self.load_lenient() {
            Some(stored) if stored.date == today => Usage::from_count(stored.count),
            _ => Usage::default(),
        })
    }

    /// An unreadable record counts as no record.
    fn load_lenient(&self) -> Option<UsageRecord> {
        match self.store.load() {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!("Ignoring unreadable usage record: {}", e);
                None
            }
        }
    }
}

/// The current UTC calendar day.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
#[path = "tests/tracker_tests.rs"]
mod tests;
