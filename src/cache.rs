//! Refresh cache with interval throttling
//!
//! Holds the last successfully fetched metric set for the adapter layer. A
//! refresh hits the portal at most once per configured interval; everything
//! in between is served from the snapshot. Refreshes serialize on their own
//! lock while the snapshot sits behind a read-write lock, so reads keep
//! returning the last known-good data during an in-flight fetch.

use crate::error::Result;
use crate::logging::get_logger;
use crate::period::MetricSet;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

/// Source of a full metric set, one fetch per refresh cycle
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn fetch(&self) -> Result<MetricSet>;
}

/// Outcome of a refresh request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The source was fetched and the snapshot replaced
    Refreshed,
    /// The minimum interval has not elapsed; the snapshot is unchanged
    Throttled,
}

struct Snapshot {
    data: MetricSet,
    refreshed_at: Option<DateTime<Utc>>,
}

/// Last-known-good metric snapshot with a refresh throttle
pub struct MetricsCache {
    source: Box<dyn MetricsSource>,
    min_interval: Duration,
    // Held for the whole refresh; guards the throttle timestamp.
    last_success: Mutex<Option<Instant>>,
    snapshot: RwLock<Snapshot>,
    logger: crate::logging::StructuredLogger,
}

impl MetricsCache {
    /// Create a cache over a metric source.
    pub fn new(source: Box<dyn MetricsSource>, min_interval: Duration) -> Self {
        Self {
            source,
            min_interval,
            last_success: Mutex::new(None),
            snapshot: RwLock::new(Snapshot {
                data: MetricSet::new(),
                refreshed_at: None,
            }),
            logger: get_logger("cache"),
        }
    }

    /// Last known-good snapshot; empty before the first successful refresh.
    pub async fn get_data(&self) -> MetricSet {
        self.snapshot.read().await.data.clone()
    }

    /// Wall-clock time of the last successful refresh, if any.
    pub async fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot.read().await.refreshed_at
    }

    /// Refresh the snapshot from the source, subject to the throttle.
    ///
    /// The interval check counts from the last *successful* refresh, so a
    /// failed cycle does not push the next attempt out. On failure the
    /// existing snapshot is left untouched and the error is returned.
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        // Fetch while holding the refresh lock: overlapping refresh calls
        // queue up behind this one and then hit the throttle check. The
        // snapshot stays readable throughout.
        let mut last_success = self.last_success.lock().await;

        if let Some(last) = *last_success
            && last.elapsed() < self.min_interval
        {
            self.logger.debug("Refresh throttled; serving cached data");
            return Ok(RefreshOutcome::Throttled);
        }

        let data = self.source.fetch().await?;

        let mut snapshot = self.snapshot.write().await;
        snapshot.data = data;
        snapshot.refreshed_at = Some(Utc::now());
        *last_success = Some(Instant::now());
        self.logger.info("Cache refreshed");
        Ok(RefreshOutcome::Refreshed)
    }
}
