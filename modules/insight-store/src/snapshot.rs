use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use tracing::{error, info};

use insight_common::{CountryTotals, InsightRecord};
use insight_metrics::{country_totals, distinct_values, DistinctValues, DEFAULT_COUNTRY_METRIC};

use crate::store::RecordStore;

/// Immutable copy of the full insight collection. Requests aggregate over a
/// snapshot; nothing mutates it after load.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub records: Vec<InsightRecord>,
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(records: Vec<InsightRecord>) -> Self {
        Self {
            records,
            loaded_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Filter options over the whole collection, independent of any selection.
    pub fn distinct_values(&self) -> DistinctValues {
        distinct_values(&self.records)
    }

    /// Intensity per country over the whole collection. Deliberately
    /// unfiltered: the map does not follow the sidebar selection.
    pub fn country_totals(&self) -> CountryTotals {
        country_totals(&self.records, DEFAULT_COUNTRY_METRIC)
    }
}

/// Clears the reload flag when dropped, so a reload future cancelled
/// mid-fetch (a dropped request) does not leave reloads disabled.
struct ReloadGuard<'a>(&'a AtomicBool);

impl Drop for ReloadGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Thread-safe holder of the current [`Snapshot`] with atomic swap for
/// lock-free reads.
pub struct SnapshotStore {
    inner: ArcSwap<Snapshot>,
    reloading: AtomicBool,
    source: Arc<dyn RecordStore>,
}

impl SnapshotStore {
    /// Wrap an already-loaded snapshot.
    pub fn new(initial: Snapshot, source: Arc<dyn RecordStore>) -> Self {
        Self {
            inner: ArcSwap::new(Arc::new(initial)),
            reloading: AtomicBool::new(false),
            source,
        }
    }

    /// Load from `source`. A failed load starts from an empty snapshot so the
    /// service comes up and serves empty results until a reload succeeds.
    pub async fn load(source: Arc<dyn RecordStore>) -> Self {
        let initial = match source.fetch_all().await {
            Ok(records) => {
                info!(store = source.name(), records = records.len(), "Snapshot loaded");
                Snapshot::new(records)
            }
            Err(e) => {
                error!(store = source.name(), error = %e, "Initial load failed, starting empty");
                Snapshot::empty()
            }
        };
        Self::new(initial, source)
    }

    /// Get the current snapshot. Returns an owned `Arc` so callers keep a
    /// consistent view even if a reload swaps in new data.
    pub fn load_full(&self) -> Arc<Snapshot> {
        self.inner.load_full()
    }

    /// Reload from the source. Only one reload runs at a time; a failure keeps
    /// the stale snapshot. Returns whether a new snapshot was swapped in.
    pub async fn reload(&self) -> bool {
        if self
            .reloading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            info!("Snapshot reload already in progress, skipping");
            return false;
        }
        let _guard = ReloadGuard(&self.reloading);

        match self.source.fetch_all().await {
            Ok(records) => {
                let count = records.len();
                self.inner.store(Arc::new(Snapshot::new(records)));
                info!(store = self.source.name(), records = count, "Snapshot reloaded");
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to reload snapshot, keeping stale data");
                false
            }
        }
    }

    /// Spawn a background loop that reloads on a timer. A zero interval
    /// disables the loop.
    pub fn spawn_reload_loop(self: &Arc<Self>, interval: Duration) {
        if interval.is_zero() {
            info!("Snapshot reload loop disabled");
            return;
        }

        let store = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                store.reload().await;
            }
        });

        info!(interval_secs = interval.as_secs(), "Snapshot reload loop started");
    }
}
