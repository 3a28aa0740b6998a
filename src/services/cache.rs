use crate::models::MatchReport;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// In-memory cache of computed matchings
///
/// Keyed by graph revision. Every new mutual edge bumps the revision, so a
/// cached report is only ever served for the exact graph it was built from.
#[derive(Clone)]
pub struct MatchCache {
    reports: moka::future::Cache<u64, Arc<MatchReport>>,
    ttl_secs: u64,
}

impl MatchCache {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let reports = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { reports, ttl_secs }
    }

    pub async fn get(&self, revision: u64) -> Option<Arc<MatchReport>> {
        let hit = self.reports.get(&revision).await;
        if hit.is_some() {
            tracing::trace!("Matching cache hit: revision {}", revision);
        } else {
            tracing::trace!("Matching cache miss: revision {}", revision);
        }
        hit
    }

    pub async fn insert(&self, report: Arc<MatchReport>) {
        self.reports.insert(report.revision, report).await;
    }

    /// Drop every cached report; used when the engine is replaced wholesale
    pub fn invalidate_all(&self) {
        self.reports.invalidate_all();
        tracing::debug!("Matching cache cleared");
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.reports.entry_count(),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub ttl_secs: u64,
}
