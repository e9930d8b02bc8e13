use async_trait::async_trait;

use insight_common::{InsightError, InsightRecord};

// --- RecordStore trait ---

/// Source of the insight collection. Always queried in full.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<InsightRecord>, InsightError>;
    fn name(&self) -> &str;
}

// --- In-memory store ---

/// Fixed record set. Useful for tests and for seeding a snapshot directly.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Vec<InsightRecord>,
}

impl InMemoryStore {
    pub fn new(records: Vec<InsightRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn fetch_all(&self) -> Result<Vec<InsightRecord>, InsightError> {
        Ok(self.records.clone())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
