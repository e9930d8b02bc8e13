use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use insight_common::{InsightError, InsightRecord};

use crate::store::RecordStore;

/// Reads the insight collection from a JSON array on disk (the same dump the
/// dashboard's import script consumes). The file is re-read on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Decode a top-level JSON array of documents.
///
/// Elements that are not objects are skipped; the second value is how many.
pub fn decode_records(value: Value) -> Result<(Vec<InsightRecord>, usize), InsightError> {
    let Value::Array(items) = value else {
        return Err(InsightError::Decode(
            "expected a JSON array of insight documents".to_string(),
        ));
    };

    let mut records = Vec::with_capacity(items.len());
    let mut skipped = 0;
    for (idx, item) in items.iter().enumerate() {
        match InsightRecord::from_json(item) {
            Some(record) => records.push(record),
            None => {
                skipped += 1;
                warn!(index = idx, "Skipping non-object insight document");
            }
        }
    }
    Ok((records, skipped))
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn fetch_all(&self) -> Result<Vec<InsightRecord>, InsightError> {
        let start = std::time::Instant::now();
        let bytes = tokio::fs::read(&self.path).await?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| InsightError::Decode(format!("{}: {e}", self.path.display())))?;
        let (records, skipped) = decode_records(value)?;

        info!(
            path = %self.path.display(),
            records = records.len(),
            skipped,
            elapsed_ms = start.elapsed().as_millis(),
            "Insight file loaded"
        );
        Ok(records)
    }

    fn name(&self) -> &str {
        "json_file"
    }
}
