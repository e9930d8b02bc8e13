//! Chart-ready shapes produced by the aggregators.

use serde::{Deserialize, Serialize};

/// One slice of a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub label: String,
    pub value: u64,
}

/// `(label, count)` pairs in first-seen order.
pub type FrequencyTable = Vec<FrequencyEntry>;

/// Labels by descending frequency.
pub type TopNList = Vec<String>;

/// One heatmap cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossTabCell {
    pub x: String,
    pub y: String,
    pub value: f64,
}

/// Sparse cells: only pairs that occur in the data.
pub type CrossTab = Vec<CrossTabCell>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RadarMetrics {
    pub intensity: f64,
    pub relevance: f64,
    pub likelihood: f64,
}

impl RadarMetrics {
    pub fn max(self, other: RadarMetrics) -> RadarMetrics {
        RadarMetrics {
            intensity: self.intensity.max(other.intensity),
            relevance: self.relevance.max(other.relevance),
            likelihood: self.likelihood.max(other.likelihood),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarEntry {
    pub name: String,
    pub metrics: RadarMetrics,
}

pub type RadarProfile = Vec<RadarEntry>;

/// Summed metric for one country. `id` is the trimmed country name as stored;
/// mapping it to an ISO code is the renderer's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryTotal {
    pub id: String,
    pub value: f64,
}

pub type CountryTotals = Vec<CountryTotal>;

/// One bar of the intensity-by-country chart (one per record).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityPoint {
    pub country: String,
    pub intensity: f64,
}
