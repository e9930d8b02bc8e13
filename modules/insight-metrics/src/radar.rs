//! Per-topic metric profile for the radar chart.
//!
//! Each topic's intensity, relevance and likelihood are averaged over its
//! records, then rescaled to 0–100 against the per-metric maximum across
//! every topic group (not only the displayed ones).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use insight_common::{Field, InsightError, InsightRecord, RadarEntry, RadarMetrics, RadarProfile};

use crate::tally::Tally;

/// Topics shown on the radar.
pub const RADAR_TOPIC_LIMIT: usize = 5;

/// Which topic groups make the cut.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicOrder {
    /// The first topics encountered while grouping.
    #[default]
    FirstSeen,
    /// Topics with the most records; ties keep first-seen order.
    Frequency,
}

impl FromStr for TopicOrder {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "first_seen" => Ok(TopicOrder::FirstSeen),
            "frequency" => Ok(TopicOrder::Frequency),
            other => Err(InsightError::Validation(format!("unknown topic order: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadarOptions {
    pub limit: usize,
    pub order: TopicOrder,
}

impl Default for RadarOptions {
    fn default() -> Self {
        Self {
            limit: RADAR_TOPIC_LIMIT,
            order: TopicOrder::FirstSeen,
        }
    }
}

#[derive(Default)]
struct TopicSums {
    totals: RadarMetrics,
    count: u64,
}

impl TopicSums {
    fn mean(&self) -> RadarMetrics {
        // count is at least 1: a group only exists once a record lands in it
        let n = self.count as f64;
        RadarMetrics {
            intensity: self.totals.intensity / n,
            relevance: self.totals.relevance / n,
            likelihood: self.totals.likelihood / n,
        }
    }
}

fn scale(value: f64, max: f64) -> f64 {
    if max == 0.0 {
        0.0
    } else {
        value / max * 100.0
    }
}

/// First five topics encountered, normalized to 0–100.
pub fn radar_profile<'a>(records: impl IntoIterator<Item = &'a InsightRecord>) -> RadarProfile {
    radar_profile_with(records, RadarOptions::default())
}

pub fn radar_profile_with<'a>(
    records: impl IntoIterator<Item = &'a InsightRecord>,
    options: RadarOptions,
) -> RadarProfile {
    let mut groups: Tally<TopicSums> = Tally::new();
    for record in records {
        let Some(topic) = record.trimmed(Field::Topic) else {
            continue;
        };
        let sums = groups.entry(&topic);
        sums.totals.intensity += record.number(Field::Intensity);
        sums.totals.relevance += record.number(Field::Relevance);
        sums.totals.likelihood += record.number(Field::Likelihood);
        sums.count += 1;
    }

    let mut groups: Vec<(String, RadarMetrics, u64)> = groups
        .into_entries()
        .into_iter()
        .map(|(name, sums)| (name, sums.mean(), sums.count))
        .collect();

    let max = groups
        .iter()
        .fold(RadarMetrics::default(), |acc, (_, mean, _)| acc.max(*mean));

    if options.order == TopicOrder::Frequency {
        groups.sort_by(|a, b| b.2.cmp(&a.2));
    }

    groups
        .into_iter()
        .take(options.limit)
        .map(|(name, mean, _)| RadarEntry {
            name,
            metrics: RadarMetrics {
                intensity: scale(mean.intensity, max.intensity),
                relevance: scale(mean.relevance, max.relevance),
                likelihood: scale(mean.likelihood, max.likelihood),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(topic: &str, intensity: i32, relevance: i32, likelihood: i32) -> InsightRecord {
        InsightRecord::new()
            .with(Field::Topic, topic)
            .with(Field::Intensity, intensity)
            .with(Field::Relevance, relevance)
            .with(Field::Likelihood, likelihood)
    }

    #[test]
    fn averages_then_normalizes_against_max_mean() {
        let records = vec![
            record("oil", 10, 2, 4),
            record("oil", 20, 4, 4),
            record("gas", 5, 6, 2),
        ];
        let profile = radar_profile(&records);
        assert_eq!(profile.len(), 2);

        let oil = &profile[0];
        assert_eq!(oil.name, "oil");
        assert_eq!(oil.metrics.intensity, 100.0);
        assert_eq!(oil.metrics.relevance, 50.0);
        assert_eq!(oil.metrics.likelihood, 100.0);

        let gas = &profile[1];
        assert!((gas.metrics.intensity - 5.0 / 15.0 * 100.0).abs() < 1e-9);
        assert_eq!(gas.metrics.relevance, 100.0);
        assert_eq!(gas.metrics.likelihood, 50.0);
    }

    #[test]
    fn max_topic_scores_exactly_one_hundred() {
        let records = vec![
            record("a", 3, 7, 1),
            record("b", 9, 1, 1),
            record("c", 6, 2, 2),
        ];
        let profile = radar_profile(&records);
        let best_intensity = profile
            .iter()
            .max_by(|x, y| x.metrics.intensity.total_cmp(&y.metrics.intensity))
            .unwrap();
        assert_eq!(best_intensity.name, "b");
        assert_eq!(best_intensity.metrics.intensity, 100.0);
    }

    #[test]
    fn zero_maximum_yields_zero_not_nan() {
        let records = vec![record("a", 0, 0, 0), InsightRecord::new().with(Field::Topic, "b")];
        let profile = radar_profile(&records);
        for entry in &profile {
            assert_eq!(entry.metrics, RadarMetrics::default());
        }
    }

    #[test]
    fn records_without_topic_are_skipped() {
        let records = vec![
            InsightRecord::new().with(Field::Intensity, 99),
            InsightRecord::new().with(Field::Topic, "  ").with(Field::Intensity, 99),
            record("oil", 1, 1, 1),
        ];
        let profile = radar_profile(&records);
        assert_eq!(profile.len(), 1);
        assert_eq!(profile[0].name, "oil");
    }

    #[test]
    fn takes_first_five_encountered_not_largest() {
        let mut records: Vec<InsightRecord> = ["t1", "t2", "t3", "t4", "t5"]
            .iter()
            .map(|t| record(t, 1, 1, 1))
            .collect();
        for _ in 0..3 {
            records.push(record("t6", 50, 50, 50));
        }
        let profile = radar_profile(&records);
        let names: Vec<&str> = profile.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["t1", "t2", "t3", "t4", "t5"]);
        // t6 is hidden but still sets the scale
        assert!((profile[0].metrics.intensity - 2.0).abs() < 1e-9);
    }

    #[test]
    fn frequency_order_prefers_busy_topics() {
        let mut records: Vec<InsightRecord> = ["t1", "t2", "t3", "t4", "t5"]
            .iter()
            .map(|t| record(t, 1, 1, 1))
            .collect();
        records.push(record("t6", 1, 1, 1));
        records.push(record("t6", 1, 1, 1));
        let options = RadarOptions {
            limit: 2,
            order: TopicOrder::Frequency,
        };
        let profile = radar_profile_with(&records, options);
        let names: Vec<&str> = profile.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["t6", "t1"]);
    }

    #[test]
    fn topic_order_parses() {
        assert_eq!("frequency".parse::<TopicOrder>().unwrap(), TopicOrder::Frequency);
        assert_eq!("first_seen".parse::<TopicOrder>().unwrap(), TopicOrder::FirstSeen);
        assert!("loudest".parse::<TopicOrder>().is_err());
    }
}
