//! Frequency tables and top-N label selection.

use insight_common::{Field, FrequencyEntry, FrequencyTable, InsightRecord, TopNList};

use crate::tally::Tally;

fn count_labels<'a>(
    records: impl IntoIterator<Item = &'a InsightRecord>,
    field: Field,
) -> Vec<(String, u64)> {
    let mut tally: Tally<u64> = Tally::new();
    for record in records {
        *tally.entry(&record.label(field)) += 1;
    }
    tally.into_entries()
}

/// Count of records per label of `field`, in first-seen order.
pub fn aggregate_by_field<'a>(
    records: impl IntoIterator<Item = &'a InsightRecord>,
    field: Field,
) -> FrequencyTable {
    count_labels(records, field)
        .into_iter()
        .map(|(label, value)| FrequencyEntry { label, value })
        .collect()
}

/// The `n` most frequent labels of `field`. Ties keep first-seen order.
pub fn top_items<'a>(
    records: impl IntoIterator<Item = &'a InsightRecord>,
    field: Field,
    n: usize,
) -> TopNList {
    let mut counts = count_labels(records, field);
    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts.into_iter().map(|(label, _)| label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_common::UNKNOWN_LABEL;

    fn topics(values: &[&str]) -> Vec<InsightRecord> {
        values
            .iter()
            .map(|t| InsightRecord::new().with(Field::Topic, *t))
            .collect()
    }

    #[test]
    fn empty_input_gives_empty_outputs() {
        let none: Vec<InsightRecord> = Vec::new();
        assert!(top_items(&none, Field::Topic, 10).is_empty());
        assert!(aggregate_by_field(&none, Field::Topic).is_empty());
    }

    #[test]
    fn frequency_table_keeps_first_seen_order() {
        let records = topics(&["gas", "oil", "gas", "market"]);
        let table = aggregate_by_field(&records, Field::Topic);
        let pairs: Vec<(&str, u64)> = table.iter().map(|e| (e.label.as_str(), e.value)).collect();
        assert_eq!(pairs, vec![("gas", 2), ("oil", 1), ("market", 1)]);
    }

    #[test]
    fn labels_are_trimmed_and_missing_is_unknown() {
        let mut records = topics(&[" oil", "oil "]);
        records.push(InsightRecord::new());
        records.push(InsightRecord::new().with(Field::Topic, ""));
        let table = aggregate_by_field(&records, Field::Topic);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].label, "oil");
        assert_eq!(table[0].value, 2);
        assert_eq!(table[1].label, UNKNOWN_LABEL);
        assert_eq!(table[1].value, 2);
    }

    #[test]
    fn top_items_sorts_descending() {
        let records = topics(&["a", "b", "b", "c", "c", "c"]);
        assert_eq!(top_items(&records, Field::Topic, 10), vec!["c", "b", "a"]);
    }

    #[test]
    fn ties_break_by_first_seen_not_alphabetical() {
        let records = topics(&["zeta", "alpha", "mid", "alpha", "zeta", "mid"]);
        assert_eq!(top_items(&records, Field::Topic, 3), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn truncates_to_n() {
        let records = topics(&["a", "b", "c", "d"]);
        let top = top_items(&records, Field::Topic, 2);
        assert_eq!(top, vec!["a", "b"]);
    }

    #[test]
    fn length_bounded_by_distinct_count() {
        let records = topics(&["a", "a", "b"]);
        for n in 0..5 {
            assert!(top_items(&records, Field::Topic, n).len() <= n.min(2));
        }
    }

    #[test]
    fn works_over_borrowed_subsets() {
        let records = topics(&["x", "y", "y"]);
        let subset: Vec<&InsightRecord> = records.iter().skip(1).collect();
        assert_eq!(top_items(subset.iter().copied(), Field::Topic, 5), vec!["y"]);
    }
}
