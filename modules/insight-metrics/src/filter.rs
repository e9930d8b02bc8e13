//! Conjunctive, case-insensitive equality filtering.

use std::borrow::Cow;

use insight_common::{Field, FilterSelection, InsightRecord};

/// Lower-cased constraints, computed once per filter pass.
struct Prepared {
    field: Option<Field>,
    value: String,
}

fn prepare(selection: &FilterSelection) -> Vec<Prepared> {
    selection
        .constraints()
        .map(|c| Prepared {
            field: c.field,
            value: c.value.to_lowercase(),
        })
        .collect()
}

fn passes(record: &InsightRecord, constraints: &[Prepared]) -> bool {
    constraints.iter().all(|c| {
        let actual = c
            .field
            .map(|f| record.raw_text(f))
            .unwrap_or(Cow::Borrowed(""));
        actual.to_lowercase() == c.value
    })
}

/// Whether a single record satisfies every active constraint.
pub fn matches(record: &InsightRecord, selection: &FilterSelection) -> bool {
    passes(record, &prepare(selection))
}

/// Records satisfying the selection, in their original order.
///
/// The comparison is against the untrimmed value (numbers in display form);
/// a missing field compares as the empty string.
pub fn apply_filters<'a>(
    records: &'a [InsightRecord],
    selection: &FilterSelection,
) -> Vec<&'a InsightRecord> {
    let constraints = prepare(selection);
    records
        .iter()
        .filter(|r| passes(r, &constraints))
        .collect()
}
