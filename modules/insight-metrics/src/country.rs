//! Per-country sums (choropleth) and the per-record intensity series.

use insight_common::{CountryTotal, CountryTotals, Field, InsightRecord, IntensityPoint};

use crate::tally::Tally;

pub const DEFAULT_COUNTRY_METRIC: Field = Field::Intensity;

/// Sum of `metric` per country, first-seen order.
///
/// Country names are trimmed but not case-folded, so `"USA"` and `"usa"`
/// are separate entries. Records without a country are skipped.
pub fn country_totals<'a>(
    records: impl IntoIterator<Item = &'a InsightRecord>,
    metric: Field,
) -> CountryTotals {
    let mut totals: Tally<f64> = Tally::new();
    for record in records {
        let Some(country) = record.trimmed(Field::Country) else {
            continue;
        };
        *totals.entry(&country) += record.number(metric);
    }
    totals
        .into_entries()
        .into_iter()
        .map(|(id, value)| CountryTotal { id, value })
        .collect()
}

/// One bar per record: country label and intensity.
pub fn intensity_by_country<'a>(
    records: impl IntoIterator<Item = &'a InsightRecord>,
) -> Vec<IntensityPoint> {
    records
        .into_iter()
        .map(|r| IntensityPoint {
            country: r.label(Field::Country).into_owned(),
            intensity: r.number(Field::Intensity),
        })
        .collect()
}
