//! Sparse two-axis sums (heatmap source).

use insight_common::{CrossTab, CrossTabCell, Field, InsightRecord};

use crate::frequency::top_items;
use crate::tally::Tally;

/// Sum of `value_field` per `(x, y)` label pair.
///
/// Only pairs that occur in the data are emitted, grouped by `y` in
/// first-seen order and by `x` in first-seen order within each `y`.
pub fn cross_tab<'a>(
    records: impl IntoIterator<Item = &'a InsightRecord>,
    x_field: Field,
    y_field: Field,
    value_field: Field,
) -> CrossTab {
    let mut rows: Tally<Tally<f64>> = Tally::new();
    for record in records {
        let y = record.label(y_field);
        let x = record.label(x_field);
        *rows.entry(&y).entry(&x) += record.number(value_field);
    }

    rows.into_entries()
        .into_iter()
        .flat_map(|(y, cols)| {
            cols.into_entries()
                .into_iter()
                .map(move |(x, value)| CrossTabCell {
                    x,
                    y: y.clone(),
                    value,
                })
        })
        .collect()
}

/// Keep cells whose axes are both in the given label sets.
pub fn restrict_cells(cells: CrossTab, top_x: &[String], top_y: &[String]) -> CrossTab {
    cells
        .into_iter()
        .filter(|c| top_x.contains(&c.x) && top_y.contains(&c.y))
        .collect()
}

/// Sector × topic relevance heatmap, limited to the `top_n` most frequent
/// sectors and topics of the same record set.
pub fn heatmap<'a, I>(records: I, top_n: usize) -> CrossTab
where
    I: IntoIterator<Item = &'a InsightRecord> + Clone,
{
    let top_sectors = top_items(records.clone(), Field::Sector, top_n);
    let top_topics = top_items(records.clone(), Field::Topic, top_n);
    let cells = cross_tab(records, Field::Sector, Field::Topic, Field::Relevance);
    restrict_cells(cells, &top_sectors, &top_topics)
}
