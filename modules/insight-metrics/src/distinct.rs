//! Distinct raw values per categorical field, used to populate filter controls.

use std::collections::HashSet;

use serde::Serialize;

use insight_common::{Field, InsightRecord, Scalar};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistinctValues {
    pub countries: Vec<Scalar>,
    pub cities: Vec<Scalar>,
    pub regions: Vec<Scalar>,
    pub topics: Vec<Scalar>,
    pub sectors: Vec<Scalar>,
    pub pestles: Vec<Scalar>,
    pub swots: Vec<Scalar>,
    pub sources: Vec<Scalar>,
    pub end_years: Vec<Scalar>,
}

impl DistinctValues {
    fn slot_mut(&mut self, field: Field) -> Option<&mut Vec<Scalar>> {
        match field {
            Field::Country => Some(&mut self.countries),
            Field::City => Some(&mut self.cities),
            Field::Region => Some(&mut self.regions),
            Field::Topic => Some(&mut self.topics),
            Field::Sector => Some(&mut self.sectors),
            Field::Pestle => Some(&mut self.pestles),
            Field::Swot => Some(&mut self.swots),
            Field::Source => Some(&mut self.sources),
            Field::EndYear => Some(&mut self.end_years),
            _ => None,
        }
    }
}

/// Numbers and text never collapse into each other: `2030` and `"2030"`
/// are different options, as they are different stored values.
#[derive(PartialEq, Eq, Hash)]
enum Key {
    Number(u64),
    Text(String),
}

fn key(value: &Scalar) -> Key {
    match value {
        Scalar::Number(n) => Key::Number(n.to_bits()),
        Scalar::Text(s) => Key::Text(s.clone()),
    }
}

/// Distinct values of every field in [`Field::DISTINCT`], first-seen order.
/// Absent and blank values are not options.
pub fn distinct_values<'a, I>(records: I) -> DistinctValues
where
    I: IntoIterator<Item = &'a InsightRecord> + Clone,
{
    let mut out = DistinctValues::default();
    for field in Field::DISTINCT {
        let mut seen: HashSet<Key> = HashSet::new();
        let Some(slot) = out.slot_mut(field) else {
            continue;
        };
        for record in records.clone() {
            let Some(value) = record.get(field) else {
                continue;
            };
            if value.is_blank() {
                continue;
            }
            if seen.insert(key(value)) {
                slot.push(value.clone());
            }
        }
    }
    out
}
