//! Every panel's input, computed from one filtered pass.

use serde::{Deserialize, Serialize};
use tracing::debug;

use insight_common::{
    CountryTotals, CrossTab, Field, FilterSelection, FrequencyTable, InsightRecord,
    IntensityPoint, RadarProfile,
};

use crate::country::{country_totals, intensity_by_country, DEFAULT_COUNTRY_METRIC};
use crate::cross_tab::heatmap;
use crate::filter::apply_filters;
use crate::frequency::aggregate_by_field;
use crate::radar::{radar_profile_with, RadarOptions, TopicOrder, RADAR_TOPIC_LIMIT};

/// Heatmap axis size.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub top_n: usize,
    pub radar_order: TopicOrder,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            radar_order: TopicOrder::FirstSeen,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub total_records: usize,
    pub filtered_records: usize,
    pub selection: FilterSelection,
    pub intensity_by_country: Vec<IntensityPoint>,
    pub pestle: FrequencyTable,
    pub sector: FrequencyTable,
    pub heatmap: CrossTab,
    pub radar: RadarProfile,
    /// Totals over the filtered set. The map endpoint serves unfiltered totals.
    pub country_totals: CountryTotals,
}

impl DashboardView {
    pub fn build(
        records: &[InsightRecord],
        selection: &FilterSelection,
        options: DashboardOptions,
    ) -> Self {
        let filtered = apply_filters(records, selection);
        let view = filtered.iter().copied();

        let radar = radar_profile_with(
            view.clone(),
            RadarOptions {
                limit: RADAR_TOPIC_LIMIT,
                order: options.radar_order,
            },
        );

        debug!(
            total = records.len(),
            filtered = filtered.len(),
            constraints = selection.len(),
            "Dashboard view built"
        );

        Self {
            total_records: records.len(),
            filtered_records: filtered.len(),
            selection: selection.clone(),
            intensity_by_country: intensity_by_country(view.clone()),
            pestle: aggregate_by_field(view.clone(), Field::Pestle),
            sector: aggregate_by_field(view.clone(), Field::Sector),
            heatmap: heatmap(view.clone(), options.top_n),
            radar,
            country_totals: country_totals(view, DEFAULT_COUNTRY_METRIC),
        }
    }
}
