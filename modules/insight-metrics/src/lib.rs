//! Filter engine and chart aggregators.
//!
//! Everything here is a pure function over borrowed records: no I/O, no
//! shared state. Callers recompute from scratch whenever the record set or
//! the selection changes.

pub mod country;
pub mod cross_tab;
pub mod dashboard;
pub mod distinct;
pub mod filter;
pub mod frequency;
pub mod radar;
mod tally;

pub use country::{country_totals, intensity_by_country, DEFAULT_COUNTRY_METRIC};
pub use cross_tab::{cross_tab, heatmap, restrict_cells};
pub use dashboard::{DashboardOptions, DashboardView, DEFAULT_TOP_N};
pub use distinct::{distinct_values, DistinctValues};
pub use filter::{apply_filters, matches};
pub use frequency::{aggregate_by_field, top_items};
pub use radar::{radar_profile, radar_profile_with, RadarOptions, TopicOrder, RADAR_TOPIC_LIMIT};
