pub mod charts;
pub mod config;
pub mod error;
pub mod record;
pub mod selection;

pub use charts::*;
pub use config::Config;
pub use error::InsightError;
pub use record::*;
pub use selection::FilterSelection;
