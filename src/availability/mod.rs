//! Charger availability data: scraped listings, the CSV sink they are
//! appended to, and utilization statistics over logged samples

mod records;
mod sink;
mod summary;

pub use records::{ChargerListing, UtilizationSample};
pub use sink::{CsvSink, SinkError, DEFAULT_LISTINGS_FILE};
pub use summary::{
    load_samples, load_samples_from_reader, overall_utilization, station_utilization,
    StationUtilization, DEFAULT_SAMPLES_FILE,
};
