//! Per-station utilization summary over logged availability samples

use super::records::UtilizationSample;
use csv::Reader;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;

/// Default availability log read by the utilization summary
pub const DEFAULT_SAMPLES_FILE: &str = "utilization_log.csv";

/// Mean utilization observed at one station
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationUtilization {
    pub station: String,
    pub mean_utilization_pct: f64,
    pub samples: usize,
}

/// Load availability samples from a CSV file
pub fn load_samples<P: AsRef<Path>>(path: P) -> Result<Vec<UtilizationSample>, Box<dyn Error>> {
    let reader = Reader::from_path(path)?;
    read_samples(reader)
}

/// Load availability samples from any reader (e.g., string buffer, network stream)
pub fn load_samples_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<UtilizationSample>, Box<dyn Error>> {
    read_samples(Reader::from_reader(reader))
}

fn read_samples<R: std::io::Read>(
    mut reader: Reader<R>,
) -> Result<Vec<UtilizationSample>, Box<dyn Error>> {
    let mut samples = Vec::new();
    for result in reader.deserialize() {
        let sample: UtilizationSample = result?;
        samples.push(sample);
    }
    Ok(samples)
}

/// Mean utilization per station, sorted by station name.
/// Samples from stations reporting zero chargers are skipped.
pub fn station_utilization(samples: &[UtilizationSample]) -> Vec<StationUtilization> {
    let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

    for sample in samples {
        match sample.utilization_pct() {
            Some(pct) => {
                let entry = totals.entry(sample.station.as_str()).or_insert((0.0, 0));
                entry.0 += pct;
                entry.1 += 1;
            }
            None => log::warn!("Skipping sample for {} with no chargers", sample.station),
        }
    }

    totals
        .into_iter()
        .map(|(station, (sum, count))| StationUtilization {
            station: station.to_string(),
            mean_utilization_pct: sum / count as f64,
            samples: count,
        })
        .collect()
}

/// Mean utilization across every usable sample
pub fn overall_utilization(samples: &[UtilizationSample]) -> Option<f64> {
    let values: Vec<f64> = samples.iter().filter_map(|s| s.utilization_pct()).collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
