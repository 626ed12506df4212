//! Charger availability records as produced by the listing scraper and as
//! stored in the utilization log

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One outlet group scraped from a station listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargerListing {
    #[serde(rename = "Capacity")]
    pub capacity: String,
    #[serde(rename = "Availability")]
    pub availability: String,
}

/// A timestamped availability observation for one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationSample {
    #[serde(
        rename = "Timestamp",
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "Station")]
    pub station: String,
    #[serde(rename = "Available Chargers")]
    pub available_chargers: u32,
    #[serde(rename = "Total Chargers")]
    pub total_chargers: u32,
}

impl UtilizationSample {
    /// Share of chargers in use, in percent. None for a station reporting
    /// no chargers.
    pub fn utilization_pct(&self) -> Option<f64> {
        if self.total_chargers == 0 {
            return None;
        }
        Some((1.0 - self.available_chargers as f64 / self.total_chargers as f64) * 100.0)
    }
}

fn serialize_timestamp<S: Serializer>(
    ts: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string())
}

/// Accepts `2025-02-10 14:30:00` as well as the ISO `T` separator
fn deserialize_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveDateTime, D::Error> {
    let text = String::deserialize(deserializer)?;
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn sample(available: u32, total: u32) -> UtilizationSample {
        UtilizationSample {
            timestamp: NaiveDate::from_ymd_opt(2025, 2, 10)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
            station: "Columbus Supercharger".to_string(),
            available_chargers: available,
            total_chargers: total,
        }
    }

    #[test]
    fn test_utilization_pct() {
        assert_relative_eq!(sample(3, 4).utilization_pct().unwrap(), 25.0);
        assert_relative_eq!(sample(0, 8).utilization_pct().unwrap(), 100.0);
        assert_eq!(sample(0, 0).utilization_pct(), None);
    }

    #[test]
    fn test_sample_csv_columns() {
        let data = "Timestamp,Station,Available Chargers,Total Chargers\n\
                    2025-02-10 14:30:00,Columbus Supercharger,3,4\n\
                    2025-02-10T15:00:00,Columbus Supercharger,2,4\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let samples: Vec<UtilizationSample> =
            reader.deserialize().collect::<Result<_, _>>().unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0], sample(3, 4));
        assert_eq!(samples[1].timestamp.format("%H:%M").to_string(), "15:00");
    }

    #[test]
    fn test_bad_timestamp_rejected() {
        let data = "Timestamp,Station,Available Chargers,Total Chargers\nyesterday,A,1,2\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let result: Result<Vec<UtilizationSample>, _> = reader.deserialize().collect();
        assert!(result.is_err());
    }
}
