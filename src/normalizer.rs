use crate::fallback::fallback_dataset;
use crate::model::{Record, StationReading};
use tracing::{debug, warn};

/// City name used when upstream omits the field.
const UNKNOWN_CITY: &str = "Unknown";

#[derive(Debug, Clone, Default)]
pub struct NormalizeStats {
    pub stations_seen: usize,
    pub stations_discarded: usize,
    pub measurements_seen: usize,
    pub measurements_dropped: usize,
    pub records: usize,
}

pub struct Normalizer;

impl Normalizer {
    /// Flattens raw station readings into records.
    ///
    /// Total over all inputs — malformed fields are resolved by omission
    /// or defaulting at the smallest granularity, never by aborting:
    /// a station missing either coordinate is discarded whole, a
    /// measurement missing its value is dropped individually, a missing
    /// pollutant becomes the empty string, a missing city becomes the
    /// placeholder. Pollutant codes are uppercased.
    pub fn normalize(readings: &[StationReading]) -> (Vec<Record>, NormalizeStats) {
        let mut records = Vec::new();
        let mut stats = NormalizeStats::default();

        for reading in readings {
            stats.stations_seen += 1;

            let (latitude, longitude) = match reading.coordinates {
                Some(coords) => match (coords.latitude, coords.longitude) {
                    (Some(lat), Some(lon)) => (lat, lon),
                    _ => {
                        stats.stations_discarded += 1;
                        debug!(
                            "Discarding station {:?}: partial coordinates",
                            reading.location
                        );
                        continue;
                    }
                },
                None => {
                    stats.stations_discarded += 1;
                    debug!("Discarding station {:?}: no coordinates", reading.location);
                    continue;
                }
            };

            let city = reading
                .city
                .clone()
                .unwrap_or_else(|| UNKNOWN_CITY.to_string());

            for measurement in &reading.measurements {
                stats.measurements_seen += 1;

                let value = match measurement.value {
                    Some(v) => v,
                    None => {
                        stats.measurements_dropped += 1;
                        continue;
                    }
                };

                let pollutant = measurement
                    .parameter
                    .as_deref()
                    .unwrap_or("")
                    .to_uppercase();

                records.push(Record {
                    city: city.clone(),
                    pollutant,
                    value,
                    unit: measurement.unit.clone().unwrap_or_default(),
                    latitude,
                    longitude,
                    station: reading.location.clone(),
                    timestamp: measurement.last_updated,
                });
            }
        }

        stats.records = records.len();

        if stats.stations_discarded > 0 || stats.measurements_dropped > 0 {
            warn!(
                "Normalized {} stations into {} records ({} stations discarded, {} measurements dropped)",
                stats.stations_seen, stats.records, stats.stations_discarded, stats.measurements_dropped
            );
        } else {
            debug!(
                "Normalized {} stations into {} records",
                stats.stations_seen, stats.records
            );
        }

        (records, stats)
    }

    /// Normalizes and applies the fallback rule: zero resulting records
    /// (empty input, unreachable source, or everything discarded) are
    /// replaced wholesale by the fixed fallback dataset.
    ///
    /// Returns the dataset, whether the fallback was substituted, and the
    /// normalization stats for logging.
    pub fn normalize_or_fallback(
        readings: &[StationReading],
    ) -> (Vec<Record>, bool, NormalizeStats) {
        let (records, stats) = Self::normalize(readings);

        if records.is_empty() {
            warn!("No usable records from upstream, substituting fallback dataset");
            return (fallback_dataset(), true, stats);
        }

        (records, false, stats)
    }
}
