//! Fallback dataset.
//!
//! Substituted wholesale whenever normalization yields zero records, no
//! matter whether the upstream fetch failed, succeeded empty, or was
//! malformed. This is a business rule, not an error path: the dashboard
//! always has something to show. The exact fixture values are a swappable
//! constant, not upstream data.

use crate::model::Record;

struct FallbackEntry {
    city: &'static str,
    pollutant: &'static str,
    value: f64,
    unit: &'static str,
    latitude: f64,
    longitude: f64,
}

/// Illustrative PM25 readings for five major cities.
static FALLBACK_ENTRIES: &[FallbackEntry] = &[
    FallbackEntry {
        city: "CDMX",
        pollutant: "PM25",
        value: 28.4,
        unit: "µg/m³",
        latitude: 19.4326,
        longitude: -99.1332,
    },
    FallbackEntry {
        city: "Guadalajara",
        pollutant: "PM25",
        value: 45.2,
        unit: "µg/m³",
        latitude: 20.6597,
        longitude: -103.3496,
    },
    FallbackEntry {
        city: "Monterrey",
        pollutant: "PM25",
        value: 51.7,
        unit: "µg/m³",
        latitude: 25.6866,
        longitude: -100.3161,
    },
    FallbackEntry {
        city: "Leon",
        pollutant: "PM25",
        value: 41.0,
        unit: "µg/m³",
        latitude: 21.1236,
        longitude: -101.6827,
    },
    FallbackEntry {
        city: "Puebla",
        pollutant: "PM25",
        value: 38.9,
        unit: "µg/m³",
        latitude: 19.0414,
        longitude: -98.2063,
    },
];

/// Builds the fallback dataset. Returns fresh, independently owned
/// records on every call.
pub fn fallback_dataset() -> Vec<Record> {
    FALLBACK_ENTRIES
        .iter()
        .map(|e| Record {
            city: e.city.to_string(),
            pollutant: e.pollutant.to_string(),
            value: e.value,
            unit: e.unit.to_string(),
            latitude: e.latitude,
            longitude: e.longitude,
            station: None,
            timestamp: None,
        })
        .collect()
}
