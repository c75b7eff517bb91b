use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One station entry from the OpenAQ `latest` endpoint.
///
/// Everything except `measurements` is optional on the wire: upstream
/// regularly omits the city name and, less often, the coordinate pair.
/// Validation happens in the normalizer, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct StationReading {
    pub city: Option<String>,
    pub location: Option<String>,
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Coordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// One pollutant measurement inside a station entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Measurement {
    pub parameter: Option<String>,
    pub value: Option<f64>,
    pub unit: Option<String>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Envelope of the OpenAQ `latest` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestResponse {
    #[serde(default)]
    pub results: Vec<StationReading>,
}

/// A normalized measurement row, the pipeline's atomic unit.
///
/// Invariants established by the normalizer: `pollutant` is uppercase
/// (empty when upstream omitted it), `value` is present, and both
/// coordinates are populated.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub city: String,
    pub pollutant: String,
    pub value: f64,
    pub unit: String,
    pub latitude: f64,
    pub longitude: f64,
    pub station: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Health-risk label attached to a record by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Bad,
    Acceptable,
    Elevated,
    High,
    Normal,
    /// No threshold rule exists for the pollutant. Informational,
    /// neither good nor bad.
    Monitoring,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Status::Bad => "Bad",
            Status::Acceptable => "Acceptable",
            Status::Elevated => "Elevated",
            Status::High => "High",
            Status::Normal => "Normal",
            Status::Monitoring => "Monitoring",
        };
        write!(f, "{}", label)
    }
}

/// A record paired with its health status. Built on demand per pollutant
/// selection and discarded after the view is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecord {
    pub record: Record,
    pub status: Status,
}
