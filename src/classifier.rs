//! Health-status classification.
//!
//! Pure functions over normalized records. The classifier is total: every
//! record receives exactly one status, with `Monitoring` standing in for
//! pollutants that have no threshold rule.

use crate::model::{ClassifiedRecord, Record, Status};
use crate::thresholds;

/// Classifies a single value against the rule for `pollutant`.
///
/// Strict greater-than: a value exactly at the threshold gets the
/// lower-risk label.
pub fn classify_value(pollutant: &str, value: f64) -> Status {
    match thresholds::rule_for(pollutant) {
        Some(rule) => {
            if value > rule.threshold {
                rule.above
            } else {
                rule.at_or_below
            }
        }
        None => Status::Monitoring,
    }
}

/// Classifies every record of a dataset already narrowed to a single
/// pollutant code. The caller is responsible for the narrowing; records
/// are classified against `pollutant` regardless of their own code.
pub fn classify(records: &[Record], pollutant: &str) -> Vec<ClassifiedRecord> {
    records
        .iter()
        .map(|record| ClassifiedRecord {
            record: record.clone(),
            status: classify_value(pollutant, record.value),
        })
        .collect()
}
