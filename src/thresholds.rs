//! Pollutant health thresholds.
//!
//! The single source of truth for the health-risk decision rules. All
//! classification goes through `rule_for` rather than hardcoding limits
//! elsewhere.

use crate::model::Status;

/// Decision rule for one pollutant: strictly above `threshold` classifies
/// as `above`, at or below classifies as `at_or_below`.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdRule {
    pub threshold: f64,
    pub above: Status,
    pub at_or_below: Status,
}

/// Fixed rules, keyed by canonical uppercase pollutant code.
///
/// Thresholds follow common short-term guideline values:
/// PM25/PM10 in µg/m³, NO2/O3/SO2 in µg/m³, CO in ppm.
static THRESHOLD_TABLE: &[(&str, ThresholdRule)] = &[
    (
        "PM25",
        ThresholdRule {
            threshold: 35.0,
            above: Status::Bad,
            at_or_below: Status::Acceptable,
        },
    ),
    (
        "PM10",
        ThresholdRule {
            threshold: 50.0,
            above: Status::Bad,
            at_or_below: Status::Acceptable,
        },
    ),
    (
        "NO2",
        ThresholdRule {
            threshold: 200.0,
            above: Status::Elevated,
            at_or_below: Status::Normal,
        },
    ),
    (
        "O3",
        ThresholdRule {
            threshold: 120.0,
            above: Status::Elevated,
            at_or_below: Status::Normal,
        },
    ),
    (
        "CO",
        ThresholdRule {
            threshold: 9.0,
            above: Status::High,
            at_or_below: Status::Normal,
        },
    ),
    (
        "SO2",
        ThresholdRule {
            threshold: 75.0,
            above: Status::High,
            at_or_below: Status::Normal,
        },
    ),
];

/// Looks up the decision rule for a pollutant code. Case-sensitive on the
/// canonical uppercase form; returns `None` for unrecognized codes, which
/// the classifier maps to `Status::Monitoring`.
pub fn rule_for(pollutant: &str) -> Option<&'static ThresholdRule> {
    THRESHOLD_TABLE
        .iter()
        .find(|(code, _)| *code == pollutant)
        .map(|(_, rule)| rule)
}
