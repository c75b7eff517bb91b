//! Dataset assembly.
//!
//! Orchestrates normalize → region filter → classify into the views the
//! presentation layer consumes: the full table, per-pollutant chart
//! series, the classified table, map points with a region preset, and
//! summary aggregates. The pipeline is stateless — every invocation runs
//! the whole chain on fresh values, nothing is cached between selections.

use crate::classifier;
use crate::filter::filter_by_region;
use crate::model::{ClassifiedRecord, Record, StationReading, Status};
use crate::normalizer::{NormalizeStats, Normalizer};
use crate::regions::{BoundingBox, MapView, Region, MEXICO_BOUNDS};
use tracing::info;

/// Parallel (city, value) arrays for charting one pollutant.
///
/// `unit` is taken from the first record of the subview; all records for
/// one pollutant are assumed to share one unit. `None` when the subview
/// is empty, in which case the consumer skips the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PollutantSeries {
    pub pollutant: String,
    pub cities: Vec<String>,
    pub values: Vec<f64>,
    pub unit: Option<String>,
}

/// One plottable point for the map layer.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub value: f64,
    pub unit: String,
    pub status: Status,
}

/// Aggregates over the selected pollutant subview.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub records: usize,
    pub cities: usize,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub mean_value: Option<f64>,
    /// Count per status, in first-seen order over the classified subview.
    pub status_counts: Vec<(Status, usize)>,
}

/// Everything derived for one selected pollutant.
#[derive(Debug, Clone)]
pub struct PollutantView {
    pub pollutant: String,
    pub classified: Vec<ClassifiedRecord>,
    pub series: PollutantSeries,
    pub map_points: Vec<MapPoint>,
    pub summary: Summary,
}

/// Output of one full pipeline invocation.
#[derive(Debug, Clone)]
pub struct DatasetView {
    pub region: Region,
    /// Map preset for the selected region, shown before any point is plotted.
    pub map_view: MapView,
    /// Full filtered table, in upstream order.
    pub records: Vec<Record>,
    /// Whether the fallback dataset was substituted for empty input.
    pub used_fallback: bool,
    pub stats: NormalizeStats,
    /// Distinct pollutant codes present, lexicographic ascending.
    pub pollutant_options: Vec<String>,
    /// Present when a pollutant was selected.
    pub selected: Option<PollutantView>,
}

/// Distinct pollutant codes, lexicographic ascending, duplicates removed.
pub fn pollutant_options(records: &[Record]) -> Vec<String> {
    let mut options: Vec<String> = records.iter().map(|r| r.pollutant.clone()).collect();
    options.sort();
    options.dedup();
    options
}

/// Records matching one pollutant code, original order preserved.
pub fn pollutant_subview(records: &[Record], pollutant: &str) -> Vec<Record> {
    records
        .iter()
        .filter(|r| r.pollutant == pollutant)
        .cloned()
        .collect()
}

/// Builds the charting series for a pollutant subview.
pub fn series_for(subview: &[Record], pollutant: &str) -> PollutantSeries {
    PollutantSeries {
        pollutant: pollutant.to_string(),
        cities: subview.iter().map(|r| r.city.clone()).collect(),
        values: subview.iter().map(|r| r.value).collect(),
        unit: subview.first().map(|r| r.unit.clone()),
    }
}

/// Builds map points from classified records, dropping coordinate
/// outliers that fall outside `bounds`.
pub fn map_points(classified: &[ClassifiedRecord], bounds: &BoundingBox) -> Vec<MapPoint> {
    classified
        .iter()
        .filter(|c| bounds.contains(c.record.latitude, c.record.longitude))
        .map(|c| MapPoint {
            latitude: c.record.latitude,
            longitude: c.record.longitude,
            city: c.record.city.clone(),
            value: c.record.value,
            unit: c.record.unit.clone(),
            status: c.status,
        })
        .collect()
}

/// Computes summary aggregates over a classified subview.
pub fn summarize(classified: &[ClassifiedRecord]) -> Summary {
    let values: Vec<f64> = classified.iter().map(|c| c.record.value).collect();

    let mut cities: Vec<&str> = classified.iter().map(|c| c.record.city.as_str()).collect();
    cities.sort();
    cities.dedup();

    let mut status_counts: Vec<(Status, usize)> = Vec::new();
    for c in classified {
        match status_counts.iter_mut().find(|(s, _)| *s == c.status) {
            Some((_, count)) => *count += 1,
            None => status_counts.push((c.status, 1)),
        }
    }

    let min_value = values.iter().cloned().fold(None, |acc: Option<f64>, v| {
        Some(acc.map_or(v, |a| a.min(v)))
    });
    let max_value = values.iter().cloned().fold(None, |acc: Option<f64>, v| {
        Some(acc.map_or(v, |a| a.max(v)))
    });
    let mean_value = if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    };

    Summary {
        records: classified.len(),
        cities: cities.len(),
        min_value,
        max_value,
        mean_value,
        status_counts,
    }
}

/// Runs one full pipeline invocation: normalize (with fallback), filter
/// by region, and, when a pollutant is selected, derive the classified
/// subview with its series, map points, and summary.
pub fn assemble(
    readings: &[StationReading],
    region: Region,
    selected_pollutant: Option<&str>,
) -> DatasetView {
    let (dataset, used_fallback, stats) = Normalizer::normalize_or_fallback(readings);
    let records = filter_by_region(&dataset, region);
    let options = pollutant_options(&records);

    info!(
        "Assembled dataset for {}: {} records, {} pollutants{}",
        region,
        records.len(),
        options.len(),
        if used_fallback { " (fallback data)" } else { "" }
    );

    let selected = selected_pollutant.map(|pollutant| {
        let subview = pollutant_subview(&records, pollutant);
        let classified = classifier::classify(&subview, pollutant);
        PollutantView {
            pollutant: pollutant.to_string(),
            series: series_for(&subview, pollutant),
            map_points: map_points(&classified, &MEXICO_BOUNDS),
            summary: summarize(&classified),
            classified,
        }
    });

    DatasetView {
        region,
        map_view: region.map_view(),
        records,
        used_fallback,
        stats,
        pollutant_options: options,
        selected,
    }
}
