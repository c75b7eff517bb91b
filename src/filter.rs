//! Region filtering.
//!
//! Both filters are stable (surviving records keep their relative order),
//! non-mutating, and idempotent. They compose: the city filter narrows to
//! a subregion, the bounds filter independently drops coordinate outliers.

use crate::model::Record;
use crate::regions::{BoundingBox, Region};
use tracing::debug;

/// Returns the records belonging to `region`. Whole-country selection is
/// the identity; a subregion keeps only records whose city is on the
/// region's allow-list (case-sensitive exact match).
pub fn filter_by_region(records: &[Record], region: Region) -> Vec<Record> {
    match region.city_allow_list() {
        None => records.to_vec(),
        Some(cities) => {
            let kept: Vec<Record> = records
                .iter()
                .filter(|r| cities.contains(&r.city.as_str()))
                .cloned()
                .collect();
            debug!(
                "Region filter ({}): kept {}/{} records",
                region,
                kept.len(),
                records.len()
            );
            kept
        }
    }
}

/// Drops records whose coordinates fall outside `bounds`. Applied
/// independently of the city filter to sanitize outliers before mapping.
pub fn filter_by_bounds(records: &[Record], bounds: &BoundingBox) -> Vec<Record> {
    records
        .iter()
        .filter(|r| bounds.contains(r.latitude, r.longitude))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::MEXICO_BOUNDS;

    fn record(city: &str, lat: f64, lon: f64) -> Record {
        Record {
            city: city.to_string(),
            pollutant: "PM25".to_string(),
            value: 20.0,
            unit: "µg/m³".to_string(),
            latitude: lat,
            longitude: lon,
            station: None,
            timestamp: None,
        }
    }

    #[test]
    fn test_whole_country_is_identity() {
        let records = vec![record("Leon", 21.12, -101.68), record("CDMX", 19.43, -99.13)];
        let filtered = filter_by_region(&records, Region::Mexico);
        assert_eq!(filtered, records);
    }

    #[test]
    fn test_subregion_keeps_allow_listed_cities_in_order() {
        let records = vec![
            record("Leon", 21.12, -101.68),
            record("CDMX", 19.43, -99.13),
            record("Celaya", 20.52, -100.81),
        ];
        let filtered = filter_by_region(&records, Region::Guanajuato);
        let cities: Vec<&str> = filtered.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, vec!["Leon", "Celaya"]);
    }

    #[test]
    fn test_city_match_is_case_sensitive() {
        let records = vec![record("leon", 21.12, -101.68), record("LEON", 21.12, -101.68)];
        let filtered = filter_by_region(&records, Region::Guanajuato);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_region_filter_is_idempotent() {
        let records = vec![
            record("Leon", 21.12, -101.68),
            record("CDMX", 19.43, -99.13),
            record("Irapuato", 20.67, -101.35),
        ];
        let once = filter_by_region(&records, Region::Guanajuato);
        let twice = filter_by_region(&once, Region::Guanajuato);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let records = vec![record("Leon", 21.12, -101.68), record("CDMX", 19.43, -99.13)];
        let before = records.clone();
        let _ = filter_by_region(&records, Region::Guanajuato);
        assert_eq!(records, before);
    }

    #[test]
    fn test_bounds_filter_drops_outliers() {
        let records = vec![
            record("Leon", 21.12, -101.68),
            record("Leon", 52.5, 13.4), // mislocated station
        ];
        let filtered = filter_by_bounds(&records, &MEXICO_BOUNDS);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].latitude, 21.12);
    }

    #[test]
    fn test_filters_compose() {
        let records = vec![
            record("Leon", 21.12, -101.68),
            record("Celaya", 48.85, 2.35), // allow-listed city, bogus coordinates
            record("CDMX", 19.43, -99.13),
        ];
        let by_city = filter_by_region(&records, Region::Guanajuato);
        let sanitized = filter_by_bounds(&by_city, &MEXICO_BOUNDS);
        assert_eq!(sanitized.len(), 1);
        assert_eq!(sanitized[0].city, "Leon");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(filter_by_region(&[], Region::Guanajuato).is_empty());
        assert!(filter_by_bounds(&[], &MEXICO_BOUNDS).is_empty());
    }
}
