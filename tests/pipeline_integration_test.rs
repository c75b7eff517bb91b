use openaq_ingest::assembler;
use openaq_ingest::fallback::fallback_dataset;
use openaq_ingest::model::{LatestResponse, Status};
use openaq_ingest::regions::Region;

/// A latest response covering three cities, mixed pollutants, and the
/// defects the normalizer must tolerate: a station without coordinates
/// and a measurement without a value.
const LATEST_BODY: &str = r#"{
  "results": [
    {
      "city": "Leon",
      "location": "CICEG",
      "coordinates": { "latitude": 21.12, "longitude": -101.68 },
      "measurements": [
        { "parameter": "pm25", "value": 41, "unit": "µg/m³", "lastUpdated": "2024-05-01T12:00:00+00:00" },
        { "parameter": "o3", "value": 95, "unit": "µg/m³" }
      ]
    },
    {
      "city": "CDMX",
      "coordinates": { "latitude": 19.43, "longitude": -99.13 },
      "measurements": [
        { "parameter": "pm25", "value": 30, "unit": "µg/m³" },
        { "parameter": "no2", "unit": "µg/m³" }
      ]
    },
    {
      "city": "Celaya",
      "coordinates": { "latitude": 20.52, "longitude": -100.81 },
      "measurements": [
        { "parameter": "pm25", "value": 58, "unit": "µg/m³" }
      ]
    },
    {
      "city": "Monterrey",
      "measurements": [
        { "parameter": "pm25", "value": 64, "unit": "µg/m³" }
      ]
    }
  ]
}"#;

/// Test the full flow: wire JSON -> normalize -> classify -> views
#[test]
fn test_full_pipeline_from_wire_json() {
    let parsed: LatestResponse = serde_json::from_str(LATEST_BODY).expect("Fixture must parse");
    let view = assembler::assemble(&parsed.results, Region::Mexico, Some("PM25"));

    assert!(!view.used_fallback);
    // Monterrey has no coordinates, CDMX's NO2 has no value: 4 records survive.
    assert_eq!(view.records.len(), 4);
    assert_eq!(view.stats.stations_discarded, 1);
    assert_eq!(view.stats.measurements_dropped, 1);
    assert_eq!(view.pollutant_options, vec!["O3", "PM25"]);

    let selected = view.selected.expect("PM25 was selected");
    assert_eq!(selected.classified.len(), 3);

    let statuses: Vec<(String, Status)> = selected
        .classified
        .iter()
        .map(|c| (c.record.city.clone(), c.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("Leon".to_string(), Status::Bad),
            ("CDMX".to_string(), Status::Acceptable),
            ("Celaya".to_string(), Status::Bad),
        ]
    );

    assert_eq!(selected.series.unit.as_deref(), Some("µg/m³"));
    assert_eq!(selected.series.values, vec![41.0, 30.0, 58.0]);
    assert_eq!(selected.map_points.len(), 3);
    assert_eq!(selected.summary.cities, 3);
}

/// Test region narrowing on the same fixture
#[test]
fn test_pipeline_with_guanajuato_filter() {
    let parsed: LatestResponse = serde_json::from_str(LATEST_BODY).expect("Fixture must parse");
    let view = assembler::assemble(&parsed.results, Region::Guanajuato, Some("PM25"));

    // Only Leon and Celaya are on the allow-list; Leon's O3 survives too.
    let cities: Vec<&str> = view.records.iter().map(|r| r.city.as_str()).collect();
    assert_eq!(cities, vec!["Leon", "Leon", "Celaya"]);

    let selected = view.selected.expect("PM25 was selected");
    assert_eq!(selected.classified.len(), 2);
    assert_eq!(view.map_view, Region::Guanajuato.map_view());
}

/// Test the unconditional fallback substitution for an empty source
#[test]
fn test_empty_source_serves_fallback_dataset_exactly() {
    let parsed: LatestResponse =
        serde_json::from_str(r#"{"results": []}"#).expect("Fixture must parse");
    let view = assembler::assemble(&parsed.results, Region::Mexico, Some("PM25"));

    assert!(view.used_fallback);
    assert_eq!(view.records, fallback_dataset());
    assert_eq!(view.pollutant_options, vec!["PM25"]);

    let selected = view.selected.expect("PM25 was selected");
    let statuses: Vec<Status> = selected.classified.iter().map(|c| c.status).collect();
    assert_eq!(
        statuses,
        vec![
            Status::Acceptable,
            Status::Bad,
            Status::Bad,
            Status::Bad,
            Status::Bad,
        ]
    );
}

/// Test that a source where every station is defective also falls back
#[test]
fn test_all_defective_source_serves_fallback() {
    let body = r#"{
      "results": [
        { "city": "CDMX", "measurements": [ { "parameter": "pm25", "value": 20, "unit": "µg/m³" } ] },
        { "city": "Leon", "coordinates": { "latitude": 21.12 }, "measurements": [] }
      ]
    }"#;
    let parsed: LatestResponse = serde_json::from_str(body).expect("Fixture must parse");
    let view = assembler::assemble(&parsed.results, Region::Mexico, None);

    assert!(view.used_fallback);
    assert_eq!(view.records, fallback_dataset());
}

/// Test that re-running the pipeline yields identical views (stateless)
#[test]
fn test_pipeline_is_stateless_across_invocations() {
    let parsed: LatestResponse = serde_json::from_str(LATEST_BODY).expect("Fixture must parse");

    let first = assembler::assemble(&parsed.results, Region::Guanajuato, Some("PM25"));
    let second = assembler::assemble(&parsed.results, Region::Guanajuato, Some("PM25"));

    assert_eq!(first.records, second.records);
    assert_eq!(
        first.selected.as_ref().map(|s| &s.classified),
        second.selected.as_ref().map(|s| &s.classified)
    );
}

/// Test that a pollutant with no records after filtering is a valid
/// empty view, not an error
#[test]
fn test_selected_pollutant_absent_from_region_yields_empty_view() {
    let parsed: LatestResponse = serde_json::from_str(LATEST_BODY).expect("Fixture must parse");

    // O3 only exists in Leon; select it in a fixture-narrowed region
    // where it is absent by picking a code nobody reports.
    let view = assembler::assemble(&parsed.results, Region::Guanajuato, Some("SO2"));

    let selected = view.selected.expect("SO2 was selected");
    assert!(selected.classified.is_empty());
    assert_eq!(selected.series.unit, None);
    assert!(selected.map_points.is_empty());
    assert_eq!(selected.summary.records, 0);
}
