use std::fs;

use aircraft_overload_checker::{
    app::{self, CheckRequest},
    rating::{rating_source, RatingError, RatingLookup},
    soil::SoilType,
};

const SMALL: &str = r#"
[[soil]]
soil_type = "A-6"

[[soil.aircraft]]
name = "Test Jet"
acr = 120.0
samples = [
  { saturation = 70.0, pcr = 150.0 },
  { saturation = 75.0, pcr = 130.0 },
  { saturation = 80.0, pcr = 110.0 },
  { saturation = 85.0, pcr = 90.0 },
]
"#;

#[test]
fn lookup_keeps_request_order_and_drops_unknown() {
    let table = rating_source::built_in().expect("built-in data");
    let rows = table.lookup(SoilType::A24, &["B757-200", "Unknown", "Saab 340B"]);
    let names: Vec<&str> = rows.iter().map(|r| r.aircraft_name.as_str()).collect();
    assert_eq!(names, vec!["B757-200", "Saab 340B"]);
    assert!(table.lookup::<&str>(SoilType::A24, &[]).is_empty());
    assert!(table.lookup(SoilType::A75, &["DHC-7"]).is_empty());
}

#[test]
fn data_file_replaces_built_in_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ratings.toml");
    fs::write(&path, SMALL).expect("write");

    let table = app::load_ratings(Some(path.as_path())).expect("load");
    assert_eq!(table.soil_types(), vec![SoilType::A6]);
    assert!(!table.has_soil(SoilType::A24));

    let report = app::check(
        &table,
        &CheckRequest {
            soil_type: SoilType::A6,
            saturation: 77.5,
            aircraft: vec!["test jet".into()],
        },
    )
    .expect("check");
    let r = &report.outcome.results()[0];
    assert_eq!(r.interpolated_capacity, 120.0);
    assert!(!r.status.is_overloaded());
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = rating_source::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
    assert!(matches!(err, RatingError::Io(_)));
}

#[test]
fn invalid_rows_are_rejected_at_load() {
    let wrong_level = SMALL.replace("saturation = 80.0", "saturation = 82.0");
    assert!(matches!(
        rating_source::parse(&wrong_level),
        Err(RatingError::InvalidSampleSet { .. })
    ));

    let negative_acr = SMALL.replace("acr = 120.0", "acr = -1.0");
    assert!(matches!(
        rating_source::parse(&negative_acr),
        Err(RatingError::InvalidAcr { .. })
    ));

    let duplicate = format!(
        "{SMALL}\n[[soil.aircraft]]\nname = \"TEST JET\"\nacr = 1.0\nsamples = [\n  {{ saturation = 70.0, pcr = 1.0 }},\n  {{ saturation = 75.0, pcr = 1.0 }},\n  {{ saturation = 80.0, pcr = 1.0 }},\n  {{ saturation = 85.0, pcr = 1.0 }},\n]\n"
    );
    assert!(matches!(
        rating_source::parse(&duplicate),
        Err(RatingError::DuplicateAircraft { .. })
    ));
}
