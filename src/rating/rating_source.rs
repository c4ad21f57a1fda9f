//! TOML 등급 데이터 파일을 읽어 [`RatingTable`]을 만든다.
//!
//! 형식:
//!
//! ```toml
//! [[soil]]
//! soil_type = "A-2-4"
//!
//! [[soil.aircraft]]
//! name = "B757-200"
//! acr = 336.5
//! samples = [
//!   { saturation = 70.0, pcr = 300.0 },
//!   { saturation = 75.0, pcr = 280.0 },
//!   { saturation = 80.0, pcr = 250.0 },
//!   { saturation = 85.0, pcr = 230.0 },
//! ]
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use super::rating_row::{CapacitySample, RatingRow};
use super::rating_table::RatingTable;
use super::RatingError;
use crate::soil::SoilType;

// 실측 토질별 데이터가 들어오기 전까지 쓰는 견본. A-2-4만 채워져 있다.
const BUILT_IN_RATINGS: &str = include_str!("../../data/ratings.toml");

#[derive(Debug, Deserialize)]
struct RatingFile {
    #[serde(default)]
    soil: Vec<SoilEntry>,
}

#[derive(Debug, Deserialize)]
struct SoilEntry {
    soil_type: SoilType,
    #[serde(default)]
    aircraft: Vec<AircraftEntry>,
}

#[derive(Debug, Deserialize)]
struct AircraftEntry {
    name: String,
    acr: f64,
    samples: Vec<CapacitySample>,
}

/// TOML 문자열을 등급 표로 변환한다.
pub fn parse(src: &str) -> Result<RatingTable, RatingError> {
    let file: RatingFile = toml::from_str(src)?;
    let rows = file.soil.into_iter().flat_map(|soil| {
        let soil_type = soil.soil_type;
        soil.aircraft.into_iter().map(move |a| RatingRow {
            soil_type,
            aircraft_name: a.name.trim().to_string(),
            acr: a.acr,
            capacity_samples: a.samples,
        })
    });
    RatingTable::from_rows(rows)
}

/// 파일에서 등급 표를 읽는다.
pub fn load_from_path(path: &Path) -> Result<RatingTable, RatingError> {
    let content = fs::read_to_string(path)?;
    let table = parse(&content)?;
    info!(
        path = %path.display(),
        soils = table.soil_types().len(),
        "rating data loaded"
    );
    Ok(table)
}

/// 빌드 시 포함된 견본 데이터.
pub fn built_in() -> Result<RatingTable, RatingError> {
    parse(BUILT_IN_RATINGS)
}

/// 경로가 지정되면 파일을, 아니면 내장 견본을 사용한다.
pub fn load(path: Option<&Path>) -> Result<RatingTable, RatingError> {
    match path {
        Some(p) => load_from_path(p),
        None => {
            let table = built_in()?;
            info!("built-in sample rating data loaded");
            Ok(table)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::RatingLookup;

    #[test]
    fn built_in_has_five_a24_aircraft() {
        let table = built_in().expect("built-in data");
        assert_eq!(table.soil_types(), vec![SoilType::A24]);
        assert_eq!(
            table.aircraft_names(SoilType::A24),
            vec!["Saab 340B", "DHC-7", "B757-200", "EMB-190 STD", "B717-200 HGW"]
        );
    }

    #[test]
    fn built_in_values_match_sample_sheet() {
        let table = built_in().expect("built-in data");
        let rows = table.lookup(SoilType::A24, &["B757-200"]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].acr, 336.5);
        let pcr: Vec<f64> = rows[0].capacity_samples.iter().map(|s| s.capacity).collect();
        assert_eq!(pcr, vec![300.0, 280.0, 250.0, 230.0]);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        assert!(matches!(parse("[[soil]\n"), Err(RatingError::Parse(_))));
    }

    #[test]
    fn unknown_soil_code_is_parse_error() {
        let src = "[[soil]]\nsoil_type = \"B-1\"\n";
        assert!(matches!(parse(src), Err(RatingError::Parse(_))));
    }

    #[test]
    fn empty_file_gives_empty_table() {
        let table = parse("").expect("empty");
        assert!(table.is_empty());
    }
}
