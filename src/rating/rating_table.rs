use std::collections::BTreeMap;

use tracing::debug;

use super::rating_row::RatingRow;
use super::RatingError;
use crate::soil::SoilType;

/// 토질별 등급 행을 조회하는 창구. 정적 표, 파일, DB 등 어떤 출처든 이 계약만 지키면 된다.
pub trait RatingLookup {
    /// 요청한 기종 이름 순서대로 해당 토질의 행을 돌려준다.
    ///
    /// 빈 요청은 빈 결과이고, 표에 없는 기종은 조용히 빠진다. 같은 이름을 두 번 요청해도 한 번만 나온다.
    fn lookup<S: AsRef<str>>(&self, soil_type: SoilType, aircraft_names: &[S]) -> Vec<RatingRow>;
}

/// 토질 → 항공기 등급 행 목록. 행 순서는 데이터 출처의 순서를 유지한다.
#[derive(Debug, Clone, Default)]
pub struct RatingTable {
    tables: BTreeMap<SoilType, Vec<RatingRow>>,
}

impl RatingTable {
    /// 행 목록으로 표를 만든다. 잘못된 행이나 중복 기종이 있으면 처음 것에서 실패한다.
    pub fn from_rows(rows: impl IntoIterator<Item = RatingRow>) -> Result<Self, RatingError> {
        let mut tables: BTreeMap<SoilType, Vec<RatingRow>> = BTreeMap::new();
        for row in rows {
            if !row.acr_is_valid() {
                return Err(RatingError::InvalidAcr {
                    soil_type: row.soil_type,
                    aircraft: row.aircraft_name,
                    acr: row.acr,
                });
            }
            if let Err(reason) = row.validate_samples() {
                return Err(RatingError::InvalidSampleSet {
                    soil_type: row.soil_type,
                    aircraft: row.aircraft_name,
                    reason,
                });
            }
            let entry = tables.entry(row.soil_type).or_default();
            let key = normalize_name(&row.aircraft_name);
            if entry.iter().any(|r| normalize_name(&r.aircraft_name) == key) {
                return Err(RatingError::DuplicateAircraft {
                    soil_type: row.soil_type,
                    aircraft: row.aircraft_name,
                });
            }
            entry.push(row);
        }
        Ok(Self { tables })
    }

    /// 데이터가 있는 토질 목록(열거 순서).
    pub fn soil_types(&self) -> Vec<SoilType> {
        self.tables.keys().copied().collect()
    }

    pub fn has_soil(&self, soil_type: SoilType) -> bool {
        self.tables.get(&soil_type).is_some_and(|rows| !rows.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(Vec::is_empty)
    }

    /// 해당 토질의 전체 행.
    pub fn rows(&self, soil_type: SoilType) -> &[RatingRow] {
        self.tables
            .get(&soil_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// 해당 토질에 등록된 기종 이름(데이터 순서).
    pub fn aircraft_names(&self, soil_type: SoilType) -> Vec<String> {
        self.rows(soil_type)
            .iter()
            .map(|r| r.aircraft_name.clone())
            .collect()
    }

    /// 요청했지만 표에 없는 기종 이름을 요청 순서대로 돌려준다.
    pub fn missing<S: AsRef<str>>(&self, soil_type: SoilType, aircraft_names: &[S]) -> Vec<String> {
        let rows = self.rows(soil_type);
        let mut seen: Vec<String> = Vec::new();
        let mut out = Vec::new();
        for name in aircraft_names {
            let key = normalize_name(name.as_ref());
            if seen.contains(&key) {
                continue;
            }
            if !rows.iter().any(|r| normalize_name(&r.aircraft_name) == key) {
                out.push(name.as_ref().trim().to_string());
            }
            seen.push(key);
        }
        out
    }

    fn find(&self, soil_type: SoilType, key: &str) -> Option<&RatingRow> {
        self.rows(soil_type)
            .iter()
            .find(|r| normalize_name(&r.aircraft_name) == key)
    }
}

impl RatingLookup for RatingTable {
    fn lookup<S: AsRef<str>>(&self, soil_type: SoilType, aircraft_names: &[S]) -> Vec<RatingRow> {
        let mut seen: Vec<String> = Vec::new();
        let mut out = Vec::with_capacity(aircraft_names.len());
        for name in aircraft_names {
            let key = normalize_name(name.as_ref());
            if seen.contains(&key) {
                continue;
            }
            match self.find(soil_type, &key) {
                Some(row) => out.push(row.clone()),
                None => debug!(soil = %soil_type, aircraft = name.as_ref(), "no rating row"),
            }
            seen.push(key);
        }
        out
    }
}

/// 기종 이름 비교용 정규화. 앞뒤 공백 제거, 유니코드 하이픈 변형을 '-'로, 대소문자 무시.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2212}' => '-',
            other => other,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_hyphen_variants_and_case() {
        assert_eq!(normalize_name(" DHC\u{2010}7 "), "dhc-7");
        assert_eq!(normalize_name("b757-200"), normalize_name("B757\u{2013}200"));
    }

    #[test]
    fn duplicate_aircraft_in_same_soil_is_rejected() {
        let rows = vec![
            RatingRow::new(SoilType::A24, "DHC-7", 113.4, [300.0, 280.0, 250.0, 230.0]),
            RatingRow::new(SoilType::A24, "dhc\u{2010}7", 113.4, [300.0, 280.0, 250.0, 230.0]),
        ];
        assert!(matches!(
            RatingTable::from_rows(rows),
            Err(RatingError::DuplicateAircraft { .. })
        ));
    }

    #[test]
    fn same_aircraft_in_other_soil_is_fine() {
        let rows = vec![
            RatingRow::new(SoilType::A24, "DHC-7", 113.4, [300.0, 280.0, 250.0, 230.0]),
            RatingRow::new(SoilType::A6, "DHC-7", 113.4, [180.0, 150.0, 120.0, 100.0]),
        ];
        let table = RatingTable::from_rows(rows).expect("table");
        assert_eq!(table.soil_types(), vec![SoilType::A24, SoilType::A6]);
    }

    #[test]
    fn negative_acr_is_rejected() {
        let rows = vec![RatingRow::new(
            SoilType::A24,
            "DHC-7",
            -1.0,
            [300.0, 280.0, 250.0, 230.0],
        )];
        assert!(matches!(
            RatingTable::from_rows(rows),
            Err(RatingError::InvalidAcr { .. })
        ));
    }
}
