use serde::{Deserialize, Serialize};

use crate::soil::SoilType;

/// PCR 표본이 주어지는 포화도(%) 지점. 오름차순이며 항상 이 네 지점이어야 한다.
pub const SATURATION_LEVELS: [f64; 4] = [70.0, 75.0, 80.0, 85.0];

/// 특정 포화도에서의 PCR 표본 한 점.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacitySample {
    /// 포화도(%)
    pub saturation: f64,
    /// 해당 포화도의 PCR
    #[serde(rename = "pcr")]
    pub capacity: f64,
}

impl CapacitySample {
    pub const fn new(saturation: f64, capacity: f64) -> Self {
        Self {
            saturation,
            capacity,
        }
    }
}

/// 한 토질에서 항공기 한 기종의 등급 데이터.
///
/// ACR은 포화도와 무관한 고정값이고, PCR은 70/75/80/85% 네 지점에서만 표본으로 주어진다.
/// 값이 포화도에 따라 감소하는 것이 보통이지만 강제하지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRow {
    pub soil_type: SoilType,
    pub aircraft_name: String,
    pub acr: f64,
    pub capacity_samples: Vec<CapacitySample>,
}

/// 표본 구성이 잘못된 이유.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleSetError {
    #[error("PCR 표본은 4개여야 하지만 {0}개입니다")]
    WrongCount(usize),
    #[error("포화도 {expected}% 자리에 {found}% 표본이 있습니다")]
    UnexpectedLevel { expected: f64, found: f64 },
    #[error("포화도가 오름차순이 아닙니다 ({previous}% 다음 {next}%)")]
    NotIncreasing { previous: f64, next: f64 },
    #[error("포화도 {saturation}%의 PCR 값이 유효하지 않습니다: {capacity}")]
    InvalidCapacity { saturation: f64, capacity: f64 },
}

impl RatingRow {
    /// 70~85% 네 지점 PCR로 행을 만든다. 검증은 하지 않는다.
    pub fn new(
        soil_type: SoilType,
        aircraft_name: impl Into<String>,
        acr: f64,
        pcr: [f64; 4],
    ) -> Self {
        let capacity_samples = SATURATION_LEVELS
            .iter()
            .zip(pcr)
            .map(|(&saturation, capacity)| CapacitySample::new(saturation, capacity))
            .collect();
        Self {
            soil_type,
            aircraft_name: aircraft_name.into(),
            acr,
            capacity_samples,
        }
    }

    /// 표본 구성이 평가 가능한 형태인지 확인한다.
    pub fn validate_samples(&self) -> Result<(), SampleSetError> {
        let samples = &self.capacity_samples;
        if samples.len() != SATURATION_LEVELS.len() {
            return Err(SampleSetError::WrongCount(samples.len()));
        }
        for pair in samples.windows(2) {
            // NaN 포화도도 여기서 걸러진다.
            if !(pair[1].saturation > pair[0].saturation) {
                return Err(SampleSetError::NotIncreasing {
                    previous: pair[0].saturation,
                    next: pair[1].saturation,
                });
            }
        }
        for (sample, &expected) in samples.iter().zip(SATURATION_LEVELS.iter()) {
            if sample.saturation != expected {
                return Err(SampleSetError::UnexpectedLevel {
                    expected,
                    found: sample.saturation,
                });
            }
            if !sample.capacity.is_finite() || sample.capacity < 0.0 {
                return Err(SampleSetError::InvalidCapacity {
                    saturation: sample.saturation,
                    capacity: sample.capacity,
                });
            }
        }
        Ok(())
    }

    /// ACR이 유한한 0 이상 값인지 확인한다.
    pub fn acr_is_valid(&self) -> bool {
        self.acr.is_finite() && self.acr >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(samples: Vec<CapacitySample>) -> RatingRow {
        RatingRow {
            soil_type: SoilType::A24,
            aircraft_name: "DHC-7".into(),
            acr: 113.4,
            capacity_samples: samples,
        }
    }

    #[test]
    fn standard_row_is_valid() {
        let r = RatingRow::new(SoilType::A24, "DHC-7", 113.4, [300.0, 280.0, 250.0, 230.0]);
        assert_eq!(r.validate_samples(), Ok(()));
        assert!(r.acr_is_valid());
    }

    #[test]
    fn non_monotonic_capacities_are_accepted() {
        let r = RatingRow::new(SoilType::A24, "DHC-7", 113.4, [200.0, 260.0, 210.0, 240.0]);
        assert_eq!(r.validate_samples(), Ok(()));
    }

    #[test]
    fn missing_level_is_rejected() {
        let r = row(vec![
            CapacitySample::new(70.0, 300.0),
            CapacitySample::new(75.0, 280.0),
            CapacitySample::new(85.0, 230.0),
        ]);
        assert_eq!(r.validate_samples(), Err(SampleSetError::WrongCount(3)));
    }

    #[test]
    fn unsorted_levels_are_rejected() {
        let r = row(vec![
            CapacitySample::new(70.0, 300.0),
            CapacitySample::new(80.0, 250.0),
            CapacitySample::new(75.0, 280.0),
            CapacitySample::new(85.0, 230.0),
        ]);
        assert!(matches!(
            r.validate_samples(),
            Err(SampleSetError::NotIncreasing { .. })
        ));
    }

    #[test]
    fn foreign_level_is_rejected() {
        let r = row(vec![
            CapacitySample::new(65.0, 310.0),
            CapacitySample::new(70.0, 300.0),
            CapacitySample::new(75.0, 280.0),
            CapacitySample::new(80.0, 250.0),
        ]);
        assert_eq!(
            r.validate_samples(),
            Err(SampleSetError::UnexpectedLevel {
                expected: 70.0,
                found: 65.0
            })
        );
    }

    #[test]
    fn negative_capacity_is_rejected() {
        let r = RatingRow::new(SoilType::A24, "DHC-7", 113.4, [300.0, -1.0, 250.0, 230.0]);
        assert!(matches!(
            r.validate_samples(),
            Err(SampleSetError::InvalidCapacity { .. })
        ));
    }
}
