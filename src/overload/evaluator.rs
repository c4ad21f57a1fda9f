use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use super::interpolation::interpolate_capacity;
use crate::rating::{RatingRow, SampleSetError};

/// 기종별 판정.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverloadStatus {
    Safe,
    Overloaded,
}

impl OverloadStatus {
    pub fn is_overloaded(&self) -> bool {
        matches!(self, OverloadStatus::Overloaded)
    }
}

impl fmt::Display for OverloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverloadStatus::Safe => f.write_str("Safe"),
            OverloadStatus::Overloaded => f.write_str("Overloaded"),
        }
    }
}

/// 평가 결과 한 행.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub aircraft_name: String,
    pub acr: f64,
    /// 소수 둘째 자리로 반올림한 보간 PCR
    pub interpolated_capacity: f64,
    pub status: OverloadStatus,
    /// 요청 포화도가 표본 범위(70~85%) 밖이어서 가장자리 값을 썼는지 여부
    pub clamped: bool,
}

/// 평가 호출의 결과. 선택된 기종이 없는 상태는 빈 결과 표와 구분된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "results", rename_all = "snake_case")]
pub enum EvaluationOutcome {
    NoSelection,
    Evaluated(Vec<EvaluationResult>),
}

impl EvaluationOutcome {
    pub fn results(&self) -> &[EvaluationResult] {
        match self {
            EvaluationOutcome::NoSelection => &[],
            EvaluationOutcome::Evaluated(results) => results,
        }
    }

    pub fn is_no_selection(&self) -> bool {
        matches!(self, EvaluationOutcome::NoSelection)
    }
}

/// 평가 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("{aircraft}: PCR 표본 구성이 잘못되어 평가할 수 없습니다: {reason}")]
    InvalidSampleSet {
        aircraft: String,
        reason: SampleSetError,
    },
    #[error("포화도가 숫자가 아닙니다(NaN)")]
    SaturationNotANumber,
}

/// 요청 포화도에서 각 기종의 PCR을 보간하고 ACR과 비교해 판정한다.
///
/// 순수 함수다. 입력 순서를 그대로 유지하며, 행이 비어 있으면 `NoSelection`을 돌려준다.
/// 판정은 반올림 전 값으로 하며 ACR이 PCR과 같으면 Safe이다.
/// 표본 구성이 잘못된 행이 하나라도 있으면 부분 결과 없이 실패한다.
pub fn evaluate(
    rows: &[RatingRow],
    saturation: f64,
) -> Result<EvaluationOutcome, EvaluationError> {
    if rows.is_empty() {
        return Ok(EvaluationOutcome::NoSelection);
    }
    if saturation.is_nan() {
        return Err(EvaluationError::SaturationNotANumber);
    }
    let mut results = Vec::with_capacity(rows.len());
    for row in rows {
        row.validate_samples()
            .map_err(|reason| EvaluationError::InvalidSampleSet {
                aircraft: row.aircraft_name.clone(),
                reason,
            })?;
        // 표본 검증과 NaN 검사를 통과했으므로 None은 나오지 않는다.
        let value = interpolate_capacity(&row.capacity_samples, saturation)
            .ok_or(EvaluationError::SaturationNotANumber)?;
        let status = if row.acr > value.capacity {
            OverloadStatus::Overloaded
        } else {
            OverloadStatus::Safe
        };
        trace!(
            aircraft = %row.aircraft_name,
            acr = row.acr,
            pcr = value.capacity,
            %status,
            "evaluated"
        );
        results.push(EvaluationResult {
            aircraft_name: row.aircraft_name.clone(),
            acr: row.acr,
            interpolated_capacity: round2(value.capacity),
            status,
            clamped: value.clamped,
        });
    }
    Ok(EvaluationOutcome::Evaluated(results))
}

/// 소수 둘째 자리 반올림.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 판정 집계.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverloadSummary {
    pub total: usize,
    pub overloaded: usize,
    pub safe: usize,
}

pub fn summarize(results: &[EvaluationResult]) -> OverloadSummary {
    let overloaded = results.iter().filter(|r| r.status.is_overloaded()).count();
    OverloadSummary {
        total: results.len(),
        overloaded,
        safe: results.len() - overloaded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soil::SoilType;

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(265.004), 265.0);
        assert_eq!(round2(12.345_6), 12.35);
        assert_eq!(round2(300.0), 300.0);
    }

    #[test]
    fn summary_counts_statuses() {
        let rows = vec![
            RatingRow::new(SoilType::A24, "Saab 340B", 60.9, [300.0, 280.0, 250.0, 230.0]),
            RatingRow::new(SoilType::A24, "B757-200", 336.5, [300.0, 280.0, 250.0, 230.0]),
            RatingRow::new(SoilType::A24, "B717-200 HGW", 328.5, [300.0, 280.0, 250.0, 230.0]),
        ];
        let outcome = evaluate(&rows, 75.0).expect("evaluate");
        assert_eq!(
            summarize(outcome.results()),
            OverloadSummary {
                total: 3,
                overloaded: 2,
                safe: 1
            }
        );
    }

    #[test]
    fn no_selection_has_no_results() {
        let outcome = evaluate(&[], 75.0).expect("evaluate");
        assert!(outcome.is_no_selection());
        assert!(outcome.results().is_empty());
    }
}
