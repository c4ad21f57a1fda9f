//! 토질별 항공기 등급(ACR/PCR) 데이터.

pub mod rating_row;
pub mod rating_source;
pub mod rating_table;

pub use rating_row::*;
pub use rating_table::*;

use crate::soil::SoilType;

/// 등급 데이터 로드/검증 오류.
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("등급 데이터 파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("등급 데이터 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{soil_type} / {aircraft}: PCR 표본 구성이 잘못되었습니다: {reason}")]
    InvalidSampleSet {
        soil_type: SoilType,
        aircraft: String,
        reason: SampleSetError,
    },
    #[error("{soil_type} / {aircraft}: ACR 값이 유효하지 않습니다: {acr}")]
    InvalidAcr {
        soil_type: SoilType,
        aircraft: String,
        acr: f64,
    },
    #[error("{soil_type} / {aircraft}: 같은 토질에 중복된 기종입니다")]
    DuplicateAircraft {
        soil_type: SoilType,
        aircraft: String,
    },
}
