use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::i18n::{self, Translator};
use crate::overload::{self, EvaluationOutcome, OverloadSummary};
use crate::rating::{rating_source, RatingLookup, RatingTable};
use crate::soil::SoilType;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("등급 데이터 오류: {0}")]
    Rating(#[from] crate::rating::RatingError),
    #[error("평가 오류: {0}")]
    Evaluation(#[from] overload::EvaluationError),
    #[error("JSON 출력 오류: {0}")]
    Json(#[from] serde_json::Error),
    #[error("포화도는 0~100% 범위여야 합니다: {0}")]
    SaturationOutOfRange(f64),
}

/// 한 번의 판정 요청. 토질, 포화도, 선택 기종을 명시적으로 담는다.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckRequest {
    pub soil_type: SoilType,
    pub saturation: f64,
    pub aircraft: Vec<String>,
}

impl CheckRequest {
    /// 설정에 저장된 마지막 입력으로 요청을 만든다.
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            soil_type: cfg.soil_type,
            saturation: cfg.saturation_percent,
            aircraft: cfg.selected_aircraft.clone(),
        }
    }
}

/// 판정 결과와 표시용 부가 정보.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    pub soil_type: SoilType,
    pub saturation: f64,
    pub outcome: EvaluationOutcome,
    /// 요청했지만 데이터에 없는 기종
    pub missing: Vec<String>,
    pub summary: OverloadSummary,
}

/// 등급 표를 조회하고 과하중 판정을 수행한다.
///
/// 선택 기종이 없으면 `NoSelection`, 선택은 있지만 하나도 매칭되지 않으면 빈 `Evaluated`를 돌려준다.
/// 포화도 범위는 여기서 검사하지 않는다(엔진은 모든 실수를 받는다).
pub fn check(table: &RatingTable, request: &CheckRequest) -> Result<CheckReport, AppError> {
    let rows = table.lookup(request.soil_type, &request.aircraft);
    let missing = table.missing(request.soil_type, &request.aircraft);
    if !missing.is_empty() {
        debug!(soil = %request.soil_type, ?missing, "selected aircraft without rating data");
    }
    if !request.aircraft.is_empty() && !table.has_soil(request.soil_type) {
        warn!(soil = %request.soil_type, "no rating data for soil type");
    }
    let outcome = if rows.is_empty() && !request.aircraft.is_empty() {
        EvaluationOutcome::Evaluated(Vec::new())
    } else {
        overload::evaluate(&rows, request.saturation)?
    };
    let summary = overload::summarize(outcome.results());
    debug!(
        soil = %request.soil_type,
        saturation = request.saturation,
        total = summary.total,
        overloaded = summary.overloaded,
        "overload check done"
    );
    Ok(CheckReport {
        soil_type: request.soil_type,
        saturation: request.saturation,
        outcome,
        missing,
        summary,
    })
}

/// 입력 화면의 포화도 제약(0~100%)을 검사한다.
pub fn validate_saturation(value: f64) -> Result<f64, AppError> {
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(AppError::SaturationOutOfRange(value))
    }
}

/// 데이터 파일(없으면 내장 견본)에서 등급 표를 읽는다.
pub fn load_ratings(path: Option<&Path>) -> Result<RatingTable, AppError> {
    let table = rating_source::load(path)?;
    if table.is_empty() {
        warn!("rating data contains no aircraft");
    }
    Ok(table)
}

/// CLI 플래그와 설정으로 번역기를 만든다.
pub fn translator(cfg: &Config, cli_lang: Option<&str>) -> Translator {
    let lang = i18n::resolve_language(cli_lang, Some(cfg.language.as_str()));
    Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref())
}

/// 대화형 CLI의 메인 루프를 실행한다.
pub fn run(config: &mut Config, table: &RatingTable, tr: &mut Translator) -> Result<(), AppError> {
    info!("interactive session started");
    loop {
        ui_cli::print_current(tr, config);
        match ui_cli::main_menu(tr)? {
            MenuChoice::SoilType => ui_cli::handle_soil_type(tr, config, table)?,
            MenuChoice::Saturation => ui_cli::handle_saturation(tr, config)?,
            MenuChoice::Aircraft => ui_cli::handle_aircraft(tr, config, table)?,
            MenuChoice::Check => ui_cli::handle_check(tr, config, table)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overload::OverloadStatus;

    fn table() -> RatingTable {
        rating_source::built_in().expect("built-in data")
    }

    fn request(soil_type: SoilType, saturation: f64, aircraft: &[&str]) -> CheckRequest {
        CheckRequest {
            soil_type,
            saturation,
            aircraft: aircraft.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn empty_selection_is_no_selection() {
        let report = check(&table(), &request(SoilType::A24, 75.0, &[])).expect("check");
        assert!(report.outcome.is_no_selection());
        assert!(report.missing.is_empty());
    }

    #[test]
    fn unmatched_selection_is_empty_evaluation() {
        let report =
            check(&table(), &request(SoilType::A24, 75.0, &["Concorde"])).expect("check");
        assert_eq!(report.outcome, EvaluationOutcome::Evaluated(Vec::new()));
        assert_eq!(report.missing, vec!["Concorde"]);
    }

    #[test]
    fn soil_without_data_reports_all_missing() {
        let report =
            check(&table(), &request(SoilType::A6, 75.0, &["DHC-7", "B757-200"])).expect("check");
        assert!(report.outcome.results().is_empty());
        assert_eq!(report.missing, vec!["DHC-7", "B757-200"]);
    }

    #[test]
    fn default_selection_at_77_5() {
        let report = check(
            &table(),
            &request(SoilType::A24, 77.5, &["Saab 340B", "DHC-7", "B757-200"]),
        )
        .expect("check");
        let statuses: Vec<OverloadStatus> =
            report.outcome.results().iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                OverloadStatus::Safe,
                OverloadStatus::Safe,
                OverloadStatus::Overloaded
            ]
        );
        assert_eq!(report.summary.overloaded, 1);
    }

    #[test]
    fn saturation_bounds_are_inclusive() {
        assert!(validate_saturation(0.0).is_ok());
        assert!(validate_saturation(100.0).is_ok());
        assert!(matches!(
            validate_saturation(100.1),
            Err(AppError::SaturationOutOfRange(_))
        ));
        assert!(validate_saturation(f64::NAN).is_err());
    }
}
