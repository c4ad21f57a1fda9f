//! 판정 결과를 텍스트 표/JSON으로 출력한다.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::app::CheckReport;
use crate::i18n::{keys, Translator};
use crate::overload::{EvaluationOutcome, OverloadStatus};
use crate::rating::RatingTable;
use crate::soil::SoilType;

/// 출력 형식
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn format_saturation(value: f64) -> String {
    format!("{value}")
}

/// ACR은 판정에 쓴 값 그대로 보여준다.
pub fn format_acr(value: f64) -> String {
    format!("{value}")
}

pub fn status_label(tr: &Translator, status: OverloadStatus) -> &str {
    match status {
        OverloadStatus::Safe => tr.t(keys::RESULT_STATUS_SAFE),
        OverloadStatus::Overloaded => tr.t(keys::RESULT_STATUS_OVERLOADED),
    }
}

/// 판정 보고서를 사람이 읽는 표로 만든다.
///
/// 선택 기종이 없으면 표 대신 선택 안내 문구만 낸다.
/// 토질에 데이터가 없으면(예: `--all`이 빈 목록이 된 경우) 안내 문구 대신 데이터 없음을 알린다.
pub fn render_table(tr: &Translator, report: &CheckReport, soil_has_data: bool) -> String {
    let mut out = String::new();
    let results = match &report.outcome {
        EvaluationOutcome::NoSelection => {
            if soil_has_data {
                out.push_str(tr.t(keys::NO_SELECTION));
            } else {
                out.push_str(&tr.tf(keys::SOIL_NO_DATA, &[("soil", report.soil_type.to_string())]));
            }
            out.push('\n');
            return out;
        }
        EvaluationOutcome::Evaluated(results) => results,
    };

    out.push_str(&tr.tf(
        keys::RESULT_HEADING,
        &[
            ("saturation", format_saturation(report.saturation)),
            ("soil", report.soil_type.to_string()),
        ],
    ));
    out.push('\n');

    if !soil_has_data {
        out.push_str(&tr.tf(keys::SOIL_NO_DATA, &[("soil", report.soil_type.to_string())]));
        out.push('\n');
    }

    if results.is_empty() {
        out.push_str(tr.t(keys::RESULT_NO_MATCH));
        out.push('\n');
    } else {
        let header = [
            tr.t(keys::RESULT_COL_AIRCRAFT).to_string(),
            tr.t(keys::RESULT_COL_ACR).to_string(),
            tr.t(keys::RESULT_COL_PCR).to_string(),
            tr.t(keys::RESULT_COL_STATUS).to_string(),
        ];
        let body: Vec<[String; 4]> = results
            .iter()
            .map(|r| {
                let mark = if r.clamped { "*" } else { "" };
                [
                    r.aircraft_name.clone(),
                    format_acr(r.acr),
                    format!("{:.2}{mark}", r.interpolated_capacity),
                    status_label(tr, r.status).to_string(),
                ]
            })
            .collect();
        let mut widths = header.clone().map(|h| display_width(&h));
        for row in &body {
            for (w, cell) in widths.iter_mut().zip(row.iter()) {
                *w = (*w).max(display_width(cell));
            }
        }
        push_row(&mut out, &header, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("  "));
        out.push('\n');
        for row in &body {
            push_row(&mut out, row, &widths);
        }
        out.push_str(&tr.tf(
            keys::RESULT_SUMMARY,
            &[
                ("total", report.summary.total.to_string()),
                ("overloaded", report.summary.overloaded.to_string()),
                ("safe", report.summary.safe.to_string()),
            ],
        ));
        out.push('\n');
        if results.iter().any(|r| r.clamped) {
            out.push_str(tr.t(keys::RESULT_NOTE_CLAMPED));
            out.push('\n');
        }
    }

    if !report.missing.is_empty() {
        out.push_str(&tr.tf(
            keys::RESULT_NOTE_MISSING,
            &[("names", report.missing.join(", "))],
        ));
        out.push('\n');
    }
    out
}

/// 보고서를 JSON으로 직렬화한다.
pub fn render_json(report: &CheckReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// 등급 데이터 목록(토질별 기종, ACR, PCR 표본)을 출력용 문자열로 만든다.
pub fn render_listing(tr: &Translator, table: &RatingTable, soil: Option<SoilType>) -> String {
    let soils = match soil {
        Some(s) => vec![s],
        None => table.soil_types(),
    };
    let mut out = String::new();
    if table.is_empty() {
        out.push_str(tr.t(keys::LIST_EMPTY));
        out.push('\n');
        return out;
    }
    for soil in soils {
        let rows = table.rows(soil);
        if rows.is_empty() {
            out.push_str(&tr.tf(keys::SOIL_NO_DATA, &[("soil", soil.to_string())]));
            out.push('\n');
            continue;
        }
        out.push_str(&tr.tf(
            keys::LIST_SOIL_LINE,
            &[("soil", soil.to_string()), ("count", rows.len().to_string())],
        ));
        out.push('\n');
        for row in rows {
            let samples: Vec<String> = row
                .capacity_samples
                .iter()
                .map(|s| format!("{}%={}", s.saturation, s.capacity))
                .collect();
            out.push_str(&format!(
                "  {:<16} ACR {:>7}  PCR {}\n",
                row.aircraft_name,
                format_acr(row.acr),
                samples.join(" ")
            ));
        }
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, w)| pad(cell, *w))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(cell));
    format!("{cell}{}", " ".repeat(fill))
}

// 한글은 터미널에서 두 칸을 차지한다.
fn display_width(s: &str) -> usize {
    s.chars()
        .map(|c| if is_wide(c) { 2 } else { 1 })
        .sum()
}

fn is_wide(c: char) -> bool {
    matches!(c as u32, 0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFF00..=0xFF60)
}
