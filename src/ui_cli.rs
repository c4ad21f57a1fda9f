use std::io::{self, Write};

use crate::app::{self, AppError, CheckRequest};
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::output;
use crate::rating::{normalize_name, RatingTable};
use crate::soil::SoilType;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SoilType,
    Saturation,
    Aircraft,
    Check,
    Settings,
    Exit,
}

/// 현재 입력 상태를 한 줄로 보여준다.
pub fn print_current(tr: &Translator, cfg: &Config) {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!(
        "{}",
        tr.tf(
            keys::MAIN_MENU_CURRENT,
            &[
                ("soil", cfg.soil_type.to_string()),
                ("saturation", output::format_saturation(cfg.saturation_percent)),
                ("count", cfg.selected_aircraft.len().to_string()),
            ],
        )
    );
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    for key in [
        keys::MAIN_MENU_SOIL,
        keys::MAIN_MENU_SATURATION,
        keys::MAIN_MENU_AIRCRAFT,
        keys::MAIN_MENU_CHECK,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::SoilType),
            "2" => return Ok(MenuChoice::Saturation),
            "3" => return Ok(MenuChoice::Aircraft),
            "4" => return Ok(MenuChoice::Check),
            "5" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 토질 선택 메뉴를 처리한다.
pub fn handle_soil_type(
    tr: &Translator,
    cfg: &mut Config,
    table: &RatingTable,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SOIL_HEADING));
    for (i, soil) in SoilType::ALL.iter().enumerate() {
        let marker = if table.has_soil(*soil) { "" } else { " (-)" };
        println!("{:>2}) {soil}{marker}", i + 1);
    }
    loop {
        let sel = read_line(tr.t(keys::SOIL_PROMPT))?;
        if let Some(soil) = parse_soil_choice(&sel) {
            cfg.soil_type = soil;
            if !table.has_soil(soil) {
                println!(
                    "{}",
                    tr.tf(keys::SOIL_NO_DATA, &[("soil", soil.to_string())])
                );
            }
            return Ok(());
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    }
}

/// 포화도 입력을 처리한다. 0~100% 밖은 다시 묻는다.
pub fn handle_saturation(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    loop {
        let value = read_f64(tr, tr.t(keys::SATURATION_PROMPT))?;
        match app::validate_saturation(value) {
            Ok(v) => {
                cfg.saturation_percent = v;
                return Ok(());
            }
            Err(_) => println!("{}", tr.t(keys::SATURATION_OUT_OF_RANGE)),
        }
    }
}

/// 항공기 선택 메뉴를 처리한다.
pub fn handle_aircraft(
    tr: &Translator,
    cfg: &mut Config,
    table: &RatingTable,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::AIRCRAFT_HEADING));
    let names = table.aircraft_names(cfg.soil_type);
    if names.is_empty() {
        println!(
            "{}",
            tr.tf(keys::SOIL_NO_DATA, &[("soil", cfg.soil_type.to_string())])
        );
        return Ok(());
    }
    for (i, name) in names.iter().enumerate() {
        let mark = if is_selected(&cfg.selected_aircraft, name) { "x" } else { " " };
        println!("{:>2}) [{mark}] {name}", i + 1);
    }
    loop {
        let sel = read_line(tr.t(keys::AIRCRAFT_PROMPT))?;
        if sel.trim().is_empty() {
            return Ok(());
        }
        if let Some(selection) = parse_aircraft_selection(&sel, &names) {
            cfg.selected_aircraft = selection;
            println!(
                "{} {}",
                tr.t(keys::AIRCRAFT_SELECTED),
                cfg.selected_aircraft.join(", ")
            );
            return Ok(());
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    }
}

/// 현재 입력으로 판정하고 표를 출력한다.
pub fn handle_check(tr: &Translator, cfg: &Config, table: &RatingTable) -> Result<(), AppError> {
    let report = app::check(table, &CheckRequest::from_config(cfg))?;
    print!("{}", output::render_table(tr, &report, table.has_soil(cfg.soil_type)));
    Ok(())
}

/// 설정값과 실제 적용 언어가 다르면(auto 등) 둘 다 보여준다.
fn language_display(configured: &str, tr: &Translator) -> String {
    let active = tr.language_code();
    if configured.eq_ignore_ascii_case(active) {
        active.to_string()
    } else {
        format!("{configured} ({active})")
    }
}

fn is_selected(selected: &[String], name: &str) -> bool {
    let key = normalize_name(name);
    selected.iter().any(|s| normalize_name(s) == key)
}

/// 설정 메뉴를 처리한다. 언어를 바꾸면 번역기도 즉시 교체한다.
pub fn handle_settings(tr: &mut Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        language_display(&cfg.language, tr)
    );
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
    let code = sel.trim().to_lowercase();
    if code.is_empty() {
        return Ok(());
    }
    if !matches!(code.as_str(), "ko" | "en" | "auto") {
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
        return Ok(());
    }
    cfg.language = code;
    *tr = app::translator(cfg, None);
    println!("{} {}", tr.t(keys::SETTINGS_SAVED), cfg.language);
    Ok(())
}

/// 번호(1부터) 또는 코드로 토질을 고른다.
pub fn parse_soil_choice(input: &str) -> Option<SoilType> {
    let s = input.trim();
    if let Ok(n) = s.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| SoilType::ALL.get(i).copied());
    }
    s.parse().ok()
}

/// "1,3" 같은 번호 목록 또는 "a"(전체)를 기종 이름 목록으로 바꾼다. 입력 순서를 유지하고 중복은 한 번만 넣는다.
pub fn parse_aircraft_selection(input: &str, names: &[String]) -> Option<Vec<String>> {
    let s = input.trim();
    if s.eq_ignore_ascii_case("a") {
        return Some(names.to_vec());
    }
    let mut out: Vec<String> = Vec::new();
    for part in s.split([',', ' ']).filter(|p| !p.is_empty()) {
        let n: usize = part.parse().ok()?;
        let name = names.get(n.checked_sub(1)?)?;
        if !out.contains(name) {
            out.push(name.clone());
        }
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed",
        )));
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        ["Saab 340B", "DHC-7", "B757-200"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn soil_choice_by_number_or_code() {
        assert_eq!(parse_soil_choice("3"), Some(SoilType::A24));
        assert_eq!(parse_soil_choice("a-7-6"), Some(SoilType::A76));
        assert_eq!(parse_soil_choice("0"), None);
        assert_eq!(parse_soil_choice("12"), None);
    }

    #[test]
    fn aircraft_selection_keeps_input_order() {
        assert_eq!(
            parse_aircraft_selection("3, 1,3", &names()),
            Some(vec!["B757-200".to_string(), "Saab 340B".to_string()])
        );
    }

    #[test]
    fn aircraft_selection_all_and_invalid() {
        assert_eq!(parse_aircraft_selection("A", &names()), Some(names()));
        assert_eq!(parse_aircraft_selection("4", &names()), None);
        assert_eq!(parse_aircraft_selection("x", &names()), None);
    }

    #[test]
    fn selection_mark_ignores_case_and_hyphen_variants() {
        let selected = vec!["dhc\u{2010}7".to_string(), " b757-200".to_string()];
        assert!(is_selected(&selected, "DHC-7"));
        assert!(is_selected(&selected, "B757-200"));
        assert!(!is_selected(&selected, "Saab 340B"));
    }

    #[test]
    fn language_display_shows_resolved_code() {
        assert_eq!(language_display("auto", &Translator::new("ko")), "auto (ko)");
        assert_eq!(language_display("en", &Translator::new("en")), "en");
    }
}
