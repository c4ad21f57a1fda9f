use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SOIL: &str = "main_menu.soil";
    pub const MAIN_MENU_SATURATION: &str = "main_menu.saturation";
    pub const MAIN_MENU_AIRCRAFT: &str = "main_menu.aircraft";
    pub const MAIN_MENU_CHECK: &str = "main_menu.check";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const MAIN_MENU_CURRENT: &str = "main_menu.current";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const SOIL_HEADING: &str = "soil.heading";
    pub const SOIL_PROMPT: &str = "soil.prompt";
    pub const SOIL_NO_DATA: &str = "soil.no_data";

    pub const SATURATION_PROMPT: &str = "saturation.prompt";
    pub const SATURATION_OUT_OF_RANGE: &str = "saturation.out_of_range";

    pub const AIRCRAFT_HEADING: &str = "aircraft.heading";
    pub const AIRCRAFT_PROMPT: &str = "aircraft.prompt";
    pub const AIRCRAFT_SELECTED: &str = "aircraft.selected";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_COL_AIRCRAFT: &str = "result.col_aircraft";
    pub const RESULT_COL_ACR: &str = "result.col_acr";
    pub const RESULT_COL_PCR: &str = "result.col_pcr";
    pub const RESULT_COL_STATUS: &str = "result.col_status";
    pub const RESULT_STATUS_SAFE: &str = "result.status_safe";
    pub const RESULT_STATUS_OVERLOADED: &str = "result.status_overloaded";
    pub const RESULT_SUMMARY: &str = "result.summary";
    pub const RESULT_NOTE_CLAMPED: &str = "result.note_clamped";
    pub const RESULT_NOTE_MISSING: &str = "result.note_missing";
    pub const RESULT_NO_MATCH: &str = "result.no_match";
    pub const NO_SELECTION: &str = "result.no_selection";

    pub const LIST_SOIL_LINE: &str = "list.soil_line";
    pub const LIST_EMPTY: &str = "list.empty";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const GUI_TITLE: &str = "gui.title";
    pub const GUI_INPUTS: &str = "gui.inputs";
    pub const GUI_SOIL: &str = "gui.soil";
    pub const GUI_SATURATION: &str = "gui.saturation";
    pub const GUI_AIRCRAFT: &str = "gui.aircraft";
    pub const GUI_DATA_SOURCE: &str = "gui.data_source";
    pub const GUI_BUILT_IN_DATA: &str = "gui.built_in_data";
    pub const GUI_OPEN_DATA: &str = "gui.open_data";
    pub const GUI_RESET_DATA: &str = "gui.reset_data";
    pub const GUI_SAVE_SETTINGS: &str = "gui.save_settings";
    pub const GUI_SAVED: &str = "gui.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&Path>) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: pack_dir.and_then(|dir| load_overrides(dir, lang_code)),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순으로 찾는다.
    pub fn t(&self, key: &str) -> &str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }

    /// 번역 문자열의 `{name}` 자리표시자를 채운다.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }
}

/// `{key}` 형태 자리표시자를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵 또는 중첩 테이블.
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let content = fs::read_to_string(dir.join(format!("{code}.toml"))).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 항공기 과하중 검토 ===",
        MAIN_MENU_SOIL => "1) 토질 선택",
        MAIN_MENU_SATURATION => "2) 포화도 입력",
        MAIN_MENU_AIRCRAFT => "3) 항공기 선택",
        MAIN_MENU_CHECK => "4) 과하중 판정",
        MAIN_MENU_SETTINGS => "5) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        MAIN_MENU_CURRENT => "현재: 토질 {soil}, 포화도 {saturation}%, 선택 기종 {count}개",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        SOIL_HEADING => "\n-- AASHTO 토질 --",
        SOIL_PROMPT => "토질 번호 또는 코드: ",
        SOIL_NO_DATA => "{soil} 토질에는 등급 데이터가 없습니다.",
        SATURATION_PROMPT => "포화도 [%] (0~100): ",
        SATURATION_OUT_OF_RANGE => "포화도는 0~100% 사이로 입력하세요.",
        AIRCRAFT_HEADING => "\n-- 항공기 (교통 구성) --",
        AIRCRAFT_PROMPT => "번호를 쉼표로 구분해 입력 (a=전체, 엔터=유지): ",
        AIRCRAFT_SELECTED => "선택된 기종:",
        RESULT_HEADING => "\n{soil} 토질, 포화도 {saturation}%에서의 항공기 운용 상태",
        RESULT_COL_AIRCRAFT => "항공기",
        RESULT_COL_ACR => "ACR",
        RESULT_COL_PCR => "보간 PCR",
        RESULT_COL_STATUS => "상태",
        RESULT_STATUS_SAFE => "안전",
        RESULT_STATUS_OVERLOADED => "과하중",
        RESULT_SUMMARY => "전체 {total}대 / 과하중 {overloaded}대 / 안전 {safe}대",
        RESULT_NOTE_CLAMPED => "* 포화도가 70~85% 표본 범위 밖이라 경계 PCR 값을 사용했습니다.",
        RESULT_NOTE_MISSING => "데이터에 없는 기종: {names}",
        RESULT_NO_MATCH => "선택한 기종 중 이 토질의 데이터에 있는 기종이 없습니다.",
        NO_SELECTION => "항공기를 한 대 이상 선택하세요.",
        LIST_SOIL_LINE => "{soil}: {count}개 기종",
        LIST_EMPTY => "등급 데이터가 비어 있습니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_PROMPT_LANGUAGE => "언어 코드 (ko/en/auto, 취소하려면 엔터): ",
        SETTINGS_SAVED => "언어가 변경되었습니다:",
        GUI_TITLE => "토질과 포화도에 따른 항공기 과하중 검토",
        GUI_INPUTS => "입력",
        GUI_SOIL => "AASHTO 토질",
        GUI_SATURATION => "포화도 (%)",
        GUI_AIRCRAFT => "교통 구성 항공기",
        GUI_DATA_SOURCE => "등급 데이터:",
        GUI_BUILT_IN_DATA => "내장 견본 데이터",
        GUI_OPEN_DATA => "데이터 파일 열기…",
        GUI_RESET_DATA => "내장 데이터 사용",
        GUI_SAVE_SETTINGS => "설정 저장",
        GUI_SAVED => "설정을 저장했습니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Aircraft Overload Checker ===",
        MAIN_MENU_SOIL => "1) Select soil type",
        MAIN_MENU_SATURATION => "2) Enter saturation",
        MAIN_MENU_AIRCRAFT => "3) Select aircraft",
        MAIN_MENU_CHECK => "4) Check overload",
        MAIN_MENU_SETTINGS => "5) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        MAIN_MENU_CURRENT => "Current: soil {soil}, saturation {saturation}%, {count} aircraft selected",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        SOIL_HEADING => "\n-- AASHTO Soil Type --",
        SOIL_PROMPT => "Soil number or code: ",
        SOIL_NO_DATA => "No rating data for soil type {soil}.",
        SATURATION_PROMPT => "Degree of saturation [%] (0-100): ",
        SATURATION_OUT_OF_RANGE => "Saturation must be between 0 and 100%.",
        AIRCRAFT_HEADING => "\n-- Aircraft (traffic mix) --",
        AIRCRAFT_PROMPT => "Numbers separated by commas (a=all, enter=keep): ",
        AIRCRAFT_SELECTED => "Selected aircraft:",
        RESULT_HEADING => "\nAircraft Operational Status at {saturation}% Saturation on {soil} Soil",
        RESULT_COL_AIRCRAFT => "Aircraft",
        RESULT_COL_ACR => "ACR",
        RESULT_COL_PCR => "Interpolated PCR",
        RESULT_COL_STATUS => "Status",
        RESULT_STATUS_SAFE => "Safe",
        RESULT_STATUS_OVERLOADED => "Overloaded",
        RESULT_SUMMARY => "{total} total / {overloaded} overloaded / {safe} safe",
        RESULT_NOTE_CLAMPED => "* Saturation outside the 70-85% sample range; boundary PCR used.",
        RESULT_NOTE_MISSING => "Not in rating data: {names}",
        RESULT_NO_MATCH => "None of the selected aircraft have rating data for this soil type.",
        NO_SELECTION => "Please select at least one aircraft.",
        LIST_SOIL_LINE => "{soil}: {count} aircraft",
        LIST_EMPTY => "Rating data is empty.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_PROMPT_LANGUAGE => "Language code (ko/en/auto, enter to cancel): ",
        SETTINGS_SAVED => "Language changed to:",
        GUI_TITLE => "Aircraft Overload Checker Based on Soil Type and Saturation",
        GUI_INPUTS => "User Input",
        GUI_SOIL => "AASHTO soil type",
        GUI_SATURATION => "Degree of saturation (%)",
        GUI_AIRCRAFT => "Aircraft in traffic mix",
        GUI_DATA_SOURCE => "Rating data:",
        GUI_BUILT_IN_DATA => "built-in sample data",
        GUI_OPEN_DATA => "Open data file…",
        GUI_RESET_DATA => "Use built-in data",
        GUI_SAVE_SETTINGS => "Save settings",
        GUI_SAVED => "Settings saved.",
        _ => return None,
    })
}
