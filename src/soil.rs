use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// AASHTO 노상토 분류. 평가 가능한 토질은 이 고정 목록뿐이다.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SoilType {
    #[serde(rename = "A-1-a")]
    A1a,
    #[serde(rename = "A-1-b")]
    A1b,
    #[default]
    #[serde(rename = "A-2-4")]
    A24,
    #[serde(rename = "A-2-6")]
    A26,
    #[serde(rename = "A-2-7")]
    A27,
    #[serde(rename = "A-3")]
    A3,
    #[serde(rename = "A-4")]
    A4,
    #[serde(rename = "A-5")]
    A5,
    #[serde(rename = "A-6")]
    A6,
    #[serde(rename = "A-7-5")]
    A75,
    #[serde(rename = "A-7-6")]
    A76,
}

impl SoilType {
    /// 화면 표시 순서대로 나열한 전체 분류.
    pub const ALL: [SoilType; 11] = [
        SoilType::A1a,
        SoilType::A1b,
        SoilType::A24,
        SoilType::A26,
        SoilType::A27,
        SoilType::A3,
        SoilType::A4,
        SoilType::A5,
        SoilType::A6,
        SoilType::A75,
        SoilType::A76,
    ];

    /// AASHTO 표기 코드(예: "A-2-4").
    pub fn code(&self) -> &'static str {
        match self {
            SoilType::A1a => "A-1-a",
            SoilType::A1b => "A-1-b",
            SoilType::A24 => "A-2-4",
            SoilType::A26 => "A-2-6",
            SoilType::A27 => "A-2-7",
            SoilType::A3 => "A-3",
            SoilType::A4 => "A-4",
            SoilType::A5 => "A-5",
            SoilType::A6 => "A-6",
            SoilType::A75 => "A-7-5",
            SoilType::A76 => "A-7-6",
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// 토질 코드 파싱 오류.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SoilTypeError {
    #[error("알 수 없는 AASHTO 토질 코드: {0}")]
    Unknown(String),
}

impl FromStr for SoilType {
    type Err = SoilTypeError;

    /// 대소문자와 구분자(-, _, 공백)를 느슨하게 허용한다. "a24", "A_2_4" 모두 A-2-4.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = compact(s);
        SoilType::ALL
            .iter()
            .copied()
            .find(|soil| compact(soil.code()) == wanted)
            .ok_or_else(|| SoilTypeError::Unknown(s.trim().to_string()))
    }
}

fn compact(code: &str) -> String {
    code.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' ' | '\u{2010}' | '\u{2011}' | '\u{2013}'))
        .flat_map(|c| c.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_code_back() {
        for soil in SoilType::ALL {
            assert_eq!(soil.code().parse::<SoilType>(), Ok(soil));
        }
    }

    #[test]
    fn parse_is_lenient_on_case_and_separators() {
        assert_eq!("a-2-4".parse::<SoilType>(), Ok(SoilType::A24));
        assert_eq!(" A_7_6 ".parse::<SoilType>(), Ok(SoilType::A76));
        assert_eq!("a1b".parse::<SoilType>(), Ok(SoilType::A1b));
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(
            "A-9".parse::<SoilType>(),
            Err(SoilTypeError::Unknown("A-9".into()))
        );
    }

    #[test]
    fn serde_uses_aashto_code() {
        #[derive(Serialize, Deserialize)]
        struct Wrap {
            soil: SoilType,
        }
        let text = toml::to_string(&Wrap { soil: SoilType::A75 }).expect("serialize");
        assert!(text.contains("\"A-7-5\""), "{text}");
        let back: Wrap = toml::from_str(&text).expect("deserialize");
        assert_eq!(back.soil, SoilType::A75);
    }
}
