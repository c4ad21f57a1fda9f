//! 토질 종류와 포화도에 따른 항공기 과하중 판정 로직을 라이브러리로 분리하여 CLI와 GUI가 함께 쓴다.

pub mod app;
pub mod config;
pub mod i18n;
pub mod logging;
pub mod output;
pub mod overload;
pub mod rating;
pub mod soil;
pub mod ui_cli;
