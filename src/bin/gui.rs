#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use aircraft_overload_checker::{
    app::{self, CheckReport, CheckRequest},
    config, i18n,
    i18n::keys,
    logging,
    output,
    overload::{EvaluationOutcome, OverloadStatus},
    rating::{normalize_name, rating_source, RatingTable},
    soil::SoilType,
};
use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};
use tracing::warn;

const OVERLOADED_COLOR: egui::Color32 = egui::Color32::from_rgb(210, 60, 60);
const SAFE_COLOR: egui::Color32 = egui::Color32::from_rgb(60, 160, 90);

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en/ko)
    let mut cli_lang: Option<String> = None;
    let mut verbose = false;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        } else if a == "--verbose" || a == "-v" {
            verbose = true;
        }
        i += 1;
    }
    logging::init(verbose);

    let app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config load failed, using defaults");
            config::Config::default()
        }
    };
    let tr = app::translator(&app_cfg, cli_lang.as_deref());
    let (table, load_error) = match app::load_ratings(app_cfg.rating_data_path.as_deref()) {
        Ok(table) => (table, None),
        Err(e) => (
            rating_source::built_in().unwrap_or_default(),
            Some(format!("{}: {e}", tr.t(keys::ERROR_PREFIX))),
        ),
    };

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([980.0, 640.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let title = tr.t(keys::GUI_TITLE).to_string();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                warn!("{e}");
            }
            let mut gui = GuiApp::new(app_cfg, tr, table);
            gui.status = load_error;
            Box::new(gui)
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글 표시용 폰트를 찾는다. 프로젝트 폰트 → 시스템 폰트 순.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates = vec![
        Path::new("assets/fonts/malgun.ttf").to_path_buf(),
        Path::new("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc").to_path_buf(),
        Path::new("/usr/share/fonts/truetype/nanum/NanumGothic.ttf").to_path_buf(),
        Path::new("/System/Library/Fonts/AppleSDGothicNeo.ttc").to_path_buf(),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.push(fonts.join("malgun.ttf"));
        candidates.push(fonts.join("gulim.ttc"));
    }
    for p in candidates {
        if p.exists() {
            let bytes = fs::read(&p)
                .map_err(|e| format!("Failed to read font file ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "korean_font");
            return Ok(());
        }
    }
    Err("Korean font not found; using egui default fonts.".into())
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    table: RatingTable,
    status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, tr: i18n::Translator, table: RatingTable) -> Self {
        Self {
            config,
            tr,
            table,
            status: None,
        }
    }

    fn report(&self) -> Result<CheckReport, app::AppError> {
        app::check(&self.table, &CheckRequest::from_config(&self.config))
    }

    fn is_selected(&self, name: &str) -> bool {
        let key = normalize_name(name);
        self.config
            .selected_aircraft
            .iter()
            .any(|s| normalize_name(s) == key)
    }

    /// 선택 순서를 유지하도록 켜면 뒤에 붙이고 끄면 뺀다.
    fn toggle_aircraft(&mut self, name: &str, on: bool) {
        let key = normalize_name(name);
        if on {
            if !self.is_selected(name) {
                self.config.selected_aircraft.push(name.to_string());
            }
        } else {
            self.config
                .selected_aircraft
                .retain(|s| normalize_name(s) != key);
        }
    }

    fn open_data_file(&mut self) {
        let Some(path) = FileDialog::new().add_filter("TOML", &["toml"]).pick_file() else {
            return;
        };
        match app::load_ratings(Some(path.as_path())) {
            Ok(table) => {
                self.table = table;
                self.config.rating_data_path = Some(path);
                self.status = None;
            }
            Err(e) => {
                self.status = Some(format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)));
            }
        }
    }

    fn use_built_in_data(&mut self) {
        match rating_source::built_in() {
            Ok(table) => {
                self.table = table;
                self.config.rating_data_path = None;
                self.status = None;
            }
            Err(e) => self.status = Some(format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX))),
        }
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::GUI_INPUTS));
        ui.add_space(6.0);

        egui::ComboBox::from_label(tr.t(keys::GUI_SOIL))
            .selected_text(self.config.soil_type.code())
            .show_ui(ui, |ui| {
                for soil in SoilType::ALL {
                    ui.selectable_value(&mut self.config.soil_type, soil, soil.code());
                }
            });

        ui.add_space(6.0);
        ui.label(tr.t(keys::GUI_SATURATION));
        ui.add(
            egui::DragValue::new(&mut self.config.saturation_percent)
                .clamp_range(0.0..=100.0)
                .speed(0.1)
                .max_decimals(2)
                .suffix(" %"),
        );

        ui.add_space(6.0);
        ui.label(tr.t(keys::GUI_AIRCRAFT));
        let names = self.table.aircraft_names(self.config.soil_type);
        if names.is_empty() {
            ui.label(tr.tf(
                keys::SOIL_NO_DATA,
                &[("soil", self.config.soil_type.to_string())],
            ));
        }
        egui::ScrollArea::vertical()
            .max_height(220.0)
            .show(ui, |ui| {
                for name in &names {
                    let mut checked = self.is_selected(name);
                    if ui.checkbox(&mut checked, name.as_str()).changed() {
                        self.toggle_aircraft(name, checked);
                    }
                }
            });

        ui.separator();
        let source = match &self.config.rating_data_path {
            Some(p) => p.display().to_string(),
            None => tr.t(keys::GUI_BUILT_IN_DATA).to_string(),
        };
        ui.label(format!("{} {source}", tr.t(keys::GUI_DATA_SOURCE)));
        ui.horizontal(|ui| {
            if ui.button(tr.t(keys::GUI_OPEN_DATA)).clicked() {
                self.open_data_file();
            }
            if ui.button(tr.t(keys::GUI_RESET_DATA)).clicked() {
                self.use_built_in_data();
            }
        });
        if ui.button(tr.t(keys::GUI_SAVE_SETTINGS)).clicked() {
            self.status = Some(match self.config.save() {
                Ok(()) => tr.t(keys::GUI_SAVED).to_string(),
                Err(e) => format!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
            });
        }
        if let Some(status) = &self.status {
            ui.add_space(4.0);
            ui.label(egui::RichText::new(status).small());
        }
    }

    fn ui_results(&self, ui: &mut egui::Ui) {
        let tr = &self.tr;
        ui.heading(tr.t(keys::GUI_TITLE));
        ui.separator();
        let report = match self.report() {
            Ok(report) => report,
            Err(e) => {
                ui.colored_label(OVERLOADED_COLOR, format!("{}: {e}", tr.t(keys::ERROR_PREFIX)));
                return;
            }
        };
        let results = match &report.outcome {
            EvaluationOutcome::NoSelection => {
                let notice = if self.table.has_soil(report.soil_type) {
                    tr.t(keys::NO_SELECTION).to_string()
                } else {
                    tr.tf(keys::SOIL_NO_DATA, &[("soil", report.soil_type.to_string())])
                };
                ui.colored_label(egui::Color32::from_rgb(200, 150, 40), notice);
                return;
            }
            EvaluationOutcome::Evaluated(results) => results,
        };
        ui.label(
            egui::RichText::new(tr.tf(
                keys::RESULT_HEADING,
                &[
                    ("saturation", output::format_saturation(report.saturation)),
                    ("soil", report.soil_type.to_string()),
                ],
            ).trim())
            .strong(),
        );
        ui.add_space(6.0);
        if !self.table.has_soil(report.soil_type) {
            ui.label(tr.tf(keys::SOIL_NO_DATA, &[("soil", report.soil_type.to_string())]));
        }
        if results.is_empty() {
            ui.label(tr.t(keys::RESULT_NO_MATCH));
        } else {
            egui::Grid::new("results_grid")
                .striped(true)
                .num_columns(4)
                .spacing([24.0, 6.0])
                .show(ui, |ui| {
                    ui.strong(tr.t(keys::RESULT_COL_AIRCRAFT));
                    ui.strong(tr.t(keys::RESULT_COL_ACR));
                    ui.strong(tr.t(keys::RESULT_COL_PCR));
                    ui.strong(tr.t(keys::RESULT_COL_STATUS));
                    ui.end_row();
                    for r in results {
                        ui.label(r.aircraft_name.as_str());
                        ui.label(output::format_acr(r.acr));
                        let mark = if r.clamped { "*" } else { "" };
                        ui.label(format!("{:.2}{mark}", r.interpolated_capacity));
                        let color = match r.status {
                            OverloadStatus::Safe => SAFE_COLOR,
                            OverloadStatus::Overloaded => OVERLOADED_COLOR,
                        };
                        ui.colored_label(color, output::status_label(tr, r.status));
                        ui.end_row();
                    }
                });
            ui.add_space(6.0);
            ui.label(tr.tf(
                keys::RESULT_SUMMARY,
                &[
                    ("total", report.summary.total.to_string()),
                    ("overloaded", report.summary.overloaded.to_string()),
                    ("safe", report.summary.safe.to_string()),
                ],
            ));
            if results.iter().any(|r| r.clamped) {
                ui.label(egui::RichText::new(tr.t(keys::RESULT_NOTE_CLAMPED)).small());
            }
        }
        if !report.missing.is_empty() {
            ui.label(
                egui::RichText::new(tr.tf(
                    keys::RESULT_NOTE_MISSING,
                    &[("names", report.missing.join(", "))],
                ))
                .small(),
            );
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::SidePanel::left("inputs")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.ui_inputs(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.ui_results(ui));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gui(selected: &[&str]) -> GuiApp {
        let cfg = config::Config {
            selected_aircraft: selected.iter().map(|s| s.to_string()).collect(),
            ..config::Config::default()
        };
        GuiApp::new(
            cfg,
            i18n::Translator::new("en"),
            rating_source::built_in().expect("built-in data"),
        )
    }

    #[test]
    fn toggle_appends_in_click_order_and_removes() {
        let mut app = gui(&[]);
        app.toggle_aircraft("B757-200", true);
        app.toggle_aircraft("Saab 340B", true);
        app.toggle_aircraft("B757-200", true);
        assert_eq!(app.config.selected_aircraft, vec!["B757-200", "Saab 340B"]);
        app.toggle_aircraft("b757\u{2010}200", false);
        assert_eq!(app.config.selected_aircraft, vec!["Saab 340B"]);
    }

    #[test]
    fn clearing_selection_gives_no_selection() {
        let mut app = gui(&["DHC-7"]);
        app.toggle_aircraft("DHC-7", false);
        let report = app.report().expect("report");
        assert!(report.outcome.is_no_selection());
    }

    #[test]
    fn report_follows_saturation_input() {
        let mut app = gui(&["B757-200"]);
        app.config.saturation_percent = 70.0;
        let report = app.report().expect("report");
        assert_eq!(report.outcome.results()[0].interpolated_capacity, 300.0);
        assert_eq!(report.outcome.results()[0].status, OverloadStatus::Overloaded);
    }
}
