use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use aircraft_overload_checker::{
    app::{self, AppError, CheckRequest},
    config,
    i18n::keys,
    logging,
    output::{self, OutputFormat},
    soil::SoilType,
};

#[derive(Parser)]
#[command(name = "aircraft_overload_checker_cli")]
#[command(version)]
#[command(about = "Aircraft overload check by AASHTO soil type and degree of saturation")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Language (ko, en, auto). Uses config value if not specified.
    #[arg(long, short = 'L', global = true)]
    lang: Option<String>,

    /// Rating data TOML file. Overrides the configured path.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Verbose logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the selected aircraft against the interpolated PCR
    Check {
        /// AASHTO soil type (e.g. A-2-4)
        #[arg(long)]
        soil: Option<SoilType>,

        /// Degree of saturation in percent (0-100)
        #[arg(long, short = 's', allow_negative_numbers = true)]
        saturation: Option<f64>,

        /// Aircraft name; repeat for several. Uses the configured selection if omitted.
        #[arg(long, short = 'a')]
        aircraft: Vec<String>,

        /// Select every aircraft rated for the soil type
        #[arg(long, conflicts_with = "aircraft")]
        all: bool,

        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List soil types with rating data and their aircraft
    List {
        /// Only this soil type
        #[arg(long)]
        soil: Option<SoilType>,
    },
    /// Menu-driven session (default)
    Interactive,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 명령을 실행한다.
fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let lang = cli.lang.clone();
    if let Err(err) = try_run(cli) {
        eprintln!("{}: {err}", error_prefix(lang.as_deref()));
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = config::load_or_default()?;
    let mut tr = app::translator(&cfg, cli.lang.as_deref());
    let data_path = cli.data.or_else(|| cfg.rating_data_path.clone());
    let table = app::load_ratings(data_path.as_deref())?;

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Check {
            soil,
            saturation,
            aircraft,
            all,
            format,
        } => {
            let soil_type = soil.unwrap_or(cfg.soil_type);
            let saturation = app::validate_saturation(saturation.unwrap_or(cfg.saturation_percent))?;
            let aircraft = if all {
                table.aircraft_names(soil_type)
            } else if aircraft.is_empty() {
                cfg.selected_aircraft.clone()
            } else {
                aircraft
            };
            let report = app::check(
                &table,
                &CheckRequest {
                    soil_type,
                    saturation,
                    aircraft,
                },
            )?;
            match format {
                OutputFormat::Table => {
                    print!("{}", output::render_table(&tr, &report, table.has_soil(soil_type)))
                }
                OutputFormat::Json => println!("{}", output::render_json(&report)?),
            }
        }
        Commands::List { soil } => print!("{}", output::render_listing(&tr, &table, soil)),
        Commands::Interactive => app::run(&mut cfg, &table, &mut tr)?,
    }
    Ok(())
}

fn error_prefix(cli_lang: Option<&str>) -> String {
    let cfg = config::load_from(Path::new(config::CONFIG_FILE)).unwrap_or_default();
    app::translator(&cfg, cli_lang).t(keys::ERROR_PREFIX).to_string()
}
