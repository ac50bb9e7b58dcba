//! peak-shift entry point: CLI wiring around the analysis engine.

use std::path::Path;
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use peak_shift::analysis::{Analysis, analyze};
use peak_shift::cli::Cli;
use peak_shift::config::AppConfig;
use peak_shift::error::Result;
use peak_shift::io::export::{export_csv, export_xlsx};
use peak_shift::loader::load_or_sample;
use peak_shift::report::{JsonReport, Report};
use peak_shift::tariff::Tariff;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config file if one was given, else defaults. Exits on invalid config.
fn load_config(path: Option<&Path>) -> AppConfig {
    let config = match path {
        Some(path) => match AppConfig::from_toml_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    config
}

fn write_exports(cli: &Cli, config: &AppConfig, analysis: &Analysis) -> Result<()> {
    if let Some(path) = cli.export.as_ref().or(config.export.xlsx_path.as_ref()) {
        export_xlsx(&analysis.table, path)?;
    }
    if let Some(path) = cli.csv_out.as_ref().or(config.export.csv_path.as_ref()) {
        export_csv(&analysis.table, path)?;
    }
    Ok(())
}

fn run(cli: &Cli, config: &AppConfig) -> Result<()> {
    // --tariff takes priority over the config file
    let tariff = match cli.tariff {
        Some(rate) => Tariff::new(rate)?,
        None => config.tariff()?,
    };

    let table = load_or_sample(cli.input_path())?;
    let analysis = analyze(&table, tariff)?;
    info!(
        rows = analysis.records.len(),
        peaks = analysis.peak_hours.len(),
        %tariff,
        savings = analysis.summary.savings,
        "analysed consumption"
    );

    write_exports(cli, config, &analysis)?;

    #[cfg(feature = "tui")]
    if cli.tui {
        let export_path = cli
            .export
            .clone()
            .or_else(|| config.export.xlsx_path.clone())
            .unwrap_or_else(|| peak_shift::io::export::EXPORT_FILE_NAME.into());
        peak_shift::tui::run(analysis, export_path)?;
        return Ok(());
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&JsonReport::from(&analysis))
            .map_err(std::io::Error::other)?;
        println!("{json}");
    } else {
        println!("{}", Report(&analysis));
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(peak_shift::api::AppState {
            table,
            default_tariff: tariff,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(peak_shift::api::serve(state, addr))?;
    }

    Ok(())
}

fn main() {
    init_tracing();
    let cli = Cli::parse_args();
    let config = load_config(cli.config.as_deref());

    if let Err(e) = run(&cli, &config) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
