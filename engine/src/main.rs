// Engine main entry point
use anyhow::Context;
use clap::Parser;
use engine::config::AnalyzerSettings;
use engine::data::CoinGeckoClient;
use engine::EngineError;
use engine::input::{select_provider, InputProvider, PresetInput, SystemProbe, TerminalInput};
use engine::services::{AnalysisService, SvgDirectorySink};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Moving-average crossover charts for cryptocurrency prices")]
struct Args {
    /// Comma-separated coin identifiers (skips the prompts together with --days)
    #[arg(long, requires = "days")]
    coins: Option<String>,

    /// Number of days of history
    #[arg(long, requires = "coins")]
    days: Option<String>,

    /// JSON settings file overriding the built-in defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the SVG chart pages are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Market data API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Always prompt on the terminal, even when a display is available
    #[arg(long)]
    no_dialog: bool,

    /// Log debug details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let mut settings = AnalyzerSettings::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(dir) = args.output_dir {
        settings.output_dir = dir;
    }
    if let Some(url) = args.api_url {
        settings.api_url = url;
    }
    settings.validate()?;

    let mut provider: Box<dyn InputProvider> = match (args.coins, args.days) {
        (Some(coins), Some(days)) => Box::new(PresetInput::new(coins, days)),
        _ if args.no_dialog => Box::new(TerminalInput::stdio()),
        _ => select_provider(&SystemProbe),
    };

    let client = CoinGeckoClient::from_settings(&settings)?;
    let service = AnalysisService::new(client, &settings);
    let mut sink = SvgDirectorySink::new(settings.output_dir.clone());
    let report = match service.run_interactive(
        provider.as_mut(),
        settings.default_days,
        &settings.page_style(),
        &mut sink,
    ) {
        Ok(report) => report,
        Err(EngineError::InputError { source }) => {
            warn!(reason = %source, "Rejected input");
            println!("Invalid input. Please try again.");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    if report.analyses.is_empty() {
        println!("No data could be retrieved for the requested coins.");
        return Ok(ExitCode::FAILURE);
    }
    info!(
        analyzed = report.analyses.len(),
        skipped = report.skipped.len(),
        pages = report.pages,
        dir = %sink.dir().display(),
        "Analysis complete"
    );
    Ok(ExitCode::SUCCESS)
}
