use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Parser;
use common::{
    config::{OutputFormat, Settings},
    error::ReportError,
    summary::Summary,
    table::ResultTable,
    util::{file_name, find_latest_result},
};
use eyre::{Context, Result};
use tokio::fs::read_to_string;
use tracing::{debug, error, info};
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

mod report;

const MODULES: &[&str] = &["common", "scaling_plots"];

/// Render thread-scaling charts and a summary from a benchmark results table
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Results table; defaults to the latest file in the results directory
    input: Option<PathBuf>,
    /// Yaml settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory searched when no input is given
    #[arg(long)]
    results_dir: Option<PathBuf>,
    /// Image format, png or svg
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Extra log filter directives, ie. `scaling_plots=debug`
    #[arg(short, long)]
    log: Vec<String>,
    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or("warn".to_owned());
    let args = Cli::parse();

    let mut env_filter = EnvFilter::new(format!("bench_plot={log_level}"));
    for log in &args.log {
        env_filter = env_filter.add_directive(log.parse()?);
    }
    for module in MODULES {
        if !args.log.iter().any(|x| x.starts_with(module)) {
            env_filter = env_filter.add_directive(format!("{module}={log_level}").parse()?);
        }
    }

    let (file_layer, _guard) = match &args.log_file {
        Some(path) => {
            let dir = path.parent().unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| eyre::eyre!("Invalid log file {}", path.display()))?;
            let (non_blocking, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (
                Some(layer().with_ansi(false).with_writer(non_blocking)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(file_layer)
        .init();

    if let Err(err) = run(args).await {
        error!("{err:#?}");
        return Err(err);
    }
    Ok(())
}

async fn load_settings(args: &Cli) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => serde_yml::from_str(
            &read_to_string(path)
                .await
                .context(format!("Read config {}", path.display()))?,
        )
        .context(format!("Parse config {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(dir) = &args.results_dir {
        settings.results_dir = dir.clone();
    }
    if let Some(format) = args.format {
        settings.format = format;
    }
    debug!("Settings: {settings:?}");
    Ok(settings)
}

async fn resolve_input(args: &Cli, settings: &Settings) -> Result<PathBuf> {
    let input = match &args.input {
        Some(input) => input.clone(),
        None => {
            let latest = find_latest_result(&settings.results_dir, &settings.file_pattern).await?;
            println!("Using latest benchmark file: {}", latest.display());
            latest
        }
    };
    if !input.is_file() {
        return Err(ReportError::InputNotFound(input).into());
    }
    Ok(input)
}

async fn run(args: Cli) -> Result<()> {
    let settings = load_settings(&args).await?;
    let input = resolve_input(&args, &settings).await?;

    let contents = read_to_string(&input)
        .await
        .context(format!("Read {}", input.display()))?;
    let table = ResultTable::parse(contents.as_bytes(), &input)?;
    info!("Loaded {} rows from {}", table.records().len(), input.display());

    print!(
        "{}",
        report::header(
            &file_name(&input),
            &Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
        )
    );

    let written = scaling_plots::render_all(&table, &input, &settings)?;
    println!();
    for path in &written {
        println!("{} Saved: {}", console::style("✓").green(), path.display());
    }

    let summary = Summary::new(&table);
    println!(
        "{}",
        report::StatsReport {
            summary: &summary,
            throughput_label: &settings.throughput_label,
        }
    );
    println!("{}\n", report::generated_files(&written));
    Ok(())
}
