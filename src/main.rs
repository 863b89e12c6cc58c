use std::io::{Write, stdout};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use cputop::app::{App, SAMPLE_INTERVAL};
use cputop::config::{Config, load_config, load_config_from_path};
use cputop::logging::init_logging;
use cputop::system::platform::online_core_count;

#[derive(Parser)]
#[command(
    name = "cputop",
    about = "Samples CPU counters every 5 seconds and prints usage and the busiest processes"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// What to report: total, cores, processes
    #[arg(long)]
    mode: Option<String>,

    /// Number of processes to list
    #[arg(long)]
    top: Option<usize>,

    /// Output format: text, json
    #[arg(long)]
    format: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli)?;
    init_logging(&config.logging).map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;

    let core_count = online_core_count();
    let mut app = App::from_config(&config, core_count);
    let settings = app.settings();
    tracing::info!(
        mode = settings.mode.label(),
        top_n = settings.top_n,
        core_count,
        proc_root = %config.general.proc_root.display(),
        "starting"
    );

    run(&mut app).await
}

async fn run(app: &mut App) -> Result<()> {
    let mut out = stdout();
    if let Some(title) = app.title() {
        writeln!(out, "{title}")?;
        out.flush()?;
    }

    app.prime()?;
    loop {
        tokio::select! {
            _ = tokio::time::sleep(SAMPLE_INTERVAL) => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                return Ok(());
            }
        }

        let report = app.cycle()?;
        out.write_all(report.as_bytes())?;
        out.flush()?;
    }
}

fn load_config_for_cli(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path)?,
        None => load_config()?,
    };

    if let Some(ref mode) = cli.mode {
        config.general.mode = mode.clone();
    }
    if let Some(top) = cli.top {
        config.general.top_n = top;
    }
    if let Some(ref format) = cli.format {
        config.output.format = format.clone();
    }

    Ok(config)
}
