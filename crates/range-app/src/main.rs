use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use range_app::autoplay;
use range_app::input;
use range_app::jsonl;
use range_app::settings::AppSettings;
use range_app::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "range", version, about = "Shooting range session engine")]
struct Cli {
    /// TOML settings file; defaults apply to anything it leaves out.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the RNG seed.
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Override the tick rate (Hz).
    #[arg(long, global = true)]
    tick_rate: Option<u32>,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Real-time loop: commands as JSON lines on stdin, events as JSON lines on stdout.
    Run,
    /// Play one session headless and print a JSON report.
    Simulate {
        /// Probability that a shot hits its target.
        #[arg(long, default_value_t = 0.6)]
        accuracy: f64,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;

    match cli.mode {
        Mode::Run => run(settings),
        Mode::Simulate { accuracy } => {
            let report = autoplay::run_session(&settings, accuracy)?;
            println!("{}", jsonl::encode_line(&report)?);
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout carries only JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_settings(cli: &Cli) -> anyhow::Result<AppSettings> {
    let mut settings = match &cli.config {
        Some(path) => AppSettings::load(path)?,
        None => AppSettings::default(),
    };
    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }
    if let Some(tick_rate) = cli.tick_rate {
        settings.tick_rate = tick_rate;
    }
    settings.validate()?;
    Ok(settings)
}

fn run(settings: AppSettings) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new());
    let (event_tx, event_rx) = mpsc::channel();
    state.start(settings, event_tx)?;

    let reader_state = Arc::clone(&state);
    std::thread::Builder::new()
        .name("range-stdin".into())
        .spawn(move || input::drive(io::stdin().lock(), &reader_state))
        .context("failed to spawn stdin reader thread")?;

    let stdout = io::stdout();
    for event in event_rx {
        let mut out = stdout.lock();
        writeln!(out, "{}", jsonl::encode_line(&event)?).context("failed to write event")?;
        out.flush().context("failed to flush stdout")?;
    }

    state.shutdown()
}
