//! Daemon entry point: CLI parsing, logging setup, config load, and the
//! actor's run loop (`spec.md` §6, everything this file does is an
//! external collaborator the core spec treats as out of scope).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fty_alert_stats::bus::{ControlMessage, InMemoryBus};
use fty_alert_stats::mailbox::MailboxSender;
use fty_alert_stats::message::MessageEnvelope;
use fty_alert_stats::metrics_sink::InMemoryMetricSink;
use fty_alert_stats::{AggregatorActor, AppError, Config};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fty-alert-stats")]
#[command(version, about = "Per-asset warning/critical alert counter aggregator")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug-level logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fty-alert-stats: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = match cli.config {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    let (bus, _outbound) = InMemoryBus::new();
    let sink = InMemoryMetricSink::new();
    let (actor, handles) = AggregatorActor::new(config, bus, sink).await?;

    let run_handle = tokio::spawn(actor.run());

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received shutdown signal");
        }
        result = terminate_signal() => {
            if let Err(err) = result {
                tracing::warn!(%err, "failed to install terminate signal handler");
            }
        }
    }

    if let Err(err) = handles.control.send(MessageEnvelope::new(ControlMessage::Term)).await {
        tracing::warn!(%err, "failed to post $TERM to the actor; aborting run loop instead");
        run_handle.abort();
    } else {
        let _ = run_handle.await;
    }
    Ok(())
}

#[cfg(unix)]
async fn terminate_signal() -> std::io::Result<()> {
    let mut term = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    term.recv().await;
    Ok(())
}

#[cfg(not(unix))]
async fn terminate_signal() -> std::io::Result<()> {
    std::future::pending().await
}
