use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{ResolvedOutputs, SimulationConfig};

pub const TELEMETRY_FILE: &str = "telemetry.jsonl";

/// Keeps the non-blocking telemetry writer alive; drop it after the run.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Filter for the run: `RUST_LOG` wins, otherwise the configured level.
///
/// Per-play events are always let through when `game_details` is on, even if
/// the base level is quieter than `info`.
pub fn run_filter(config: &SimulationConfig) -> EnvFilter {
    let level = config.logging.level().unwrap_or(Level::INFO);
    let mut directives = level.as_str().to_ascii_lowercase();
    if config.logging.game_details {
        directives.push_str(",ddz_bench::play=info");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

/// Install the global subscriber for one simulation run.
///
/// Structured mode writes JSON events to `telemetry.jsonl` in the run's
/// results directory and returns a guard that must outlive the run.
/// Otherwise events go to stderr as plain text.
pub fn init_logging(
    config: &SimulationConfig,
    outputs: &ResolvedOutputs,
) -> Result<Option<LoggingGuard>> {
    let filter = run_filter(config);

    if !config.logging.enable_structured {
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
        return Ok(None);
    }

    fs::create_dir_all(&outputs.results_dir).with_context(|| {
        format!(
            "creating results directory for run '{}' at {}",
            config.run_id,
            outputs.results_dir.display()
        )
    })?;
    let telemetry_path = outputs.results_dir.join(TELEMETRY_FILE);
    let file = File::create(&telemetry_path)
        .with_context(|| format!("creating telemetry file at {}", telemetry_path.display()))?;
    let (writer, guard) = NonBlockingBuilder::default().lossy(false).finish(file);

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // Tests may already own the global subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);

    let rules: Vec<&str> = config.rules.iter().map(|rule| rule.as_str()).collect();
    tracing::info!(
        target: "ddz_bench::run",
        run_id = %config.run_id,
        rules = ?rules,
        games = config.games,
        seed = config.seed,
        sweep = config.skills.sweep,
        game_details = config.logging.game_details,
        "simulation telemetry enabled"
    );

    Ok(Some(LoggingGuard {
        _guard: guard,
        telemetry_path,
    }))
}
