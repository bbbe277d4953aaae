use std::path::PathBuf;

use clap::Parser;

use ddz_bench::config::{ResolvedOutputs, SimulationConfig};
use ddz_bench::logging::init_logging;
use ddz_bench::simulation::SimulationRunner;
use ddz_core::model::variant::RuleVariant;

/// Batch simulator for Dou Dizhu strength policies.
#[derive(Debug, Parser)]
#[command(
    name = "ddz-bench",
    author,
    version,
    about = "Deterministic Dou Dizhu win-rate simulator"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/ddz.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games per skill configuration.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the run seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Comma-separated rule variants to play, e.g. `original,pair_single`.
    #[arg(long, value_name = "RULES", value_delimiter = ',')]
    rules: Vec<RuleVariant>,

    /// Override the landlord skill level (0-9).
    #[arg(long, value_name = "LEVEL")]
    landlord: Option<u8>,

    /// Override the peasants skill level (0-9).
    #[arg(long, value_name = "LEVEL")]
    peasants: Option<u8>,

    /// Play every landlord/peasants pairing instead of a single one.
    #[arg(long)]
    sweep: bool,

    /// Worker threads (defaults to one per core).
    #[arg(long, value_name = "COUNT")]
    threads: Option<usize>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,

    /// Emit one log event per play regardless of config.
    #[arg(long)]
    log_game_details: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimulationConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }
    if let Some(games) = cli.games {
        config.games = games;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if !cli.rules.is_empty() {
        config.rules = cli.rules;
    }
    if let Some(level) = cli.landlord {
        config.skills.landlord = level;
        config.skills.sweep = false;
    }
    if let Some(level) = cli.peasants {
        config.skills.peasants = level;
        config.skills.sweep = false;
    }
    if cli.sweep {
        config.skills.sweep = true;
    }
    if cli.threads.is_some() {
        config.threads = cli.threads;
    }
    if cli.log_game_details {
        config.logging.game_details = true;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let variant_count = config.rules.len();
    let games = config.games;

    let _logging_guard = init_logging(&config, &outputs)?;
    let runner = SimulationRunner::new(config, outputs)?;

    println!(
        "Loaded configuration '{run_id}' with {variant_count} rule variant{} ({} skill pairing{}, {games} games each)",
        if variant_count == 1 { "" } else { "s" },
        runner.grid().len(),
        if runner.grid().len() == 1 { "" } else { "s" },
    );

    if cli.validate_only {
        println!("Validation-only mode: simulation skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Simulation complete for '{run_id}': {} games across {} configurations",
        summary.games_played, summary.configurations
    );
    for path in &summary.csv_paths {
        println!("Results: {}", path.display());
    }
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(path) = summary.games_jsonl.as_ref() {
        println!("Game records: {}", path.display());
    }

    Ok(())
}
