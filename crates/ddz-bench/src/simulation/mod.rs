mod grid;

pub use grid::SkillGrid;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ddz_bot::{Policy, PolicyContext, Strength, StrengthError, StrengthPolicy};
use ddz_core::game::game_state::{GameState, PlayError, PlayOutcome};
use ddz_core::game::serialization::GameRecord;
use ddz_core::model::player::{Role, Seat, Side};
use ddz_core::model::variant::RuleVariant;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{ResolvedOutputs, SimulationConfig};
use crate::report::{
    ReportError, SkillResult, VariantReport, WinTally, results_file_name, write_results_csv,
    write_summary_markdown,
};

/// Drives every configured (variant, landlord skill, peasant skill) batch.
pub struct SimulationRunner {
    config: SimulationConfig,
    outputs: ResolvedOutputs,
    grid: SkillGrid,
    pool: rayon::ThreadPool,
}

/// Summary details returned after a run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub games_played: usize,
    pub configurations: usize,
    pub csv_paths: Vec<PathBuf>,
    pub summary_path: PathBuf,
    pub games_jsonl: Option<PathBuf>,
}

/// Per-game settings shared by every game of one batch.
#[derive(Debug, Clone, Copy)]
pub struct GameSetup {
    pub variant: RuleVariant,
    pub landlord: Strength,
    pub peasants: Strength,
    pub turn_limit: usize,
    pub log_plays: bool,
    pub keep_record: bool,
}

#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub seed: u64,
    pub winner: Seat,
    pub side: Side,
    pub turns: usize,
    pub record: Option<GameRecord>,
}

#[derive(Debug, Serialize)]
struct GameLogRow<'a> {
    run_id: &'a str,
    landlord_lv: u8,
    peasants_lv: u8,
    game_index: usize,
    #[serde(flatten)]
    record: &'a GameRecord,
}

impl SimulationRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: SimulationConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let grid = SkillGrid::new(&config.skills)?;
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = config.threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;
        Ok(Self {
            config,
            outputs,
            grid,
            pool,
        })
    }

    pub fn grid(&self) -> &SkillGrid {
        &self.grid
    }

    /// Play every batch, then write one CSV per variant and the Markdown summary.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        fs::create_dir_all(&self.outputs.results_dir)?;
        ensure_parent(self.outputs.summary_md.parent())?;
        let mut games_writer = match self.outputs.games_jsonl.as_ref() {
            Some(path) => {
                ensure_parent(path.parent())?;
                Some(BufWriter::new(File::create(path)?))
            }
            None => None,
        };

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut reports = Vec::with_capacity(self.config.rules.len());
        let mut games_played = 0usize;

        for &variant in &self.config.rules {
            let mut results = Vec::with_capacity(self.grid.len());
            for &(landlord, peasants) in self.grid.as_slice() {
                let setup = GameSetup {
                    variant,
                    landlord,
                    peasants,
                    turn_limit: self.config.turn_limit,
                    log_plays: self.config.logging.game_details,
                    keep_record: games_writer.is_some(),
                };
                let seeds: Vec<u64> = (0..self.config.games).map(|_| rng.next_u64()).collect();
                let outcomes = self.play_batch(&seeds, setup)?;

                let mut tally = WinTally::default();
                for (game_index, outcome) in outcomes.iter().enumerate() {
                    tally.record(outcome.side);
                    if let (Some(writer), Some(record)) =
                        (games_writer.as_mut(), outcome.record.as_ref())
                    {
                        let row = GameLogRow {
                            run_id: &self.config.run_id,
                            landlord_lv: landlord.level(),
                            peasants_lv: peasants.level(),
                            game_index,
                            record,
                        };
                        serde_json::to_writer(&mut *writer, &row)?;
                        writer.write_all(b"\n")?;
                    }
                }
                games_played += tally.games;

                event!(
                    target: "ddz_bench::run",
                    Level::INFO,
                    variant = %variant,
                    landlord_lv = landlord.level(),
                    peasants_lv = peasants.level(),
                    games = tally.games,
                    win_rate_landlord = tally.landlord_rate(),
                    "batch complete"
                );
                results.push(SkillResult {
                    landlord,
                    peasants,
                    tally,
                });
            }

            let csv_path = self.outputs.results_dir.join(results_file_name(variant));
            write_results_csv(&csv_path, &results)?;
            reports.push(VariantReport {
                variant,
                results,
                csv_path,
            });
        }

        if let Some(writer) = games_writer.as_mut() {
            writer.flush()?;
        }
        write_summary_markdown(
            &self.outputs.summary_md,
            &self.config.run_id,
            self.config.seed,
            &reports,
        )?;

        Ok(RunSummary {
            games_played,
            configurations: self.config.rules.len() * self.grid.len(),
            csv_paths: reports.into_iter().map(|report| report.csv_path).collect(),
            summary_path: self.outputs.summary_md.clone(),
            games_jsonl: self.outputs.games_jsonl.clone(),
        })
    }

    /// Results come back in seed order regardless of scheduling.
    fn play_batch(&self, seeds: &[u64], setup: GameSetup) -> Result<Vec<GameOutcome>, RunnerError> {
        self.pool
            .install(|| seeds.par_iter().map(|&seed| play_game(seed, setup)).collect())
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Deal and play one game to completion with strength policies on every seat.
pub fn play_game(seed: u64, setup: GameSetup) -> Result<GameOutcome, RunnerError> {
    let mut state = GameState::with_seed(seed, setup.variant);
    let mut policies: [Box<dyn Policy>; 3] = Seat::LOOP.map(|seat| {
        let strength = match state.role(seat) {
            Role::Landlord => setup.landlord,
            Role::FirstPeasant | Role::SecondPeasant => setup.peasants,
        };
        Box::new(StrengthPolicy::new(strength)) as Box<dyn Policy>
    });

    while let Some(seat) = state.to_act() {
        if state.turns() >= setup.turn_limit {
            return Err(RunnerError::TurnLimit {
                seed,
                turns: state.turns(),
            });
        }

        let candidates = state.legal_moves();
        let choice = {
            let ctx = PolicyContext {
                seat,
                role: state.role(seat),
                hand: state.hand(seat),
                rival: state.rival_move(),
                candidates: &candidates,
            };
            policies[seat.index()].choose_play(&ctx)
        };

        if setup.log_plays {
            event!(
                target: "ddz_bench::play",
                Level::INFO,
                seed,
                turn = state.turns(),
                seat = %seat,
                role = %state.role(seat),
                play = %choice,
                candidates = candidates.len(),
                "play"
            );
        }

        let outcome = state
            .play(seat, choice)
            .map_err(|source| RunnerError::Game { seed, source })?;
        if let PlayOutcome::GameWon { winner, side } = outcome {
            event!(
                target: "ddz_bench::play",
                Level::DEBUG,
                seed,
                winner = %winner,
                side = %side,
                turns = state.turns(),
                "game finished"
            );
        }
    }

    let (Some(winner), Some(side)) = (state.winner(), state.winning_side()) else {
        return Err(RunnerError::NoWinner { seed });
    };
    Ok(GameOutcome {
        seed,
        winner,
        side,
        turns: state.turns(),
        record: setup.keep_record.then(|| GameRecord::capture(&state)),
    })
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("report error: {0}")]
    Report(#[from] ReportError),
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("invalid skill level: {0}")]
    Strength(#[from] StrengthError),
    #[error("game {seed} rejected a play: {source}")]
    Game {
        seed: u64,
        #[source]
        source: PlayError,
    },
    #[error("game {seed} exceeded the turn limit after {turns} turns")]
    TurnLimit { seed: u64, turns: usize },
    #[error("game {seed} ended without a winner")]
    NoWinner { seed: u64 },
}
