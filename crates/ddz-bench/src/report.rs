use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use ddz_bot::Strength;
use ddz_core::model::player::Side;
use ddz_core::model::variant::RuleVariant;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

const CONFIDENCE_LEVEL: f64 = 0.95;

/// Win counts for one skill configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WinTally {
    pub games: usize,
    pub landlord_wins: usize,
    pub peasant_wins: usize,
}

impl WinTally {
    pub fn record(&mut self, side: Side) {
        self.games += 1;
        match side {
            Side::Landlord => self.landlord_wins += 1,
            Side::Peasants => self.peasant_wins += 1,
        }
    }

    pub fn merge(&mut self, other: &WinTally) {
        self.games += other.games;
        self.landlord_wins += other.landlord_wins;
        self.peasant_wins += other.peasant_wins;
    }

    pub fn landlord_rate(&self) -> f64 {
        rate(self.landlord_wins, self.games)
    }

    pub fn peasant_rate(&self) -> f64 {
        rate(self.peasant_wins, self.games)
    }

    /// Normal-approximation interval for the landlord win rate, clamped to [0, 1].
    pub fn landlord_ci95(&self) -> (f64, f64) {
        if self.games == 0 {
            return (0.0, 0.0);
        }
        let p = self.landlord_rate();
        let std_error = (p * (1.0 - p) / self.games as f64).sqrt();
        let margin = z_score() * std_error;
        ((p - margin).max(0.0), (p + margin).min(1.0))
    }
}

fn rate(wins: usize, games: usize) -> f64 {
    if games == 0 {
        0.0
    } else {
        wins as f64 / games as f64
    }
}

fn z_score() -> f64 {
    let tail = 1.0 - (1.0 - CONFIDENCE_LEVEL) / 2.0;
    Normal::new(0.0, 1.0)
        .map(|normal| normal.inverse_cdf(tail))
        .unwrap_or(1.96)
}

/// Outcome of one (landlord, peasants) skill pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillResult {
    pub landlord: Strength,
    pub peasants: Strength,
    pub tally: WinTally,
}

/// One CSV row. Field names are consumed by downstream analysis scripts.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResultRow {
    pub games_played: usize,
    pub landlord_lv: u8,
    pub peasants_lv: u8,
    pub win_rate_landlord: f64,
    pub win_rate_peasants: f64,
}

impl From<&SkillResult> for ResultRow {
    fn from(result: &SkillResult) -> Self {
        Self {
            games_played: result.tally.games,
            landlord_lv: result.landlord.level(),
            peasants_lv: result.peasants.level(),
            win_rate_landlord: result.tally.landlord_rate(),
            win_rate_peasants: result.tally.peasant_rate(),
        }
    }
}

/// All results of one rule variant and the CSV they were written to.
#[derive(Debug, Clone)]
pub struct VariantReport {
    pub variant: RuleVariant,
    pub results: Vec<SkillResult>,
    pub csv_path: PathBuf,
}

pub fn results_file_name(variant: RuleVariant) -> String {
    format!("DouDiZhu_results_{}.csv", variant.as_str())
}

pub fn write_results_csv(path: impl AsRef<Path>, results: &[SkillResult]) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for result in results {
        writer.serialize(ResultRow::from(result))?;
    }
    writer.flush().map_err(|source| ReportError::Io {
        context: "flushing results csv",
        source,
    })?;
    Ok(())
}

pub fn render_summary_markdown(run_id: &str, seed: u64, reports: &[VariantReport]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Simulation Summary: {run_id}\n");
    let _ = writeln!(out, "Seed: {seed}\n");

    for report in reports {
        let mut total = WinTally::default();
        for result in &report.results {
            total.merge(&result.tally);
        }

        let _ = writeln!(out, "## {}\n", report.variant);
        let _ = writeln!(
            out,
            "{} games, landlord wins {:.1}% overall. Results: `{}`\n",
            total.games,
            total.landlord_rate() * 100.0,
            report.csv_path.display()
        );
        out.push_str("| Landlord Lv | Peasants Lv | Games | Landlord Win % | 95% CI | Peasants Win % |\n");
        out.push_str("|-------------|-------------|-------|----------------|--------|----------------|\n");
        for result in &report.results {
            let (low, high) = result.tally.landlord_ci95();
            let _ = writeln!(
                out,
                "| {landlord} | {peasants} | {games} | {win:.1}% | [{low:.3}, {high:.3}] | {peasant:.1}% |",
                landlord = result.landlord,
                peasants = result.peasants,
                games = result.tally.games,
                win = result.tally.landlord_rate() * 100.0,
                peasant = result.tally.peasant_rate() * 100.0,
            );
        }
        out.push('\n');
    }
    out
}

pub fn write_summary_markdown(
    path: impl AsRef<Path>,
    run_id: &str,
    seed: u64,
    reports: &[VariantReport],
) -> Result<(), ReportError> {
    fs::write(path.as_ref(), render_summary_markdown(run_id, seed, reports)).map_err(|source| {
        ReportError::Io {
            context: "writing summary markdown",
            source,
        }
    })
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}
