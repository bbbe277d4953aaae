use ddz_bot::Strength;
use ddz_core::model::variant::RuleVariant;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_TURN_LIMIT: usize = 1_000;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root simulation configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub run_id: String,
    pub rules: Vec<RuleVariant>,
    /// Games per (variant, landlord skill, peasant skill) configuration.
    pub games: usize,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub skills: SkillsConfig,
    #[serde(default)]
    pub threads: Option<usize>,
    #[serde(default = "default_turn_limit")]
    pub turn_limit: usize,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SimulationConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        validate_rules(&self.rules)?;
        if self.games == 0 {
            return Err(invalid("games", "number of games must be greater than zero"));
        }
        if self.threads == Some(0) {
            return Err(invalid("threads", "thread count must be at least 1"));
        }
        if self.turn_limit == 0 {
            return Err(invalid("turn_limit", "turn limit must be greater than zero"));
        }
        self.skills.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    /// Resolve output templates (e.g., `{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            results_dir: resolve_template(&self.run_id, &self.outputs.results_dir),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
            games_jsonl: self
                .outputs
                .games_jsonl
                .as_deref()
                .map(|template| resolve_template(&self.run_id, template)),
        }
    }
}

fn default_turn_limit() -> usize {
    DEFAULT_TURN_LIMIT
}

/// Skill levels for both sides. With `sweep` every pairing of 0..=9 is played.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SkillsConfig {
    #[serde(default)]
    pub landlord: u8,
    #[serde(default)]
    pub peasants: u8,
    #[serde(default)]
    pub sweep: bool,
}

impl SkillsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        for (label, level) in [
            ("skills.landlord", self.landlord),
            ("skills.peasants", self.peasants),
        ] {
            if let Err(err) = Strength::new(level) {
                return Err(invalid(label, &err.to_string()));
            }
        }
        Ok(())
    }
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub results_dir: String,
    pub summary_md: String,
    #[serde(default)]
    pub games_jsonl: Option<String>,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        let mut paths = vec![
            ("outputs.results_dir", &self.results_dir),
            ("outputs.summary_md", &self.summary_md),
        ];
        if let Some(jsonl) = self.games_jsonl.as_ref() {
            paths.push(("outputs.games_jsonl", jsonl));
        }

        for (label, value) in paths {
            if value.trim().is_empty() {
                return Err(invalid(label, "path must not be empty"));
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(invalid(label, "resolved path is invalid"));
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to plain stderr output.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    /// Emit one event per play.
    #[serde(default)]
    pub game_details: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            game_details: false,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn invalid(field: &str, message: &str) -> ValidationError {
    ValidationError::InvalidField {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(invalid("run_id", "run_id must not be empty"));
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(invalid(
            "run_id",
            "run_id may only contain alphanumeric characters, '.', '_' or '-'",
        ));
    }

    Ok(())
}

fn validate_rules(rules: &[RuleVariant]) -> Result<(), ValidationError> {
    if rules.is_empty() {
        return Err(invalid("rules", "at least one rule variant must be specified"));
    }

    let mut seen = HashSet::new();
    for rule in rules {
        if !seen.insert(*rule) {
            return Err(ValidationError::InvalidField {
                field: "rules".to_string(),
                message: format!("rule variant '{rule}' listed more than once"),
            });
        }
    }
    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub results_dir: PathBuf,
    pub summary_md: PathBuf,
    pub games_jsonl: Option<PathBuf>,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC_YAML: &str = r#"
run_id: "stage0_smoke"
rules: ["original", "pair_single"]
games: 200
seed: 123
skills:
  landlord: 3
  peasants: 7
outputs:
  results_dir: "bench/out/{run_id}"
  summary_md: "bench/out/{run_id}/summary.md"
  games_jsonl: "bench/out/{run_id}/games.jsonl"
logging:
  enable_structured: true
  tracing_level: "debug"
"#;

    fn parse(yaml: &str) -> SimulationConfig {
        serde_yaml::from_str(yaml).expect("parse yaml")
    }

    fn failing_field(yaml: &str) -> String {
        let mut cfg = parse(yaml);
        match cfg.validate().expect_err("should fail") {
            ValidationError::InvalidField { field, .. } => field,
        }
    }

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg = parse(BASIC_YAML);
        cfg.validate().expect("validate");

        assert_eq!(cfg.rules, vec![RuleVariant::Original, RuleVariant::PairSingle]);
        assert_eq!(cfg.turn_limit, DEFAULT_TURN_LIMIT);
        assert_eq!(cfg.threads, None);
        assert!(!cfg.skills.sweep);
        assert!(cfg.logging.enable_structured);
        assert!(!cfg.logging.game_details);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));

        let outputs = cfg.resolved_outputs();
        assert_eq!(outputs.results_dir, PathBuf::from("bench/out/stage0_smoke"));
        assert_eq!(
            outputs.games_jsonl,
            Some(PathBuf::from("bench/out/stage0_smoke/games.jsonl"))
        );
    }

    #[test]
    fn rejects_out_of_range_skill() {
        let yaml = BASIC_YAML.replace("peasants: 7", "peasants: 10");
        assert_eq!(failing_field(&yaml), "skills.peasants");
    }

    #[test]
    fn rejects_duplicate_rules() {
        let yaml = BASIC_YAML.replace("\"pair_single\"", "\"original\"");
        assert_eq!(failing_field(&yaml), "rules");
    }

    #[test]
    fn rejects_zero_games_and_threads() {
        assert_eq!(failing_field(&BASIC_YAML.replace("games: 200", "games: 0")), "games");
        let yaml = BASIC_YAML.replace("seed: 123", "seed: 123\nthreads: 0");
        assert_eq!(failing_field(&yaml), "threads");
    }

    #[test]
    fn rejects_invalid_run_id() {
        let yaml = BASIC_YAML.replace("stage0_smoke", "stage 0 smoke");
        assert_eq!(failing_field(&yaml), "run_id");
    }

    #[test]
    fn unknown_rule_fails_to_parse() {
        let yaml = BASIC_YAML.replace("\"pair_single\"", "\"house_rules\"");
        assert!(serde_yaml::from_str::<SimulationConfig>(&yaml).is_err());
    }

    #[test]
    fn jsonl_output_is_optional() {
        let yaml = BASIC_YAML.replace("  games_jsonl: \"bench/out/{run_id}/games.jsonl\"\n", "");
        let mut cfg = parse(&yaml);
        cfg.validate().expect("valid");
        assert_eq!(cfg.resolved_outputs().games_jsonl, None);
    }
}
