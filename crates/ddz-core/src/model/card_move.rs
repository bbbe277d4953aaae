use crate::model::counts::RankCounts;
use crate::model::rank::Rank;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// One play: an ascending rank sequence. The empty sequence is a pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Move {
    ranks: Vec<Rank>,
}

impl Move {
    pub fn new(mut ranks: Vec<Rank>) -> Self {
        ranks.sort();
        Self { ranks }
    }

    pub const fn pass() -> Self {
        Self { ranks: Vec::new() }
    }

    /// Build a move from numeric rank values (3..=14, 16, 20, 30).
    pub fn from_values(values: &[u8]) -> Option<Self> {
        values
            .iter()
            .map(|&v| Rank::from_value(v))
            .collect::<Option<Vec<_>>>()
            .map(Self::new)
    }

    pub fn is_pass(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn ranks(&self) -> &[Rank] {
        &self.ranks
    }

    pub fn values(&self) -> Vec<u8> {
        self.ranks.iter().map(|r| r.value()).collect()
    }

    pub fn counts(&self) -> RankCounts {
        RankCounts::from_ranks(&self.ranks)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pass() {
            return f.write_str("pass");
        }
        for rank in &self.ranks {
            write!(f, "{rank}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMoveError {
    symbol: char,
}

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rank symbol '{}'", self.symbol)
    }
}

impl std::error::Error for ParseMoveError {}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("pass") {
            return Ok(Move::pass());
        }
        trimmed
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|symbol| Rank::from_symbol(symbol).ok_or(ParseMoveError { symbol }))
            .collect::<Result<Vec<_>, _>>()
            .map(Move::new)
    }
}

impl From<Move> for String {
    fn from(value: Move) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Move {
    type Error = ParseMoveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
