use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Rule set a game is played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleVariant {
    #[default]
    Original,
    /// Pair plus a single becomes a legal shape.
    PairSingle,
    /// Pair plus single, and two pairs plus a single.
    DoublePairSingle,
    /// The landlord plays one uncontested move before the first normal round.
    LandlordDoubleOpening,
}

impl RuleVariant {
    pub const ALL: [RuleVariant; 4] = [
        RuleVariant::Original,
        RuleVariant::PairSingle,
        RuleVariant::DoublePairSingle,
        RuleVariant::LandlordDoubleOpening,
    ];

    pub const fn allows_pair_single(self) -> bool {
        matches!(
            self,
            RuleVariant::PairSingle | RuleVariant::DoublePairSingle
        )
    }

    pub const fn allows_double_pair_single(self) -> bool {
        matches!(self, RuleVariant::DoublePairSingle)
    }

    pub const fn landlord_double_opening(self) -> bool {
        matches!(self, RuleVariant::LandlordDoubleOpening)
    }

    /// Label used in report file names.
    pub const fn as_str(self) -> &'static str {
        match self {
            RuleVariant::Original => "ORIGINAL_RULE",
            RuleVariant::PairSingle => "SPECIAL_RULE1",
            RuleVariant::DoublePairSingle => "SPECIAL_RULE2",
            RuleVariant::LandlordDoubleOpening => "SPECIAL_RULE3",
        }
    }
}

impl fmt::Display for RuleVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVariantError(pub String);

impl fmt::Display for ParseVariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rule variant '{}'", self.0)
    }
}

impl std::error::Error for ParseVariantError {}

impl FromStr for RuleVariant {
    type Err = ParseVariantError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "original" | "original_rule" | "0" => Ok(RuleVariant::Original),
            "pair_single" | "special_rule1" | "1" => Ok(RuleVariant::PairSingle),
            "double_pair_single" | "special_rule2" | "2" => Ok(RuleVariant::DoublePairSingle),
            "landlord_double_opening" | "special_rule3" | "3" => {
                Ok(RuleVariant::LandlordDoubleOpening)
            }
            _ => Err(ParseVariantError(value.to_string())),
        }
    }
}
