use crate::model::rank::Rank;
use crate::model::variant::RuleVariant;
use core::fmt;
use serde::{Deserialize, Serialize};

pub const MIN_SINGLE_CHAIN: usize = 5;
pub const MIN_PAIR_CHAIN: usize = 3;
pub const MIN_TRIPLE_CHAIN: usize = 2;

/// Every legal move pattern. Declaration order is generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Single,
    Pair,
    PairSingle,
    Triple,
    TripleSingle,
    TriplePair,
    DoublePairSingle,
    SingleChain,
    PairChain,
    TripleChain,
    AirplaneSingles,
    AirplanePairs,
    QuadSingles,
    QuadPairs,
    Bomb,
    Rocket,
}

impl ShapeKind {
    /// Kinds sorted by [`ShapeKind::weight`], ties in declaration order.
    pub const GENERATION_ORDER: [ShapeKind; 16] = [
        ShapeKind::Single,
        ShapeKind::Pair,
        ShapeKind::PairSingle,
        ShapeKind::Triple,
        ShapeKind::TripleSingle,
        ShapeKind::TriplePair,
        ShapeKind::DoublePairSingle,
        ShapeKind::SingleChain,
        ShapeKind::PairChain,
        ShapeKind::TripleChain,
        ShapeKind::AirplaneSingles,
        ShapeKind::AirplanePairs,
        ShapeKind::QuadSingles,
        ShapeKind::QuadPairs,
        ShapeKind::Bomb,
        ShapeKind::Rocket,
    ];

    /// Presentation weight; orders candidate lists, never legality.
    pub const fn weight(self) -> u8 {
        match self {
            ShapeKind::Single => 1,
            ShapeKind::Pair => 2,
            ShapeKind::PairSingle => 3,
            ShapeKind::Triple | ShapeKind::TripleSingle | ShapeKind::TriplePair => 4,
            ShapeKind::DoublePairSingle => 5,
            ShapeKind::SingleChain | ShapeKind::PairChain => 6,
            ShapeKind::TripleChain
            | ShapeKind::AirplaneSingles
            | ShapeKind::AirplanePairs
            | ShapeKind::QuadSingles
            | ShapeKind::QuadPairs => 8,
            ShapeKind::Bomb => 10,
            ShapeKind::Rocket => 16,
        }
    }

    pub const fn is_enabled(self, variant: RuleVariant) -> bool {
        match self {
            ShapeKind::PairSingle => variant.allows_pair_single(),
            ShapeKind::DoublePairSingle => variant.allows_double_pair_single(),
            _ => true,
        }
    }

    pub const fn is_chain(self) -> bool {
        matches!(
            self,
            ShapeKind::SingleChain
                | ShapeKind::PairChain
                | ShapeKind::TripleChain
                | ShapeKind::AirplaneSingles
                | ShapeKind::AirplanePairs
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Single => "single",
            ShapeKind::Pair => "pair",
            ShapeKind::PairSingle => "pair_single",
            ShapeKind::Triple => "triple",
            ShapeKind::TripleSingle => "triple_single",
            ShapeKind::TriplePair => "triple_pair",
            ShapeKind::DoublePairSingle => "double_pair_single",
            ShapeKind::SingleChain => "single_chain",
            ShapeKind::PairChain => "pair_chain",
            ShapeKind::TripleChain => "triple_chain",
            ShapeKind::AirplaneSingles => "airplane_singles",
            ShapeKind::AirplanePairs => "airplane_pairs",
            ShapeKind::QuadSingles => "quad_singles",
            ShapeKind::QuadPairs => "quad_pairs",
            ShapeKind::Bomb => "bomb",
            ShapeKind::Rocket => "rocket",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison data of a legal shape.
///
/// `rank` is the lowest rank of a chain, the repeated group's rank for
/// composites (attachments never count) and the red joker for a rocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Descriptor {
    pub kind: ShapeKind,
    pub rank: Rank,
    pub chain_len: Option<usize>,
}

impl Descriptor {
    pub const fn new(kind: ShapeKind, rank: Rank) -> Self {
        Self {
            kind,
            rank,
            chain_len: None,
        }
    }

    pub const fn chain(kind: ShapeKind, start: Rank, len: usize) -> Self {
        Self {
            kind,
            rank: start,
            chain_len: Some(len),
        }
    }

    pub const fn rocket() -> Self {
        Self::new(ShapeKind::Rocket, Rank::RedJoker)
    }
}

/// Result of classifying a card multiset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Pass,
    /// The multiset matches no legal pattern under the active rules.
    Invalid,
    Legal(Descriptor),
}

impl Shape {
    pub const fn is_legal(&self) -> bool {
        matches!(self, Shape::Legal(_))
    }

    pub const fn descriptor(&self) -> Option<Descriptor> {
        match self {
            Shape::Legal(d) => Some(*d),
            _ => None,
        }
    }

    pub const fn kind(&self) -> Option<ShapeKind> {
        match self {
            Shape::Legal(d) => Some(d.kind),
            _ => None,
        }
    }

    pub const fn rank(&self) -> Option<Rank> {
        match self {
            Shape::Legal(d) => Some(d.rank),
            _ => None,
        }
    }

    pub const fn chain_len(&self) -> Option<usize> {
        match self {
            Shape::Legal(d) => d.chain_len,
            _ => None,
        }
    }

    /// Whether this shape may be played on top of `rival`.
    ///
    /// Any legal shape may open when the rival is a pass.
    pub fn beats(&self, rival: &Shape) -> bool {
        let Shape::Legal(mine) = self else {
            return false;
        };
        let theirs = match rival {
            Shape::Pass => return true,
            Shape::Invalid => return false,
            Shape::Legal(d) => d,
        };

        match (mine.kind, theirs.kind) {
            (_, ShapeKind::Rocket) => false,
            (ShapeKind::Rocket, _) => true,
            (ShapeKind::Bomb, ShapeKind::Bomb) => mine.rank > theirs.rank,
            (ShapeKind::Bomb, _) => true,
            (a, b) if a == b => mine.chain_len == theirs.chain_len && mine.rank > theirs.rank,
            _ => false,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Pass => f.write_str("pass"),
            Shape::Invalid => f.write_str("invalid"),
            Shape::Legal(d) => match d.chain_len {
                Some(len) => write!(f, "{}({}x{})", d.kind, d.rank, len),
                None => write!(f, "{}({})", d.kind, d.rank),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Descriptor, Shape, ShapeKind};
    use crate::model::rank::Rank;

    fn legal(kind: ShapeKind, rank: Rank) -> Shape {
        Shape::Legal(Descriptor::new(kind, rank))
    }

    #[test]
    fn generation_order_is_sorted_by_weight() {
        let weights: Vec<u8> = ShapeKind::GENERATION_ORDER
            .iter()
            .map(|k| k.weight())
            .collect();
        let mut sorted = weights.clone();
        sorted.sort();
        assert_eq!(weights, sorted);
    }

    #[test]
    fn rocket_beats_bomb_and_nothing_beats_rocket() {
        let rocket = Shape::Legal(Descriptor::rocket());
        let bomb = legal(ShapeKind::Bomb, Rank::Two);
        assert!(rocket.beats(&bomb));
        assert!(!bomb.beats(&rocket));
        assert!(!rocket.beats(&rocket));
    }

    #[test]
    fn bombs_beat_other_shapes_and_lower_bombs() {
        let low_bomb = legal(ShapeKind::Bomb, Rank::Three);
        let high_bomb = legal(ShapeKind::Bomb, Rank::Nine);
        let chain = Shape::Legal(Descriptor::chain(ShapeKind::SingleChain, Rank::Ten, 5));
        assert!(low_bomb.beats(&chain));
        assert!(high_bomb.beats(&low_bomb));
        assert!(!low_bomb.beats(&high_bomb));
        assert!(!chain.beats(&low_bomb));
    }

    #[test]
    fn same_kind_needs_higher_rank_and_equal_length() {
        let five = Shape::Legal(Descriptor::chain(ShapeKind::SingleChain, Rank::Three, 5));
        let six = Shape::Legal(Descriptor::chain(ShapeKind::SingleChain, Rank::Four, 6));
        let five_higher = Shape::Legal(Descriptor::chain(ShapeKind::SingleChain, Rank::Four, 5));
        assert!(!six.beats(&five));
        assert!(five_higher.beats(&five));
        assert!(!five.beats(&five));
        assert!(!legal(ShapeKind::Pair, Rank::Ace).beats(&legal(ShapeKind::Single, Rank::Three)));
    }

    #[test]
    fn invalid_and_pass_never_beat() {
        let single = legal(ShapeKind::Single, Rank::Three);
        assert!(single.beats(&Shape::Pass));
        assert!(!Shape::Invalid.beats(&single));
        assert!(!Shape::Pass.beats(&single));
        assert!(!single.beats(&Shape::Invalid));
    }
}
