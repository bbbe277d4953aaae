use super::{Policy, PolicyContext};
use ddz_core::model::card_move::Move;
use std::fmt;
use tracing::{Level, event};

/// Skill level in `0..=9`; higher values pick later (heavier) candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Strength(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthError(pub u8);

impl fmt::Display for StrengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "strength {} is outside 0..={}", self.0, Strength::MAX.0)
    }
}

impl std::error::Error for StrengthError {}

impl Strength {
    pub const MIN: Strength = Strength(0);
    pub const MAX: Strength = Strength(9);

    pub const fn new(level: u8) -> Result<Self, StrengthError> {
        if level <= Self::MAX.0 {
            Ok(Self(level))
        } else {
            Err(StrengthError(level))
        }
    }

    pub const fn level(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Strength> {
        (Self::MIN.0..=Self::MAX.0).map(Strength)
    }
}

impl TryFrom<u8> for Strength {
    type Error = StrengthError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `floor(strength / 10 * count)` evaluated in `f64`, in that operation order.
///
/// Integer arithmetic rounds differently for some counts (strength 7 of 90
/// candidates is 62 here, 63 in integers). `None` when `count` is zero.
pub fn select_index(strength: Strength, count: usize) -> Option<usize> {
    if count == 0 {
        None
    } else {
        Some((f64::from(strength.0) / 10.0 * count as f64) as usize)
    }
}

/// Stateless policy that indexes into the candidate list by strength.
#[derive(Debug, Clone, Copy)]
pub struct StrengthPolicy {
    strength: Strength,
}

impl StrengthPolicy {
    pub fn new(strength: Strength) -> Self {
        Self { strength }
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }
}

impl Policy for StrengthPolicy {
    fn choose_play(&mut self, ctx: &PolicyContext) -> Move {
        let index = select_index(self.strength, ctx.candidates.len());
        let chosen = index
            .and_then(|idx| ctx.candidates.get(idx))
            .cloned()
            .unwrap_or_else(Move::pass);
        log_play_decision(ctx, self.strength, index, &chosen);
        chosen
    }
}

fn log_play_decision(
    ctx: &PolicyContext,
    strength: Strength,
    index: Option<usize>,
    chosen: &Move,
) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let rival = ctx
        .rival
        .map(|mv| mv.to_string())
        .unwrap_or_else(|| "-".to_string());

    event!(
        target: "ddz_bot::play",
        Level::DEBUG,
        seat = %ctx.seat,
        role = %ctx.role,
        strength = strength.level(),
        hand_size = ctx.hand.len(),
        rival = %rival,
        candidates = ctx.candidates.len(),
        index = ?index,
        chosen = %chosen,
    );
}

#[cfg(test)]
mod tests {
    use super::{Strength, StrengthPolicy, select_index};
    use crate::policy::{Policy, PolicyContext};
    use ddz_core::model::card_move::Move;
    use ddz_core::model::hand::Hand;
    use ddz_core::model::player::{Role, Seat};
    use ddz_core::model::variant::RuleVariant;
    use ddz_core::moves::generate;

    fn strength(level: u8) -> Strength {
        Strength::new(level).unwrap()
    }

    #[test]
    fn rejects_levels_above_nine() {
        assert!(Strength::new(9).is_ok());
        assert!(Strength::new(10).is_err());
        assert_eq!(Strength::all().count(), 10);
    }

    #[test]
    fn index_is_floored_fraction_of_count() {
        assert_eq!(select_index(strength(0), 7), Some(0));
        assert_eq!(select_index(strength(5), 7), Some(3));
        assert_eq!(select_index(strength(9), 7), Some(6));
        assert_eq!(select_index(strength(9), 1), Some(0));
        assert_eq!(select_index(strength(3), 10), Some(3));
        assert_eq!(select_index(strength(4), 0), None);
    }

    #[test]
    fn index_follows_float_rounding() {
        assert_eq!(select_index(strength(7), 90), Some(62));
        assert_eq!(select_index(strength(7), 170), Some(118));
        assert_eq!(select_index(strength(7), 180), Some(125));
        assert_eq!(select_index(strength(7), 100), Some(70));
    }

    #[test]
    fn last_index_never_exceeds_candidates() {
        for count in 1..60 {
            for level in Strength::all() {
                let idx = select_index(level, count).unwrap();
                assert!(idx < count);
            }
        }
    }

    #[test]
    fn answers_a_pair_with_the_rocket() {
        let hand_move: Move = "5556789XD".parse().unwrap();
        let hand = Hand::with_cards(hand_move.ranks().to_vec());
        let rival: Move = "66".parse().unwrap();
        let candidates = generate(hand.cards(), Some(&rival), RuleVariant::Original);
        let ctx = PolicyContext {
            seat: Seat::First,
            role: Role::Landlord,
            hand: &hand,
            rival: Some(&rival),
            candidates: &candidates,
        };
        let mut policy = StrengthPolicy::new(Strength::MIN);
        assert_eq!(policy.choose_play(&ctx), "XD".parse::<Move>().unwrap());
    }

    #[test]
    fn passes_without_candidates() {
        let hand = Hand::new();
        let ctx = PolicyContext {
            seat: Seat::Second,
            role: Role::FirstPeasant,
            hand: &hand,
            rival: None,
            candidates: &[],
        };
        let mut policy = StrengthPolicy::new(Strength::MAX);
        assert!(policy.choose_play(&ctx).is_pass());
    }
}
