mod strength;

pub use strength::{Strength, StrengthError, StrengthPolicy, select_index};

use ddz_core::model::card_move::Move;
use ddz_core::model::hand::Hand;
use ddz_core::model::player::{Role, Seat};

/// What a policy sees when it is asked to act.
pub struct PolicyContext<'a> {
    pub seat: Seat,
    pub role: Role,
    pub hand: &'a Hand,
    /// Last non-pass play of the round, `None` when leading.
    pub rival: Option<&'a Move>,
    /// Generator output in presentation order.
    pub candidates: &'a [Move],
}

pub trait Policy: Send {
    /// Pick one of `ctx.candidates`, or a pass when there is nothing to play.
    fn choose_play(&mut self, ctx: &PolicyContext) -> Move;
}
