use super::game_state::{GameState, PlayError};
use crate::model::card_move::Move;
use crate::model::hand::Hand;
use crate::model::player::{Seat, Side};
use crate::model::round::Round;
use crate::model::variant::RuleVariant;
use serde::{Deserialize, Serialize};

/// Everything needed to audit or replay one finished (or running) game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub seed: Option<u64>,
    pub variant: RuleVariant,
    pub landlord: Seat,
    /// Hands after the kitty went to the landlord, indexed by seat.
    pub starting_hands: [Move; 3],
    pub kitty: Move,
    pub rounds: Vec<Round>,
    pub winner: Option<Seat>,
    pub winning_side: Option<Side>,
    pub turns: usize,
}

impl GameRecord {
    pub fn capture(state: &GameState) -> Self {
        let mut rounds = state.rounds().to_vec();
        if !state.current_round().plays().is_empty() {
            rounds.push(state.current_round().clone());
        }
        GameRecord {
            seed: state.seed(),
            variant: state.variant(),
            landlord: state.landlord(),
            starting_hands: Seat::LOOP.map(|seat| Move::new(state.starting_hand(seat).cards().to_vec())),
            kitty: Move::new(state.kitty().to_vec()),
            rounds,
            winner: state.winner(),
            winning_side: state.winning_side(),
            turns: state.turns(),
        }
    }

    /// Rebuild the game by replaying every recorded play from the starting hands.
    pub fn replay(&self) -> Result<GameState, PlayError> {
        let hands = self
            .starting_hands
            .clone()
            .map(|mv| Hand::with_cards(mv.ranks().to_vec()));
        let mut state = GameState::from_hands(hands, self.landlord, self.variant);
        for round in &self.rounds {
            for play in round.plays() {
                state.play(play.seat, play.cards.clone())?;
            }
        }
        Ok(state)
    }

    pub fn to_json(state: &GameState) -> serde_json::Result<String> {
        serde_json::to_string(&Self::capture(state))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
