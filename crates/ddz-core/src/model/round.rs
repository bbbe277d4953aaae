use crate::model::card_move::Move;
use crate::model::player::Seat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The move to beat in a history: its most recent non-pass entry.
pub fn rival_move(history: &[Move]) -> Option<&Move> {
    history.iter().rev().find(|mv| !mv.is_pass())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundKind {
    Normal,
    /// A single uncontested play by the leader.
    Bonus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub seat: Seat,
    pub cards: Move,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    leader: Seat,
    kind: RoundKind,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundError {
    RoundComplete,
    OutOfTurn { expected: Seat, actual: Seat },
    LeaderCannotPass(Seat),
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundError::RoundComplete => write!(f, "round already complete"),
            RoundError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            RoundError::LeaderCannotPass(seat) => {
                write!(f, "{seat} leads the round and cannot pass")
            }
        }
    }
}

impl std::error::Error for RoundError {}

impl Round {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            kind: RoundKind::Normal,
            plays: Vec::new(),
        }
    }

    pub fn bonus(leader: Seat) -> Self {
        Self {
            leader,
            kind: RoundKind::Bonus,
            plays: Vec::with_capacity(1),
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn kind(&self) -> RoundKind {
        self.kind
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn history(&self) -> Vec<Move> {
        self.plays.iter().map(|play| play.cards.clone()).collect()
    }

    pub fn next_to_act(&self) -> Seat {
        match (self.kind, self.plays.last()) {
            (RoundKind::Bonus, _) | (_, None) => self.leader,
            (RoundKind::Normal, Some(last)) => last.seat.next(),
        }
    }

    pub fn rival_play(&self) -> Option<&Play> {
        self.plays.iter().rev().find(|play| !play.cards.is_pass())
    }

    pub fn rival_move(&self) -> Option<&Move> {
        self.rival_play().map(|play| &play.cards)
    }

    pub fn is_complete(&self) -> bool {
        match self.kind {
            RoundKind::Bonus => !self.plays.is_empty(),
            RoundKind::Normal => {
                let n = self.plays.len();
                n >= 3
                    && self.plays[n - 1].cards.is_pass()
                    && self.plays[n - 2].cards.is_pass()
                    && self.rival_play().is_some()
            }
        }
    }

    /// Seat that leads the following round, once this one is complete.
    pub fn next_leader(&self) -> Option<Seat> {
        if !self.is_complete() {
            return None;
        }
        match self.kind {
            RoundKind::Bonus => Some(self.leader),
            RoundKind::Normal => self.rival_play().map(|play| play.seat),
        }
    }

    pub fn play(&mut self, seat: Seat, cards: Move) -> Result<(), RoundError> {
        if self.is_complete() {
            return Err(RoundError::RoundComplete);
        }

        let expected = self.next_to_act();
        if expected != seat {
            return Err(RoundError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        if cards.is_pass() && self.rival_play().is_none() {
            return Err(RoundError::LeaderCannotPass(seat));
        }

        self.plays.push(Play { seat, cards });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Round, RoundError, rival_move};
    use crate::model::card_move::Move;
    use crate::model::player::Seat;

    fn mv(symbols: &str) -> Move {
        symbols.parse().unwrap()
    }

    #[test]
    fn rival_skips_trailing_passes() {
        let history = vec![mv("55"), mv("99"), Move::pass(), Move::pass()];
        assert_eq!(rival_move(&history), Some(&mv("99")));
        assert_eq!(rival_move(&[Move::pass()]), None);
        assert_eq!(rival_move(&[]), None);
    }

    #[test]
    fn two_passes_after_a_play_complete_the_round() {
        let mut round = Round::new(Seat::Second);
        round.play(Seat::Second, mv("3")).unwrap();
        round.play(Seat::Third, mv("K")).unwrap();
        round.play(Seat::First, Move::pass()).unwrap();
        assert!(!round.is_complete());
        round.play(Seat::Second, Move::pass()).unwrap();
        assert!(round.is_complete());
        assert_eq!(round.next_leader(), Some(Seat::Third));
        assert_eq!(round.rival_move(), Some(&mv("K")));
        assert_eq!(
            round.play(Seat::Third, mv("A")),
            Err(RoundError::RoundComplete)
        );
    }

    #[test]
    fn leader_cannot_open_with_a_pass() {
        let mut round = Round::new(Seat::First);
        assert_eq!(
            round.play(Seat::First, Move::pass()),
            Err(RoundError::LeaderCannotPass(Seat::First))
        );
    }

    #[test]
    fn rejects_out_of_turn_play() {
        let mut round = Round::new(Seat::First);
        assert_eq!(
            round.play(Seat::Third, mv("4")),
            Err(RoundError::OutOfTurn {
                expected: Seat::First,
                actual: Seat::Third,
            })
        );
    }

    #[test]
    fn bonus_round_ends_after_one_play_and_keeps_leader() {
        let mut round = Round::bonus(Seat::Third);
        assert_eq!(round.next_to_act(), Seat::Third);
        round.play(Seat::Third, mv("777")).unwrap();
        assert!(round.is_complete());
        assert_eq!(round.next_leader(), Some(Seat::Third));
    }
}
