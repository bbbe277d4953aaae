use crate::model::card_move::Move;
use crate::model::counts::RankCounts;
use crate::model::rank::Rank;
use std::fmt;
use std::vec::Vec;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Rank>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    CardNotInHand(Rank),
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandError::CardNotInHand(rank) => write!(f, "card {rank} is not in hand"),
        }
    }
}

impl std::error::Error for HandError {}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Rank>) -> Self {
        let mut hand = Self { cards };
        hand.cards.sort();
        hand
    }

    pub fn add(&mut self, card: Rank) {
        self.cards.push(card);
        self.cards.sort();
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Rank] {
        &self.cards
    }

    pub fn counts(&self) -> RankCounts {
        RankCounts::from_ranks(&self.cards)
    }

    /// Sum of rank values; the bidding weight is derived from it.
    pub fn points(&self) -> u32 {
        self.cards.iter().map(|r| u32::from(r.value())).sum()
    }

    pub fn contains_move(&self, mv: &Move) -> bool {
        self.missing_card(mv).is_none()
    }

    /// Remove every card of `mv`. Either all cards are removed or none are.
    pub fn remove_move(&mut self, mv: &Move) -> Result<(), HandError> {
        if let Some(rank) = self.missing_card(mv) {
            return Err(HandError::CardNotInHand(rank));
        }
        for rank in mv.ranks() {
            if let Some(index) = self.cards.iter().position(|c| c == rank) {
                self.cards.remove(index);
            }
        }
        Ok(())
    }

    fn missing_card(&self, mv: &Move) -> Option<Rank> {
        let have = self.counts();
        let need = mv.counts();
        mv.ranks()
            .iter()
            .copied()
            .find(|&rank| need.get(rank) > have.get(rank))
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in &self.cards {
            write!(f, "{rank}")?;
        }
        Ok(())
    }
}
