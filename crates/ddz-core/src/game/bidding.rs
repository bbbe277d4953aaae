use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::rank::Rank;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use std::array;

pub const HAND_SIZE: usize = 17;
pub const KITTY_SIZE: usize = 3;

/// Deal 17 cards to each seat in turn; the last three cards form the kitty.
pub fn deal(deck: &Deck) -> ([Hand; 3], Vec<Rank>) {
    let mut hands: [Hand; 3] = array::from_fn(|_| Hand::new());
    let dealt = HAND_SIZE * Seat::LOOP.len();
    for (index, card) in deck.cards().iter().take(dealt).enumerate() {
        hands[index % Seat::LOOP.len()].add(*card);
    }
    let kitty = deck.cards().iter().skip(dealt).copied().collect();
    (hands, kitty)
}

/// Pick the landlord with probability proportional to the squared hand points.
pub fn choose_landlord<R: Rng + ?Sized>(hands: &[Hand; 3], rng: &mut R) -> Seat {
    let weights = hands.iter().map(|hand| {
        let points = u64::from(hand.points());
        points * points
    });
    match WeightedIndex::new(weights) {
        Ok(dist) => Seat::LOOP[dist.sample(rng)],
        // every hand empty
        Err(_) => Seat::First,
    }
}

#[cfg(test)]
mod tests {
    use super::{HAND_SIZE, KITTY_SIZE, choose_landlord, deal};
    use crate::model::deck::Deck;
    use crate::model::hand::Hand;
    use crate::model::player::Seat;
    use crate::model::rank::Rank;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn deal_leaves_three_card_kitty() {
        let deck = Deck::shuffled_with_seed(5);
        let (hands, kitty) = deal(&deck);
        for hand in &hands {
            assert_eq!(hand.len(), HAND_SIZE);
        }
        assert_eq!(kitty.len(), KITTY_SIZE);
        assert_eq!(&kitty[..], &deck.cards()[51..]);
    }

    #[test]
    fn only_seat_with_points_can_be_chosen() {
        let hands = [
            Hand::new(),
            Hand::with_cards(vec![Rank::Three]),
            Hand::new(),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(choose_landlord(&hands, &mut rng), Seat::Second);
        }
    }

    #[test]
    fn empty_hands_fall_back_to_first_seat() {
        let hands = [Hand::new(), Hand::new(), Hand::new()];
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_landlord(&hands, &mut rng), Seat::First);
    }

    #[test]
    fn choice_is_reproducible_for_a_seed() {
        let (hands, _) = deal(&Deck::shuffled_with_seed(11));
        let first = choose_landlord(&hands, &mut StdRng::seed_from_u64(3));
        let second = choose_landlord(&hands, &mut StdRng::seed_from_u64(3));
        assert_eq!(first, second);
    }
}
