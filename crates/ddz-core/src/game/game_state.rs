use crate::game::bidding::{choose_landlord, deal};
use crate::model::card_move::Move;
use crate::model::deck::Deck;
use crate::model::hand::{Hand, HandError};
use crate::model::player::{Role, Seat, Side};
use crate::model::rank::Rank;
use crate::model::round::{Round, RoundError};
use crate::model::variant::RuleVariant;
use crate::moves::{MoveGenerator, Shape, ShapeKind, classify};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    RoundCompleted { next_leader: Seat },
    GameWon { winner: Seat, side: Side },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    GameOver,
    OutOfTurn { expected: Seat, actual: Seat },
    LeaderCannotPass(Seat),
    UnrecognisedShape(Move),
    ShapeDisabled { kind: ShapeKind, variant: RuleVariant },
    DoesNotBeat { play: Move, rival: Move },
    CardNotInHand(Rank),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::GameOver => write!(f, "game is already over"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            PlayError::LeaderCannotPass(seat) => {
                write!(f, "{seat} leads the round and cannot pass")
            }
            PlayError::UnrecognisedShape(play) => write!(f, "{play} is not a legal shape"),
            PlayError::ShapeDisabled { kind, variant } => {
                write!(f, "{kind} is not allowed under {variant}")
            }
            PlayError::DoesNotBeat { play, rival } => write!(f, "{play} does not beat {rival}"),
            PlayError::CardNotInHand(rank) => write!(f, "card {rank} is not in hand"),
        }
    }
}

impl std::error::Error for PlayError {}

impl From<RoundError> for PlayError {
    fn from(err: RoundError) -> Self {
        match err {
            RoundError::RoundComplete => PlayError::GameOver,
            RoundError::OutOfTurn { expected, actual } => PlayError::OutOfTurn { expected, actual },
            RoundError::LeaderCannotPass(seat) => PlayError::LeaderCannotPass(seat),
        }
    }
}

impl From<HandError> for PlayError {
    fn from(err: HandError) -> Self {
        match err {
            HandError::CardNotInHand(rank) => PlayError::CardNotInHand(rank),
        }
    }
}

/// A full game: dealt hands, landlord, the round in progress and finished rounds.
#[derive(Debug, Clone)]
pub struct GameState {
    variant: RuleVariant,
    seed: Option<u64>,
    landlord: Seat,
    hands: [Hand; 3],
    starting_hands: [Hand; 3],
    kitty: Vec<Rank>,
    current: Round,
    completed: Vec<Round>,
    winner: Option<Seat>,
    turns: usize,
}

impl GameState {
    /// Shuffle, deal, bid and hand the kitty to the landlord, all from `seed`.
    pub fn with_seed(seed: u64, variant: RuleVariant) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let deck = Deck::shuffled(&mut rng);
        let (mut hands, kitty) = deal(&deck);
        let landlord = choose_landlord(&hands, &mut rng);
        for &card in &kitty {
            hands[landlord.index()].add(card);
        }

        let mut state = Self::from_hands(hands, landlord, variant);
        state.seed = Some(seed);
        state.kitty = kitty;
        state
    }

    pub fn from_hands(hands: [Hand; 3], landlord: Seat, variant: RuleVariant) -> Self {
        let current = if variant.landlord_double_opening() {
            Round::bonus(landlord)
        } else {
            Round::new(landlord)
        };
        Self {
            variant,
            seed: None,
            landlord,
            starting_hands: hands.clone(),
            hands,
            kitty: Vec::new(),
            current,
            completed: Vec::new(),
            winner: None,
            turns: 0,
        }
    }

    pub fn variant(&self) -> RuleVariant {
        self.variant
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn landlord(&self) -> Seat {
        self.landlord
    }

    pub fn role(&self, seat: Seat) -> Role {
        Role::of(seat, self.landlord)
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn starting_hand(&self, seat: Seat) -> &Hand {
        &self.starting_hands[seat.index()]
    }

    pub fn kitty(&self) -> &[Rank] {
        &self.kitty
    }

    pub fn current_round(&self) -> &Round {
        &self.current
    }

    /// Finished rounds, oldest first. The round in progress is not included.
    pub fn rounds(&self) -> &[Round] {
        &self.completed
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    pub fn winning_side(&self) -> Option<Side> {
        self.winner.map(|seat| self.role(seat).side())
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn to_act(&self) -> Option<Seat> {
        if self.is_over() {
            None
        } else {
            Some(self.current.next_to_act())
        }
    }

    pub fn rival_move(&self) -> Option<&Move> {
        self.current.rival_move()
    }

    /// Candidates for the seat to act; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        match self.to_act() {
            Some(seat) => MoveGenerator::new(
                self.hand(seat).cards(),
                self.current.rival_move(),
                self.variant,
            )
            .generate(),
            None => Vec::new(),
        }
    }

    pub fn play(&mut self, seat: Seat, mv: Move) -> Result<PlayOutcome, PlayError> {
        if self.is_over() {
            return Err(PlayError::GameOver);
        }

        let expected = self.current.next_to_act();
        if expected != seat {
            return Err(PlayError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        if mv.is_pass() {
            if self.current.rival_play().is_none() {
                return Err(PlayError::LeaderCannotPass(seat));
            }
        } else {
            self.check_legal(&mv)?;
            self.hands[seat.index()].remove_move(&mv)?;
        }

        let is_pass = mv.is_pass();
        self.current.play(seat, mv)?;
        self.turns += 1;

        if !is_pass && self.hands[seat.index()].is_empty() {
            self.winner = Some(seat);
            return Ok(PlayOutcome::GameWon {
                winner: seat,
                side: self.role(seat).side(),
            });
        }

        match self.current.next_leader() {
            Some(next_leader) => {
                let finished = std::mem::replace(&mut self.current, Round::new(next_leader));
                self.completed.push(finished);
                Ok(PlayOutcome::RoundCompleted { next_leader })
            }
            None => Ok(PlayOutcome::Played),
        }
    }

    fn check_legal(&self, mv: &Move) -> Result<(), PlayError> {
        let shape = classify(mv.ranks(), self.variant);
        if shape == Shape::Invalid {
            let widest = classify(mv.ranks(), RuleVariant::DoublePairSingle);
            return Err(match widest.kind() {
                Some(kind) if !kind.is_enabled(self.variant) => PlayError::ShapeDisabled {
                    kind,
                    variant: self.variant,
                },
                _ => PlayError::UnrecognisedShape(mv.clone()),
            });
        }

        if let Some(rival) = self.current.rival_move() {
            if !shape.beats(&classify(rival.ranks(), self.variant)) {
                return Err(PlayError::DoesNotBeat {
                    play: mv.clone(),
                    rival: rival.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{GameState, PlayError, PlayOutcome};
    use crate::model::card_move::Move;
    use crate::model::hand::Hand;
    use crate::model::player::{Role, Seat, Side};
    use crate::model::round::RoundKind;
    use crate::model::variant::RuleVariant;

    fn hand(symbols: &str) -> Hand {
        let mv: Move = symbols.parse().unwrap();
        Hand::with_cards(mv.ranks().to_vec())
    }

    fn mv(symbols: &str) -> Move {
        symbols.parse().unwrap()
    }

    fn small_game(variant: RuleVariant) -> GameState {
        GameState::from_hands(
            [hand("345"), hand("89T"), hand("JQ")],
            Seat::First,
            variant,
        )
    }

    #[test]
    fn seeded_deal_gives_landlord_twenty_cards() {
        let state = GameState::with_seed(42, RuleVariant::Original);
        let landlord = state.landlord();
        assert_eq!(state.hand(landlord).len(), 20);
        assert_eq!(state.kitty().len(), 3);
        let total: usize = Seat::LOOP.iter().map(|&s| state.hand(s).len()).sum();
        assert_eq!(total, 54);
        assert_eq!(state.to_act(), Some(landlord));
        assert_eq!(state.role(landlord.next()), Role::FirstPeasant);
    }

    #[test]
    fn same_seed_same_game() {
        let a = GameState::with_seed(7, RuleVariant::Original);
        let b = GameState::with_seed(7, RuleVariant::Original);
        assert_eq!(a.landlord(), b.landlord());
        for seat in Seat::LOOP {
            assert_eq!(a.hand(seat), b.hand(seat));
        }
    }

    #[test]
    fn round_passes_lead_to_last_real_player() {
        let mut state = small_game(RuleVariant::Original);
        assert_eq!(state.play(Seat::First, mv("3")), Ok(PlayOutcome::Played));
        assert_eq!(state.play(Seat::Second, mv("8")), Ok(PlayOutcome::Played));
        assert_eq!(state.play(Seat::Third, Move::pass()), Ok(PlayOutcome::Played));
        assert_eq!(
            state.play(Seat::First, Move::pass()),
            Ok(PlayOutcome::RoundCompleted {
                next_leader: Seat::Second
            })
        );
        assert_eq!(state.rounds().len(), 1);
        assert_eq!(state.to_act(), Some(Seat::Second));
        assert_eq!(state.rival_move(), None);
        assert_eq!(
            state.play(Seat::Second, Move::pass()),
            Err(PlayError::LeaderCannotPass(Seat::Second))
        );
    }

    #[test]
    fn emptying_a_hand_wins_for_its_side() {
        let mut state = GameState::from_hands(
            [hand("3"), hand("89T"), hand("JQ")],
            Seat::Second,
            RuleVariant::Original,
        );
        state.play(Seat::Second, mv("8")).unwrap();
        assert_eq!(
            state.play(Seat::Third, mv("J")),
            Ok(PlayOutcome::Played)
        );
        assert_eq!(
            state.play(Seat::First, mv("3")),
            Err(PlayError::DoesNotBeat {
                play: mv("3"),
                rival: mv("J"),
            })
        );
        state.play(Seat::First, Move::pass()).unwrap();
        state.play(Seat::Second, Move::pass()).unwrap();
        assert_eq!(
            state.play(Seat::Third, mv("Q")),
            Ok(PlayOutcome::GameWon {
                winner: Seat::Third,
                side: Side::Peasants,
            })
        );
        assert_eq!(state.winning_side(), Some(Side::Peasants));
        assert_eq!(state.play(Seat::First, mv("3")), Err(PlayError::GameOver));
        assert!(state.legal_moves().is_empty());
    }

    #[test]
    fn rejects_illegal_plays_without_touching_the_hand() {
        let mut state = small_game(RuleVariant::Original);
        assert_eq!(
            state.play(Seat::Second, mv("8")),
            Err(PlayError::OutOfTurn {
                expected: Seat::First,
                actual: Seat::Second,
            })
        );
        assert_eq!(
            state.play(Seat::First, mv("35")),
            Err(PlayError::UnrecognisedShape(mv("35")))
        );
        assert!(matches!(
            state.play(Seat::First, mv("33")),
            Err(PlayError::CardNotInHand(_))
        ));
        assert_eq!(state.hand(Seat::First), &hand("345"));
        assert_eq!(state.turns(), 0);
    }

    #[test]
    fn pair_single_is_reported_as_disabled() {
        let mut state = GameState::from_hands(
            [hand("3445"), hand("89T"), hand("JQ")],
            Seat::First,
            RuleVariant::Original,
        );
        assert!(matches!(
            state.play(Seat::First, mv("344")),
            Err(PlayError::ShapeDisabled { .. })
        ));
    }

    #[test]
    fn double_opening_gives_landlord_a_bonus_play() {
        let mut state = small_game(RuleVariant::LandlordDoubleOpening);
        assert_eq!(state.current_round().kind(), RoundKind::Bonus);
        assert_eq!(
            state.play(Seat::First, mv("3")),
            Ok(PlayOutcome::RoundCompleted {
                next_leader: Seat::First
            })
        );
        assert_eq!(state.current_round().kind(), RoundKind::Normal);
        assert_eq!(state.to_act(), Some(Seat::First));
        assert_eq!(state.legal_moves(), vec![mv("4"), mv("5")]);
    }

    #[test]
    fn legal_moves_follow_the_rival() {
        let mut state = small_game(RuleVariant::Original);
        state.play(Seat::First, mv("5")).unwrap();
        assert_eq!(state.legal_moves(), vec![mv("8"), mv("9"), mv("T")]);
    }
}
