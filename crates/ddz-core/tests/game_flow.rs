use ddz_core::game::game_state::{GameState, PlayOutcome};
use ddz_core::game::serialization::GameRecord;
use ddz_core::model::card_move::Move;
use ddz_core::model::player::Seat;
use ddz_core::model::variant::RuleVariant;

const TURN_LIMIT: usize = 2_000;

fn play_with(state: &mut GameState, pick_last: bool) -> usize {
    let mut rounds_closed = 0;
    while let Some(seat) = state.to_act() {
        assert!(state.turns() < TURN_LIMIT, "game did not terminate");
        let moves = state.legal_moves();
        let choice = if pick_last { moves.last() } else { moves.first() };
        let choice = choice.cloned().unwrap_or_else(Move::pass);
        let before = state.hand(seat).len();
        let played = choice.len();
        match state.play(seat, choice).expect("generated move is legal") {
            PlayOutcome::RoundCompleted { .. } => rounds_closed += 1,
            PlayOutcome::GameWon { winner, .. } => assert_eq!(winner, seat),
            PlayOutcome::Played => {}
        }
        assert_eq!(state.hand(seat).len(), before - played);
    }
    rounds_closed
}

#[test]
fn seeded_games_terminate_under_every_variant() {
    for variant in RuleVariant::ALL {
        for seed in 0..25u64 {
            for pick_last in [false, true] {
                let mut state = GameState::with_seed(seed, variant);
                play_with(&mut state, pick_last);
                let winner = state.winner().expect("game has a winner");
                assert!(state.hand(winner).is_empty());
                assert_eq!(
                    state.winning_side(),
                    Some(state.role(winner).side())
                );
            }
        }
    }
}

#[test]
fn identical_seeds_replay_identically() {
    let mut a = GameState::with_seed(314, RuleVariant::PairSingle);
    let mut b = GameState::with_seed(314, RuleVariant::PairSingle);
    play_with(&mut a, false);
    play_with(&mut b, false);
    assert_eq!(GameRecord::capture(&a), GameRecord::capture(&b));
}

#[test]
fn double_opening_starts_with_a_bonus_round() {
    let mut state = GameState::with_seed(8, RuleVariant::LandlordDoubleOpening);
    let landlord = state.landlord();
    let opening = state.legal_moves().remove(0);
    assert_eq!(
        state.play(landlord, opening),
        Ok(PlayOutcome::RoundCompleted {
            next_leader: landlord
        })
    );
    assert_eq!(state.to_act(), Some(landlord));
    assert!(Seat::LOOP.contains(&landlord));
}
