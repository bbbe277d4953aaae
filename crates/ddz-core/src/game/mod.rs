pub mod bidding;
pub mod game_state;
pub mod serialization;
