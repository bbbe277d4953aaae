pub mod card_move;
pub mod counts;
pub mod deck;
pub mod hand;
pub mod player;
pub mod rank;
pub mod round;
pub mod variant;
