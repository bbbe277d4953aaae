pub mod classify;
pub mod combinations;
pub mod generate;
pub mod shape;

pub use classify::{classify, is_continuous};
pub use generate::MoveGenerator;
pub use shape::{Descriptor, Shape, ShapeKind};

use crate::model::card_move::Move;
use crate::model::rank::Rank;
use crate::model::variant::RuleVariant;

/// Legal candidates for `hand` against `rival`; `None` or a pass means an opening.
pub fn generate(hand: &[Rank], rival: Option<&Move>, variant: RuleVariant) -> Vec<Move> {
    MoveGenerator::new(hand, rival, variant).generate()
}
