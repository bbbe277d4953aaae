use crate::model::counts::RankCounts;
use crate::model::rank::Rank;
use crate::model::variant::RuleVariant;
use crate::moves::shape::{Descriptor, Shape, ShapeKind};

/// True when the sorted ranks step by exactly one value.
///
/// The numeric gap after the ace keeps the two and the jokers out of any run.
pub fn is_continuous(ranks: &[Rank]) -> bool {
    let mut sorted = ranks.to_vec();
    sorted.sort();
    sorted
        .windows(2)
        .all(|pair| pair[1].value() == pair[0].value() + 1)
}

/// Classify an arbitrary rank multiset. No hand ownership is checked.
pub fn classify(ranks: &[Rank], variant: RuleVariant) -> Shape {
    let mut sorted = ranks.to_vec();
    sorted.sort();
    let counts = RankCounts::from_ranks(&sorted);
    let signature = counts.count_signature();

    let legal = |kind: ShapeKind, rank: Rank| Shape::Legal(Descriptor::new(kind, rank));
    let first_with = |count: u8| counts.ranks_with_exactly(count).first().copied();

    match sorted.len() {
        0 => Shape::Pass,
        1 => legal(ShapeKind::Single, sorted[0]),
        2 => {
            if sorted == [Rank::BlackJoker, Rank::RedJoker] {
                Shape::Legal(Descriptor::rocket())
            } else if sorted[0] == sorted[1] {
                legal(ShapeKind::Pair, sorted[0])
            } else {
                Shape::Invalid
            }
        }
        3 => {
            if signature.is(&[(3, 1)]) {
                legal(ShapeKind::Triple, sorted[0])
            } else if signature.is(&[(2, 1), (1, 1)]) && variant.allows_pair_single() {
                first_with(2).map_or(Shape::Invalid, |r| legal(ShapeKind::PairSingle, r))
            } else {
                Shape::Invalid
            }
        }
        4 => {
            if signature.is(&[(3, 1), (1, 1)]) {
                first_with(3).map_or(Shape::Invalid, |r| legal(ShapeKind::TripleSingle, r))
            } else if signature.is(&[(4, 1)]) {
                legal(ShapeKind::Bomb, sorted[0])
            } else {
                Shape::Invalid
            }
        }
        5 => {
            if signature.is(&[(3, 1), (2, 1)]) {
                first_with(3).map_or(Shape::Invalid, |r| legal(ShapeKind::TriplePair, r))
            } else if signature.is(&[(2, 2), (1, 1)]) && variant.allows_double_pair_single() {
                counts
                    .ranks_with_exactly(2)
                    .last()
                    .map_or(Shape::Invalid, |&r| legal(ShapeKind::DoublePairSingle, r))
            } else if is_continuous(&sorted) {
                Shape::Legal(Descriptor::chain(ShapeKind::SingleChain, sorted[0], 5))
            } else {
                Shape::Invalid
            }
        }
        len => classify_long(&sorted, len, &counts),
    }
}

fn classify_long(sorted: &[Rank], len: usize, counts: &RankCounts) -> Shape {
    let signature = counts.count_signature();
    let distinct = counts.distinct();
    let groups = distinct.len();

    if is_continuous(sorted) {
        return Shape::Legal(Descriptor::chain(ShapeKind::SingleChain, sorted[0], len));
    }
    if signature.is(&[(2, groups as u8)]) && is_continuous(&distinct) {
        return Shape::Legal(Descriptor::chain(ShapeKind::PairChain, distinct[0], groups));
    }
    if signature.is(&[(3, groups as u8)]) && is_continuous(&distinct) {
        return Shape::Legal(Descriptor::chain(ShapeKind::TripleChain, distinct[0], groups));
    }

    let triples = counts.ranks_with_exactly(3);
    let wings = triples.len() as u8;
    if wings >= 2 && signature.is(&[(3, wings), (1, wings)]) {
        return airplane(ShapeKind::AirplaneSingles, &triples);
    }
    if wings >= 2 && signature.is(&[(3, wings), (2, wings)]) {
        return airplane(ShapeKind::AirplanePairs, &triples);
    }

    let quad = counts.ranks_with_exactly(4).first().copied();
    match quad {
        Some(rank) if signature.is(&[(4, 1), (1, 2)]) || signature.is(&[(4, 1), (2, 1)]) => {
            Shape::Legal(Descriptor::new(ShapeKind::QuadSingles, rank))
        }
        Some(rank) if signature.is(&[(4, 1), (2, 2)]) => {
            Shape::Legal(Descriptor::new(ShapeKind::QuadPairs, rank))
        }
        _ => Shape::Invalid,
    }
}

fn airplane(kind: ShapeKind, triples: &[Rank]) -> Shape {
    if is_continuous(triples) {
        Shape::Legal(Descriptor::chain(kind, triples[0], triples.len()))
    } else {
        Shape::Invalid
    }
}
