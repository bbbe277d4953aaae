use crate::model::card_move::Move;
use crate::model::counts::RankCounts;
use crate::model::rank::Rank;
use crate::model::variant::RuleVariant;
use crate::moves::classify::classify;
use crate::moves::combinations::combinations;
use crate::moves::shape::{
    Descriptor, MIN_PAIR_CHAIN, MIN_SINGLE_CHAIN, MIN_TRIPLE_CHAIN, Shape, ShapeKind,
};

/// Enumerates the legal plays of one hand against an optional rival move.
///
/// The rival must be a pass or classify to a legal shape under `variant`;
/// debug builds assert this. In release builds an unclassifiable rival
/// yields no candidates.
#[derive(Debug, Clone)]
pub struct MoveGenerator {
    counts: RankCounts,
    rival: Shape,
    variant: RuleVariant,
}

impl MoveGenerator {
    pub fn new(hand: &[Rank], rival: Option<&Move>, variant: RuleVariant) -> Self {
        let rival = match rival {
            Some(mv) if !mv.is_pass() => classify(mv.ranks(), variant),
            _ => Shape::Pass,
        };
        debug_assert!(
            rival != Shape::Invalid,
            "rival move must classify to a legal shape"
        );
        Self {
            counts: RankCounts::from_ranks(hand),
            rival,
            variant,
        }
    }

    pub fn rival(&self) -> Shape {
        self.rival
    }

    /// Every legal candidate, grouped by kind in [`ShapeKind::GENERATION_ORDER`].
    pub fn generate(&self) -> Vec<Move> {
        match self.rival {
            Shape::Pass => ShapeKind::GENERATION_ORDER
                .iter()
                .filter(|kind| kind.is_enabled(self.variant))
                .flat_map(|&kind| self.generate_kind(kind))
                .collect(),
            Shape::Invalid => Vec::new(),
            Shape::Legal(rival) => match rival.kind {
                ShapeKind::Rocket => Vec::new(),
                ShapeKind::Bomb => {
                    let mut moves = self.generate_kind(ShapeKind::Bomb);
                    moves.extend(self.generate_kind(ShapeKind::Rocket));
                    moves
                }
                kind => {
                    let mut moves = self.generate_kind(kind);
                    moves.extend(self.generate_kind(ShapeKind::Bomb));
                    moves.extend(self.generate_kind(ShapeKind::Rocket));
                    moves
                }
            },
        }
    }

    /// Candidates of a single kind, sorted and deduplicated.
    ///
    /// The rival only constrains the result when it is of the same kind.
    pub fn generate_kind(&self, kind: ShapeKind) -> Vec<Move> {
        if !kind.is_enabled(self.variant) {
            return Vec::new();
        }
        let target = match self.rival {
            Shape::Legal(d) if d.kind == kind => Some(d),
            _ => None,
        };
        let mut out = Candidates::new(target);

        match kind {
            ShapeKind::Single => self.push_groups(&mut out, 1),
            ShapeKind::Pair => self.push_groups(&mut out, 2),
            ShapeKind::Triple => self.push_groups(&mut out, 3),
            ShapeKind::Bomb => self.push_groups(&mut out, 4),
            ShapeKind::Rocket => {
                if self.counts.get(Rank::BlackJoker) > 0 && self.counts.get(Rank::RedJoker) > 0 {
                    out.push(Rank::RedJoker, 0, vec![Rank::BlackJoker, Rank::RedJoker]);
                }
            }
            ShapeKind::PairSingle => self.push_attached(&mut out, 2, 1),
            ShapeKind::TripleSingle => self.push_attached(&mut out, 3, 1),
            ShapeKind::TriplePair => self.push_attached(&mut out, 3, 2),
            ShapeKind::DoublePairSingle => self.push_double_pair_single(&mut out),
            ShapeKind::SingleChain => self.push_chains(&mut out, 1, MIN_SINGLE_CHAIN, 0),
            ShapeKind::PairChain => self.push_chains(&mut out, 2, MIN_PAIR_CHAIN, 0),
            ShapeKind::TripleChain => self.push_chains(&mut out, 3, MIN_TRIPLE_CHAIN, 0),
            ShapeKind::AirplaneSingles => self.push_chains(&mut out, 3, MIN_TRIPLE_CHAIN, 1),
            ShapeKind::AirplanePairs => self.push_chains(&mut out, 3, MIN_TRIPLE_CHAIN, 2),
            ShapeKind::QuadSingles => self.push_quads(&mut out, 1),
            ShapeKind::QuadPairs => self.push_quads(&mut out, 2),
        }

        out.finish()
    }

    fn push_groups(&self, out: &mut Candidates, size: u8) {
        for rank in self.counts.ranks_with_at_least(size) {
            out.push(rank, 0, repeat(rank, size));
        }
    }

    /// A `base`-sized group plus one attachment of `attach` copies of another rank.
    fn push_attached(&self, out: &mut Candidates, base: u8, attach: u8) {
        for rank in self.counts.ranks_with_at_least(base) {
            for extra in self.counts.ranks_with_at_least(attach) {
                if extra == rank {
                    continue;
                }
                let mut cards = repeat(rank, base);
                cards.extend(repeat(extra, attach));
                out.push(rank, 0, cards);
            }
        }
    }

    fn push_double_pair_single(&self, out: &mut Candidates) {
        let pairs = self.counts.ranks_with_at_least(2);
        for chosen in combinations(&pairs, 2) {
            let (low, high) = (chosen[0], chosen[1]);
            for extra in self.counts.distinct() {
                if extra == low || extra == high {
                    continue;
                }
                let mut cards = repeat(low, 2);
                cards.extend(repeat(high, 2));
                cards.push(extra);
                out.push(high, 0, cards);
            }
        }
    }

    /// Runs of `width`-card groups, optionally carrying one wing of
    /// `wing` copies per group. A `wing` of zero means a bare chain.
    fn push_chains(&self, out: &mut Candidates, width: u8, min_len: usize, wing: u8) {
        let exact = out.target.and_then(|d| d.chain_len);
        for run in runs(&self.counts.ranks_with_at_least(width), min_len, exact) {
            let mut body = Vec::with_capacity(run.len() * usize::from(width));
            for &rank in &run {
                body.extend(repeat(rank, width));
            }

            if wing == 0 {
                out.push(run[0], run.len(), body);
                continue;
            }

            let pool: Vec<Rank> = self
                .counts
                .ranks_with_at_least(wing)
                .into_iter()
                .filter(|rank| !run.contains(rank))
                .collect();
            for wings in combinations(&pool, run.len()) {
                let mut cards = body.clone();
                for rank in wings {
                    cards.extend(repeat(rank, wing));
                }
                out.push(run[0], run.len(), cards);
            }
        }
    }

    fn push_quads(&self, out: &mut Candidates, attach: u8) {
        for quad in self.counts.ranks_with_at_least(4) {
            let pool: Vec<Rank> = self
                .counts
                .ranks_with_at_least(attach)
                .into_iter()
                .filter(|&rank| rank != quad)
                .collect();
            for extras in combinations(&pool, 2) {
                let mut cards = repeat(quad, 4);
                for rank in extras {
                    cards.extend(repeat(rank, attach));
                }
                out.push(quad, 0, cards);
            }
        }
    }
}

/// Collects candidates of one kind, dropping those that do not beat the target.
struct Candidates {
    target: Option<Descriptor>,
    items: Vec<(Rank, usize, Move)>,
}

impl Candidates {
    fn new(target: Option<Descriptor>) -> Self {
        Self {
            target,
            items: Vec::new(),
        }
    }

    fn push(&mut self, primary: Rank, chain_len: usize, cards: Vec<Rank>) {
        if let Some(target) = self.target {
            if primary <= target.rank {
                return;
            }
            if target.chain_len.is_some_and(|len| len != chain_len) {
                return;
            }
        }
        self.items.push((primary, chain_len, Move::new(cards)));
    }

    fn finish(mut self) -> Vec<Move> {
        self.items.sort();
        self.items.dedup();
        self.items.into_iter().map(|(_, _, mv)| mv).collect()
    }
}

/// Contiguous runs over `ranks` (ascending, deduplicated) of at least
/// `min_len`, or exactly `exact` when given. Ordered by start, then length.
fn runs(ranks: &[Rank], min_len: usize, exact: Option<usize>) -> Vec<Vec<Rank>> {
    let mut output = Vec::new();
    for start in 0..ranks.len() {
        let mut end = start;
        while end + 1 < ranks.len() && ranks[end + 1].value() == ranks[end].value() + 1 {
            end += 1;
        }
        let longest = end - start + 1;
        for len in min_len.max(1)..=longest {
            if exact.is_none_or(|wanted| wanted == len) {
                output.push(ranks[start..start + len].to_vec());
            }
        }
    }
    output
}

fn repeat(rank: Rank, copies: u8) -> Vec<Rank> {
    vec![rank; usize::from(copies)]
}
