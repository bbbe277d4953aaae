use crate::model::rank::Rank;

/// Rank -> multiplicity table for a card multiset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RankCounts {
    counts: [u8; 15],
}

impl RankCounts {
    pub const fn new() -> Self {
        Self { counts: [0; 15] }
    }

    pub fn from_ranks(ranks: &[Rank]) -> Self {
        let mut counts = Self::new();
        for &rank in ranks {
            counts.add(rank);
        }
        counts
    }

    pub fn add(&mut self, rank: Rank) {
        self.counts[rank.index()] += 1;
    }

    pub fn get(&self, rank: Rank) -> u8 {
        self.counts[rank.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    /// Ranks present at least `min` times, lowest first.
    pub fn ranks_with_at_least(&self, min: u8) -> Vec<Rank> {
        Rank::ALL
            .iter()
            .copied()
            .filter(|&rank| self.get(rank) >= min.max(1))
            .collect()
    }

    /// Ranks present exactly `count` times, lowest first.
    pub fn ranks_with_exactly(&self, count: u8) -> Vec<Rank> {
        Rank::ALL
            .iter()
            .copied()
            .filter(|&rank| count > 0 && self.get(rank) == count)
            .collect()
    }

    pub fn distinct(&self) -> Vec<Rank> {
        self.ranks_with_at_least(1)
    }

    /// Count-of-counts: `signature[n]` is how many ranks appear exactly `n` times.
    pub fn count_signature(&self) -> CountSignature {
        let mut signature = CountSignature::default();
        for &count in &self.counts {
            if count > 0 {
                let slot = usize::from(count).min(signature.by_count.len() - 1);
                signature.by_count[slot] += 1;
            }
        }
        signature
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountSignature {
    by_count: [u8; 21],
}

impl CountSignature {
    /// True when the signature is exactly the given `(count, ranks)` pairs.
    pub fn is(&self, expected: &[(usize, u8)]) -> bool {
        (1..self.by_count.len()).all(|count| {
            let wanted = expected
                .iter()
                .find(|(c, _)| *c == count)
                .map(|(_, n)| *n)
                .unwrap_or(0);
            self.by_count[count] == wanted
        })
    }
}
