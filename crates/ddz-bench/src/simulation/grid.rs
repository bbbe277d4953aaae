use ddz_bot::{Strength, StrengthError};

use crate::config::SkillsConfig;

/// Ordered (landlord, peasants) skill pairings to simulate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillGrid {
    pairs: Vec<(Strength, Strength)>,
}

impl SkillGrid {
    /// A sweep crosses every landlord level with every peasant level,
    /// landlord outermost. Otherwise only the configured pair is played.
    pub fn new(skills: &SkillsConfig) -> Result<Self, StrengthError> {
        let pairs = if skills.sweep {
            Strength::all()
                .flat_map(|landlord| Strength::all().map(move |peasants| (landlord, peasants)))
                .collect()
        } else {
            vec![(
                Strength::new(skills.landlord)?,
                Strength::new(skills.peasants)?,
            )]
        };
        Ok(Self { pairs })
    }

    pub fn as_slice(&self) -> &[(Strength, Strength)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(landlord: u8, peasants: u8, sweep: bool) -> SkillsConfig {
        SkillsConfig {
            landlord,
            peasants,
            sweep,
        }
    }

    fn levels(pair: (Strength, Strength)) -> (u8, u8) {
        (pair.0.level(), pair.1.level())
    }

    #[test]
    fn single_pair_without_sweep() {
        let grid = SkillGrid::new(&skills(4, 1, false)).unwrap();
        assert_eq!(grid.len(), 1);
        assert_eq!(levels(grid.as_slice()[0]), (4, 1));
    }

    #[test]
    fn sweep_covers_every_pairing_landlord_major() {
        let grid = SkillGrid::new(&skills(0, 0, true)).unwrap();
        let pairs = grid.as_slice();
        assert_eq!(pairs.len(), 100);
        assert_eq!(levels(pairs[0]), (0, 0));
        assert_eq!(levels(pairs[1]), (0, 1));
        assert_eq!(levels(pairs[10]), (1, 0));
        assert_eq!(levels(pairs[99]), (9, 9));
    }

    #[test]
    fn out_of_range_level_is_rejected() {
        assert_eq!(SkillGrid::new(&skills(12, 0, false)), Err(StrengthError(12)));
    }
}
