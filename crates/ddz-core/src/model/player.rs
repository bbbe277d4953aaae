use core::fmt;
use serde::{Deserialize, Serialize};

/// Table seat; play passes from `First` to `Second` to `Third` and around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    First = 0,
    Second = 1,
    Third = 2,
}

impl Seat {
    pub const LOOP: [Seat; 3] = [Seat::First, Seat::Second, Seat::Third];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::First),
            1 => Some(Seat::Second),
            2 => Some(Seat::Third),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::Third,
            Seat::Third => Seat::First,
        }
    }

    pub const fn previous(self) -> Seat {
        match self {
            Seat::First => Seat::Third,
            Seat::Second => Seat::First,
            Seat::Third => Seat::Second,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::First => "seat1",
            Seat::Second => "seat2",
            Seat::Third => "seat3",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Landlord,
    /// Plays directly after the landlord.
    FirstPeasant,
    SecondPeasant,
}

impl Role {
    /// Role of `seat` when `landlord` holds the landlord role.
    pub const fn of(seat: Seat, landlord: Seat) -> Role {
        if seat.index() == landlord.index() {
            Role::Landlord
        } else if seat.index() == landlord.next().index() {
            Role::FirstPeasant
        } else {
            Role::SecondPeasant
        }
    }

    pub const fn side(self) -> Side {
        match self {
            Role::Landlord => Side::Landlord,
            Role::FirstPeasant | Role::SecondPeasant => Side::Peasants,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Landlord => "LANDLORD",
            Role::FirstPeasant => "PEASANT_1",
            Role::SecondPeasant => "PEASANT_2",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Landlord,
    Peasants,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Landlord => f.write_str("landlord"),
            Side::Peasants => f.write_str("peasants"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Role, Seat, Side};

    #[test]
    fn next_wraps_around() {
        assert_eq!(Seat::Third.next(), Seat::First);
    }

    #[test]
    fn previous_wraps_around() {
        assert_eq!(Seat::First.previous(), Seat::Third);
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in Seat::LOOP.iter().enumerate() {
            assert_eq!(Seat::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
        assert_eq!(Seat::from_index(3), None);
    }

    #[test]
    fn roles_follow_landlord() {
        assert_eq!(Role::of(Seat::Second, Seat::Second), Role::Landlord);
        assert_eq!(Role::of(Seat::Third, Seat::Second), Role::FirstPeasant);
        assert_eq!(Role::of(Seat::First, Seat::Second), Role::SecondPeasant);
        assert_eq!(Role::SecondPeasant.side(), Side::Peasants);
        assert_eq!(Role::Landlord.side(), Side::Landlord);
    }
}
