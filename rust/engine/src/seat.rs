use std::fmt;

use serde::{Serialize, Serializer};

/// Highest seat number any supported table has.
pub const MAX_SEATS: u8 = 10;

/// One physical seat at a table, numbered 1 to 10 in transcripts.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
pub enum Seat {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    #[default]
    Unknown,
}

impl Seat {
    /// The ten concrete seats in table order.
    pub const ALL: [Seat; 10] = [
        Seat::One,
        Seat::Two,
        Seat::Three,
        Seat::Four,
        Seat::Five,
        Seat::Six,
        Seat::Seven,
        Seat::Eight,
        Seat::Nine,
        Seat::Ten,
    ];

    /// `1` gives `Seat::One` and so on.
    pub fn from_int(n: u8) -> Option<Seat> {
        if (1..=MAX_SEATS).contains(&n) {
            Some(Seat::ALL[usize::from(n - 1)])
        } else {
            None
        }
    }

    /// Parses the textual seat number found in `"Seat 3: ..."` or `"Seat #3"`.
    pub fn parse(s: &str) -> Option<Seat> {
        s.trim().parse::<u8>().ok().and_then(Seat::from_int)
    }

    /// `0` gives `Seat::One` and so on.
    pub fn from_array_index(i: usize) -> Option<Seat> {
        Seat::ALL.get(i).copied()
    }

    /// `Seat::One` gives 1; `Seat::Unknown` gives 0.
    pub fn to_int(self) -> u8 {
        match self {
            Seat::Unknown => 0,
            s => s as u8 + 1,
        }
    }

    /// `Seat::One` gives 0; `Seat::Unknown` has no index.
    pub fn to_array_index(self) -> Option<usize> {
        match self {
            Seat::Unknown => None,
            s => Some(s as usize),
        }
    }

    /// True when this seat exists at a table of `table_size` seats.
    pub fn fits(self, table_size: u8) -> bool {
        self != Seat::Unknown && self.to_int() <= table_size
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Unknown => f.write_str("unknown"),
            s => write!(f, "{}", s.to_int()),
        }
    }
}

impl Serialize for Seat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.to_int())
    }
}
