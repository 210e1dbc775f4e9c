use std::fmt;

use serde::{Serialize, Serializer};

/// A playing card as it appears in a transcript.
/// `None` fills unused hero/board slots and `Back` stands for a face-down card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
pub enum Card {
    /// No card dealt in this slot
    #[default]
    None = 0,
    TwoSpade,
    ThreeSpade,
    FourSpade,
    FiveSpade,
    SixSpade,
    SevenSpade,
    EightSpade,
    NineSpade,
    TenSpade,
    JackSpade,
    QueenSpade,
    KingSpade,
    AceSpade,
    TwoHeart,
    ThreeHeart,
    FourHeart,
    FiveHeart,
    SixHeart,
    SevenHeart,
    EightHeart,
    NineHeart,
    TenHeart,
    JackHeart,
    QueenHeart,
    KingHeart,
    AceHeart,
    TwoDiamond,
    ThreeDiamond,
    FourDiamond,
    FiveDiamond,
    SixDiamond,
    SevenDiamond,
    EightDiamond,
    NineDiamond,
    TenDiamond,
    JackDiamond,
    QueenDiamond,
    KingDiamond,
    AceDiamond,
    TwoClub,
    ThreeClub,
    FourClub,
    FiveClub,
    SixClub,
    SevenClub,
    EightClub,
    NineClub,
    TenClub,
    JackClub,
    QueenClub,
    KingClub,
    AceClub,
    /// Face-down card
    Back,
}

/// Short codes indexed by discriminant.
const CODES: [&str; 54] = [
    "none", "2s", "3s", "4s", "5s", "6s", "7s", "8s", "9s", "Ts", "Js", "Qs", "Ks", "As", "2h",
    "3h", "4h", "5h", "6h", "7h", "8h", "9h", "Th", "Jh", "Qh", "Kh", "Ah", "2d", "3d", "4d", "5d",
    "6d", "7d", "8d", "9d", "Td", "Jd", "Qd", "Kd", "Ad", "2c", "3c", "4c", "5c", "6c", "7c", "8c",
    "9c", "Tc", "Jc", "Qc", "Kc", "Ac", "back",
];

/// Five empty slots, the default for hero and board cards.
pub const NO_CARDS: [Card; 5] = [Card::None; 5];

impl Card {
    /// Every card value in discriminant order, `None` and `Back` included.
    pub const ALL: [Card; 54] = [
        Card::None,
        Card::TwoSpade,
        Card::ThreeSpade,
        Card::FourSpade,
        Card::FiveSpade,
        Card::SixSpade,
        Card::SevenSpade,
        Card::EightSpade,
        Card::NineSpade,
        Card::TenSpade,
        Card::JackSpade,
        Card::QueenSpade,
        Card::KingSpade,
        Card::AceSpade,
        Card::TwoHeart,
        Card::ThreeHeart,
        Card::FourHeart,
        Card::FiveHeart,
        Card::SixHeart,
        Card::SevenHeart,
        Card::EightHeart,
        Card::NineHeart,
        Card::TenHeart,
        Card::JackHeart,
        Card::QueenHeart,
        Card::KingHeart,
        Card::AceHeart,
        Card::TwoDiamond,
        Card::ThreeDiamond,
        Card::FourDiamond,
        Card::FiveDiamond,
        Card::SixDiamond,
        Card::SevenDiamond,
        Card::EightDiamond,
        Card::NineDiamond,
        Card::TenDiamond,
        Card::JackDiamond,
        Card::QueenDiamond,
        Card::KingDiamond,
        Card::AceDiamond,
        Card::TwoClub,
        Card::ThreeClub,
        Card::FourClub,
        Card::FiveClub,
        Card::SixClub,
        Card::SevenClub,
        Card::EightClub,
        Card::NineClub,
        Card::TenClub,
        Card::JackClub,
        Card::QueenClub,
        Card::KingClub,
        Card::AceClub,
        Card::Back,
    ];

    /// Transcript short code, e.g. `"As"` or `"Td"`.
    pub fn code(self) -> &'static str {
        CODES[self as usize]
    }

    /// Inverse of [`Card::code`]. Unknown text maps to `Card::None`.
    pub fn from_code(code: &str) -> Card {
        let code = code.trim();
        CODES
            .iter()
            .position(|c| *c == code)
            .map_or(Card::None, |i| Card::ALL[i])
    }

    pub fn is_none(self) -> bool {
        self == Card::None
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Reads the bracketed, space-separated card list at the end of `line`
/// (`"Dealt to Hero [Ah Kd]"`, `"Board: [7s 2d 9h]"`) into five slots.
/// Missing slots stay `Card::None`; cards past the fifth are ignored.
pub fn parse_card_list(line: &str) -> [Card; 5] {
    let mut cards = NO_CARDS;
    let (Some(open), Some(close)) = (line.rfind('['), line.rfind(']')) else {
        return cards;
    };
    if close <= open {
        return cards;
    }
    for (slot, code) in cards
        .iter_mut()
        .zip(line[open + 1..close].split_whitespace())
    {
        *slot = Card::from_code(code);
    }
    cards
}
