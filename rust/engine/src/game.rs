use chrono::NaiveDateTime;
use serde::Serialize;

use crate::hand::Hand;

/// Game variants the transcripts use.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    None,
    Holdem,
    Omaha,
    Omaha5,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::None => "none",
            Variant::Holdem => "holdem",
            Variant::Omaha => "omaha",
            Variant::Omaha5 => "omaha5",
        }
    }
}

/// Betting limits the transcripts use.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Limit {
    #[default]
    None,
    NoLimit,
    PotLimit,
}

impl Limit {
    pub fn as_str(self) -> &'static str {
        match self {
            Limit::None => "none",
            Limit::NoLimit => "no-limit",
            Limit::PotLimit => "pot-limit",
        }
    }
}

/// Identity shared by cash games and tournaments.
#[derive(Debug, Clone, PartialEq)]
pub struct GameParams {
    pub id: String,
    pub site_name: String,
    pub name: String,
    pub variant: Variant,
    pub limit: Limit,
    pub is_real_money: bool,
    pub max_seats: u8,
    pub start_date: NaiveDateTime,
}

/// A game session read from one history file.
/// Identity fields are fixed at construction; only the hand list grows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    id: String,
    site_name: String,
    name: String,
    variant: Variant,
    limit: Limit,
    is_real_money: bool,
    max_seats: u8,
    start_date: NaiveDateTime,
    hands: Vec<Hand>,
}

impl Game {
    pub fn new(p: GameParams) -> Self {
        Self {
            id: p.id,
            site_name: p.site_name,
            name: p.name,
            variant: p.variant,
            limit: p.limit,
            is_real_money: p.is_real_money,
            max_seats: p.max_seats,
            start_date: p.start_date,
            hands: Vec::new(),
        }
    }

    pub fn add_hand(&mut self, hand: Hand) {
        self.hands.push(hand);
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn site_name(&self) -> &str {
        &self.site_name
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn variant(&self) -> Variant {
        self.variant
    }
    pub fn limit(&self) -> Limit {
        self.limit
    }
    pub fn is_real_money(&self) -> bool {
        self.is_real_money
    }
    pub fn max_seats(&self) -> u8 {
        self.max_seats
    }
    pub fn start_date(&self) -> NaiveDateTime {
        self.start_date
    }

    /// Hands in file order.
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Hands where `player` took at least one action.
    pub fn hands_involving<'a>(&'a self, player: &'a str) -> impl Iterator<Item = &'a Hand> + 'a {
        self.hands.iter().filter(move |h| h.is_player_involved(player))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashGame {
    #[serde(flatten)]
    game: Game,
    small_blind: f64,
    big_blind: f64,
}

impl CashGame {
    pub fn new(params: GameParams, small_blind: f64, big_blind: f64) -> Self {
        Self {
            game: Game::new(params),
            small_blind: small_blind.max(0.0),
            big_blind: big_blind.max(0.0),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }
    pub fn small_blind(&self) -> f64 {
        self.small_blind
    }
    pub fn big_blind(&self) -> f64 {
        self.big_blind
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    #[serde(flatten)]
    game: Game,
    buy_in: f64,
}

impl Tournament {
    pub fn new(params: GameParams, buy_in: f64) -> Self {
        Self {
            game: Game::new(params),
            buy_in: buy_in.max(0.0),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }
    pub fn buy_in(&self) -> f64 {
        self.buy_in
    }
}
