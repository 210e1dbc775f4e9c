use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::action::Action;
use crate::cards::Card;
use crate::errors::EntityError;
use crate::seat::Seat;

/// Timestamp layout used by the vendor transcripts, e.g. `2014/10/31 00:45:01`.
pub const HISTORY_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Layout SQLite expects for `DATETIME` columns.
pub const SQLITE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Most winners a single hand can list.
pub const MAX_WINNERS: usize = 10;

pub fn parse_history_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), HISTORY_TIME_FORMAT).ok()
}

pub fn to_sqlite_date(t: &NaiveDateTime) -> String {
    t.format(SQLITE_DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GameType {
    CashGame,
    Tournament,
}

/// Everything needed to build a [`Hand`].
#[derive(Debug, Clone)]
pub struct HandParams {
    pub id: String,
    pub game_type: GameType,
    pub site_name: String,
    pub table_name: String,
    pub button_seat: Seat,
    pub max_seats: u8,
    /// Tournament level, 0 for cash games
    pub level: u32,
    pub ante: i64,
    pub start_date: NaiveDateTime,
    pub seats: BTreeMap<Seat, String>,
    pub hero_cards: [Card; 5],
    pub board_cards: [Card; 5],
    pub actions: Vec<Action>,
    pub winners: Vec<String>,
}

/// One dealt hand. Built once by the grammar and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hand {
    id: String,
    game_type: GameType,
    site_name: String,
    table_name: String,
    button_seat: Seat,
    max_seats: u8,
    level: u32,
    ante: i64,
    start_date: NaiveDateTime,
    hero_cards: [Card; 5],
    board_cards: [Card; 5],
    seats: BTreeMap<Seat, String>,
    actions: Vec<Action>,
    winners: Vec<String>,
}

impl Hand {
    pub fn new(p: HandParams) -> Result<Self, EntityError> {
        for (field, value) in [
            ("id", &p.id),
            ("site", &p.site_name),
            ("table", &p.table_name),
        ] {
            if value.is_empty() {
                return Err(EntityError::EmptyField {
                    entity: "hand",
                    field,
                });
            }
        }
        if p.ante < 0 {
            return Err(EntityError::NegativeAnte(p.ante));
        }
        if !(2..=10).contains(&p.seats.len()) {
            return Err(EntityError::SeatCount(p.seats.len()));
        }
        let mut winners = p.winners;
        winners.truncate(MAX_WINNERS);
        Ok(Self {
            id: p.id,
            game_type: p.game_type,
            site_name: p.site_name,
            table_name: p.table_name,
            button_seat: p.button_seat,
            max_seats: p.max_seats,
            level: p.level,
            ante: p.ante,
            start_date: p.start_date,
            hero_cards: p.hero_cards,
            board_cards: p.board_cards,
            seats: p.seats,
            actions: p.actions,
            winners,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn game_type(&self) -> GameType {
        self.game_type
    }
    pub fn site_name(&self) -> &str {
        &self.site_name
    }
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
    pub fn button_seat(&self) -> Seat {
        self.button_seat
    }
    pub fn max_seats(&self) -> u8 {
        self.max_seats
    }
    pub fn level(&self) -> u32 {
        self.level
    }
    pub fn ante(&self) -> i64 {
        self.ante
    }
    pub fn start_date(&self) -> NaiveDateTime {
        self.start_date
    }
    pub fn hero_cards(&self) -> &[Card; 5] {
        &self.hero_cards
    }
    pub fn board_cards(&self) -> &[Card; 5] {
        &self.board_cards
    }
    pub fn seats(&self) -> &BTreeMap<Seat, String> {
        &self.seats
    }
    /// Actions in chronological order across all streets.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
    pub fn winners(&self) -> &[String] {
        &self.winners
    }

    /// True when `name` has at least one action in this hand.
    pub fn is_player_involved(&self, name: &str) -> bool {
        self.actions.iter().any(|a| a.player_name() == name)
    }

    pub fn is_winner(&self, name: &str) -> bool {
        self.winners.iter().any(|w| w == name)
    }
}
