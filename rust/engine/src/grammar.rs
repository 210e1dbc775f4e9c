//! Line grammar of a Winamax hand transcript.
//!
//! A hand looks like this (amounts may carry `€` and use `,` decimals):
//!
//! ```text
//! Winamax Poker - CashGame - HandId: #5424201-1-1414877042 - Holdem no limit (0.01€/0.02€) - 2014/11/01 21:24:02 UTC
//! Table: 'Frankfurt 11' 9-max (real money) Seat #2 is the button
//! Seat 1: Villain (2€)
//! Seat 2: Hero (1.98€)
//! *** ANTE/BLINDS ***
//! Villain posts small blind 0.01€
//! Hero posts big blind 0.02€
//! Dealt to Hero [7c Kd]
//! *** PRE-FLOP ***
//! Villain folds
//! Hero collected 0.03€ from pot
//! *** SUMMARY ***
//! Total pot 0.03€ | No rake
//! Seat 2: Hero won 0.03€
//! ```
//!
//! The header and table lines are mandatory and a problem there is a
//! [`ParseFault`]. Everything after them is best-effort: a missing ante, hero
//! line or board leaves the defaults in place.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::action::{Action, ActionType, Street};
use crate::amounts::{sanitize, to_amount, to_buy_in, to_int};
use crate::cards::{parse_card_list, Card, NO_CARDS};
use crate::cursor::LineCursor;
use crate::errors::{FaultKind, ParseFault};
use crate::hand::{parse_history_time, GameType, Hand, HandParams, MAX_WINNERS};
use crate::registry::PlayerRegistry;
use crate::seat::{Seat, MAX_SEATS};

/// Every hand header starts with this.
pub const HEADER_PREFIX: &str = "Winamax Poker";
const HEADER_SUFFIX: &str = "UTC";
const HAND_ID_TOKEN: &str = " - HandId: #";
const BUY_IN_TOKEN: &str = " buyIn: ";
const LEVEL_TOKEN: &str = " level: ";
const TABLE_PREFIX: &str = "Table: '";
const BUTTON_TOKEN: &str = " Seat #";
const BUTTON_SUFFIX: &str = " is the button";
const SEAT_PREFIX: &str = "Seat ";
const POSTS_TOKEN: &str = " posts ";
const ANTE_TOKEN: &str = " posts ante ";
const DEALT_TO: &str = "Dealt to ";
const COLLECTED_TOKEN: &str = " collected ";
const BOARD_PREFIX: &str = "Board: ";

const ACTION_TOKENS: [&str; 6] = [" folds", " checks", " bets ", " calls ", " raises ", " shows "];

const STREET_MARKERS: [(&str, Street); 5] = [
    ("*** PRE-FLOP ***", Street::Preflop),
    ("*** FLOP ***", Street::Flop),
    ("*** TURN ***", Street::Turn),
    ("*** RIVER ***", Street::River),
    ("*** SHOW DOWN ***", Street::River),
];

/// Game-level values carried by a hand header. The assembler only reads
/// them from the first hand of a file, to build the game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameMeta {
    Cash { small_blind: f64, big_blind: f64 },
    Tournament { buy_in: f64, level: u32 },
}

/// What the first line of a hand tells us.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub hand_id: String,
    pub start_date: NaiveDateTime,
    pub meta: GameMeta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableLine {
    pub name: String,
    pub max_seats: u8,
    pub button: Seat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedHand {
    pub hand: Hand,
    pub meta: GameMeta,
}

/// True for a line that opens a new hand, well-formed or not.
/// [`parse_header`] rejects a truncated one.
pub fn is_header_line(line: &str) -> bool {
    line.starts_with(HEADER_PREFIX)
}

/// Parses `Winamax Poker - <context> - HandId: #<id> - <desc> - <timestamp> UTC`.
///
/// Cash game descriptions carry `(<small>/<big>)`; tournament contexts carry
/// `buyIn: <amount> level: <n>`. Those numbers are read leniently; the hand
/// id and the timestamp are mandatory.
pub fn parse_header(
    line: &str,
    game_type: GameType,
    line_number: usize,
) -> Result<Header, ParseFault> {
    let fault = |kind| ParseFault::new(kind, line_number, line);
    let line = line.trim_end();
    if !line.starts_with(HEADER_PREFIX) || !line.ends_with(HEADER_SUFFIX) {
        return Err(fault(FaultKind::MissingHeaderToken));
    }

    let date_start = line
        .rfind(" - ")
        .map(|p| p + 3)
        .ok_or_else(|| fault(FaultKind::MissingHeaderToken))?;
    let date_end = line.len() - HEADER_SUFFIX.len();
    if date_start >= date_end {
        return Err(fault(FaultKind::MissingHeaderToken));
    }
    let start_date =
        parse_history_time(&line[date_start..date_end]).ok_or_else(|| fault(FaultKind::BadTimestamp))?;

    let id_start = line
        .find(HAND_ID_TOKEN)
        .map(|p| p + HAND_ID_TOKEN.len())
        .ok_or_else(|| fault(FaultKind::MissingHeaderToken))?;
    let id_rest = &line[id_start..];
    let hand_id = id_rest[..id_rest.find(" - ").unwrap_or(id_rest.len())].trim();
    if hand_id.is_empty() {
        return Err(fault(FaultKind::MissingHeaderToken));
    }

    let meta = match game_type {
        GameType::CashGame => {
            let (small_blind, big_blind) = parse_blinds(id_rest);
            GameMeta::Cash {
                small_blind,
                big_blind,
            }
        }
        GameType::Tournament => {
            let context = &line[..id_start - HAND_ID_TOKEN.len()];
            let level_pos = context.find(LEVEL_TOKEN);
            let buy_in = context
                .find(BUY_IN_TOKEN)
                .map(|p| {
                    let from = p + BUY_IN_TOKEN.len();
                    let to = level_pos.filter(|&l| l >= from).unwrap_or(context.len());
                    to_buy_in(&context[from..to])
                })
                .unwrap_or(0.0);
            let level = level_pos
                .map(|p| to_int(&context[p + LEVEL_TOKEN.len()..]))
                .and_then(|l| u32::try_from(l).ok())
                .unwrap_or(0);
            GameMeta::Tournament { buy_in, level }
        }
    };

    Ok(Header {
        hand_id: hand_id.to_string(),
        start_date,
        meta,
    })
}

/// Reads `(<small>/<big>)` from the part of a header after the hand id.
fn parse_blinds(s: &str) -> (f64, f64) {
    let Some(open) = s.find('(') else {
        return (0.0, 0.0);
    };
    let inner = &s[open + 1..];
    let inner = &inner[..inner.find(')').unwrap_or(inner.len())];
    let mut parts = inner.split('/');
    let small = parts.next().map_or(0.0, to_amount);
    let big = parts.next().map_or(0.0, to_amount);
    (small, big)
}

/// Parses `Table: '<name>' <N>-max ... Seat #<k> is the button`.
pub fn parse_table_line(line: &str, line_number: usize) -> Result<TableLine, ParseFault> {
    let fault = |kind| ParseFault::new(kind, line_number, line);
    let rest = line
        .strip_prefix(TABLE_PREFIX)
        .ok_or_else(|| fault(FaultKind::MissingTableLine))?;
    let name_end = rest
        .find("' ")
        .ok_or_else(|| fault(FaultKind::MissingTableLine))?;
    let name = sanitize(&rest[..name_end]);
    if name.is_empty() {
        return Err(fault(FaultKind::MissingTableLine));
    }

    let after_name = &rest[name_end + 2..];
    let max_end = after_name
        .find("-max")
        .ok_or_else(|| fault(FaultKind::MissingTableLine))?;
    let max_seats = after_name[..max_end]
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|n| (2..=MAX_SEATS).contains(n))
        .ok_or_else(|| fault(FaultKind::BadSeat))?;

    let button_start = line
        .find(BUTTON_TOKEN)
        .map(|p| p + BUTTON_TOKEN.len())
        .ok_or_else(|| fault(FaultKind::MissingTableLine))?;
    let button_end = line[button_start..]
        .find(BUTTON_SUFFIX)
        .ok_or_else(|| fault(FaultKind::MissingTableLine))?;
    let button = Seat::parse(&line[button_start..button_start + button_end])
        .filter(|s| s.fits(max_seats))
        .ok_or_else(|| fault(FaultKind::BadSeat))?;

    Ok(TableLine {
        name,
        max_seats,
        button,
    })
}

/// Splits an action line into player, kind and amount.
/// `shows` lines and anything unrecognized give `None`.
pub fn classify_action(line: &str) -> Option<(&str, ActionType, f64)> {
    if let Some(player) = line.strip_suffix(" folds") {
        return Some((player, ActionType::Fold, 0.0));
    }
    if let Some(player) = line.strip_suffix(" checks") {
        return Some((player, ActionType::Check, 0.0));
    }
    for (token, kind) in [
        (" calls ", ActionType::Call),
        (" bets ", ActionType::Bet),
        (" raises ", ActionType::Raise),
    ] {
        if let Some(pos) = line.find(token) {
            let rest = &line[pos + token.len()..];
            // "raises 0.04€ to 0.06€": the total after "to" is what the player put in
            let amount = match rest.find(" to ") {
                Some(to) if kind == ActionType::Raise => amount_text(&rest[to + 4..]),
                _ => amount_text(rest),
            };
            return Some((&line[..pos], kind, to_amount(amount)));
        }
    }
    None
}

/// The amount part of `"120 and is all-in"`; spaces inside `"1 000€"` stay.
fn amount_text(s: &str) -> &str {
    s.split(" and ").next().unwrap_or(s)
}

fn street_marker(line: &str) -> Option<Street> {
    STREET_MARKERS
        .iter()
        .find(|(marker, _)| line.starts_with(marker))
        .map(|&(_, street)| street)
}

/// Header of the hand being parsed; faults found at end of input point here.
struct HandStart {
    line_number: usize,
    line: String,
}

impl HandStart {
    fn fault(&self, kind: FaultKind) -> ParseFault {
        ParseFault::new(kind, self.line_number, self.line.as_str())
    }
}

/// Drives the grammar over one hand.
///
/// The cursor must sit on a header line. On success it is left on the first
/// line after the hand's summary block (a blank line, the next header or the
/// end of input).
pub struct HandGrammar<'a> {
    cursor: &'a mut LineCursor,
    registry: &'a mut PlayerRegistry,
    game_type: GameType,
}

impl<'a> HandGrammar<'a> {
    pub fn new(
        cursor: &'a mut LineCursor,
        registry: &'a mut PlayerRegistry,
        game_type: GameType,
    ) -> Self {
        Self {
            cursor,
            registry,
            game_type,
        }
    }

    pub fn parse_hand(&mut self) -> Result<ParsedHand, ParseFault> {
        // An exhausted cursor has no hand to point at
        let start = HandStart {
            line_number: self.cursor.line_number(),
            line: self
                .cursor
                .line()
                .ok_or_else(|| ParseFault::new(FaultKind::UnexpectedEof, 0, ""))?
                .to_string(),
        };
        let header = parse_header(&start.line, self.game_type, start.line_number)?;
        self.cursor.next();

        let table = self.parse_table(&start)?;
        let seats = self.parse_seats(table.max_seats);
        let ante = self.parse_ante();
        let hero_cards = self.parse_hero_cards();
        let (mut actions, street) = self.parse_streets(&header.hand_id, &start)?;
        let winners = self.parse_winners();
        add_actions_for_idle_winners(&header.hand_id, &winners, street, &mut actions);
        let board_cards = self.parse_board();

        let level = match header.meta {
            GameMeta::Tournament { level, .. } => level,
            GameMeta::Cash { .. } => 0,
        };
        let hand = Hand::new(HandParams {
            id: header.hand_id,
            game_type: self.game_type,
            site_name: self.registry.site_name().to_string(),
            table_name: table.name,
            button_seat: table.button,
            max_seats: table.max_seats,
            level,
            ante,
            start_date: header.start_date,
            seats,
            hero_cards,
            board_cards,
            actions,
            winners,
        })
        .map_err(|e| {
            warn!(error = %e, line = start.line_number, "hand rejected");
            start.fault(FaultKind::InvalidHand)
        })?;
        debug!(
            hand_id = hand.id(),
            actions = hand.actions().len(),
            winners = hand.winners().len(),
            "parsed hand"
        );
        Ok(ParsedHand {
            hand,
            meta: header.meta,
        })
    }

    fn parse_table(&mut self, start: &HandStart) -> Result<TableLine, ParseFault> {
        while self.cursor.is_blank() {
            self.cursor.next();
        }
        let line = self
            .cursor
            .line()
            .ok_or_else(|| start.fault(FaultKind::UnexpectedEof))?;
        let table = parse_table_line(line, self.cursor.line_number())?;
        self.cursor.next();
        Ok(table)
    }

    /// Reads `Seat <n>: <player> (<stack>)` lines. Seats outside the table
    /// and empty names are left out of the map; every named player is
    /// registered.
    fn parse_seats(&mut self, max_seats: u8) -> BTreeMap<Seat, String> {
        let mut seats = BTreeMap::new();
        while let Some(line) = self.cursor.line() {
            let Some(rest) = line.strip_prefix(SEAT_PREFIX) else {
                break;
            };
            let Some(colon) = rest.find(": ") else {
                break;
            };
            let entry = &rest[colon + 2..];
            let name = entry[..entry.rfind(" (").unwrap_or(entry.len())].trim();
            match Seat::parse(&rest[..colon]).filter(|s| s.fits(max_seats)) {
                Some(seat) if !name.is_empty() => {
                    self.registry.add_if_missing(name);
                    seats.insert(seat, name.to_string());
                }
                Some(_) => {}
                None => warn!(
                    line = self.cursor.line_number(),
                    "seat outside the table, ignored"
                ),
            }
            self.cursor.next();
        }
        seats
    }

    /// Skips to the blinds, reading the ante from the first `posts ante`
    /// line. All `posts` lines are consumed.
    fn parse_ante(&mut self) -> i64 {
        while self.cursor.has_line() && !self.at_section_start() {
            self.cursor.next();
        }
        let mut ante = None;
        while let Some(line) = self.cursor.line() {
            if !line.contains(POSTS_TOKEN) {
                break;
            }
            if ante.is_none() {
                if let Some(pos) = line.find(ANTE_TOKEN) {
                    ante = Some(to_int(&line[pos + ANTE_TOKEN.len()..]).max(0));
                }
            }
            self.cursor.next();
        }
        ante.unwrap_or(0)
    }

    fn at_section_start(&self) -> bool {
        let c = &*self.cursor;
        c.contains(POSTS_TOKEN)
            || c.starts_with(DEALT_TO)
            || c.contains(COLLECTED_TOKEN)
            || c.line().is_some_and(|l| street_marker(l).is_some() || is_header_line(l))
            || c.contains_one_of(&ACTION_TOKENS)
    }

    /// Reads `Dealt to <hero> [<cards>]` when present, marking the hero.
    fn parse_hero_cards(&mut self) -> [Card; 5] {
        let Some(line) = self.cursor.line() else {
            return NO_CARDS;
        };
        let Some(rest) = line.strip_prefix(DEALT_TO) else {
            return NO_CARDS;
        };
        let name = rest[..rest.rfind(" [").unwrap_or(rest.len())].trim().to_string();
        let cards = parse_card_list(line);
        if !name.is_empty() {
            self.registry.add_if_missing(&name);
            if let Err(e) = self.registry.set_is_hero(&name) {
                warn!(error = %e, "hero not marked");
            }
        }
        self.cursor.next();
        cards
    }

    /// Reads street markers and action lines until the first `collected`
    /// line. Actions are numbered across the whole hand. Actions before any
    /// marker count as preflop. Returns the actions and the last street seen.
    /// Running out of input, or into the next hand, is `UnterminatedStreet`.
    fn parse_streets(
        &mut self,
        hand_id: &str,
        start: &HandStart,
    ) -> Result<(Vec<Action>, Street), ParseFault> {
        let mut actions = Vec::new();
        let mut street = Street::Preflop;
        loop {
            let line_number = self.cursor.line_number();
            let Some(line) = self.cursor.line() else {
                return Err(start.fault(FaultKind::UnterminatedStreet));
            };
            if line.contains(COLLECTED_TOKEN) {
                break;
            }
            if is_header_line(line) {
                return Err(ParseFault::new(
                    FaultKind::UnterminatedStreet,
                    line_number,
                    line,
                ));
            }
            if let Some(s) = street_marker(line) {
                street = s;
            } else if self.cursor.contains_one_of(&ACTION_TOKENS) {
                if let Some((player, kind, amount)) = classify_action(line) {
                    match Action::new(hand_id, player, street, kind, actions.len(), amount) {
                        Ok(a) => actions.push(a),
                        Err(e) => warn!(error = %e, line = line_number, "action ignored"),
                    }
                }
            }
            self.cursor.next();
        }
        Ok((actions, street))
    }

    fn parse_winners(&mut self) -> Vec<String> {
        let mut winners = Vec::new();
        while let Some(pos) = self.cursor.find(COLLECTED_TOKEN) {
            let name = self.cursor.line().map_or("", |l| &l[..pos]);
            if winners.len() < MAX_WINNERS && !name.is_empty() {
                winners.push(name.to_string());
            }
            self.cursor.next();
        }
        winners
    }

    /// Reads the summary block up to the next blank line or header,
    /// picking up `Board: [<cards>]` on the way.
    fn parse_board(&mut self) -> [Card; 5] {
        let mut board = NO_CARDS;
        while let Some(line) = self.cursor.line() {
            if line.trim().is_empty() || is_header_line(line) {
                break;
            }
            if line.starts_with(BOARD_PREFIX) {
                board = parse_card_list(line);
            }
            self.cursor.next();
        }
        board
    }
}

/// Gives every winner without a recorded action one `ActionType::None`
/// entry on the last street seen, so each winner appears in the action list.
///
/// This treats such winners as uncontested pots. A winner whose action line
/// failed to classify gets the same treatment; the two cases are not told
/// apart.
fn add_actions_for_idle_winners(
    hand_id: &str,
    winners: &[String],
    street: Street,
    actions: &mut Vec<Action>,
) {
    for winner in winners {
        if actions.iter().any(|a| a.player_name() == winner) {
            continue;
        }
        match Action::new(hand_id, winner, street, ActionType::None, actions.len(), 0.0) {
            Ok(a) => actions.push(a),
            Err(e) => warn!(error = %e, "synthetic action not created"),
        }
    }
}
