//! Turns one history file into a [`Site`].
//!
//! Winamax names its history files
//! `<yyyymmdd>_<game name>_<real|play>_<variant>_<limit>.txt`; tournament
//! names carry the tournament id in parentheses:
//!
//! ```text
//! 20141116_Double or Nothing(100679030)_real_holdem_no-limit.txt
//! 20180304_Ferrare 04_real_omaha5_pot-limit.txt
//! 20170305_Memphis 06_play_omaha_pot-limit.txt
//! ```
//!
//! The file name supplies the game identity; the first hand supplies the
//! blinds or buy-in, the table size and the start date.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::amounts::sanitize;
use crate::cursor::LineCursor;
use crate::errors::ParseFault;
use crate::game::{CashGame, GameParams, Limit, Tournament, Variant};
use crate::grammar::{is_header_line, GameMeta, HandGrammar};
use crate::hand::{GameType, Hand};
use crate::registry::PlayerRegistry;
use crate::site::{Site, WINAMAX_SITE_NAME};

const DATE_PREFIX_LEN: usize = 9;
const MIN_FILE_NAME_LEN: usize = 12;
const REAL_MARKER: &str = "_real_";
const PLAY_MARKER: &str = "_play_";

/// Identity of a game, read from its history file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFileName {
    /// Sanitized file stem; unique per game.
    pub game_id: String,
    pub name: String,
    pub game_type: GameType,
    pub is_real_money: bool,
    pub variant: Variant,
    pub limit: Limit,
    /// Digits in the last parentheses of a tournament name.
    pub tournament_id: Option<String>,
}

/// Reads the game identity from a history file name (no directory).
/// Returns `None` for names that are not hand histories: summaries,
/// `!` duplicates, other extensions, or no `_real_`/`_play_` marker.
pub fn parse_file_name(file_name: &str) -> Option<HistoryFileName> {
    if file_name.len() < MIN_FILE_NAME_LEN || file_name.contains('!') {
        return None;
    }
    let stem = file_name.strip_suffix(".txt")?;
    if stem.contains("_summary") {
        return None;
    }
    let tail = stem.get(DATE_PREFIX_LEN..)?;
    let (marker, is_real_money) = match tail.find(REAL_MARKER) {
        Some(p) => (p, true),
        None => (tail.find(PLAY_MARKER)?, false),
    };
    let name = sanitize(&tail[..marker]);
    if name.is_empty() {
        return None;
    }

    let game_type = if stem.contains('(') {
        GameType::Tournament
    } else {
        GameType::CashGame
    };
    let tournament_id = match game_type {
        GameType::Tournament => name
            .rfind('(')
            .and_then(|open| {
                let inner = &name[open + 1..];
                inner.find(')').map(|close| &inner[..close])
            })
            .filter(|id| !id.is_empty())
            .map(str::to_string),
        GameType::CashGame => None,
    };

    let variant = if stem.contains("_holdem_") {
        Variant::Holdem
    } else if stem.contains("_omaha_") {
        Variant::Omaha
    } else if stem.contains("_omaha5_") {
        Variant::Omaha5
    } else {
        Variant::None
    };
    let limit = if stem.ends_with("_pot-limit") {
        Limit::PotLimit
    } else if stem.ends_with("_no-limit") {
        Limit::NoLimit
    } else {
        Limit::None
    };

    Some(HistoryFileName {
        game_id: sanitize(stem),
        name,
        game_type,
        is_real_money,
        variant,
        limit,
        tournament_id,
    })
}

/// Result of assembling one file.
///
/// `site` holds everything read before `fault`, if any: a fault on the
/// third hand still yields a game with the first two hands, and players
/// seen in any hand are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct FileParse {
    pub site: Site,
    pub fault: Option<ParseFault>,
}

impl FileParse {
    fn empty() -> Self {
        Self {
            site: Site::winamax(),
            fault: None,
        }
    }
}

/// Reads and assembles the history file at `path`.
pub fn parse_game_history(path: &Path) -> io::Result<FileParse> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if parse_file_name(&file_name).is_none() {
        debug!(file = %path.display(), "not a hand history file name, skipped");
        return Ok(FileParse::empty());
    }
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let parse = parse_game_history_text(&file_name, &text);
    match &parse.fault {
        Some(fault) => warn!(file = %path.display(), %fault, "history file partially parsed"),
        None => info!(
            file = %path.display(),
            hands = parse.site.hand_count(),
            "history file parsed"
        ),
    }
    Ok(parse)
}

/// Assembles a site from transcript `text`, using `file_name` for the game
/// identity. No I/O.
pub fn parse_game_history_text(file_name: &str, text: &str) -> FileParse {
    let Some(identity) = parse_file_name(file_name) else {
        return FileParse::empty();
    };
    let mut registry = PlayerRegistry::new(WINAMAX_SITE_NAME);
    let mut cursor = LineCursor::new(text);
    let mut game: Option<AssembledGame> = None;
    let mut fault = None;

    loop {
        if !cursor.line().is_some_and(is_header_line) {
            if !cursor.next() {
                break;
            }
            continue;
        }
        let parsed = HandGrammar::new(&mut cursor, &mut registry, identity.game_type).parse_hand();
        match parsed {
            Ok(parsed) => match game.as_mut() {
                Some(g) => g.add_hand(parsed.hand),
                None => game = Some(AssembledGame::new(&identity, parsed.hand, parsed.meta)),
            },
            Err(f) => {
                fault = Some(f);
                break;
            }
        }
    }

    let mut site = Site::winamax();
    for player in registry.extract_players() {
        site.add_player(player);
    }
    match game {
        Some(AssembledGame::Cash(g)) => site.add_cash_game(g),
        Some(AssembledGame::Tournament(g)) => site.add_tournament(g),
        None => debug!(file = file_name, "no hand parsed, no game created"),
    }
    FileParse { site, fault }
}

enum AssembledGame {
    Cash(CashGame),
    Tournament(Tournament),
}

impl AssembledGame {
    fn new(identity: &HistoryFileName, first: Hand, meta: GameMeta) -> Self {
        let params = GameParams {
            id: identity.game_id.clone(),
            site_name: WINAMAX_SITE_NAME.to_string(),
            name: identity.name.clone(),
            variant: identity.variant,
            limit: identity.limit,
            is_real_money: identity.is_real_money,
            max_seats: first.max_seats(),
            start_date: first.start_date(),
        };
        let mut game = match (identity.game_type, meta) {
            (GameType::Tournament, GameMeta::Tournament { buy_in, .. }) => {
                AssembledGame::Tournament(Tournament::new(params, buy_in))
            }
            (GameType::Tournament, GameMeta::Cash { .. }) => {
                AssembledGame::Tournament(Tournament::new(params, 0.0))
            }
            (GameType::CashGame, GameMeta::Cash {
                small_blind,
                big_blind,
            }) => AssembledGame::Cash(CashGame::new(params, small_blind, big_blind)),
            (GameType::CashGame, GameMeta::Tournament { .. }) => {
                AssembledGame::Cash(CashGame::new(params, 0.0, 0.0))
            }
        };
        game.add_hand(first);
        game
    }

    fn add_hand(&mut self, hand: Hand) {
        match self {
            AssembledGame::Cash(g) => g.game_mut().add_hand(hand),
            AssembledGame::Tournament(g) => g.game_mut().add_hand(hand),
        }
    }
}
