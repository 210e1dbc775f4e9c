use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::errors::EntityError;
use crate::game::{CashGame, Tournament};
use crate::player::Player;

/// Name every Winamax record carries.
pub const WINAMAX_SITE_NAME: &str = "Winamax";

/// One poker room's aggregate of players, cash games and tournaments.
///
/// Built per file by the assembler, then folded into one aggregate by the
/// loader. Players are deduplicated by name: the first occurrence wins, but a
/// hero flag seen later is carried onto the kept player.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    name: String,
    hero: Option<String>,
    players: BTreeMap<String, Player>,
    cash_games: Vec<CashGame>,
    tournaments: Vec<Tournament>,
}

impl Site {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hero: None,
            players: BTreeMap::new(),
            cash_games: Vec::new(),
            tournaments: Vec::new(),
        }
    }

    pub fn winamax() -> Self {
        Self::new(WINAMAX_SITE_NAME)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the player the transcripts were written for, once known.
    pub fn hero(&self) -> Option<&str> {
        self.hero.as_deref()
    }

    pub fn add_player(&mut self, player: Player) {
        let name = player.name().to_string();
        let is_hero = player.is_hero();
        let kept = self.players.entry(name.clone()).or_insert(player);
        if is_hero {
            kept.set_is_hero(true);
            if self.hero.is_none() {
                self.hero = Some(name);
            }
        }
    }

    pub fn add_cash_game(&mut self, game: CashGame) {
        self.cash_games.push(game);
    }

    pub fn add_tournament(&mut self, game: Tournament) {
        self.tournaments.push(game);
    }

    /// Players sorted by name.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.get(name)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn cash_games(&self) -> &[CashGame] {
        &self.cash_games
    }

    pub fn tournaments(&self) -> &[Tournament] {
        &self.tournaments
    }

    pub fn game_count(&self) -> usize {
        self.cash_games.len() + self.tournaments.len()
    }

    pub fn hand_count(&self) -> usize {
        let cash: usize = self.cash_games.iter().map(|g| g.game().hands().len()).sum();
        let tour: usize = self.tournaments.iter().map(|g| g.game().hands().len()).sum();
        cash + tour
    }

    /// True when no game was built. Players alone do not make a site useful.
    pub fn is_empty(&self) -> bool {
        self.game_count() == 0
    }

    /// Moves every player and game of `other` into `self`.
    /// Games are appended; players go through [`Site::add_player`].
    pub fn merge(&mut self, other: Site) -> Result<(), EntityError> {
        if other.name != self.name {
            return Err(EntityError::SiteMismatch {
                ours: self.name.clone(),
                other: other.name,
            });
        }
        debug!(
            site = %self.name,
            players = other.players.len(),
            cash_games = other.cash_games.len(),
            tournaments = other.tournaments.len(),
            "merging site"
        );
        for (_, p) in other.players {
            self.add_player(p);
        }
        self.cash_games.extend(other.cash_games);
        self.tournaments.extend(other.tournaments);
        Ok(())
    }
}
