use std::collections::BTreeMap;

use crate::errors::RegistryError;
use crate::player::Player;

/// Players seen so far while parsing one file.
///
/// Each file task owns its own registry, so the methods take `&mut self` and
/// no lock is involved. Ownership of the players moves out through
/// [`PlayerRegistry::extract_players`].
#[derive(Debug, Clone)]
pub struct PlayerRegistry {
    site_name: String,
    players: BTreeMap<String, Player>,
}

impl PlayerRegistry {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            players: BTreeMap::new(),
        }
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    /// Registers `name` unless already known. Empty names are ignored.
    pub fn add_if_missing(&mut self, name: &str) {
        if name.is_empty() || self.players.contains_key(name) {
            return;
        }
        self.players
            .insert(name.to_string(), Player::new(name, self.site_name.as_str()));
    }

    /// Marks an already registered player as the hero.
    pub fn set_is_hero(&mut self, name: &str) -> Result<(), RegistryError> {
        let player = self
            .players
            .get_mut(name)
            .ok_or_else(|| RegistryError::UnknownPlayer(name.to_string()))?;
        player.set_is_hero(true);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Drains every registered player, sorted by name, leaving the registry empty.
    pub fn extract_players(&mut self) -> Vec<Player> {
        std::mem::take(&mut self.players).into_values().collect()
    }
}
