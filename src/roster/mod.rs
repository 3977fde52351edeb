pub mod names;
pub mod validate;

use serde::{Deserialize, Serialize};

use crate::game::GameError;

pub use names::{identity_key, normalize};
pub use validate::{MIN_PLAYERS, clamp_impostor_count, has_duplicates, max_impostors, validate};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub display_name: String,
}

impl Player {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
        }
    }

    pub fn identity_key(&self) -> String {
        identity_key(&self.display_name)
    }
}

/// Ordered list of players. Order is turn order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::from_names(["Player 1", "Player 2", "Player 3"])
    }
}

impl Roster {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            players: names.into_iter().map(Player::new).collect(),
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// Appends a player. Returns `Ok(None)` when the name is blank after
    /// normalization, in which case nothing is added.
    pub fn add(&mut self, raw: &str) -> Result<Option<&Player>, GameError> {
        let name = normalize(raw);
        if name.is_empty() {
            return Ok(None);
        }
        let key = identity_key(&name);
        if self.players.iter().any(|p| p.identity_key() == key) {
            return Err(GameError::DuplicateName(name));
        }
        self.players.push(Player::new(name));
        Ok(self.players.last())
    }

    pub fn remove(&mut self, index: usize) -> Result<Player, GameError> {
        if index >= self.players.len() {
            return Err(GameError::PlayerIndexOutOfRange {
                index,
                len: self.players.len(),
            });
        }
        Ok(self.players.remove(index))
    }

    /// Moves the player at `from` so it ends up at position `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), GameError> {
        let len = self.players.len();
        for index in [from, to] {
            if index >= len {
                return Err(GameError::PlayerIndexOutOfRange { index, len });
            }
        }
        if from != to {
            let moved = self.players.remove(from);
            self.players.insert(to, moved);
        }
        Ok(())
    }
}
