use serde::Deserialize;

use crate::ai::Difficulty;
use crate::types::Player;

/// Options recognised by an Othello session.
///
/// Deserialized straight from the front end's settings object; missing keys
/// fall back to [`GameConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    /// Seat played by the computer; `None` for two human players.
    pub computer: Option<Player>,
}

impl GameConfig {
    pub fn two_player() -> Self {
        Self {
            computer: None,
            ..Self::default()
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_computer(mut self, computer: Option<Player>) -> Self {
        self.computer = computer;
        self
    }

    pub fn is_computer(&self, player: Player) -> bool {
        self.computer == Some(player)
    }
}

impl Default for GameConfig {
    /// Computer plays white at the advanced level.
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Advanced,
            computer: Some(Player::White),
        }
    }
}
