use serde::{Deserialize, Serialize};

/// Score that ends a standard match.
pub const WINNING_SCORE: u16 = 121;

/// Entries kept in the history log by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Match setup. Everything here is fixed for the lifetime of a [`crate::game::Game`].
///
/// ```
/// use cribbage_rs::config::GameConfig;
///
/// let cfg = GameConfig::default().with_seed(7).with_names("Ann", "Bo");
/// assert_eq!(cfg.target_score, 121);
/// assert_eq!(cfg.player_names[1], "Bo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player_names: [String; 2],
    pub history_capacity: usize,
    pub target_score: u16,
    /// Shuffle seed. `None` seeds from OS entropy once per game.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            target_score: WINNING_SCORE,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.player_names = [first.into(), second.into()];
        self
    }

    /// Shorter matches (e.g. 61) are sometimes played; the target is clamped to at least 1.
    pub fn with_target_score(mut self, target: u16) -> Self {
        self.target_score = target.max(1);
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_standard_game() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.target_score, WINNING_SCORE);
        assert_eq!(cfg.history_capacity, 10);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn target_is_never_zero() {
        assert_eq!(GameConfig::default().with_target_score(0).target_score, 1);
    }
}
