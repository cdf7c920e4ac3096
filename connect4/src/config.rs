use serde::{Deserialize, Serialize};

use crate::board::{Board, STANDARD_COLS, STANDARD_ROWS};
use crate::error::GameError;
use crate::game::MAX_DEPTH;

/// Search depth the AI uses unless told otherwise.
pub const DEFAULT_DEPTH: u8 = 6;

/// Board shape and AI strength for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rows: usize,
    pub cols: usize,
    pub depth: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: STANDARD_ROWS,
            cols: STANDARD_COLS,
            depth: DEFAULT_DEPTH,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        Board::new(self.rows, self.cols)?;
        if !(1..=MAX_DEPTH).contains(&self.depth) {
            return Err(GameError::Config(format!(
                "depth must be between 1 and {MAX_DEPTH}, got {}",
                self.depth
            )));
        }
        Ok(())
    }

    pub fn new_board(&self) -> Result<Board, GameError> {
        Board::new(self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_standard_board() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.new_board().unwrap(), Board::standard());
        assert_eq!(config.depth, 6);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"depth": 4}"#).unwrap();
        assert_eq!(config.rows, 6);
        assert_eq!(config.cols, 7);
        assert_eq!(config.depth, 4);
    }

    #[test]
    fn rejects_bad_values() {
        let small = EngineConfig {
            rows: 3,
            ..EngineConfig::default()
        };
        assert!(matches!(small.validate(), Err(GameError::Config(_))));

        let shallow = EngineConfig {
            depth: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(shallow.validate(), Err(GameError::Config(_))));

        let deep = EngineConfig {
            depth: MAX_DEPTH + 1,
            ..EngineConfig::default()
        };
        assert!(deep.validate().is_err());
    }
}
