use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("invalid move string at position {position}: {reason}")]
    ParseMove { position: usize, reason: String },
    #[error("column {column} is full")]
    ColumnFull { column: usize },
    #[error("column {column} is out of bounds")]
    ColumnOutOfBounds { column: usize },
    #[error("no legal moves remain")]
    NoLegalMoves,
    #[error("the game is already over")]
    GameFinished,
    #[error("depth {0} is out of range (1-15)")]
    DepthOutOfRange(u8),
    #[error("depth {depth} exceeds the configured limit of {limit}")]
    DepthAboveLimit { depth: u8, limit: u8 },
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl GameError {
    /// True for the errors a UI should swallow and re-prompt on.
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            GameError::ColumnFull { .. } | GameError::ColumnOutOfBounds { .. }
        )
    }
}
