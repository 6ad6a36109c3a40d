use thiserror::Error;

/// Errors reported by the search engines at their public boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MctsError {
    #[error("Game reports zero players")]
    NoPlayers,

    #[error("Game reports an empty move space (zero move words)")]
    EmptyMoveSpace,

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Illegal move: {0}")]
    IllegalMove(usize),
}

/// Convenience Result type for search operations
pub type Result<T> = std::result::Result<T, MctsError>;
