//! Player-local view of a game-tree node.

/// What one player can observe about a node.
///
/// Two nodes are indistinguishable to a player iff their views compare
/// equal field by field (`color`, then `moves_size`, then `score`). The
/// fields carry no meaning beyond that: the view is a merge key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeView {
    /// Observation class; equal colors at the same local position merge.
    pub color: u32,

    /// Number of moves available to the player. Zero marks a terminal view.
    pub moves_size: u32,

    /// Terminal payoff for the player. Ignored unless terminal.
    pub score: u32,
}

impl NodeView {
    /// View of a non-terminal node.
    pub const fn new(color: u32, moves_size: u32) -> Self {
        Self {
            color,
            moves_size,
            score: 0,
        }
    }

    /// View of a terminal node carrying the player's payoff.
    pub const fn terminal(color: u32, score: u32) -> Self {
        Self {
            color,
            moves_size: 0,
            score,
        }
    }

    /// Returns true if the player has no moves left.
    pub const fn is_terminal(&self) -> bool {
        self.moves_size == 0
    }
}
