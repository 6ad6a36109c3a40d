//! MCTS Core - Game abstractions and common types
//!
//! This crate provides the contracts a game must satisfy to be searched by
//! the engines in `mcts-search`.
//!
//! # Types
//!
//! - [`Game`] - Single active player, legal moves as a bit set
//! - [`GameTree`] - Simultaneous moves with per-player partial observability
//! - [`NodeView`] - One player's view of a node, used as a merge key

mod error;
mod game;
mod types;

pub use error::{MctsError, Result};
pub use game::{Game, GameTree};
pub use types::NodeView;
