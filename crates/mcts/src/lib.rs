//! Monte Carlo Tree Search over abstract games.
//!
//! This crate provides two MCTS engines for games implementing the
//! `mcts_core` contracts.
//!
//! # Engines
//!
//! - [`ArenaSearch`]: single active player, legal moves as a bit set. One
//!   append-only position arena; children of a position form a contiguous
//!   block of ids.
//! - [`LocalSearch`]: simultaneous moves, partial observability and chance.
//!   Every player grows a local tree keyed by [`LocalEdge`], so nodes a
//!   player cannot tell apart share statistics.
//!
//! Both select by UCB1, simulate with uniformly random playouts and credit
//! terminal scores along the selected path. Both are single threaded and
//! reproducible from [`SearchConfig::seed`].
//!
//! # Example
//!
//! ```
//! use mcts_core::{NodeView, GameTree};
//! use mcts_search::{LocalSearch, SearchConfig};
//!
//! // Both players pick 0 or 1 once; matching picks pay player 1.
//! struct Pennies;
//!
//! impl GameTree for Pennies {
//!     fn player_count(&self) -> usize {
//!         2
//!     }
//!
//!     fn views(&mut self, node: usize, views: &mut [NodeView]) {
//!         for (player, view) in views.iter_mut().enumerate() {
//!             *view = match node {
//!                 0 => NodeView::new(0, 2),
//!                 leaf => {
//!                     let matched = leaf == 1 || leaf == 4;
//!                     NodeView::terminal(0, (matched == (player == 1)) as u32)
//!                 }
//!             };
//!         }
//!     }
//!
//!     fn child(&mut self, _node: usize, moves: &[usize]) -> usize {
//!         1 + moves[0] * 2 + moves[1]
//!     }
//! }
//!
//! let mut tree = Pennies;
//! let mut search = LocalSearch::with_config(&mut tree, SearchConfig::with_seed(42)).unwrap();
//! for _ in 0..10 {
//!     search.step();
//! }
//! println!("Player 0 plays {:?}", search.best_move(0));
//! ```

pub mod bitset;
pub mod config;
pub mod local;
pub mod node;
pub mod random;
pub mod rollout;
pub mod search;
mod tree;

pub use bitset::{index_of_nth_one, prefix_popcount, random_one, MoveSet, VisitedSet};
pub use config::SearchConfig;
pub use local::{LocalEdge, LocalSearch};
pub use node::{confidence, ChildStats, LocalNodeId, Statistics};
pub use random::Lcg16;
pub use rollout::Rollout;
pub use search::ArenaSearch;
