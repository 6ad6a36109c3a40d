//! Random playouts over a [`GameTree`].

use mcts_core::{GameTree, NodeView};
use rand::Rng;

/// Scratch buffers for uniformly random playouts.
///
/// Sized once for the tree's player count and reused for every playout.
#[derive(Clone, Debug)]
pub struct Rollout {
    views: Vec<NodeView>,
    moves: Vec<usize>,
    depth: usize,
}

impl Rollout {
    /// Create buffers for `player_count` players.
    pub fn new(player_count: usize) -> Self {
        Self {
            views: vec![NodeView::default(); player_count],
            moves: vec![0; player_count],
            depth: 0,
        }
    }

    /// Play uniformly random joint moves from `node` until a terminal view.
    ///
    /// Returns every player's terminal view; scores are read from it.
    ///
    /// # Panics
    /// Panics if a non-terminal node leaves some player without moves.
    pub fn run<T, R>(&mut self, tree: &mut T, node: usize, rng: &mut R) -> &[NodeView]
    where
        T: GameTree + ?Sized,
        R: Rng + ?Sized,
    {
        let mut node = node;
        self.depth = 0;
        tree.views(node, &mut self.views);

        while !self.views[0].is_terminal() {
            for (mv, view) in self.moves.iter_mut().zip(&self.views) {
                assert!(view.moves_size > 0, "player without moves at non-terminal node {node}");
                *mv = rng.gen_range(0..view.moves_size as usize);
            }
            node = tree.child(node, &self.moves);
            tree.views(node, &mut self.views);
            self.depth += 1;
        }

        &self.views
    }

    /// Terminal views of the last playout.
    pub fn views(&self) -> &[NodeView] {
        &self.views
    }

    /// Number of random joint moves in the last playout.
    pub fn depth(&self) -> usize {
        self.depth
    }
}
