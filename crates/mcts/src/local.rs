//! Local-edge Monte Carlo tree search for simultaneous-move games with
//! partial observability.
//!
//! Every player grows a private tree. A player's child is looked up by the
//! [`LocalEdge`] `(local node, move, view of the parent)`, so global nodes
//! the player cannot tell apart share one set of statistics. The global
//! game tree is only walked, never stored, which lets `child` be stochastic.
//!
//! Each call to [`LocalSearch::step`]:
//! 1. Selection: from the global root, every player picks its UCB1-best move
//!    while the global node has been visited and is not terminal
//! 2. The frontier node reached is marked visited
//! 3. For every joint move at the frontier: create the local children,
//!    play a random playout from the global child, and credit the terminal
//!    scores to every local node on the path

use std::collections::HashMap;

use mcts_core::{GameTree, MctsError, NodeView, Result};
use rand::Rng;
use tracing::{debug, trace};

use crate::bitset::VisitedSet;
use crate::config::SearchConfig;
use crate::node::{confidence, LocalNodeId, Statistics};
use crate::random::Lcg16;
use crate::rollout::Rollout;

/// Key of a player-local child.
///
/// Equal keys always resolve to the same child, which is what merges
/// indistinguishable global nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LocalEdge {
    /// Local node the move is made from.
    pub start: LocalNodeId,

    /// Move index, in `0..start_view.moves_size`.
    pub mv: u32,

    /// The player's view of the global node at `start`.
    pub start_view: NodeView,
}

/// Monte Carlo tree search with per-player local trees.
///
/// Generic over:
/// - `T`: The game tree being searched, borrowed mutably for the engine's lifetime
/// - `R`: The random number generator driving playouts
pub struct LocalSearch<'a, T: GameTree, R: Rng = Lcg16> {
    tree: &'a mut T,
    config: SearchConfig,
    rng: R,
    player_count: usize,

    /// Global nodes reached by selection. Playouts never mark nodes.
    visited: VisitedSet,

    /// Statistics of every local node of every player.
    statistics: Vec<Statistics>,
    edges: HashMap<LocalEdge, LocalNodeId>,

    /// Local nodes on the current path, one row of `player_count` per depth.
    path: Vec<LocalNodeId>,
    players_node: Vec<LocalNodeId>,
    players_move: Vec<usize>,
    views: Vec<NodeView>,
    root_views: Vec<NodeView>,
    scores: Vec<u32>,
    rollout: Rollout,

    steps: u64,
    expansions: u64,
    simulations: u64,
}

impl<'a, T: GameTree> LocalSearch<'a, T> {
    /// Create a search with default config.
    pub fn new(tree: &'a mut T) -> Result<Self> {
        Self::with_config(tree, SearchConfig::default())
    }

    /// Create a search seeded from `config.seed`.
    pub fn with_config(tree: &'a mut T, config: SearchConfig) -> Result<Self> {
        let rng = Lcg16::new(config.seed);
        Self::with_rng(tree, config, rng)
    }
}

impl<'a, T: GameTree, R: Rng> LocalSearch<'a, T, R> {
    /// Create a search driven by the given generator.
    ///
    /// # Errors
    /// Returns `MctsError::NoPlayers` if the tree has no players.
    pub fn with_rng(tree: &'a mut T, config: SearchConfig, rng: R) -> Result<Self> {
        let player_count = tree.player_count();
        if player_count == 0 {
            return Err(MctsError::NoPlayers);
        }

        let mut root_views = vec![NodeView::default(); player_count];
        tree.views(0, &mut root_views);

        debug!(
            players = player_count,
            root_moves = root_views[0].moves_size,
            "local search created"
        );

        Ok(Self {
            tree,
            config,
            rng,
            player_count,
            visited: VisitedSet::with_len(1),
            // Player p's root is local node p
            statistics: vec![Statistics::default(); player_count],
            edges: HashMap::new(),
            path: Vec::new(),
            players_node: (0..player_count as u32).map(LocalNodeId).collect(),
            players_move: vec![0; player_count],
            views: vec![NodeView::default(); player_count],
            root_views,
            scores: vec![0; player_count],
            rollout: Rollout::new(player_count),
            steps: 0,
            expansions: 0,
            simulations: 0,
        })
    }

    /// Run one selection followed by a sweep over every joint move at the
    /// frontier reached.
    pub fn step(&mut self) {
        self.path.clear();
        for (player, node) in self.players_node.iter_mut().enumerate() {
            *node = LocalNodeId(player as u32);
            self.path.push(*node);
        }

        let mut node = 0;
        self.tree.views(node, &mut self.views);

        while self.visited.contains(node) && !self.views[0].is_terminal() {
            for player in 0..self.player_count {
                self.players_move[player] = self.select_move(player);
                self.path.push(self.players_node[player]);
            }

            node = self.tree.child(node, &self.players_move);
            self.visited.grow_to(node + 1);
            self.tree.views(node, &mut self.views);
        }

        self.visited.grow_to(node + 1);
        self.visited.insert(node);

        if self.views[0].is_terminal() {
            if self.config.terminal_backpropagation {
                copy_scores(&mut self.scores, &self.views);
                self.backpropagate();
            }
        } else {
            self.expand(node);
        }

        self.steps += 1;
        trace!(
            step = self.steps,
            frontier = node,
            depth = self.path.len() / self.player_count,
            local_nodes = self.statistics.len(),
            "step complete"
        );
    }

    /// Pick `player`'s UCB1-best move at the current selection node and move
    /// the player's local node to the chosen child.
    ///
    /// The first candidate is always accepted and later ones replace it only
    /// when strictly more confident.
    fn select_move(&mut self, player: usize) -> usize {
        let parent = self.players_node[player];
        let view = self.views[player];
        let parent_count = self.statistics[parent.index()].count;

        let mut best_move = 0;
        let mut best_confidence = f32::NEG_INFINITY;
        for i in 0..view.moves_size {
            // TODO: take the minimum confidence over the global nodes merged
            // into this child; needs back-references from local nodes.
            let child = self.child_or_insert(LocalEdge {
                start: parent,
                mv: i,
                start_view: view,
            });
            let stats = self.statistics[child.index()];
            let value = confidence(stats.mean(), stats.count, parent_count, self.config.exploration);

            if i == 0 || value > best_confidence {
                best_confidence = value;
                best_move = i as usize;
                self.players_node[player] = child;
            }
        }

        best_move
    }

    /// Simulate every joint move at the frontier `node`.
    fn expand(&mut self, node: usize) {
        assert!(
            self.views.iter().all(|view| view.moves_size > 0),
            "player without moves at non-terminal node {node}"
        );

        let depth = self.path.len();
        self.players_move.fill(0);

        loop {
            for player in 0..self.player_count {
                let child = self.child_or_insert(LocalEdge {
                    start: self.players_node[player],
                    mv: self.players_move[player] as u32,
                    start_view: self.views[player],
                });
                self.path.push(child);
            }

            let child = self.tree.child(node, &self.players_move);
            let terminal = self.rollout.run(&mut *self.tree, child, &mut self.rng);
            copy_scores(&mut self.scores, terminal);
            self.backpropagate();
            self.path.truncate(depth);
            self.expansions += 1;

            if !next_joint_move(&mut self.players_move, &self.views) {
                break;
            }
        }

        trace!(node, expansions = self.expansions, "frontier expanded");
    }

    /// Credit one simulation ending with `self.scores` to every node on the path.
    fn backpropagate(&mut self) {
        for row in self.path.chunks_exact(self.player_count) {
            for (id, &score) in row.iter().zip(&self.scores) {
                self.statistics[id.index()].record(score);
            }
        }
        self.simulations += 1;
    }

    /// Resolve `edge`, allocating a fresh local node on first sight.
    fn child_or_insert(&mut self, edge: LocalEdge) -> LocalNodeId {
        let next = LocalNodeId(self.statistics.len() as u32);
        let id = *self.edges.entry(edge).or_insert(next);
        if id == next {
            self.statistics.push(Statistics::default());
        }
        id
    }

    /// Root local node of `player`.
    ///
    /// # Panics
    /// Panics if `player` is out of range.
    pub fn root(&self, player: usize) -> LocalNodeId {
        assert!(player < self.player_count, "no player {player}");
        LocalNodeId(player as u32)
    }

    /// Statistics of a local node.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this search.
    pub fn statistics(&self, id: LocalNodeId) -> Statistics {
        self.statistics[id.index()]
    }

    /// Every local node with its statistics, in allocation order.
    pub fn local_nodes(&self) -> impl Iterator<Item = (LocalNodeId, Statistics)> + '_ {
        self.statistics
            .iter()
            .enumerate()
            .map(|(i, stats)| (LocalNodeId(i as u32), *stats))
    }

    /// Child of `start` along `mv` seen with `start_view`, if created.
    pub fn child(&self, start: LocalNodeId, mv: u32, start_view: NodeView) -> Option<LocalNodeId> {
        self.edges
            .get(&LocalEdge {
                start,
                mv,
                start_view,
            })
            .copied()
    }

    /// `player`'s most simulated root move.
    ///
    /// Ties go to the lowest move index.
    ///
    /// # Errors
    /// Returns `MctsError::NoLegalMoves` if the root is terminal for the
    /// player or has not been expanded yet.
    pub fn best_move(&self, player: usize) -> Result<usize> {
        let root = self.root(player);
        let view = self.root_views[player];

        let mut best: Option<(usize, u32)> = None;
        for mv in 0..view.moves_size {
            let Some(child) = self.child(root, mv, view) else {
                continue;
            };
            let count = self.statistics(child).count;
            if best.map_or(true, |(_, most)| count > most) {
                best = Some((mv as usize, count));
            }
        }

        best.map(|(mv, _)| mv).ok_or(MctsError::NoLegalMoves)
    }

    /// Whether selection has reached global `node`.
    pub fn is_visited(&self, node: usize) -> bool {
        self.visited.contains(node)
    }

    /// Number of distinct global nodes reached by selection.
    pub fn visited_count(&self) -> usize {
        self.visited.count()
    }

    /// Number of local nodes over all players, roots included.
    pub fn local_node_count(&self) -> usize {
        self.statistics.len()
    }

    /// Number of distinct local edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of completed `step` calls.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Number of joint moves simulated from a frontier.
    pub fn expansions(&self) -> u64 {
        self.expansions
    }

    /// Number of backpropagation passes.
    pub fn simulations(&self) -> u64 {
        self.simulations
    }

    /// Number of players.
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// The search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

fn copy_scores(scores: &mut [u32], views: &[NodeView]) {
    for (score, view) in scores.iter_mut().zip(views) {
        *score = view.score;
    }
}

/// Advance `moves` to the next joint move, odometer style.
///
/// The last player's move turns fastest and carries into earlier players.
/// Returns false once every combination has been produced, leaving `moves`
/// back at all zeros.
pub fn next_joint_move(moves: &mut [usize], views: &[NodeView]) -> bool {
    for (mv, view) in moves.iter_mut().zip(views).rev() {
        *mv += 1;
        if *mv < view.moves_size as usize {
            return true;
        }
        *mv = 0;
    }
    false
}
