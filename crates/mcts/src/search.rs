//! Arena Monte Carlo tree search for single-active-player games.
//!
//! Each call to [`ArenaSearch::step`] advances by one move:
//! 1. Playout: while the current position has legal moves, play a random one
//! 2. Backpropagation: at a terminal position, record the scores on the line
//! 3. Selection: re-descend from the root by UCB1
//! 4. Expansion: append one stub child per legal move of the leaf reached
//!
//! The playout then continues from the freshly expanded leaf.

use mcts_core::{Game, MctsError, Result};
use rand::Rng;
use tracing::{debug, trace};

use crate::bitset::MoveSet;
use crate::config::SearchConfig;
use crate::node::{confidence, ChildStats};
use crate::random::Lcg16;
use crate::tree::{PositionId, Positions};

/// Monte Carlo tree search over an append-only position arena.
///
/// Generic over:
/// - `G`: The game being searched, borrowed for the engine's lifetime
/// - `R`: The random number generator driving playouts
pub struct ArenaSearch<'a, G: Game, R: Rng = Lcg16> {
    game: &'a G,
    config: SearchConfig,
    rng: R,
    positions: Positions,
    root_state: G::State,
    /// Position reached by the running playout.
    current: G::State,
    /// Tree positions the running playout descended through.
    line: Vec<PositionId>,
    moves: MoveSet,
    colors: Vec<u64>,
    scores: Vec<i32>,
}

impl<'a, G: Game> ArenaSearch<'a, G> {
    /// Create a search from the game's start position with default config.
    pub fn new(game: &'a G) -> Result<Self> {
        Self::with_config(game, SearchConfig::default())
    }

    /// Create a search seeded from `config.seed`.
    pub fn with_config(game: &'a G, config: SearchConfig) -> Result<Self> {
        let rng = Lcg16::new(config.seed);
        Self::with_rng(game, config, rng)
    }
}

impl<'a, G: Game, R: Rng> ArenaSearch<'a, G, R> {
    /// Create a search driven by the given generator.
    ///
    /// # Errors
    /// Returns `MctsError::NoPlayers` or `MctsError::EmptyMoveSpace` when the
    /// game's buffer sizes are zero.
    pub fn with_rng(game: &'a G, config: SearchConfig, rng: R) -> Result<Self> {
        let player_count = game.player_count();
        if player_count == 0 {
            return Err(MctsError::NoPlayers);
        }
        let move_words = game.move_words();
        if move_words == 0 {
            return Err(MctsError::EmptyMoveSpace);
        }

        let start = game.start();
        let mut search = Self {
            game,
            config,
            rng,
            positions: Positions::new(player_count),
            root_state: start.clone(),
            current: start,
            line: Vec::new(),
            moves: MoveSet::new(move_words),
            colors: vec![0; player_count],
            scores: vec![0; player_count],
        };
        search.reset_tree();

        debug!(
            players = player_count,
            move_words,
            root_children = search.positions.children(PositionId::ROOT).len(),
            "arena search created"
        );
        Ok(search)
    }

    /// Rebuild the arena around `root_state` with the root expanded.
    fn reset_tree(&mut self) {
        self.positions = Positions::new(self.game.player_count());
        self.moves
            .load_with(|words| self.game.legal_moves(&self.root_state, words));
        self.positions.expand(PositionId::ROOT, self.moves.iter());
        self.line.clear();
        self.line.push(PositionId::ROOT);
        self.current = self.root_state.clone();
    }

    /// Advance the search by `steps` moves.
    pub fn step(&mut self, steps: usize) {
        for _ in 0..steps {
            self.moves
                .load_with(|words| self.game.legal_moves(&self.current, words));

            if !self.moves.is_empty() {
                let mv = self.moves.sample(&mut self.rng);
                self.current = self.game.apply(&self.current, mv, &mut self.colors);
            } else {
                self.backpropagate();
                self.select_and_expand();
            }
        }
    }

    /// Record the terminal scores of the playout on every position of the line.
    fn backpropagate(&mut self) {
        self.game.scores(&self.current, &mut self.scores);
        self.positions.record(&self.line, &self.scores);

        trace!(
            depth = self.line.len(),
            scores = ?self.scores,
            "playout recorded"
        );
    }

    /// Descend from the root by UCB1 and expand the leaf reached.
    fn select_and_expand(&mut self) {
        self.line.clear();
        self.line.push(PositionId::ROOT);

        let mut state = self.root_state.clone();
        let mut position = PositionId::ROOT;

        while self.positions.is_expanded(position) {
            if self.positions.children(position).is_empty() {
                break;
            }

            let player = self.game.current_player(&state);
            let child = self.select_child(position, player);
            let mv = self.positions.mv(child).expect("BUG: child position without a move");

            state = self.game.apply(&state, mv, &mut self.colors);
            position = child;
            self.line.push(child);
        }

        if !self.positions.is_expanded(position) {
            self.moves.load_with(|words| self.game.legal_moves(&state, words));
            self.positions.expand(position, self.moves.iter());

            trace!(
                position = position.index(),
                children = self.positions.children(position).len(),
                depth = self.line.len(),
                "position expanded"
            );
        }

        self.current = state;
    }

    /// Pick the child of `position` with the best confidence for `player`.
    ///
    /// Children are scanned starting at offset `position % children`, and
    /// the first unvisited child met is taken at once.
    fn select_child(&self, position: PositionId, player: usize) -> PositionId {
        let children = self.positions.children(position);
        let count = children.len();
        let parent_count = self.positions.score_count(position);

        let mut best = PositionId((children.start + position.index() % count) as u32);
        let mut best_confidence = f32::NEG_INFINITY;

        for i in 0..count {
            // Permute a little
            let child = PositionId((children.start + (i + position.index()) % count) as u32);

            let visits = self.positions.score_count(child);
            if visits == 0 {
                return child;
            }

            let mean = self.positions.score_sum(child, player) as f32 / visits as f32;
            let value = confidence(mean, visits, parent_count, self.config.exploration);
            if value > best_confidence {
                best_confidence = value;
                best = child;
            }
        }

        best
    }

    /// The root move with the most recorded playouts.
    ///
    /// Ties go to the lowest-indexed child.
    ///
    /// # Errors
    /// Returns `MctsError::NoLegalMoves` if the root has no children.
    pub fn best_move(&self) -> Result<usize> {
        let mut best: Option<(PositionId, u32)> = None;
        for index in self.positions.children(PositionId::ROOT) {
            let child = PositionId(index as u32);
            let visits = self.positions.score_count(child);
            if best.map_or(true, |(_, most)| visits > most) {
                best = Some((child, visits));
            }
        }

        best.and_then(|(child, _)| self.positions.mv(child))
            .ok_or(MctsError::NoLegalMoves)
    }

    /// Statistics for every child of the root, in arena order.
    pub fn root_children(&self) -> Vec<ChildStats> {
        self.positions
            .children(PositionId::ROOT)
            .filter_map(|index| {
                let child = PositionId(index as u32);
                Some(ChildStats {
                    mv: self.positions.mv(child)?,
                    visits: self.positions.score_count(child),
                    score_sums: self.positions.score_sums(child).to_vec(),
                })
            })
            .collect()
    }

    /// Play `mv` from the root and restart the search below it.
    ///
    /// The arena is rebuilt; the generator stream continues.
    ///
    /// # Errors
    /// Returns `MctsError::IllegalMove` if `mv` is not a root child.
    pub fn play(&mut self, mv: usize) -> Result<()> {
        let legal = self
            .positions
            .children(PositionId::ROOT)
            .any(|index| self.positions.mv(PositionId(index as u32)) == Some(mv));
        if !legal {
            return Err(MctsError::IllegalMove(mv));
        }

        self.root_state = self.game.apply(&self.root_state, mv, &mut self.colors);
        let discarded = self.positions.len();
        self.reset_tree();

        debug!(
            mv,
            discarded,
            root_children = self.positions.children(PositionId::ROOT).len(),
            "search re-rooted"
        );
        Ok(())
    }

    /// The position the search is rooted at.
    pub fn root_state(&self) -> &G::State {
        &self.root_state
    }

    /// Number of positions in the arena.
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of playouts recorded at the root.
    pub fn root_visits(&self) -> u32 {
        self.positions.score_count(PositionId::ROOT)
    }

    /// The search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}
