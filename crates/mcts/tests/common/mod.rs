//! Games used by the integration tests.

#![allow(dead_code)]

use mcts_core::{Game, GameTree, NodeView};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// =============================================================================
// Tic-tac-toe as a bitboard game
// =============================================================================

/// Tic-tac-toe with O on bits 0..9 and X on bits 9..18 of the state.
///
/// O (player 0) moves first. Scores are 2 for a win, 1 for a draw, 0 for a loss.
pub struct TicTacToe {
    start: u32,
}

const BOARD: u32 = 0b111_111_111;
const X_SHIFT: u32 = 9;
const LINES: [u32; 8] = [
    0b000_000_111,
    0b000_111_000,
    0b111_000_000,
    0b001_001_001,
    0b010_010_010,
    0b100_100_100,
    0b100_010_001,
    0b001_010_100,
];

impl TicTacToe {
    pub fn new() -> Self {
        Self { start: 0 }
    }

    /// Start from a position with O on `o` and X on `x`.
    pub fn from_cells(o: &[usize], x: &[usize]) -> Self {
        let mut start = 0;
        for &cell in o {
            start |= 1 << cell;
        }
        for &cell in x {
            start |= 1 << (cell as u32 + X_SHIFT);
        }
        Self { start }
    }

    pub fn winner(state: u32) -> Option<usize> {
        let o = state & BOARD;
        let x = (state >> X_SHIFT) & BOARD;
        if LINES.iter().any(|&line| o & line == line) {
            Some(0)
        } else if LINES.iter().any(|&line| x & line == line) {
            Some(1)
        } else {
            None
        }
    }
}

impl Game for TicTacToe {
    type State = u32;

    fn player_count(&self) -> usize {
        2
    }

    fn move_words(&self) -> usize {
        1
    }

    fn digest_words(&self) -> usize {
        1
    }

    fn start(&self) -> u32 {
        self.start
    }

    fn current_player(&self, state: &u32) -> usize {
        (state.count_ones() % 2) as usize
    }

    fn legal_moves(&self, state: &u32, moves: &mut [u64]) {
        moves[0] = if Self::winner(*state).is_some() {
            0
        } else {
            (BOARD & !(state | (state >> X_SHIFT))) as u64
        };
    }

    fn scores(&self, state: &u32, scores: &mut [i32]) {
        match Self::winner(*state) {
            Some(0) => scores.copy_from_slice(&[2, 0]),
            Some(_) => scores.copy_from_slice(&[0, 2]),
            None => scores.copy_from_slice(&[1, 1]),
        }
    }

    fn apply(&self, state: &u32, mv: usize, colors: &mut [u64]) -> u32 {
        colors.fill(mv as u64);
        state | (1 << (mv as u32 + self.current_player(state) as u32 * X_SHIFT))
    }

    fn digest(&self, state: &u32, digest: &mut [u64]) {
        digest[0] = *state as u64;
    }
}

// =============================================================================
// One decision over a multi-word move space
// =============================================================================

/// Player 0 picks one move from `legal` and the game ends.
///
/// `winner` scores [1, 0]; every other move scores [0, 1].
pub struct PickWords {
    pub legal: Vec<u64>,
    pub winner: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Pick {
    Open,
    Done(usize),
}

impl Game for PickWords {
    type State = Pick;

    fn player_count(&self) -> usize {
        2
    }

    fn move_words(&self) -> usize {
        self.legal.len()
    }

    fn digest_words(&self) -> usize {
        1
    }

    fn start(&self) -> Pick {
        Pick::Open
    }

    fn current_player(&self, _state: &Pick) -> usize {
        0
    }

    fn legal_moves(&self, state: &Pick, moves: &mut [u64]) {
        match state {
            Pick::Open => moves.copy_from_slice(&self.legal),
            Pick::Done(_) => moves.fill(0),
        }
    }

    fn scores(&self, state: &Pick, scores: &mut [i32]) {
        let won = *state == Pick::Done(self.winner);
        scores[0] = won as i32;
        scores[1] = !won as i32;
    }

    fn apply(&self, _state: &Pick, mv: usize, colors: &mut [u64]) -> Pick {
        colors.fill(mv as u64);
        Pick::Done(mv)
    }

    fn digest(&self, state: &Pick, digest: &mut [u64]) {
        digest[0] = match state {
            Pick::Open => u64::MAX,
            Pick::Done(mv) => *mv as u64,
        };
    }
}

// =============================================================================
// Simultaneous one-shot matrix game
// =============================================================================

/// Both players pick 0 or 1 once. Node 0 is the root, leaves are
/// `1 + 2 * move0 + move1` and pay `payoffs[leaf - 1]`.
pub struct MatrixGame {
    pub payoffs: [[u32; 2]; 4],
}

impl MatrixGame {
    /// Leaves (0,0), (0,1), (1,0), (1,1) pay (2,2), (0,3), (3,0), (1,1).
    pub fn dilemma() -> Self {
        Self {
            payoffs: [[2, 2], [0, 3], [3, 0], [1, 1]],
        }
    }
}

impl GameTree for MatrixGame {
    fn player_count(&self) -> usize {
        2
    }

    fn views(&mut self, node: usize, views: &mut [NodeView]) {
        for (player, view) in views.iter_mut().enumerate() {
            *view = match node {
                0 => NodeView::new(0, 2),
                leaf => NodeView::terminal(leaf as u32, self.payoffs[leaf - 1][player]),
            };
        }
    }

    fn child(&mut self, node: usize, moves: &[usize]) -> usize {
        assert_eq!(node, 0, "leaves have no children");
        1 + moves[0] * 2 + moves[1]
    }
}

// =============================================================================
// Hidden choice: player 1 cannot see player 0's move
// =============================================================================

/// Player 0 hides a bit (player 1 passes), then player 1 guesses it
/// (player 0 passes). A right guess scores 1 for player 1, a wrong one
/// scores 1 for player 0.
///
/// Nodes: 0 root, 1 + a after player 0 hid `a`, 3 + 2a + b after the guess `b`.
/// Player 1's views of nodes 1 and 2 are equal.
pub struct HiddenGuess;

impl HiddenGuess {
    pub const ROOT_VIEWS: [NodeView; 2] = [NodeView::new(0, 2), NodeView::new(0, 1)];
    pub const GUESS_VIEW: NodeView = NodeView::new(0, 2);

    /// Player 0's view after hiding `a`.
    pub fn hider_view(a: usize) -> NodeView {
        NodeView::new(1 + a as u32, 1)
    }
}

impl GameTree for HiddenGuess {
    fn player_count(&self) -> usize {
        2
    }

    fn views(&mut self, node: usize, views: &mut [NodeView]) {
        match node {
            0 => views.copy_from_slice(&Self::ROOT_VIEWS),
            1 | 2 => {
                views[0] = Self::hider_view(node - 1);
                views[1] = Self::GUESS_VIEW;
            }
            leaf => {
                let a = (leaf - 3) / 2;
                let b = (leaf - 3) % 2;
                let guessed = (a == b) as u32;
                views[0] = NodeView::terminal(0, 1 - guessed);
                views[1] = NodeView::terminal(0, guessed);
            }
        }
    }

    fn child(&mut self, node: usize, moves: &[usize]) -> usize {
        match node {
            0 => 1 + moves[0],
            1 | 2 => 3 + 2 * (node - 1) + moves[1],
            leaf => panic!("terminal node {leaf} has no children"),
        }
    }
}

// =============================================================================
// Transposition: two root moves reach the same node
// =============================================================================

/// One player. Both root moves lead to node 3, whose two moves lead to the
/// leaves 4 and 5. Every leaf scores 1.
pub struct Transpose;

impl Transpose {
    pub const ROOT_VIEW: NodeView = NodeView::new(0, 2);
    pub const JOIN_VIEW: NodeView = NodeView::new(3, 2);
}

impl GameTree for Transpose {
    fn player_count(&self) -> usize {
        1
    }

    fn views(&mut self, node: usize, views: &mut [NodeView]) {
        views[0] = match node {
            0 => Self::ROOT_VIEW,
            3 => Self::JOIN_VIEW,
            leaf => NodeView::terminal(leaf as u32, 1),
        };
    }

    fn child(&mut self, node: usize, moves: &[usize]) -> usize {
        match node {
            0 => 3,
            3 => 4 + moves[0],
            leaf => panic!("terminal node {leaf} has no children"),
        }
    }
}

// =============================================================================
// Stochastic race with private positions
// =============================================================================

/// Two runners race to `goal`. Each turn both pick "walk" (move 0, one
/// step) or "dash" (move 1, zero to two steps at random). A runner only
/// sees its own position. Finishing ahead scores 2, a tie 1 each.
///
/// Node id is `a * (goal + 1) + b` for positions `a`, `b`.
pub struct DiceRace {
    goal: usize,
    rng: ChaCha8Rng,
}

impl DiceRace {
    pub fn new(goal: usize, seed: u64) -> Self {
        Self {
            goal,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn positions(&self, node: usize) -> (usize, usize) {
        (node / (self.goal + 1), node % (self.goal + 1))
    }

    /// Upper bound on node ids.
    pub fn node_count(&self) -> usize {
        (self.goal + 1) * (self.goal + 1)
    }
}

impl GameTree for DiceRace {
    fn player_count(&self) -> usize {
        2
    }

    fn views(&mut self, node: usize, views: &mut [NodeView]) {
        let (a, b) = self.positions(node);
        if a >= self.goal || b >= self.goal {
            let (sa, sb) = match a.cmp(&b) {
                std::cmp::Ordering::Greater => (2, 0),
                std::cmp::Ordering::Less => (0, 2),
                std::cmp::Ordering::Equal => (1, 1),
            };
            views[0] = NodeView::terminal(a as u32, sa);
            views[1] = NodeView::terminal(b as u32, sb);
        } else {
            views[0] = NodeView::new(a as u32, 2);
            views[1] = NodeView::new(b as u32, 2);
        }
    }

    fn child(&mut self, node: usize, moves: &[usize]) -> usize {
        let (a, b) = self.positions(node);
        let mut advance = |position: usize, mv: usize| {
            let step = if mv == 0 { 1 } else { self.rng.gen_range(0..=2) };
            (position + step).min(self.goal)
        };
        let a = advance(a, moves[0]);
        let b = advance(b, moves[1]);
        a * (self.goal + 1) + b
    }
}
