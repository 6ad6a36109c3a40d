//! Arena of search positions.
//!
//! Rows live in parallel vectors indexed by [`PositionId`]. A position's
//! children occupy one contiguous block of ids, assigned when the position
//! is expanded and never changed afterwards, so a child is addressed by its
//! parent's range plus an offset.

use std::ops::Range;

/// Index into the position arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PositionId(pub(crate) u32);

impl PositionId {
    /// The root position is always at index 0.
    pub const ROOT: PositionId = PositionId(0);

    /// Index into the arena tables.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Append-only table of positions.
#[derive(Debug)]
pub struct Positions {
    player_count: usize,
    begin_child: Vec<u32>,
    end_child: Vec<u32>,
    /// `player_count` entries per position.
    score_sums: Vec<i64>,
    score_count: Vec<u32>,
    /// Move reaching the position from its parent; `None` for the root.
    moves: Vec<Option<u32>>,
    expanded: Vec<bool>,
}

impl Positions {
    /// Create a table holding an unexpanded root.
    pub fn new(player_count: usize) -> Self {
        let mut positions = Self {
            player_count,
            begin_child: Vec::new(),
            end_child: Vec::new(),
            score_sums: Vec::new(),
            score_count: Vec::new(),
            moves: Vec::new(),
            expanded: Vec::new(),
        };
        positions.push(None);
        positions
    }

    fn push(&mut self, mv: Option<u32>) -> PositionId {
        let id = PositionId(self.score_count.len() as u32);
        self.begin_child.push(0);
        self.end_child.push(0);
        self.score_sums
            .extend(std::iter::repeat(0).take(self.player_count));
        self.score_count.push(0);
        self.moves.push(mv);
        self.expanded.push(false);
        id
    }

    /// Expand `id`, appending one unexpanded child per move.
    ///
    /// # Panics
    /// Panics if `id` was already expanded.
    pub fn expand(&mut self, id: PositionId, moves: impl IntoIterator<Item = usize>) {
        let i = id.index();
        assert!(!self.expanded[i], "position {i} expanded twice");

        let begin = self.score_count.len() as u32;
        for mv in moves {
            self.push(Some(mv as u32));
        }
        self.begin_child[i] = begin;
        self.end_child[i] = self.score_count.len() as u32;
        self.expanded[i] = true;
    }

    /// Number of positions in the arena.
    pub fn len(&self) -> usize {
        self.score_count.len()
    }

    /// Check if the arena is empty (never true, the root always exists).
    pub fn is_empty(&self) -> bool {
        self.score_count.is_empty()
    }

    /// Whether `id` has had its children assigned.
    pub fn is_expanded(&self, id: PositionId) -> bool {
        self.expanded[id.index()]
    }

    /// The contiguous block of child ids. Empty until expanded.
    pub fn children(&self, id: PositionId) -> Range<usize> {
        let i = id.index();
        self.begin_child[i] as usize..self.end_child[i] as usize
    }

    /// Move reaching `id` from its parent, `None` for the root.
    pub fn mv(&self, id: PositionId) -> Option<usize> {
        self.moves[id.index()].map(|mv| mv as usize)
    }

    /// Number of playouts recorded through `id`.
    pub fn score_count(&self, id: PositionId) -> u32 {
        self.score_count[id.index()]
    }

    /// Sum of `player`'s terminal scores recorded through `id`.
    pub fn score_sum(&self, id: PositionId, player: usize) -> i64 {
        self.score_sums[id.index() * self.player_count + player]
    }

    /// All players' score sums for `id`.
    pub fn score_sums(&self, id: PositionId) -> &[i64] {
        let start = id.index() * self.player_count;
        &self.score_sums[start..start + self.player_count]
    }

    /// Add one playout ending with `scores` to every position on `line`.
    pub fn record(&mut self, line: &[PositionId], scores: &[i32]) {
        debug_assert_eq!(scores.len(), self.player_count);
        for &id in line {
            let start = id.index() * self.player_count;
            for (sum, &score) in self.score_sums[start..start + self.player_count]
                .iter_mut()
                .zip(scores)
            {
                *sum += score as i64;
            }
            self.score_count[id.index()] += 1;
        }
    }
}
