//! Node statistics and the UCB1 confidence bound.
//!
//! Both engines keep their nodes in append-only tables addressed by index;
//! the types here are the rows and handles of those tables.

/// Handle to a player-local node in the local-edge engine.
///
/// Ids are allocated in creation order and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalNodeId(pub(crate) u32);

impl LocalNodeId {
    /// Index into the statistics table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Backpropagated totals for one local node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Sum of terminal scores credited to the node.
    pub sum: u64,

    /// Number of simulations credited to the node.
    pub count: u32,
}

impl Statistics {
    /// Mean credited score, 0.0 for an unvisited node.
    pub fn mean(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f32 / self.count as f32
        }
    }

    /// Credit one simulation that ended with `score`.
    #[inline]
    pub fn record(&mut self, score: u32) {
        self.count += 1;
        self.sum += score as u64;
    }
}

/// Search statistics of one child of the arena root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildStats {
    /// Move index leading to the child.
    pub mv: usize,

    /// Number of playouts through the child.
    pub visits: u32,

    /// Per-player sum of terminal scores through the child.
    pub score_sums: Vec<i64>,
}

/// UCB1 confidence of a child.
///
/// `mean + exploration * sqrt(ln(parent_count) / count)`. An unvisited child
/// is infinitely confident, so with a strict `>` comparison the first
/// unvisited candidate in scan order wins. A parent count of 0 or 1 leaves
/// only the mean.
#[inline]
pub fn confidence(mean: f32, count: u32, parent_count: u32, exploration: f32) -> f32 {
    if count == 0 {
        return f32::INFINITY;
    }
    let log_parent = (parent_count.max(1) as f32).ln();
    mean + exploration * (log_parent / count as f32).sqrt()
}
