use crate::NodeView;

/// A turn-based game with a single active player per position.
///
/// Moves are indices into a fixed-width bit set of `move_words()` 64-bit
/// words; bit `i` of word `i / 64` is set when move `i` is legal. The engine
/// owns every output buffer and sizes it once from `player_count()`,
/// `move_words()` and `digest_words()`, so implementations only fill slices.
pub trait Game {
    /// The game position. Copied freely by the engine.
    type State: Clone;

    /// Number of players; scores and colors are indexed by player.
    fn player_count(&self) -> usize;

    /// Number of u64 words in a legal-move set.
    fn move_words(&self) -> usize;

    /// Number of u64 words in a position digest.
    fn digest_words(&self) -> usize;

    /// Returns the initial position.
    fn start(&self) -> Self::State;

    /// Returns the player to move at `state`.
    fn current_player(&self, state: &Self::State) -> usize;

    /// Writes the legal-move bit set of `state` into `moves`.
    ///
    /// An all-zero set marks a terminal position.
    fn legal_moves(&self, state: &Self::State, moves: &mut [u64]);

    /// Writes the per-player scores of a terminal `state` into `scores`.
    ///
    /// Only meaningful when `legal_moves` is empty.
    fn scores(&self, state: &Self::State, scores: &mut [i32]);

    /// Plays `mv` from `state`, writing what each player observes into `colors`.
    fn apply(&self, state: &Self::State, mv: usize, colors: &mut [u64]) -> Self::State;

    /// Writes a transposition digest of `state` into `digest`.
    fn digest(&self, state: &Self::State, digest: &mut [u64]);
}

/// A simultaneous-move game tree with per-player partial observability.
///
/// Nodes are opaque ids and node `0` is the root. Every player picks a move
/// index at every node; turn-based games give the idle players a single
/// pass move. `child` may be non-deterministic, which models chance.
///
/// Two nodes the engine must merge for a player have to report equal views
/// for that player every time they are reached. The engine cannot detect a
/// tree that breaks this.
pub trait GameTree {
    /// Number of players.
    fn player_count(&self) -> usize;

    /// Writes each player's view of `node` into `views`.
    fn views(&mut self, node: usize, views: &mut [NodeView]);

    /// Returns the node reached from `node` when player `p` plays `moves[p]`.
    fn child(&mut self, node: usize, moves: &[usize]) -> usize;
}
