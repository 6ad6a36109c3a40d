//! Search configuration parameters.

use std::f32::consts::SQRT_2;

/// Search configuration parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// UCB1 exploration constant.
    ///
    /// Confidence is `mean + exploration * sqrt(ln(N_parent) / N_child)`.
    /// The classical value is `sqrt(2)`.
    pub exploration: f32,

    /// Seed of the engine's [`Lcg16`](crate::Lcg16) generator.
    pub seed: u32,

    /// Credit the terminal scores along the path when the local-edge
    /// selection ends on a terminal node.
    ///
    /// Off by default: such a step then changes no statistics, and a search
    /// whose selection keeps reaching the same terminal stops learning.
    pub terminal_backpropagation: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration: SQRT_2,
            seed: 1,
            terminal_backpropagation: false,
        }
    }
}

impl SearchConfig {
    /// Create a config with the given generator seed.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Enable or disable crediting terminal scores on terminal selections.
    pub fn terminal_backpropagation(mut self, enabled: bool) -> Self {
        self.terminal_backpropagation = enabled;
        self
    }

    /// Create a config with the given exploration constant.
    pub fn with_exploration(exploration: f32) -> Self {
        Self {
            exploration,
            ..Default::default()
        }
    }
}
