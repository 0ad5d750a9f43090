pub mod minimax;
pub mod random;
pub mod search;

use woodpusher_core::{Board, Move};

/// Core trait for chess agents
pub trait Agent {
    /// Get the best move for the current position. `None` means the agent
    /// has no playable move and resigns.
    fn best_move(&mut self, board: &Board) -> Option<Move>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
pub use search::{
    search, search_with_options, InfoCallback, SearchProgress, SearchResult, StopToken,
};
