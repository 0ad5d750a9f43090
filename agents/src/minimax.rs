use crate::{
    search::{search_with_options, StopToken},
    Agent,
};
use woodpusher_core::{Board, Move};

/// Fixed-depth minimax agent.
pub struct MinimaxAgent {
    name: String,
    depth: u8,
    stop: StopToken,
}

impl MinimaxAgent {
    pub fn new(depth: u8) -> Self {
        MinimaxAgent {
            name: format!("Minimax(depth={})", depth),
            depth,
            stop: StopToken::new(),
        }
    }

    /// Builds an agent whose searches observe an externally held stop
    /// token, so a caller on another thread can interrupt it.
    pub fn with_stop(depth: u8, stop: StopToken) -> Self {
        MinimaxAgent {
            name: format!("Minimax(depth={})", depth),
            depth,
            stop,
        }
    }
}

impl Agent for MinimaxAgent {
    fn best_move(&mut self, board: &Board) -> Option<Move> {
        let result = search_with_options(board, self.depth, self.stop.clone(), None);
        result.best_move
    }

    fn name(&self) -> &str {
        &self.name
    }
}
