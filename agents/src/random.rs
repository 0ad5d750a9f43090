use crate::Agent;
use rand::seq::SliceRandom;
use rand::thread_rng;
use woodpusher_core::{Board, Move};

/// Picks a uniformly random playable move.
pub struct RandomAgent {
    name: String,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            name: "Random".to_string(),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn best_move(&mut self, board: &Board) -> Option<Move> {
        let player = board.current_player();
        // The pseudo-legal list can contain moves that leave the king in
        // check; keep only the ones that survive simulation.
        let playable: Vec<Move> = player
            .legal_moves()
            .iter()
            .filter(|mv| player.make_move(board, mv).status.is_done())
            .cloned()
            .collect();

        let mut rng = thread_rng();
        playable.choose(&mut rng).cloned()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
