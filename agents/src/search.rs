use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use woodpusher_core::{Board, BoardEvaluator, Move, StandardBoardEvaluator};

/// Shared flag that halts an in-flight search. The searcher checks it
/// between sibling-move evaluations at every node, so a halted search
/// returns promptly with its best move so far.
#[derive(Clone, Debug, Default)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Signals the search to stop.
    pub fn halt(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_halted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The outcome of a search: the selected move (None means the mover has
/// nothing playable and resigns) plus telemetry.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    pub elapsed: Duration,
    pub stopped: bool,
}

/// Progress report emitted after each root move is scored.
#[derive(Clone, Debug)]
pub struct SearchProgress {
    pub mv: Move,
    pub move_number: usize,
    pub total_moves: usize,
    pub score: i32,
    pub nodes: u64,
}

pub type InfoCallback = Box<dyn Fn(&SearchProgress) + Send>;

/// Runs a plain fixed-depth minimax search for the board's current player.
pub fn search(board: &Board, depth: u8) -> SearchResult {
    search_with_options(board, depth, StopToken::new(), None)
}

/// Like [`search`], with a stop token and an optional per-root-move
/// progress callback.
pub fn search_with_options(
    board: &Board,
    depth: u8,
    stop: StopToken,
    callback: Option<InfoCallback>,
) -> SearchResult {
    let mut info = SearchInfo::new(stop, callback);
    info.execute(board, depth)
}

struct SearchInfo {
    evaluator: StandardBoardEvaluator,
    start: Instant,
    nodes: u64,
    stop: StopToken,
    callback: Option<InfoCallback>,
}

impl SearchInfo {
    fn new(stop: StopToken, callback: Option<InfoCallback>) -> Self {
        Self {
            evaluator: StandardBoardEvaluator,
            start: Instant::now(),
            nodes: 0,
            stop,
            callback,
        }
    }

    /// Root loop. White keeps the move whose child scores strictly highest
    /// under the opponent's best replies; Black keeps the strictly lowest.
    /// Ties keep the earliest-seen move.
    fn execute(&mut self, board: &Board, depth: u8) -> SearchResult {
        let mover = board.current_player();
        let white_to_move = mover.alliance().is_white();
        let moves: Vec<Move> = mover.legal_moves().to_vec();
        let total_moves = moves.len();

        let mut best_move = None;
        let mut highest_seen = i32::MIN;
        let mut lowest_seen = i32::MAX;
        let mut stopped = false;

        for (number, mv) in moves.iter().enumerate() {
            if self.stop.is_halted() {
                stopped = true;
                break;
            }

            let transition = mover.make_move(board, mv);
            if !transition.status.is_done() {
                continue;
            }

            let value = if white_to_move {
                self.min(&transition.board, depth.saturating_sub(1))
            } else {
                self.max(&transition.board, depth.saturating_sub(1))
            };

            if white_to_move && value > highest_seen {
                highest_seen = value;
                best_move = Some(mv.clone());
            } else if !white_to_move && value < lowest_seen {
                lowest_seen = value;
                best_move = Some(mv.clone());
            }

            if let Some(ref callback) = self.callback {
                callback(&SearchProgress {
                    mv: mv.clone(),
                    move_number: number + 1,
                    total_moves,
                    score: value,
                    nodes: self.nodes,
                });
            }
        }

        SearchResult {
            best_move,
            score: if white_to_move {
                highest_seen
            } else {
                lowest_seen
            },
            depth,
            nodes: self.nodes,
            elapsed: self.start.elapsed(),
            stopped,
        }
    }

    /// The minimizing half: Black's best reply value. Mutually recursive
    /// with [`max`](SearchInfo::max).
    fn min(&mut self, board: &Board, depth: u8) -> i32 {
        self.nodes += 1;
        if depth == 0 || is_end_game(board) {
            return self.evaluator.evaluate(board, depth);
        }

        let mover = board.current_player();
        let mut lowest_seen = i32::MAX;
        let mut any_child = false;

        for mv in mover.legal_moves() {
            if self.stop.is_halted() {
                break;
            }
            let transition = mover.make_move(board, mv);
            if transition.status.is_done() {
                any_child = true;
                let value = self.max(&transition.board, depth - 1);
                if value < lowest_seen {
                    lowest_seen = value;
                }
            }
        }

        // A node whose every move fails simulation has no child scores;
        // fall back to the static evaluation rather than an extreme
        // sentinel the parent would misread.
        if any_child {
            lowest_seen
        } else {
            self.evaluator.evaluate(board, depth)
        }
    }

    /// The maximizing half: White's best reply value.
    fn max(&mut self, board: &Board, depth: u8) -> i32 {
        self.nodes += 1;
        if depth == 0 || is_end_game(board) {
            return self.evaluator.evaluate(board, depth);
        }

        let mover = board.current_player();
        let mut highest_seen = i32::MIN;
        let mut any_child = false;

        for mv in mover.legal_moves() {
            if self.stop.is_halted() {
                break;
            }
            let transition = mover.make_move(board, mv);
            if transition.status.is_done() {
                any_child = true;
                let value = self.min(&transition.board, depth - 1);
                if value > highest_seen {
                    highest_seen = value;
                }
            }
        }

        if any_child {
            highest_seen
        } else {
            self.evaluator.evaluate(board, depth)
        }
    }
}

/// Terminal test for the recursion: the side to move has been mated or
/// stalemated.
fn is_end_game(board: &Board) -> bool {
    let mover = board.current_player();
    mover.is_in_checkmate(board) || mover.is_in_stalemate(board)
}
