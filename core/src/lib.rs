pub mod board;
pub mod evaluation;
pub mod moves;
pub mod pieces;
pub mod player;
pub mod types;

pub use board::{Board, Builder, Position};
pub use evaluation::{BoardEvaluator, StandardBoardEvaluator};
pub use moves::{Move, MoveTransition};
pub use pieces::Piece;
pub use player::{is_attacked, Player};
pub use types::{Alliance, MoveStatus, PieceType, Square};
