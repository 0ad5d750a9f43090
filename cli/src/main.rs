mod config;
mod interactive;

use std::env;
use std::path::Path;

use woodpusher_agents::search;
use woodpusher_core::{Alliance, Board, Square};

use config::{Difficulty, GameConfig};
use interactive::{piece_symbol, InteractiveGame};

const CONFIG_FILE: &str = "woodpusher.toml";
const DUEL_PLY_CAP: u32 = 200;

fn display_board(board: &Board) {
    println!("\n  a b c d e f g h");
    println!("  ---------------");

    for row in 0..8u8 {
        let rank = 8 - row;
        print!("{} ", rank);

        for column in 0..8u8 {
            let square = Square::from_index(row * 8 + column).unwrap();
            match board.piece_at(square) {
                Some(piece) => print!("{} ", piece_symbol(&piece)),
                None => print!(". "),
            }
        }

        println!("| {}", rank);
    }

    println!("  ---------------");
    println!("  a b c d e f g h\n");

    println!("{} to move", board.current_player().alliance());
    if let Some(pawn) = board.en_passant_pawn() {
        println!("En passant pawn: {}", pawn.square);
    }
}

/// Two fixed-depth engines play each other, printing each move with its
/// search statistics.
fn duel(white_depth: u8, black_depth: u8) {
    let mut board = Board::starting_position();
    println!(
        "Duel: Minimax(depth={}) vs Minimax(depth={})",
        white_depth, black_depth
    );

    for ply in 0..DUEL_PLY_CAP {
        let mover = board.current_player();
        let alliance = mover.alliance();

        if mover.is_in_checkmate(&board) {
            println!("Checkmate! {} wins.", alliance.opponent());
            display_board(&board);
            return;
        }
        if mover.is_in_stalemate(&board) {
            println!("Stalemate.");
            display_board(&board);
            return;
        }

        let depth = if alliance == Alliance::White {
            white_depth
        } else {
            black_depth
        };
        let result = search(&board, depth);

        let Some(best_move) = result.best_move else {
            println!("{} resigns.", alliance);
            display_board(&board);
            return;
        };

        println!(
            "{:>3}. {} {} (score {}, {} nodes, {:.2}s)",
            ply / 2 + 1,
            alliance,
            best_move,
            result.score,
            result.nodes,
            result.elapsed.as_secs_f64()
        );

        board = board.current_player().make_move(&board, &best_move).board;
    }

    println!("Ply cap reached, calling it a draw.");
    display_board(&board);
}

fn print_usage() {
    println!("Woodpusher chess engine");
    println!("Commands:");
    println!("  play                 - Play in the terminal (config: {})", CONFIG_FILE);
    println!("  duel [white] [black] - Engine vs engine at the given depths");
    println!("  show                 - Print the starting position");
    println!("  help                 - This text");
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "play" {
        let config = match GameConfig::load(Path::new(CONFIG_FILE)) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{}", err);
                return;
            }
        };
        let mut game = InteractiveGame::new(config);
        if let Err(err) = game.run() {
            eprintln!("terminal error: {}", err);
        }
    } else if args.len() > 1 && args[1] == "duel" {
        let default_depth = Difficulty::Medium.search_depth();
        let white_depth = args
            .get(2)
            .and_then(|s| s.parse().ok())
            .unwrap_or(default_depth);
        let black_depth = args
            .get(3)
            .and_then(|s| s.parse().ok())
            .unwrap_or(white_depth);
        duel(white_depth, black_depth);
    } else if args.len() > 1 && args[1] == "show" {
        display_board(&Board::starting_position());
    } else {
        print_usage();
    }
}
