use std::io::{self, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent},
    style::{Color as TermColor, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
    ExecutableCommand,
};
use woodpusher_agents::{search_with_options, SearchResult, StopToken};
use woodpusher_core::{Alliance, Board, Move, MoveStatus, Piece, PieceType, Square};

use crate::config::{GameConfig, GameMode};

pub struct InteractiveGame {
    board: Board,
    config: GameConfig,
    human_side: Alliance,
    cursor_pos: (u8, u8), // (column, row), row 0 at the top
    selected_square: Option<Square>,
    moves_for_selected: Vec<Move>,
    message: String,
    ply: u32,
    game_over: bool,
}

impl InteractiveGame {
    pub fn new(config: GameConfig) -> Self {
        Self {
            board: Board::starting_position(),
            config,
            human_side: config.human_side.resolve(),
            cursor_pos: (4, 6), // e2
            selected_square: None,
            moves_for_selected: Vec::new(),
            message: String::from("Use hjkl to move, Enter to select/move, q to quit"),
            ply: 0,
            game_over: false,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        // Setup terminal
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(Hide)?;
        stdout.execute(Clear(ClearType::All))?;

        let result = self.game_loop();

        // Cleanup
        stdout.execute(Show)?;
        terminal::disable_raw_mode()?;
        stdout.execute(Clear(ClearType::All))?;
        stdout.execute(MoveTo(0, 0))?;

        result
    }

    fn is_engine_turn(&self) -> bool {
        self.config.mode == GameMode::HumanVsAi
            && self.board.current_player().alliance() != self.human_side
    }

    fn game_loop(&mut self) -> io::Result<()> {
        loop {
            self.check_game_over();
            self.draw_board()?;

            if !self.game_over && self.is_engine_turn() {
                self.engine_move()?;
                continue;
            }

            // Handle input
            if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1, 0),
                    KeyCode::Char('j') | KeyCode::Down => self.move_cursor(0, 1),
                    KeyCode::Char('k') | KeyCode::Up => self.move_cursor(0, -1),
                    KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1, 0),
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        if !self.game_over {
                            self.handle_selection();
                        }
                    }
                    KeyCode::Char('n') => self.new_game(),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn check_game_over(&mut self) {
        if self.game_over {
            return;
        }
        let mover = self.board.current_player();
        if mover.is_in_checkmate(&self.board) {
            self.message = format!("Checkmate! {} wins!", mover.alliance().opponent());
            self.game_over = true;
        } else if mover.is_in_stalemate(&self.board) {
            self.message = String::from("Stalemate!");
            self.game_over = true;
        } else if mover.is_in_check() {
            self.message = String::from("Check!");
        }
    }

    fn move_cursor(&mut self, dx: i8, dy: i8) {
        let new_column = self.cursor_pos.0 as i8 + dx;
        let new_row = self.cursor_pos.1 as i8 + dy;

        if (0..8).contains(&new_column) && (0..8).contains(&new_row) {
            self.cursor_pos = (new_column as u8, new_row as u8);
        }
    }

    fn cursor_square(&self) -> Square {
        Square::from_index(self.cursor_pos.1 * 8 + self.cursor_pos.0).unwrap()
    }

    fn handle_selection(&mut self) {
        let cursor_square = self.cursor_square();

        if self.selected_square.is_some() {
            // A piece is selected; try to move it to the cursor.
            if let Some(mv) = self
                .moves_for_selected
                .iter()
                .find(|m| m.destination() == cursor_square)
                .cloned()
            {
                self.try_move(&mv);
                return;
            }
            // Clicked somewhere else, deselect.
            self.selected_square = None;
            self.moves_for_selected.clear();
        }

        // Try to select a piece of the side to move.
        if let Some(piece) = self.board.piece_at(cursor_square) {
            if piece.alliance == self.board.current_player().alliance() {
                self.selected_square = Some(cursor_square);
                self.moves_for_selected = self
                    .board
                    .current_player()
                    .legal_moves()
                    .iter()
                    .filter(|m| m.source() == cursor_square)
                    .cloned()
                    .collect();
                self.message = format!("Selected {} at {}", piece_name(&piece), cursor_square);
            }
        }
    }

    fn try_move(&mut self, mv: &Move) {
        let transition = self.board.current_player().make_move(&self.board, mv);
        self.selected_square = None;
        self.moves_for_selected.clear();

        match transition.status {
            MoveStatus::Done => {
                self.board = transition.board;
                self.ply += 1;
                self.message = format!("Moved: {}", mv);
            }
            MoveStatus::LeavesPlayerInCheck => {
                self.message = String::from("Illegal: that leaves your king in check");
            }
            MoveStatus::IllegalMove => {
                self.message = String::from("Illegal move");
            }
        }
    }

    /// Runs the search on a worker thread so the session stays responsive;
    /// pressing q while the engine thinks halts the search and quits.
    fn engine_move(&mut self) -> io::Result<()> {
        self.message = String::from("Engine thinking... (q to stop)");
        self.draw_board()?;

        let board = self.board.clone();
        let depth = self.config.difficulty.search_depth();
        let stop = StopToken::new();
        let worker_stop = stop.clone();
        let (tx, rx) = mpsc::channel::<SearchResult>();

        thread::spawn(move || {
            let result = search_with_options(&board, depth, worker_stop, None);
            let _ = tx.send(result);
        });

        let result = loop {
            match rx.recv_timeout(Duration::from_millis(50)) {
                Ok(result) => break result,
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if event::poll(Duration::from_millis(0))? {
                        if let Event::Key(KeyEvent {
                            code: KeyCode::Char('q') | KeyCode::Esc,
                            ..
                        }) = event::read()?
                        {
                            stop.halt();
                        }
                    }
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(()),
            }
        };

        match result.best_move {
            Some(engine_move) => {
                let transition = self
                    .board
                    .current_player()
                    .make_move(&self.board, &engine_move);
                if transition.status.is_done() {
                    self.board = transition.board;
                    self.ply += 1;
                    self.message = format!(
                        "Engine played: {} ({} nodes, {:.2}s)",
                        engine_move,
                        result.nodes,
                        result.elapsed.as_secs_f64()
                    );
                }
            }
            None => {
                self.message = format!(
                    "Engine resigns. {} wins!",
                    self.board.current_player().alliance().opponent()
                );
                self.game_over = true;
            }
        }

        Ok(())
    }

    fn new_game(&mut self) {
        self.board = Board::starting_position();
        self.human_side = self.config.human_side.resolve();
        self.selected_square = None;
        self.moves_for_selected.clear();
        self.cursor_pos = (4, 6);
        self.ply = 0;
        self.game_over = false;
        self.message = String::from("New game started!");
    }

    fn draw_board(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.execute(MoveTo(0, 0))?;

        // Title
        println!("Woodpusher - Interactive Mode (vim keys: hjkl)\r");
        println!("Commands: Enter=select/move, n=new, q=quit\r");
        println!("\r");

        println!("  a b c d e f g h  \r");
        println!(" ┌─────────────────┐\r");

        for row in 0..8u8 {
            let rank = 8 - row;
            print!("{}│ ", rank);

            for column in 0..8u8 {
                let square = Square::from_index(row * 8 + column).unwrap();

                let is_cursor = self.cursor_pos == (column, row);
                let is_selected = self.selected_square == Some(square);
                let is_destination = self
                    .moves_for_selected
                    .iter()
                    .any(|m| m.destination() == square);

                // Set background color
                if is_cursor {
                    stdout.execute(SetBackgroundColor(TermColor::Yellow))?;
                } else if is_selected {
                    stdout.execute(SetBackgroundColor(TermColor::Green))?;
                } else if is_destination {
                    stdout.execute(SetBackgroundColor(TermColor::Blue))?;
                } else if (column + row) % 2 == 0 {
                    stdout.execute(SetBackgroundColor(TermColor::DarkGrey))?;
                } else {
                    stdout.execute(SetBackgroundColor(TermColor::Black))?;
                }

                if let Some(piece) = self.board.piece_at(square) {
                    if piece.alliance == Alliance::White {
                        stdout.execute(SetForegroundColor(TermColor::White))?;
                    } else {
                        stdout.execute(SetForegroundColor(TermColor::Magenta))?;
                    }
                    print!("{} ", piece_symbol(&piece));
                } else {
                    print!("  ");
                }

                stdout.execute(ResetColor)?;
            }

            println!("│{}\r", rank);
        }

        println!(" └─────────────────┘\r");
        println!("  a b c d e f g h  \r");
        println!("\r");

        // Game info
        println!(
            "{} to move | Ply {}   \r",
            self.board.current_player().alliance(),
            self.ply
        );

        // Status message
        println!("\r");
        println!("{}\r", self.message);
        print!("{}\r", " ".repeat(60));

        stdout.flush()?;
        Ok(())
    }
}

fn piece_name(piece: &Piece) -> &'static str {
    match piece.piece_type {
        PieceType::Pawn => "Pawn",
        PieceType::Knight => "Knight",
        PieceType::Bishop => "Bishop",
        PieceType::Rook => "Rook",
        PieceType::Queen => "Queen",
        PieceType::King => "King",
    }
}

pub fn piece_symbol(piece: &Piece) -> char {
    match (piece.piece_type, piece.alliance) {
        (PieceType::King, Alliance::White) => '♔',
        (PieceType::Queen, Alliance::White) => '♕',
        (PieceType::Rook, Alliance::White) => '♖',
        (PieceType::Bishop, Alliance::White) => '♗',
        (PieceType::Knight, Alliance::White) => '♘',
        (PieceType::Pawn, Alliance::White) => '♙',
        (PieceType::King, Alliance::Black) => '♚',
        (PieceType::Queen, Alliance::Black) => '♛',
        (PieceType::Rook, Alliance::Black) => '♜',
        (PieceType::Bishop, Alliance::Black) => '♝',
        (PieceType::Knight, Alliance::Black) => '♞',
        (PieceType::Pawn, Alliance::Black) => '♟',
    }
}
