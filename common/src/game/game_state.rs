use super::board::{Cells, apply_move, empty_board};
use super::types::{GameStatus, Mark};
use super::win_detector::{check_win, is_draw};

#[derive(Clone, Debug)]
pub struct GameState {
    pub cells: Cells,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub last_move: Option<usize>,
    console: Vec<String>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            cells: empty_board(),
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            last_move: None,
            console: Vec::new(),
        }
    }

    pub fn place_mark(&mut self, index: usize) -> Result<(), String> {
        if self.status != GameStatus::InProgress {
            return Err("Game is already over".to_string());
        }

        self.cells = apply_move(&self.cells, index, self.current_mark)?;
        self.last_move = Some(index);

        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }

        Ok(())
    }

    fn switch_turn(&mut self) {
        if self.current_mark == Mark::X {
            self.current_mark = Mark::O;
        } else {
            self.current_mark = Mark::X;
        }
    }

    fn check_game_over(&mut self) {
        // Victory first: the ninth move can fill the board and win at once.
        if let Some(winner_mark) = check_win(&self.cells) {
            self.status = match winner_mark {
                Mark::X => GameStatus::XWon,
                Mark::O => GameStatus::OWon,
                Mark::Empty => unreachable!(),
            };
            return;
        }

        if is_draw(&self.cells) {
            self.status = GameStatus::Draw;
        }
    }

    pub fn winner(&self) -> Option<Mark> {
        match self.status {
            GameStatus::XWon => Some(Mark::X),
            GameStatus::OWon => Some(Mark::O),
            _ => None,
        }
    }

    pub fn log_event(&mut self, message: impl Into<String>) {
        self.console.push(message.into());
    }

    pub fn console(&self) -> &[String] {
        &self.console
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
