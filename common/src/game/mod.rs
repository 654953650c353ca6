mod board;
mod bot_controller;
mod game_state;
mod types;
mod win_detector;

pub use board::{
    BOARD_SIZE, CELL_COUNT, Cells, apply_move, cell_index, empty_board, get_available_moves,
    is_valid_move,
};
pub use bot_controller::{
    BotInput, BotType, SearchOutcome, calculate_minimax_move, calculate_move,
};
pub use game_state::GameState;
pub use types::{GameStatus, Mark, WinningLine};
pub use win_detector::{WIN_LINES, check_win, check_win_with_line, is_draw, is_victory};
