use serde::{Deserialize, Serialize};

use common::game::{BotType, Cells, GameStatus, Mark, WinningLine};

use crate::server_config::GameSettings;

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    NewGame {
        #[serde(default)]
        settings: Option<GameSettings>,
    },
    PlaceMark {
        index: usize,
    },
    Reset,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    GameState(GameStateUpdate),
    GameOver(GameOverNotification),
    Error(ErrorResponse),
}

#[derive(Clone, Debug, Serialize)]
pub struct GameStateUpdate {
    pub cells: Cells,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub last_move: Option<usize>,
    pub your_mark: Mark,
    pub console: Vec<String>,
    pub search: Option<SearchStats>,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct SearchStats {
    pub bot_type: BotType,
    pub use_alpha_beta: bool,
    pub positions_evaluated: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct GameOverNotification {
    pub status: GameStatus,
    pub winner: Option<Mark>,
    pub winning_line: Option<WinningLine>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
