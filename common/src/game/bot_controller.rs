use serde::{Deserialize, Serialize};

use crate::session_rng::SessionRng;

use super::board::{Cells, get_available_moves};
use super::game_state::GameState;
use super::types::Mark;
use super::win_detector::{is_draw, is_victory};

const WIN_SCORE: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotType {
    Random,
    Minimax,
}

pub struct BotInput {
    pub cells: Cells,
    pub bot_mark: Mark,
    pub use_alpha_beta: bool,
}

impl BotInput {
    pub fn from_game_state(state: &GameState, use_alpha_beta: bool) -> Self {
        Self {
            cells: state.cells,
            bot_mark: state.current_mark,
            use_alpha_beta,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub chosen: Option<usize>,
    pub score: i32,
    pub positions_evaluated: u64,
}

pub fn calculate_move(bot_type: BotType, input: &BotInput, rng: &mut SessionRng) -> SearchOutcome {
    match bot_type {
        BotType::Random => calculate_random_move(input, rng),
        BotType::Minimax => calculate_minimax_move(input),
    }
}

fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> SearchOutcome {
    let available_moves = get_available_moves(&input.cells);
    if available_moves.is_empty() {
        return SearchOutcome {
            chosen: None,
            score: 0,
            positions_evaluated: 0,
        };
    }

    let index = rng.random_range(0..available_moves.len());
    SearchOutcome {
        chosen: Some(available_moves[index]),
        score: 0,
        positions_evaluated: 0,
    }
}

pub fn calculate_minimax_move(input: &BotInput) -> SearchOutcome {
    let mut cells = input.cells;
    let mut positions_evaluated = 0;

    let (score, chosen) = minimax(
        &mut cells,
        input.bot_mark,
        i32::MIN,
        i32::MAX,
        true,
        input.use_alpha_beta,
        &mut positions_evaluated,
    );

    if chosen.is_none() {
        // Already-terminal board: the sentinel carries no meaningful score.
        return SearchOutcome {
            chosen: None,
            score: 0,
            positions_evaluated,
        };
    }

    SearchOutcome {
        chosen,
        score,
        positions_evaluated,
    }
}

fn minimax(
    cells: &mut Cells,
    player: Mark,
    mut alpha: i32,
    mut beta: i32,
    is_maximizing: bool,
    use_alpha_beta: bool,
    positions_evaluated: &mut u64,
) -> (i32, Option<usize>) {
    *positions_evaluated += 1;

    if is_victory(cells) {
        // The previous ply completed the line, so the side to move here lost.
        let score = if is_maximizing { -WIN_SCORE } else { WIN_SCORE };
        return (score, None);
    }

    if is_draw(cells) {
        return (0, None);
    }

    let opponent = player.opponent().unwrap();

    let mut best_score = if is_maximizing { i32::MIN } else { i32::MAX };
    let mut best_move = None;

    for index in get_available_moves(cells) {
        cells[index] = player;
        let (score, _) = minimax(
            cells,
            opponent,
            alpha,
            beta,
            !is_maximizing,
            use_alpha_beta,
            positions_evaluated,
        );
        cells[index] = Mark::Empty;

        if is_maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(index);
            }
            if use_alpha_beta {
                alpha = alpha.max(best_score);
            }
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(index);
            }
            if use_alpha_beta {
                beta = beta.min(best_score);
            }
        }

        if use_alpha_beta && beta <= alpha {
            break;
        }
    }

    (best_score, best_move)
}
