use common::game::{
    BotInput, BotType, GameState, Mark, calculate_minimax_move, calculate_move,
    check_win_with_line,
};
use common::log;
use common::session_rng::SessionRng;

use crate::messages::{
    ErrorResponse, GameOverNotification, GameStateUpdate, SearchStats, ServerMessage,
};
use crate::server_config::{FirstPlayerMode, GameSettings};

pub struct GameSession {
    session_id: String,
    settings: GameSettings,
    state: GameState,
    human_mark: Mark,
    bot_mark: Mark,
    rng: SessionRng,
    last_search: Option<SearchStats>,
}

impl GameSession {
    pub async fn create(session_id: String, settings: GameSettings) -> Self {
        let rng = SessionRng::from_random();
        Self::create_with_rng(session_id, settings, rng).await
    }

    pub async fn create_with_rng(
        session_id: String,
        settings: GameSettings,
        rng: SessionRng,
    ) -> Self {
        let mut session = Self {
            session_id,
            settings,
            state: GameState::new(),
            human_mark: Mark::X,
            bot_mark: Mark::O,
            rng,
            last_search: None,
        };
        session.begin().await;
        session
    }

    async fn begin(&mut self) {
        let bot_plays_x = match self.settings.first_player {
            FirstPlayerMode::Human => false,
            FirstPlayerMode::Bot => true,
            FirstPlayerMode::Random => self.rng.random_bool(),
        };

        if bot_plays_x {
            self.human_mark = Mark::O;
            self.bot_mark = Mark::X;
            self.state.log_event("Game started.");
            self.play_bot_turn().await;
            self.state.log_event("Your turn!");
        } else {
            self.human_mark = Mark::X;
            self.bot_mark = Mark::O;
            self.state.log_event("Game started. Your turn!");
        }

        log!(
            "[session:{}] New game (bot: {:?}, alpha-beta: {}, human plays {}, rng seed: {})",
            self.session_id,
            self.settings.bot_type,
            self.settings.use_alpha_beta,
            self.human_mark,
            self.rng.seed()
        );
    }

    pub async fn handle_place(&mut self, index: usize) -> Vec<ServerMessage> {
        if self.state.status.is_over() {
            return vec![error_response("Game is already over")];
        }

        if self.state.current_mark != self.human_mark {
            return vec![error_response("Not your turn")];
        }

        if let Err(e) = self.state.place_mark(index) {
            log!(
                "[session:{}] Player failed to place mark at {}: {}",
                self.session_id,
                index,
                e
            );
            return vec![error_response(&e)];
        }

        self.state
            .log_event(format!("Player placed {} at position {}", self.human_mark, index + 1));

        if self.state.status.is_over() {
            self.log_game_over();
            return vec![self.state_update(), self.game_over_notification()];
        }

        self.play_bot_turn().await;

        if self.state.status.is_over() {
            self.log_game_over();
            return vec![self.state_update(), self.game_over_notification()];
        }

        self.state.log_event("Your turn!");
        vec![self.state_update()]
    }

    pub async fn handle_reset(&mut self) -> Vec<ServerMessage> {
        self.state.reset();
        self.last_search = None;
        log!("[session:{}] Game reset", self.session_id);
        self.begin().await;
        vec![self.state_update()]
    }

    async fn play_bot_turn(&mut self) {
        let input = BotInput::from_game_state(&self.state, self.settings.use_alpha_beta);

        let outcome = match self.settings.bot_type {
            BotType::Random => calculate_move(BotType::Random, &input, &mut self.rng),
            BotType::Minimax => {
                let result =
                    tokio::task::spawn_blocking(move || calculate_minimax_move(&input)).await;
                let Ok(outcome) = result else {
                    log!("[session:{}] Minimax task failed", self.session_id);
                    return;
                };
                outcome
            }
        };

        let Some(index) = outcome.chosen else {
            log!("[session:{}] Bot has no available move", self.session_id);
            return;
        };

        match self.state.place_mark(index) {
            Ok(()) => {
                self.state
                    .log_event(format!("AI placed {} at position {}", self.bot_mark, index + 1));
                self.last_search = Some(SearchStats {
                    bot_type: self.settings.bot_type,
                    use_alpha_beta: self.settings.use_alpha_beta,
                    positions_evaluated: outcome.positions_evaluated,
                });
                log!(
                    "[session:{}] Bot placed {} at position {} ({} positions evaluated)",
                    self.session_id,
                    self.bot_mark,
                    index + 1,
                    outcome.positions_evaluated
                );
            }
            Err(e) => {
                log!(
                    "[session:{}] Bot failed to place mark at {}: {}",
                    self.session_id,
                    index,
                    e
                );
            }
        }
    }

    fn log_game_over(&mut self) {
        let message = match self.state.winner() {
            Some(mark) if mark == self.human_mark => format!("Player {} wins!", mark),
            Some(_) => "AI wins!".to_string(),
            None => "Game ended in a draw!".to_string(),
        };
        self.state.log_event(message);
        log!(
            "[session:{}] Game over: {:?}",
            self.session_id,
            self.state.status
        );
    }

    pub fn state_update(&self) -> ServerMessage {
        ServerMessage::GameState(GameStateUpdate {
            cells: self.state.cells,
            current_mark: self.state.current_mark,
            status: self.state.status,
            last_move: self.state.last_move,
            your_mark: self.human_mark,
            console: self.state.console().to_vec(),
            search: self.last_search,
        })
    }

    fn game_over_notification(&self) -> ServerMessage {
        ServerMessage::GameOver(GameOverNotification {
            status: self.state.status,
            winner: self.state.winner(),
            winning_line: check_win_with_line(&self.state.cells),
        })
    }
}

fn error_response(message: &str) -> ServerMessage {
    ServerMessage::Error(ErrorResponse {
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::game::{GameStatus, get_available_moves};

    async fn default_session() -> GameSession {
        GameSession::create("test".to_string(), GameSettings::default()).await
    }

    #[tokio::test]
    async fn test_first_exchange_console_messages() {
        let mut session = default_session().await;
        let responses = session.handle_place(0).await;

        assert_eq!(responses.len(), 1);
        // After X takes the corner, only the center draws for O; minimax
        // therefore answers at index 4 (position 5).
        assert_eq!(
            session.state.console(),
            [
                "Game started. Your turn!",
                "Player placed X at position 1",
                "AI placed O at position 5",
                "Your turn!",
            ]
        );
        assert_eq!(session.state.current_mark, Mark::X);
    }

    #[tokio::test]
    async fn test_minimax_bot_never_loses_to_greedy_play() {
        let mut session = default_session().await;

        while !session.state.status.is_over() {
            let index = get_available_moves(&session.state.cells)[0];
            session.handle_place(index).await;
        }

        assert_ne!(session.state.status, GameStatus::XWon);
    }

    #[tokio::test]
    async fn test_occupied_cell_returns_error_response() {
        let mut session = default_session().await;
        session.handle_place(0).await;

        let responses = session.handle_place(0).await;
        assert_eq!(responses.len(), 1);
        assert!(matches!(responses[0], ServerMessage::Error(_)));
    }

    #[tokio::test]
    async fn test_move_after_game_over_is_rejected() {
        let mut session = default_session().await;

        while !session.state.status.is_over() {
            let index = get_available_moves(&session.state.cells)[0];
            session.handle_place(index).await;
        }

        let remaining = get_available_moves(&session.state.cells);
        let responses = session.handle_place(remaining.first().copied().unwrap_or(0)).await;
        assert!(matches!(responses[0], ServerMessage::Error(_)));
    }

    #[tokio::test]
    async fn test_game_over_emits_state_and_notification() {
        let mut session = default_session().await;

        let mut last_responses = Vec::new();
        while !session.state.status.is_over() {
            let index = get_available_moves(&session.state.cells)[0];
            last_responses = session.handle_place(index).await;
        }

        assert_eq!(last_responses.len(), 2);
        assert!(matches!(last_responses[0], ServerMessage::GameState(_)));
        assert!(matches!(last_responses[1], ServerMessage::GameOver(_)));
    }

    #[tokio::test]
    async fn test_reset_starts_a_fresh_game() {
        let mut session = default_session().await;
        session.handle_place(0).await;

        let responses = session.handle_reset().await;
        assert_eq!(responses.len(), 1);
        assert_eq!(session.state.status, GameStatus::InProgress);
        assert_eq!(session.state.console(), ["Game started. Your turn!"]);
        assert_eq!(get_available_moves(&session.state.cells).len(), 9);
    }

    #[tokio::test]
    async fn test_bot_first_mode_opens_the_game() {
        let settings = GameSettings {
            first_player: FirstPlayerMode::Bot,
            ..GameSettings::default()
        };
        let session = GameSession::create("test".to_string(), settings).await;

        assert_eq!(session.human_mark, Mark::O);
        assert_eq!(session.bot_mark, Mark::X);
        assert_eq!(session.state.current_mark, Mark::O);
        assert_eq!(get_available_moves(&session.state.cells).len(), 8);
        assert_eq!(session.state.console().first().map(String::as_str), Some("Game started."));
        assert_eq!(session.state.console().last().map(String::as_str), Some("Your turn!"));
    }

    #[tokio::test]
    async fn test_random_bot_plays_an_available_cell() {
        let settings = GameSettings {
            bot_type: BotType::Random,
            ..GameSettings::default()
        };
        let mut session =
            GameSession::create_with_rng("test".to_string(), settings, SessionRng::new(5)).await;

        session.handle_place(4).await;
        let occupied = 9 - get_available_moves(&session.state.cells).len();
        assert_eq!(occupied, 2);

        let ServerMessage::GameState(update) = session.state_update() else {
            panic!("Expected a game state update");
        };
        let stats = update.search.expect("bot move should record search stats");
        assert_eq!(stats.bot_type, BotType::Random);
        assert_eq!(stats.positions_evaluated, 0);
    }

    #[tokio::test]
    async fn test_search_stats_ride_along_with_state_updates() {
        let mut session = default_session().await;
        session.handle_place(0).await;

        let ServerMessage::GameState(update) = session.state_update() else {
            panic!("Expected a game state update");
        };
        let stats = update.search.expect("bot move should record search stats");
        assert_eq!(stats.bot_type, BotType::Minimax);
        assert!(stats.use_alpha_beta);
        assert!(stats.positions_evaluated > 0);
    }
}
