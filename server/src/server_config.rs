use serde::{Deserialize, Serialize};

use common::config::Validate;
use common::game::BotType;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstPlayerMode {
    Human,
    Bot,
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub bot_type: BotType,
    pub use_alpha_beta: bool,
    pub first_player: FirstPlayerMode,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            bot_type: BotType::Minimax,
            use_alpha_beta: true,
            first_player: FirstPlayerMode::Human,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub static_files_path: String,
    pub game: GameSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            static_files_path: "ui".to_string(),
            game: GameSettings::default(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.listen_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|e| format!("Invalid listen address '{}': {}", self.listen_addr, e))?;

        if self.static_files_path.is_empty() {
            return Err("Static files path must not be empty".to_string());
        }

        Ok(())
    }
}
