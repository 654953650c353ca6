mod messages;
mod server_config;
mod session;
mod web_server;
mod ws_handler;

use clap::Parser;
use common::config::ConfigManager;
use common::{log, logger};

use server_config::ServerConfig;
use web_server::run_web_server;

#[derive(Parser)]
#[command(name = "tictactoe_server")]
struct Args {
    #[arg(long, default_value = "server_config.yaml")]
    config: String,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<ServerConfig> = ConfigManager::from_yaml_file(&args.config);
    let config = config_manager.get_config()?;

    log!(
        "Tic-Tac-Toe server starting (bot: {:?}, alpha-beta pruning: {})",
        config.game.bot_type,
        config.game.use_alpha_beta
    );

    run_web_server(config).await?;

    log!("Server shut down gracefully");

    Ok(())
}
