//! ebot binary: long-polling Telegram bot answering with a greeting or an echo.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use dispatcher::Dispatcher;
use ebot::{load_config, run_bot, Cli, Commands, CommandHandler, EchoHandler};
use ebot_core::init_tracing;

/// Greeting sent for /start.
const START_GREETING: &str = "Hi! Send me any text and I will echo it back.";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            init_tracing(config.log_file.as_deref())?;

            // Registration order is match order: the command first, the
            // catch-all echo last.
            let dispatcher = Dispatcher::new()
                .add_handler(Arc::new(CommandHandler::start(START_GREETING)))
                .add_handler(Arc::new(EchoHandler::new()));

            run_bot(config, dispatcher).await
        }
    }
}
