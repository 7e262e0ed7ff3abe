//! Pure echo bot: repeats every text message back with an "Echo: " prefix.
//! No command handler; the echo is the only registration.

use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use dispatcher::Dispatcher;
use ebot::{run_bot, Config, EchoHandler};
use ebot_core::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load(None)?;
    init_tracing(config.log_file.as_deref())?;

    info!(
        start_time = %Local::now().format("%Y-%m-%d %H:%M:%S"),
        "Echo Bot started"
    );

    let dispatcher = Dispatcher::new().add_handler(Arc::new(EchoHandler::with_prefix("Echo: ")));

    run_bot(config, dispatcher).await
}
