//! Greeter bot: answers every text message with the same fixed greeting.
//! Shows a hand-written [`Handler`] implementation next to the built-ins.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use dispatcher::Dispatcher;
use ebot::{run_bot, Config};
use ebot_core::{init_tracing, Handler, OutboundMessage, Update};
use tracing::info;

const GREETING: &str = "Hello there! I am a very simple bot.";

struct GreetHandler;

#[async_trait]
impl Handler for GreetHandler {
    fn matches(&self, update: &Update) -> bool {
        update.has_text()
    }

    async fn handle(&self, update: &Update) -> ebot_core::Result<OutboundMessage> {
        Ok(OutboundMessage::reply_to(update, GREETING))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load(None)?;
    init_tracing(config.log_file.as_deref())?;

    info!(
        start_time = %Local::now().format("%Y-%m-%d %H:%M:%S"),
        "Greet Bot started"
    );

    let dispatcher = Dispatcher::new().add_handler(Arc::new(GreetHandler));

    run_bot(config, dispatcher).await
}
