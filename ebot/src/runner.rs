//! Poll/dispatch runner: startup preflight, then the long-poll loop.
//!
//! The loop owns the offset through [`UpdateSource`]: it takes a whole batch,
//! dispatches it in order, sends the produced replies, then commits. Failed
//! polls back off and retry; failed handlers and sends are logged per update.
//! Only a termination signal (or a startup config error) ends the process.

use std::time::Duration;

use anyhow::{Context, Result};
use dispatcher::Dispatcher;
use ebot_core::{Bot, Update};
use ebot_telegram::{mask_token, ApiClient, UpdateSource};
use tracing::{error, info, instrument, warn};

use crate::config::Config;

/// Base delay before retrying a failed poll.
const RETRY_BASE: Duration = Duration::from_secs(1);
/// Ceiling for the poll retry delay.
const RETRY_MAX: Duration = Duration::from_secs(30);

/// Retry delay for the `attempt`-th consecutive poll failure (1-based):
/// doubles from [`RETRY_BASE`], capped at [`RETRY_MAX`]. Resets are the
/// caller's job (any successful poll).
fn poll_retry_delay(attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(5);
    let delay = RETRY_BASE * (1u32 << exponent);
    delay.min(RETRY_MAX)
}

/// Dispatches one polled batch in ascending id order and sends produced replies.
///
/// Never fails: a handler error or a failed send is logged with the update id
/// and the loop moves to the next update, so no handler can kill the bot.
pub async fn process_batch(bot: &dyn Bot, dispatcher: &Dispatcher, batch: &[Update]) {
    for update in batch {
        match dispatcher.dispatch(update).await {
            Ok(Some(reply)) => {
                if let Err(e) = bot.send(&reply).await {
                    error!(
                        update_id = update.id,
                        chat_id = reply.chat_id,
                        error = %e,
                        "Failed to send reply"
                    );
                }
            }
            Ok(None) => {}
            Err(e) => {
                error!(
                    update_id = update.id,
                    chat_id = update.chat.id,
                    error = %e,
                    "Handler failed"
                );
            }
        }
    }
}

/// Resolves when the process is asked to stop: Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable, listening for Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Polls and dispatches until a termination signal arrives.
///
/// The signal can cancel a poll in flight but never a dispatch: once a batch is
/// taken, its replies are sent and the offset committed before the loop exits.
async fn run_poll_loop(source: &mut UpdateSource, dispatcher: &Dispatcher, bot: &dyn Bot) {
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let mut failed_polls: u32 = 0;

    info!(offset = source.offset(), "Polling for updates");

    loop {
        let polled = tokio::select! {
            _ = shutdown_rx.changed() => {
                info!("Shutdown signal received, stopping poll loop");
                break;
            }
            polled = source.poll() => polled,
        };

        match polled {
            Ok(batch) => {
                failed_polls = 0;
                if batch.is_empty() {
                    continue;
                }
                info!(count = batch.len(), "step: batch received");
                process_batch(bot, dispatcher, &batch).await;
                source.commit();
            }
            Err(e) => {
                failed_polls += 1;
                let delay = poll_retry_delay(failed_polls);
                warn!(
                    error = %e,
                    attempt = failed_polls,
                    delay_secs = delay.as_secs(),
                    "Poll failed, backing off"
                );
                tokio::select! {
                    _ = shutdown_rx.changed() => {
                        info!("Shutdown signal received during backoff, stopping poll loop");
                        break;
                    }
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        }
    }
}

/// Main entry: validate config, build the API client, preflight with getMe,
/// then run the poll loop until a termination signal. Returns Err only for
/// startup failures; nothing after startup is fatal except the signal.
#[instrument(skip(config, dispatcher))]
pub async fn run_bot(config: Config, dispatcher: Dispatcher) -> Result<()> {
    config.validate()?;

    let api = ApiClient::new(config.bot_token.clone(), config.telegram_api_url.as_deref())
        .context("Build Telegram API client")?;

    info!(
        token = %mask_token(&config.bot_token),
        poll_timeout_secs = config.poll_timeout_secs,
        handlers = dispatcher.len(),
        "Initializing bot"
    );

    // Preflight: getMe proves the token before the first poll. A rejected
    // credential is a config problem; a transient failure is not worth dying
    // for, the poll loop retries anyway.
    match api.get_me().await {
        Ok(me) => {
            info!(
                bot_id = me.id,
                username = %me.username.as_deref().unwrap_or("-"),
                "Bot identified"
            );
        }
        Err(e) if e.is_unauthorized() => {
            return Err(anyhow::Error::from(e).context("Telegram rejected the bot token"));
        }
        Err(e) => {
            warn!(error = %e, "getMe failed, continuing without bot identity");
        }
    }

    let mut source = UpdateSource::new(api.clone(), config.poll_timeout_secs);

    if config.skip_pending_updates {
        if let Err(e) = source.discard_backlog().await {
            warn!(error = %e, "Could not discard pending updates, processing backlog instead");
        }
    }

    info!("Bot started successfully");

    run_poll_loop(&mut source, &dispatcher, &api).await;

    info!("Bot stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: retry delay doubles from 1s and caps at 30s.**
    #[test]
    fn test_poll_retry_delay_doubles_then_caps() {
        assert_eq!(poll_retry_delay(1), Duration::from_secs(1));
        assert_eq!(poll_retry_delay(2), Duration::from_secs(2));
        assert_eq!(poll_retry_delay(3), Duration::from_secs(4));
        assert_eq!(poll_retry_delay(4), Duration::from_secs(8));
        assert_eq!(poll_retry_delay(5), Duration::from_secs(16));
        assert_eq!(poll_retry_delay(6), Duration::from_secs(30));
        assert_eq!(poll_retry_delay(100), Duration::from_secs(30));
        // 0 is out of contract but must not underflow.
        assert_eq!(poll_retry_delay(0), Duration::from_secs(1));
    }
}
