//! # Dispatcher
//!
//! Routes one update through an ordered list of handlers. Predicates are checked in
//! registration order; the first handler whose predicate matches runs its action and
//! the scan ends there. Updates nobody claims are dropped without a reply.

use ebot_core::{Handler, OutboundMessage, Result, Update};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Ordered list of (predicate, action) pairs; first match wins.
#[derive(Clone)]
pub struct Dispatcher {
    handlers: Vec<Arc<dyn Handler>>,
}

impl Dispatcher {
    /// Creates an empty dispatcher (no handlers; every update is dropped).
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler. Registration order is match order, so put narrow
    /// handlers (commands) before broad ones (catch-all echo).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the update through the handler list.
    ///
    /// The first matching handler's action decides the outcome: its reply, or its
    /// error. Either way the scan stops, so one update reaches at most one action.
    /// `Ok(None)` means no predicate matched and the update was dropped.
    #[instrument(skip(self, update), fields(update_id = update.id))]
    pub async fn dispatch(&self, update: &Update) -> Result<Option<OutboundMessage>> {
        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            if !handler.matches(update) {
                debug!(handler = %handler_name, "predicate did not match");
                continue;
            }

            info!(
                chat_id = update.chat.id,
                handler = %handler_name,
                "step: handler matched"
            );
            let reply = handler.handle(update).await?;
            info!(
                chat_id = update.chat.id,
                handler = %handler_name,
                reply_len = reply.text.len(),
                "step: handler done"
            );
            return Ok(Some(reply));
        }

        debug!(chat_id = update.chat.id, "no handler matched, update dropped");
        Ok(None)
    }
}

// Unit/integration tests live in tests/dispatcher_test.rs
