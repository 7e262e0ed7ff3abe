//! Integration tests for [`dispatcher::Dispatcher`].
//!
//! Covers: first-match-wins ordering, predicates skipped until the first match,
//! unclaimed updates dropped with no reply, an action error ending the scan for
//! that update, and re-dispatch of the same update producing the same reply.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dispatcher::Dispatcher;
use ebot_core::{Chat, Handler, HandlerError, OutboundMessage, Update};

fn create_test_update(text: Option<&str>) -> Update {
    Update {
        id: 1,
        chat: Chat {
            id: 100,
            chat_type: "private".to_string(),
        },
        from: None,
        text: text.map(String::from),
        date: Utc::now(),
    }
}

/// Handler that claims every update and counts its action invocations.
struct ClaimAllHandler {
    reply: String,
    handle_count: Arc<AtomicUsize>,
}

impl ClaimAllHandler {
    fn new(reply: &str, handle_count: Arc<AtomicUsize>) -> Self {
        Self {
            reply: reply.to_string(),
            handle_count,
        }
    }
}

#[async_trait]
impl Handler for ClaimAllHandler {
    fn matches(&self, _update: &Update) -> bool {
        true
    }

    async fn handle(&self, update: &Update) -> ebot_core::Result<OutboundMessage> {
        self.handle_count.fetch_add(1, Ordering::SeqCst);
        Ok(OutboundMessage::reply_to(update, self.reply.clone()))
    }
}

/// Handler whose predicate never matches; its action must never run.
struct ClaimNoneHandler {
    handle_count: Arc<AtomicUsize>,
}

#[async_trait]
impl Handler for ClaimNoneHandler {
    fn matches(&self, _update: &Update) -> bool {
        false
    }

    async fn handle(&self, update: &Update) -> ebot_core::Result<OutboundMessage> {
        self.handle_count.fetch_add(1, Ordering::SeqCst);
        Ok(OutboundMessage::reply_to(update, "never"))
    }
}

/// **Test: the first matching handler wins; later matching handlers never run.**
///
/// **Setup:** Two handlers that both claim every update.
/// **Action:** `dispatcher.dispatch(&update)`.
/// **Expected:** Reply comes from the first handler; second handler's action count is 0.
#[tokio::test]
async fn test_first_match_wins() {
    let first_count = Arc::new(AtomicUsize::new(0));
    let second_count = Arc::new(AtomicUsize::new(0));

    let dispatcher = Dispatcher::new()
        .add_handler(Arc::new(ClaimAllHandler::new("first", first_count.clone())))
        .add_handler(Arc::new(ClaimAllHandler::new("second", second_count.clone())));

    let update = create_test_update(Some("hi"));
    let reply = dispatcher.dispatch(&update).await.unwrap();

    assert_eq!(
        reply,
        Some(OutboundMessage {
            chat_id: 100,
            text: "first".to_string()
        })
    );
    assert_eq!(first_count.load(Ordering::SeqCst), 1);
    assert_eq!(second_count.load(Ordering::SeqCst), 0);
}

/// **Test: non-matching predicates are skipped until one matches.**
///
/// **Setup:** A never-matching handler registered before an always-matching one.
/// **Action:** `dispatcher.dispatch(&update)`.
/// **Expected:** The second handler produces the reply; the first one's action never ran.
#[tokio::test]
async fn test_skips_non_matching_predicates() {
    let never_count = Arc::new(AtomicUsize::new(0));
    let always_count = Arc::new(AtomicUsize::new(0));

    let dispatcher = Dispatcher::new()
        .add_handler(Arc::new(ClaimNoneHandler {
            handle_count: never_count.clone(),
        }))
        .add_handler(Arc::new(ClaimAllHandler::new("fallback", always_count.clone())));

    let update = create_test_update(Some("hi"));
    let reply = dispatcher.dispatch(&update).await.unwrap();

    assert_eq!(reply.unwrap().text, "fallback");
    assert_eq!(never_count.load(Ordering::SeqCst), 0);
    assert_eq!(always_count.load(Ordering::SeqCst), 1);
}

/// **Test: an update nobody claims is dropped with no reply and no error.**
///
/// **Setup:** A single never-matching handler.
/// **Action:** `dispatcher.dispatch(&update)`.
/// **Expected:** `Ok(None)`; action count stays 0. Same for an empty dispatcher.
#[tokio::test]
async fn test_unclaimed_update_is_dropped() {
    let handle_count = Arc::new(AtomicUsize::new(0));

    let dispatcher = Dispatcher::new().add_handler(Arc::new(ClaimNoneHandler {
        handle_count: handle_count.clone(),
    }));

    let update = create_test_update(Some("hi"));
    assert_eq!(dispatcher.dispatch(&update).await.unwrap(), None);
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);

    let empty = Dispatcher::new();
    assert!(empty.is_empty());
    assert_eq!(empty.dispatch(&update).await.unwrap(), None);
}

/// **Test: a failing action ends the scan for that update.**
///
/// **Setup:** A handler whose action fails, then an always-matching handler.
/// **Action:** `dispatcher.dispatch(&update)`.
/// **Expected:** Err from the first handler; the second handler's action count is 0
/// (one update reaches at most one action, even a failing one).
#[tokio::test]
async fn test_action_error_ends_scan() {
    struct FailingHandler;

    #[async_trait]
    impl Handler for FailingHandler {
        fn matches(&self, _update: &Update) -> bool {
            true
        }

        async fn handle(&self, _update: &Update) -> ebot_core::Result<OutboundMessage> {
            Err(HandlerError::Failed("boom".to_string()).into())
        }
    }

    let later_count = Arc::new(AtomicUsize::new(0));

    let dispatcher = Dispatcher::new()
        .add_handler(Arc::new(FailingHandler))
        .add_handler(Arc::new(ClaimAllHandler::new("later", later_count.clone())));

    let update = create_test_update(Some("hi"));
    let result = dispatcher.dispatch(&update).await;

    assert!(result.is_err());
    assert_eq!(later_count.load(Ordering::SeqCst), 0);
}

/// **Test: dispatching the same update twice produces the same reply twice.**
///
/// **Setup:** One always-matching handler.
/// **Action:** Dispatch the identical update two times (at-least-once redelivery).
/// **Expected:** Both dispatches succeed with equal replies; action ran twice.
#[tokio::test]
async fn test_redelivered_update_is_reprocessed() {
    let handle_count = Arc::new(AtomicUsize::new(0));

    let dispatcher = Dispatcher::new().add_handler(Arc::new(ClaimAllHandler::new(
        "again",
        handle_count.clone(),
    )));

    let update = create_test_update(Some("hi"));
    let first = dispatcher.dispatch(&update).await.unwrap();
    let second = dispatcher.dispatch(&update).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(handle_count.load(Ordering::SeqCst), 2);
}

/// **Test: a text-gated predicate does not fire for empty or missing text.**
///
/// **Setup:** A handler that matches via `update.has_text()`.
/// **Action:** Dispatch updates with text `Some("")` and `None`.
/// **Expected:** Both are dropped; `Some("hi")` still matches.
#[tokio::test]
async fn test_empty_text_matches_nothing() {
    struct TextHandler;

    #[async_trait]
    impl Handler for TextHandler {
        fn matches(&self, update: &Update) -> bool {
            update.has_text()
        }

        async fn handle(&self, update: &Update) -> ebot_core::Result<OutboundMessage> {
            Ok(OutboundMessage::reply_to(update, "text"))
        }
    }

    let dispatcher = Dispatcher::new().add_handler(Arc::new(TextHandler));

    assert_eq!(
        dispatcher
            .dispatch(&create_test_update(Some("")))
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        dispatcher.dispatch(&create_test_update(None)).await.unwrap(),
        None
    );
    assert!(dispatcher
        .dispatch(&create_test_update(Some("hi")))
        .await
        .unwrap()
        .is_some());
}
