//! Long-poll update source: fetches batches and owns the offset cursor.
//!
//! `poll` fetches the next batch without moving the committed offset; `commit`
//! advances past that batch once it has been dispatched. A crash between the
//! two re-delivers the batch on restart, so delivery is at-least-once and an
//! update is never lost by advancing past work that was not done.

use ebot_core::{Result, ToCoreUpdate, Update};
use tracing::{debug, info, instrument};

use crate::client::ApiClient;

/// Pulls updates for one bot. Not shared across tasks; the poll loop is the
/// only writer of the cursor.
pub struct UpdateSource {
    api: ApiClient,
    timeout_secs: u64,
    /// Next update id to ask for. Only `commit` and `discard_backlog` move it.
    offset: i64,
    /// Where the last polled batch ends; `commit` promotes it to `offset`.
    next_offset: i64,
}

impl UpdateSource {
    pub fn new(api: ApiClient, timeout_secs: u64) -> Self {
        Self {
            api,
            timeout_secs,
            offset: 0,
            next_offset: 0,
        }
    }

    /// Committed offset, i.e. the id the next poll will ask for.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Fetches the next batch of updates, sorted ascending by id.
    ///
    /// Parks for up to the configured long-poll timeout; an expired poll yields
    /// an empty batch. Entries without a message payload are filtered out of
    /// the batch but still counted, so `commit` moves past them too. The
    /// committed offset does not move here; call [`commit`](Self::commit) once
    /// the batch has been processed, or poll again to receive it a second time.
    #[instrument(skip(self), fields(offset = self.offset))]
    pub async fn poll(&mut self) -> Result<Vec<Update>> {
        let raw = self.api.get_updates(self.offset, self.timeout_secs).await?;
        if raw.is_empty() {
            self.next_offset = self.offset;
            return Ok(Vec::new());
        }

        if let Some(highest) = raw.iter().map(|u| u.update_id).max() {
            self.next_offset = highest + 1;
        }

        let mut batch: Vec<Update> = raw.iter().filter_map(|u| u.to_core()).collect();
        batch.sort_by_key(|u| u.id);

        if batch.len() < raw.len() {
            debug!(
                dropped = raw.len() - batch.len(),
                "entries without message payload dropped from batch"
            );
        }
        debug!(
            count = batch.len(),
            next_offset = self.next_offset,
            "batch polled"
        );
        Ok(batch)
    }

    /// Advances the committed offset past the last polled batch.
    ///
    /// Call after the batch was handed through the dispatcher. Polling again
    /// without committing re-delivers the same updates.
    pub fn commit(&mut self) {
        if self.next_offset > self.offset {
            debug!(from = self.offset, to = self.next_offset, "offset committed");
            self.offset = self.next_offset;
        }
    }

    /// Drops every update queued before startup by jumping the cursor past the
    /// newest pending one. Used when the bot should only react to messages sent
    /// after it came up.
    #[instrument(skip(self))]
    pub async fn discard_backlog(&mut self) -> Result<()> {
        // offset -1 asks for the single newest pending update only.
        let newest = self.api.get_updates(-1, 0).await?;
        match newest.iter().map(|u| u.update_id).max() {
            Some(id) => {
                self.offset = id + 1;
                self.next_offset = self.offset;
                info!(offset = self.offset, "pending updates discarded");
            }
            None => debug!("no pending updates to discard"),
        }
        Ok(())
    }
}

// Offset behavior is covered by tests/update_source_test.rs against a mock server.
