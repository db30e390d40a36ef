/**
 * Presence Registry
 *
 * Tracks which nicknames are currently in the chat. Each entry holds the
 * time of the user's last activity; joining, posting and explicit touches
 * refresh it. Users idle for longer than the configured window drop off the
 * list without an explicit leave.
 *
 * The map lives behind one `RwLock`, so a join and a leave for the same
 * nickname never interleave.
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Shared registry of active chat users
#[derive(Debug, Clone)]
pub struct PresenceRegistry {
    last_seen: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
    window: Option<Duration>,
}

impl PresenceRegistry {
    /// Create a registry; `None` keeps users listed until they leave
    pub fn new(window: Option<Duration>) -> Self {
        Self {
            last_seen: Arc::new(RwLock::new(HashMap::new())),
            window,
        }
    }

    pub fn window(&self) -> Option<Duration> {
        self.window
    }

    /// Mark `nickname` as present and return the current joiners
    pub async fn join(&self, nickname: &str) -> Vec<String> {
        self.touch_at(nickname, Utc::now()).await;
        self.list().await
    }

    /// Remove `nickname` and return the remaining joiners
    pub async fn leave(&self, nickname: &str) -> Vec<String> {
        let nickname = nickname.trim();
        if !nickname.is_empty() && self.last_seen.write().await.remove(nickname).is_some() {
            tracing::debug!("{} left the chat", nickname);
        }
        self.list().await
    }

    /// Refresh the activity time of `nickname`
    pub async fn touch(&self, nickname: &str) {
        self.touch_at(nickname, Utc::now()).await;
    }

    /// Record activity of `nickname` at `at`; blank nicknames are ignored
    pub async fn touch_at(&self, nickname: &str, at: DateTime<Utc>) {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return;
        }

        let mut last_seen = self.last_seen.write().await;
        let entry = last_seen.entry(nickname.to_string()).or_insert(at);
        if at > *entry {
            *entry = at;
        }
    }

    /// Sorted nicknames active within the idle window
    pub async fn list(&self) -> Vec<String> {
        self.list_at(Utc::now()).await
    }

    /// Oldest activity time still counted as present at `now`
    ///
    /// `None` when there is no window or the window reaches past the earliest
    /// representable time.
    fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let window = chrono::Duration::from_std(self.window?).ok()?;
        now.checked_sub_signed(window)
    }

    /// Sorted nicknames active within the idle window, as seen at `now`
    ///
    /// A user idle for exactly the window is no longer listed.
    pub async fn list_at(&self, now: DateTime<Utc>) -> Vec<String> {
        let cutoff = self.cutoff(now);

        let last_seen = self.last_seen.read().await;
        let mut joiners: Vec<String> = last_seen
            .iter()
            .filter(|(_, seen)| cutoff.map_or(true, |cutoff| **seen > cutoff))
            .map(|(nickname, _)| nickname.clone())
            .collect();
        joiners.sort();
        joiners
    }

    /// Drop entries that fell out of the idle window
    ///
    /// Returns the number of removed entries.
    pub async fn prune(&self) -> usize {
        self.prune_at(Utc::now()).await
    }

    async fn prune_at(&self, now: DateTime<Utc>) -> usize {
        let Some(cutoff) = self.cutoff(now) else {
            return 0;
        };

        let mut last_seen = self.last_seen.write().await;
        let before = last_seen.len();
        last_seen.retain(|_, seen| *seen > cutoff);
        before - last_seen.len()
    }
}

impl Default for PresenceRegistry {
    fn default() -> Self {
        Self::new(Some(Duration::from_secs(90)))
    }
}
