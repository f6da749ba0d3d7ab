//! In-memory phrase repository.
//!
//! The repository exclusively owns the canonical phrase collection and is
//! the single source of truth for the UI. It is a pure data holder plus
//! notifier: triggering upgrades is the caller's job, never the
//! repository's.
//!
//! # Concurrency
//!
//! All mutations are atomic read-modify-write per identifier under the
//! internal lock, so completions for different phrases cannot clobber each
//! other. Observers get a last-write-wins snapshot through a watch
//! channel; back-to-back rapid updates may coalesce, but observers
//! eventually see the latest state.

use indexmap::IndexMap;
use tokio::sync::{RwLock, watch};
use tracing::debug;

use crate::domain::{Phrase, PhraseId};

/// Ordered collection of phrases with reactive change notification.
///
/// Insertion order is display order. The scheduler routes every mutation
/// through [`update`](Self::update); it never mutates private copies.
pub struct PhraseRepository {
    /// Phrase collection keyed by identifier, in insertion order.
    inner: RwLock<IndexMap<PhraseId, Phrase>>,
    /// Snapshot channel observers subscribe to.
    notify_tx: watch::Sender<Vec<Phrase>>,
}

impl PhraseRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed_phrases(Vec::<String>::new())
    }

    /// Create a repository pre-populated with seed phrases, in order.
    pub fn with_seed_phrases<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = IndexMap::new();
        for text in texts {
            let phrase = Phrase::new(text);
            map.insert(phrase.id.clone(), phrase);
        }
        let (notify_tx, _) = watch::channel(map.values().cloned().collect());

        Self {
            inner: RwLock::new(map),
            notify_tx,
        }
    }

    /// Create a phrase from the text and append it to the board.
    ///
    /// The new phrase has a fresh identifier, no artifact, and no upgrade
    /// in flight. Observers are notified.
    pub async fn add(&self, text: impl Into<String>) -> Phrase {
        let phrase = Phrase::new(text);
        let mut map = self.inner.write().await;
        map.insert(phrase.id.clone(), phrase.clone());
        debug!(target: "taptalk.board", id = %phrase.id, "Phrase added");
        self.publish(&map);
        phrase
    }

    /// Look up a phrase by identifier, returning a snapshot clone.
    pub async fn get(&self, id: &PhraseId) -> Option<Phrase> {
        self.inner.read().await.get(id).cloned()
    }

    /// Atomically transform the phrase at `id` in place.
    ///
    /// No-op returning `false` if the phrase is absent. Safe to call from
    /// any task or thread, including upgrade completion callbacks.
    /// Observers are notified on change.
    pub async fn update<F>(&self, id: &PhraseId, transform: F) -> bool
    where
        F: FnOnce(&mut Phrase),
    {
        let mut map = self.inner.write().await;
        let Some(phrase) = map.get_mut(id) else {
            debug!(target: "taptalk.board", id = %id, "Update for unknown phrase ignored");
            return false;
        };
        transform(phrase);
        self.publish(&map);
        true
    }

    /// Snapshot of the current ordered collection.
    pub async fn snapshot(&self) -> Vec<Phrase> {
        self.inner.read().await.values().cloned().collect()
    }

    /// Subscribe to board changes.
    ///
    /// The receiver always holds the latest snapshot; intermediate states
    /// between reads may be skipped (last-write-wins).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Phrase>> {
        self.notify_tx.subscribe()
    }

    /// Number of phrases on the board.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Whether the board is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    fn publish(&self, map: &IndexMap<PhraseId, Phrase>) {
        self.notify_tx.send_replace(map.values().cloned().collect());
    }
}

impl Default for PhraseRepository {
    fn default() -> Self {
        Self::new()
    }
}
