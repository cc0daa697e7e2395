//! Process-wide favorites ("My List")
//!
//! The store is a cheap handle around a `watch` channel: every clone shares
//! one [`FavoriteSet`], and every subscriber is woken when it changes.
//! Nothing is persisted.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

use crate::models::DetailRecord;

/// Favorited records in insertion order, at most one per id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoriteSet {
    entries: Vec<DetailRecord>,
}

impl FavoriteSet {
    pub fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|e| e.item.id == id)
    }

    pub fn get(&self, id: u64) -> Option<&DetailRecord> {
        self.entries.iter().find(|e| e.item.id == id)
    }

    pub fn entries(&self) -> &[DetailRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shared, observable favorites store
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    tx: Arc<watch::Sender<FavoriteSet>>,
}

impl Default for FavoritesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FavoritesStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FavoriteSet::default());
        Self { tx: Arc::new(tx) }
    }

    /// Add a record. An id that is already present is left as it was.
    ///
    /// Returns whether the id is a favorite afterwards.
    pub fn add(&self, record: impl Into<DetailRecord>) -> bool {
        let record = record.into();
        let id = record.item.id;
        let title = record.item.title.clone();

        let inserted = self.tx.send_if_modified(move |set| {
            if set.contains(id) {
                false
            } else {
                set.entries.push(record);
                true
            }
        });

        if inserted {
            info!(id, title = %title, "added to favorites");
        } else {
            info!(id, title = %title, "already in favorites");
        }
        true
    }

    /// Remove an id. Returns whether anything was removed.
    pub fn remove(&self, id: u64) -> bool {
        let removed = self.tx.send_if_modified(|set| {
            let before = set.entries.len();
            set.entries.retain(|e| e.item.id != id);
            set.entries.len() != before
        });

        if removed {
            info!(id, "removed from favorites");
        }
        removed
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.tx.borrow().contains(id)
    }

    /// Snapshot of all favorites in insertion order
    pub fn list(&self) -> Vec<DetailRecord> {
        self.tx.borrow().entries.clone()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    /// Receiver that is notified on every effective mutation
    pub fn subscribe(&self) -> watch::Receiver<FavoriteSet> {
        self.tx.subscribe()
    }
}
