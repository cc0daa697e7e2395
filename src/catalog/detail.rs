//! Detail resolution for a single item

use std::sync::Arc;
use tracing::warn;

use crate::api::CatalogClient;
use crate::catalog::favorites::FavoritesStore;
use crate::error::CatalogError;
use crate::models::{CatalogType, DetailRecord};

/// Resolves ids to detail records and answers favorite status
///
/// Records are fetched on every call; nothing is cached.
#[derive(Clone)]
pub struct DetailResolver {
    client: Arc<dyn CatalogClient>,
    favorites: FavoritesStore,
}

impl DetailResolver {
    pub fn new(client: Arc<dyn CatalogClient>, favorites: FavoritesStore) -> Self {
        Self { client, favorites }
    }

    /// Fetch the detail record for `id`.
    ///
    /// A missing or zero id fails with [`CatalogError::MissingId`] before any
    /// request is made.
    pub async fn resolve(
        &self,
        kind: CatalogType,
        id: Option<u64>,
    ) -> Result<DetailRecord, CatalogError> {
        let id = match id {
            Some(id) if id > 0 => id,
            _ => {
                warn!(%kind, "detail requested without an id");
                return Err(CatalogError::MissingId);
            }
        };

        self.client.fetch_detail(kind, id).await
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.favorites.is_favorite(id)
    }

    /// Mark `record` as a favorite.
    ///
    /// Only adds: an existing favorite keeps its stored record, and removal
    /// goes through [`FavoritesStore::remove`]. Returns the membership after
    /// the call.
    pub fn toggle_favorite(&self, record: &DetailRecord) -> bool {
        if !self.favorites.is_favorite(record.item.id) {
            return self.favorites.add(record.clone());
        }
        true
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }
}
