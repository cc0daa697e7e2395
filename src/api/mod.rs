//! API clients for external services
//!
//! - TMDB: popular lists and detail records for movies and TV shows

pub mod tmdb;

use async_trait::async_trait;

use crate::error::CatalogError;
use crate::models::{CatalogItem, CatalogType, DetailRecord};

pub use tmdb::TmdbClient;

/// Remote source of catalog pages and detail records
///
/// Implementations make exactly one request per call and never retry.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch one page (1-based) of the popular list for a catalog
    async fn fetch_page(
        &self,
        kind: CatalogType,
        page: u32,
    ) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Fetch one item with cast credits appended
    async fn fetch_detail(&self, kind: CatalogType, id: u64) -> Result<DetailRecord, CatalogError>;
}
