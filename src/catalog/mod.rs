//! Catalog core: paginated feeds, search overlay, favorites, detail resolution

pub mod detail;
pub mod favorites;
pub mod feed;
pub mod search;

pub use detail::DetailResolver;
pub use favorites::{FavoriteSet, FavoritesStore};
pub use feed::{
    CatalogFeed, CatalogPages, FeedItem, FetchMode, LoadOutcome, PageRequest, PageResponse,
    PageSource, PaginatedFeed, FIRST_PAGE,
};
pub use search::SearchOverlay;
