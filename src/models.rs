//! Data structures and types for CinemApp
//!
//! Contains the shared models used across the application:
//! - **Catalog**: catalog types and list items from the popular endpoints
//! - **Detail**: enriched records with genres and cast credits
//! - **Profile**: the static user profile shown on the profile screen

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default TMDB image base (w500 renditions)
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Maximum number of cast entries kept on a detail record
pub const MAX_CAST: usize = 5;

// =============================================================================
// Catalog Models
// =============================================================================

/// Which upstream catalog an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogType {
    Movie,
    Tv,
}

impl CatalogType {
    /// Path segment used by the upstream API (`/movie/...`, `/tv/...`)
    pub fn path(&self) -> &'static str {
        match self {
            CatalogType::Movie => "movie",
            CatalogType::Tv => "tv",
        }
    }

    /// Plural label for list headings
    pub fn plural(&self) -> &'static str {
        match self {
            CatalogType::Movie => "Movies",
            CatalogType::Tv => "TV Shows",
        }
    }
}

impl fmt::Display for CatalogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogType::Movie => write!(f, "Movie"),
            CatalogType::Tv => write!(f, "TV Show"),
        }
    }
}

/// One movie or TV show as listed by the popular endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    pub kind: CatalogType,
    pub title: String,
    pub year: Option<u16>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f32,
}

impl fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year.map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} [{}]", self.title, year_str, self.kind)
    }
}

// =============================================================================
// Detail Models
// =============================================================================

/// A credited cast member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    pub profile_path: Option<String>,
}

/// A catalog item enriched with overview, rating, genres and cast
///
/// Enrichment fields are empty when the upstream omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub overview: String,
    pub vote_count: u32,
    pub genres: Vec<String>,
    pub cast: Vec<CastMember>,
}

impl DetailRecord {
    pub fn id(&self) -> u64 {
        self.item.id
    }

    pub fn title(&self) -> &str {
        &self.item.title
    }

    /// Rating for display, `None` when the upstream has no votes
    pub fn rating(&self) -> Option<f32> {
        if self.item.vote_average > 0.0 {
            Some(self.item.vote_average)
        } else {
            None
        }
    }

    /// Genres joined for display ("N/A" when none)
    pub fn genre_line(&self) -> String {
        if self.genres.is_empty() {
            "N/A".to_string()
        } else {
            self.genres.join(", ")
        }
    }
}

impl From<CatalogItem> for DetailRecord {
    fn from(item: CatalogItem) -> Self {
        Self {
            item,
            overview: String::new(),
            vote_count: 0,
            genres: Vec::new(),
            cast: Vec::new(),
        }
    }
}

impl fmt::Display for DetailRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rating() {
            Some(rating) => write!(f, "{} - ★ {:.1} ({} votes)", self.item, rating, self.vote_count),
            None => write!(f, "{} - no rating", self.item),
        }
    }
}

// =============================================================================
// Profile
// =============================================================================

/// Static profile shown on the profile screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Demo User".to_string(),
            email: "demo@cinemapp.local".to_string(),
            photo_url: None,
        }
    }
}

/// Join an opaque image path fragment onto an image base URL
pub fn image_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
