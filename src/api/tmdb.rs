//! TMDB (The Movie Database) API client
//!
//! Provides the popular lists and detail records for movies and TV shows.
//! API docs: https://developer.themoviedb.org/docs

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::api::CatalogClient;
use crate::error::CatalogError;
use crate::models::{CastMember, CatalogItem, CatalogType, DetailRecord, MAX_CAST};

/// Default TMDB v3 endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default response language
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// TMDB API client
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    language: String,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Override the `language` parameter sent with every request
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a keyed GET request. One attempt only.
    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, CatalogError> {
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        let url = format!(
            "{}{}{}api_key={}&language={}",
            self.base_url,
            endpoint,
            separator,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.language)
        );
        debug!(endpoint, "TMDB request");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CatalogError::Upstream {
                status: status.as_u16(),
                message: upstream_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string()),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| CatalogError::Parse(format!("JSON parse error: {}", e)))
    }

    /// Get one page of popular movies or shows
    pub async fn popular(
        &self,
        kind: CatalogType,
        page: u32,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let endpoint = format!("/{}/popular?page={}", kind.path(), page);
        let response: PopularResponse = self.get(&endpoint).await?;
        Ok(response.into_items(kind))
    }

    /// Get a movie or show with its cast credits
    pub async fn detail(&self, kind: CatalogType, id: u64) -> Result<DetailRecord, CatalogError> {
        let endpoint = format!("/{}/{}?append_to_response=credits", kind.path(), id);
        let response: DetailResponse = self.get(&endpoint).await?;
        Ok(response.into_record(kind))
    }
}

#[async_trait]
impl CatalogClient for TmdbClient {
    async fn fetch_page(
        &self,
        kind: CatalogType,
        page: u32,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        self.popular(kind, page).await
    }

    async fn fetch_detail(&self, kind: CatalogType, id: u64) -> Result<DetailRecord, CatalogError> {
        self.detail(kind, id).await
    }
}

/// Pull `status_message` out of a TMDB error body
fn upstream_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        status_message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.status_message)
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct PopularResponse {
    results: Vec<ItemRaw>,
}

impl PopularResponse {
    fn into_items(self, kind: CatalogType) -> Vec<CatalogItem> {
        self.results
            .into_iter()
            .map(|r| r.into_item(kind))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ItemRaw {
    id: u64,
    // Movies use "title", TV uses "name"
    title: Option<String>,
    name: Option<String>,
    // Movies use "release_date", TV uses "first_air_date"
    release_date: Option<String>,
    first_air_date: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f32>,
}

impl ItemRaw {
    fn into_item(self, kind: CatalogType) -> CatalogItem {
        let title = self.title.or(self.name).unwrap_or_default();
        let year = self
            .release_date
            .or(self.first_air_date)
            .and_then(|d| extract_year(&d));

        CatalogItem {
            id: self.id,
            kind,
            title,
            year,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            vote_average: self.vote_average.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    #[serde(flatten)]
    item: ItemRaw,
    overview: Option<String>,
    vote_count: Option<u32>,
    #[serde(default)]
    genres: Vec<GenreRaw>,
    credits: Option<CreditsRaw>,
}

impl DetailResponse {
    fn into_record(self, kind: CatalogType) -> DetailRecord {
        let cast = self
            .credits
            .map(|c| c.cast)
            .unwrap_or_default()
            .into_iter()
            .take(MAX_CAST)
            .map(|c| CastMember {
                name: c.name,
                profile_path: c.profile_path,
            })
            .collect();

        DetailRecord {
            item: self.item.into_item(kind),
            overview: self.overview.unwrap_or_default(),
            vote_count: self.vote_count.unwrap_or(0),
            genres: self.genres.into_iter().map(|g| g.name).collect(),
            cast,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenreRaw {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CreditsRaw {
    #[serde(default)]
    cast: Vec<CastRaw>,
}

#[derive(Debug, Deserialize)]
struct CastRaw {
    name: String,
    profile_path: Option<String>,
}

/// Extract year from a date string like "2022-03-04"
fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("2022-03-04"), Some(2022));
        assert_eq!(extract_year("2019-11-12"), Some(2019));
        assert_eq!(extract_year(""), None);
        assert_eq!(extract_year("abc"), None);
    }

    #[test]
    fn test_show_name_normalized_to_title() {
        let raw: ItemRaw = serde_json::from_str(
            r#"{"id": 1396, "name": "Breaking Bad", "first_air_date": "2008-01-20"}"#,
        )
        .unwrap();
        let item = raw.into_item(CatalogType::Tv);
        assert_eq!(item.title, "Breaking Bad");
        assert_eq!(item.year, Some(2008));
        assert_eq!(item.vote_average, 0.0);
    }

    #[test]
    fn test_detail_keeps_first_five_cast() {
        let body = r#"{
            "id": 7,
            "title": "Ensemble",
            "credits": {"cast": [
                {"name": "A"}, {"name": "B"}, {"name": "C"},
                {"name": "D"}, {"name": "E"}, {"name": "F", "profile_path": "/f.jpg"}
            ]}
        }"#;
        let raw: DetailResponse = serde_json::from_str(body).unwrap();
        let record = raw.into_record(CatalogType::Movie);
        assert_eq!(record.cast.len(), MAX_CAST);
        assert_eq!(record.cast[4].name, "E");
        assert!(record.genres.is_empty());
        assert!(record.overview.is_empty());
    }

    #[test]
    fn test_upstream_message() {
        let body = r#"{"status_code": 7, "status_message": "Invalid API key", "success": false}"#;
        assert_eq!(upstream_message(body).as_deref(), Some("Invalid API key"));
        assert_eq!(upstream_message("<html>"), None);
    }
}
