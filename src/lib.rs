//! CinemApp - popular movies and TV shows in your terminal
//!
//! Browse paginated TMDB catalogs, filter them as you type, open a detail
//! view with cast, and keep a session-scoped favorites list.
//!
//! # Modules
//!
//! - `models` - Catalog items, detail records, profile
//! - `api` - Remote catalog client (TMDB)
//! - `catalog` - Paginated feed, search overlay, favorites, detail resolver
//! - `auth` - Login stub
//! - `config` - Config file and client construction
//! - `cli` / `commands` - Scriptable subcommands
//! - `app` / `ui` - Interactive TUI

pub mod api;
pub mod app;
pub mod auth;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;

// Re-export commonly used types
pub use models::{CastMember, CatalogItem, CatalogType, DetailRecord, Profile};

pub use api::{CatalogClient, TmdbClient};
pub use app::{App, AppEvent, AppState};
pub use catalog::{CatalogFeed, DetailResolver, FavoritesStore, PaginatedFeed, SearchOverlay};
pub use config::Config;
pub use error::CatalogError;
