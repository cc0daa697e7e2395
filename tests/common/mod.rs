//! Shared fixtures for integration tests
//!
//! Each test file is its own crate and pulls this in with `mod common;`.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use cinemapp::api::CatalogClient;
use cinemapp::error::CatalogError;
use cinemapp::models::{CastMember, CatalogItem, CatalogType, DetailRecord};

pub const PAGE_SIZE: u64 = 20;

pub fn item(kind: CatalogType, id: u64, title: &str) -> CatalogItem {
    CatalogItem {
        id,
        kind,
        title: title.to_string(),
        year: Some(2000 + (id % 25) as u16),
        poster_path: Some(format!("/poster{}.jpg", id)),
        backdrop_path: None,
        vote_average: 7.0,
    }
}

pub fn record(kind: CatalogType, id: u64, title: &str) -> DetailRecord {
    DetailRecord {
        item: item(kind, id, title),
        overview: format!("Overview of {}", title),
        vote_count: 100,
        genres: vec!["Drama".to_string()],
        cast: vec![CastMember {
            name: "Lead Actor".to_string(),
            profile_path: None,
        }],
    }
}

/// In-memory catalog: page `p` holds ids `(p-1)*20+1 ..= p*20` unless overridden
#[derive(Default)]
pub struct FakeCatalog {
    overrides: Mutex<HashMap<u32, Vec<CatalogItem>>>,
    failing: Mutex<HashSet<u32>>,
    page_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, page: u32, items: Vec<CatalogItem>) -> Self {
        self.overrides.lock().unwrap().insert(page, items);
        self
    }

    /// Make every fetch of `page` fail with a 500
    pub fn fail_page(&self, page: u32) {
        self.failing.lock().unwrap().insert(page);
    }

    pub fn heal_page(&self, page: u32) {
        self.failing.lock().unwrap().remove(&page);
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn title(kind: CatalogType, id: u64) -> String {
        match kind {
            CatalogType::Movie => format!("Movie {}", id),
            CatalogType::Tv => format!("Show {}", id),
        }
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn fetch_page(
        &self,
        kind: CatalogType,
        page: u32,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.lock().unwrap().contains(&page) {
            return Err(CatalogError::Upstream {
                status: 500,
                message: "boom".to_string(),
            });
        }
        if let Some(items) = self.overrides.lock().unwrap().get(&page) {
            return Ok(items.clone());
        }

        let first = (page as u64 - 1) * PAGE_SIZE + 1;
        Ok((first..first + PAGE_SIZE)
            .map(|id| item(kind, id, &Self::title(kind, id)))
            .collect())
    }

    async fn fetch_detail(&self, kind: CatalogType, id: u64) -> Result<DetailRecord, CatalogError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        Ok(record(kind, id, &Self::title(kind, id)))
    }
}
