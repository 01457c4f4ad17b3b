#![allow(clippy::collapsible_if)]
pub mod aggregate;
pub mod filter;
pub mod tmdb;

use std::collections::HashMap;

use thiserror::Error;

use marquee_core::MediaKind;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
}

/// One movie or series entry from a catalog listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
    pub genre_ids: Vec<i64>,
    pub origin_country: Vec<String>,
    pub original_language: Option<String>,
    pub vote_average: f64,
    pub overview: String,
    pub backdrop_path: Option<String>,
    pub kind: MediaKind,
}

impl CatalogItem {
    /// First four characters of the release/air date, when they form a year.
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .filter(|y| y.chars().all(|c| c.is_ascii_digit()))
    }

    /// Native catalog score scaled to 0-100.
    pub fn native_score(&self) -> u8 {
        (self.vote_average * 10.0).round().clamp(0.0, 100.0) as u8
    }
}

/// Genre id to display name, one table per media kind.
#[derive(Debug, Clone, Default)]
pub struct GenreTable(HashMap<i64, String>);

impl GenreTable {
    pub fn new(map: HashMap<i64, String>) -> Self {
        Self(map)
    }

    /// Unknown ids map to an empty name, which never matches an exclusion rule.
    pub fn name(&self, id: i64) -> &str {
        self.0.get(&id).map(String::as_str).unwrap_or("")
    }

    pub fn names(&self, ids: &[i64]) -> Vec<String> {
        ids.iter().map(|id| self.name(*id).to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Extended per-item metadata, fetched only after the cheap checks pass.
#[derive(Debug, Clone, Default)]
pub struct DetailRecord {
    pub imdb_id: Option<String>,
    pub runtime_minutes: Option<i64>,
    pub season_count: Option<i64>,
    pub created_by: Vec<String>,
}

/// Cast and crew listing for one item.
#[derive(Debug, Clone, Default)]
pub struct CreditRecord {
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CastMember {
    pub name: String,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrewMember {
    pub name: String,
    pub job: String,
}

impl CreditRecord {
    /// Top-billed cast names, in source order.
    pub fn top_cast(&self, n: usize) -> Vec<String> {
        self.cast.iter().take(n).map(|c| c.name.clone()).collect()
    }

    /// Movie directors, falling back to the first producer when none is listed.
    pub fn directors(&self) -> Vec<String> {
        let directors: Vec<String> = self
            .crew
            .iter()
            .filter(|c| c.job == "Director")
            .map(|c| c.name.clone())
            .collect();
        if !directors.is_empty() {
            return directors;
        }
        self.crew
            .iter()
            .find(|c| c.job == "Producer" || c.job == "Executive Producer")
            .map(|c| vec![c.name.clone()])
            .unwrap_or_default()
    }
}
