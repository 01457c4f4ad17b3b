//! Poster composition boundary.
//!
//! Everything upstream decides *whether* an item gets a poster; this crate
//! takes a fully validated record and writes the artifact.

pub mod compose;
pub mod output;

use thiserror::Error;

use marquee_ratings::ResolvedRating;

#[derive(Error, Debug)]
pub enum PosterError {
    #[error("image error: {0}")]
    Image(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fully-resolved input for one poster.
///
/// Invariants are enforced upstream: non-empty synopsis, backdrop bytes
/// present, at least one cast member, and at least one rating (external
/// or native).
#[derive(Debug, Clone)]
pub struct PosterRecord {
    pub title: String,
    pub year: Option<String>,
    /// Display genre names, most relevant first, at most three.
    pub genres: Vec<String>,
    pub overview: String,
    pub backdrop: Vec<u8>,
    pub logo_path: String,
    /// Top-billed cast names.
    pub cast: Vec<String>,
    /// Directors for movies, creators for series.
    pub directors: Vec<String>,
    /// "2h15min" or "4 Seasons".
    pub length_label: String,
    pub rating: ResolvedRating,
    /// Catalog vote average scaled to 0-100, the badge of last resort.
    pub native_score: u8,
}

/// "2h15min" for movies; "N/A" when the runtime is unknown.
pub fn runtime_label(minutes: Option<i64>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{}h{}min", m / 60, m % 60),
        _ => "N/A".to_string(),
    }
}

/// "1 Season" / "4 Seasons".
pub fn seasons_label(count: Option<i64>) -> String {
    let n = count.unwrap_or(0);
    if n == 1 {
        "1 Season".to_string()
    } else {
        format!("{n} Seasons")
    }
}
