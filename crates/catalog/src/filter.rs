//! Eligibility filter: pure checks, no I/O.
//!
//! Runs before any per-item fetch; the expensive completeness checks
//! (logo, details, credits) happen later in the pipeline driver.

use marquee_core::ExclusionRules;

use crate::{CatalogItem, GenreTable};

/// Why an item was skipped by the cheap checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoVotes,
    NoSynopsis,
    ExcludedCountry(String),
    ExcludedGenre(String),
    ExcludedKeyword,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoVotes => write!(f, "no rating signal yet"),
            Self::NoSynopsis => write!(f, "empty synopsis"),
            Self::ExcludedCountry(c) => write!(f, "excluded country: {c}"),
            Self::ExcludedGenre(g) => write!(f, "excluded genre: {g}"),
            Self::ExcludedKeyword => write!(f, "excluded title keyword"),
        }
    }
}

/// Run the checks in order, stopping at the first failure.
///
/// Only the first entry of a multi-country origin list is inspected.
pub fn eligibility(
    item: &CatalogItem,
    genres: &GenreTable,
    rules: &ExclusionRules,
) -> Option<SkipReason> {
    if item.vote_average == 0.0 {
        return Some(SkipReason::NoVotes);
    }
    if item.overview.trim().is_empty() {
        return Some(SkipReason::NoSynopsis);
    }
    if let Some(country) = item.origin_country.first() {
        if rules.blocks_country(country) {
            return Some(SkipReason::ExcludedCountry(country.clone()));
        }
    }
    for name in genres.names(&item.genre_ids) {
        if rules.blocks_genre(&name) {
            return Some(SkipReason::ExcludedGenre(name));
        }
    }
    if rules.blocks_title(&item.title) {
        return Some(SkipReason::ExcludedKeyword);
    }
    None
}

pub fn is_eligible(item: &CatalogItem, genres: &GenreTable, rules: &ExclusionRules) -> bool {
    eligibility(item, genres, rules).is_none()
}
