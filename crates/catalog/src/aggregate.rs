//! Catalog aggregation: fetch every listing view concurrently, merge
//! same-kind views in priority order, dedup by id.

use std::collections::HashSet;

use futures::future::join_all;
use tracing::{info, warn};

use marquee_core::MediaKind;

use crate::tmdb::{Listing, TmdbClient};
use crate::{CatalogItem, GenreTable};

/// Everything the pipeline needs from the catalog source.
#[derive(Debug, Default)]
pub struct Catalog {
    pub movies: Vec<CatalogItem>,
    pub series: Vec<CatalogItem>,
    pub movie_genres: GenreTable,
    pub series_genres: GenreTable,
}

/// Fetch both genre tables and all listing views concurrently.
///
/// A failed endpoint contributes an empty result; the batch never aborts.
pub async fn fetch_catalog(client: &TmdbClient) -> Catalog {
    let (movie_genres, series_genres, movies, series) = futures::join!(
        fetch_genres(client, MediaKind::Movie),
        fetch_genres(client, MediaKind::Series),
        fetch_kind(client, MediaKind::Movie),
        fetch_kind(client, MediaKind::Series),
    );

    Catalog {
        movies,
        series,
        movie_genres,
        series_genres,
    }
}

async fn fetch_genres(client: &TmdbClient, kind: MediaKind) -> GenreTable {
    match client.genres(kind).await {
        Ok(table) => table,
        Err(e) => {
            warn!(kind = %kind, error = %e, "genre fetch failed");
            GenreTable::default()
        }
    }
}

async fn fetch_kind(client: &TmdbClient, kind: MediaKind) -> Vec<CatalogItem> {
    let fetches = Listing::ALL.iter().map(|&listing| async move {
        match client.listing(kind, listing).await {
            Ok(items) => {
                info!(kind = %kind, listing = ?listing, items = items.len(), "listing fetched");
                items
            }
            Err(e) => {
                warn!(kind = %kind, listing = ?listing, error = %e, "listing fetch failed");
                Vec::new()
            }
        }
    });

    // join_all keeps the fixed variant order regardless of completion order.
    let merged: Vec<CatalogItem> = join_all(fetches).await.into_iter().flatten().collect();
    dedupe_by_id(merged)
}

/// Keep the first occurrence of each id; earlier listings outrank later ones.
pub fn dedupe_by_id(items: Vec<CatalogItem>) -> Vec<CatalogItem> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, title: &str, vote: f64) -> CatalogItem {
        CatalogItem {
            id,
            title: title.to_string(),
            release_date: None,
            genre_ids: vec![],
            origin_country: vec![],
            original_language: None,
            vote_average: vote,
            overview: String::new(),
            backdrop_path: None,
            kind: MediaKind::Movie,
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let merged = vec![
            item(1, "Trending Copy", 8.0),
            item(2, "Other", 6.0),
            item(1, "Top Rated Copy", 9.0),
        ];

        let unique = dedupe_by_id(merged);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].title, "Trending Copy");
        assert_eq!(unique[0].vote_average, 8.0);
        assert_eq!(unique[1].id, 2);
    }

    #[test]
    fn dedup_preserves_merge_order() {
        let merged = vec![item(3, "c", 1.0), item(1, "a", 1.0), item(2, "b", 1.0)];
        let ids: Vec<u64> = dedupe_by_id(merged).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn dedup_of_disjoint_listings_is_identity() {
        let merged = vec![item(1, "a", 1.0), item(2, "b", 1.0)];
        assert_eq!(dedupe_by_id(merged.clone()), merged);
    }
}
