//! Catalog-source client (TMDB).
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use marquee_core::MediaKind;

use crate::{
    CastMember, CatalogError, CatalogItem, CreditRecord, CrewMember, DetailRecord, GenreTable,
};

const BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/original";

/// Listing views fetched per media kind, in merge-priority order: when the
/// same title shows up in several views, the earlier view wins the dedup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    TrendingDay,
    TrendingWeek,
    Popular,
    Current,
    TopRated,
}

impl Listing {
    pub const ALL: [Listing; 5] = [
        Listing::TrendingDay,
        Listing::TrendingWeek,
        Listing::Popular,
        Listing::Current,
        Listing::TopRated,
    ];

    fn path(self, kind: MediaKind) -> String {
        let seg = kind.endpoint();
        match self {
            Self::TrendingDay => format!("/trending/{seg}/day"),
            Self::TrendingWeek => format!("/trending/{seg}/week"),
            Self::Popular => format!("/{seg}/popular"),
            Self::Current => match kind {
                MediaKind::Movie => "/movie/now_playing".to_string(),
                MediaKind::Series => "/tv/on_the_air".to_string(),
            },
            Self::TopRated => format!("/{seg}/top_rated"),
        }
    }
}

pub struct TmdbClient {
    api_key: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        Ok(Self { api_key, client })
    }

    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, CatalogError> {
        let mut all_params = vec![("api_key", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        let url = format!("{BASE_URL}{path}");
        debug!(url = %url, "catalog request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(CatalogError::Provider(format!(
                "catalog source returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| CatalogError::Provider(format!("parse JSON: {e}")))
    }

    /// Fetch one listing view. Entries without a numeric id are dropped.
    pub async fn listing(
        &self,
        kind: MediaKind,
        listing: Listing,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let data = self
            .get_json(&listing.path(kind), &[("language", "en-US")])
            .await?;
        let results = data["results"].as_array().cloned().unwrap_or_default();

        Ok(results
            .iter()
            .filter_map(|r| parse_catalog_item(r, kind))
            .collect())
    }

    pub async fn genres(&self, kind: MediaKind) -> Result<GenreTable, CatalogError> {
        let data = self
            .get_json(
                &format!("/genre/{}/list", kind.endpoint()),
                &[("language", "en-US")],
            )
            .await?;
        Ok(parse_genre_table(&data))
    }

    pub async fn details(&self, kind: MediaKind, id: u64) -> Result<DetailRecord, CatalogError> {
        let data = self
            .get_json(
                &format!("/{}/{id}", kind.endpoint()),
                &[
                    ("language", "en-US"),
                    ("append_to_response", "external_ids"),
                ],
            )
            .await?;

        if data["id"].as_u64().is_none() {
            return Err(CatalogError::Provider("detail response missing id".into()));
        }
        Ok(parse_detail_record(&data, kind))
    }

    pub async fn credits(&self, kind: MediaKind, id: u64) -> Result<CreditRecord, CatalogError> {
        let data = self
            .get_json(&format!("/{}/{id}/credits", kind.endpoint()), &[])
            .await?;
        Ok(parse_credit_record(&data))
    }

    /// Resolve the English PNG logo for an item, if one exists.
    pub async fn logo(&self, kind: MediaKind, id: u64) -> Result<Option<String>, CatalogError> {
        let data = self
            .get_json(&format!("/{}/{id}/images", kind.endpoint()), &[("language", "en")])
            .await?;
        Ok(select_logo(&data))
    }

    /// Download the full-size backdrop image.
    pub async fn backdrop(&self, backdrop_path: &str) -> Result<Vec<u8>, CatalogError> {
        let url = format!("{IMAGE_BASE}{backdrop_path}");
        debug!(url = %url, "backdrop download");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(CatalogError::Provider(format!(
                "image host returned {}",
                resp.status()
            )));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        if bytes.is_empty() {
            return Err(CatalogError::Provider("empty backdrop body".into()));
        }
        Ok(bytes.to_vec())
    }
}

fn parse_catalog_item(data: &Value, kind: MediaKind) -> Option<CatalogItem> {
    let id = data["id"].as_u64()?;
    let (title_key, date_key) = match kind {
        MediaKind::Movie => ("title", "release_date"),
        MediaKind::Series => ("name", "first_air_date"),
    };

    Some(CatalogItem {
        id,
        title: data[title_key].as_str().unwrap_or("Unknown").to_string(),
        release_date: data[date_key].as_str().map(|s| s.to_string()),
        genre_ids: data["genre_ids"]
            .as_array()
            .map(|a| a.iter().filter_map(|v| v.as_i64()).collect())
            .unwrap_or_default(),
        origin_country: data["origin_country"]
            .as_array()
            .map(|a| {
                a.iter()
                    .filter_map(|v| v.as_str().map(|s| s.to_string()))
                    .collect()
            })
            .unwrap_or_default(),
        original_language: data["original_language"].as_str().map(|s| s.to_string()),
        vote_average: data["vote_average"].as_f64().unwrap_or(0.0),
        overview: data["overview"].as_str().unwrap_or("").to_string(),
        backdrop_path: data["backdrop_path"].as_str().map(|s| s.to_string()),
        kind,
    })
}

fn parse_genre_table(data: &Value) -> GenreTable {
    let mut map = HashMap::new();
    if let Some(genres) = data["genres"].as_array() {
        for g in genres {
            if let (Some(id), Some(name)) = (g["id"].as_i64(), g["name"].as_str()) {
                map.insert(id, name.to_string());
            }
        }
    }
    GenreTable::new(map)
}

fn parse_detail_record(data: &Value, kind: MediaKind) -> DetailRecord {
    // Movies carry imdb_id at the top level; series get it via external_ids.
    let imdb_id = data["imdb_id"]
        .as_str()
        .or_else(|| data["external_ids"]["imdb_id"].as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    DetailRecord {
        imdb_id,
        runtime_minutes: data["runtime"].as_i64(),
        season_count: data["number_of_seasons"].as_i64(),
        created_by: match kind {
            MediaKind::Movie => Vec::new(),
            MediaKind::Series => data["created_by"]
                .as_array()
                .map(|a| {
                    a.iter()
                        .filter_map(|c| c["name"].as_str().map(|s| s.to_string()))
                        .collect()
                })
                .unwrap_or_default(),
        },
    }
}

fn parse_credit_record(data: &Value) -> CreditRecord {
    CreditRecord {
        cast: data["cast"]
            .as_array()
            .map(|a| {
                a.iter()
                    .filter_map(|c| {
                        Some(CastMember {
                            name: c["name"].as_str()?.to_string(),
                            order: c["order"].as_i64().unwrap_or(i64::MAX),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default(),
        crew: data["crew"]
            .as_array()
            .map(|a| {
                a.iter()
                    .filter_map(|c| {
                        Some(CrewMember {
                            name: c["name"].as_str()?.to_string(),
                            job: c["job"].as_str().unwrap_or("").to_string(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn select_logo(data: &Value) -> Option<String> {
    data["logos"].as_array()?.iter().find_map(|logo| {
        let lang = logo["iso_639_1"].as_str()?;
        let path = logo["file_path"].as_str()?;
        (lang == "en" && path.ends_with(".png")).then(|| path.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_movie_listing_entry() {
        let json = serde_json::json!({
            "id": 438631,
            "title": "Dune",
            "release_date": "2021-10-22",
            "genre_ids": [878, 12],
            "original_language": "en",
            "vote_average": 7.8,
            "overview": "Paul Atreides leads nomadic tribes...",
            "backdrop_path": "/dune.jpg"
        });

        let item = parse_catalog_item(&json, MediaKind::Movie).unwrap();
        assert_eq!(item.id, 438631);
        assert_eq!(item.title, "Dune");
        assert_eq!(item.release_year(), Some("2021"));
        assert_eq!(item.genre_ids, vec![878, 12]);
        assert!(item.origin_country.is_empty());
        assert_eq!(item.backdrop_path.as_deref(), Some("/dune.jpg"));
        assert_eq!(item.kind, MediaKind::Movie);
    }

    #[test]
    fn parse_series_listing_entry_uses_name_and_air_date() {
        let json = serde_json::json!({
            "id": 1396,
            "name": "Breaking Bad",
            "first_air_date": "2008-01-20",
            "origin_country": ["US"],
            "vote_average": 9.5,
            "overview": "A chemistry teacher...",
        });

        let item = parse_catalog_item(&json, MediaKind::Series).unwrap();
        assert_eq!(item.title, "Breaking Bad");
        assert_eq!(item.release_year(), Some("2008"));
        assert_eq!(item.origin_country, vec!["US".to_string()]);
        assert_eq!(item.backdrop_path, None);
    }

    #[test]
    fn listing_entry_without_id_is_dropped() {
        let json = serde_json::json!({ "title": "Mystery", "vote_average": 5.0 });
        assert!(parse_catalog_item(&json, MediaKind::Movie).is_none());
    }

    #[test]
    fn parse_genre_table_from_json() {
        let json = serde_json::json!({
            "genres": [
                { "id": 28, "name": "Action" },
                { "id": 10767, "name": "Talk" }
            ]
        });

        let table = parse_genre_table(&json);
        assert_eq!(table.name(28), "Action");
        assert_eq!(table.name(10767), "Talk");
        assert_eq!(table.name(1), "");
    }

    #[test]
    fn movie_details_take_top_level_imdb_id() {
        let json = serde_json::json!({
            "id": 438631,
            "imdb_id": "tt1160419",
            "runtime": 155
        });

        let d = parse_detail_record(&json, MediaKind::Movie);
        assert_eq!(d.imdb_id.as_deref(), Some("tt1160419"));
        assert_eq!(d.runtime_minutes, Some(155));
        assert_eq!(d.season_count, None);
        assert!(d.created_by.is_empty());
    }

    #[test]
    fn series_details_take_external_ids_and_creators() {
        let json = serde_json::json!({
            "id": 1396,
            "number_of_seasons": 5,
            "external_ids": { "imdb_id": "tt0903747" },
            "created_by": [ { "name": "Vince Gilligan" } ]
        });

        let d = parse_detail_record(&json, MediaKind::Series);
        assert_eq!(d.imdb_id.as_deref(), Some("tt0903747"));
        assert_eq!(d.season_count, Some(5));
        assert_eq!(d.created_by, vec!["Vince Gilligan".to_string()]);
    }

    #[test]
    fn empty_imdb_id_is_treated_as_absent() {
        let json = serde_json::json!({ "id": 7, "imdb_id": "" });
        let d = parse_detail_record(&json, MediaKind::Movie);
        assert_eq!(d.imdb_id, None);
    }

    #[test]
    fn parse_credits_keeps_billing_order_and_jobs() {
        let json = serde_json::json!({
            "cast": [
                { "name": "Timothée Chalamet", "order": 0 },
                { "name": "Rebecca Ferguson", "order": 1 }
            ],
            "crew": [
                { "name": "Denis Villeneuve", "job": "Director" },
                { "name": "Hans Zimmer", "job": "Original Music Composer" }
            ]
        });

        let c = parse_credit_record(&json);
        assert_eq!(c.top_cast(3), vec!["Timothée Chalamet", "Rebecca Ferguson"]);
        assert_eq!(c.directors(), vec!["Denis Villeneuve".to_string()]);
    }

    #[test]
    fn logo_selection_wants_english_png() {
        let json = serde_json::json!({
            "logos": [
                { "iso_639_1": "de", "file_path": "/de.png" },
                { "iso_639_1": "en", "file_path": "/en.svg" },
                { "iso_639_1": "en", "file_path": "/en.png" },
                { "iso_639_1": "en", "file_path": "/second.png" }
            ]
        });

        assert_eq!(select_logo(&json), Some("/en.png".to_string()));
    }

    #[test]
    fn logo_selection_handles_missing_fields() {
        let json = serde_json::json!({
            "logos": [ { "file_path": "/nolang.png" } ]
        });
        assert_eq!(select_logo(&json), None);
        assert_eq!(select_logo(&serde_json::json!({})), None);
    }
}
