//! Rating-source client (OMDB).
//!
//! One endpoint, three query modes: `i` (external id), `t`+`y` (exact
//! title), `s`+`y` (free-text search).

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::provider::{RatingProvider, ScorePair, SearchCandidate};
use crate::RatingsError;

const OMDB_URL: &str = "http://www.omdbapi.com/";

pub struct OmdbClient {
    api_key: String,
    client: reqwest::Client,
}

impl OmdbClient {
    pub fn new(api_key: String) -> Result<Self, RatingsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RatingsError::Network(e.to_string()))?;
        Ok(Self { api_key, client })
    }

    async fn get_json(&self, params: &[(&str, &str)]) -> Result<Value, RatingsError> {
        let mut all_params = vec![("apikey", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        debug!(query = ?params.first(), "rating request");

        let resp = self
            .client
            .get(OMDB_URL)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| RatingsError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(RatingsError::Provider(format!(
                "rating source returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| RatingsError::Provider(format!("parse JSON: {e}")))
    }
}

#[async_trait::async_trait]
impl RatingProvider for OmdbClient {
    fn name(&self) -> &str {
        "omdb"
    }

    async fn scores_by_id(&self, id: &str) -> Result<ScorePair, RatingsError> {
        let data = self.get_json(&[("i", id), ("plot", "short")]).await?;
        Ok(parse_scores(&data))
    }

    async fn scores_by_title(
        &self,
        title: &str,
        year: &str,
    ) -> Result<ScorePair, RatingsError> {
        let data = self
            .get_json(&[("t", title), ("y", year), ("plot", "short")])
            .await?;
        Ok(parse_scores(&data))
    }

    async fn search(
        &self,
        title: &str,
        year: &str,
    ) -> Result<Vec<SearchCandidate>, RatingsError> {
        let data = self.get_json(&[("s", title), ("y", year)]).await?;
        Ok(parse_search(&data))
    }
}

/// Scores from a lookup response. A failure status yields an empty pair;
/// malformed numeric text drops that field only.
fn parse_scores(data: &Value) -> ScorePair {
    if data["Response"].as_str() != Some("True") {
        return ScorePair::default();
    }

    let mut scores = ScorePair::default();
    if let Some(entries) = data["Ratings"].as_array() {
        for entry in entries {
            let source = entry["Source"].as_str().unwrap_or("");
            let value = entry["Value"].as_str().unwrap_or("");
            match source {
                "Rotten Tomatoes" => {
                    if let Some(v) = parse_percent(value) {
                        scores.critic = Some(v);
                    }
                }
                "Metacritic" => {
                    if let Some(v) = parse_fraction(value) {
                        scores.secondary = Some(v);
                    }
                }
                _ => {}
            }
        }
    }
    scores
}

/// `"82%"` -> 82
fn parse_percent(value: &str) -> Option<u8> {
    value.strip_suffix('%')?.trim().parse().ok()
}

/// `"70/100"` -> 70
fn parse_fraction(value: &str) -> Option<u8> {
    let (numerator, _) = value.split_once('/')?;
    numerator.trim().parse().ok()
}

fn parse_search(data: &Value) -> Vec<SearchCandidate> {
    if data["Response"].as_str() != Some("True") {
        return Vec::new();
    }

    data["Search"]
        .as_array()
        .map(|a| {
            a.iter()
                .filter_map(|r| {
                    Some(SearchCandidate {
                        id: r["imdbID"].as_str()?.to_string(),
                        title: r["Title"].as_str()?.to_string(),
                        year: r["Year"].as_str().unwrap_or("").to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}
