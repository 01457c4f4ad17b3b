pub mod fuzzy;
pub mod omdb;
pub mod provider;
pub mod resolve;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RatingsError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
}

/// Which source backed an item's score badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingSource {
    ExternalPrimary,
    ExternalFuzzy,
    FallbackNative,
    None,
}

impl RatingSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExternalPrimary => "external-primary",
            Self::ExternalFuzzy => "external-fuzzy",
            Self::FallbackNative => "fallback-native",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for RatingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of rating resolution for one item. Consumed once by the poster
/// composer; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRating {
    pub critic_score: Option<u8>,
    pub certified: bool,
    pub secondary_score: Option<u8>,
    pub source: RatingSource,
}

impl ResolvedRating {
    pub fn none() -> Self {
        Self {
            critic_score: None,
            certified: false,
            secondary_score: None,
            source: RatingSource::None,
        }
    }

    /// True when neither external score came back.
    pub fn is_empty(&self) -> bool {
        self.critic_score.is_none() && self.secondary_score.is_none()
    }
}
