use crate::RatingsError;

/// Scores pulled from one rating-source response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScorePair {
    /// Percentage-formatted critic score, 0-100.
    pub critic: Option<u8>,
    /// Fraction-formatted (`X/100`) secondary score, 0-100.
    pub secondary: Option<u8>,
}

impl ScorePair {
    pub fn is_empty(self) -> bool {
        self.critic.is_none() && self.secondary.is_none()
    }
}

/// One entry from the rating source's free-text search, in source rank order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCandidate {
    pub id: String,
    pub title: String,
    pub year: String,
}

/// A rating source that can be queried by external id, by exact title, or
/// searched by free text.
#[async_trait::async_trait]
pub trait RatingProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Look up scores by external identifier. A well-formed "not found"
    /// response is an empty [`ScorePair`], not an error.
    async fn scores_by_id(&self, id: &str) -> Result<ScorePair, RatingsError>;

    /// Look up scores by exact title and year.
    async fn scores_by_title(&self, title: &str, year: &str)
        -> Result<ScorePair, RatingsError>;

    /// Free-text search returning source-ranked candidates.
    async fn search(&self, title: &str, year: &str)
        -> Result<Vec<SearchCandidate>, RatingsError>;
}
