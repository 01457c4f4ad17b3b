//! Three-stage rating resolution, first success wins:
//! external id, then exact title+year, then fuzzy search.

use tracing::{debug, warn};

use marquee_catalog::{CatalogItem, DetailRecord};

use crate::fuzzy::rank_candidates;
use crate::provider::{RatingProvider, ScorePair};
use crate::{RatingSource, ResolvedRating};

/// Certification needs a primary critic score of at least this.
const CERTIFIED_MIN: u8 = 75;

/// Resolve a critic score for one item.
///
/// Never fails: an I/O error at any stage degrades to "no result" for that
/// stage, and the next stage runs. The native-score fallback is the
/// caller's job; this function only reports external sources or
/// [`RatingSource::None`].
pub async fn resolve<P: RatingProvider + ?Sized>(
    provider: &P,
    item: &CatalogItem,
    details: &DetailRecord,
) -> ResolvedRating {
    if let Some(imdb_id) = details.imdb_id.as_deref() {
        match provider.scores_by_id(imdb_id).await {
            Ok(scores) if !scores.is_empty() => {
                return rated(scores, RatingSource::ExternalPrimary);
            }
            Ok(_) => debug!(title = %item.title, "no scores for external id"),
            Err(e) => warn!(title = %item.title, error = %e, "primary rating lookup failed"),
        }
    }

    // Both name fallbacks need a title and a 4-digit year.
    if item.title.is_empty() {
        return ResolvedRating::none();
    }
    let Some(year) = item.release_year() else {
        return ResolvedRating::none();
    };

    match provider.scores_by_title(&item.title, year).await {
        Ok(scores) if !scores.is_empty() => {
            debug!(title = %item.title, "scores via exact title match");
            return rated(scores, RatingSource::ExternalFuzzy);
        }
        Ok(_) => {}
        Err(e) => warn!(title = %item.title, error = %e, "exact-title rating lookup failed"),
    }

    let candidates = match provider.search(&item.title, year).await {
        Ok(c) => c,
        Err(e) => {
            warn!(title = %item.title, error = %e, "rating search failed");
            return ResolvedRating::none();
        }
    };

    let Some(best) = rank_candidates(&item.title, year, &candidates)
        .into_iter()
        .next()
    else {
        debug!(title = %item.title, "no fuzzy candidate above threshold");
        return ResolvedRating::none();
    };

    match provider.scores_by_id(&best.candidate.id).await {
        Ok(scores) if !scores.is_empty() => {
            debug!(
                title = %item.title,
                matched = %best.candidate.title,
                matched_year = %best.candidate.year,
                score = best.score,
                "scores via fuzzy match"
            );
            rated(scores, RatingSource::ExternalFuzzy)
        }
        Ok(_) => ResolvedRating::none(),
        Err(e) => {
            warn!(title = %item.title, error = %e, "fuzzy rating lookup failed");
            ResolvedRating::none()
        }
    }
}

fn rated(scores: ScorePair, source: RatingSource) -> ResolvedRating {
    ResolvedRating {
        critic_score: scores.critic,
        certified: scores.critic.is_some_and(|s| s >= CERTIFIED_MIN),
        secondary_score: scores.secondary,
        source,
    }
}
