//! Similarity ranking over rating-source search results.

use strsim::normalized_levenshtein;

use crate::provider::SearchCandidate;

/// Fixed boost for an exact year match, applied before the cutoff and
/// uncapped (a 0.95 similarity with a year match scores 1.05).
const YEAR_BONUS: f64 = 0.1;

/// Candidates scoring below this after the bonus are discarded.
const MIN_SCORE: f64 = 0.8;

/// A search candidate with its final match score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub candidate: SearchCandidate,
    pub score: f64,
}

/// Score and rank `candidates` against the queried title and year.
///
/// Pure function of its inputs. Similarity is normalized Levenshtein over
/// the lowercased titles; the sort is stable descending, so ties keep
/// source order and the caller can take the head.
pub fn rank_candidates(
    title: &str,
    year: &str,
    candidates: &[SearchCandidate],
) -> Vec<RankedCandidate> {
    let query = title.to_lowercase();

    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .map(|c| {
            let mut score = normalized_levenshtein(&query, &c.title.to_lowercase());
            if c.year == year {
                score += YEAR_BONUS;
            }
            RankedCandidate {
                candidate: c.clone(),
                score,
            }
        })
        .filter(|r| r.score >= MIN_SCORE)
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, title: &str, year: &str) -> SearchCandidate {
        SearchCandidate {
            id: id.to_string(),
            title: title.to_string(),
            year: year.to_string(),
        }
    }

    #[test]
    fn exact_title_and_year_outranks_partial_match() {
        let candidates = vec![
            candidate("tt2", "Dune: Part Two", "2024"),
            candidate("tt1", "Dune", "2021"),
        ];

        let ranked = rank_candidates("Dune", "2021", &candidates);
        assert_eq!(ranked[0].candidate.id, "tt1");
        assert!((ranked[0].score - 1.1).abs() < 1e-9);
    }

    #[test]
    fn year_bonus_applies_before_the_cutoff() {
        // 3 edits over 10 chars: similarity exactly 0.70.
        let query = "aaaaaaaaaa";
        let near = "aaaaaaabbb";

        let no_year = rank_candidates(query, "2021", &[candidate("tt1", near, "1999")]);
        assert!(no_year.is_empty());

        let with_year = rank_candidates(query, "2021", &[candidate("tt1", near, "2021")]);
        assert_eq!(with_year.len(), 1);
        assert!((with_year[0].score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn threshold_is_inclusive() {
        // 2 edits over 10 chars: similarity exactly 0.80.
        let ranked = rank_candidates("aaaaaaaaaa", "2021", &[candidate("tt1", "aaaaaaaabb", "1999")]);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn comparison_is_case_insensitive() {
        let ranked = rank_candidates("DUNE", "2021", &[candidate("tt1", "dune", "1999")]);
        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ties_keep_source_order() {
        let candidates = vec![
            candidate("tt1", "Dune", "2021"),
            candidate("tt2", "Dune", "2021"),
        ];

        let ranked = rank_candidates("Dune", "2021", &candidates);
        assert_eq!(ranked[0].candidate.id, "tt1");
        assert_eq!(ranked[1].candidate.id, "tt2");
    }
}
