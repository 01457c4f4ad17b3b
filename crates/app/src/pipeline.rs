//! Pipeline driver: aggregate the catalog, filter, fan out per item with
//! bounded concurrency, compose posters.

use futures::StreamExt;
use tracing::{info, warn};

use marquee_catalog::aggregate;
use marquee_catalog::filter;
use marquee_catalog::tmdb::TmdbClient;
use marquee_catalog::{CatalogItem, GenreTable};
use marquee_core::{Config, MediaKind};
use marquee_poster::compose::{JpegComposer, PosterComposer};
use marquee_poster::{runtime_label, seasons_label, PosterRecord};
use marquee_ratings::omdb::OmdbClient;
use marquee_ratings::resolve::resolve;
use marquee_ratings::RatingSource;

/// Run the whole pipeline; returns the number of posters written.
pub async fn run(config: &Config, tmdb: &TmdbClient, omdb: &OmdbClient) -> usize {
    let catalog = aggregate::fetch_catalog(tmdb).await;
    info!(
        movies = catalog.movies.len(),
        series = catalog.series.len(),
        "catalog aggregated"
    );

    let composer = JpegComposer::new(&config.output_dir);

    let movies = process_kind(
        config,
        tmdb,
        omdb,
        &composer,
        catalog.movies,
        &catalog.movie_genres,
    )
    .await;
    let series = process_kind(
        config,
        tmdb,
        omdb,
        &composer,
        catalog.series,
        &catalog.series_genres,
    )
    .await;

    info!(movies, series, "posters written");
    movies + series
}

async fn process_kind(
    config: &Config,
    tmdb: &TmdbClient,
    omdb: &OmdbClient,
    composer: &JpegComposer,
    items: Vec<CatalogItem>,
    genres: &GenreTable,
) -> usize {
    // Cheap checks first; only survivors cost any further requests.
    let eligible: Vec<CatalogItem> = items
        .into_iter()
        .filter(
            |item| match filter::eligibility(item, genres, &config.exclusions) {
                None => true,
                Some(reason) => {
                    info!(title = %item.title, kind = %item.kind, %reason, "skipped");
                    false
                }
            },
        )
        .collect();

    let results: Vec<bool> = futures::stream::iter(eligible)
        .map(|item| process_item(tmdb, omdb, composer, genres, item))
        .buffer_unordered(config.max_concurrent)
        .collect()
        .await;

    results.into_iter().filter(|produced| *produced).count()
}

/// Process one eligible item end to end. Every failure is a per-item skip.
async fn process_item(
    tmdb: &TmdbClient,
    omdb: &OmdbClient,
    composer: &JpegComposer,
    genres: &GenreTable,
    item: CatalogItem,
) -> bool {
    let Some(backdrop_path) = item.backdrop_path.clone() else {
        info!(title = %item.title, "skipped: no backdrop image");
        return false;
    };

    let logo = match tmdb.logo(item.kind, item.id).await {
        Ok(Some(path)) => path,
        Ok(None) => {
            info!(title = %item.title, "skipped: no logo");
            return false;
        }
        Err(e) => {
            warn!(title = %item.title, error = %e, "skipped: logo lookup failed");
            return false;
        }
    };

    // Details and credits are issued as a pair and awaited jointly.
    let (details, credits) = tokio::join!(
        tmdb.details(item.kind, item.id),
        tmdb.credits(item.kind, item.id)
    );

    let details = match details {
        Ok(d) => d,
        Err(e) => {
            warn!(title = %item.title, error = %e, "skipped: detail fetch failed");
            return false;
        }
    };
    let credits = match credits {
        Ok(c) => c,
        Err(e) => {
            warn!(title = %item.title, error = %e, "skipped: credit fetch failed");
            return false;
        }
    };
    if credits.cast.is_empty() {
        info!(title = %item.title, "skipped: no cast information");
        return false;
    }

    let mut rating = resolve(omdb, &item, &details).await;
    if rating.is_empty() {
        // The filter already rejected vote_average == 0, so the native
        // score is a real value here.
        if item.vote_average > 0.0 {
            rating.source = RatingSource::FallbackNative;
        } else {
            info!(title = %item.title, "skipped: no rating from any source");
            return false;
        }
    }

    let backdrop = match tmdb.backdrop(&backdrop_path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(title = %item.title, error = %e, "skipped: backdrop download failed");
            return false;
        }
    };

    let directors = match item.kind {
        MediaKind::Movie => credits.directors(),
        MediaKind::Series => details.created_by.clone(),
    };
    let length_label = match item.kind {
        MediaKind::Movie => runtime_label(details.runtime_minutes),
        MediaKind::Series => seasons_label(details.season_count),
    };

    let record = PosterRecord {
        title: item.title.clone(),
        year: item.release_year().map(|y| y.to_string()),
        genres: genres
            .names(&item.genre_ids)
            .into_iter()
            .filter(|g| !g.is_empty())
            .take(3)
            .collect(),
        overview: item.overview.clone(),
        backdrop,
        logo_path: logo,
        cast: credits.top_cast(3),
        directors,
        length_label,
        rating,
        native_score: item.native_score(),
    };

    match composer.compose(&record) {
        Ok(path) => {
            info!(
                title = %item.title,
                source = %record.rating.source,
                file = %path.display(),
                "poster created"
            );
            true
        }
        Err(e) => {
            warn!(title = %item.title, error = %e, "poster creation failed");
            false
        }
    }
}
