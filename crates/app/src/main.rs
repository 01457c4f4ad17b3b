use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod pipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Credentials and exclusion rules must be valid before any network call.
    let config = marquee_core::Config::from_env().context("invalid configuration")?;
    info!(
        output_dir = %config.output_dir.display(),
        max_concurrent = config.max_concurrent,
        "starting poster generation"
    );

    let tmdb = marquee_catalog::tmdb::TmdbClient::new(config.tmdb_api_key.clone())
        .context("failed to build catalog client")?;
    let omdb = marquee_ratings::omdb::OmdbClient::new(config.omdb_api_key.clone())
        .context("failed to build rating client")?;

    // Fresh output directory each run; prior contents are discarded.
    marquee_poster::output::prepare_output_dir(&config.output_dir)
        .context("failed to prepare output directory")?;

    let produced = pipeline::run(&config, &tmdb, &omdb).await;
    info!(posters = produced, "poster generation completed");

    Ok(())
}
