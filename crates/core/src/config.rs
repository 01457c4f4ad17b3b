use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing API key: set {0}")]
    MissingKey(&'static str),
    #[error("{0} still holds a placeholder value")]
    PlaceholderKey(&'static str),
}

/// Runtime configuration, read once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub tmdb_api_key: String,
    pub omdb_api_key: String,
    pub output_dir: PathBuf,
    pub max_concurrent: usize,
    pub exclusions: ExclusionRules,
}

impl Config {
    /// Load configuration from `MARQUEE_*` environment variables.
    ///
    /// A missing or placeholder API key aborts startup before any network
    /// activity.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            tmdb_api_key: require_key("MARQUEE_TMDB_KEY")?,
            omdb_api_key: require_key("MARQUEE_OMDB_KEY")?,
            output_dir: std::env::var("MARQUEE_OUTPUT_DIR")
                .unwrap_or_else(|_| "backgrounds".to_string())
                .into(),
            max_concurrent: std::env::var("MARQUEE_MAX_CONCURRENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4),
            exclusions: ExclusionRules::new(
                csv_list("MARQUEE_EXCLUDE_COUNTRIES"),
                csv_list("MARQUEE_EXCLUDE_GENRES"),
                csv_list("MARQUEE_EXCLUDE_KEYWORDS"),
            ),
        })
    }
}

fn require_key(var: &'static str) -> Result<String, ConfigError> {
    let value = std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingKey(var))?;
    if value.starts_with("YOUR_") {
        return Err(ConfigError::PlaceholderKey(var));
    }
    Ok(value)
}

fn csv_list(var: &str) -> Vec<String> {
    std::env::var(var)
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Exclusion rules applied by the eligibility filter.
///
/// Country codes and title keywords match case-insensitively; genre names
/// match as configured.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    countries: Vec<String>,
    genres: Vec<String>,
    keywords: Vec<String>,
}

impl ExclusionRules {
    pub fn new(countries: Vec<String>, genres: Vec<String>, keywords: Vec<String>) -> Self {
        Self {
            countries: countries.into_iter().map(|c| c.to_lowercase()).collect(),
            genres,
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn blocks_country(&self, code: &str) -> bool {
        let code = code.to_lowercase();
        self.countries.iter().any(|c| *c == code)
    }

    pub fn blocks_genre(&self, name: &str) -> bool {
        self.genres.iter().any(|g| g == name)
    }

    pub fn blocks_title(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.keywords.iter().any(|k| title.contains(k.as_str()))
    }
}
