pub mod config;
pub mod types;

pub use config::{Config, ConfigError, ExclusionRules};
pub use types::MediaKind;
