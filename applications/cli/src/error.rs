/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No sound matches \"{0}\"")]
    NoMatch(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error(transparent)]
    Soundboard(#[from] soundboard_core::SoundboardError),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
