/// Core error type.
///
/// Adapter crates map their specific errors into this type so the bot core
/// can handle failures consistently (self-healed file state vs surfaced
/// upstream failure).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("upstream error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
