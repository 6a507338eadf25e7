use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentinelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
