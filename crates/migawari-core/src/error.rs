use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigawariError {
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
