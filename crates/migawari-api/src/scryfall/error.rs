use thiserror::Error;

/// Errors from the Scryfall API client.
#[derive(Debug, Error)]
pub enum ScryfallError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("lookup failed for \"{name}\" (status {status})")]
    Lookup { name: String, status: u16 },

    #[error("search failed (status {status}): {message}")]
    Search { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),
}
