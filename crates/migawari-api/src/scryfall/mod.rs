pub mod client;
pub mod error;
pub mod types;

pub use client::ScryfallClient;
pub use error::ScryfallError;
