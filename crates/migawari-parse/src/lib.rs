pub mod decklist;
pub mod name;

pub use decklist::{parse_decklist, DecklistEntry};
pub use name::clean_card_name;
