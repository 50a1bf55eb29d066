pub mod scryfall;
pub mod traits;

pub use scryfall::{ScryfallClient, ScryfallError};
pub use traits::{Card, CardCatalog, CardPrices};
