//! Trait definitions for card catalog services.
//!
//! The substitute engine is written against `CardCatalog`, so tests (and
//! any future catalog backend) can stand in for the live Scryfall client.

use std::future::Future;

/// A card catalog: fuzzy single-card resolution plus paginated search.
pub trait CardCatalog: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resolve a free-text name to a single card, fuzzily.
    fn lookup_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Card, Self::Error>> + Send;

    /// Run a catalog search, following pagination until `pool_cap` cards
    /// accumulate or pages run out. Never returns more than `pool_cap`
    /// cards, and never returns a partial pool on failure.
    fn search_many(
        &self,
        query: &str,
        pool_cap: usize,
    ) -> impl Future<Output = Result<Vec<Card>, Self::Error>> + Send;
}

/// A card snapshot from any catalog backend. Read-only once fetched.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Card {
    /// Printing-level identifier, unique per printing.
    pub id: String,
    /// Identity shared by all rules-text-identical printings.
    pub oracle_id: Option<String>,
    /// Fallback grouping of printings when `oracle_id` is absent.
    pub prints_group: Option<String>,
    pub name: String,
    pub type_line: String,
    /// Color symbols; empty means colorless.
    pub color_identity: Vec<String>,
    pub mana_value: Option<f64>,
    pub oracle_text: Option<String>,
    pub prices: CardPrices,
    pub image_url: Option<String>,
    /// Canonical web page for this printing.
    pub canonical_url: String,
}

/// Per-finish USD prices. Absent fields mean the finish is not sold.
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct CardPrices {
    pub usd: Option<f64>,
    pub usd_foil: Option<f64>,
    pub usd_etched: Option<f64>,
}

impl Card {
    /// Cheapest valid price across finishes (plain, foil, etched).
    /// `None` when no finish has a finite positive price.
    pub fn lowest_price(&self) -> Option<f64> {
        [
            self.prices.usd,
            self.prices.usd_foil,
            self.prices.usd_etched,
        ]
        .into_iter()
        .flatten()
        .filter(|p| p.is_finite() && *p > 0.0)
        .min_by(|a, b| a.total_cmp(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_with_prices(usd: Option<f64>, foil: Option<f64>, etched: Option<f64>) -> Card {
        Card {
            prices: CardPrices {
                usd,
                usd_foil: foil,
                usd_etched: etched,
            },
            ..Default::default()
        }
    }

    #[test]
    fn lowest_price_picks_minimum() {
        let card = card_with_prices(Some(4.0), Some(1.5), Some(9.0));
        assert_eq!(card.lowest_price(), Some(1.5));
    }

    #[test]
    fn lowest_price_ignores_invalid() {
        let card = card_with_prices(None, Some(0.0), Some(2.25));
        assert_eq!(card.lowest_price(), Some(2.25));
    }

    #[test]
    fn lowest_price_none_when_unpriced() {
        let card = card_with_prices(None, None, None);
        assert_eq!(card.lowest_price(), None);
        let card = card_with_prices(Some(0.0), None, None);
        assert_eq!(card.lowest_price(), None);
    }
}
