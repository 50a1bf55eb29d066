use serde::Deserialize;

use crate::traits::{Card, CardPrices};

// ── Wire types ───────────────────────────────────────────────────

/// A card object as Scryfall serves it. Only the fields the engine
/// consumes; everything else in the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ScryfallCard {
    pub id: String,
    pub oracle_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub color_identity: Vec<String>,
    pub cmc: Option<f64>,
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub prices: ScryfallPrices,
    pub image_uris: Option<ImageUris>,
    /// Multi-faced cards carry images per face instead of at top level.
    pub card_faces: Option<Vec<CardFace>>,
    #[serde(default)]
    pub scryfall_uri: String,
    pub prints_search_uri: Option<String>,
}

/// Scryfall serializes prices as decimal strings, null when unlisted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScryfallPrices {
    pub usd: Option<String>,
    pub usd_foil: Option<String>,
    pub usd_etched: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageUris {
    pub normal: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardFace {
    pub image_uris: Option<ImageUris>,
}

/// One page of `/cards/search` results.
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub data: Vec<ScryfallCard>,
    #[serde(default)]
    pub has_more: bool,
    pub next_page: Option<String>,
}

// ── Conversion to the catalog model ──────────────────────────────

impl ScryfallCard {
    pub fn into_card(self) -> Card {
        let image_url = self
            .image_uris
            .as_ref()
            .and_then(|i| i.normal.clone())
            .or_else(|| {
                self.card_faces
                    .as_ref()
                    .and_then(|faces| faces.first())
                    .and_then(|f| f.image_uris.as_ref())
                    .and_then(|i| i.normal.clone())
            });

        Card {
            id: self.id,
            oracle_id: self.oracle_id,
            prints_group: self.prints_search_uri,
            name: self.name,
            type_line: self.type_line.unwrap_or_default(),
            color_identity: self.color_identity,
            mana_value: self.cmc,
            oracle_text: self.oracle_text,
            prices: self.prices.parsed(),
            image_url,
            canonical_url: self.scryfall_uri,
        }
    }
}

impl ScryfallPrices {
    fn parsed(&self) -> CardPrices {
        CardPrices {
            usd: parse_price(self.usd.as_deref()),
            usd_foil: parse_price(self.usd_foil.as_deref()),
            usd_etched: parse_price(self.usd_etched.as_deref()),
        }
    }
}

fn parse_price(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.parse::<f64>().ok()).filter(|p| p.is_finite())
}
