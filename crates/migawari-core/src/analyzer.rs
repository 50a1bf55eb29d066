//! Whole-decklist analysis: resolve each row against the catalog, then
//! hunt substitutes for the rows worth replacing.
//!
//! One row's failure never aborts the batch; the row keeps an error
//! marker and the loop moves on.

use serde::Serialize;
use tracing::{info, warn};

use migawari_api::CardCatalog;
use migawari_parse::{parse_decklist, DecklistEntry};

use crate::config::AppConfig;
use crate::finder::{self, ScoredCandidate, SubstituteQuery};

/// Floor for the batch-mode price cap, so a cheap-but-over-threshold card
/// still gets a meaningful search range.
const MIN_BATCH_CAP: f64 = 0.25;

/// Knobs for one analysis pass.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Cards priced at or above this are considered worth replacing.
    pub price_threshold: f64,
    /// Candidate list length per card.
    pub max_candidates: usize,
    pub exclude_reserved: bool,
    /// Price cap used in single-card mode. A one-row decklist searches
    /// under this user-set cap instead of under the card's own price.
    pub single_price_cap: f64,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            price_threshold: 5.0,
            max_candidates: 8,
            exclude_reserved: true,
            single_price_cap: 10.0,
        }
    }
}

impl AnalyzeOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            price_threshold: config.analyze.price_threshold,
            max_candidates: config.analyze.max_candidates,
            exclude_reserved: config.analyze.exclude_reserved,
            single_price_cap: config.search.max_price,
        }
    }
}

/// One decklist row after analysis. `error` carries a lookup or search
/// failure; card fields stay populated when only the search failed.
#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub quantity: u32,
    pub name: String,
    pub type_line: Option<String>,
    pub mana_value: Option<f64>,
    pub color_identity: Vec<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub url: Option<String>,
    pub candidates: Vec<ScoredCandidate>,
    pub error: Option<String>,
}

/// Result of a full analysis pass, rows in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeckReport {
    pub entries: Vec<EntryReport>,
    /// True when the decklist had exactly one row.
    pub single_mode: bool,
}

/// Analyze raw decklist text: parse, resolve each row, and search
/// substitutes for rows that qualify.
pub async fn analyze_deck<C: CardCatalog>(
    catalog: &C,
    text: &str,
    options: &AnalyzeOptions,
) -> DeckReport {
    let rows = parse_decklist(text);
    let single_mode = rows.len() == 1;
    let mut entries = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        info!(row = i + 1, total = rows.len(), name = %row.name, "Resolving card");
        entries.push(analyze_entry(catalog, row, single_mode, options).await);
    }

    DeckReport {
        entries,
        single_mode,
    }
}

async fn analyze_entry<C: CardCatalog>(
    catalog: &C,
    row: &DecklistEntry,
    single_mode: bool,
    options: &AnalyzeOptions,
) -> EntryReport {
    let card = match catalog.lookup_by_name(&row.name).await {
        Ok(card) => card,
        Err(e) => {
            warn!(name = %row.name, error = %e, "Card lookup failed");
            return unresolved_entry(row, e.to_string());
        }
    };

    let price = card.lowest_price();
    let query = substitute_query(price, single_mode, options);

    let (candidates, error) = match query {
        Some(query) => match finder::find_substitutes(catalog, &card, &query).await {
            Ok(candidates) => (candidates, None),
            Err(e) => {
                // The row's resolution stands; only its candidates are lost.
                warn!(name = %card.name, error = %e, "Substitute search failed");
                (Vec::new(), Some(e.to_string()))
            }
        },
        None => (Vec::new(), None),
    };

    EntryReport {
        quantity: row.quantity,
        name: card.name.clone(),
        type_line: Some(card.type_line.clone()),
        mana_value: card.mana_value,
        color_identity: card.color_identity.clone(),
        price,
        image_url: card.image_url.clone(),
        url: Some(card.canonical_url.clone()),
        candidates,
        error,
    }
}

/// Decide whether (and under which cap) this row gets a substitute search.
///
/// Single-card mode searches under the independent user-set cap. Batch
/// mode only searches cards at or above the threshold, capped just below
/// the card's own price so every hit is an actual saving.
fn substitute_query(
    price: Option<f64>,
    single_mode: bool,
    options: &AnalyzeOptions,
) -> Option<SubstituteQuery> {
    if single_mode {
        return Some(SubstituteQuery {
            max_price: options.single_price_cap,
            max_results: options.max_candidates,
            exclude_reserved: options.exclude_reserved,
        });
    }

    match price {
        Some(p) if p >= options.price_threshold => Some(SubstituteQuery {
            max_price: (p - 0.01).max(MIN_BATCH_CAP),
            max_results: options.max_candidates,
            exclude_reserved: options.exclude_reserved,
        }),
        _ => None,
    }
}

fn unresolved_entry(row: &DecklistEntry, error: String) -> EntryReport {
    EntryReport {
        quantity: row.quantity,
        name: row.name.clone(),
        type_line: None,
        mana_value: None,
        color_identity: Vec::new(),
        price: None,
        image_url: None,
        url: None,
        candidates: Vec::new(),
        error: Some(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use migawari_api::{Card, CardPrices};

    #[derive(Debug, thiserror::Error)]
    enum FakeError {
        #[error("no card named \"{0}\"")]
        Unknown(String),
        #[error("search backend down")]
        SearchDown,
    }

    /// Lookup table plus a search pool, recording every search query.
    struct FakeCatalog {
        cards: Vec<Card>,
        pool: Vec<Card>,
        fail_search: bool,
        queries: Mutex<Vec<String>>,
    }

    impl FakeCatalog {
        fn new(cards: Vec<Card>, pool: Vec<Card>) -> Self {
            Self {
                cards,
                pool,
                fail_search: false,
                queries: Mutex::new(Vec::new()),
            }
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    impl CardCatalog for FakeCatalog {
        type Error = FakeError;

        async fn lookup_by_name(&self, name: &str) -> Result<Card, FakeError> {
            self.cards
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(name))
                .cloned()
                .ok_or_else(|| FakeError::Unknown(name.to_string()))
        }

        async fn search_many(&self, query: &str, pool_cap: usize) -> Result<Vec<Card>, FakeError> {
            self.queries.lock().unwrap().push(query.to_string());
            if self.fail_search {
                return Err(FakeError::SearchDown);
            }
            Ok(self.pool.iter().take(pool_cap).cloned().collect())
        }
    }

    fn card(name: &str, usd: Option<f64>) -> Card {
        Card {
            id: name.to_lowercase().replace(' ', "-"),
            oracle_id: Some(format!("oracle-{name}")),
            name: name.to_string(),
            type_line: "Artifact".to_string(),
            mana_value: Some(2.0),
            oracle_text: Some("Add two mana of any one color.".to_string()),
            prices: CardPrices {
                usd,
                ..Default::default()
            },
            canonical_url: format!("https://cards.example/{name}"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn lookup_failure_is_recorded_and_batch_continues() {
        let catalog = FakeCatalog::new(vec![card("Sol Ring", Some(1.5))], vec![]);
        let report = analyze_deck(
            &catalog,
            "1 Sol Ring\n1 Not A Real Card",
            &AnalyzeOptions::default(),
        )
        .await;

        assert_eq!(report.entries.len(), 2);
        assert!(!report.single_mode);

        assert!(report.entries[0].error.is_none());
        assert_eq!(report.entries[0].price, Some(1.5));

        let failed = &report.entries[1];
        assert_eq!(failed.name, "Not A Real Card");
        assert!(failed.candidates.is_empty());
        assert!(failed.error.as_deref().unwrap().contains("Not A Real Card"));
    }

    #[tokio::test]
    async fn cheap_cards_skip_the_search_in_batch_mode() {
        let catalog = FakeCatalog::new(
            vec![card("Sol Ring", Some(1.5)), card("Arcane Signet", Some(0.8))],
            vec![],
        );
        let report = analyze_deck(
            &catalog,
            "1 Sol Ring\n1 Arcane Signet",
            &AnalyzeOptions::default(),
        )
        .await;

        assert!(catalog.queries().is_empty());
        assert!(report.entries.iter().all(|e| e.candidates.is_empty()));
        assert!(report.entries.iter().all(|e| e.error.is_none()));
    }

    #[tokio::test]
    async fn expensive_card_searches_below_its_own_price() {
        let catalog = FakeCatalog::new(
            vec![card("Mana Crypt", Some(150.0)), card("Sol Ring", Some(1.5))],
            vec![card("Worn Powerstone", Some(0.9))],
        );
        let report = analyze_deck(
            &catalog,
            "1 Mana Crypt\n1 Sol Ring",
            &AnalyzeOptions::default(),
        )
        .await;

        let queries = catalog.queries();
        assert_eq!(queries.len(), 1);
        assert!(queries[0].contains("usd<=149.99"));

        let crypt = &report.entries[0];
        assert_eq!(crypt.candidates.len(), 1);
        assert_eq!(crypt.candidates[0].card.name, "Worn Powerstone");
    }

    #[tokio::test]
    async fn single_card_mode_uses_the_independent_cap() {
        // A cheap card below the threshold still gets a search when it is
        // the only row, under the user-set cap.
        let catalog = FakeCatalog::new(
            vec![card("Sol Ring", Some(1.5))],
            vec![card("Commander's Sphere", Some(0.3))],
        );
        let options = AnalyzeOptions {
            single_price_cap: 7.0,
            ..Default::default()
        };
        let report = analyze_deck(&catalog, "1 Sol Ring", &options).await;

        assert!(report.single_mode);
        let queries = catalog.queries();
        assert_eq!(queries.len(), 1);
        assert!(queries[0].contains("usd<=7"));
        assert_eq!(report.entries[0].candidates.len(), 1);
    }

    #[tokio::test]
    async fn search_failure_keeps_the_resolved_card() {
        let mut catalog = FakeCatalog::new(vec![card("Mana Crypt", Some(150.0))], vec![]);
        catalog.fail_search = true;

        let report = analyze_deck(
            &catalog,
            "1 Mana Crypt\n# filler comment",
            &AnalyzeOptions::default(),
        )
        .await;

        let entry = &report.entries[0];
        assert_eq!(entry.name, "Mana Crypt");
        assert_eq!(entry.price, Some(150.0));
        assert!(entry.candidates.is_empty());
        assert!(entry.error.as_deref().unwrap().contains("search backend down"));
    }

    #[tokio::test]
    async fn batch_cap_never_drops_below_floor() {
        let catalog = FakeCatalog::new(vec![card("Barely Over", Some(0.20))], vec![]);
        let options = AnalyzeOptions {
            price_threshold: 0.1,
            ..Default::default()
        };
        // Two rows so batch rules apply.
        let report = analyze_deck(&catalog, "1 Barely Over\n1 Missing Card", &options).await;

        let queries = catalog.queries();
        assert_eq!(queries.len(), 1);
        assert!(queries[0].contains("usd<=0.25"));
        assert_eq!(report.entries.len(), 2);
    }
}
