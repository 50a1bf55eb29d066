//! Substitute discovery: query construction, pool filtering, ranking,
//! deduplication.

use std::collections::HashSet;

use serde::Serialize;

use migawari_api::{Card, CardCatalog};

use crate::normalize::normalize_name;
use crate::scorer;
use crate::tokenize;

/// Hard upper bound on the candidate pool fetched from the catalog.
const POOL_CAP: usize = 180;

/// Fallback when a caller hands over a malformed price cap.
const DEFAULT_MAX_PRICE: f64 = 10.0;

/// Parameters for one substitute search.
#[derive(Debug, Clone)]
pub struct SubstituteQuery {
    /// Only candidates priced at or below this survive.
    pub max_price: f64,
    pub max_results: usize,
    /// Drop reserved-list cards from the pool.
    pub exclude_reserved: bool,
}

impl Default for SubstituteQuery {
    fn default() -> Self {
        Self {
            max_price: DEFAULT_MAX_PRICE,
            max_results: 12,
            exclude_reserved: true,
        }
    }
}

/// A candidate substitute with its cheapest price and similarity score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub card: Card,
    pub price: f64,
    pub score: f64,
}

/// Whether two cards are the same logical card: shared oracle identity,
/// shared prints group, or names that normalize to the same form.
pub fn is_same_card_or_printing(a: &Card, b: &Card) -> bool {
    if let (Some(x), Some(y)) = (a.oracle_id.as_deref(), b.oracle_id.as_deref()) {
        if !x.is_empty() && x == y {
            return true;
        }
    }
    if let (Some(x), Some(y)) = (a.prints_group.as_deref(), b.prints_group.as_deref()) {
        if !x.is_empty() && x == y {
            return true;
        }
    }
    normalize_name(&a.name) == normalize_name(&b.name)
}

/// Catalog filter expression for a substitute search: commander-legal,
/// paper printings, color identity within the target's, priced in
/// `(0, max_price]`, and not the target itself. Clauses joined by spaces
/// (implicit AND in the catalog's query grammar).
pub fn build_search_query(target: &Card, query: &SubstituteQuery) -> String {
    let max_price = sanitize_max_price(query.max_price);

    let mut parts = vec![
        "f:commander".to_string(),
        "game:paper".to_string(),
        color_identity_clause(&target.color_identity),
        format!("usd<={max_price}"),
        "usd>0".to_string(),
    ];

    // Query-level same-card exclusion. Cheap, but not authoritative: the
    // in-process guard in find_substitutes still runs on every result.
    if let Some(oracle_id) = target.oracle_id.as_deref().filter(|s| !s.is_empty()) {
        parts.push(format!("-oracleid:{oracle_id}"));
    }
    parts.push(format!("!\"{}\"", target.name.replace('"', "\\\"")));

    if query.exclude_reserved {
        parts.push("-is:reserved".to_string());
    }

    parts.join(" ")
}

/// Find ranked, deduplicated substitutes for `target`.
///
/// Returns an empty list when nothing qualifies; errs only when the
/// catalog fetch itself fails.
pub async fn find_substitutes<C: CardCatalog>(
    catalog: &C,
    target: &Card,
    query: &SubstituteQuery,
) -> Result<Vec<ScoredCandidate>, C::Error> {
    let max_price = sanitize_max_price(query.max_price);
    let q = build_search_query(target, query);

    let pool = catalog.search_many(&q, POOL_CAP).await?;
    tracing::debug!(target = %target.name, pool = pool.len(), "Scoring substitute pool");

    let target_tokens = tokenize::tokenize(target);

    let mut scored: Vec<ScoredCandidate> = pool
        .into_iter()
        .filter(|card| !is_same_card_or_printing(target, card))
        .filter_map(|card| {
            let price = card.lowest_price()?;
            if price > max_price {
                return None;
            }
            let score = scorer::score(target, &card, &target_tokens);
            Some(ScoredCandidate { card, price, score })
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.price.total_cmp(&b.price)));

    // Walk best-first, keeping one printing per logical card.
    let target_name = normalize_name(&target.name);
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(query.max_results.min(scored.len()));
    for item in scored {
        let key = dedup_key(&item.card);
        if !seen.insert(key) {
            continue;
        }
        if normalize_name(&item.card.name) == target_name {
            continue;
        }
        out.push(item);
        if out.len() >= query.max_results {
            break;
        }
    }

    Ok(out)
}

/// Stable identity key: oracle identity, else prints group, else the
/// printing's own id.
fn dedup_key(card: &Card) -> String {
    card.oracle_id
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| card.prints_group.clone().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| card.id.clone())
}

fn color_identity_clause(color_identity: &[String]) -> String {
    if color_identity.is_empty() {
        // An empty identity means colorless, not "anything".
        "id:c".to_string()
    } else {
        format!("id<={}", color_identity.join("").to_lowercase())
    }
}

fn sanitize_max_price(max_price: f64) -> f64 {
    if max_price.is_finite() && max_price > 0.0 {
        max_price
    } else {
        DEFAULT_MAX_PRICE
    }
}
