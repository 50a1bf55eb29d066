//! Composite similarity between a target card and a candidate.
//!
//! Three signals, summed unweighted: oracle-token overlap (dominant),
//! a flat bonus for matching type family, and mana-cost closeness.
//! Scores are comparable only within one ranking pass.

use std::collections::HashSet;

use migawari_api::Card;

use crate::tokenize;

/// Flat bonus when both cards classify to the same type family.
const TYPE_FAMILY_BONUS: f64 = 10.0;

/// Maximum cost-closeness contribution; decays by 2 per point of mana
/// value difference, reaching zero at a difference of 5.
const COST_CLOSENESS_MAX: f64 = 10.0;

/// The one family a type line classifies into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFamily {
    Creature,
    Instant,
    Sorcery,
    Enchantment,
    Artifact,
    Planeswalker,
    Land,
    Other,
}

impl TypeFamily {
    /// First matching keyword wins, so a multi-keyword type line
    /// ("Artifact Creature", "Enchantment Land") is still classified
    /// exactly once, by this priority order.
    pub fn classify(type_line: &str) -> Self {
        let t = type_line.to_lowercase();
        if t.contains("creature") {
            Self::Creature
        } else if t.contains("instant") {
            Self::Instant
        } else if t.contains("sorcery") {
            Self::Sorcery
        } else if t.contains("enchantment") {
            Self::Enchantment
        } else if t.contains("artifact") {
            Self::Artifact
        } else if t.contains("planeswalker") {
            Self::Planeswalker
        } else if t.contains("land") {
            Self::Land
        } else {
            Self::Other
        }
    }
}

/// Jaccard index of two token sets; 0 when either set is empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Composite similarity score; unbounded, higher is more similar.
///
/// The target's token set is passed in so one tokenization serves a whole
/// candidate pool.
pub fn score(target: &Card, candidate: &Card, target_tokens: &HashSet<String>) -> f64 {
    let candidate_tokens = tokenize::tokenize(candidate);
    let mut total = jaccard(target_tokens, &candidate_tokens) * 100.0;

    if TypeFamily::classify(&target.type_line) == TypeFamily::classify(&candidate.type_line) {
        total += TYPE_FAMILY_BONUS;
    }

    if let (Some(t), Some(c)) = (target.mana_value, candidate.mana_value) {
        total += (COST_CLOSENESS_MAX - 2.0 * (t - c).abs()).max(0.0);
    }

    total
}
