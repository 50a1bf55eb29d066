//! Oracle-text tokenization for similarity scoring.
//!
//! Rules text is full of function words ("whenever", "target") and generic
//! nouns ("creature", "battlefield") that say nothing about what a card
//! actually does. Tokenization keeps only the distinctive vocabulary, as a
//! set, so two cards can be compared by overlap.

use std::collections::HashSet;

use phf::phf_set;

use migawari_api::Card;

/// Compile-time stopword table: rules-text function words and generic
/// nouns excluded from similarity comparison.
static STOPWORDS: phf::Set<&'static str> = phf_set! {
    "the", "a", "an", "and", "or", "to", "of", "in", "on", "for", "with",
    "without", "from", "into", "until", "as", "this", "that", "those",
    "these", "it", "its", "their", "your", "you", "they", "them", "each",
    "any", "all", "at", "by", "is", "are", "was", "were", "be", "been",
    "being", "if", "then", "may", "can", "cannot", "can't", "have", "has",
    "had", "do", "does", "did", "when", "whenever", "where", "while",
    "during", "after", "before", "target", "targets", "player", "players",
    "opponent", "opponents", "creature", "creatures", "card", "cards",
    "spell", "spells", "ability", "abilities", "control", "controls",
    "controlled", "owner", "owners", "battlefield", "graveyard", "library",
    "hand", "turn", "end", "step", "phase", "game", "next",
};

/// Tokens shorter than this are noise (mana symbols, "get", "put").
const MIN_TOKEN_LEN: usize = 4;

/// Punctuation and bracket characters replaced by spaces before splitting.
const PUNCTUATION: &[char] = &['(', ')', '[', ']', '{', '}', ',', '.', ';', ':', '!', '?'];

/// Distinctive word set of a card's oracle text. A card without oracle
/// text (e.g. a vanilla creature or an unfetched face) yields an empty set.
pub fn tokenize(card: &Card) -> HashSet<String> {
    match card.oracle_text.as_deref() {
        Some(text) => tokenize_text(text),
        None => HashSet::new(),
    }
}

fn tokenize_text(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .replace(PUNCTUATION, " ")
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
        .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
        .filter(|t| !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_with_text(text: &str) -> Card {
        Card {
            oracle_text: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn keeps_distinctive_words_only() {
        let tokens = tokenize(&card_with_text(
            "Whenever an opponent casts a spell, draw a card.",
        ));
        assert!(tokens.contains("casts"));
        assert!(tokens.contains("draw"));
        assert!(!tokens.contains("whenever"));
        assert!(!tokens.contains("spell"));
        assert!(!tokens.contains("card"));
    }

    #[test]
    fn drops_short_and_numeric_tokens() {
        let tokens = tokenize(&card_with_text("Add {C}{C}. Pay 2 life: draw two 100 cards."));
        assert!(!tokens.contains("pay"));
        assert!(!tokens.contains("100"));
        assert!(tokens.contains("draw"));
        assert!(tokens.contains("life"));
    }

    #[test]
    fn punctuation_splits_tokens() {
        let tokens = tokenize(&card_with_text("Flying, vigilance; destroy(exile)"));
        assert!(tokens.contains("flying"));
        assert!(tokens.contains("vigilance"));
        assert!(tokens.contains("destroy"));
        assert!(tokens.contains("exile"));
    }

    #[test]
    fn duplicates_collapse() {
        let tokens = tokenize(&card_with_text("Destroy, destroy, DESTROY."));
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn missing_oracle_text_is_empty() {
        assert!(tokenize(&Card::default()).is_empty());
    }
}
