use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::name::clean_card_name;

/// One line of a decklist: `3x Sol Ring` -> quantity 3, name "Sol Ring".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecklistEntry {
    pub quantity: u32,
    pub name: String,
    /// The original line, kept for reporting.
    pub raw_line: String,
}

/// Leading quantity with optional `x` suffix: `3 Sol Ring`, `3x Sol Ring`.
static QUANTITY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)\s*x?\s+(.+)$").expect("invalid regex"));

/// Parse decklist text into entries, preserving input order.
///
/// Blank lines and comment lines (`#` or `//`) are skipped. A line without
/// a leading quantity is taken whole as a name with quantity 1. Duplicate
/// names are never merged; each line stays its own entry.
pub fn parse_decklist(text: &str) -> Vec<DecklistEntry> {
    let entries: Vec<DecklistEntry> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with('#') && !line.starts_with("//"))
        .map(|line| match parse_line(line) {
            Some(entry) => entry,
            None => DecklistEntry {
                quantity: 1,
                name: clean_card_name(line),
                raw_line: line.to_string(),
            },
        })
        .collect();

    tracing::debug!(entries = entries.len(), "Parsed decklist");
    entries
}

fn parse_line(line: &str) -> Option<DecklistEntry> {
    let caps = QUANTITY_LINE.captures(line)?;
    let quantity: u32 = caps[1].parse().ok()?;
    Some(DecklistEntry {
        quantity,
        name: clean_card_name(&caps[2]),
        raw_line: line.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantities_and_comments() {
        let entries = parse_decklist("3x Sol Ring\n# comment\n1 Arcane Signet");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].quantity, 3);
        assert_eq!(entries[0].name, "Sol Ring");
        assert_eq!(entries[1].quantity, 1);
        assert_eq!(entries[1].name, "Arcane Signet");
    }

    #[test]
    fn bare_name_defaults_to_one() {
        let entries = parse_decklist("Swords to Plowshares");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity, 1);
        assert_eq!(entries[0].name, "Swords to Plowshares");
    }

    #[test]
    fn skips_blank_and_slash_comments() {
        let entries = parse_decklist("\n  \n// sideboard\n2 Counterspell\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity, 2);
        assert_eq!(entries[0].name, "Counterspell");
    }

    #[test]
    fn crlf_line_endings() {
        let entries = parse_decklist("1 Sol Ring\r\n1 Arcane Signet\r\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name, "Arcane Signet");
    }

    #[test]
    fn duplicates_stay_separate() {
        let entries = parse_decklist("1 Sol Ring\n1 Sol Ring");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, entries[1].name);
    }

    #[test]
    fn x_suffix_and_export_noise() {
        let entries = parse_decklist("4x Lightning Bolt (M10) 141");
        assert_eq!(entries[0].quantity, 4);
        assert_eq!(entries[0].name, "Lightning Bolt");
    }

    #[test]
    fn raw_line_preserved() {
        let entries = parse_decklist("3x Sol Ring *F*");
        assert_eq!(entries[0].raw_line, "3x Sol Ring *F*");
        assert_eq!(entries[0].name, "Sol Ring");
    }
}
