use std::sync::LazyLock;

use regex::Regex;

/// Trailing foil marker: `Sol Ring *F*`.
static FOIL_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\*F\*\s*$").expect("invalid regex"));

/// Trailing bare integer, usually a collector number or a duplicated
/// quantity left over by deck exporters: `Lightning Bolt 141`.
static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\d+\s*$").expect("invalid regex"));

/// Trailing parenthesized set code, 2-6 alphanumerics: `Sol Ring (C21)`.
static SET_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\([A-Z0-9]{2,6}\)\s*$").expect("invalid regex"));

/// Strip decklist-export noise from the end of a raw card name.
///
/// Applied in order, each strip optional: foil marker, bare collector
/// number, parenthesized set code. A name without any of them passes
/// through untouched.
///
/// # Example
/// ```
/// use migawari_parse::clean_card_name;
/// assert_eq!(clean_card_name("Sol Ring (C21) 333 *F*"), "Sol Ring");
/// assert_eq!(clean_card_name("Swords to Plowshares"), "Swords to Plowshares");
/// ```
pub fn clean_card_name(raw: &str) -> String {
    let name = raw.trim();
    let name = FOIL_MARKER.replace(name, "");
    let name = TRAILING_NUMBER.replace(name.trim(), "");
    let name = SET_CODE.replace(name.trim(), "");
    name.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name_untouched() {
        assert_eq!(clean_card_name("Swords to Plowshares"), "Swords to Plowshares");
    }

    #[test]
    fn strips_foil_marker() {
        assert_eq!(clean_card_name("Sol Ring *F*"), "Sol Ring");
        assert_eq!(clean_card_name("Sol Ring *f*"), "Sol Ring");
    }

    #[test]
    fn strips_collector_number() {
        assert_eq!(clean_card_name("Lightning Bolt 141"), "Lightning Bolt");
    }

    #[test]
    fn strips_set_code() {
        assert_eq!(clean_card_name("Sol Ring (C21)"), "Sol Ring");
        assert_eq!(clean_card_name("Sol Ring (commander)"), "Sol Ring (commander)");
    }

    #[test]
    fn strips_all_three_in_order() {
        assert_eq!(clean_card_name("Sol Ring (C21) 333 *F*"), "Sol Ring");
    }

    #[test]
    fn keeps_numbers_inside_name() {
        assert_eq!(clean_card_name("Borrowing 100,000 Arrows"), "Borrowing 100,000 Arrows");
    }

    #[test]
    fn idempotent() {
        for raw in [
            "Sol Ring (C21) 333 *F*",
            "Lightning Bolt 141",
            "Sol Ring *F*",
            "Arcane Signet (CMR)",
            "Swords to Plowshares",
            "",
            "   padded   ",
        ] {
            let once = clean_card_name(raw);
            assert_eq!(clean_card_name(&once), once, "not idempotent for {raw:?}");
        }
    }
}
