//! Ingredient line splitting.
//!
//! Splits raw ingredient strings ("500 g Mehl") into a leading
//! quantity/unit phrase and the trailing name. Used both for JSON-LD
//! ingredient lists and for the chefkoch list-item scraper.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Ingredient;

/// Quantity (integer, decimal with comma or dot, or fraction),
/// optionally followed by a unit word. Unit alternatives are ordered
/// longest first so "Liter" wins over "l"; the mandatory whitespace
/// before the name keeps partial words ("3 Eier") from matching a unit.
static AMOUNT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*((?:\d+(?:[.,]\d+)?(?:\s*/\s*\d+)?|[½⅓¼¾⅔⅛])(?:\s*(?:Milliliter|Kilogramm|Gramm|Liter|Essl(?:ö|oe)ffel|Teel(?:ö|oe)ffel|Messerspitzen?|Packungen?|Päckchen|Handvoll|Scheiben?|Tropfen|Blätter|Würfel|Becher|Tassen?|Prisen?|Stück|Dosen?|Zehen?|Gläser|Glas|Blatt|Bund|Pck\.?|Msp\.?|EL|TL|kg|mg|ml|cl|g|l|n\.\s?B\.)\.?)?|n\.\s?B\.)\s+(\S.*)$",
    )
    .expect("Invalid ingredient amount regex")
});

/// Split one ingredient line into amount and name.
///
/// Lines without a recognizable leading quantity come back whole as the
/// name, with an empty amount.
pub fn split_ingredient_line(line: &str) -> Ingredient {
    let line = line.trim();
    if let Some(cap) = AMOUNT_REGEX.captures(line) {
        let amount = cap.get(1).map(|m| m.as_str().trim()).unwrap_or("");
        let name = cap.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        if !name.is_empty() {
            return Ingredient {
                name: name.to_string(),
                amount: amount.to_string(),
            };
        }
    }
    Ingredient {
        name: line.to_string(),
        amount: String::new(),
    }
}
