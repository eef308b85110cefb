//! Title cleanup for scraped recipe names.

use std::sync::LazyLock;

use regex::Regex;

/// Trailing "von <author>" credit, as appended by several recipe portals.
static AUTHOR_SUFFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+von\s+\S+\s*$").expect("Invalid author suffix regex"));

/// Strip a trailing "von <author>" credit from a recipe title.
///
/// Only the end of the string is touched; internal occurrences of "von"
/// stay. Stripping repeats until stable so cleaning is idempotent.
pub fn clean_title(input: &str) -> String {
    if input.is_empty() {
        return input.to_string();
    }
    let mut title = input.trim().to_string();
    loop {
        let stripped = AUTHOR_SUFFIX_REGEX.replace(&title, "").trim().to_string();
        if stripped == title {
            return title;
        }
        title = stripped;
    }
}
