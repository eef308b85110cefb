//! Site-specific HTML extractors.
//!
//! Structured data on the big German recipe portals is often incomplete:
//! gallery images stay out of the JSON-LD, tabular ingredient lists
//! aren't mirrored into it, and some templates omit it entirely. A small
//! set of per-site scrapers recovers what the structured-data extractor
//! misses; the merge policy combines both results.

mod chefkoch;
mod kochbar;

use std::sync::LazyLock;

use regex::Regex;

use crate::types::SiteRecipe;

pub use chefkoch::Chefkoch;
pub use kochbar::Kochbar;

/// A heuristic scraper for one family of recipe pages.
///
/// Implementations never fail; fields they can't recover stay empty so
/// the merge policy can tell "not found" from "found".
pub trait SiteExtractor: Send + Sync {
    /// Whether this extractor handles the given request host.
    fn matches(&self, host: &str) -> bool;

    /// Best-effort extraction over the raw page markup.
    fn extract(&self, html: &str) -> SiteRecipe;
}

/// Supported site families, consulted in order.
static SITE_EXTRACTORS: &[&dyn SiteExtractor] = &[&Kochbar, &Chefkoch];

/// Find the extractor responsible for a request host, if any.
pub fn find_extractor(host: &str) -> Option<&'static dyn SiteExtractor> {
    SITE_EXTRACTORS.iter().copied().find(|e| e.matches(host))
}

/// Regex to strip HTML tags from extracted fragments.
static HTML_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Invalid HTML tag regex"));

static BR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("Invalid br regex"));

static PARAGRAPH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</p>\s*<p(?:\s[^>]*)?>|</p>|<p(?:\s[^>]*)?>").expect("Invalid paragraph regex")
});

static LINE_EDGE_WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*\n[ \t]*").expect("Invalid line whitespace regex"));

static EXCESS_NEWLINES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("Invalid newline collapse regex"));

static H1_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").expect("Invalid h1 regex"));

/// Convert an HTML fragment to plain text: `<br>` to newlines, paragraph
/// boundaries to blank lines, remaining tags stripped, entities decoded,
/// runs of 3+ newlines collapsed to exactly 2.
pub(crate) fn fragment_to_text(fragment: &str) -> String {
    let text = BR_REGEX.replace_all(fragment, "\n");
    let text = PARAGRAPH_REGEX.replace_all(&text, "\n\n");
    let text = HTML_TAG_REGEX.replace_all(&text, "");
    let text = decode_entities(&text);
    let text = LINE_EDGE_WHITESPACE_REGEX.replace_all(&text, "\n");
    let text = EXCESS_NEWLINES_REGEX.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Decode the entities that actually show up in German recipe markup.
pub(crate) fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#8217;", "\u{2019}")
        .replace("&#038;", "&")
        .replace("&auml;", "ä")
        .replace("&ouml;", "ö")
        .replace("&uuml;", "ü")
        .replace("&Auml;", "Ä")
        .replace("&Ouml;", "Ö")
        .replace("&Uuml;", "Ü")
        .replace("&szlig;", "ß")
}

/// First level-1 heading of the page, tags stripped.
pub(crate) fn first_heading(html: &str) -> Option<String> {
    let cap = H1_REGEX.captures(html)?;
    let text = HTML_TAG_REGEX.replace_all(cap.get(1)?.as_str(), "");
    let text = decode_entities(&text);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
