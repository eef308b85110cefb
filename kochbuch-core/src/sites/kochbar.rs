//! kochbar.de extraction.
//!
//! Kochbar pages carry a JSON-LD Recipe but list only the lead photo in
//! it; the rest of the user-submitted gallery exists solely in the
//! markup. This extractor's main job is mining those image URLs.

use std::sync::LazyLock;

use regex::Regex;

use super::{first_heading, SiteExtractor};
use crate::merge::dedup_preserving_order;
use crate::title::clean_title;
use crate::types::SiteRecipe;

static AMP_IMG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<amp-img[^>]*\bsrc\s*=\s*["']([^"']+)["']"#).expect("Invalid amp-img regex")
});

static IMG_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<img[^>]*\bsrc\s*=\s*["']([^"']+)["']"#).expect("Invalid img regex")
});

static QUOTED_IMAGE_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["'](https?://[^"']+?\.(?:jpe?g|png|webp))["']"#)
        .expect("Invalid quoted image URL regex")
});

/// Scaled-down variants carry their pixel size in the path ("-160x120").
static THUMB_SIZE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{2,3}x\d{2,3}\b").expect("Invalid thumb size regex"));

pub struct Kochbar;

impl SiteExtractor for Kochbar {
    fn matches(&self, host: &str) -> bool {
        host.contains("kochbar")
    }

    fn extract(&self, html: &str) -> SiteRecipe {
        SiteRecipe {
            title: first_heading(html).map(|t| clean_title(&t)),
            images: extract_gallery_images(html),
            ..SiteRecipe::default()
        }
    }
}

/// Three independent passes over the raw markup: amp-img tags (mobile
/// template), plain img tags, and quoted image URLs from inline
/// slideshow scripts. The third pass skips thumbnail variants.
fn extract_gallery_images(html: &str) -> Vec<String> {
    let mut urls = Vec::new();

    for cap in AMP_IMG_REGEX.captures_iter(html) {
        if let Some(url) = cap.get(1) {
            if is_content_image(url.as_str()) {
                urls.push(url.as_str().to_string());
            }
        }
    }

    for cap in IMG_TAG_REGEX.captures_iter(html) {
        if let Some(url) = cap.get(1) {
            if is_content_image(url.as_str()) {
                urls.push(url.as_str().to_string());
            }
        }
    }

    for cap in QUOTED_IMAGE_URL_REGEX.captures_iter(html) {
        if let Some(url) = cap.get(1) {
            if is_content_image(url.as_str()) && !looks_like_thumbnail(url.as_str()) {
                urls.push(url.as_str().to_string());
            }
        }
    }

    dedup_preserving_order(urls)
}

fn is_content_image(url: &str) -> bool {
    url.contains("kochbar")
}

fn looks_like_thumbnail(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.contains("thumb") || THUMB_SIZE_REGEX.is_match(&lower)
}
