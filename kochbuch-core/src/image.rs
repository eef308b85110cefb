//! Image acquisition: turning discovered image URLs into embedded data
//! URIs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::http::HttpClient;

/// Upper bound on a fetched image (5 MB).
pub const MAX_IMAGE_BYTES: usize = 5_000_000;

/// Anything smaller is a broken or placeholder image.
pub const MIN_IMAGE_BYTES: usize = 1000;

/// How many images a single import will fetch.
pub const MAX_IMAGES_PER_IMPORT: usize = 5;

/// Fetch at most `max_count` of the given URLs, in order, and encode
/// each as a `data:` URI. Entries already in embedded form pass through
/// unchanged; every per-image failure is logged and skipped, never
/// surfaced.
///
/// Fetches run strictly one at a time: imports hit third-party sites,
/// and a recipe gallery is not worth a request burst.
pub async fn acquire_images<C: HttpClient>(
    client: &C,
    urls: &[String],
    max_count: usize,
) -> Vec<String> {
    let mut acquired = Vec::new();

    for url in urls.iter().take(max_count) {
        if url.starts_with("data:") {
            acquired.push(url.clone());
            continue;
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            tracing::debug!(url = %url, "skipping non-http image URL");
            continue;
        }

        let image = match client.fetch_image(url).await {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "failed to fetch image");
                continue;
            }
        };

        if image.data.len() > MAX_IMAGE_BYTES {
            tracing::warn!(url = %url, bytes = image.data.len(), "image too large, skipping");
            continue;
        }
        if image.data.len() < MIN_IMAGE_BYTES {
            tracing::debug!(url = %url, bytes = image.data.len(), "image too small, likely a placeholder");
            continue;
        }

        acquired.push(format!(
            "data:{};base64,{}",
            content_type_or_default(image.content_type.as_deref()),
            STANDARD.encode(&image.data)
        ));
    }

    acquired
}

/// Content type from the response header; `image/jpeg` when the header
/// is absent or doesn't declare an image type.
fn content_type_or_default(header: Option<&str>) -> String {
    header
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .filter(|ct| ct.starts_with("image/"))
        .map(String::from)
        .unwrap_or_else(|| "image/jpeg".to_string())
}
