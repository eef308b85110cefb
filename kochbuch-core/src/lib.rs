pub mod error;
pub mod extract;
pub mod http;
pub mod image;
pub mod import;
pub mod ingredient;
pub mod merge;
pub mod sites;
pub mod time;
pub mod title;
pub mod types;

pub use error::{FetchError, ImportError};
pub use extract::extract_structured_data;
pub use http::{FetchedImage, HttpClient, MockClient, MockResponse, WebClient, WebClientBuilder};
pub use image::{acquire_images, MAX_IMAGES_PER_IMPORT, MAX_IMAGE_BYTES, MIN_IMAGE_BYTES};
pub use import::{import_from_url, FALLBACK_TITLE};
pub use merge::{dedup_preserving_order, merge_site_data};
pub use sites::{find_extractor, SiteExtractor};
pub use time::parse_minutes;
pub use title::clean_title;
pub use types::{ExtractedRecipe, ImportedRecipe, Ingredient, SiteRecipe};
