pub mod extract;
pub mod fetch;
pub mod normalize;

pub use extract::{decode_html_entities, parse_og_metadata};
pub use fetch::{FetchError, FetcherConfig, MetadataFetcher, BOT_USER_AGENT, BROWSER_USER_AGENT};
pub use normalize::{normalize_url, ScrapeTarget, DEFAULT_MIRROR_HOST};
