pub mod download;
pub mod error;
pub mod record;
pub mod scrape;

pub use download::sanitize_component;
pub use error::FetchError;
pub use record::{DocumentLink, FetchOutcome};
pub use scrape::Scraper;
