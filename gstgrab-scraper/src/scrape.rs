use crate::error::{FetchError, Result};
use crate::record::DocumentLink;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Fixed identifying header sent with every outbound request.
pub const USER_AGENT: &str = "Mozilla/5.0";

/// Substring a link target must contain (case-insensitively) to qualify.
pub const DOCUMENT_MARKER: &str = ".pdf";

pub const DEFAULT_PAGE_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(20);

/// Scrapes publication pages for document links and fetches the documents.
///
/// Both network operations are bounded: the page fetch by `page_timeout`,
/// each document fetch by `download_timeout`.
pub struct Scraper {
    pub(crate) client: Client,
    pub(crate) page_timeout: Duration,
    pub(crate) download_timeout: Duration,
}

impl Scraper {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            page_timeout: DEFAULT_PAGE_TIMEOUT,
            download_timeout: DEFAULT_DOWNLOAD_TIMEOUT,
        }
    }

    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = timeout;
        self
    }

    pub fn with_download_timeout(mut self, timeout: Duration) -> Self {
        self.download_timeout = timeout;
        self
    }

    /// Fetch `page_url` and return every qualifying document link in
    /// document order. Duplicates are preserved; a page with no matches
    /// yields an empty list, not an error.
    pub async fn scrape_document_links(&self, page_url: &str) -> Result<Vec<DocumentLink>> {
        let base = Url::parse(page_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", page_url, e)))?;

        debug!("Fetching page {}", base);
        let response = self
            .client
            .get(base.clone())
            .timeout(self.page_timeout)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        let links = extract_document_links(&body, &base);
        info!("Found {} document links on {}", links.len(), base);
        Ok(links)
    }
}

impl Default for Scraper {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan markup for anchors whose target contains the document marker.
///
/// The anchor's visible text becomes the title, falling back to the last
/// path segment of the raw href when the text is empty. Targets are
/// resolved against `base` per standard URL-resolution rules.
pub fn extract_document_links(html: &str, base: &Url) -> Vec<DocumentLink> {
    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").unwrap();

    let mut links = Vec::new();
    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !href.to_lowercase().contains(DOCUMENT_MARKER) {
            continue;
        }

        let absolute = match base.join(href) {
            Ok(url) => url,
            Err(e) => {
                debug!("Skipping unresolvable href {}: {}", href, e);
                continue;
            }
        };

        let text = element.text().collect::<String>();
        let title = match text.trim() {
            "" => trailing_segment(href).to_string(),
            visible => visible.to_string(),
        };

        links.push(DocumentLink {
            title,
            url: absolute.to_string(),
        });
    }
    links
}

fn trailing_segment(href: &str) -> &str {
    href.rsplit('/').next().unwrap_or(href)
}
