use gstgrab_scraper::{FetchError, FetchOutcome, Scraper, sanitize_component};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Options for one fetch batch.
pub struct BatchOptions {
    pub category: String,
    pub page_url: String,
    pub download_root: PathBuf,
    pub force_refresh: bool,
    pub show_progress: bool,
}

/// Callback for reporting per-document progress: (done, total, title).
pub type BatchProgressCallback = Arc<dyn Fn(usize, usize, &str) + Send + Sync>;

/// Rendered in place of a path when a download did not succeed.
pub const FAILED_SENTINEL: &str = "Failed";

/// One row of the session's result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRecord {
    pub category: String,
    pub title: String,
    pub url: String,
    pub outcome: FetchOutcome,
}

impl DownloadRecord {
    /// The table/export cell: a real path or the failure sentinel.
    pub fn path_cell(&self) -> String {
        match &self.outcome {
            FetchOutcome::Saved { path, .. } => path.display().to_string(),
            FetchOutcome::Failed { .. } => FAILED_SENTINEL.to_string(),
        }
    }
}

/// Fetch every document linked from the category's page, sequentially and
/// in extraction order.
///
/// A page-level failure aborts before any downloads are attempted.
/// Individual download failures are recorded and skipped over; one record
/// is appended per link regardless of outcome.
pub async fn run_batch(
    scraper: &Scraper,
    options: &BatchOptions,
    progress: Option<BatchProgressCallback>,
) -> Result<Vec<DownloadRecord>, FetchError> {
    let links = scraper.scrape_document_links(&options.page_url).await?;

    let folder = options
        .download_root
        .join(sanitize_component(&options.category));

    let bar = if options.show_progress && !links.is_empty() {
        let pb = ProgressBar::new(links.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap(),
        );
        Some(pb)
    } else {
        None
    };

    let mut records = Vec::with_capacity(links.len());
    for (idx, link) in links.iter().enumerate() {
        if let Some(ref pb) = bar {
            pb.set_message(link.title.clone());
        }
        if let Some(ref callback) = progress {
            callback(idx + 1, links.len(), &link.title);
        }

        let outcome = scraper
            .download_document(&link.title, &link.url, &folder, options.force_refresh)
            .await;

        records.push(DownloadRecord {
            category: options.category.clone(),
            title: link.title.clone(),
            url: link.url.clone(),
            outcome,
        });

        if let Some(ref pb) = bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = bar {
        pb.finish_and_clear();
    }

    Ok(records)
}
