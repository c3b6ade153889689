use crate::batch::{DownloadRecord, FAILED_SENTINEL};
use gstgrab_scraper::FetchOutcome;

/// Build the terminal result table for one completed batch.
pub fn generate_fetch_report(category: &str, records: &[DownloadRecord]) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str(&format!("Fetched {} PDFs for {}\n\n", records.len(), category));

    let downloaded = records
        .iter()
        .filter(|r| {
            matches!(
                r.outcome,
                FetchOutcome::Saved {
                    already_present: false,
                    ..
                }
            )
        })
        .count();
    let already_present = records
        .iter()
        .filter(|r| {
            matches!(
                r.outcome,
                FetchOutcome::Saved {
                    already_present: true,
                    ..
                }
            )
        })
        .count();
    let failed = records.iter().filter(|r| !r.outcome.is_saved()).count();

    report.push_str(&format!("  Downloaded:      {}\n", downloaded));
    report.push_str(&format!("  Already present: {}\n", already_present));
    report.push_str(&format!("  Failed:          {}\n", failed));

    if records.is_empty() {
        return report;
    }

    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    for record in records {
        let (mark, cell) = match &record.outcome {
            FetchOutcome::Saved {
                path,
                already_present: false,
            } => ("\x1b[32m✓\x1b[0m", path.display().to_string()),
            FetchOutcome::Saved {
                path,
                already_present: true,
            } => ("\x1b[36m=\x1b[0m", path.display().to_string()),
            FetchOutcome::Failed { .. } => ("\x1b[31m✗\x1b[0m", FAILED_SENTINEL.to_string()),
        };
        report.push_str(&format!("  {} {}\n      {}\n", mark, record.title, cell));
    }

    report
}
