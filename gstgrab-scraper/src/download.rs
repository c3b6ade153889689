use crate::error::Result;
use crate::record::FetchOutcome;
use crate::scrape::Scraper;
use std::path::Path;
use tracing::{debug, info, warn};

/// Extension appended to every sanitized filename.
pub const DOCUMENT_EXT: &str = ".pdf";

/// Longest sanitized name kept before the extension is appended.
pub const MAX_NAME_LEN: usize = 150;

/// Turn a display name into a filesystem-safe component: every character
/// outside {word characters, hyphen, period, parentheses} becomes an
/// underscore, and the result is capped at `MAX_NAME_LEN` characters.
pub fn sanitize_component(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '(' | ')') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_LEN)
        .collect()
}

impl Scraper {
    /// Fetch `url` into `dir` under a sanitized `title`-based filename.
    ///
    /// A file already at the computed path short-circuits the network call
    /// entirely unless `force` is set. Every failure is funneled into
    /// `FetchOutcome::Failed` so the caller's batch keeps going.
    pub async fn download_document(
        &self,
        title: &str,
        url: &str,
        dir: &Path,
        force: bool,
    ) -> FetchOutcome {
        if let Err(e) = tokio::fs::create_dir_all(dir).await {
            return FetchOutcome::Failed {
                reason: format!("create {}: {}", dir.display(), e),
            };
        }

        let path = dir.join(format!("{}{}", sanitize_component(title), DOCUMENT_EXT));
        if !force && path.exists() {
            debug!("{} already present, skipping fetch", path.display());
            return FetchOutcome::Saved {
                path,
                already_present: true,
            };
        }

        let payload = match self.fetch_document_bytes(url).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Download failed for {}: {}", url, e);
                return FetchOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        match tokio::fs::write(&path, &payload).await {
            Ok(()) => {
                info!("Saved {} ({} bytes)", path.display(), payload.len());
                FetchOutcome::Saved {
                    path,
                    already_present: false,
                }
            }
            Err(e) => {
                warn!("Write failed for {}: {}", path.display(), e);
                FetchOutcome::Failed {
                    reason: format!("write {}: {}", path.display(), e),
                }
            }
        }
    }

    async fn fetch_document_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .timeout(self.download_timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[test]
    fn sanitize_replaces_unsafe_characters() {
        assert_eq!(
            sanitize_component("Rate Notification 12/2024 (Amended)"),
            "Rate_Notification_12_2024_(Amended)"
        );
    }

    #[test]
    fn sanitize_keeps_word_chars_hyphen_period_parens() {
        assert_eq!(sanitize_component("a-b.c_(d)9"), "a-b.c_(d)9");
    }

    #[test]
    fn sanitize_caps_length_at_150() {
        let long = "x".repeat(400);
        assert_eq!(sanitize_component(&long).chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn sanitized_output_only_contains_safe_characters() {
        let sanitized = sanitize_component("a b\\c:d*e?\"f<g>h|i\ttrail");
        assert!(
            sanitized
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '(' | ')'))
        );
    }

    #[tokio::test]
    async fn downloads_and_writes_the_payload() {
        let mock_server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/a.pdf"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/pdf")
                    .set_body_bytes(b"%PDF-1.4 fake".as_slice()),
            )
            .mount(&mock_server)
            .await;

        let scraper = Scraper::new();
        let outcome = scraper
            .download_document(
                "Report A",
                &format!("{}/a.pdf", mock_server.uri()),
                dir.path(),
                false,
            )
            .await;

        match outcome {
            FetchOutcome::Saved {
                path,
                already_present,
            } => {
                assert!(!already_present);
                assert_eq!(path, dir.path().join("Report_A.pdf"));
                assert_eq!(std::fs::read(path).unwrap(), b"%PDF-1.4 fake");
            }
            FetchOutcome::Failed { reason } => panic!("expected success, got: {}", reason),
        }
    }

    #[tokio::test]
    async fn existing_file_short_circuits_the_network() {
        let mock_server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        // The server must see exactly one request across both calls.
        Mock::given(method("GET"))
            .and(path("/a.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"payload".as_slice()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = format!("{}/a.pdf", mock_server.uri());
        let scraper = Scraper::new();

        let first = scraper
            .download_document("Report A", &url, dir.path(), false)
            .await;
        let second = scraper
            .download_document("Report A", &url, dir.path(), false)
            .await;

        let first_path = first.path().expect("first call should save").to_owned();
        match second {
            FetchOutcome::Saved {
                path,
                already_present,
            } => {
                assert!(already_present);
                assert_eq!(path, first_path);
            }
            FetchOutcome::Failed { reason } => panic!("expected skip, got: {}", reason),
        }
    }

    #[tokio::test]
    async fn force_refetches_an_existing_file() {
        let mock_server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/a.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"v2".as_slice()))
            .expect(2)
            .mount(&mock_server)
            .await;

        let url = format!("{}/a.pdf", mock_server.uri());
        let scraper = Scraper::new();

        scraper
            .download_document("Report A", &url, dir.path(), false)
            .await;
        let outcome = scraper
            .download_document("Report A", &url, dir.path(), true)
            .await;

        assert!(matches!(
            outcome,
            FetchOutcome::Saved {
                already_present: false,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn error_status_becomes_a_failed_outcome() {
        let mock_server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/gone.pdf"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let scraper = Scraper::new();
        let outcome = scraper
            .download_document(
                "Gone",
                &format!("{}/gone.pdf", mock_server.uri()),
                dir.path(),
                false,
            )
            .await;

        match outcome {
            FetchOutcome::Failed { reason } => assert!(reason.contains("404")),
            FetchOutcome::Saved { path, .. } => {
                panic!("expected failure, saved {}", path.display())
            }
        }
        assert!(!dir.path().join("Gone.pdf").exists());
    }

    #[tokio::test]
    async fn destination_folder_is_created_on_demand() {
        let mock_server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("Central_GST");

        Mock::given(method("GET"))
            .and(path("/a.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok".as_slice()))
            .mount(&mock_server)
            .await;

        let scraper = Scraper::new();
        let outcome = scraper
            .download_document(
                "a.pdf",
                &format!("{}/a.pdf", mock_server.uri()),
                &nested,
                false,
            )
            .await;

        assert!(outcome.is_saved());
        assert!(nested.join("a.pdf.pdf").exists());
    }
}
