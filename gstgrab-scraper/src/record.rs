use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One qualifying hyperlink found on a publication page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLink {
    pub title: String,
    pub url: String,
}

/// Outcome of a single document fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchOutcome {
    /// The file is on disk, freshly downloaded or found already in place.
    Saved {
        path: PathBuf,
        already_present: bool,
    },
    /// The fetch did not succeed; the batch carries on without it.
    Failed { reason: String },
}

impl FetchOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, FetchOutcome::Saved { .. })
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            FetchOutcome::Saved { path, .. } => Some(path),
            FetchOutcome::Failed { .. } => None,
        }
    }
}
