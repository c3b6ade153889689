use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Built-in category table: label → publication page.
pub const BUILTIN_CATEGORIES: &[(&str, &str)] = &[
    (
        "Central GST",
        "https://idtc.icai.org/gst_new.php?gst_type=CENTRAL+GOODS+AND+SERVICES+TAX",
    ),
    (
        "Integrated GST",
        "https://idtc.icai.org/gst_new.php?gst_type=INTEGRATED+GOODS+AND+SERVICES+TAX",
    ),
    (
        "Union Territory GST",
        "https://idtc.icai.org/gst_new.php?gst_type=UNION+TERRITORY+GOODS+AND+SERVICES+TAX",
    ),
    (
        "Compensation to States",
        "https://idtc.icai.org/gst_new.php?gst_type=GOODS+AND+SERVICES+TAX+%28COMPENSATION+TO+STATES%29",
    ),
    (
        "GST Council Minutes",
        "https://idtc.icai.org/minutes-gst.php?gst_type=MINUTES+OF+GST+COUNCIL+MEETINGS",
    ),
    ("GST Press Release", "https://idtc.icai.org/press_release.php"),
    ("GSTN Advisory", "https://idtc.icai.org/gstn-advisory.php"),
    ("State GST Websites", "https://idtc.icai.org/state-gst.php"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    pub page_url: String,
}

/// Read-only mapping of category label → source page URL, fixed for the
/// lifetime of the process.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    pub fn builtin() -> Self {
        let categories = BUILTIN_CATEGORIES
            .iter()
            .map(|(label, page_url)| Category {
                label: (*label).to_string(),
                page_url: (*page_url).to_string(),
            })
            .collect();
        Self { categories }
    }

    /// Load a replacement category table from a JSON file of
    /// `[{"label": ..., "page_url": ...}, ...]` entries.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read categories file {}: {}", path.display(), e))?;

        let categories: Vec<Category> = serde_json::from_str(&content)
            .map_err(|e| format!("Invalid categories file {}: {}", path.display(), e))?;

        if categories.is_empty() {
            return Err(format!("No categories found in {}", path.display()));
        }

        Ok(Self { categories })
    }

    pub fn find(&self, label: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.label.eq_ignore_ascii_case(label))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
