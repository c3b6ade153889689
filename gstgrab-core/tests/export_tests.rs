// Tests for result-table export

use gstgrab_core::batch::DownloadRecord;
use gstgrab_core::export::{
    EXPORT_HEADERS, ExportFormat, default_export_path, save_export, to_export_string, write_row,
};
use gstgrab_scraper::FetchOutcome;
use std::path::PathBuf;

fn saved(category: &str, title: &str, url: &str, path: &str) -> DownloadRecord {
    DownloadRecord {
        category: category.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        outcome: FetchOutcome::Saved {
            path: PathBuf::from(path),
            already_present: false,
        },
    }
}

fn failed(category: &str, title: &str, url: &str) -> DownloadRecord {
    DownloadRecord {
        category: category.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        outcome: FetchOutcome::Failed {
            reason: "HTTP status server error (502 Bad Gateway)".to_string(),
        },
    }
}

#[test]
fn format_parsing_is_case_insensitive() {
    assert_eq!(ExportFormat::from_str("csv"), Some(ExportFormat::Csv));
    assert_eq!(ExportFormat::from_str("TSV"), Some(ExportFormat::Tsv));
    assert_eq!(ExportFormat::from_str("xlsx"), None);
}

#[test]
fn format_separator_and_extension() {
    assert_eq!(ExportFormat::Csv.separator(), ',');
    assert_eq!(ExportFormat::Csv.extension(), "csv");
    assert_eq!(ExportFormat::Tsv.separator(), '\t');
    assert_eq!(ExportFormat::Tsv.extension(), "tsv");
}

#[test]
fn export_starts_with_the_header_row() {
    let out = to_export_string(&[], ExportFormat::Csv);
    assert_eq!(out, "Category,Title,PDF Link,File Path\n");
    assert_eq!(EXPORT_HEADERS.len(), 4);
}

#[test]
fn one_line_per_record_after_the_header() {
    let records = vec![
        saved("Central GST", "Report A", "https://x/a.pdf", "root/a.pdf"),
        failed("Central GST", "Report B", "https://x/b.pdf"),
    ];
    let out = to_export_string(&records, ExportFormat::Csv);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "Central GST,Report A,https://x/a.pdf,root/a.pdf");
    assert_eq!(lines[2], "Central GST,Report B,https://x/b.pdf,Failed");
}

#[test]
fn separator_characters_in_cells_are_quoted() {
    let records = vec![saved(
        "Central GST",
        "Notification, No. 12/2024",
        "https://x/a.pdf",
        "root/a.pdf",
    )];

    let csv = to_export_string(&records, ExportFormat::Csv);
    assert!(csv.contains("\"Notification, No. 12/2024\""));

    // The comma needs no quoting under a tab separator.
    let tsv = to_export_string(&records, ExportFormat::Tsv);
    assert!(tsv.contains("Notification, No. 12/2024"));
    assert!(!tsv.contains('"'));
}

#[test]
fn quotes_are_doubled_inside_quoted_cells() {
    let mut buf: Vec<u8> = Vec::new();
    write_row(
        &mut buf,
        &["say \"hello\"".to_string(), "plain".to_string()],
        ',',
    )
    .unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "\"say \"\"hello\"\"\",plain\n");
}

#[test]
fn newlines_in_cells_are_quoted() {
    let mut buf: Vec<u8> = Vec::new();
    write_row(&mut buf, &["two\nlines".to_string()], '\t').unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "\"two\nlines\"\n");
}

#[test]
fn default_path_is_the_sanitized_category_label() {
    assert_eq!(
        default_export_path("GST Press Release", ExportFormat::Csv),
        PathBuf::from("GST_Press_Release.csv")
    );
    assert_eq!(
        default_export_path("Compensation to States", ExportFormat::Tsv),
        PathBuf::from("Compensation_to_States.tsv")
    );
}

#[test]
fn save_export_writes_the_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    let records = vec![saved("C", "T", "U", "P")];
    let content = to_export_string(&records, ExportFormat::Csv);

    save_export(&content, &path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
}
