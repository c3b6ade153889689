use crate::batch::DownloadRecord;
use gstgrab_scraper::sanitize_component;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Column headers of the exported result table.
pub const EXPORT_HEADERS: [&str; 4] = ["Category", "Title", "PDF Link", "File Path"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "tsv" => Some(ExportFormat::Tsv),
            _ => None,
        }
    }

    pub fn separator(self) -> char {
        match self {
            ExportFormat::Csv => ',',
            ExportFormat::Tsv => '\t',
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
        }
    }
}

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single delimited row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, "{}", sep)?;
        } else {
            first = false;
        }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

fn record_row(record: &DownloadRecord) -> Vec<String> {
    vec![
        record.category.clone(),
        record.title.clone(),
        record.url.clone(),
        record.path_cell(),
    ]
}

/// Create the full export string, header row included.
pub fn to_export_string(records: &[DownloadRecord], format: ExportFormat) -> String {
    let sep = format.separator();
    let mut buf: Vec<u8> = Vec::new();

    let headers: Vec<String> = EXPORT_HEADERS.iter().map(|h| h.to_string()).collect();
    let _ = write_row(&mut buf, &headers, sep);
    for record in records {
        let _ = write_row(&mut buf, &record_row(record), sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

/// Default artifact path: the sanitized category label plus the format
/// extension, in the current directory.
pub fn default_export_path(category: &str, format: ExportFormat) -> PathBuf {
    PathBuf::from(format!(
        "{}.{}",
        sanitize_component(category),
        format.extension()
    ))
}

pub fn save_export(content: &str, path: &Path) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
