use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use gstgrab_core::batch::{BatchOptions, run_batch};
use gstgrab_core::export::{ExportFormat, default_export_path, save_export, to_export_string};
use gstgrab_core::registry::{Category, CategoryRegistry};
use gstgrab_core::report::generate_fetch_report;
use gstgrab_scraper::Scraper;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Load the category registry, honoring a `--categories-file` override.
pub fn load_registry(categories_file: Option<&PathBuf>) -> Result<CategoryRegistry, String> {
    match categories_file {
        Some(path) => CategoryRegistry::from_file(path),
        None => Ok(CategoryRegistry::builtin()),
    }
}

/// Resolve the batch target from either a configured category label or an
/// arbitrary page URL (labelled after its host).
pub fn resolve_target(
    registry: &CategoryRegistry,
    category: Option<&String>,
    url: Option<&Url>,
) -> Result<Category, String> {
    if let Some(url) = url {
        return Ok(Category {
            label: url.host_str().unwrap_or("custom").to_string(),
            page_url: url.as_str().to_string(),
        });
    }
    if let Some(label) = category {
        return registry
            .find(label)
            .cloned()
            .ok_or_else(|| format!("Unknown category '{}'. Try `gstgrab categories`.", label));
    }
    Err("No category selected".to_string())
}

fn print_prompt(msg: &str) -> String {
    print!("{} ", msg.bright_cyan().bold());
    io::stdout().flush().unwrap();
    let mut response = String::new();
    io::stdin().read_line(&mut response).unwrap();
    response.trim().to_string()
}

/// Interactive selection: numbered category menu, pick by number or label.
pub fn prompt_for_category(registry: &CategoryRegistry) -> Result<Category, String> {
    println!("{}", "Select GST Category".bright_white().bold());
    for (idx, category) in registry.categories().iter().enumerate() {
        println!(
            "  {} {}",
            format!("[{}]", idx + 1).bright_cyan(),
            category.label
        );
    }

    let response = print_prompt("Category:");
    if let Ok(choice) = response.parse::<usize>() {
        if choice >= 1 && choice <= registry.len() {
            return Ok(registry.categories()[choice - 1].clone());
        }
        return Err(format!("No category numbered {}", choice));
    }
    registry
        .find(&response)
        .cloned()
        .ok_or_else(|| format!("Unknown category '{}'", response))
}

pub fn handle_categories(args: &ArgMatches) -> Result<()> {
    let registry =
        load_registry(args.get_one::<PathBuf>("categories-file")).map_err(anyhow::Error::msg)?;

    for category in registry.categories() {
        println!(
            "  {}\n      {}",
            category.label.bright_white().bold(),
            category.page_url.dimmed()
        );
    }
    Ok(())
}

pub async fn handle_fetch(args: &ArgMatches, quiet: bool) -> Result<()> {
    let registry =
        load_registry(args.get_one::<PathBuf>("categories-file")).map_err(anyhow::Error::msg)?;

    let category_arg = args.get_one::<String>("category");
    let url_arg = args.get_one::<Url>("url");
    let category = if category_arg.is_none() && url_arg.is_none() {
        prompt_for_category(&registry).map_err(anyhow::Error::msg)?
    } else {
        resolve_target(&registry, category_arg, url_arg).map_err(anyhow::Error::msg)?
    };

    let download_root = {
        let raw = args.get_one::<String>("download-dir").unwrap();
        PathBuf::from(shellexpand::tilde(raw).as_ref())
    };
    let page_timeout = Duration::from_secs(*args.get_one::<u64>("page-timeout").unwrap());
    let download_timeout = Duration::from_secs(*args.get_one::<u64>("download-timeout").unwrap());

    let scraper = Scraper::new()
        .with_page_timeout(page_timeout)
        .with_download_timeout(download_timeout);

    if !quiet {
        println!(
            "\nFetching {} from {}\n",
            category.label.bright_white().bold(),
            category.page_url
        );
    }
    info!("Starting fetch for {}", category.label);

    let options = BatchOptions {
        category: category.label.clone(),
        page_url: category.page_url.clone(),
        download_root,
        force_refresh: args.get_flag("force"),
        show_progress: !quiet,
    };

    let records = run_batch(&scraper, &options, None)
        .await
        .with_context(|| format!("Failed to fetch page for {}", category.label))?;

    println!("{}", generate_fetch_report(&category.label, &records));

    if let Some(format_arg) = args.get_one::<String>("export") {
        let format = ExportFormat::from_str(format_arg)
            .ok_or_else(|| anyhow!("Unsupported export format '{}'", format_arg))?;
        let path = args
            .get_one::<PathBuf>("output")
            .cloned()
            .unwrap_or_else(|| default_export_path(&category.label, format));

        let content = to_export_string(&records, format);
        save_export(&content, &path)
            .with_context(|| format!("Failed to write export file {}", path.display()))?;

        println!("Exported {} rows to {}", records.len(), path.display());
    }

    Ok(())
}
