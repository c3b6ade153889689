use crate::CLAP_STYLING;
use clap::{arg, command};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("gstgrab")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("gstgrab")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("categories")
                .about("List the configured GST categories and their source pages")
                .arg(
                    arg!(--"categories-file" <PATH>)
                        .required(false)
                        .help("JSON file replacing the built-in category table")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
        .subcommand(
            command!("fetch")
                .about(
                    "Scrape a category page for PDF links and download every document, \
                    skipping files already on disk.",
                )
                .arg(
                    arg!(-c --"category" <LABEL>)
                        .required(false)
                        .help("Category to fetch; prompts interactively when omitted")
                        .conflicts_with("url"),
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("Fetch from an arbitrary page instead of a configured category")
                        .value_parser(clap::value_parser!(Url))
                        .conflicts_with("category"),
                )
                .arg(
                    arg!(-d --"download-dir" <PATH>)
                        .required(false)
                        .help("Root folder for downloaded documents")
                        .default_value("gst_law_pdfs"),
                )
                .arg(
                    arg!(--"categories-file" <PATH>)
                        .required(false)
                        .help("JSON file replacing the built-in category table")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(--"force")
                        .required(false)
                        .help("Re-download files even when they already exist locally")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-e --"export" <FORMAT>)
                        .required(false)
                        .help("Write the result table to a file")
                        .value_parser(["csv", "tsv"]),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Export file path (default: <category>.<format> in the current directory)")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .requires("export"),
                )
                .arg(
                    arg!(--"page-timeout" <SECONDS>)
                        .required(false)
                        .help("Timeout for the category page fetch")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("30"),
                )
                .arg(
                    arg!(--"download-timeout" <SECONDS>)
                        .required(false)
                        .help("Timeout for each document download")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("20"),
                ),
        )
}
