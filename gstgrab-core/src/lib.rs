pub mod batch;
pub mod export;
pub mod registry;
pub mod report;

use colored::Colorize;

/// Print the application banner with the clock line.
pub fn print_banner() {
    let clock = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    println!("{}", "═".repeat(60).bright_blue().bold());
    println!("{}", "  GST LAW DOWNLOADER".bright_white().bold());
    println!("  {}", clock.to_string().green());
    println!("{}", "═".repeat(60).bright_blue().bold());
}
