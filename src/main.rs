// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Parse CLI arguments, run the prospecting flow, export and report

mod config;
mod errors;
mod models;
mod services;

use clap::Parser;
use config::Config;
use dotenv::dotenv;
use models::{ResultSet, SearchQuery};
use services::{export, GooglePlacesClient, ProspectOptions, ProspectService, ProspectStats};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

// --- ANSI colors for the terminal ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";

#[derive(Debug, Parser)]
#[command(name = "prospector")]
#[command(about = "Search companies on Google Places and export the matches to a spreadsheet")]
struct Cli {
    /// Company name (razão social) to search for
    text: String,

    /// Restrict the search to a city
    #[arg(long)]
    city: Option<String>,

    /// State the city belongs to
    #[arg(long)]
    state: Option<String>,

    /// Search radius in meters around the city center
    #[arg(long)]
    radius: Option<u32>,

    /// Output spreadsheet path
    #[arg(long, default_value = "prospects.csv")]
    output: PathBuf,

    /// Skip the per-result Place Details lookup (faster, fewer API calls)
    #[arg(long)]
    no_details: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    let cli = Cli::parse();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &config.log_level);
    }
    env_logger::init();

    // 4. Validate credentials before any request
    if let Err(e) = config.validate() {
        eprintln!("{}❌ Configuration error: {}{}", RED, e, RESET);
        process::exit(1);
    }

    let client = GooglePlacesClient::with_base_url(
        config.google_maps_api_key.clone(),
        config.http_timeout_secs,
        &config.places_base_url,
    )?;

    let query = SearchQuery {
        text: cli.text,
        city: cli.city,
        state: cli.state,
        radius_meters: cli.radius,
    };

    let opts = ProspectOptions {
        fetch_details: !cli.no_details,
        page_delay: Duration::from_millis(config.page_delay_ms),
        detail_delay: Duration::from_millis(config.detail_delay_ms),
    };

    print_header(&query);

    // 5. Search and enrich
    let (results, stats) = match ProspectService::prospect(&client, &query, &opts).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{}❌ Prospecting failed: {}{}", RED, e, RESET);
            process::exit(1);
        }
    };

    if results.is_empty() {
        println!(
            "\n{}No results found for {}.{}",
            YELLOW,
            query.query_string(),
            RESET
        );
        return Ok(());
    }

    // 6. Export
    export::write_csv(&results, &cli.output)?;

    print_summary(&stats, &results, &cli.output);

    Ok(())
}

fn print_header(query: &SearchQuery) {
    println!("{}╔══════════════════════════════════════════════════════════════╗{}", CYAN, RESET);
    println!("{}║   🔎 Company Prospector - Google Places                      ║{}", CYAN, RESET);
    println!("{}╚══════════════════════════════════════════════════════════════╝{}", CYAN, RESET);
    println!("\n{}📊 Searching for: {}{}", BOLD, query.query_string(), RESET);
}

fn print_summary(stats: &ProspectStats, results: &ResultSet, output: &Path) {
    println!("\n{}📋 Prospecting Summary{}", BOLD, RESET);
    println!("──────────────────────────────────────────────");
    println!("  • Places found: {}{}{}", GREEN, results.len(), RESET);
    println!("  • Pages fetched: {}", stats.pages_fetched);
    println!("  • Details fetched: {}{}{}", GREEN, stats.details_fetched, RESET);
    println!("  • Details failed: {}{}{}", YELLOW, stats.details_failed, RESET);
    println!("  • API requests: {}{}{}", BLUE, stats.api_requests, RESET);
    println!("  • Duration: {}s", stats.duration_seconds);

    if !stats.errors.is_empty() {
        println!("\n{}⚠️  Warnings ({}):{}", YELLOW, stats.errors.len(), RESET);
        for error in &stats.errors {
            println!("  - {}", error);
        }
    }

    let cost = stats.api_requests as f64 * 0.017;
    println!("\n{}💰 Estimated Cost: ${:.2} USD{}", BOLD, cost, RESET);
    println!("{}💾 Results saved to {}{}", GREEN, output.display(), RESET);
}
