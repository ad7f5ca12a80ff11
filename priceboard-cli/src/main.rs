//! Priceboard CLI — headless price fetching and ticker-map inspection.
//!
//! Commands:
//! - `fetch` — download closing prices and print them as a table or JSON
//! - `tickers` — list the configured company-to-symbol map

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use priceboard_core::data::provider::StdoutProgress;
use priceboard_core::data::{fetch_all, YahooProvider};
use priceboard_core::selection::{DAYS_MAX, DAYS_MIN};
use priceboard_core::{PriceTable, TickerMap};

#[derive(Parser)]
#[command(
    name = "priceboard",
    about = "Priceboard CLI — stock closing-price dashboard, headless"
)]
struct Cli {
    /// Path to a TOML ticker map. Defaults to the built-in US set.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download closing prices from Yahoo Finance and print them.
    Fetch {
        /// Lookback window in calendar days (1-180).
        #[arg(long, default_value_t = 90)]
        days: u32,

        /// Companies to include by label (e.g., google apple). Defaults to all.
        #[arg(long, num_args = 1..)]
        companies: Vec<String>,

        /// Print the table as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the configured company-to-symbol map.
    Tickers,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let tickers = load_tickers(cli.config.as_deref())?;

    match cli.command {
        Commands::Fetch {
            days,
            companies,
            json,
        } => run_fetch(&tickers, days, &companies, json),
        Commands::Tickers => run_tickers(&tickers),
    }
}

fn load_tickers(path: Option<&std::path::Path>) -> Result<TickerMap> {
    match path {
        Some(p) => Ok(TickerMap::from_file(p)?),
        None => Ok(TickerMap::default_us()),
    }
}

fn run_fetch(tickers: &TickerMap, days: u32, companies: &[String], json: bool) -> Result<()> {
    if !(DAYS_MIN..=DAYS_MAX).contains(&days) {
        bail!("--days must be between {DAYS_MIN} and {DAYS_MAX}");
    }
    for label in companies {
        if tickers.symbol_for(label).is_none() {
            bail!("unknown company '{label}'; run `priceboard tickers` for the configured set");
        }
    }

    let provider = YahooProvider::new();
    let series = fetch_all(&provider, tickers, days, &StdoutProgress)?;
    let table = PriceTable::from_series(&series);

    let table = if companies.is_empty() {
        table.sorted_by_label()
    } else {
        table.filter(companies).sorted_by_label()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        print_table(&table);
    }

    Ok(())
}

fn run_tickers(tickers: &TickerMap) -> Result<()> {
    println!("{:<12} Symbol", "Name");
    println!("{}", "-".repeat(20));
    for entry in tickers.iter() {
        println!("{:<12} {}", entry.label, entry.symbol);
    }
    Ok(())
}

fn print_table(table: &PriceTable) {
    let columns = table.columns();
    if columns.is_empty() {
        println!("No price data.");
        return;
    }

    print!("{:<12}", "Name");
    for col in &columns {
        print!(" {col:>16}");
    }
    println!();
    println!("{}", "-".repeat(12 + columns.len() * 17));

    for row in &table.rows {
        print!("{:<12}", row.label);
        for col in &columns {
            match row.cells.iter().find(|c| c.date_label == *col) {
                Some(cell) => print!(" {:>16.2}", cell.close),
                None => print!(" {:>16}", "-"),
            }
        }
        println!();
    }
}
