//! basketline CLI — regenerate the comparison chart page.
//!
//! Commands:
//! - `generate` — run the pipeline for the configured basket and inject the
//!   dataset into the HTML template
//! - `download` — prefetch symbols into the cache without rendering
//! - `cache status` — report per-symbol cache coverage

mod render;

use anyhow::{Context, Result};
use basketline_core::data::{CsvCache, PriceStore, StdoutProgress, YahooProvider};
use basketline_core::{ChartConfig, DatasetBuilder};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "basketline",
    about = "basketline — comparable price history for a basket of equities"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dataset and inject it into the HTML template.
    Generate {
        /// Basket configuration file.
        #[arg(long, default_value = "basket.toml")]
        config: PathBuf,

        /// Cache directory.
        #[arg(long, default_value = "cache")]
        cache_dir: PathBuf,

        /// HTML template containing the placeholder token; rewritten in place.
        #[arg(long, default_value = "index.html")]
        template: PathBuf,
    },
    /// Prefetch symbols into the cache.
    Download {
        /// Symbols to download (e.g., 1155.KL 1023.KL).
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Start date (YYYY-MM-DD). Defaults to one year ago.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Delete any cached artifact first, forcing a refetch.
        #[arg(long, default_value_t = false)]
        force: bool,

        /// Cache directory.
        #[arg(long, default_value = "cache")]
        cache_dir: PathBuf,
    },
    /// Cache inspection commands.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Report cache coverage for the configured basket.
    Status {
        /// Basket configuration file.
        #[arg(long, default_value = "basket.toml")]
        config: PathBuf,

        /// Cache directory.
        #[arg(long, default_value = "cache")]
        cache_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            cache_dir,
            template,
        } => run_generate(&config, &cache_dir, &template),
        Commands::Download {
            symbols,
            start,
            end,
            force,
            cache_dir,
        } => run_download(symbols, start, end, force, &cache_dir),
        Commands::Cache { action } => match action {
            CacheAction::Status { config, cache_dir } => run_cache_status(&config, &cache_dir),
        },
    }
}

fn run_generate(config_path: &Path, cache_dir: &Path, template: &Path) -> Result<()> {
    let config = ChartConfig::from_file(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    let cache = CsvCache::new(cache_dir);
    let provider = YahooProvider::new()?;
    let store = PriceStore::new(&cache, &provider);

    let records = DatasetBuilder::new(&store, &config).build(&StdoutProgress)?;
    render::inject_dataset(template, &records)?;

    println!("Updated {}", template.display());
    Ok(())
}

fn run_download(
    symbols: Vec<String>,
    start: Option<String>,
    end: Option<String>,
    force: bool,
    cache_dir: &Path,
) -> Result<()> {
    let start_date = parse_date_arg(start.as_deref())?
        .unwrap_or_else(|| chrono::Local::now().date_naive() - chrono::Duration::days(365));
    let end_date =
        parse_date_arg(end.as_deref())?.unwrap_or_else(|| chrono::Local::now().date_naive());

    let cache = CsvCache::new(cache_dir);
    let provider = YahooProvider::new()?;
    let store = PriceStore::new(&cache, &provider);

    let total = symbols.len();
    let mut failed = 0;

    for (i, symbol) in symbols.iter().enumerate() {
        println!("[{}/{total}] {symbol}...", i + 1);

        if force {
            cache.remove(symbol)?;
        } else if cache.contains(symbol) {
            println!("  cached: {symbol}");
            continue;
        }

        match store.get(symbol, start_date, end_date) {
            Ok(series) => println!("  OK: {symbol} ({} points)", series.len()),
            Err(e) => {
                eprintln!("  FAIL: {symbol}: {e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn run_cache_status(config_path: &Path, cache_dir: &Path) -> Result<()> {
    let config = ChartConfig::from_file(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    let cache = CsvCache::new(cache_dir);

    let mut symbols: Vec<&str> = vec![config.reference_symbol.as_str()];
    symbols.extend(config.basket.symbols().filter(|s| *s != config.reference_symbol));

    let statuses = cache.status(&symbols);

    println!("Cache: {}", cache_dir.display());
    println!("{:<10} {:<25} {:>8}", "Symbol", "Date Range", "Points");
    println!("{}", "-".repeat(45));
    for status in &statuses {
        let (range, points) = match (status.first_date, status.last_date, status.point_count) {
            (Some(first), Some(last), Some(n)) => (format!("{first} to {last}"), n.to_string()),
            _ if status.cached => ("(empty)".into(), "0".into()),
            _ => ("(not cached)".into(), "-".into()),
        };
        println!("{:<10} {:<25} {:>8}", status.symbol, range, points);
    }

    Ok(())
}

fn parse_date_arg(value: Option<&str>) -> Result<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("expected YYYY-MM-DD, got '{s}'"))
        })
        .transpose()
}
