use clap::{Parser, Subcommand};
use colored::*;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use std::sync::Arc;

use stockwatch::cache::{CacheManager, ChartPeriod, SqliteStore, SystemClock};
use stockwatch::config::Config;
use stockwatch::logger::{self, LogLevel, LogTag};
use stockwatch::marketdata::{MarketDataService, Mover, QuoteApiClient};
use stockwatch::paths;

/// Market data tracker with a two-tier quote cache
#[derive(Parser)]
#[command(name = "stockwatch", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the latest quote for a symbol
    Quote {
        symbol: String,
        /// Drop the cached quote and refetch
        #[arg(long)]
        refresh: bool,
    },
    /// Show company fundamentals for a symbol
    Overview { symbol: String },
    /// Show a chart series for a symbol (1D, 1W, 1M, 3M, 1Y, 5Y)
    Chart {
        symbol: String,
        #[arg(default_value = "1D")]
        period: String,
    },
    /// Show market-wide top gainers, losers and most active
    Movers,
    /// Inspect or maintain the cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Show counts, size and age extremes of both tiers
    Stats,
    /// Sweep invalid entries out of the durable tier
    Clean,
    /// Wipe the cache entirely
    Clear,
    /// Remove every key containing the given substring
    Invalidate { pattern: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Directories must exist before the logger can open its file
    if let Err(e) = paths::ensure_all_directories() {
        eprintln!("failed to create data directories: {}", e);
        std::process::exit(1);
    }

    let config = match Config::load(&paths::config_file()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let min_level = LogLevel::parse(&config.general.log_level).unwrap_or(LogLevel::Info);
    logger::init(min_level);

    let store = match SqliteStore::open(&paths::cache_db_path()) {
        Ok(store) => store,
        Err(e) => {
            logger::error(LogTag::Store, &format!("cannot open cache database: {}", e));
            std::process::exit(1);
        }
    };
    let cache = Arc::new(CacheManager::new(Arc::new(store), Arc::new(SystemClock)));

    if config.general.clean_on_start {
        cache.clean_expired().await;
    }

    let result = match cli.command {
        Command::Cache { action } => run_cache_action(&cache, action).await,
        command => run_market_command(&config, cache.clone(), command).await,
    };

    if let Err(e) = result {
        logger::error(LogTag::System, &format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run_market_command(
    config: &Config,
    cache: Arc<CacheManager>,
    command: Command,
) -> anyhow::Result<()> {
    let api_key = config.api_key()?;
    let client = QuoteApiClient::new(&config.api, api_key)?;
    let service = MarketDataService::new(cache, Arc::new(client));

    match command {
        Command::Quote { symbol, refresh } => {
            let quote = if refresh {
                service.refresh_quote(&symbol).await?
            } else {
                service.quote(&symbol).await?
            };

            let change = quote.change.unwrap_or(0.0);
            let change_str = format!(
                "{:+.2} ({})",
                change,
                quote.change_percent.as_deref().unwrap_or("n/a")
            );
            let change_colored = if change >= 0.0 {
                change_str.green()
            } else {
                change_str.red()
            };
            println!(
                "{}  {}  {}",
                quote.symbol.bold(),
                format!("{:.2}", quote.price).bright_white().bold(),
                change_colored
            );
            if let Some(day) = &quote.latest_trading_day {
                println!("{}", format!("as of {}", day).dimmed());
            }
        }
        Command::Overview { symbol } => {
            let overview = service.overview(&symbol).await?;
            println!(
                "{} - {}",
                overview.symbol.bold(),
                overview.name.bright_white()
            );
            for (label, value) in [
                ("Exchange", overview.exchange.clone()),
                ("Sector", overview.sector.clone()),
                ("Industry", overview.industry.clone()),
                ("Market cap", overview.market_cap.map(format_market_cap)),
                ("P/E", overview.pe_ratio.map(|v| format!("{:.2}", v))),
                (
                    "Dividend yield",
                    overview.dividend_yield.map(|v| format!("{:.2}%", v * 100.0)),
                ),
            ] {
                if let Some(value) = value {
                    println!("  {:<16} {}", format!("{}:", label).dimmed(), value);
                }
            }
            if let Some(description) = &overview.description {
                println!("\n{}", description);
            }
        }
        Command::Chart { symbol, period } => {
            let period: ChartPeriod = period.parse().map_err(anyhow::Error::msg)?;
            let series = service.chart(&symbol, period).await?;

            let first = series.points.first().expect("parser rejects empty series");
            let last = series.points.last().expect("parser rejects empty series");
            println!(
                "{} {} - {} points, {} to {}",
                series.symbol.bold(),
                series.period,
                series.points.len(),
                first.timestamp.dimmed(),
                last.timestamp.dimmed()
            );
            let move_pct = (last.close - first.open) / first.open * 100.0;
            let summary = format!(
                "open {:.2}  close {:.2}  move {:+.2}%",
                first.open, last.close, move_pct
            );
            println!(
                "{}",
                if move_pct >= 0.0 {
                    summary.green()
                } else {
                    summary.red()
                }
            );
        }
        Command::Movers => {
            let movers = service.top_movers().await?;
            if let Some(stamp) = &movers.last_updated {
                println!("{}", format!("as of {}", stamp).dimmed());
            }
            print_mover_table("Top gainers", &movers.gainers);
            print_mover_table("Top losers", &movers.losers);
            print_mover_table("Most active", &movers.most_active);
        }
        Command::Cache { .. } => unreachable!("handled in main"),
    }

    Ok(())
}

async fn run_cache_action(cache: &CacheManager, action: CacheAction) -> anyhow::Result<()> {
    match action {
        CacheAction::Stats => {
            let stats = cache.stats().await;
            let mut table = Table::new();
            table.load_preset(UTF8_FULL_CONDENSED);
            table.set_header(vec!["metric", "value"]);
            table.add_row(vec!["memory entries".to_string(), stats.memory_count.to_string()]);
            table.add_row(vec!["durable entries".to_string(), stats.durable_count.to_string()]);
            table.add_row(vec!["durable size".to_string(), stats.total_size_formatted]);
            table.add_row(vec![
                "oldest key".to_string(),
                stats.oldest_key.unwrap_or_else(|| "-".to_string()),
            ]);
            table.add_row(vec![
                "newest key".to_string(),
                stats.newest_key.unwrap_or_else(|| "-".to_string()),
            ]);
            table.add_row(vec!["store failures".to_string(), stats.store_failures.to_string()]);
            println!("{}", table);
        }
        CacheAction::Clean => {
            cache.clean_expired().await;
            logger::info(LogTag::System, "sweep complete");
        }
        CacheAction::Clear => {
            cache.clear().await;
            logger::info(LogTag::System, "cache cleared");
        }
        CacheAction::Invalidate { pattern } => {
            cache.invalidate_pattern(&pattern).await;
            logger::info(LogTag::System, &format!("invalidated keys matching '{}'", pattern));
        }
    }
    Ok(())
}

fn print_mover_table(title: &str, movers: &[Mover]) {
    if movers.is_empty() {
        return;
    }
    println!("\n{}", title.bold());
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["ticker", "price", "change", "change %", "volume"]);
    for mover in movers.iter().take(10) {
        table.add_row(vec![
            mover.ticker.clone(),
            format!("{:.2}", mover.price),
            format!("{:+.2}", mover.change_amount),
            mover.change_percentage.clone(),
            mover
                .volume
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{}", table);
}

fn format_market_cap(cap: u64) -> String {
    if cap >= 1_000_000_000_000 {
        format!("{:.2}T", cap as f64 / 1e12)
    } else if cap >= 1_000_000_000 {
        format!("{:.2}B", cap as f64 / 1e9)
    } else {
        format!("{:.2}M", cap as f64 / 1e6)
    }
}
