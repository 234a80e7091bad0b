//! Command Line Interface for pool liquidity and APR analytics.
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use lp_yield_analytics::{AprConfig, AprEngine, FixedClock, LiquidityEngine};
use lp_yield_data::{DataProviders, EmissionSchedule, PoolProvider, SnapshotRepository};
use lp_yield_domain::{AprBreakdown, Percentage, Pool};
use prettytable::{Table, row};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lp-yield")]
#[command(about = "Pool liquidity and APR breakdowns from a pool snapshot", long_about = None)]
struct Cli {
    /// Pool snapshot JSON file
    #[arg(long, env = "LP_YIELD_SNAPSHOT", global = true)]
    snapshot: Option<PathBuf>,

    /// UNIX timestamp to evaluate at (defaults to the system clock)
    #[arg(long, env = "LP_YIELD_NOW", global = true)]
    now: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Total pool liquidity in USD
    Liquidity {
        /// Pool id or BPT address
        #[arg(short, long)]
        pool: String,
    },
    /// Pool APR breakdown by source
    Apr {
        /// Pool id or BPT address
        #[arg(short, long)]
        pool: String,

        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },
    /// Protocol emissions released between two timestamps
    Emissions {
        /// Period start (UNIX timestamp)
        #[arg(long)]
        from: u64,

        /// Period end (UNIX timestamp)
        #[arg(long)]
        to: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Liquidity { pool } => {
            let (repository, pool) = load_pool(cli.snapshot.as_deref(), pool).await?;
            let providers = DataProviders::from_snapshot(repository, EmissionSchedule::default());
            let engine = LiquidityEngine::new(providers);

            let liquidity = engine.compute_liquidity_usd(&pool).await?;

            println!("\n💧 Pool Liquidity");
            println!("════════════════════════════════════");
            println!("Pool:      {}", pool.id);
            println!("Type:      {}", pool.pool_type);
            println!("Liquidity: ${:.2}", liquidity);
            if let Some(cached) = pool.total_liquidity {
                println!("Snapshot:  ${:.2}", cached);
            }
            println!("════════════════════════════════════");
        }
        Commands::Apr { pool, json } => {
            let (repository, pool) = load_pool(cli.snapshot.as_deref(), pool).await?;
            let providers = DataProviders::from_snapshot(repository, EmissionSchedule::default());
            let mut engine = AprEngine::new(providers, AprConfig::default());
            if let Some(now) = cli.now {
                engine = engine.with_clock(Arc::new(FixedClock(now)));
            }

            let breakdown = engine.compute_apr(&pool).await?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&breakdown)?);
            } else {
                println!("\n📈 APR Breakdown for {}", pool.id);
                apr_table(&breakdown).printstd();
            }
        }
        Commands::Emissions { from, to } => {
            let schedule = EmissionSchedule::default();
            let total = schedule.between(*from, *to)?;

            println!("\n🪙 Protocol Emissions");
            println!("════════════════════════════════════");
            println!("From:   {}", format_timestamp(*from));
            println!("To:     {}", format_timestamp(*to));
            println!("Weekly: {:.2}", schedule.weekly(*from)?);
            println!("Total:  {:.2}", total);
            println!("════════════════════════════════════");
        }
    }

    Ok(())
}

/// Loads the snapshot and finds `pool` in it, by id or by BPT address.
async fn load_pool(snapshot: Option<&Path>, pool: &str) -> Result<(SnapshotRepository, Pool)> {
    let path =
        snapshot.ok_or_else(|| anyhow!("No snapshot given, use --snapshot or LP_YIELD_SNAPSHOT"))?;
    let repository = SnapshotRepository::load(path)
        .await
        .with_context(|| format!("Failed to load snapshot {}", path.display()))?;

    let found = match repository.find_pool(pool).await? {
        Some(found) => Some(found),
        None => repository.find_pool_by_address(pool).await?,
    };
    let found = found.ok_or_else(|| anyhow!("Pool {pool} not found in snapshot"))?;
    info!(pool = %found.id, tokens = found.tokens.len(), "Loaded pool");

    Ok((repository, found))
}

fn apr_table(breakdown: &AprBreakdown) -> Table {
    let staking = breakdown.staking_apr();
    let fixed = [
        ("Swap fees", breakdown.swap_fees()),
        ("Token yield", breakdown.token_aprs()),
        ("Rewards", breakdown.rewards_apr()),
        ("Protocol", breakdown.protocol_apr()),
    ];

    let mut table = Table::new();
    table.add_row(row!["Source", "Min", "Max"]);
    for (source, bps) in fixed {
        table.add_row(row![source, percent(bps), percent(bps)]);
    }
    table.add_row(row!["Staking", percent(staking.min), percent(staking.max)]);
    table.add_row(row!["Total", percent(breakdown.min()), percent(breakdown.max())]);
    table
}

fn percent(bps: i64) -> String {
    Percentage::from_bps(bps).to_string()
}

fn format_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map(|datetime| datetime.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
