use anyhow::Result;
use clap::{Parser, ValueEnum};
use santap::core::{DEFAULT_QUOTA, StrategyKind};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Dining philosophers: dine N workers over N forks and time the run")]
struct Cli {
    /// Number of philosophers (and forks) at the table, at least 3
    seats: usize,

    /// Meals each philosopher must finish
    #[arg(short, long, default_value_t = DEFAULT_QUOTA)]
    meals: u32,

    /// Fork acquisition strategy
    #[arg(short, long, value_enum, default_value = "backoff")]
    strategy: Strategy,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Serialize acquisition through a global admission gate
    Admission,
    /// Try both forks, release and retry on partial failure
    Backoff,
}

impl From<Strategy> for StrategyKind {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Admission => StrategyKind::Admission,
            Strategy::Backoff => StrategyKind::Backoff,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let stats = santap::banquet(cli.seats, cli.meals, cli.strategy.into())?;

    println!(
        "Time: {:.6} milliseconds",
        stats.elapsed().as_secs_f64() * 1e3
    );
    Ok(())
}
