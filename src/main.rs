//! pagesim - virtual memory page replacement simulator

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use pagesim::config::SimulatorConfig;
use pagesim::memory::ReferenceString;
use pagesim::replacement::{Access, PolicyKind};
use pagesim::simulation::{compare_policies, Simulation};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    Fifo,
    Lfu,
    Lru,
    All,
}

impl PolicyArg {
    fn kinds(self) -> Vec<PolicyKind> {
        match self {
            PolicyArg::Fifo => vec![PolicyKind::Fifo],
            PolicyArg::Lfu => vec![PolicyKind::Lfu],
            PolicyArg::Lru => vec![PolicyKind::Lru],
            PolicyArg::All => PolicyKind::ALL.to_vec(),
        }
    }
}

/// Simulates FIFO, LFU and LRU page replacement over a reference string
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Replacement policy to simulate
    #[arg(short, long, value_enum, default_value = "all")]
    policy: PolicyArg,

    /// Number of logical pages in the page table
    #[arg(short, long, default_value = "8")]
    table_size: usize,

    /// Number of free physical frames
    #[arg(short, long, default_value = "3")]
    frames: usize,

    /// Comma-separated page references
    #[arg(short, long, value_delimiter = ',', conflicts_with_all = ["file", "random"])]
    refs: Vec<usize>,

    /// File holding page references separated by commas or whitespace
    #[arg(long, conflicts_with = "random")]
    file: Option<PathBuf>,

    /// Generate this many random references instead
    #[arg(long)]
    random: Option<usize>,

    /// Seed for random reference generation
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Print how each reference is resolved
    #[arg(long)]
    trace: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = SimulatorConfig::new(args.table_size, args.frames);
    config.validate().context("Invalid simulator configuration")?;

    let references = load_references(&args, &config)?;
    references
        .validate(&config.build_table()?)
        .context("Reference string does not fit the page table")?;

    println!(
        "Pages: {}  Frames: {}  References: {}",
        config.table_size,
        config.frame_count,
        references.len()
    );

    let kinds = args.policy.kinds();

    if args.trace {
        for &kind in &kinds {
            trace_policy(&config, kind, &references)?;
        }
    }

    let reports = compare_policies(&config, &kinds, &references)?;
    println!();
    println!("{:<6} {:>8} {:>8} {:>10}", "Policy", "Faults", "Hits", "Fault %");
    for report in &reports {
        println!(
            "{:<6} {:>8} {:>8} {:>9.1}%",
            report.policy.to_string(),
            report.faults,
            report.hits(),
            report.fault_rate() * 100.0
        );
    }

    Ok(())
}

fn load_references(args: &Args, config: &SimulatorConfig) -> Result<ReferenceString> {
    if let Some(path) = &args.file {
        return ReferenceString::from_file(path);
    }

    if let Some(len) = args.random {
        let mut rng = StdRng::seed_from_u64(args.seed);
        return ReferenceString::random(len, config.table_size, &mut rng)
            .context("Failed to generate random references");
    }

    if args.refs.is_empty() {
        bail!("No references given: use --refs, --file or --random");
    }

    ReferenceString::with_limit(args.refs.clone(), config.limits.reference_max)
        .context("Too many references")
}

fn trace_policy(
    config: &SimulatorConfig,
    kind: PolicyKind,
    references: &ReferenceString,
) -> Result<()> {
    let mut simulation = Simulation::from_config(config, kind)?;

    println!();
    println!("{} trace:", kind);
    for (time, access) in simulation.run(references)?.iter().enumerate() {
        let page = references.pages()[time];
        let outcome = match access {
            Access::Hit { .. } => "hit".to_string(),
            Access::Loaded { .. } => "fault (free frame)".to_string(),
            Access::Replaced { victim, .. } => format!("fault (evicted page {})", victim),
        };
        println!(
            "  t{:<4} page {:<4} -> frame {:<4} {}",
            time + 1,
            page,
            access.frame(),
            outcome
        );
    }

    let stats = simulation.stats();
    println!(
        "  {} faults, {} hits, {} evictions",
        stats.faults, stats.hits, stats.evictions
    );
    Ok(())
}
