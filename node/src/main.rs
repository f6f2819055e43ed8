// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Tollgate Node
//!
//! Entry point for the `tollgate-node` binary. Parses CLI arguments,
//! initializes logging and metrics, and dispatches to a subcommand.
//!
//! The binary supports four subcommands:
//!
//! - `init`     — write a genesis configuration file
//! - `simulate` — replay a call script and print a JSON report
//! - `quote`    — compute the fee split of a taxable transfer
//! - `version`  — print build version information

mod cli;
mod logging;
mod metrics;
mod simulate;

use anyhow::{Context, Result};
use clap::Parser;

use tollgate_protocol::config::MAX_FEE_RATE;
use tollgate_protocol::{compute_fee, GenesisConfig};

use cli::{Commands, TollgateCli};
use logging::LogFormat;
use metrics::NodeMetrics;

fn main() -> Result<()> {
    let cli = TollgateCli::parse();

    match cli.command {
        Commands::Init(args) => init_genesis(args),
        Commands::Simulate(args) => run_simulation(args),
        Commands::Quote(args) => quote(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Writes a genesis file from the command-line options.
fn init_genesis(args: cli::InitArgs) -> Result<()> {
    logging::init_logging(logging::DEFAULT_FILTER, LogFormat::Pretty);

    let mut config = GenesisConfig::new(args.holder, args.collector).with_fee_rate(args.fee_rate);
    config.name = args.name;
    config.symbol = args.symbol;
    config.owner = args.owner;
    if let Some(supply) = args.supply {
        config = config.with_initial_supply(supply);
    }

    simulate::write_genesis(&args.out, &config, args.force)?;
    tracing::info!(path = %args.out.display(), "genesis written");

    println!("Genesis written successfully.");
    println!("  File       : {}", args.out.display());
    println!("  Holder     : {}", config.initial_holder);
    println!("  Collector  : {}", config.collector);
    println!("  Owner      : {}", config.effective_owner());
    println!("  Fee rate   : {}%", config.fee_rate);
    println!("  Supply     : {}", config.initial_supply);

    Ok(())
}

/// Replays a script and prints the report.
fn run_simulation(args: cli::SimulateArgs) -> Result<()> {
    logging::init_logging(
        logging::DEFAULT_FILTER,
        LogFormat::from_str_lossy(&args.log_format),
    );

    let genesis = simulate::load_genesis(&args.genesis)?;
    let script = simulate::load_script(&args.script)?;
    let node_metrics = NodeMetrics::new();

    let report = simulate::run(&genesis, &script, &node_metrics)?;
    let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{}", json),
    }

    if args.metrics {
        let text = node_metrics.encode().context("failed to encode metrics")?;
        eprint!("{}", text);
    }

    Ok(())
}

/// Prints the split of a taxable transfer at the given rate.
fn quote(args: cli::QuoteArgs) -> Result<()> {
    if args.rate > MAX_FEE_RATE {
        anyhow::bail!("fee rate {} exceeds {}", args.rate, MAX_FEE_RATE);
    }
    let fee = compute_fee(args.amount, args.rate);
    println!("amount : {}", args.amount);
    println!("rate   : {}%", args.rate);
    println!("fee    : {}", fee);
    println!("net    : {}", args.amount - fee);
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("tollgate-node {}", env!("CARGO_PKG_VERSION"));
    println!("protocol      {}", tollgate_protocol::config::PROTOCOL_VERSION);
    println!("rustc         {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
