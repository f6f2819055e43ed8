//! # CLI Interface
//!
//! Defines the command-line argument structure for `tollgate-node` using
//! `clap` derive. Supports four subcommands: `init`, `simulate`, `quote`,
//! and `version`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tollgate_protocol::config::{DEFAULT_FEE_RATE, DEFAULT_NAME, DEFAULT_SYMBOL};
use tollgate_protocol::{Address, Amount};

/// Tollgate ledger runner.
///
/// Creates genesis files, replays scripted calls against a fresh ledger
/// through the transactional host, and quotes fees.
#[derive(Parser, Debug)]
#[command(
    name = "tollgate-node",
    about = "Tollgate fee ledger runner",
    version,
    propagate_version = true
)]
pub struct TollgateCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the Tollgate binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a genesis configuration file.
    Init(InitArgs),
    /// Replay a call script against a ledger created from a genesis file.
    Simulate(SimulateArgs),
    /// Compute the fee and net amount of a taxable transfer.
    Quote(QuoteArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `init` subcommand.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Where to write the genesis file.
    #[arg(long, short = 'o', default_value = "genesis.json")]
    pub out: PathBuf,

    /// Recipient of the genesis mint.
    #[arg(long, env = "TOLLGATE_HOLDER")]
    pub holder: Address,

    /// Fee collector.
    #[arg(long, env = "TOLLGATE_COLLECTOR")]
    pub collector: Address,

    /// Administrative owner. Defaults to the holder.
    #[arg(long, env = "TOLLGATE_OWNER")]
    pub owner: Option<Address>,

    /// Initial fee rate in whole percent (0-100).
    #[arg(long, default_value_t = DEFAULT_FEE_RATE)]
    pub fee_rate: u8,

    /// Genesis mint in the smallest unit. Defaults to one million whole tokens.
    #[arg(long)]
    pub supply: Option<Amount>,

    /// Token name.
    #[arg(long, default_value = DEFAULT_NAME)]
    pub name: String,

    /// Token symbol.
    #[arg(long, default_value = DEFAULT_SYMBOL)]
    pub symbol: String,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `simulate` subcommand.
#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Genesis configuration (JSON).
    #[arg(long, short = 'g', env = "TOLLGATE_GENESIS")]
    pub genesis: PathBuf,

    /// Call script (JSON array of `{ caller, call }`).
    #[arg(long, short = 's')]
    pub script: PathBuf,

    /// Write the report here instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print Prometheus metrics to stderr after the run.
    #[arg(long)]
    pub metrics: bool,

    /// Log format: `pretty` or `json`.
    #[arg(long, env = "TOLLGATE_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,
}

/// Arguments for the `quote` subcommand.
#[derive(Parser, Debug)]
pub struct QuoteArgs {
    /// Gross transfer amount.
    #[arg(long)]
    pub amount: Amount,

    /// Fee rate in whole percent (0-100).
    #[arg(long, default_value_t = DEFAULT_FEE_RATE)]
    pub rate: u8,
}
