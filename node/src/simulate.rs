//! # Script Replay
//!
//! Loads a genesis file and a call script, replays the script through the
//! transactional host, and assembles a report of what happened: one outcome
//! per call plus the final ledger state.
//!
//! Rejected calls are part of the report, not errors: only unreadable
//! inputs or an invalid genesis abort a run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tollgate_contracts::{CallOutcome, Host, Invocation, TokenMetadata};
use tollgate_protocol::{Address, Amount, GenesisConfig};

use crate::metrics::NodeMetrics;

/// One row of the final balance table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub account: Address,
    pub balance: Amount,
}

/// Everything a replay produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub token: TokenMetadata,
    pub total_supply: Amount,
    pub fee_rate: u8,
    pub collector: Option<Address>,
    pub owner: Address,
    pub paused: bool,
    pub committed: u64,
    pub rejected: u64,
    /// Non-zero balances, ordered by account.
    pub balances: Vec<BalanceEntry>,
    /// Exempt accounts, ordered.
    pub exempt: Vec<Address>,
    pub outcomes: Vec<CallOutcome>,
}

/// Reads and validates a genesis file.
pub fn load_genesis(path: &Path) -> Result<GenesisConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read genesis file: {}", path.display()))?;
    let config: GenesisConfig = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse genesis file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid genesis file: {}", path.display()))?;
    Ok(config)
}

/// Reads a call script.
pub fn load_script(path: &Path) -> Result<Vec<Invocation>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read script: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse script: {}", path.display()))
}

/// Writes `config` as pretty JSON, refusing to clobber an existing file
/// unless `force` is set.
pub fn write_genesis(path: &Path, config: &GenesisConfig, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (pass --force to overwrite)",
            path.display()
        );
    }
    config
        .validate()
        .context("refusing to write an invalid genesis configuration")?;
    let json = serde_json::to_string_pretty(config).context("failed to encode genesis")?;
    fs::write(path, json + "\n")
        .with_context(|| format!("failed to write genesis file: {}", path.display()))
}

/// Deploys a ledger from `genesis` and replays `script` against it.
pub fn run(
    genesis: &GenesisConfig,
    script: &[Invocation],
    metrics: &NodeMetrics,
) -> Result<SimulationReport> {
    let mut host = Host::genesis(genesis).context("genesis failed")?;
    tracing::info!(
        calls = script.len(),
        supply = %host.token().total_supply(),
        "replaying script"
    );

    let outcomes = host.execute_batch(script);
    for outcome in &outcomes {
        metrics.record(outcome);
    }

    let token = host.token();
    metrics.fee_rate.set(i64::from(token.fee_rate()));

    let ledger = token.engine().ledger();
    let balances = ledger
        .holders()
        .into_iter()
        .map(|(account, balance)| BalanceEntry { account, balance })
        .collect();

    tracing::info!(
        committed = host.calls_executed() - host.calls_rejected(),
        rejected = host.calls_rejected(),
        holders = ledger.holder_count(),
        "replay finished"
    );

    Ok(SimulationReport {
        token: token.metadata().clone(),
        total_supply: token.total_supply(),
        fee_rate: token.fee_rate(),
        collector: token.collector(),
        owner: token.owner(),
        paused: token.is_paused(),
        committed: host.calls_executed() - host.calls_rejected(),
        rejected: host.calls_rejected(),
        balances,
        exempt: token.engine().exemptions().exempt_accounts(),
        outcomes,
    })
}
