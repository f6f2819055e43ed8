//! # Transactional Host
//!
//! The host is the single writer in front of a [`FeeToken`]. It executes one
//! [`Call`] at a time against a working copy of the token and commits that
//! copy only if the call succeeds. A rejected call therefore leaves neither
//! state changes nor events behind, whatever the call got through before
//! failing.
//!
//! Committed events are appended to the host's journal in execution order,
//! which is the audit trail observers read.

use serde::{Deserialize, Serialize};
use tollgate_protocol::{Address, Amount, Event, GenesisConfig, LedgerError, LedgerResult, TransferReceipt};
use tracing::{debug, warn};

use crate::fee_token::FeeToken;

// ---------------------------------------------------------------------------
// Calls
// ---------------------------------------------------------------------------

/// Every state-changing operation the token exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Call {
    /// Move the caller's funds.
    Transfer { to: Address, amount: Amount },
    /// Move someone else's funds under an allowance.
    TransferFrom {
        from: Address,
        to: Address,
        amount: Amount,
    },
    /// Set the caller's allowance for `spender`.
    Approve { spender: Address, amount: Amount },
    /// Owner-only: replace the fee rate.
    SetFeeRate { rate: u8 },
    /// Owner-only: replace the collector.
    SetCollector { collector: Address },
    /// Owner-only: write an exemption flag.
    SetExempt { account: Address, exempt: bool },
    /// Owner-only: halt transfers.
    Pause,
    /// Owner-only: resume transfers.
    Unpause,
    /// Owner-only: hand over administration.
    TransferOwnership { new_owner: Address },
    /// Owner-only: give up administration.
    RenounceOwnership,
}

impl Call {
    /// Short name for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Call::Transfer { .. } => "transfer",
            Call::TransferFrom { .. } => "transfer_from",
            Call::Approve { .. } => "approve",
            Call::SetFeeRate { .. } => "set_fee_rate",
            Call::SetCollector { .. } => "set_collector",
            Call::SetExempt { .. } => "set_exempt",
            Call::Pause => "pause",
            Call::Unpause => "unpause",
            Call::TransferOwnership { .. } => "transfer_ownership",
            Call::RenounceOwnership => "renounce_ownership",
        }
    }

    /// Dispatches the call to `token` on behalf of `caller`.
    fn apply(&self, token: &mut FeeToken, caller: Address) -> LedgerResult<Option<TransferReceipt>> {
        match self {
            Call::Transfer { to, amount } => token.transfer(caller, *to, *amount).map(Some),
            Call::TransferFrom { from, to, amount } => {
                token.transfer_from(caller, *from, *to, *amount).map(Some)
            }
            Call::Approve { spender, amount } => token.approve(caller, *spender, *amount).map(|_| None),
            Call::SetFeeRate { rate } => token.set_fee_rate(caller, *rate).map(|_| None),
            Call::SetCollector { collector } => token.set_collector(caller, *collector).map(|_| None),
            Call::SetExempt { account, exempt } => {
                token.set_exempt(caller, *account, *exempt).map(|_| None)
            }
            Call::Pause => token.pause(caller).map(|_| None),
            Call::Unpause => token.unpause(caller).map(|_| None),
            Call::TransferOwnership { new_owner } => {
                token.transfer_ownership(caller, *new_owner).map(|_| None)
            }
            Call::RenounceOwnership => token.renounce_ownership(caller).map(|_| None),
        }
    }
}

/// A call together with the principal making it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Principal on whose behalf the call runs.
    pub caller: Address,
    /// The call itself.
    pub call: Call,
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What a committed call produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committed {
    /// Split details, for transfers.
    pub receipt: Option<TransferReceipt>,
    /// Events the call emitted, in order.
    pub events: Vec<Event>,
}

/// Result of one call in a batch, in a shape fit for reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallOutcome {
    /// Position in the host's execution sequence, starting at 1.
    pub seq: u64,
    /// Principal that made the call.
    pub caller: Address,
    /// Operation name.
    pub call: String,
    /// `true` if committed.
    pub ok: bool,
    /// Split details for committed transfers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<TransferReceipt>,
    /// Committed events.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub events: Vec<Event>,
    /// Rejection reason for failed calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// Serializing, all-or-nothing executor for a [`FeeToken`].
#[derive(Debug, Clone)]
pub struct Host {
    token: FeeToken,
    journal: Vec<Event>,
    seq: u64,
    rejected: u64,
}

impl Host {
    /// Deploys a token from `config` and journals the genesis events.
    pub fn genesis(config: &GenesisConfig) -> LedgerResult<Self> {
        let mut token = FeeToken::genesis(config)?;
        let journal = token.drain_events();
        Ok(Self {
            token,
            journal,
            seq: 0,
            rejected: 0,
        })
    }

    /// Read access to the committed token state.
    pub fn token(&self) -> &FeeToken {
        &self.token
    }

    /// Every committed event, oldest first.
    pub fn journal(&self) -> &[Event] {
        &self.journal
    }

    /// Number of calls executed, committed or not.
    pub fn calls_executed(&self) -> u64 {
        self.seq
    }

    /// Number of calls rejected.
    pub fn calls_rejected(&self) -> u64 {
        self.rejected
    }

    /// Runs `call` for `caller` atomically.
    ///
    /// # Errors
    ///
    /// Whatever the token rejected the call with. The committed state and
    /// the journal are untouched in that case.
    pub fn execute(&mut self, caller: Address, call: &Call) -> Result<Committed, LedgerError> {
        self.seq += 1;
        let mut working = self.token.clone();

        match call.apply(&mut working, caller) {
            Ok(receipt) => {
                let events = working.drain_events();
                debug_assert!(
                    working.engine().ledger().is_conserved(),
                    "supply invariant broken by {}",
                    call.name()
                );
                self.token = working;
                self.journal.extend(events.iter().cloned());
                debug!(
                    seq = self.seq,
                    caller = %caller,
                    call = call.name(),
                    events = events.len(),
                    "call committed"
                );
                Ok(Committed { receipt, events })
            }
            Err(e) => {
                self.rejected += 1;
                warn!(
                    seq = self.seq,
                    caller = %caller,
                    call = call.name(),
                    error = %e,
                    "call rejected"
                );
                Err(e)
            }
        }
    }

    /// Runs every invocation in order. A rejected call does not stop the
    /// batch.
    pub fn execute_batch(&mut self, invocations: &[Invocation]) -> Vec<CallOutcome> {
        invocations
            .iter()
            .map(|inv| {
                let result = self.execute(inv.caller, &inv.call);
                let mut outcome = CallOutcome {
                    seq: self.seq,
                    caller: inv.caller,
                    call: inv.call.name().to_string(),
                    ok: result.is_ok(),
                    receipt: None,
                    events: Vec::new(),
                    error: None,
                };
                match result {
                    Ok(committed) => {
                        outcome.receipt = committed.receipt;
                        outcome.events = committed.events;
                    }
                    Err(e) => outcome.error = Some(e.to_string()),
                }
                outcome
            })
            .collect()
    }
}
