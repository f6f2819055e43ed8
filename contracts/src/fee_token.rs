//! # Fee Token Contract
//!
//! The public face of the ledger. [`FeeToken`] wraps the fee-applying
//! [`FeeTransferEngine`] with everything a fungible token needs around it:
//! metadata, an owner, a pause switch and delegated spending.
//!
//! ## Transfer pipeline
//!
//! Every balance movement runs the same four steps, in order:
//!
//! 1. **authorize** — the caller moves its own funds, or holds an allowance
//!    covering the gross amount; neither party may be the null identity.
//! 2. **pause-check** — refused with `SystemPaused` while the switch is on.
//! 3. **balance-check** — the sender must cover the gross amount.
//! 4. **mutate** — the engine splits and applies; a consumed allowance is
//!    reduced last.
//!
//! Every step before 4 is read-only, so a rejected transfer leaves the token
//! exactly as it was.
//!
//! ## Security Model
//!
//! - **Admin gating**: fee rate, collector, exemptions, pause and ownership
//!   are owner-only. Admin operations are not pause-gated.
//! - **No mint/burn surface**: supply is fixed at genesis; public transfers
//!   reject the null identity on either side.

use serde::{Deserialize, Serialize};
use tollgate_protocol::{
    AccessControl, Address, Amount, Event, EventLog, FeeTransferEngine, GenesisConfig,
    LedgerError, LedgerResult, PauseCheck, TransferReceipt,
};
use tracing::{debug, info};

use crate::access_control::Ownership;
use crate::allowance::Allowances;
use crate::pause::PauseSwitch;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Display metadata. Never consulted by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Human-readable name (e.g., "Tollgate Token").
    pub name: String,
    /// Ticker symbol, upper-cased at genesis.
    pub symbol: String,
    /// Display decimals.
    pub decimals: u8,
}

/// Who is moving the funds in a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Authority {
    /// The sender itself.
    Holder,
    /// A third party spending an allowance.
    Spender(Address),
}

/// The token contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeToken {
    metadata: TokenMetadata,
    engine: FeeTransferEngine,
    ownership: Ownership,
    pause: PauseSwitch,
    allowances: Allowances,
    #[serde(skip)]
    events: EventLog,
}

impl FeeToken {
    /// Deploys a token from `config`: installs the owner, mints the initial
    /// supply and seeds the holder and collector exemptions.
    ///
    /// # Errors
    ///
    /// Whatever [`GenesisConfig::validate`] rejects.
    pub fn genesis(config: &GenesisConfig) -> LedgerResult<Self> {
        config.validate()?;
        let (ownership, ownership_event) = Ownership::new(config.effective_owner())?;
        let engine = FeeTransferEngine::genesis(config)?;

        let mut token = Self {
            metadata: TokenMetadata {
                name: config.name.clone(),
                symbol: config.symbol.trim().to_uppercase(),
                decimals: config.decimals,
            },
            engine,
            ownership,
            pause: PauseSwitch::new(),
            allowances: Allowances::new(),
            events: EventLog::new(),
        };
        token.events.emit(ownership_event);
        token.absorb_engine_events();

        info!(
            symbol = %token.metadata.symbol,
            owner = %token.owner(),
            supply = %token.total_supply(),
            "token deployed"
        );
        Ok(token)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Token name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Ticker symbol.
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Display decimals.
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// All metadata at once.
    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn total_supply(&self) -> Amount {
        self.engine.total_supply()
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.engine.balance_of(account)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances.allowance(owner, spender)
    }

    pub fn is_exempt(&self, account: &Address) -> bool {
        self.engine.is_exempt(account)
    }

    pub fn fee_rate(&self) -> u8 {
        self.engine.fee_rate()
    }

    pub fn collector(&self) -> Option<Address> {
        self.engine.collector()
    }

    pub fn owner(&self) -> Address {
        self.ownership.owner()
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    /// The engine underneath, for inspection.
    pub fn engine(&self) -> &FeeTransferEngine {
        &self.engine
    }

    /// How a transfer would be split right now. Does not check balances,
    /// allowances or the pause switch.
    pub fn quote(&self, from: Address, to: Address, amount: Amount) -> LedgerResult<TransferReceipt> {
        self.engine.quote(from, to, amount)
    }

    /// Events emitted since the last drain.
    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    /// Hands every buffered event to the caller.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain()
    }

    // -----------------------------------------------------------------------
    // Transfers
    // -----------------------------------------------------------------------

    /// Moves `amount` of the caller's own funds to `to`.
    pub fn transfer(&mut self, caller: Address, to: Address, amount: Amount) -> LedgerResult<TransferReceipt> {
        self.run_transfer(Authority::Holder, caller, to, amount)
    }

    /// Moves `amount` from `from` to `to` on `from`'s behalf, consuming the
    /// caller's allowance. The allowance covers the gross amount.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> LedgerResult<TransferReceipt> {
        self.run_transfer(Authority::Spender(caller), from, to, amount)
    }

    /// Sets the caller's allowance for `spender`. Overwrites, does not add.
    pub fn approve(&mut self, caller: Address, spender: Address, amount: Amount) -> LedgerResult<()> {
        if caller.is_zero() {
            return Err(LedgerError::InvalidSender(caller));
        }
        if spender.is_zero() {
            return Err(LedgerError::InvalidSpender(spender));
        }
        self.allowances.approve(caller, spender, amount);
        self.events.emit(Event::Approval {
            owner: caller,
            spender,
            amount,
        });
        debug!(owner = %caller, spender = %spender, amount = %amount, "approval set");
        Ok(())
    }

    fn run_transfer(
        &mut self,
        authority: Authority,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> LedgerResult<TransferReceipt> {
        self.authorize(authority, from, to, amount)?;
        self.pause.ensure_not_paused()?;
        self.engine.ledger().ensure_balance(&from, amount)?;

        let receipt = self.engine.transfer(from, to, amount)?;
        if let Authority::Spender(spender) = authority {
            self.allowances.spend(from, spender, amount);
        }
        self.absorb_engine_events();
        Ok(receipt)
    }

    fn authorize(&self, authority: Authority, from: Address, to: Address, amount: Amount) -> LedgerResult<()> {
        if from.is_zero() {
            return Err(LedgerError::InvalidSender(from));
        }
        if to.is_zero() {
            return Err(LedgerError::InvalidReceiver(to));
        }
        match authority {
            Authority::Holder => Ok(()),
            Authority::Spender(spender) => self.allowances.ensure(&from, &spender, amount),
        }
    }

    // -----------------------------------------------------------------------
    // Administration
    // -----------------------------------------------------------------------

    /// Owner-only: replaces the fee rate.
    pub fn set_fee_rate(&mut self, caller: Address, rate: u8) -> LedgerResult<()> {
        self.ownership.ensure_owner(&caller)?;
        self.engine.set_fee_rate(rate)?;
        self.absorb_engine_events();
        Ok(())
    }

    /// Owner-only: replaces the fee collector.
    pub fn set_collector(&mut self, caller: Address, collector: Address) -> LedgerResult<()> {
        self.ownership.ensure_owner(&caller)?;
        self.engine.set_collector(collector)?;
        self.absorb_engine_events();
        Ok(())
    }

    /// Owner-only: writes an exemption flag. Notifies even when unchanged.
    pub fn set_exempt(&mut self, caller: Address, account: Address, exempt: bool) -> LedgerResult<()> {
        self.ownership.ensure_owner(&caller)?;
        self.engine.set_exempt(account, exempt);
        self.absorb_engine_events();
        Ok(())
    }

    /// Owner-only: halts transfers.
    pub fn pause(&mut self, caller: Address) -> LedgerResult<()> {
        self.ownership.ensure_owner(&caller)?;
        let event = self.pause.pause(caller)?;
        self.events.emit(event);
        info!(by = %caller, "transfers paused");
        Ok(())
    }

    /// Owner-only: resumes transfers.
    pub fn unpause(&mut self, caller: Address) -> LedgerResult<()> {
        self.ownership.ensure_owner(&caller)?;
        let event = self.pause.unpause(caller)?;
        self.events.emit(event);
        info!(by = %caller, "transfers resumed");
        Ok(())
    }

    /// Owner-only: hands administration to `new_owner`.
    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> LedgerResult<()> {
        let event = self.ownership.transfer(&caller, new_owner)?;
        self.events.emit(event);
        info!(old = %caller, new = %new_owner, "ownership transferred");
        Ok(())
    }

    /// Owner-only: gives administration up permanently.
    pub fn renounce_ownership(&mut self, caller: Address) -> LedgerResult<()> {
        let event = self.ownership.renounce(&caller)?;
        self.events.emit(event);
        info!(old = %caller, "ownership renounced");
        Ok(())
    }

    fn absorb_engine_events(&mut self) {
        for event in self.engine.drain_events() {
            self.events.emit(event);
        }
    }
}
