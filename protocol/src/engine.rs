//! # Fee-Applying Transfer Engine
//!
//! [`FeeTransferEngine`] owns the ledger, the exemption registry and the fee
//! configuration, and turns a transfer request into one or two
//! [`Ledger::move_funds`] calls.
//!
//! ## Decision order
//!
//! 1. Null sender, null receiver or zero amount → plain move, never taxed.
//! 2. Either party exempt, or the rate is 0 → plain move of the full amount.
//! 3. Otherwise `fee = ⌊amount · rate / 100⌋`:
//!    - `fee > 0` → `from → collector` for the fee, then `from → to` for the
//!      rest. The source balance is checked once for the whole amount first.
//!    - `fee == 0` → the whole amount reaches the receiver.
//!
//! A self-transfer on the taxable path is not special-cased: the sender pays
//! the collector and then pays itself the net, losing exactly the fee.
//!
//! Authorization and the pause switch are the caller's business (see
//! [`crate::capability`]).

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::account::Address;
use crate::config::{GenesisConfig, FEE_RATE_DENOMINATOR, MAX_FEE_RATE};
use crate::error::{LedgerError, LedgerResult};
use crate::events::{Event, EventLog};
use crate::exemption::ExemptionRegistry;
use crate::ledger::Ledger;
use crate::Amount;

// ---------------------------------------------------------------------------
// Fee arithmetic
// ---------------------------------------------------------------------------

/// `⌊amount · rate / 100⌋`, computed without an intermediate product so it
/// cannot overflow for any `amount`. Rates above [`MAX_FEE_RATE`] are
/// clamped.
pub fn compute_fee(amount: Amount, rate: u8) -> Amount {
    let rate = Amount::from(rate.min(MAX_FEE_RATE));
    let whole = amount / FEE_RATE_DENOMINATOR;
    let rest = amount % FEE_RATE_DENOMINATOR;
    whole * rate + rest * rate / FEE_RATE_DENOMINATOR
}

// ---------------------------------------------------------------------------
// Receipts
// ---------------------------------------------------------------------------

/// Why a transfer was or was not taxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeDecision {
    /// Sender or receiver is the null identity (mint or burn).
    NullParty,
    /// Nothing to move.
    ZeroAmount,
    /// Sender or receiver is on the exemption list.
    Exempt,
    /// The fee rate is 0.
    ZeroRate,
    /// Taxable, but the fee floored to 0.
    RoundedToZero,
    /// A non-zero fee went to the collector.
    Charged,
}

impl FeeDecision {
    /// Returns `true` if the collector received something.
    pub fn is_charged(&self) -> bool {
        matches!(self, FeeDecision::Charged)
    }
}

impl std::fmt::Display for FeeDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeeDecision::NullParty => write!(f, "null-party"),
            FeeDecision::ZeroAmount => write!(f, "zero-amount"),
            FeeDecision::Exempt => write!(f, "exempt"),
            FeeDecision::ZeroRate => write!(f, "zero-rate"),
            FeeDecision::RoundedToZero => write!(f, "rounded-to-zero"),
            FeeDecision::Charged => write!(f, "charged"),
        }
    }
}

/// Outcome of a transfer, or of a quote for one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Debited account.
    pub from: Address,
    /// Receiving account.
    pub to: Address,
    /// Gross amount debited from `from`.
    pub amount: Amount,
    /// Portion routed to the collector.
    pub fee: Amount,
    /// Portion credited to `to`. Always `amount - fee`.
    pub net: Amount,
    /// Collector that received `fee`, when one was charged.
    pub collector: Option<Address>,
    /// How the fee was decided.
    pub decision: FeeDecision,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Ledger + exemptions + fee configuration, as one aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeeTransferEngine {
    ledger: Ledger,
    exemptions: ExemptionRegistry,
    /// Whole-percent fee rate, `0..=100`.
    fee_rate: u8,
    /// Fee recipient. [`Address::ZERO`] means not configured.
    collector: Address,
    #[serde(skip)]
    events: EventLog,
}

impl FeeTransferEngine {
    /// Creates an empty engine with the given configuration and no supply.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidRate`] or [`LedgerError::NullCollector`].
    pub fn new(fee_rate: u8, collector: Address) -> LedgerResult<Self> {
        check_rate(fee_rate)?;
        if collector.is_zero() {
            return Err(LedgerError::NullCollector);
        }
        Ok(Self {
            fee_rate,
            collector,
            ..Self::default()
        })
    }

    /// Brings a ledger into existence: mints the initial supply to the
    /// holder and seeds the holder and collector as exempt.
    ///
    /// The mint is the only event emitted; the exemption seeding is silent.
    pub fn genesis(config: &GenesisConfig) -> LedgerResult<Self> {
        config.validate()?;
        let mut engine = Self::new(config.fee_rate, config.collector)?;
        engine.record_move(Address::ZERO, config.initial_holder, config.initial_supply)?;
        engine.exemptions.set_exempt(config.initial_holder, true);
        engine.exemptions.set_exempt(config.collector, true);

        info!(
            holder = %config.initial_holder,
            collector = %config.collector,
            supply = %config.initial_supply,
            fee_rate = config.fee_rate,
            "ledger genesis"
        );
        Ok(engine)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Balance of `account`.
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.ledger.balance_of(account)
    }

    /// Total supply.
    pub fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    /// Whether `account` is fee-exempt.
    pub fn is_exempt(&self, account: &Address) -> bool {
        self.exemptions.is_exempt(account)
    }

    /// Current fee rate, whole percent.
    pub fn fee_rate(&self) -> u8 {
        self.fee_rate
    }

    /// Configured collector, if any.
    pub fn collector(&self) -> Option<Address> {
        (!self.collector.is_zero()).then_some(self.collector)
    }

    /// The underlying ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The underlying exemption registry.
    pub fn exemptions(&self) -> &ExemptionRegistry {
        &self.exemptions
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

    /// Works out how a transfer would be split, without touching state or
    /// checking balances.
    ///
    /// # Errors
    ///
    /// [`LedgerError::CollectorUnset`] if a non-zero fee is due and no
    /// collector is configured.
    pub fn quote(&self, from: Address, to: Address, amount: Amount) -> LedgerResult<TransferReceipt> {
        let untaxed = |decision| TransferReceipt {
            from,
            to,
            amount,
            fee: 0,
            net: amount,
            collector: None,
            decision,
        };

        if from.is_zero() || to.is_zero() {
            return Ok(untaxed(FeeDecision::NullParty));
        }
        if amount == 0 {
            return Ok(untaxed(FeeDecision::ZeroAmount));
        }
        if self.is_exempt(&from) || self.is_exempt(&to) {
            return Ok(untaxed(FeeDecision::Exempt));
        }
        if self.fee_rate == 0 {
            return Ok(untaxed(FeeDecision::ZeroRate));
        }

        let fee = compute_fee(amount, self.fee_rate);
        if fee == 0 {
            return Ok(untaxed(FeeDecision::RoundedToZero));
        }
        let collector = self.collector().ok_or(LedgerError::CollectorUnset)?;

        Ok(TransferReceipt {
            from,
            to,
            amount,
            fee,
            net: amount - fee,
            collector: Some(collector),
            decision: FeeDecision::Charged,
        })
    }

    /// Moves `amount` from `from` to `to`, splitting off the fee when the
    /// transfer is taxable.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InsufficientBalance`] if `from` cannot cover `amount`.
    /// - [`LedgerError::CollectorUnset`] if a fee is due and nobody collects it.
    /// - Any mint/credit overflow reported by the ledger.
    ///
    /// A failed transfer changes nothing and emits nothing.
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> LedgerResult<TransferReceipt> {
        let receipt = self.quote(from, to, amount)?;
        self.ledger.ensure_balance(&from, amount)?;

        match receipt.collector {
            Some(collector) => {
                self.record_move(from, collector, receipt.fee)?;
                if let Err(e) = self.record_move(from, to, receipt.net) {
                    self.undo_fee(&receipt, collector);
                    return Err(e);
                }
            }
            None => self.record_move(from, to, amount)?,
        }

        debug!(
            from = %from,
            to = %to,
            amount = %amount,
            fee = %receipt.fee,
            decision = %receipt.decision,
            "transfer applied"
        );
        Ok(receipt)
    }

    fn record_move(&mut self, from: Address, to: Address, amount: Amount) -> LedgerResult<()> {
        self.ledger.move_funds(&from, &to, amount)?;
        self.events.emit(Event::Transfer { from, to, amount });
        Ok(())
    }

    /// Reverses the fee leg of a split whose second leg failed.
    fn undo_fee(&mut self, receipt: &TransferReceipt, collector: Address) {
        if self
            .ledger
            .move_funds(&collector, &receipt.from, receipt.fee)
            .is_ok()
        {
            self.events.retract_last();
        }
    }

    // -----------------------------------------------------------------------
    // Administration
    // -----------------------------------------------------------------------

    /// Replaces the fee rate and returns the old one.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidRate`] if `rate > 100`; the rate is unchanged.
    pub fn set_fee_rate(&mut self, rate: u8) -> LedgerResult<u8> {
        check_rate(rate)?;
        let old = std::mem::replace(&mut self.fee_rate, rate);
        self.events.emit(Event::FeeRateChanged { old, new: rate });
        info!(old, new = rate, "fee rate changed");
        Ok(old)
    }

    /// Replaces the collector and returns the old one ([`Address::ZERO`] if
    /// none was configured).
    ///
    /// # Errors
    ///
    /// [`LedgerError::NullCollector`] for the null identity.
    pub fn set_collector(&mut self, collector: Address) -> LedgerResult<Address> {
        if collector.is_zero() {
            return Err(LedgerError::NullCollector);
        }
        let old = std::mem::replace(&mut self.collector, collector);
        self.events.emit(Event::CollectorChanged {
            old,
            new: collector,
        });
        info!(old = %old, new = %collector, "collector changed");
        Ok(old)
    }

    /// Writes the exemption flag for `account` and returns the old flag.
    ///
    /// Always emits [`Event::ExemptionChanged`], even when the flag already
    /// had the requested value.
    pub fn set_exempt(&mut self, account: Address, flag: bool) -> bool {
        let old = self.exemptions.set_exempt(account, flag);
        self.events.emit(Event::ExemptionChanged {
            account,
            old,
            new: flag,
        });
        info!(account = %account, old, new = flag, "exemption set");
        old
    }
}

fn check_rate(rate: u8) -> LedgerResult<()> {
    if rate > MAX_FEE_RATE {
        return Err(LedgerError::InvalidRate {
            rate,
            max: MAX_FEE_RATE,
        });
    }
    Ok(())
}
