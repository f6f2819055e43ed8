// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Tollgate Protocol — Core Library
//!
//! A deterministic ledger for a single fungible unit, where every transfer
//! between two ordinary accounts hands a whole-percent cut to a collector.
//! This crate is the pure state-transition core: no I/O, no persistence, no
//! threads. Whoever embeds it (see `tollgate-contracts`) serializes calls and
//! provides atomicity.
//!
//! ## Architecture
//!
//! - **account** — The opaque [`Address`] identity and its null value.
//! - **ledger** — Balances and total supply; the one mutation primitive.
//! - **exemption** — Accounts that never pay fees.
//! - **engine** — The fee-applying transfer engine and its admin setters.
//! - **capability** — Pause and access-control seams for collaborators.
//! - **events** — Change notifications, the audit trail.
//! - **config** — Constants and the genesis configuration.
//! - **error** — The shared failure channel.
//!
//! ## Design Philosophy
//!
//! 1. Checked arithmetic only. Money does not wrap.
//! 2. Validate everything, then mutate. A failed call leaves no trace.
//! 3. One aggregate owns all state; nothing global.

pub mod account;
pub mod capability;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod exemption;
pub mod ledger;

/// Amounts in the smallest unit. Unsigned; every operation is checked.
pub type Amount = u128;

pub use account::Address;
pub use capability::{AccessControl, PauseCheck};
pub use config::GenesisConfig;
pub use engine::{compute_fee, FeeDecision, FeeTransferEngine, TransferReceipt};
pub use error::{LedgerError, LedgerResult};
pub use events::{Event, EventLog};
pub use exemption::ExemptionRegistry;
pub use ledger::Ledger;
