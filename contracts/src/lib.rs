//! # Tollgate Contracts
//!
//! The token surface built around the fee-applying transfer engine:
//!
//! - **Fee Token** — metadata, transfers, delegated spending and the owner's
//!   administrative setters, all funnelled through one ordered pipeline
//!   (authorize → pause-check → balance-check → mutate).
//! - **Access Control** — a single owner with transferable, renounceable
//!   privilege.
//! - **Pause** — a global switch that halts every balance movement.
//! - **Allowances** — approve/spend bookkeeping for third-party transfers.
//! - **Runtime** — the transactional host: one call at a time, committed in
//!   full or not at all.
//!
//! ## Design Principles
//!
//! 1. All monetary operations are checked. Wrapping arithmetic and money do
//!    not mix.
//! 2. Privileged operations name their caller explicitly; there is no
//!    ambient "current sender".
//! 3. Every public type is serializable (serde) for scripting and reports.

pub mod access_control;
pub mod allowance;
pub mod fee_token;
pub mod pause;
pub mod runtime;

pub use fee_token::{FeeToken, TokenMetadata};
pub use runtime::{Call, CallOutcome, Committed, Host, Invocation};
