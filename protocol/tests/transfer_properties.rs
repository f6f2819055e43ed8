//! Property tests for the transfer engine.
//!
//! Random transfer sequences over a small set of accounts, checking that
//! supply is conserved, that fee splits are exact, and that failures leave
//! balances untouched.

use proptest::prelude::*;
use tollgate_protocol::{
    compute_fee, Address, Amount, FeeDecision, FeeTransferEngine, GenesisConfig, LedgerError,
};

const HOLDER: u64 = 1;
const COLLECTOR: u64 = 2;

fn addr(n: u64) -> Address {
    Address::from_low_u64(n)
}

/// Engine whose genesis supply is spread over accounts 10..15 (non-exempt).
fn seeded_engine(rate: u8, per_account: Amount) -> FeeTransferEngine {
    let config = GenesisConfig::new(addr(HOLDER), addr(COLLECTOR))
        .with_fee_rate(rate)
        .with_initial_supply(per_account * 10);
    let mut engine = FeeTransferEngine::genesis(&config).unwrap();
    for n in 10..15 {
        engine.transfer(addr(HOLDER), addr(n), per_account).unwrap();
    }
    engine
}

fn snapshot(engine: &FeeTransferEngine) -> Vec<(Address, Amount)> {
    engine.ledger().holders()
}

proptest! {
    #[test]
    fn prop_supply_is_conserved(
        rate in 0u8..=100,
        ops in prop::collection::vec((10u64..16, 10u64..16, 0u128..2_000), 1..40),
    ) {
        let mut engine = seeded_engine(rate, 1_000);
        let supply = engine.total_supply();

        for (from, to, amount) in ops {
            let _ = engine.transfer(addr(from), addr(to), amount);
            prop_assert_eq!(engine.total_supply(), supply);
            prop_assert!(engine.ledger().is_conserved());
        }
    }

    #[test]
    fn prop_fee_split_is_exact(
        rate in 1u8..=100,
        amount in 1u128..=1_000,
    ) {
        let mut engine = seeded_engine(rate, 1_000);
        let (from, to, collector) = (addr(10), addr(11), addr(COLLECTOR));
        let before = (
            engine.balance_of(&from),
            engine.balance_of(&to),
            engine.balance_of(&collector),
        );

        let receipt = engine.transfer(from, to, amount).unwrap();
        let fee = amount * Amount::from(rate) / 100;

        prop_assert_eq!(receipt.fee, fee);
        prop_assert_eq!(engine.balance_of(&from), before.0 - amount);
        prop_assert_eq!(engine.balance_of(&to), before.1 + amount - fee);
        prop_assert_eq!(engine.balance_of(&collector), before.2 + fee);
    }

    #[test]
    fn prop_exempt_party_receives_full_amount(
        rate in 0u8..=100,
        amount in 0u128..=1_000,
        exempt_sender in any::<bool>(),
    ) {
        let mut engine = seeded_engine(rate, 1_000);
        let (from, to) = (addr(10), addr(11));
        engine.set_exempt(if exempt_sender { from } else { to }, true);

        let receipt = engine.transfer(from, to, amount).unwrap();
        prop_assert_eq!(receipt.fee, 0);
        prop_assert_eq!(engine.balance_of(&to), 1_000 + amount);
        prop_assert_eq!(engine.balance_of(&addr(COLLECTOR)), 0);
    }

    #[test]
    fn prop_overspend_changes_nothing(
        rate in 0u8..=100,
        excess in 1u128..=10_000,
    ) {
        let mut engine = seeded_engine(rate, 1_000);
        let before = snapshot(&engine);

        let result = engine.transfer(addr(10), addr(11), 1_000 + excess);
        let is_insufficient = matches!(result, Err(LedgerError::InsufficientBalance { .. }));
        prop_assert!(is_insufficient);
        prop_assert_eq!(snapshot(&engine), before);
    }

    #[test]
    fn prop_compute_fee_matches_wide_formula(
        amount in any::<u64>(),
        rate in 0u8..=100,
    ) {
        let amount = Amount::from(amount);
        prop_assert_eq!(compute_fee(amount, rate), amount * Amount::from(rate) / 100);
    }
}

#[test]
fn rounding_to_zero_example() {
    let mut engine = seeded_engine(2, 1_000);
    let receipt = engine.transfer(addr(10), addr(11), 49).unwrap();
    assert_eq!(receipt.decision, FeeDecision::RoundedToZero);
    assert_eq!(engine.balance_of(&addr(11)), 1_049);
    assert_eq!(engine.balance_of(&addr(COLLECTOR)), 0);
}

#[test]
fn exemption_toggled_mid_sequence() {
    let mut engine = seeded_engine(10, 1_000);
    let (from, to, collector) = (addr(10), addr(11), addr(COLLECTOR));

    engine.transfer(from, to, 100).unwrap();
    assert_eq!(engine.balance_of(&collector), 10);

    engine.set_exempt(to, true);
    engine.transfer(from, to, 100).unwrap();
    assert_eq!(engine.balance_of(&collector), 10);

    engine.set_exempt(to, false);
    engine.transfer(from, to, 100).unwrap();
    assert_eq!(engine.balance_of(&collector), 20);
    assert_eq!(engine.balance_of(&from), 700);
    assert_eq!(engine.balance_of(&to), 1_280);
}
