// Transfer-path benchmarks for the Tollgate engine.
//
// Covers the taxable split, the exempt bypass, and fee arithmetic on
// amounts near the top of the range.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tollgate_protocol::{compute_fee, Address, Amount, FeeTransferEngine, GenesisConfig};

fn engine_with_accounts(accounts: u64) -> FeeTransferEngine {
    let holder = Address::from_low_u64(1);
    let config = GenesisConfig::new(holder, Address::from_low_u64(2));
    let mut engine = FeeTransferEngine::genesis(&config).expect("genesis");
    for n in 0..accounts {
        engine
            .transfer(holder, Address::from_low_u64(100 + n), 1_000_000_000_000_000)
            .expect("seed transfer");
    }
    engine.drain_events();
    engine
}

fn bench_taxable_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/taxable_transfer");
    for accounts in [10u64, 1_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(accounts), &accounts, |b, &n| {
            let mut engine = engine_with_accounts(n);
            let (from, to) = (Address::from_low_u64(100), Address::from_low_u64(101));
            b.iter(|| {
                engine.transfer(from, to, black_box(100)).expect("transfer");
                engine.transfer(to, from, black_box(98)).expect("transfer back");
                engine.drain_events();
            });
        });
    }
    group.finish();
}

fn bench_exempt_transfer(c: &mut Criterion) {
    let mut engine = engine_with_accounts(10);
    let holder = Address::from_low_u64(1);
    let to = Address::from_low_u64(100);

    c.bench_function("engine/exempt_transfer", |b| {
        b.iter(|| {
            engine.transfer(holder, to, black_box(1)).expect("transfer");
            engine.drain_events();
        });
    });
}

fn bench_compute_fee(c: &mut Criterion) {
    c.bench_function("engine/compute_fee_max", |b| {
        b.iter(|| compute_fee(black_box(Amount::MAX), black_box(37)));
    });
}

criterion_group!(
    benches,
    bench_taxable_transfer,
    bench_exempt_transfer,
    bench_compute_fee
);
criterion_main!(benches);
