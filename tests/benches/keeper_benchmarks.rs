//! # Keeper Benchmarks
//!
//! Hot paths of the accountability flow on in-memory stores:
//!
//! - Budget registration (validation + sequence + batch commit)
//! - Approval recording with scorecard lookups
//! - Disbursement registration against a growing running total
//! - Genesis export/import of a populated node
//!
//! Run with: `cargo bench -p tc-tests`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use tc_05_budget_registry::BudgetRegistryApi;
use tc_tests::fixtures::{budget, disbursement, procurement, seat_officials, world, CONTRACT_URI};

fn bench_budget_registration(c: &mut Criterion) {
    let mut group = c.benchmark_group("tc-05/register_budget");
    for existing in [0u64, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(existing), &existing, |b, &n| {
            let mut node = world();
            for i in 0..n {
                node.budgets
                    .register_budget(budget(i + 1))
                    .expect("seed budget");
            }
            b.iter(|| {
                node.budgets
                    .register_budget(black_box(budget(1_000)))
                    .expect("register")
            });
        });
    }
    group.finish();
}

fn bench_record_approval(c: &mut Criterion) {
    c.bench_function("tc-03/record_budget_approval", |b| {
        let mut node = world();
        let (auditor, controller) = seat_officials(&mut node).expect("officials");
        let id = node.budgets.register_budget(budget(1_000)).expect("budget");
        b.iter(|| {
            node.record_budget_approval(id, auditor.approval(), CONTRACT_URI)
                .expect("auditor");
            node.record_budget_approval(id, controller.approval(), "")
                .expect("controller")
        });
    });
}

fn bench_disbursement_registration(c: &mut Criterion) {
    c.bench_function("tc-07/register_disbursement", |b| {
        b.iter_batched(
            || {
                let mut node = world();
                let budget_id = node.budgets.register_budget(budget(u64::MAX)).expect("budget");
                let procurement_id = node
                    .register_procurement(procurement(budget_id, u64::MAX))
                    .expect("procurement");
                (node, procurement_id)
            },
            |(mut node, procurement_id)| {
                for _ in 0..100 {
                    node.register_disbursement(disbursement(procurement_id, 1_000))
                        .expect("disbursement");
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_genesis_round_trip(c: &mut Criterion) {
    let mut node = world();
    for i in 0..1_000u64 {
        node.budgets.register_budget(budget(i + 1)).expect("budget");
    }
    let genesis = node.export_genesis().expect("export");

    c.bench_function("runtime/import_genesis_1000_budgets", |b| {
        b.iter_batched(
            || genesis.clone(),
            |genesis| {
                let mut target = world();
                target.import_genesis(genesis).expect("import");
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_budget_registration,
    bench_record_approval,
    bench_disbursement_registration,
    bench_genesis_round_trip,
);
criterion_main!(benches);
