use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use santap::core::{Coordinator, RandomThink, StrategyKind, TracingSink};

// Zero think-cap so the harness measures the acquisition protocols, not
// the sleeps.
fn dine(seats: usize, meals: u32, kind: StrategyKind) {
    let coordinator = Coordinator::new(seats, meals).expect("valid table");
    let strategy = kind.build();
    let stats = coordinator
        .run(
            strategy.as_ref(),
            &RandomThink::new(Duration::ZERO),
            &TracingSink,
        )
        .expect("run failed");
    black_box(stats.elapsed());
}

fn bench_admission(c: &mut Criterion) {
    c.bench_function("admission_5_seats_100_meals", |b| {
        b.iter(|| dine(5, 100, StrategyKind::Admission))
    });
}

fn bench_backoff(c: &mut Criterion) {
    c.bench_function("backoff_5_seats_100_meals", |b| {
        b.iter(|| dine(5, 100, StrategyKind::Backoff))
    });
}

criterion_group!(benches, bench_admission, bench_backoff);
criterion_main!(benches);
