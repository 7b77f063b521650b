use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mathcheck_metrics::MetricsEngine;

const SOLUTION: &str = "Step 1: (2x + 1)^5 = 32x^5 + 80x^4 + 80x^3 + 40x^2 + 10x + 1
Step 2: the x^3 coefficient is 80
Step 3: 3x - 2 = 7
Step 4: 3x = 9
Step 5: x = 3
Step 6: sqrt(8)*sqrt(2) + (x^2 - 1)/(x - 1)";

fn bench_metrics(c: &mut Criterion) {
    let engine = MetricsEngine::default();
    c.bench_function("metrics_evaluate", |b| {
        b.iter(|| {
            let report = engine.evaluate(black_box(SOLUTION), black_box("3"));
            black_box(report);
        });
    });
}

criterion_group!(benches, bench_metrics);
criterion_main!(benches);
