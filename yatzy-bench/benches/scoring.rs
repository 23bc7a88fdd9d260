use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use yatzy_bench::dice_samples;
use yatzy_core::Category;

fn bench_scores_for_hand(c: &mut Criterion) {
    let mut g = c.benchmark_group("yatzy_core_scoring");
    for &n in &[256usize, 4096usize] {
        let samples = dice_samples(n);
        g.bench_with_input(BenchmarkId::new("scores_for_hand_batch", n), &samples, |b, s| {
            b.iter(|| {
                for &hand in s.iter() {
                    black_box(yatzy_core::scores_for_hand(black_box(hand)));
                }
            })
        });
    }
    g.finish();
}

fn bench_single_category(c: &mut Criterion) {
    let samples = dice_samples(4096);
    let mut g = c.benchmark_group("yatzy_core_category");
    for cat in [Category::FullHouse, Category::SmallStraight, Category::TwoOfKind] {
        g.bench_with_input(BenchmarkId::new("score", cat.name()), &samples, |b, s| {
            b.iter(|| {
                for &hand in s.iter() {
                    black_box(yatzy_core::score(cat, black_box(hand)));
                }
            })
        });
    }
    g.finish();
}

criterion_group!(benches, bench_scores_for_hand, bench_single_category);
criterion_main!(benches);
