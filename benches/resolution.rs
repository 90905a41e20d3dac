//! Benchmarks for position resolution and controller updates

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tts_sync::{estimate, resolve, BoundaryPolicy, SyncController};

fn generate_units(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("Sentence number {} has {} words in it.", i, 6 + i % 5))
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for count in [10, 100, 1000] {
        let intervals = estimate(&generate_units(count), Some(count as f64 * 2.5));
        let total = intervals.last().map_or(0.0, |i| i.end);

        group.bench_with_input(BenchmarkId::new("start", count), &intervals, |b, intervals| {
            b.iter(|| black_box(resolve(intervals, 0.1, BoundaryPolicy::Later)))
        });

        group.bench_with_input(BenchmarkId::new("end", count), &intervals, |b, intervals| {
            b.iter(|| black_box(resolve(intervals, total - 0.1, BoundaryPolicy::Later)))
        });

        group.bench_with_input(BenchmarkId::new("miss", count), &intervals, |b, intervals| {
            b.iter(|| black_box(resolve(intervals, total + 1.0, BoundaryPolicy::Later)))
        });
    }

    group.finish();
}

fn bench_controller_playback(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller");

    for count in [10, 100] {
        let text = generate_units(count).join(" ");
        let duration = count as f64 * 2.5;

        // One full playback at a 250ms position cadence
        group.bench_with_input(BenchmarkId::new("playback", count), &text, |b, text| {
            b.iter_with_setup(
                || {
                    let mut controller = SyncController::default();
                    controller.start_session(text);
                    controller.duration_known(Some(duration)).unwrap();
                    controller
                },
                |mut controller| {
                    let mut t = 0.0;
                    while t <= duration {
                        black_box(controller.position(t).unwrap());
                        t += 0.25;
                    }
                    controller.stop();
                },
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_controller_playback);
criterion_main!(benches);
