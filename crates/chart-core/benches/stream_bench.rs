use chart_core::headless::{HeadlessCanvas, RecordingRenderer};
use chart_core::{Chart, ChartOptions, Series, SeriesHandle};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn build_chart(series: usize, stack: bool) -> (Chart, Vec<SeriesHandle>) {
    let mut chart = Chart::new(
        HeadlessCanvas::new(800, 400),
        RecordingRenderer::new(),
        ChartOptions { stack, ..ChartOptions::default() },
    )
    .expect("valid options");
    let handles = (0..series).map(|_| chart.add_series(Series::default())).collect();
    (chart, handles)
}

fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_frame");
    for &(n, stack) in &[(1usize, false), (4usize, true)] {
        group.bench_function(format!("series_{n}_stack_{stack}"), |b| {
            let (mut chart, handles) = build_chart(n, stack);
            let mut now = 0.0f64;
            b.iter(|| {
                // ~16 samples per series per 60 Hz frame.
                for _ in 0..16 {
                    now += 1.0;
                    for h in &handles {
                        h.append(now, (now * 0.01).sin()).expect("ordered append");
                    }
                }
                black_box(chart.build_frame(now));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stream);
criterion_main!(benches);
