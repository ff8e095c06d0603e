use archive_coords::models::{FrameQuery, SkyPosition};
use archive_coords::utils::{sexagesimal_dec_to_decimal, sexagesimal_ra_to_decimal};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// Mix of valid, out-of-range and non-matching form input
fn create_test_coordinates(count: usize) -> Vec<(String, String)> {
    (0..count)
        .map(|i| {
            let ra = match i % 4 {
                0 => format!("{:02}:{:02}:{:02}.{}", i % 24, i % 60, (i * 7) % 60, i % 10),
                1 => format!("{}:{:02}", i % 24, i % 60),
                2 => format!("{}:75:00", i % 24),
                _ => format!("{}.5", i % 360),
            };
            let dec = match i % 3 {
                0 => format!("-{:02}:{:02}:{:02}", i % 90, i % 60, (i * 3) % 59),
                1 => format!("+{}:{:02}.5", i % 90, i % 59),
                _ => "garbage".to_string(),
            };
            (ra, dec)
        })
        .collect()
}

fn benchmark_ra_conversion(c: &mut Criterion) {
    let inputs = ["10:30:00", "23:59:59.999", "1:2", "24:00:00", "garbage"];

    c.bench_function("ra_conversion", |b| {
        b.iter(|| {
            let mut results = Vec::with_capacity(inputs.len());
            for ra in &inputs {
                results.push(sexagesimal_ra_to_decimal(black_box(ra)));
            }
            black_box(results.len())
        })
    });
}

fn benchmark_dec_conversion(c: &mut Criterion) {
    let inputs = ["+45:30:00", "-90:00:00", "-00:30", "91:00:00", ""];

    c.bench_function("dec_conversion", |b| {
        b.iter(|| {
            let mut results = Vec::with_capacity(inputs.len());
            for dec in &inputs {
                results.push(sexagesimal_dec_to_decimal(black_box(dec)));
            }
            black_box(results.len())
        })
    });
}

fn benchmark_frame_query(c: &mut Criterion) {
    let query = FrameQuery::new()
        .with_position("00:42:44.3", "+41:16:09")
        .with_object("M31");

    c.bench_function("frame_query_pairs", |b| {
        b.iter(|| black_box(query.to_query_pairs().len()))
    });
}

fn benchmark_varying_batch_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("positions_by_batch_size");

    for &size in &[10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("positions", size), &size, |b, &count| {
            let coordinates = create_test_coordinates(count);

            b.iter(|| {
                let valid = coordinates
                    .iter()
                    .filter_map(|(ra, dec)| {
                        let ra = sexagesimal_ra_to_decimal(ra);
                        let dec = sexagesimal_dec_to_decimal(dec);
                        SkyPosition::parse(&ra, &dec).ok()
                    })
                    .count();
                black_box(valid)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_ra_conversion,
    benchmark_dec_conversion,
    benchmark_frame_query,
    benchmark_varying_batch_sizes
);
criterion_main!(benches);
