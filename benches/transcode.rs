use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lutbake::{dense_table, round_table, transcode, ShapeInference};

/// A dense `side^ndims` table with a mix of decimals, integers and `nan`.
fn cube_table(side: usize, ndims: u32) -> String {
    let cells = side.pow(ndims);
    let mut input = String::with_capacity(cells * 24);
    for offset in 0..cells {
        let mut rest = offset;
        let mut index = vec![0; ndims as usize];
        for slot in index.iter_mut().rev() {
            *slot = rest % side;
            rest /= side;
        }
        for i in index {
            input.push_str(&i.to_string());
            input.push(' ');
        }
        match offset % 7 {
            0 => input.push_str("nan"),
            1 => input.push_str(&offset.to_string()),
            _ => input.push_str(&format!("{:.9e}", offset as f64 / 3.0)),
        }
        input.push('\n');
    }
    input
}

fn benchmark_transcode(c: &mut Criterion) {
    let mut group = c.benchmark_group("transcode");

    for side in [8, 16, 32].iter() {
        let input = cube_table(*side, 3);
        group.bench_with_input(BenchmarkId::from_parameter(side), &input, |b, input| {
            b.iter(|| transcode(black_box(input)))
        });
    }
    group.finish();
}

fn benchmark_shape_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("shape_inference");
    let input = cube_table(8, 4);

    group.bench_function("last_row", |b| {
        b.iter(|| dense_table(black_box(&input), ShapeInference::LastRow))
    });

    group.bench_function("max_scan", |b| {
        b.iter(|| dense_table(black_box(&input), ShapeInference::MaxScan))
    });

    group.finish();
}

fn benchmark_round(c: &mut Criterion) {
    let input = cube_table(16, 3);

    c.bench_function("round_table_16x16x16", |b| {
        b.iter(|| round_table(black_box(&input)))
    });
}

fn benchmark_pipeline(c: &mut Criterion) {
    let input = cube_table(16, 3);

    c.bench_function("round_then_transcode", |b| {
        b.iter(|| {
            let rounded = round_table(black_box(&input)).unwrap();
            let _literal = transcode(black_box(&rounded)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_transcode,
    benchmark_shape_inference,
    benchmark_round,
    benchmark_pipeline
);
criterion_main!(benches);
