use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use formtree::{group_pairs, FormTree, FormValues};

fn synthetic_form(rows: usize) -> FormValues {
    let mut pairs = Vec::with_capacity(rows * 4 + 1);
    pairs.push(("document-id".to_string(), "476128394763523".to_string()));
    for row in 0..rows {
        pairs.push((format!("fields.{row}.type"), "location".to_string()));
        pairs.push((format!("fields.{row}.label"), format!("label {row}")));
        pairs.push((format!("fields.{row}.content.0.address"), format!("addr {row}")));
        pairs.push((format!("fields.{row}.content.0.postcode"), format!("pc {row}")));
    }
    group_pairs(pairs)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for rows in [10usize, 100, 1_000] {
        let form = synthetic_form(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &form, |b, form| {
            b.iter(|| FormTree::new(black_box(form)).expect("build"))
        });
    }
    group.finish();
}

fn bench_urlencoded(c: &mut Criterion) {
    let body = synthetic_form(100)
        .iter()
        .flat_map(|(key, values)| values.iter().map(move |value| format!("{key}={value}")))
        .collect::<Vec<_>>()
        .join("&")
        .replace(' ', "+");
    c.bench_function("from_urlencoded/100", |b| {
        b.iter(|| FormTree::from_urlencoded(black_box(body.as_bytes())).expect("build"))
    });
}

criterion_group!(benches, bench_build, bench_urlencoded);
criterion_main!(benches);
