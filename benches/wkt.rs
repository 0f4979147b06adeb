use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geoarena::algorithm::native::Area;
use geoarena::arena::Arena;
use geoarena::io::wkt::read_wkt;

fn polygon_wkt(num_vertices: usize) -> String {
    let coords: Vec<String> = (0..=num_vertices)
        .map(|i| {
            let theta = (i % num_vertices) as f64 / num_vertices as f64 * std::f64::consts::TAU;
            format!("{} {}", theta.cos() * 100.0, theta.sin() * 100.0)
        })
        .collect();
    format!("POLYGON (({}))", coords.join(", "))
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let text = polygon_wkt(10_000);
    let mut arena = Arena::new();

    c.bench_function("parse polygon wkt", |b| {
        b.iter(|| {
            arena.reset();
            let geom = read_wkt(&arena, black_box(&text)).unwrap();
            black_box(geom.num_vertices());
        })
    });

    let geom_arena = Arena::new();
    let geom = read_wkt(&geom_arena, &text).unwrap();
    c.bench_function("write polygon wkt", |b| b.iter(|| black_box(&geom).to_string()));
    c.bench_function("polygon area", |b| b.iter(|| black_box(&geom).unsigned_area()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
