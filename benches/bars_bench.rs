use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sonara::audio::bars::BarMapper;

fn bench_bar_mapping(c: &mut Criterion) {
    let mapper = BarMapper::new(96, 1024, 44100);
    let data: Vec<u8> = (0..1024).map(|i| (i % 256) as u8).collect();

    c.bench_function("bar_heights_96x1024", |b| {
        b.iter(|| mapper.heights(black_box(&data)))
    });

    c.bench_function("bar_mapper_build", |b| {
        b.iter(|| BarMapper::new(black_box(96), 1024, 44100))
    });
}

criterion_group!(benches, bench_bar_mapping);
criterion_main!(benches);
