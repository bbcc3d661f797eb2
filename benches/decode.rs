use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mic_decoder::decoder::extract;
use mic_decoder::{
    DotMatrix, LayoutKind, ParityConvention, ValidationOptions, Validator, decode, decode_batch,
};

fn sample_grid(kind: LayoutKind) -> Vec<Vec<u8>> {
    let layout = kind.layout();
    let mut matrix = DotMatrix::new(layout);
    for (field, value) in [(1, 50u32), (4, 18), (5, 11), (6, 4), (7, 8), (9, 127), (13, 21)] {
        for bit in 0..7 {
            matrix
                .set_field_bit(field, bit, ((value >> bit) & 1) as u8)
                .unwrap();
        }
    }
    matrix.to_grid()
}

fn bench_decode_standard(c: &mut Criterion) {
    let grid = sample_grid(LayoutKind::Standard);
    let layout = LayoutKind::Standard.layout();
    c.bench_function("decode_standard", |b| {
        b.iter(|| decode(black_box(layout), black_box(&grid), ValidationOptions::default()))
    });
}

fn bench_decode_rotated(c: &mut Criterion) {
    let grid = sample_grid(LayoutKind::Rotated);
    let layout = LayoutKind::Rotated.layout();
    c.bench_function("decode_rotated", |b| {
        b.iter(|| decode(black_box(layout), black_box(&grid), ValidationOptions::default()))
    });
}

fn bench_extract_only(c: &mut Criterion) {
    let layout = LayoutKind::Standard.layout();
    let mut matrix = DotMatrix::new(layout);
    matrix.load(&sample_grid(LayoutKind::Standard)).unwrap();
    c.bench_function("extract_standard", |b| b.iter(|| extract(black_box(&matrix))));
}

fn bench_validate_only(c: &mut Criterion) {
    let layout = LayoutKind::Standard.layout();
    let mut matrix = DotMatrix::new(layout);
    matrix.load(&sample_grid(LayoutKind::Standard)).unwrap();
    let validator =
        Validator::new(ValidationOptions::default().with_parity(ParityConvention::Odd));
    c.bench_function("validate_standard", |b| {
        b.iter(|| validator.validate(black_box(&matrix)))
    });
}

fn bench_decode_batch(c: &mut Criterion) {
    let grids = vec![sample_grid(LayoutKind::VariantB); 1000];
    let layout = LayoutKind::VariantB.layout();
    c.bench_function("decode_batch_1000", |b| {
        b.iter(|| decode_batch(black_box(layout), black_box(&grids), ValidationOptions::default()))
    });
}

criterion_group!(
    benches,
    bench_decode_standard,
    bench_decode_rotated,
    bench_extract_only,
    bench_validate_only,
    bench_decode_batch
);
criterion_main!(benches);
