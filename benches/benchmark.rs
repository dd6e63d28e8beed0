use criterion::{black_box, criterion_group, criterion_main, Criterion};
use raster_scale::array::{ArrayHandle, TypedArray};
use raster_scale::io::writer::MemoryOrder;
use raster_scale::numeric::kind::{ElemType, ScalerKind};
use raster_scale::numeric::range::finite_range;
use raster_scale::writer::make_array_writer;

/// Benchmark the finite-range reduction in isolation
fn benchmark_finite_range(c: &mut Criterion) {
    let size = 1024 * 1024;
    let mut data = vec![0.0f32; size];
    for (i, v) in data.iter_mut().enumerate() {
        *v = (i % 10000) as f32 - 5000.0;
    }
    let array = TypedArray::F32(data);

    c.bench_function("finite_range_f32_1m", |b| {
        b.iter(|| finite_range(black_box(&array)))
    });
}

/// Benchmark scale computation for float data quantized to i16
fn benchmark_calc_scale(c: &mut Criterion) {
    let size = 1024 * 1024;
    let mut data = vec![0.0f32; size];
    for (i, v) in data.iter_mut().enumerate() {
        *v = (i % 10000) as f32 - 5000.0;
    }
    let array = TypedArray::F32(data);

    c.bench_function("calc_scale_f32_to_i16", |b| {
        b.iter(|| {
            let writer = make_array_writer(
                ArrayHandle::flat(black_box(&array)),
                ElemType::I16,
                true,
                true,
                ScalerKind::F32,
            )
            .unwrap();
            black_box(writer);
        })
    });
}

/// Benchmark the full scaled streaming write into a memory sink
fn benchmark_stream_write(c: &mut Criterion) {
    let size = 1024 * 1024;
    let mut data = vec![0.0f32; size];
    for (i, v) in data.iter_mut().enumerate() {
        *v = (i % 10000) as f32 - 5000.0;
    }
    let array = TypedArray::F32(data);

    c.bench_function("stream_write_f32_to_i16_1m", |b| {
        b.iter(|| {
            let mut writer = make_array_writer(
                ArrayHandle::flat(&array),
                ElemType::I16,
                true,
                true,
                ScalerKind::F32,
            )
            .unwrap();
            let mut sink = Vec::with_capacity(size * 2);
            writer
                .write(&mut sink, MemoryOrder::Row, true)
                .unwrap();
            black_box(sink);
        })
    });
}

criterion_group!(
    benches,
    benchmark_finite_range,
    benchmark_calc_scale,
    benchmark_stream_write
);
criterion_main!(benches);
