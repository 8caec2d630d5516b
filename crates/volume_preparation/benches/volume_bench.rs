use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use volume_preparation::{
    CentralSlice, RandomFlip3D, Transform, Volume, VolumeAsymmetricCrop, VolumeCenterCrop,
};

/// Benchmarks for volume transforms.
///
/// This measures:
/// 1. Per-call cost of each transform on its own (stride/offset updates only)
/// 2. A crop → flip → slice pipeline followed by materializing the result
///
/// To run these, use:
/// ```bash
/// cargo bench --bench volume_bench
/// ```

/// Cubic volume edge lengths swept by every benchmark.
const EDGES: [usize; 3] = [32, 64, 128];

fn make_volume(edge: usize) -> Volume<f32> {
    Volume::from_shape_fn((edge, edge, edge), |(i, j, k)| (i + j + k) as f32)
}

/// Measure each transform in isolation
fn bench_single_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("Single Transform");

    for &edge in &EDGES {
        let volume = make_volume(edge);
        let flip = RandomFlip3D::new();
        let center = VolumeCenterCrop::cube(edge / 2).expect("positive crop size");
        let asymmetric = VolumeAsymmetricCrop::new([1, 2, 3], [3, 2, 1]);

        group.bench_with_input(BenchmarkId::new("random_flip_3d", edge), &volume, |b, v| {
            b.iter(|| black_box(flip.apply(v.clone()).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("central_slice", edge), &volume, |b, v| {
            b.iter(|| black_box(CentralSlice.apply(v.clone()).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("center_crop", edge), &volume, |b, v| {
            b.iter(|| black_box(center.apply(v.clone()).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("asymmetric_crop", edge), &volume, |b, v| {
            b.iter(|| black_box(asymmetric.apply(v.clone()).unwrap()))
        });
    }
    group.finish();
}

/// Measure a full pipeline including the copy into standard layout.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pipeline");

    for &edge in &EDGES {
        let volume = make_volume(edge);
        let pipeline = VolumeCenterCrop::cube(edge / 2)
            .expect("positive crop size")
            .then(RandomFlip3D::new())
            .then(CentralSlice);
        group.throughput(Throughput::Elements((edge * edge * edge) as u64));

        group.bench_with_input(BenchmarkId::new("crop+flip+slice", edge), &volume, |b, v| {
            b.iter(|| {
                let out = pipeline.apply(v.clone()).unwrap();
                black_box(out.as_standard_layout().into_owned())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_transforms, bench_pipeline);
criterion_main!(benches);
