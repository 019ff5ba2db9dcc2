use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Vector2;
use ndarray::Array2;
use std::hint::black_box;
use vds_geometry::{
    AxisDescriptor, CoordinateConverter, CoordinateSystem, FenceRequest, GridModel, IndexPoint,
    Interpolation, WorldPoint,
};

fn converter() -> CoordinateConverter {
    let grid = GridModel::new(
        WorldPoint::new(431_000.0, 6_348_000.0),
        Vector2::new(10.8, 6.2),
        Vector2::new(-3.1, 5.4),
    )
    .unwrap();
    CoordinateConverter::new(
        grid,
        AxisDescriptor::from_step(1000, 1000.0, 1.0, "Inline", "unitless"),
        AxisDescriptor::from_step(2000, 2000.0, 2.0, "Crossline", "unitless"),
    )
}

fn bench_single_points(c: &mut Criterion) {
    let converter = converter();

    c.bench_function("index_to_world", |b| {
        b.iter(|| converter.index_to_world(black_box(IndexPoint::new(517, 1033))))
    });

    let world = converter.index_to_world(IndexPoint::new(517, 1033));
    c.bench_function("world_to_index", |b| {
        b.iter(|| converter.world_to_index(black_box(world)))
    });
}

fn bench_fence(c: &mut Criterion) {
    let converter = converter();
    let points = Array2::from_shape_fn((10_000, 2), |(n, axis)| {
        let index = IndexPoint::new((n % 1000) as i64, (n % 2000) as i64);
        let world = converter.index_to_world(index);
        if axis == 0 {
            world.x
        } else {
            world.y
        }
    });
    let request = FenceRequest::new(CoordinateSystem::Cdp, Interpolation::Nearest);

    c.bench_function("fence_cdp_10k", |b| {
        b.iter(|| request.resolve(&converter, black_box(points.view())))
    });
}

criterion_group!(benches, bench_single_points, bench_fence);
criterion_main!(benches);
