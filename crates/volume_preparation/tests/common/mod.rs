use volume_preparation::Volume;

/// Volume whose voxel at `(i, j, k)` holds its own row-major index, so any
/// crop or flip can be checked against a slice of the input.
pub fn indexed_volume(shape: (usize, usize, usize)) -> Volume<u32> {
    let (_, d1, d2) = shape;
    Volume::from_shape_fn(shape, |(i, j, k)| (i * d1 * d2 + j * d2 + k) as u32)
}
