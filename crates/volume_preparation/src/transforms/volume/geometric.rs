use super::base::{impl_volume_transform, VolumeTransform};
use crate::error::VolumeError;
use crate::random::RandomVariables;
use crate::volume::Volume;
use anyhow::Result;
use ndarray::{Axis, Slice};

/// Narrows `volume` to `start..end` along `axis` without copying.
fn crop_axis<T>(volume: &mut Volume<T>, axis: usize, start: usize, end: usize) -> Result<()> {
    let extent = volume.len_of(Axis(axis));
    if start >= end || end > extent {
        return Err(VolumeError::CropOutOfBounds {
            axis,
            start,
            end,
            extent,
        }
        .into());
    }
    volume.slice_axis_inplace(Axis(axis), Slice::from(start..end));
    Ok(())
}

// ============================================================================
// CentralSlice
// ============================================================================

/// Keeps only the middle slice along axis 0.
///
/// A `(D0, D1, D2)` volume becomes `(1, D1, D2)`, holding slice `D0 / 2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CentralSlice;

impl VolumeTransform for CentralSlice {
    fn volume_function<T>(&self, mut volume: Volume<T>, _vars: &RandomVariables) -> Result<Volume<T>> {
        let depth = volume.len_of(Axis(0));
        if depth == 0 {
            return Err(VolumeError::EmptyAxis { axis: 0 }.into());
        }
        let half = depth / 2;
        crop_axis(&mut volume, 0, half, half + 1)?;
        Ok(volume)
    }
}

// ============================================================================
// VolumeCenterCrop
// ============================================================================

/// Crops a patch of size `(th, tw, td)` from the center of the volume.
///
/// Offsets are `round((extent - target) / 2)` with ties to even. The offset
/// and length computed from the width (`tw`, axis-1 extent) are applied to
/// axis 0, and those from the height (`th`, axis-0 extent) to axis 1. For
/// `th == tw` on inputs with equal first two extents this is the plain center
/// crop.
///
/// # Example
/// ```ignore
/// let crop = VolumeCenterCrop::cube(64)?;
/// let patch = crop.apply(volume)?; // (64, 64, 64)
/// ```
#[derive(Debug, Clone)]
pub struct VolumeCenterCrop {
    size: [usize; 3],
}

impl VolumeCenterCrop {
    /// Creates a crop with explicit `[th, tw, td]` sizes.
    pub fn new(size: [usize; 3]) -> Result<Self> {
        if size.contains(&0) {
            return Err(VolumeError::Config(format!(
                "crop size must be positive on every axis (got {:?})",
                size
            ))
            .into());
        }
        Ok(Self { size })
    }

    /// Creates a crop with the same size on all three axes.
    pub fn cube(size: usize) -> Result<Self> {
        Self::new([size; 3])
    }

    /// Creates a crop from a per-axis list, which must have 3 entries.
    pub fn from_slice(size: &[usize]) -> Result<Self> {
        let size: [usize; 3] = size.try_into().map_err(|_| VolumeError::Length {
            name: "size",
            got: size.len(),
        })?;
        Self::new(size)
    }

    pub fn size(&self) -> [usize; 3] {
        self.size
    }
}

/// Start of a centered window of `target` voxels inside `extent` voxels.
fn centered_offset(extent: usize, target: usize, axis: usize) -> Result<usize> {
    let margin = extent.checked_sub(target).ok_or(VolumeError::CropOutOfBounds {
        axis,
        start: 0,
        end: target,
        extent,
    })?;
    Ok((margin as f64 / 2.0).round_ties_even() as usize)
}

impl VolumeTransform for VolumeCenterCrop {
    fn volume_function<T>(&self, mut volume: Volume<T>, _vars: &RandomVariables) -> Result<Volume<T>> {
        let (h, w, d) = volume.dim();
        let [th, tw, td] = self.size;
        let x1 = centered_offset(w, tw, 1)?;
        let y1 = centered_offset(h, th, 0)?;
        let z1 = centered_offset(d, td, 2)?;
        tracing::debug!(x1, y1, z1, size = ?self.size, "center crop window");

        crop_axis(&mut volume, 0, x1, x1 + tw)?;
        crop_axis(&mut volume, 1, y1, y1 + th)?;
        crop_axis(&mut volume, 2, z1, z1 + td)?;
        Ok(volume)
    }
}

// ============================================================================
// VolumeAsymmetricCrop
// ============================================================================

/// Crops `crop_left` voxels from the low borders and `crop_right` voxels from
/// the high borders of each axis.
///
/// A margin pair that would consume a whole axis fails the call instead of
/// producing an empty volume.
///
/// # Example
/// ```ignore
/// let crop = VolumeAsymmetricCrop::new([1, 2, 3], [4, 3, 2]);
/// let cropped = crop.apply(volume)?; // (10, 10, 10) -> (5, 5, 5)
/// ```
#[derive(Debug, Clone)]
pub struct VolumeAsymmetricCrop {
    crop_left: [usize; 3],
    crop_right: [usize; 3],
}

impl VolumeAsymmetricCrop {
    pub fn new(crop_left: [usize; 3], crop_right: [usize; 3]) -> Self {
        Self {
            crop_left,
            crop_right,
        }
    }

    /// Creates a crop from per-axis lists, which must have 3 entries each.
    pub fn from_slices(crop_left: &[usize], crop_right: &[usize]) -> Result<Self> {
        let left: [usize; 3] = crop_left.try_into().map_err(|_| VolumeError::Length {
            name: "crop_left",
            got: crop_left.len(),
        })?;
        let right: [usize; 3] = crop_right.try_into().map_err(|_| VolumeError::Length {
            name: "crop_right",
            got: crop_right.len(),
        })?;
        Ok(Self::new(left, right))
    }
}

impl VolumeTransform for VolumeAsymmetricCrop {
    fn volume_function<T>(&self, mut volume: Volume<T>, _vars: &RandomVariables) -> Result<Volume<T>> {
        for axis in 0..3 {
            let extent = volume.len_of(Axis(axis));
            let (left, right) = (self.crop_left[axis], self.crop_right[axis]);
            let end = extent
                .checked_sub(right)
                .filter(|&end| end > left)
                .ok_or(VolumeError::MarginsExceedExtent {
                    axis,
                    left,
                    right,
                    extent,
                })?;
            crop_axis(&mut volume, axis, left, end)?;
        }
        Ok(volume)
    }
}

impl_volume_transform!(CentralSlice, VolumeCenterCrop, VolumeAsymmetricCrop);
