use super::base::{impl_volume_transform, VolumeTransform};
use crate::random::RandomVariables;
use crate::volume::Volume;
use anyhow::Result;
use ndarray::Axis;
use rand::{Rng, RngCore};

// ============================================================================
// RandomFlip3D
// ============================================================================

/// Randomly reverses a volume along each of its three axes.
///
/// Every call draws three independent decisions, each true with probability
/// 0.5, stored as:
///
/// | Variable  | Axis | Meaning     |
/// |-----------|------|-------------|
/// | `flip_lr` | 2    | left-right  |
/// | `flip_ud` | 1    | up-down     |
/// | `flip_z`  | 0    | depth       |
///
/// Flips are applied in that order and only touch strides, so no voxels are
/// copied.
///
/// # Example
/// ```ignore
/// let flip = RandomFlip3D::new();
/// let augmented = flip.apply(volume)?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomFlip3D;

impl RandomFlip3D {
    pub const FLIP_LR: &'static str = "flip_lr";
    pub const FLIP_UD: &'static str = "flip_ud";
    pub const FLIP_Z: &'static str = "flip_z";

    pub fn new() -> Self {
        Self
    }
}

impl VolumeTransform for RandomFlip3D {
    fn build_random_variables(&self, vars: &mut RandomVariables, rng: &mut dyn RngCore) -> Result<()> {
        let flip_lr = rng.random_bool(0.5);
        let flip_ud = rng.random_bool(0.5);
        let flip_z = rng.random_bool(0.5);
        tracing::trace!(flip_lr, flip_ud, flip_z, "drew 3d flip decisions");

        vars.set_random_variable(Self::FLIP_LR, flip_lr)?;
        vars.set_random_variable(Self::FLIP_UD, flip_ud)?;
        vars.set_random_variable(Self::FLIP_Z, flip_z)
    }

    fn volume_function<T>(&self, mut volume: Volume<T>, vars: &RandomVariables) -> Result<Volume<T>> {
        if vars.get_random_variable(Self::FLIP_LR)? {
            volume.invert_axis(Axis(2));
        }
        if vars.get_random_variable(Self::FLIP_UD)? {
            volume.invert_axis(Axis(1));
        }
        if vars.get_random_variable(Self::FLIP_Z)? {
            volume.invert_axis(Axis(0));
        }
        Ok(volume)
    }
}

impl_volume_transform!(RandomFlip3D);
