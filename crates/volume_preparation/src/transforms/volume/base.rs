//! src/transforms/volume/base.rs
//!
//! The contract every volume transform follows, and the call path that
//! drives it.
//!
//! A call runs in two phases:
//!
//! ```text
//!   fresh RandomVariables ──► build_random_variables(vars, rng)
//!                                   │ decisions stored by name
//!                                   ↓
//!   volume ──────────────────► volume_function(volume, &vars) ──► volume
//! ```
//!
//! The store belongs to the call, never to the transform, so a single
//! instance can serve several threads at once.

use crate::random::{with_worker_rng, RandomVariables};
use crate::transforms::Transform;
use crate::volume::{Volume, VolumeSample};
use anyhow::{anyhow, Context, Result};
use rand::RngCore;

/// A geometric operation on 3-D volumes.
pub trait VolumeTransform: Send + Sync {
    /// Draws the call's random decisions. Deterministic transforms keep the
    /// default, which draws nothing.
    fn build_random_variables(
        &self,
        _vars: &mut RandomVariables,
        _rng: &mut dyn RngCore,
    ) -> Result<()> {
        Ok(())
    }

    /// Transforms one volume using the decisions drawn for this call.
    fn volume_function<T>(&self, volume: Volume<T>, vars: &RandomVariables) -> Result<Volume<T>>;
}

/// Runs `transform` on `volume`, drawing randomness from the thread's worker RNG.
pub fn invoke<V, T>(transform: &V, volume: Volume<T>) -> Result<Volume<T>>
where
    V: VolumeTransform,
{
    with_worker_rng(|rng| invoke_with_rng(transform, volume, rng))
}

/// Runs `transform` on `volume` with an explicit random source.
///
/// Callers that need exact control (tests, replay) pass a seeded or mocked RNG.
pub fn invoke_with_rng<V, T>(
    transform: &V,
    volume: Volume<T>,
    rng: &mut dyn RngCore,
) -> Result<Volume<T>>
where
    V: VolumeTransform,
{
    let mut vars = RandomVariables::new();
    transform.build_random_variables(&mut vars, rng)?;
    transform.volume_function(volume, &vars)
}

/// Implements [`Transform`] on single volumes for volume transforms.
macro_rules! impl_volume_transform {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<T> $crate::transforms::Transform<$crate::volume::Volume<T>, $crate::volume::Volume<T>>
                for $ty
            {
                fn apply(
                    &self,
                    volume: $crate::volume::Volume<T>,
                ) -> anyhow::Result<$crate::volume::Volume<T>> {
                    $crate::transforms::volume::base::invoke(self, volume)
                }
            }
        )+
    };
}
pub(crate) use impl_volume_transform;

// ============================================================================
// SampleTransform
// ============================================================================

/// Applies a volume transform to the features of a [`VolumeSample`].
///
/// Random variables are drawn once per sample, so every selected feature sees
/// the same flips. Use [`apply_to`](Self::apply_to) to leave some features
/// untouched.
///
/// # Example
/// ```ignore
/// let flip = SampleTransform::new(RandomFlip3D::new()).apply_to(["raw", "label"]);
/// let sample = flip.apply(sample)?;
/// ```
#[derive(Debug, Clone)]
pub struct SampleTransform<V> {
    inner: V,
    apply_to: Option<Vec<String>>,
}

impl<V: VolumeTransform> SampleTransform<V> {
    /// Wraps `inner`; by default every feature is transformed.
    pub fn new(inner: V) -> Self {
        Self {
            inner,
            apply_to: None,
        }
    }

    /// Restricts the transform to the named features.
    ///
    /// Repeated names are kept once, so each feature is transformed at most once per call.
    pub fn apply_to<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        let mut selected: Vec<String> = Vec::new();
        for name in names.into_iter().map(Into::into) {
            if !selected.contains(&name) {
                selected.push(name);
            }
        }
        self.apply_to = Some(selected);
        self
    }

    /// Same as [`Transform::apply`] but with an explicit random source.
    pub fn apply_with_rng<T>(
        &self,
        mut sample: VolumeSample<T>,
        rng: &mut dyn RngCore,
    ) -> Result<VolumeSample<T>> {
        let mut vars = RandomVariables::new();
        self.inner.build_random_variables(&mut vars, rng)?;

        let targets: Vec<String> = match &self.apply_to {
            Some(names) => names.clone(),
            None => sample.features.keys().cloned().collect(),
        };

        for name in targets {
            let volume = sample
                .features
                .remove(&name)
                .ok_or_else(|| anyhow!("Feature {} not found", name))?;
            let transformed = self
                .inner
                .volume_function(volume, &vars)
                .with_context(|| format!("Failed to transform feature '{}'", name))?;
            sample.features.insert(name, transformed);
        }
        Ok(sample)
    }
}

impl<V, T> Transform<VolumeSample<T>, VolumeSample<T>> for SampleTransform<V>
where
    V: VolumeTransform,
{
    fn apply(&self, sample: VolumeSample<T>) -> Result<VolumeSample<T>> {
        with_worker_rng(|rng| self.apply_with_rng(sample, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VolumeError;
    use crate::transforms::volume::VolumeAsymmetricCrop;
    use ndarray::Axis;

    /// Reverses axis 0 when its coin comes up true.
    struct CoinFlipZ;

    impl VolumeTransform for CoinFlipZ {
        fn build_random_variables(
            &self,
            vars: &mut RandomVariables,
            rng: &mut dyn RngCore,
        ) -> Result<()> {
            vars.set_random_variable("coin", rng.next_u32() % 2 == 0)
        }

        fn volume_function<T>(
            &self,
            mut volume: Volume<T>,
            vars: &RandomVariables,
        ) -> Result<Volume<T>> {
            if vars.get_random_variable("coin")? {
                volume.invert_axis(Axis(0));
            }
            Ok(volume)
        }
    }

    /// Reads a variable nobody built.
    struct Forgetful;

    impl VolumeTransform for Forgetful {
        fn volume_function<T>(&self, volume: Volume<T>, vars: &RandomVariables) -> Result<Volume<T>> {
            vars.get_random_variable("never_built")?;
            Ok(volume)
        }
    }

    fn ramp() -> Volume<i32> {
        Volume::from_shape_fn((3, 2, 2), |(z, y, x)| (z * 4 + y * 2 + x) as i32)
    }

    #[test]
    fn test_sample_features_share_random_variables() -> Result<()> {
        let transform = SampleTransform::new(CoinFlipZ);
        for _ in 0..20 {
            let sample = VolumeSample::from_single("raw", ramp()).with_feature("label", ramp());
            let out = transform.apply(sample)?;
            assert_eq!(out.get("raw")?, out.get("label")?);
        }
        Ok(())
    }

    #[test]
    fn test_apply_to_leaves_other_features_untouched() -> Result<()> {
        let transform = SampleTransform::new(CoinFlipZ).apply_to(["raw"]);
        // Mask never moves; raw flips at least once over 64 draws
        let mut flipped_once = false;
        for _ in 0..64 {
            let sample = VolumeSample::from_single("raw", ramp()).with_feature("mask", ramp());
            let out = transform.apply(sample)?;
            assert_eq!(out.get("mask")?, &ramp());
            flipped_once |= out.get("raw")? != &ramp();
        }
        assert!(flipped_once);
        Ok(())
    }

    #[test]
    fn test_apply_to_repeated_name_transforms_once() -> Result<()> {
        let crop = SampleTransform::new(VolumeAsymmetricCrop::new([1, 0, 0], [0, 0, 0]))
            .apply_to(["raw", "raw"]);
        let sample = VolumeSample::from_single("raw", Volume::<u8>::zeros((6, 4, 4)));

        let out = crop.apply(sample)?;
        assert_eq!(out.get("raw")?.dim(), (5, 4, 4));
        Ok(())
    }

    #[test]
    fn test_apply_to_missing_feature_fails() {
        let transform = SampleTransform::new(CoinFlipZ).apply_to(["label"]);
        let sample = VolumeSample::from_single("raw", ramp());
        let err = transform.apply(sample).unwrap_err();
        assert!(err.to_string().contains("label"));
    }

    #[test]
    fn test_missing_random_variable_surfaces() {
        let mut rng = rand::rng();
        let err = invoke_with_rng(&Forgetful, ramp(), &mut rng).unwrap_err();
        assert_eq!(
            err.downcast_ref::<VolumeError>(),
            Some(&VolumeError::MissingRandomVariable("never_built".into()))
        );
    }
}
