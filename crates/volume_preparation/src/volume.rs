use anyhow::{anyhow, Result};
use ndarray::Array3;
use std::collections::HashMap;

/// A 3-D block of voxels with shape `(D0, D1, D2)`.
pub type Volume<T> = Array3<T>;

/// The `VolumeSample` struct groups the volumes that belong to one example,
/// e.g. `{"raw": Volume([64, 128, 128]), "label": Volume([64, 128, 128])}`.
///
/// Transforms applied through [`SampleTransform`](crate::transforms::SampleTransform)
/// draw their random variables once and use them for every feature, so a
/// flipped `raw` volume keeps its `label` aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeSample<T> {
    pub features: HashMap<String, Volume<T>>,
}

impl<T> VolumeSample<T> {
    /// Creates a new `VolumeSample` from a full feature map.
    pub fn new(features: HashMap<String, Volume<T>>) -> Self {
        Self { features }
    }

    /// Creates a `VolumeSample` from a single `(feature_name, volume)` pair.
    ///
    /// Chain with [`with_feature`](Self::with_feature) to add more features.
    pub fn from_single(name: impl Into<String>, volume: Volume<T>) -> Self {
        Self {
            features: HashMap::from([(name.into(), volume)]),
        }
    }

    /// Adds or overwrites a feature in the `VolumeSample`.
    pub fn with_feature(mut self, name: impl Into<String>, volume: Volume<T>) -> Self {
        self.features.insert(name.into(), volume);
        self
    }

    /// Returns a reference to the volume by feature name.
    pub fn get(&self, feature: &str) -> Result<&Volume<T>> {
        self.features
            .get(feature)
            .ok_or_else(|| anyhow!("Feature {} not found", feature))
    }

    /// Returns an iterator over all feature names in this `VolumeSample`.
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn into_inner(self) -> HashMap<String, Volume<T>> {
        self.features
    }
}
