//! src/transforms/volume/config.rs
//!
//! Builds volume pipelines from JSON configuration.
//!
//! ```text
//! [
//!   {"type": "volume_center_crop", "size": 64},
//!   {"type": "random_flip_3d"},
//!   {"type": "volume_asymmetric_crop", "crop_left": [1, 2, 3], "crop_right": [4, 3, 2]},
//!   {"type": "central_slice"}
//! ]
//! ```
//!
//! Every entry is validated when the pipeline is built, so a malformed
//! configuration fails before any volume is loaded.

use super::{CentralSlice, RandomFlip3D, VolumeAsymmetricCrop, VolumeCenterCrop};
use crate::error::VolumeError;
use crate::transforms::{Chain, Transform};
use crate::volume::Volume;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A crop size given either as one number for all axes or as a per-axis list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CropSize {
    Cube(usize),
    PerAxis(Vec<usize>),
}

/// One entry of a pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VolumeTransformConfig {
    #[serde(rename = "random_flip_3d")]
    RandomFlip3D,
    CentralSlice,
    VolumeCenterCrop {
        size: CropSize,
    },
    VolumeAsymmetricCrop {
        crop_left: Vec<usize>,
        crop_right: Vec<usize>,
    },
}

impl VolumeTransformConfig {
    /// Validates the entry and turns it into a boxed transform.
    pub fn build<T>(&self) -> Result<Box<dyn Transform<Volume<T>, Volume<T>>>>
    where
        T: Send + 'static,
    {
        let transform: Box<dyn Transform<Volume<T>, Volume<T>>> = match self {
            Self::RandomFlip3D => Box::new(RandomFlip3D::new()),
            Self::CentralSlice => Box::new(CentralSlice),
            Self::VolumeCenterCrop { size } => Box::new(match size {
                CropSize::Cube(size) => VolumeCenterCrop::cube(*size)?,
                CropSize::PerAxis(size) => VolumeCenterCrop::from_slice(size)?,
            }),
            Self::VolumeAsymmetricCrop {
                crop_left,
                crop_right,
            } => Box::new(VolumeAsymmetricCrop::from_slices(crop_left, crop_right)?),
        };
        Ok(transform)
    }
}

/// Parses a JSON array of transform entries.
pub fn parse_pipeline_config(json: &str) -> Result<Vec<VolumeTransformConfig>> {
    serde_json::from_str(json).map_err(|e| VolumeError::Config(e.to_string()).into())
}

/// Builds the entries in order and chains them into one transform.
pub fn build_pipeline<T>(configs: &[VolumeTransformConfig]) -> Result<Box<dyn Transform<Volume<T>, Volume<T>>>>
where
    T: Send + 'static,
{
    let mut steps = configs.iter().enumerate().map(|(i, config)| {
        config
            .build::<T>()
            .with_context(|| format!("Invalid pipeline entry {}: {:?}", i, config))
    });

    let first = steps
        .next()
        .ok_or_else(|| VolumeError::Config("pipeline must contain at least one transform".into()))??;

    let mut pipeline = first;
    for step in steps {
        pipeline = Box::new(Chain::<_, _, Volume<T>>::new(pipeline, step?));
    }
    Ok(pipeline)
}
