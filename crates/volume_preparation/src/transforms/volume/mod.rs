//! src/transforms/volume/mod.rs
//!
//! Volume transforms for 3-D augmentation.
//!
//! # Module Organization
//!
//! ```text
//! transforms/volume/
//! ├── base.rs          → VolumeTransform contract, call path, SampleTransform
//! ├── augmentation.rs  → Random augmentation (RandomFlip3D)
//! ├── geometric.rs     → Deterministic crops (CentralSlice, VolumeCenterCrop, VolumeAsymmetricCrop)
//! └── config.rs        → Pipelines built from JSON configuration
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use crate::transforms::Transform;
//! use crate::transforms::volume::{RandomFlip3D, VolumeCenterCrop};
//!
//! let pipeline = VolumeCenterCrop::cube(64)?.then(RandomFlip3D::new());
//! let augmented = pipeline.apply(volume)?;
//! ```

pub mod augmentation;
pub mod base;
pub mod config;
pub mod geometric;

pub use augmentation::RandomFlip3D;
pub use base::{invoke, invoke_with_rng, SampleTransform, VolumeTransform};
pub use config::{build_pipeline, parse_pipeline_config, CropSize, VolumeTransformConfig};
pub use geometric::{CentralSlice, VolumeAsymmetricCrop, VolumeCenterCrop};
