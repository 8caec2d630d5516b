pub mod error;
pub mod random;
pub mod transforms;
pub mod volume;

pub use error::VolumeError;
pub use random::{init_worker_rng, reset_worker_rng, with_worker_rng, RandomVariables};
pub use transforms::volume::{
    CentralSlice, RandomFlip3D, VolumeAsymmetricCrop, VolumeCenterCrop,
};
pub use transforms::{Chain, SampleTransform, Transform, VolumeTransform};
pub use volume::{Volume, VolumeSample};
