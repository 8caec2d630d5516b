pub mod core;
pub mod volume;

pub use self::core::{Chain, Transform};
pub use volume::{SampleTransform, VolumeTransform};
