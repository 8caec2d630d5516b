//! src/error.rs
//!
//! Typed failures raised by volume transforms.
//!
//! Public APIs return `anyhow::Result` like the rest of the pipeline. The
//! `VolumeError` carried inside can be recovered with
//! `err.downcast_ref::<VolumeError>()`, also through `Chain` context.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VolumeError {
    /// Malformed constructor arguments or pipeline configuration.
    #[error("invalid transform configuration: {0}")]
    Config(String),

    /// A per-axis parameter did not have one entry per axis.
    #[error("`{name}` must have exactly 3 elements (got {got})")]
    Length { name: &'static str, got: usize },

    /// A crop window does not fit inside the input along `axis`.
    #[error("crop window {start}..{end} on axis {axis} exceeds extent {extent}")]
    CropOutOfBounds {
        axis: usize,
        start: usize,
        end: usize,
        extent: usize,
    },

    /// Left and right margins leave nothing of `axis`.
    #[error(
        "margins {left} + {right} on axis {axis} leave no voxels of extent {extent}"
    )]
    MarginsExceedExtent {
        axis: usize,
        left: usize,
        right: usize,
        extent: usize,
    },

    /// The input has no elements along `axis`.
    #[error("volume is empty along axis {axis}")]
    EmptyAxis { axis: usize },

    #[error("random variable `{0}` was not built for this call")]
    MissingRandomVariable(String),

    #[error("random variable `{0}` is already set for this call")]
    RandomVariableRedefined(String),
}
