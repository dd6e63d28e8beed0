// src/error.rs
use thiserror::Error;

/// Errors raised while deciding on or computing a scaling transform.
///
/// Every failure is detected before any byte reaches the output sink, so a
/// failed write never leaves partial data behind.
#[derive(Debug, Error)]
pub enum WriterError {
    /// Element type string named a non-numeric (opaque/structured) type.
    #[error("cannot cast to or from non-numeric type '{0}'")]
    IncompatibleKinds(String),

    /// Complex source with a non-complex target.
    #[error("cannot cast complex values to non-complex type")]
    ComplexToReal,

    /// Unsigned target, data spans negative and positive, and the writer has
    /// no intercept to recenter with.
    #[error("cannot scale negative and positive numbers to unsigned without intercept")]
    UnsignedSpan,

    /// Computed slope/intercept came out non-finite, or the slope collapsed
    /// to zero in scaler precision.
    #[error("scaling failed: {0}")]
    Scaling(String),

    /// An intercept capability was requested without a slope capability.
    #[error("cannot handle intercept without slope")]
    CapabilityMismatch,

    /// A writer without transform capability was asked for a conversion that
    /// requires one.
    #[error("scaling needed but writer cannot scale")]
    ScalingNeeded,

    /// Sample count does not match the product of the shape dimensions.
    #[error("array has {len} samples but shape {shape:?} implies {expected}")]
    ShapeMismatch {
        len: usize,
        shape: Vec<usize>,
        expected: usize,
    },

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WriterError>;
