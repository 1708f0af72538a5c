//! Error types for the posemetric engine.
//!
//! The taxonomy separates per-frame, recoverable conditions from failures
//! that are fatal to a capture session:
//!
//! - [`DetectionError`]: the pose model errored for a frame. Never fatal;
//!   the frame simply produces no measurements.
//! - [`CaptureError`]: the capture device failed. Acquisition and permission
//!   failures are fatal to session start; stalls are recoverable inside the
//!   frame loop.
//! - [`CoreError`]: top-level aggregation used where a single error type is
//!   needed across subsystems.
//!
//! Missing or low-confidence keypoints are *not* errors: that absence flows
//! through the type system as `Option` at the joint and sub-score level.

use thiserror::Error;

/// A specialized `Result` type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Top-level error type for the posemetric engine.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoreError {
    /// Pose detection error
    #[error("detection error: {0}")]
    Detection(#[from] DetectionError),

    /// Capture device error
    #[error("capture error: {0}")]
    Capture(#[from] CaptureError),

    /// Validation error for input data
    #[error("validation error: {message}")]
    Validation {
        /// Description of what validation failed
        message: String,
    },
}

impl CoreError {
    /// Creates a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns `true` if the condition is recoverable within a running
    /// session.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Detection(_) => true,
            Self::Capture(e) => e.is_recoverable(),
            Self::Validation { .. } => false,
        }
    }
}

/// Errors from the external pose-detection model.
///
/// All variants are per-frame conditions except [`DetectionError::ModelLoadFailed`],
/// which surfaces through session start.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum DetectionError {
    /// The model has not been loaded yet
    #[error("pose model is not loaded")]
    ModelNotLoaded,

    /// The model failed to load
    #[error("pose model failed to load: {reason}")]
    ModelLoadFailed {
        /// Human-readable description of the load failure
        reason: String,
    },

    /// A single inference call failed
    #[error("pose inference failed: {reason}")]
    InferenceFailed {
        /// Human-readable description of the inference failure
        reason: String,
    },
}

impl DetectionError {
    /// Creates a new load failure.
    #[must_use]
    pub fn load_failed(reason: impl Into<String>) -> Self {
        Self::ModelLoadFailed {
            reason: reason.into(),
        }
    }

    /// Creates a new inference failure.
    #[must_use]
    pub fn inference_failed(reason: impl Into<String>) -> Self {
        Self::InferenceFailed {
            reason: reason.into(),
        }
    }
}

/// Errors from the capture device.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum CaptureError {
    /// The device could not be acquired (unavailable, in use, missing)
    #[error("capture device acquisition failed: {reason}")]
    AcquisitionFailed {
        /// Human-readable description of the acquisition failure
        reason: String,
    },

    /// The user or platform denied access to the device
    #[error("capture device permission denied")]
    PermissionDenied,

    /// The source is paused or otherwise not delivering frames
    #[error("capture source stalled: {reason}")]
    Stalled {
        /// Human-readable description of the stall
        reason: String,
    },

    /// Reading a frame from an acquired source failed
    #[error("frame read failed: {reason}")]
    ReadFailed {
        /// Human-readable description of the read failure
        reason: String,
    },
}

impl CaptureError {
    /// Creates a new acquisition failure.
    #[must_use]
    pub fn acquisition_failed(reason: impl Into<String>) -> Self {
        Self::AcquisitionFailed {
            reason: reason.into(),
        }
    }

    /// Creates a new stall error.
    #[must_use]
    pub fn stalled(reason: impl Into<String>) -> Self {
        Self::Stalled {
            reason: reason.into(),
        }
    }

    /// Creates a new read failure.
    #[must_use]
    pub fn read_failed(reason: impl Into<String>) -> Self {
        Self::ReadFailed {
            reason: reason.into(),
        }
    }

    /// Returns `true` if the frame loop can keep running after this error.
    ///
    /// Acquisition and permission failures are fatal to session start;
    /// stalls and read failures are retried on the next tick.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::AcquisitionFailed { .. } | Self::PermissionDenied => false,
            Self::Stalled { .. } | Self::ReadFailed { .. } => true,
        }
    }
}
