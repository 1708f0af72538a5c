//! # posemetric-core
//!
//! Core types, errors, and geometry for the posemetric pose-analysis engine.
//!
//! This crate provides the foundational building blocks used throughout the
//! posemetric workspace, including:
//!
//! - **Core Data Types**: [`BodyPose`], [`Keypoint`], [`KeypointId`],
//!   [`AngleSet`], and [`BiomarkerSet`] for representing per-frame pose
//!   detections and the biomechanical measurements derived from them.
//!
//! - **Error Types**: the error taxonomy via the [`error`] module, split by
//!   subsystem (capture vs. detection) and by recoverability.
//!
//! - **Geometry**: the pure planar-angle primitive [`geometry::angle_at_vertex`]
//!   and its helpers.
//!
//! ## Coordinate convention
//!
//! All keypoint coordinates are expected to be normalized to `[0.0, 1.0]`
//! image space. The engine itself only requires consistency within a frame,
//! but the biomarker scoring scale (see `posemetric-engine`) is calibrated
//! for normalized coordinates; feeding pixel coordinates will saturate the
//! symmetry and balance sub-scores.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization of domain types via serde
//!
//! ## Example
//!
//! ```rust
//! use posemetric_core::{Confidence, Keypoint, KeypointId, Point2D};
//!
//! let keypoint = Keypoint::new(
//!     Point2D::new(0.5, 0.3),
//!     Confidence::new(0.95).unwrap(),
//! );
//!
//! assert!(keypoint.is_confident(0.5));
//! assert_eq!(KeypointId::Nose.name(), "nose");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod types;

// Re-export commonly used types at the crate root
pub use error::{CaptureError, CoreError, CoreResult, DetectionError};
pub use types::{
    // Pose types
    BodyPose, Confidence, Keypoint, KeypointId, Point2D,
    // Measurement types
    AngleSet, BiomarkerSet, FrameAnalysis,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of keypoints in the body topology
pub const KEYPOINT_COUNT: usize = 13;

/// Default confidence threshold below which a keypoint counts as missing
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Prelude module for convenient imports.
///
/// ```rust
/// use posemetric_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{CaptureError, CoreError, CoreResult, DetectionError};
    pub use crate::geometry::{angle_at_vertex, midpoint};
    pub use crate::types::{
        AngleSet, BiomarkerSet, BodyPose, Confidence, FrameAnalysis, Keypoint, KeypointId,
        Point2D,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_valid() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_constants() {
        assert_eq!(KEYPOINT_COUNT, 13);
        assert!(DEFAULT_CONFIDENCE_THRESHOLD > 0.0);
        assert!(DEFAULT_CONFIDENCE_THRESHOLD < 1.0);
    }
}
