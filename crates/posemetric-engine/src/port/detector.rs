//! The pose-detection port.

use async_trait::async_trait;
use posemetric_core::error::DetectionError;
use posemetric_core::types::BodyPose;

/// Port abstracting the external pose-detection model.
///
/// The model is a black box that maps a capture frame to a full-topology
/// [`BodyPose`] or an explicit "no pose detected" signal (`Ok(None)`). The
/// engine never depends on a particular model's wire format beyond this
/// contract.
#[async_trait]
pub trait PoseDetectorPort<F>: Send {
    /// Loads the model. Awaited once during session start.
    ///
    /// # Errors
    ///
    /// Returns [`DetectionError::ModelLoadFailed`]; fatal to session start.
    async fn load(&mut self) -> Result<(), DetectionError>;

    /// Returns `true` once the model is loaded and ready to detect.
    fn is_ready(&self) -> bool;

    /// Runs one detection.
    ///
    /// `Ok(None)` means the model ran but found no full-topology pose in
    /// the frame. Errors are per-frame conditions; the frame loop logs them
    /// and continues.
    ///
    /// # Errors
    ///
    /// Returns [`DetectionError`] if inference itself failed.
    async fn detect(&mut self, frame: &F) -> Result<Option<BodyPose>, DetectionError>;
}
