//! Scripted pose detector for tests and demos.

use std::collections::VecDeque;

use async_trait::async_trait;
use posemetric_core::error::DetectionError;
use posemetric_core::types::BodyPose;

use crate::port::PoseDetectorPort;

/// One scripted detection step.
pub type DetectionStep = Result<Option<BodyPose>, DetectionError>;

/// A pose detector that plays back a prepared sequence of detections.
///
/// Steps are consumed in order; once the script is exhausted the detector
/// returns its fallback (a fixed pose, or "no pose detected" when none was
/// set). Detecting before `load` reports [`DetectionError::ModelNotLoaded`],
/// matching how a real model backend behaves.
#[derive(Debug, Default)]
pub struct ScriptedDetector {
    script: VecDeque<DetectionStep>,
    fallback: Option<BodyPose>,
    loaded: bool,
    load_failure: Option<DetectionError>,
    detect_calls: u64,
}

impl ScriptedDetector {
    /// Creates a detector that plays the given steps, then falls back to
    /// "no pose detected".
    #[must_use]
    pub fn from_script(steps: impl IntoIterator<Item = DetectionStep>) -> Self {
        Self {
            script: steps.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Creates a detector that returns the same pose on every frame.
    #[must_use]
    pub fn repeating(pose: BodyPose) -> Self {
        Self {
            fallback: Some(pose),
            ..Self::default()
        }
    }

    /// Creates a detector whose model load fails.
    #[must_use]
    pub fn failing_load(error: DetectionError) -> Self {
        Self {
            load_failure: Some(error),
            ..Self::default()
        }
    }

    /// Sets the pose returned once the script is exhausted.
    #[must_use]
    pub fn with_fallback(mut self, pose: BodyPose) -> Self {
        self.fallback = Some(pose);
        self
    }

    /// Number of detection calls served so far.
    #[must_use]
    pub fn detect_calls(&self) -> u64 {
        self.detect_calls
    }
}

#[async_trait]
impl<F: Send + Sync> PoseDetectorPort<F> for ScriptedDetector {
    async fn load(&mut self) -> Result<(), DetectionError> {
        if let Some(failure) = &self.load_failure {
            return Err(failure.clone());
        }
        self.loaded = true;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.loaded
    }

    async fn detect(&mut self, _frame: &F) -> Result<Option<BodyPose>, DetectionError> {
        if !self.loaded {
            return Err(DetectionError::ModelNotLoaded);
        }
        self.detect_calls += 1;
        match self.script.pop_front() {
            Some(step) => step,
            None => Ok(self.fallback.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posemetric_core::types::{Confidence, Keypoint, Point2D};
    use posemetric_core::KEYPOINT_COUNT;

    fn any_pose() -> BodyPose {
        BodyPose::new([Keypoint::new(Point2D::new(0.5, 0.5), Confidence::MAX); KEYPOINT_COUNT])
    }

    #[tokio::test]
    async fn detect_before_load_is_an_error() {
        let mut detector = ScriptedDetector::repeating(any_pose());
        let err = PoseDetectorPort::<u64>::detect(&mut detector, &0)
            .await
            .unwrap_err();
        assert!(matches!(err, DetectionError::ModelNotLoaded));
    }

    #[tokio::test]
    async fn script_plays_in_order_then_falls_back() {
        let mut detector = ScriptedDetector::from_script([
            Ok(Some(any_pose())),
            Ok(None),
            Err(DetectionError::inference_failed("transient")),
        ]);
        PoseDetectorPort::<u64>::load(&mut detector).await.unwrap();
        assert!(<ScriptedDetector as PoseDetectorPort<u64>>::is_ready(&detector));

        assert!(PoseDetectorPort::<u64>::detect(&mut detector, &0)
            .await
            .unwrap()
            .is_some());
        assert!(PoseDetectorPort::<u64>::detect(&mut detector, &1)
            .await
            .unwrap()
            .is_none());
        assert!(PoseDetectorPort::<u64>::detect(&mut detector, &2)
            .await
            .is_err());
        // Script exhausted, no fallback configured.
        assert!(PoseDetectorPort::<u64>::detect(&mut detector, &3)
            .await
            .unwrap()
            .is_none());
        assert_eq!(detector.detect_calls(), 4);
    }

    #[tokio::test]
    async fn failing_load_surfaces_the_error() {
        let mut detector =
            ScriptedDetector::failing_load(DetectionError::load_failed("weights missing"));
        let err = PoseDetectorPort::<u64>::load(&mut detector).await.unwrap_err();
        assert!(matches!(err, DetectionError::ModelLoadFailed { .. }));
        assert!(!<ScriptedDetector as PoseDetectorPort<u64>>::is_ready(&detector));
    }
}
