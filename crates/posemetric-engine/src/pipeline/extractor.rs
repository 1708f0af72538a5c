//! Stage 1: joint-angle extraction.
//!
//! Maps a full-topology [`BodyPose`] to an [`AngleSet`] of five named joint
//! angles. Each joint is defined by a keypoint triplet (proximal -> vertex
//! -> distal); bilateral joints are measured on both sides and combined.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use posemetric_core::geometry::{angle_at_vertex, midpoint};
use posemetric_core::types::{AngleSet, BodyPose, KeypointId, Point2D};
use posemetric_core::DEFAULT_CONFIDENCE_THRESHOLD;

/// Configuration for joint-angle extraction.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ExtractorConfig {
    /// Keypoints below this confidence count as missing.
    pub confidence_threshold: f32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

/// Extracts named joint angles from a body pose.
///
/// Bilateral joints (knee, hip, shoulder, elbow) are computed independently
/// per side and the present sides averaged: if exactly one side's triplet
/// is complete, that side's angle is used alone, and the joint is absent
/// only when both sides are incomplete. A missing keypoint therefore
/// degrades exactly the joints that depend on it and nothing else.
///
/// The neck is a single synthetic measurement: the angle at the nose
/// between a ray dropped straight down to the shoulder line's height and
/// the ray to the shoulder midpoint. It reads 0 for perfectly upright
/// posture and grows with forward or lateral head tilt.
#[derive(Debug, Clone, Default)]
pub struct JointAngleExtractor {
    config: ExtractorConfig,
}

impl JointAngleExtractor {
    /// Creates an extractor with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
    }

    /// Creates an extractor with a custom configuration.
    #[must_use]
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Computes the angle set for one pose.
    ///
    /// Absence of any keypoint only ever blanks the joints that need it;
    /// extraction of the remaining joints always proceeds. The `ankle`
    /// field is declared on [`AngleSet`] but has no computation path: the
    /// topology carries no foot keypoint to complete a triplet.
    #[must_use]
    pub fn extract(&self, pose: &BodyPose) -> AngleSet {
        use KeypointId::{
            LeftAnkle, LeftElbow, LeftHip, LeftKnee, LeftShoulder, LeftWrist, RightAnkle,
            RightElbow, RightHip, RightKnee, RightShoulder, RightWrist,
        };

        AngleSet {
            knee: Self::bilateral(
                self.triplet(pose, LeftHip, LeftKnee, LeftAnkle),
                self.triplet(pose, RightHip, RightKnee, RightAnkle),
            ),
            hip: Self::bilateral(
                self.triplet(pose, LeftShoulder, LeftHip, LeftKnee),
                self.triplet(pose, RightShoulder, RightHip, RightKnee),
            ),
            // The opposite shoulder stands in for the missing neck keypoint;
            // it is colinear with the shoulder midpoint as seen from the
            // vertex, so either reference yields the same angle.
            shoulder: Self::bilateral(
                self.triplet(pose, RightShoulder, LeftShoulder, LeftElbow),
                self.triplet(pose, LeftShoulder, RightShoulder, RightElbow),
            ),
            elbow: Self::bilateral(
                self.triplet(pose, LeftShoulder, LeftElbow, LeftWrist),
                self.triplet(pose, RightShoulder, RightElbow, RightWrist),
            ),
            neck: self.neck_angle(pose),
            ankle: None,
        }
    }

    /// Angle at `vertex` for one side's triplet, absent if any keypoint is
    /// missing or the geometry is degenerate.
    fn triplet(
        &self,
        pose: &BodyPose,
        proximal: KeypointId,
        vertex: KeypointId,
        distal: KeypointId,
    ) -> Option<f32> {
        let t = self.config.confidence_threshold;
        let a = pose.confident_position(proximal, t)?;
        let b = pose.confident_position(vertex, t)?;
        let c = pose.confident_position(distal, t)?;
        angle_at_vertex(a, b, c)
    }

    /// Neck deviation from vertical. Requires the nose and both shoulders.
    fn neck_angle(&self, pose: &BodyPose) -> Option<f32> {
        let t = self.config.confidence_threshold;
        let nose = pose.confident_position(KeypointId::Nose, t)?;
        let left = pose.confident_position(KeypointId::LeftShoulder, t)?;
        let right = pose.confident_position(KeypointId::RightShoulder, t)?;

        let mid = midpoint(left, right);
        let vertical_ref = Point2D::new(nose.x, mid.y);
        angle_at_vertex(vertical_ref, nose, mid)
    }

    fn bilateral(left: Option<f32>, right: Option<f32>) -> Option<f32> {
        match (left, right) {
            (Some(l), Some(r)) => Some((l + r) / 2.0),
            (Some(l), None) => Some(l),
            (None, Some(r)) => Some(r),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posemetric_core::types::{Confidence, Keypoint};
    use posemetric_core::KEYPOINT_COUNT;

    /// Upright test pose: straight vertical legs, straight hanging arms,
    /// level shoulders, nose directly above the hip midpoint.
    fn upright_pose() -> BodyPose {
        pose_with(|_| None)
    }

    /// Builds the upright pose, letting the callback override individual
    /// keypoints (return `Some((x, y, confidence))` to replace one).
    fn pose_with(override_fn: impl Fn(KeypointId) -> Option<(f32, f32, f32)>) -> BodyPose {
        let layout = |id: KeypointId| -> (f32, f32) {
            match id {
                KeypointId::Nose => (0.5, 0.20),
                KeypointId::LeftShoulder => (0.42, 0.30),
                KeypointId::RightShoulder => (0.58, 0.30),
                KeypointId::LeftElbow => (0.40, 0.42),
                KeypointId::RightElbow => (0.60, 0.42),
                KeypointId::LeftWrist => (0.38, 0.54),
                KeypointId::RightWrist => (0.62, 0.54),
                KeypointId::LeftHip => (0.45, 0.55),
                KeypointId::RightHip => (0.55, 0.55),
                KeypointId::LeftKnee => (0.45, 0.72),
                KeypointId::RightKnee => (0.55, 0.72),
                KeypointId::LeftAnkle => (0.45, 0.90),
                KeypointId::RightAnkle => (0.55, 0.90),
            }
        };

        let mut keypoints = [Keypoint::new(Point2D::new(0.0, 0.0), Confidence::MIN); KEYPOINT_COUNT];
        for id in KeypointId::all() {
            let (x, y, c) = match override_fn(*id) {
                Some(kp) => kp,
                None => {
                    let (x, y) = layout(*id);
                    (x, y, 0.9)
                }
            };
            keypoints[*id as usize] =
                Keypoint::new(Point2D::new(x, y), Confidence::new(c).unwrap());
        }
        BodyPose::new(keypoints)
    }

    #[test]
    fn upright_pose_has_straight_knees_and_elbows() {
        let angles = JointAngleExtractor::new().extract(&upright_pose());
        assert!((angles.knee.unwrap() - 180.0).abs() < 0.5);
        assert!((angles.elbow.unwrap() - 180.0).abs() < 0.5);
    }

    #[test]
    fn upright_pose_has_zero_neck_deviation() {
        let angles = JointAngleExtractor::new().extract(&upright_pose());
        assert!(angles.neck.unwrap().abs() < 0.5);
    }

    #[test]
    fn tilted_head_increases_neck_angle() {
        let tilted = pose_with(|id| match id {
            KeypointId::Nose => Some((0.58, 0.22, 0.9)),
            _ => None,
        });
        let angles = JointAngleExtractor::new().extract(&tilted);
        assert!(angles.neck.unwrap() > 20.0);
    }

    #[test]
    fn ankle_is_never_populated() {
        let angles = JointAngleExtractor::new().extract(&upright_pose());
        assert_eq!(angles.ankle, None);
    }

    #[test]
    fn missing_hips_blank_dependent_joints_only() {
        let no_hips = pose_with(|id| match id {
            KeypointId::LeftHip | KeypointId::RightHip => Some((0.0, 0.0, 0.1)),
            _ => None,
        });
        let angles = JointAngleExtractor::new().extract(&no_hips);

        assert_eq!(angles.knee, None);
        assert_eq!(angles.hip, None);
        assert!(angles.shoulder.is_some());
        assert!(angles.elbow.is_some());
        assert!(angles.neck.is_some());
    }

    #[test]
    fn degraded_nose_blanks_neck_only() {
        let no_nose = pose_with(|id| match id {
            KeypointId::Nose => Some((0.5, 0.20, 0.2)),
            _ => None,
        });
        let angles = JointAngleExtractor::new().extract(&no_nose);

        assert_eq!(angles.neck, None);
        assert!(angles.knee.is_some());
        assert!(angles.hip.is_some());
        assert!(angles.shoulder.is_some());
        assert!(angles.elbow.is_some());
    }

    #[test]
    fn single_sided_elbow_uses_available_side() {
        // Left wrist drops out; left elbow triplet is incomplete but the
        // right side still measures, so the joint stays present.
        let one_side = pose_with(|id| match id {
            KeypointId::LeftWrist => Some((0.38, 0.54, 0.1)),
            _ => None,
        });
        let angles = JointAngleExtractor::new().extract(&one_side);
        assert!((angles.elbow.unwrap() - 180.0).abs() < 0.5);
    }

    #[test]
    fn elbow_absent_when_both_wrists_missing() {
        let no_wrists = pose_with(|id| match id {
            KeypointId::LeftWrist | KeypointId::RightWrist => Some((0.0, 0.0, 0.1)),
            _ => None,
        });
        let angles = JointAngleExtractor::new().extract(&no_wrists);
        assert_eq!(angles.elbow, None);
        assert!(angles.shoulder.is_some());
    }

    #[test]
    fn bilateral_average_of_asymmetric_sides() {
        // Bend only the right knee; the joint reports the mean of a
        // straight left leg and the bent right leg.
        let bent = pose_with(|id| match id {
            KeypointId::RightAnkle => Some((0.70, 0.72, 0.9)),
            _ => None,
        });
        let angles = JointAngleExtractor::new().extract(&bent);
        let knee = angles.knee.unwrap();
        assert!(knee < 179.0, "mean should drop below straight, got {knee}");
        assert!(knee > 90.0, "left leg is still straight, got {knee}");
    }

    #[test]
    fn custom_threshold_is_respected() {
        let extractor = JointAngleExtractor::with_config(ExtractorConfig {
            confidence_threshold: 0.95,
        });
        // Every keypoint sits at 0.9, below the stricter threshold.
        let angles = extractor.extract(&upright_pose());
        assert_eq!(angles.present_count(), 0);
    }
}
