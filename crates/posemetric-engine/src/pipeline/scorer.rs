//! Stage 2: posture biomarker scoring.
//!
//! Folds the extracted angles and a handful of direct keypoint measurements
//! into a composite posture score plus symmetry/balance sub-scores.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use posemetric_core::geometry::midpoint;
use posemetric_core::types::{AngleSet, BiomarkerSet, BodyPose, KeypointId};
use posemetric_core::DEFAULT_CONFIDENCE_THRESHOLD;

/// Converts a normalized [0, 1] coordinate offset into score points.
///
/// The symmetry and balance sub-scores assume normalized keypoint
/// coordinates; with pixel coordinates this scale saturates both scores
/// (see the coordinate convention in `posemetric-core`).
const COORD_SCALE: f32 = 100.0;

/// Configuration for biomarker scoring.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ScorerConfig {
    /// Keypoints below this confidence count as missing.
    pub confidence_threshold: f32,
    /// Posture penalty per degree of neck deviation.
    pub neck_weight: f32,
    /// Posture penalty per point of shoulder asymmetry.
    pub symmetry_weight: f32,
    /// Posture penalty per point of lateral imbalance.
    pub balance_weight: f32,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            neck_weight: 0.5,
            symmetry_weight: 0.2,
            balance_weight: 0.2,
        }
    }
}

/// Derives posture biomarkers from one pose and its angle set.
///
/// The posture score starts at 100 and accumulates penalties:
///
/// 1. neck deviation (degrees times [`ScorerConfig::neck_weight`]);
/// 2. shoulder asymmetry, from the height difference of the two shoulder
///    keypoints;
/// 3. lateral imbalance, from the horizontal offset of the nose against
///    the hip midpoint.
///
/// A sub-score whose inputs are missing is absent and its penalty step is
/// skipped entirely (not treated as a zero score), so an incomplete pose
/// degrades to a best-effort composite rather than failing outright.
#[derive(Debug, Clone, Default)]
pub struct BiomarkerScorer {
    config: ScorerConfig,
}

impl BiomarkerScorer {
    /// Creates a scorer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ScorerConfig::default())
    }

    /// Creates a scorer with a custom configuration.
    #[must_use]
    pub fn with_config(config: ScorerConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Scores one frame.
    #[must_use]
    pub fn score(&self, pose: &BodyPose, angles: &AngleSet) -> BiomarkerSet {
        let mut posture = 100.0_f32;

        if let Some(neck) = angles.neck {
            posture -= neck * self.config.neck_weight;
        }

        let shoulder_symmetry = self.shoulder_symmetry(pose);
        if let Some(symmetry) = shoulder_symmetry {
            posture -= (100.0 - symmetry) * self.config.symmetry_weight;
        }

        let balance_score = self.balance(pose);
        if let Some(balance) = balance_score {
            posture -= (100.0 - balance) * self.config.balance_weight;
        }

        BiomarkerSet {
            posture_score: posture.clamp(0.0, 100.0),
            shoulder_symmetry,
            balance_score,
        }
    }

    /// Shoulder height symmetry in [0, 100]. Requires both shoulders.
    fn shoulder_symmetry(&self, pose: &BodyPose) -> Option<f32> {
        let t = self.config.confidence_threshold;
        let left = pose.confident_position(KeypointId::LeftShoulder, t)?;
        let right = pose.confident_position(KeypointId::RightShoulder, t)?;

        let height_diff = (left.y - right.y).abs();
        Some((100.0 - height_diff * COORD_SCALE).clamp(0.0, 100.0))
    }

    /// Lateral balance in [0, 100]. Requires the nose and both hips.
    fn balance(&self, pose: &BodyPose) -> Option<f32> {
        let t = self.config.confidence_threshold;
        let nose = pose.confident_position(KeypointId::Nose, t)?;
        let left_hip = pose.confident_position(KeypointId::LeftHip, t)?;
        let right_hip = pose.confident_position(KeypointId::RightHip, t)?;

        let hip_mid = midpoint(left_hip, right_hip);
        let horizontal_dev = (nose.x - hip_mid.x).abs();
        Some((100.0 - horizontal_dev * COORD_SCALE).clamp(0.0, 100.0))
    }
}
