//! Core data types for the posemetric engine.
//!
//! This module defines the data structures exchanged between the capture
//! loop, the pose-detection port, and the measurement pipeline.
//!
//! # Type Categories
//!
//! - **Pose Types**: [`Point2D`], [`Confidence`], [`Keypoint`],
//!   [`KeypointId`], [`BodyPose`]
//! - **Measurement Types**: [`AngleSet`], [`BiomarkerSet`], [`FrameAnalysis`]
//!
//! All pose data is per-frame and immutable after creation: a [`BodyPose`]
//! is owned by the frame that produced it, and measurement values are
//! recomputed every frame rather than accumulated.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::{DEFAULT_CONFIDENCE_THRESHOLD, KEYPOINT_COUNT};

// =============================================================================
// Point2D
// =============================================================================

/// A 2D point in image space.
///
/// Coordinates are expected to be normalized to `[0.0, 1.0]`; see the crate
/// docs for the coordinate convention.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point2D {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point2D {
    /// Creates a new point.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// =============================================================================
// Confidence
// =============================================================================

/// Detection confidence score in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Confidence(f32);

impl Confidence {
    /// Creates a new confidence value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range [0.0, 1.0].
    pub fn new(value: f32) -> CoreResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(CoreError::validation(format!(
                "confidence must be in [0.0, 1.0], got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Returns the raw confidence value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Returns `true` if the confidence exceeds the default threshold.
    #[must_use]
    pub fn is_high(&self) -> bool {
        self.0 >= DEFAULT_CONFIDENCE_THRESHOLD
    }

    /// Returns `true` if the confidence exceeds the given threshold.
    #[must_use]
    pub fn exceeds(&self, threshold: f32) -> bool {
        self.0 >= threshold
    }

    /// Maximum confidence (1.0).
    pub const MAX: Self = Self(1.0);

    /// Minimum confidence (0.0).
    pub const MIN: Self = Self(0.0);
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.0)
    }
}

// =============================================================================
// Keypoint
// =============================================================================

/// A single anatomical landmark: 2D position plus detection confidence.
///
/// Keypoints are owned exclusively by the frame that produced them and are
/// never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keypoint {
    /// Position in image space
    pub position: Point2D,
    /// Detection confidence
    pub confidence: Confidence,
}

impl Keypoint {
    /// Creates a new keypoint.
    #[must_use]
    pub fn new(position: Point2D, confidence: Confidence) -> Self {
        Self {
            position,
            confidence,
        }
    }

    /// Returns `true` if the keypoint clears the given confidence threshold.
    #[must_use]
    pub fn is_confident(&self, threshold: f32) -> bool {
        self.confidence.exceeds(threshold)
    }
}

// =============================================================================
// KeypointId
// =============================================================================

/// The fixed 13-point body topology.
///
/// The ordering matches the upstream pose model's output layout; a
/// [`BodyPose`] stores its keypoints indexed by this enum. Note there is no
/// foot or toe landmark, which is why no ankle joint angle can be formed
/// (see [`AngleSet::ankle`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(usize)]
pub enum KeypointId {
    /// Nose
    Nose = 0,
    /// Left shoulder
    LeftShoulder = 1,
    /// Right shoulder
    RightShoulder = 2,
    /// Left elbow
    LeftElbow = 3,
    /// Right elbow
    RightElbow = 4,
    /// Left wrist
    LeftWrist = 5,
    /// Right wrist
    RightWrist = 6,
    /// Left hip
    LeftHip = 7,
    /// Right hip
    RightHip = 8,
    /// Left knee
    LeftKnee = 9,
    /// Right knee
    RightKnee = 10,
    /// Left ankle
    LeftAnkle = 11,
    /// Right ankle
    RightAnkle = 12,
}

impl KeypointId {
    /// Returns all keypoint ids in topology order.
    #[must_use]
    pub fn all() -> &'static [Self; KEYPOINT_COUNT] {
        &[
            Self::Nose,
            Self::LeftShoulder,
            Self::RightShoulder,
            Self::LeftElbow,
            Self::RightElbow,
            Self::LeftWrist,
            Self::RightWrist,
            Self::LeftHip,
            Self::RightHip,
            Self::LeftKnee,
            Self::RightKnee,
            Self::LeftAnkle,
            Self::RightAnkle,
        ]
    }

    /// Returns the keypoint name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }
}

impl TryFrom<usize> for KeypointId {
    type Error = CoreError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Nose),
            1 => Ok(Self::LeftShoulder),
            2 => Ok(Self::RightShoulder),
            3 => Ok(Self::LeftElbow),
            4 => Ok(Self::RightElbow),
            5 => Ok(Self::LeftWrist),
            6 => Ok(Self::RightWrist),
            7 => Ok(Self::LeftHip),
            8 => Ok(Self::RightHip),
            9 => Ok(Self::LeftKnee),
            10 => Ok(Self::RightKnee),
            11 => Ok(Self::LeftAnkle),
            12 => Ok(Self::RightAnkle),
            _ => Err(CoreError::validation(format!(
                "invalid keypoint index: {value}"
            ))),
        }
    }
}

// =============================================================================
// BodyPose
// =============================================================================

/// A full-topology body pose for one frame.
///
/// Invariant: a `BodyPose` always carries all 13 keypoints. A frame in which
/// the model could not produce the full topology is represented as "no pose
/// detected" (`Option::None` at the detector boundary), never as a partial
/// pose. Individual keypoints may still carry low confidence, which the
/// measurement pipeline treats as missing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyPose {
    keypoints: [Keypoint; KEYPOINT_COUNT],
}

impl BodyPose {
    /// Creates a pose from a full keypoint array in topology order.
    #[must_use]
    pub fn new(keypoints: [Keypoint; KEYPOINT_COUNT]) -> Self {
        Self { keypoints }
    }

    /// Returns the keypoint for the given id.
    #[must_use]
    pub fn get(&self, id: KeypointId) -> &Keypoint {
        &self.keypoints[id as usize]
    }

    /// Returns the keypoint's position if it clears the confidence
    /// threshold, `None` otherwise.
    #[must_use]
    pub fn confident_position(&self, id: KeypointId, threshold: f32) -> Option<Point2D> {
        let kp = self.get(id);
        kp.is_confident(threshold).then_some(kp.position)
    }

    /// Mean confidence across all keypoints.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_confidence(&self) -> f32 {
        let sum: f32 = self.keypoints.iter().map(|k| k.confidence.value()).sum();
        sum / KEYPOINT_COUNT as f32
    }
}

// =============================================================================
// AngleSet
// =============================================================================

/// Joint angles extracted from one frame, in degrees.
///
/// Each joint is independently absent when its required keypoints were
/// missing or below the confidence threshold. Values are ephemeral: a new
/// set is computed every frame and nothing is carried across frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AngleSet {
    /// Knee flexion angle (hip-knee-ankle)
    pub knee: Option<f32>,
    /// Hip angle (shoulder-hip-knee)
    pub hip: Option<f32>,
    /// Shoulder angle (opposite shoulder-shoulder-elbow)
    pub shoulder: Option<f32>,
    /// Elbow flexion angle (shoulder-elbow-wrist)
    pub elbow: Option<f32>,
    /// Neck deviation from vertical (0 when upright)
    pub neck: Option<f32>,
    /// Ankle angle. Declared in the output shape but never populated: the
    /// 13-point topology has no foot or toe keypoint to form a triplet.
    pub ankle: Option<f32>,
}

impl AngleSet {
    /// Number of joints carrying a value this frame.
    #[must_use]
    pub fn present_count(&self) -> usize {
        [
            self.knee,
            self.hip,
            self.shoulder,
            self.elbow,
            self.neck,
            self.ankle,
        ]
        .iter()
        .filter(|a| a.is_some())
        .count()
    }
}

// =============================================================================
// BiomarkerSet
// =============================================================================

/// Composite posture score and auxiliary sub-scores for one frame.
///
/// Derived strictly from one [`BodyPose`] and its [`AngleSet`]; no
/// cross-frame state. Sub-scores are absent when their inputs were missing,
/// in which case their penalty simply did not apply to the posture score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BiomarkerSet {
    /// Composite posture score in [0, 100]
    pub posture_score: f32,
    /// Shoulder height symmetry in [0, 100]; absent without both shoulders
    pub shoulder_symmetry: Option<f32>,
    /// Lateral balance in [0, 100]; absent without nose and both hips
    pub balance_score: Option<f32>,
}

// =============================================================================
// FrameAnalysis
// =============================================================================

/// The per-frame output handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameAnalysis {
    /// Capture frame ordinal, for log correlation
    pub frame_index: u64,
    /// Joint angles for this frame
    pub angles: AngleSet,
    /// Posture biomarkers for this frame
    pub biomarkers: BiomarkerSet,
}
