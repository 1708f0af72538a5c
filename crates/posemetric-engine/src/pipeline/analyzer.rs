//! The composed per-frame measurement path.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use posemetric_core::types::{BodyPose, FrameAnalysis};

use super::extractor::{ExtractorConfig, JointAngleExtractor};
use super::scorer::{BiomarkerScorer, ScorerConfig};

/// Configuration for the full measurement pipeline.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct AnalyzerConfig {
    /// Joint-angle extraction settings.
    pub extractor: ExtractorConfig,
    /// Biomarker scoring settings.
    pub scorer: ScorerConfig,
}

/// Runs extraction and scoring as a single pure step.
///
/// This is the "process one frame" function the scheduler drives; it holds
/// no mutable state, so it is equally callable from tests without a capture
/// device or timer.
#[derive(Debug, Clone, Default)]
pub struct FrameAnalyzer {
    extractor: JointAngleExtractor,
    scorer: BiomarkerScorer,
}

impl FrameAnalyzer {
    /// Creates an analyzer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Creates an analyzer with a custom configuration.
    #[must_use]
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            extractor: JointAngleExtractor::with_config(config.extractor),
            scorer: BiomarkerScorer::with_config(config.scorer),
        }
    }

    /// Analyzes one detected pose.
    #[must_use]
    pub fn process(&self, frame_index: u64, pose: &BodyPose) -> FrameAnalysis {
        let angles = self.extractor.extract(pose);
        let biomarkers = self.scorer.score(pose, &angles);
        FrameAnalysis {
            frame_index,
            angles,
            biomarkers,
        }
    }
}
