//! The pure per-frame measurement pipeline.
//!
//! Two stages run on every detected pose, with no state carried between
//! frames:
//!
//! 1. [`JointAngleExtractor`] -- keypoints to named joint angles
//! 2. [`BiomarkerScorer`] -- pose + angles to posture biomarkers
//!
//! [`FrameAnalyzer`] composes both into a single `process()` call so the
//! frame loop (and tests) can drive the whole path without a capture device
//! or timer.

pub mod analyzer;
pub mod extractor;
pub mod scorer;

pub use analyzer::{AnalyzerConfig, FrameAnalyzer};
pub use extractor::{ExtractorConfig, JointAngleExtractor};
pub use scorer::{BiomarkerScorer, ScorerConfig};
