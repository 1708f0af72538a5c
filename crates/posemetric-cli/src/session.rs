//! The `session` subcommand: a synthetic end-to-end capture session.
//!
//! Wires the scheduler to the synthetic source and a scripted detector
//! playing a gently swaying subject, then prints one line of biomarkers
//! per frame. Useful for eyeballing the pipeline without a camera or a
//! pose model.

use clap::Args;
use tracing::info;

use posemetric_core::types::{BodyPose, Confidence, Keypoint, Point2D};
use posemetric_core::KEYPOINT_COUNT;
use posemetric_engine::{
    ChannelSink, FrameScheduler, SchedulerConfig, ScriptedDetector, SyntheticSource,
};

/// Arguments for the `session` subcommand.
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Number of frames to analyze before stopping
    #[arg(long, default_value_t = 120)]
    pub frames: u64,

    /// Tick interval in milliseconds
    #[arg(long, default_value_t = 16)]
    pub tick_ms: u64,

    /// Simulate a capture stall every N frames
    #[arg(long)]
    pub stall_every: Option<u64>,

    /// Amplitude of the simulated lateral sway, in normalized units
    #[arg(long, default_value_t = 0.05)]
    pub sway: f32,
}

/// Runs the synthetic session.
///
/// # Errors
///
/// Returns an error if the session fails to start.
pub async fn execute(args: SessionArgs) -> anyhow::Result<()> {
    let script: Vec<_> = (0..args.frames)
        .map(|i| Ok(Some(swaying_pose(i, args.sway))))
        .collect();
    let detector = ScriptedDetector::from_script(script).with_fallback(swaying_pose(0, 0.0));

    let mut source = SyntheticSource::new();
    if let Some(n) = args.stall_every.filter(|n| *n > 0) {
        source = source.stall_on((1..).map(|k| k * n).take_while(|i| *i < args.frames));
    }

    let (sink, mut rx) = ChannelSink::new(usize::try_from(args.frames).unwrap_or(256).max(32));
    let config = SchedulerConfig {
        tick_interval_ms: args.tick_ms,
        ..SchedulerConfig::default()
    };
    let mut scheduler = FrameScheduler::with_config(source, detector, sink, config);

    scheduler.start().await?;
    info!(frames = args.frames, tick_ms = args.tick_ms, "session started");

    let handle = scheduler.handle();
    let wanted = args.frames;
    let printer = tokio::spawn(async move {
        let mut seen = 0;
        while let Some(analysis) = rx.recv().await {
            println!(
                "frame {:>4}  posture {:>5.1}  symmetry {:>5}  balance {:>5}  neck {:>6}  elbow {:>6}",
                analysis.frame_index,
                analysis.biomarkers.posture_score,
                fmt_score(analysis.biomarkers.shoulder_symmetry),
                fmt_score(analysis.biomarkers.balance_score),
                fmt_angle(analysis.angles.neck),
                fmt_angle(analysis.angles.elbow),
            );
            seen += 1;
            if seen >= wanted {
                break;
            }
        }
        handle.stop();
    });

    scheduler.run().await?;
    printer.await?;

    let stalls = args
        .stall_every
        .filter(|n| *n > 0)
        .map_or(0, |n| args.frames.saturating_sub(1) / n);
    info!(
        frames_processed = scheduler.frames_processed(),
        simulated_stalls = stalls,
        "session finished"
    );
    Ok(())
}

fn fmt_score(score: Option<f32>) -> String {
    score.map_or_else(|| "--".to_string(), |s| format!("{s:.1}"))
}

fn fmt_angle(angle: Option<f32>) -> String {
    angle.map_or_else(|| "--".to_string(), |a| format!("{a:.1}°"))
}

/// Upright subject with a sinusoidal lateral sway of the upper body.
fn swaying_pose(frame: u64, amplitude: f32) -> BodyPose {
    #[allow(clippy::cast_precision_loss)]
    let phase = frame as f32 * 0.1;
    let sway = phase.sin() * amplitude;

    let layout: [(f32, f32); KEYPOINT_COUNT] = [
        (0.5 + sway, 0.20),        // nose follows the sway fully
        (0.42 + sway * 0.6, 0.30), // shoulders follow it partially
        (0.58 + sway * 0.6, 0.30),
        (0.40 + sway * 0.6, 0.42),
        (0.60 + sway * 0.6, 0.42),
        (0.38 + sway * 0.6, 0.54),
        (0.62 + sway * 0.6, 0.54),
        (0.45, 0.55), // pelvis and legs stay planted
        (0.55, 0.55),
        (0.45, 0.72),
        (0.55, 0.72),
        (0.45, 0.90),
        (0.55, 0.90),
    ];

    let mut keypoints = [Keypoint::new(Point2D::new(0.0, 0.0), Confidence::MIN); KEYPOINT_COUNT];
    for (i, (x, y)) in layout.iter().enumerate() {
        keypoints[i] = Keypoint::new(Point2D::new(*x, *y), Confidence::MAX);
    }
    BodyPose::new(keypoints)
}
