//! End-to-end session tests driving the scheduler through its public API
//! with synthetic adapters only.

use std::time::Duration;

use posemetric_core::types::{BodyPose, Confidence, Keypoint, KeypointId, Point2D};
use posemetric_core::KEYPOINT_COUNT;
use posemetric_engine::{
    CollectingSink, FrameScheduler, ScriptedDetector, SessionPhase, SyntheticSource, TickOutcome,
};

/// Upright pose with every keypoint confident.
fn complete_pose() -> BodyPose {
    let layout: [(f32, f32); KEYPOINT_COUNT] = [
        (0.5, 0.20),  // nose
        (0.42, 0.30), // left shoulder
        (0.58, 0.30), // right shoulder
        (0.40, 0.42), // left elbow
        (0.60, 0.42), // right elbow
        (0.38, 0.54), // left wrist
        (0.62, 0.54), // right wrist
        (0.45, 0.55), // left hip
        (0.55, 0.55), // right hip
        (0.45, 0.72), // left knee
        (0.55, 0.72), // right knee
        (0.45, 0.90), // left ankle
        (0.55, 0.90), // right ankle
    ];
    let mut keypoints = [Keypoint::new(Point2D::new(0.0, 0.0), Confidence::MIN); KEYPOINT_COUNT];
    for (i, (x, y)) in layout.iter().enumerate() {
        keypoints[i] = Keypoint::new(Point2D::new(*x, *y), Confidence::new(0.9).unwrap());
    }
    BodyPose::new(keypoints)
}

/// Same pose with both wrists dropped below the confidence threshold.
fn pose_without_wrists() -> BodyPose {
    let base = complete_pose();
    let mut keypoints = [Keypoint::new(Point2D::new(0.0, 0.0), Confidence::MIN); KEYPOINT_COUNT];
    for id in KeypointId::all() {
        keypoints[*id as usize] = *base.get(*id);
    }
    for id in [KeypointId::LeftWrist, KeypointId::RightWrist] {
        let position = base.get(id).position;
        keypoints[id as usize] = Keypoint::new(position, Confidence::new(0.1).unwrap());
    }
    BodyPose::new(keypoints)
}

#[tokio::test]
async fn hundred_frame_session_with_alternating_completeness() {
    // Even frames complete, odd frames missing both wrists.
    let script: Vec<_> = (0..100)
        .map(|i| {
            if i % 2 == 0 {
                Ok(Some(complete_pose()))
            } else {
                Ok(Some(pose_without_wrists()))
            }
        })
        .collect();

    let mut scheduler = FrameScheduler::new(
        SyntheticSource::new(),
        ScriptedDetector::from_script(script),
        CollectingSink::new(),
    );
    scheduler.start().await.unwrap();

    for _ in 0..100 {
        assert_eq!(scheduler.tick().await, TickOutcome::Analyzed);
    }

    let frames = scheduler.sink().frames();
    assert_eq!(frames.len(), 100);

    for analysis in frames {
        let complete = analysis.frame_index % 2 == 0;

        // Elbows need the wrists; they vanish on the incomplete frames.
        assert_eq!(analysis.angles.elbow.is_some(), complete);
        // Shoulders, knees, and the neck never depended on the wrists.
        assert!(analysis.angles.shoulder.is_some());
        assert!(analysis.angles.knee.is_some());
        assert!(analysis.angles.neck.is_some());

        // Nose, shoulders, and hips are confident on every frame, so the
        // posture score and both sub-scores are always computed.
        assert!(analysis.biomarkers.posture_score > 0.0);
        assert!(analysis.biomarkers.shoulder_symmetry.is_some());
        assert!(analysis.biomarkers.balance_score.is_some());
    }
}

#[tokio::test]
async fn stall_recovery_resumes_output_without_restart() {
    let source = SyntheticSource::new().stall_on([2]);
    let mut scheduler = FrameScheduler::new(
        source,
        ScriptedDetector::repeating(complete_pose()),
        CollectingSink::new(),
    );
    scheduler.start().await.unwrap();

    let mut outcomes = Vec::new();
    for _ in 0..5 {
        outcomes.push(scheduler.tick().await);
    }

    assert_eq!(
        outcomes,
        vec![
            TickOutcome::Analyzed,
            TickOutcome::Analyzed,
            TickOutcome::Stalled,
            TickOutcome::Analyzed,
            TickOutcome::Analyzed,
        ]
    );
    assert_eq!(scheduler.sink().len(), 4);
    assert_eq!(scheduler.loop_state().consecutive_stall_count, 0);
}

#[tokio::test(start_paused = true)]
async fn timer_driven_run_stops_from_a_handle() {
    let mut scheduler = FrameScheduler::new(
        SyntheticSource::new(),
        ScriptedDetector::repeating(complete_pose()),
        CollectingSink::new(),
    );
    scheduler.start().await.unwrap();
    let handle = scheduler.handle();

    let session = tokio::spawn(async move {
        scheduler.run().await.unwrap();
        scheduler
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    handle.stop();

    let scheduler = session.await.unwrap();
    assert_eq!(scheduler.phase(), SessionPhase::Stopped);
    assert!(!scheduler.loop_state().is_running);
    assert!(!scheduler.sink().is_empty());

    let (source, _, _) = scheduler.into_parts();
    assert!(!source.is_acquired());
}

#[tokio::test]
async fn stop_is_idempotent_through_the_whole_lifecycle() {
    let mut scheduler = FrameScheduler::new(
        SyntheticSource::new(),
        ScriptedDetector::repeating(complete_pose()),
        CollectingSink::new(),
    );

    // Before start.
    scheduler.stop();
    scheduler.stop();
    assert_eq!(scheduler.phase(), SessionPhase::Idle);

    scheduler.start().await.unwrap();
    scheduler.run().await.unwrap(); // pending stop, no tick runs
    assert_eq!(scheduler.phase(), SessionPhase::Stopped);

    // After stop.
    scheduler.stop();
    assert_eq!(scheduler.phase(), SessionPhase::Stopped);
}
