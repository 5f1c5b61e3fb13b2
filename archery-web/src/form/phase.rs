//! Shot phase classification from consecutive draw lengths
//!
//! Memoryless: only the current and immediately preceding analysis are
//! compared. Rules are checked in priority order and the first match wins.

use serde::{Deserialize, Serialize};

use super::analysis::FrameAnalysis;
use super::config::PhaseThresholds;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotPhase {
    #[default]
    Idle,
    Drawing,
    Anchor,
    Release,
    FollowThrough,
}

impl ShotPhase {
    pub fn name(&self) -> &'static str {
        match self {
            ShotPhase::Idle => "idle",
            ShotPhase::Drawing => "drawing",
            ShotPhase::Anchor => "anchor",
            ShotPhase::Release => "release",
            ShotPhase::FollowThrough => "follow_through",
        }
    }
}

/// Classify with the default thresholds
pub fn detect_shot_phase(
    current: Option<&FrameAnalysis>,
    previous: Option<&FrameAnalysis>,
) -> ShotPhase {
    detect_shot_phase_with(current, previous, &PhaseThresholds::default())
}

pub fn detect_shot_phase_with(
    current: Option<&FrameAnalysis>,
    previous: Option<&FrameAnalysis>,
    thresholds: &PhaseThresholds,
) -> ShotPhase {
    match (current, previous) {
        (Some(current), Some(previous)) => {
            classify_draw(current.draw_length, previous.draw_length, thresholds)
        }
        _ => ShotPhase::Idle,
    }
}

/// Priority-ordered rules over two consecutive draw lengths
pub fn classify_draw(current: f64, previous: f64, t: &PhaseThresholds) -> ShotPhase {
    if current > previous + t.drawing_delta {
        return ShotPhase::Drawing;
    }
    if current > t.anchor_min_length && (current - previous).abs() < t.anchor_max_delta {
        return ShotPhase::Anchor;
    }
    if current < previous - t.release_delta {
        return ShotPhase::Release;
    }
    if current < t.follow_through_max_length {
        return ShotPhase::FollowThrough;
    }
    ShotPhase::Idle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::analysis::analyze_archery_form;
    use crate::form::keypoints::{Keypoint, Landmark};

    fn classify(previous: f64, current: f64) -> ShotPhase {
        classify_draw(current, previous, &PhaseThresholds::default())
    }

    /// Complete frame whose draw wrist sits `reach` units right of the draw shoulder
    fn frame_with_reach(reach: f64) -> Vec<Option<Landmark>> {
        let mut frame = vec![None; 33];
        let mut set = |kp: Keypoint, x: f64, y: f64| frame[kp.index()] = Some(Landmark::new(x, y));
        set(Keypoint::Nose, 250.0, 40.0);
        set(Keypoint::LeftShoulder, 200.0, 100.0);
        set(Keypoint::RightShoulder, 300.0, 100.0);
        set(Keypoint::LeftElbow, 110.0, 100.0);
        set(Keypoint::LeftWrist, 0.0, 100.0);
        set(Keypoint::RightElbow, 300.0 + reach / 2.0, 130.0);
        set(Keypoint::RightWrist, 300.0 + reach, 100.0);
        set(Keypoint::LeftHip, 210.0, 300.0);
        set(Keypoint::RightHip, 290.0, 300.0);
        frame
    }

    #[test]
    fn test_drawing() {
        assert_eq!(classify(50.0, 60.0), ShotPhase::Drawing);
    }

    #[test]
    fn test_anchor() {
        assert_eq!(classify(100.0, 101.0), ShotPhase::Anchor);
        assert_eq!(classify(120.0, 120.0), ShotPhase::Anchor);
    }

    #[test]
    fn test_release() {
        assert_eq!(classify(100.0, 85.0), ShotPhase::Release);
    }

    #[test]
    fn test_follow_through() {
        assert_eq!(classify(75.0, 72.0), ShotPhase::FollowThrough);
    }

    #[test]
    fn test_large_drop_below_follow_through_is_release() {
        // Rule order: a 20-unit drop is a release even though 70 < 80
        assert_eq!(classify(90.0, 70.0), ShotPhase::Release);
    }

    #[test]
    fn test_idle() {
        assert_eq!(classify(95.0, 97.0), ShotPhase::Idle);
        assert_eq!(classify(150.0, 146.0), ShotPhase::Idle);
    }

    #[test]
    fn test_short_steady_draw_is_follow_through() {
        // Below the follow-through length every non-matching frame lands there
        assert_eq!(classify(50.0, 52.0), ShotPhase::FollowThrough);
    }

    #[test]
    fn test_boundaries_are_strict() {
        // Exactly +5 is not drawing; exactly 100 is not anchor; exactly -10 is not release
        assert_eq!(classify(95.0, 100.0), ShotPhase::Idle);
        assert_eq!(classify(100.0, 100.0), ShotPhase::Idle);
        assert_eq!(classify(100.0, 90.0), ShotPhase::Idle);
        assert_eq!(classify(90.0, 80.0), ShotPhase::Idle);
    }

    #[test]
    fn test_drawing_beats_anchor() {
        assert_eq!(classify(110.0, 116.0), ShotPhase::Drawing);
    }

    #[test]
    fn test_release_beats_follow_through() {
        assert_eq!(classify(90.0, 60.0), ShotPhase::Release);
    }

    #[test]
    fn test_missing_inputs_are_idle() {
        let a = analyze_archery_form(&frame_with_reach(60.0)).unwrap();
        assert_eq!(detect_shot_phase(None, None), ShotPhase::Idle);
        assert_eq!(detect_shot_phase(Some(&a), None), ShotPhase::Idle);
        assert_eq!(detect_shot_phase(None, Some(&a)), ShotPhase::Idle);
    }

    #[test]
    fn test_from_analyses() {
        let short = analyze_archery_form(&frame_with_reach(50.0)).unwrap();
        let long = analyze_archery_form(&frame_with_reach(60.0)).unwrap();
        assert!((short.draw_length - 50.0).abs() < 1e-3);
        assert_eq!(detect_shot_phase(Some(&long), Some(&short)), ShotPhase::Drawing);
        assert_eq!(detect_shot_phase(Some(&short), Some(&short)), ShotPhase::FollowThrough);
    }

    #[test]
    fn test_custom_thresholds() {
        let normalized = PhaseThresholds {
            drawing_delta: 0.02,
            anchor_min_length: 0.3,
            anchor_max_delta: 0.01,
            release_delta: 0.05,
            follow_through_max_length: 0.2,
        };
        assert_eq!(classify_draw(0.35, 0.345, &normalized), ShotPhase::Anchor);
        assert_eq!(classify_draw(0.25, 0.35, &normalized), ShotPhase::Release);
    }

    #[test]
    fn test_names() {
        assert_eq!(ShotPhase::FollowThrough.name(), "follow_through");
        assert_eq!(
            serde_json::to_string(&ShotPhase::FollowThrough).unwrap(),
            "\"follow_through\""
        );
        assert_eq!(ShotPhase::default(), ShotPhase::Idle);
    }
}
