//! Form module - archery form scoring and shot phase classification
//!
//! Re-exports only. All logic in submodules.

mod analysis;
mod config;
mod geometry;
mod handedness;
mod keypoints;
mod phase;
mod tracker;

pub use analysis::{
    analyze_archery_form, analyze_with, try_analyze, Criterion, CriterionScores, FrameAnalysis,
    Indeterminate, Measurements,
};
pub use config::{ConfigError, FormConfig, PhaseThresholds, ScoringConfig};
pub use geometry::{calculate_angle, calculate_distance, line_tilt};
pub use handedness::{determine_dominant_hand, Side};
pub use keypoints::{landmark_at, Keypoint, Landmark, MIN_LANDMARKS, POSE_LANDMARK_COUNT};
pub use phase::{classify_draw, detect_shot_phase, detect_shot_phase_with, ShotPhase};
pub use tracker::{GapPolicy, ShotTracker};
