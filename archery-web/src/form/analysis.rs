//! Per-frame archery form analysis
//!
//! Turns one frame of pose landmarks into five criterion scores, feedback
//! text for the criteria outside tolerance, and the draw measurements the
//! phase classifier works from. Pure: nothing is kept between calls.

use serde::Serialize;

use super::config::ScoringConfig;
use super::geometry::{calculate_angle, calculate_distance, line_tilt};
use super::handedness::{determine_dominant_hand, Side};
use super::keypoints::{landmark_at, Keypoint, Landmark, MIN_LANDMARKS};

// ============================================================================
// CRITERIA
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Criterion {
    BowArmStraightness,
    DrawArmAngle,
    ShoulderAlignment,
    Stance,
    HeadPosition,
}

impl Criterion {
    pub const ALL: [Criterion; 5] = [
        Criterion::BowArmStraightness,
        Criterion::DrawArmAngle,
        Criterion::ShoulderAlignment,
        Criterion::Stance,
        Criterion::HeadPosition,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Criterion::BowArmStraightness => "bowArmStraightness",
            Criterion::DrawArmAngle => "drawArmAngle",
            Criterion::ShoulderAlignment => "shoulderAlignment",
            Criterion::Stance => "stance",
            Criterion::HeadPosition => "headPosition",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Score per criterion, each in 0..=100
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionScores {
    pub bow_arm_straightness: f64,
    pub draw_arm_angle: f64,
    pub shoulder_alignment: f64,
    pub stance: f64,
    pub head_position: f64,
}

impl CriterionScores {
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::BowArmStraightness => self.bow_arm_straightness,
            Criterion::DrawArmAngle => self.draw_arm_angle,
            Criterion::ShoulderAlignment => self.shoulder_alignment,
            Criterion::Stance => self.stance,
            Criterion::HeadPosition => self.head_position,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        Criterion::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Unweighted mean of all criteria
    pub fn mean(&self) -> f64 {
        self.iter().map(|(_, score)| score).sum::<f64>() / Criterion::ALL.len() as f64
    }
}

/// Raw geometry behind the scores
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
    /// Shoulder–elbow–wrist angle on the bow side (degrees)
    pub bow_arm_angle: f64,
    /// Shoulder–elbow–wrist angle on the draw side (degrees)
    pub draw_arm_angle: f64,
    /// |tilt| of the bow→draw shoulder line (degrees)
    pub shoulder_tilt: f64,
    /// Vertical offset between hips
    pub hip_offset: f64,
    /// Horizontal distance between hips (not scored)
    pub hip_width: f64,
    /// Horizontal nose offset from the shoulder midpoint
    pub head_offset: f64,
}

// ============================================================================
// FRAME ANALYSIS
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameAnalysis {
    pub dominant_hand: Side,
    pub bow_arm: Side,
    pub draw_arm: Side,
    pub scores: CriterionScores,
    /// One line per criterion outside tolerance, in criterion order
    pub feedback: Vec<String>,
    pub draw_length: f64,
    pub bow_arm_extension: f64,
    pub overall_score: f64,
    pub is_drawing: bool,
    pub measurements: Measurements,
}

/// Why a frame produced no analysis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indeterminate {
    TooFewLandmarks { found: usize },
    HandednessUnknown,
    MissingLandmark(Keypoint),
}

impl std::fmt::Display for Indeterminate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Indeterminate::TooFewLandmarks { found } => {
                write!(f, "expected at least {} landmarks, got {}", MIN_LANDMARKS, found)
            }
            Indeterminate::HandednessUnknown => write!(f, "shoulders or wrists not detected"),
            Indeterminate::MissingLandmark(kp) => write!(f, "{} not detected", kp.name()),
        }
    }
}

impl std::error::Error for Indeterminate {}

/// Analyze one frame with the default thresholds
pub fn analyze_archery_form(frame: &[Option<Landmark>]) -> Option<FrameAnalysis> {
    analyze_with(frame, &ScoringConfig::default())
}

pub fn analyze_with(frame: &[Option<Landmark>], config: &ScoringConfig) -> Option<FrameAnalysis> {
    try_analyze(frame, config).ok()
}

/// Analyze one frame, reporting why it was indeterminate on failure
pub fn try_analyze(
    frame: &[Option<Landmark>],
    config: &ScoringConfig,
) -> Result<FrameAnalysis, Indeterminate> {
    if frame.len() < MIN_LANDMARKS {
        return Err(Indeterminate::TooFewLandmarks { found: frame.len() });
    }

    let dominant_hand = determine_dominant_hand(frame).ok_or(Indeterminate::HandednessUnknown)?;
    let bow_arm = dominant_hand.opposite();
    let draw_arm = dominant_hand;

    let require = |kp: Keypoint| landmark_at(frame, kp).ok_or(Indeterminate::MissingLandmark(kp));

    let bow_shoulder = require(Keypoint::shoulder(bow_arm))?;
    let bow_elbow = require(Keypoint::elbow(bow_arm))?;
    let bow_wrist = require(Keypoint::wrist(bow_arm))?;
    let draw_shoulder = require(Keypoint::shoulder(draw_arm))?;
    let draw_elbow = require(Keypoint::elbow(draw_arm))?;
    let draw_wrist = require(Keypoint::wrist(draw_arm))?;
    let left_hip = require(Keypoint::LeftHip)?;
    let right_hip = require(Keypoint::RightHip)?;
    let nose = require(Keypoint::Nose)?;

    let mut feedback = Vec::new();

    // 1. Bow arm: nearly straight, 160-180°
    let bow_arm_angle = calculate_angle(bow_shoulder, bow_elbow, bow_wrist);
    let bow_arm_straightness = score_bow_arm(bow_arm_angle, config);
    if bow_arm_angle < config.bow_arm_feedback_below {
        feedback.push(format!("Straighten your {} arm more ({:.1}°)", bow_arm.name(), bow_arm_angle));
    }

    // 2. Draw elbow: ~90-110° at full draw
    let draw_arm_angle = calculate_angle(draw_shoulder, draw_elbow, draw_wrist);
    let draw_arm_score = score_draw_arm(draw_arm_angle, config);
    if (draw_arm_angle - config.ideal_draw_angle).abs() > config.draw_angle_tolerance {
        feedback.push(format!("Adjust draw arm elbow position ({:.1}°)", draw_arm_angle));
    }

    // 3. Shoulders level
    let shoulder_tilt = line_tilt(bow_shoulder, draw_shoulder).abs();
    let shoulder_alignment = score_shoulders(shoulder_tilt, config);
    if shoulder_tilt > config.shoulder_tolerance {
        feedback.push("Level your shoulders".to_string());
    }

    // 4. Hips level
    let hip_offset = (left_hip.y - right_hip.y).abs();
    let hip_width = (left_hip.x - right_hip.x).abs();
    let stance = score_stance(hip_offset, config);
    if hip_offset > config.stance_tolerance {
        feedback.push("Square your stance - align your hips".to_string());
    }

    // 5. Head centered over the shoulders
    let head_offset = (nose.x - (bow_shoulder.x + draw_shoulder.x) / 2.0).abs();
    let head_position = score_head(head_offset, config);
    if head_offset > config.head_tolerance {
        feedback.push("Keep your head centered and upright".to_string());
    }

    let draw_length = calculate_distance(draw_shoulder, draw_wrist);
    let bow_arm_extension = calculate_distance(bow_shoulder, bow_wrist);

    let scores = CriterionScores {
        bow_arm_straightness,
        draw_arm_angle: draw_arm_score,
        shoulder_alignment,
        stance,
        head_position,
    };
    let overall_score = scores.mean();

    Ok(FrameAnalysis {
        dominant_hand,
        bow_arm,
        draw_arm,
        scores,
        feedback,
        draw_length,
        bow_arm_extension,
        overall_score,
        is_drawing: draw_length > bow_arm_extension * config.drawing_ratio,
        measurements: Measurements {
            bow_arm_angle,
            draw_arm_angle,
            shoulder_tilt,
            hip_offset,
            hip_width,
            head_offset,
        },
    })
}

// ============================================================================
// SCORE RAMPS
// ============================================================================

/// Clamp to 0..=100; NaN (from overflowing coordinates) scores 0
fn clamp_score(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 100.0)
    }
}

fn score_bow_arm(angle: f64, config: &ScoringConfig) -> f64 {
    clamp_score((angle - config.bow_arm_min_angle) / config.bow_arm_degrees_per_point)
}

fn score_draw_arm(angle: f64, config: &ScoringConfig) -> f64 {
    clamp_score(100.0 - (angle - config.ideal_draw_angle).abs() * config.draw_angle_penalty)
}

fn score_shoulders(tilt: f64, config: &ScoringConfig) -> f64 {
    clamp_score(100.0 - tilt * config.shoulder_penalty)
}

fn score_stance(hip_offset: f64, config: &ScoringConfig) -> f64 {
    clamp_score(100.0 - hip_offset * config.stance_penalty)
}

fn score_head(head_offset: f64, config: &ScoringConfig) -> f64 {
    clamp_score(100.0 - head_offset / config.head_offset_divisor)
}
