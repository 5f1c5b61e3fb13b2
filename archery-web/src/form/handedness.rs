//! Bow-arm / draw-arm inference from a single frame

use serde::{Deserialize, Serialize};

use super::keypoints::{landmark_at, Keypoint, Landmark};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn name(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Infer the dominant (draw) hand.
///
/// The wrist reaching further horizontally from the shoulder midline holds
/// the bow, so the dominant hand is the other one (the extended side is
/// never reported as dominant). An exact tie reads as
/// right-handed (bow in the left hand). Returns `None` if either shoulder or
/// wrist is missing.
pub fn determine_dominant_hand(frame: &[Option<Landmark>]) -> Option<Side> {
    let left_shoulder = landmark_at(frame, Keypoint::LeftShoulder)?;
    let right_shoulder = landmark_at(frame, Keypoint::RightShoulder)?;
    let left_wrist = landmark_at(frame, Keypoint::LeftWrist)?;
    let right_wrist = landmark_at(frame, Keypoint::RightWrist)?;

    let center_x = (left_shoulder.x + right_shoulder.x) / 2.0;
    let left_extension = (left_wrist.x - center_x).abs();
    let right_extension = (right_wrist.x - center_x).abs();

    if right_extension > left_extension {
        Some(Side::Left)
    } else {
        Some(Side::Right)
    }
}
