//! Pose landmark schema (MediaPipe / BlazePose indices)
//!
//! Single source of truth for which slot of a landmark frame holds which
//! body part. Both the analyzer and the JS bridge read through here.

use serde::{Deserialize, Serialize};

use super::handedness::Side;

/// Minimum frame length the analyzer accepts
pub const MIN_LANDMARKS: usize = 25;

/// Landmarks in a full MediaPipe pose frame
pub const POSE_LANDMARK_COUNT: usize = 33;

// ============================================================================
// KEYPOINTS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keypoint {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
}

impl Keypoint {
    /// Slot of this keypoint in a landmark frame
    pub fn index(self) -> usize {
        match self {
            Keypoint::Nose => 0,
            Keypoint::LeftEye => 1,
            Keypoint::RightEye => 2,
            Keypoint::LeftEar => 3,
            Keypoint::RightEar => 4,
            Keypoint::LeftShoulder => 11,
            Keypoint::RightShoulder => 12,
            Keypoint::LeftElbow => 13,
            Keypoint::RightElbow => 14,
            Keypoint::LeftWrist => 15,
            Keypoint::RightWrist => 16,
            Keypoint::LeftHip => 23,
            Keypoint::RightHip => 24,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Keypoint::Nose => "nose",
            Keypoint::LeftEye => "left eye",
            Keypoint::RightEye => "right eye",
            Keypoint::LeftEar => "left ear",
            Keypoint::RightEar => "right ear",
            Keypoint::LeftShoulder => "left shoulder",
            Keypoint::RightShoulder => "right shoulder",
            Keypoint::LeftElbow => "left elbow",
            Keypoint::RightElbow => "right elbow",
            Keypoint::LeftWrist => "left wrist",
            Keypoint::RightWrist => "right wrist",
            Keypoint::LeftHip => "left hip",
            Keypoint::RightHip => "right hip",
        }
    }

    pub fn shoulder(side: Side) -> Self {
        match side {
            Side::Left => Keypoint::LeftShoulder,
            Side::Right => Keypoint::RightShoulder,
        }
    }

    pub fn elbow(side: Side) -> Self {
        match side {
            Side::Left => Keypoint::LeftElbow,
            Side::Right => Keypoint::RightElbow,
        }
    }

    pub fn wrist(side: Side) -> Self {
        match side {
            Side::Left => Keypoint::LeftWrist,
            Side::Right => Keypoint::RightWrist,
        }
    }
}

// ============================================================================
// LANDMARK
// ============================================================================

/// A single 2D landmark in the pose model's coordinate space
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Look up a keypoint in a frame.
///
/// Out-of-range slots, undetected slots and non-finite coordinates all
/// read as `None`.
pub fn landmark_at(frame: &[Option<Landmark>], keypoint: Keypoint) -> Option<Landmark> {
    frame
        .get(keypoint.index())
        .copied()
        .flatten()
        .filter(Landmark::is_finite)
}
