//! Landmark decoding from the JS pose pipeline
//!
//! JavaScript hands over MediaPipe pose landmarks as a flat Float32Array,
//! four values per landmark: x, y, z, visibility. Depth is ignored.
//! Values are widened to f64 on the way in; the engine never sees f32.

use crate::form::{try_analyze, FormConfig, FrameAnalysis, Indeterminate, Landmark};

/// Floats per landmark in the flat buffer (x, y, z, visibility)
pub const VALUES_PER_LANDMARK: usize = 4;

/// Why a flat buffer produced no analysis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameIssue {
    /// Buffer length is not a whole number of landmarks
    BadLength(usize),
    Indeterminate(Indeterminate),
}

impl std::fmt::Display for FrameIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameIssue::BadLength(len) => write!(
                f,
                "invalid landmark data length: {} (expected a multiple of {})",
                len, VALUES_PER_LANDMARK
            ),
            FrameIssue::Indeterminate(reason) => write!(f, "form indeterminate: {}", reason),
        }
    }
}

/// Decode a flat buffer into an optional-landmark frame.
///
/// A slot is empty when x or y is not finite or its visibility is below
/// `min_visibility`.
pub fn decode_landmarks(data: &[f32], min_visibility: f64) -> Result<Vec<Option<Landmark>>, FrameIssue> {
    if data.len() % VALUES_PER_LANDMARK != 0 {
        return Err(FrameIssue::BadLength(data.len()));
    }

    let frame = data
        .chunks_exact(VALUES_PER_LANDMARK)
        .map(|values| {
            let landmark = Landmark::new(f64::from(values[0]), f64::from(values[1]));
            let visibility = f64::from(values[3]);
            // NaN visibility never passes a non-zero gate
            let visible = min_visibility <= 0.0 || visibility >= min_visibility;
            (landmark.is_finite() && visible).then_some(landmark)
        })
        .collect();

    Ok(frame)
}

/// Decode and analyze in one step
pub fn analyze_flat(data: &[f32], config: &FormConfig) -> Result<FrameAnalysis, FrameIssue> {
    let frame = decode_landmarks(data, config.min_visibility)?;
    try_analyze(&frame, &config.scoring).map_err(FrameIssue::Indeterminate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Keypoint, POSE_LANDMARK_COUNT};

    fn flat_frame(points: &[(Keypoint, f32, f32, f32)]) -> Vec<f32> {
        let mut data = vec![f32::NAN; POSE_LANDMARK_COUNT * VALUES_PER_LANDMARK];
        for (kp, x, y, visibility) in points {
            let base = kp.index() * VALUES_PER_LANDMARK;
            data[base] = *x;
            data[base + 1] = *y;
            data[base + 2] = 0.0;
            data[base + 3] = *visibility;
        }
        data
    }

    fn archer(visibility: f32) -> Vec<f32> {
        flat_frame(&[
            (Keypoint::Nose, 0.50, 0.20, 0.99),
            (Keypoint::LeftShoulder, 0.40, 0.40, 0.99),
            (Keypoint::RightShoulder, 0.60, 0.40, 0.99),
            (Keypoint::LeftElbow, 0.25, 0.40, 0.99),
            (Keypoint::LeftWrist, 0.10, 0.40, 0.99),
            (Keypoint::RightElbow, 0.70, 0.45, visibility),
            (Keypoint::RightWrist, 0.62, 0.38, 0.99),
            (Keypoint::LeftHip, 0.42, 0.80, 0.99),
            (Keypoint::RightHip, 0.58, 0.80, 0.99),
        ])
    }

    #[test]
    fn test_decode_full_frame() {
        let frame = decode_landmarks(&archer(0.9), 0.0).unwrap();
        assert_eq!(frame.len(), POSE_LANDMARK_COUNT);
        let shoulder = frame[Keypoint::LeftShoulder.index()].unwrap();
        assert!((shoulder.x - 0.40).abs() < 1e-6);
        assert!((shoulder.y - 0.40).abs() < 1e-6);
        // Unfilled slots carry NaN coordinates
        assert_eq!(frame[Keypoint::LeftEye.index()], None);
    }

    #[test]
    fn test_widening_keeps_threshold_geometry() {
        // A straight bow arm in f32 pixel coordinates must still read as straight
        let mut data = archer(0.9);
        for (kp, x, y) in [
            (Keypoint::LeftShoulder, 412.3_f32, 218.7_f32),
            (Keypoint::LeftElbow, 301.9, 218.7),
            (Keypoint::LeftWrist, 191.5, 218.7),
        ] {
            let base = kp.index() * VALUES_PER_LANDMARK;
            data[base] = x;
            data[base + 1] = y;
        }
        let frame = decode_landmarks(&data, 0.0).unwrap();
        let a = frame[Keypoint::LeftShoulder.index()].unwrap();
        let b = frame[Keypoint::LeftElbow.index()].unwrap();
        let c = frame[Keypoint::LeftWrist.index()].unwrap();
        assert!((crate::form::calculate_angle(a, b, c) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_bad_length() {
        assert_eq!(decode_landmarks(&[0.0; 99], 0.0), Err(FrameIssue::BadLength(99)));
        assert_eq!(decode_landmarks(&[], 0.0), Ok(Vec::new()));
    }

    #[test]
    fn test_visibility_gate() {
        let frame = decode_landmarks(&archer(0.3), 0.5).unwrap();
        assert_eq!(frame[Keypoint::RightElbow.index()], None);
        let frame = decode_landmarks(&archer(0.3), 0.0).unwrap();
        assert!(frame[Keypoint::RightElbow.index()].is_some());
    }

    #[test]
    fn test_analyze_flat() {
        let analysis = analyze_flat(&archer(0.9), &FormConfig::default()).unwrap();
        assert_eq!(analysis.bow_arm.name(), "left");
        assert_eq!(analysis.scores.shoulder_alignment, 100.0);

        let strict = FormConfig {
            min_visibility: 0.5,
            ..FormConfig::default()
        };
        assert_eq!(
            analyze_flat(&archer(0.3), &strict),
            Err(FrameIssue::Indeterminate(Indeterminate::MissingLandmark(Keypoint::RightElbow)))
        );
    }

    #[test]
    fn test_short_buffer_is_indeterminate() {
        let data = vec![0.5; 10 * VALUES_PER_LANDMARK];
        assert_eq!(
            analyze_flat(&data, &FormConfig::default()),
            Err(FrameIssue::Indeterminate(Indeterminate::TooFewLandmarks { found: 10 }))
        );
    }

    #[test]
    fn test_issue_messages() {
        assert_eq!(
            FrameIssue::BadLength(7).to_string(),
            "invalid landmark data length: 7 (expected a multiple of 4)"
        );
        assert_eq!(
            FrameIssue::Indeterminate(Indeterminate::MissingLandmark(Keypoint::Nose)).to_string(),
            "form indeterminate: nose not detected"
        );
    }
}
