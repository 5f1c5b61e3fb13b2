//! Joint angle and distance calculation
//!
//! Angles use the dot product between the two limb segments meeting at a
//! joint: cos(θ) = (v1 · v2) / (|v1| × |v2|)

use super::keypoints::Landmark;

/// Angle at vertex `b` between segments b→a and b→c, in degrees.
///
/// - 180° = a, b, c collinear with a and c on opposite sides (straight limb)
/// - 0° = a and c on the same side, or either segment has zero length
pub fn calculate_angle(a: Landmark, b: Landmark, c: Landmark) -> f64 {
    let v1 = (a.x - b.x, a.y - b.y);
    let v2 = (c.x - b.x, c.y - b.y);

    let dot = v1.0 * v2.0 + v1.1 * v2.1;

    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();

    if mag1 == 0.0 || mag2 == 0.0 {
        return 0.0;
    }

    // Rounding can push the ratio just outside acos' domain
    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);

    cos_angle.acos().to_degrees()
}

/// Euclidean distance between two landmarks
pub fn calculate_distance(a: Landmark, b: Landmark) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Signed angle of the segment from→to against the +x axis, in degrees (-180..=180)
pub fn line_tilt(from: Landmark, to: Landmark) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}
