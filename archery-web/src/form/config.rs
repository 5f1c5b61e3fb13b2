//! Tunable scoring and phase thresholds
//!
//! Defaults are the calibrated constants the analyzer ships with. A client
//! can override any subset by sending partial JSON; missing fields keep
//! their default.

use serde::{Deserialize, Serialize};

// ============================================================================
// SCORING
// ============================================================================

/// Linear penalty ramps and feedback tolerances for the five criteria
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Bow-arm angle (degrees) that scores 0
    pub bow_arm_min_angle: f64,
    /// Degrees of bow-arm straightening per score point
    pub bow_arm_degrees_per_point: f64,
    /// Bow-arm angle below which feedback fires
    pub bow_arm_feedback_below: f64,

    /// Ideal draw elbow angle at full draw
    pub ideal_draw_angle: f64,
    /// Score points lost per degree away from ideal
    pub draw_angle_penalty: f64,
    pub draw_angle_tolerance: f64,

    /// Score points lost per degree of shoulder tilt
    pub shoulder_penalty: f64,
    pub shoulder_tolerance: f64,

    /// Score points lost per unit of vertical hip offset
    pub stance_penalty: f64,
    pub stance_tolerance: f64,

    /// Units of nose offset per score point lost
    pub head_offset_divisor: f64,
    pub head_tolerance: f64,

    /// Draw length / bow-arm extension ratio above which the archer is drawing
    pub drawing_ratio: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bow_arm_min_angle: 120.0,
            bow_arm_degrees_per_point: 0.6,
            bow_arm_feedback_below: 160.0,
            ideal_draw_angle: 100.0,
            draw_angle_penalty: 2.0,
            draw_angle_tolerance: 15.0,
            shoulder_penalty: 5.0,
            shoulder_tolerance: 10.0,
            stance_penalty: 2.0,
            stance_tolerance: 20.0,
            head_offset_divisor: 2.0,
            head_tolerance: 30.0,
            drawing_ratio: 0.8,
        }
    }
}

impl ScoringConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            self.bow_arm_min_angle,
            self.bow_arm_degrees_per_point,
            self.bow_arm_feedback_below,
            self.ideal_draw_angle,
            self.draw_angle_penalty,
            self.draw_angle_tolerance,
            self.shoulder_penalty,
            self.shoulder_tolerance,
            self.stance_penalty,
            self.stance_tolerance,
            self.head_offset_divisor,
            self.head_tolerance,
            self.drawing_ratio,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid("scoring values must be finite"));
        }
        if fields.iter().any(|v| *v < 0.0) {
            return Err(ConfigError::Invalid("scoring values must not be negative"));
        }
        if self.bow_arm_degrees_per_point <= 0.0 {
            return Err(ConfigError::Invalid("bow_arm_degrees_per_point must be positive"));
        }
        if self.head_offset_divisor <= 0.0 {
            return Err(ConfigError::Invalid("head_offset_divisor must be positive"));
        }
        Ok(())
    }
}

// ============================================================================
// PHASE
// ============================================================================

/// Draw-length thresholds for shot phase classification.
///
/// All values are in input coordinate units, so they only hold for a fixed
/// camera distance within a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseThresholds {
    /// Growth in draw length that means the string is being pulled
    pub drawing_delta: f64,
    /// Draw length that counts as full draw
    pub anchor_min_length: f64,
    /// Largest frame-to-frame change still considered holding at anchor
    pub anchor_max_delta: f64,
    /// Drop in draw length that means the string was let go
    pub release_delta: f64,
    /// Draw length below which the arm is back down
    pub follow_through_max_length: f64,
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self {
            drawing_delta: 5.0,
            anchor_min_length: 100.0,
            anchor_max_delta: 3.0,
            release_delta: 10.0,
            follow_through_max_length: 80.0,
        }
    }
}

impl PhaseThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            self.drawing_delta,
            self.anchor_min_length,
            self.anchor_max_delta,
            self.release_delta,
            self.follow_through_max_length,
        ];
        if fields.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ConfigError::Invalid("phase thresholds must be finite and non-negative"));
        }
        Ok(())
    }
}

// ============================================================================
// FORM CONFIG
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub scoring: ScoringConfig,
    pub phase: PhaseThresholds,
    /// Landmarks reported with lower visibility are treated as undetected
    pub min_visibility: f64,
}

impl FormConfig {
    /// Parse and validate a (possibly partial) JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FormConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate()?;
        self.phase.validate()?;
        if !(0.0..=1.0).contains(&self.min_visibility) {
            return Err(ConfigError::Invalid("min_visibility must be within 0..=1"));
        }
        Ok(())
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "config parse error: {}", err),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(FormConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = FormConfig::from_json(r#"{ "phase": { "anchor_min_length": 0.3 } }"#).unwrap();
        assert_eq!(config.phase.anchor_min_length, 0.3);
        assert_eq!(config.phase.drawing_delta, 5.0);
        assert_eq!(config.scoring, ScoringConfig::default());
        assert_eq!(config.min_visibility, 0.0);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(FormConfig::from_json("{}").unwrap(), FormConfig::default());
    }

    #[test]
    fn test_malformed_json() {
        let err = FormConfig::from_json("{ scoring: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }

    #[test]
    fn test_rejects_zero_divisor() {
        let err = FormConfig::from_json(r#"{ "scoring": { "head_offset_divisor": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let err = FormConfig::from_json(r#"{ "phase": { "release_delta": -1 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_visibility_out_of_range() {
        assert!(FormConfig::from_json(r#"{ "min_visibility": 1.5 }"#).is_err());
        assert!(FormConfig::from_json(r#"{ "min_visibility": 0.5 }"#).is_ok());
    }
}
