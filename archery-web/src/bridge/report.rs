//! JS-visible wrappers around analysis results

use wasm_bindgen::prelude::*;

use crate::form::{Criterion, FrameAnalysis, ShotPhase};

/// One frame's form analysis, readable from JavaScript
#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct FormReport {
    analysis: FrameAnalysis,
}

#[wasm_bindgen]
impl FormReport {
    #[wasm_bindgen(getter, js_name = dominantHand)]
    pub fn dominant_hand(&self) -> String {
        self.analysis.dominant_hand.name().to_string()
    }

    #[wasm_bindgen(getter, js_name = bowArm)]
    pub fn bow_arm(&self) -> String {
        self.analysis.bow_arm.name().to_string()
    }

    #[wasm_bindgen(getter, js_name = drawArm)]
    pub fn draw_arm(&self) -> String {
        self.analysis.draw_arm.name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn feedback(&self) -> Vec<String> {
        self.analysis.feedback.clone()
    }

    #[wasm_bindgen(getter, js_name = drawLength)]
    pub fn draw_length(&self) -> f64 {
        self.analysis.draw_length
    }

    #[wasm_bindgen(getter, js_name = bowArmExtension)]
    pub fn bow_arm_extension(&self) -> f64 {
        self.analysis.bow_arm_extension
    }

    #[wasm_bindgen(getter, js_name = overallScore)]
    pub fn overall_score(&self) -> f64 {
        self.analysis.overall_score
    }

    #[wasm_bindgen(getter, js_name = isDrawing)]
    pub fn is_drawing(&self) -> bool {
        self.analysis.is_drawing
    }

    /// Score for a criterion by its camelCase name, e.g. `"stance"`
    pub fn score(&self, criterion: &str) -> Option<f64> {
        Criterion::from_name(criterion).map(|c| self.analysis.scores.get(c))
    }

    /// Full analysis as a JSON object string
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.analysis).unwrap_or_else(|_| "null".to_string())
    }
}

impl FormReport {
    pub fn new(analysis: FrameAnalysis) -> Self {
        Self { analysis }
    }

    pub fn analysis(&self) -> &FrameAnalysis {
        &self.analysis
    }
}

/// Result of one tracked frame: the phase, plus the analysis if there was one
#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct FrameUpdate {
    analysis: Option<FrameAnalysis>,
    phase: ShotPhase,
}

#[wasm_bindgen]
impl FrameUpdate {
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        self.phase.name().to_string()
    }

    #[wasm_bindgen(getter, js_name = hasAnalysis)]
    pub fn has_analysis(&self) -> bool {
        self.analysis.is_some()
    }

    pub fn report(&self) -> Option<FormReport> {
        self.analysis.clone().map(FormReport::new)
    }
}

impl FrameUpdate {
    pub fn new(analysis: Option<FrameAnalysis>, phase: ShotPhase) -> Self {
        Self { analysis, phase }
    }

    pub fn shot_phase(&self) -> ShotPhase {
        self.phase
    }
}
